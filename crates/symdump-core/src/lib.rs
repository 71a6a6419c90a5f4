//! Symbol-export resolution for build files
//!
//! Scans build files for top-level string bindings and `include_defs`
//! directives, resolves includes across cell roots and collects the symbols
//! each included file contributes.

mod cells;
mod error;
mod export_map;
mod scanner;
mod source;

pub use cells::{CellRoots, ResolvedInclude, parse_cell_root};
pub use error::{Result, SymdumpError};
pub use export_map::{BuildFileExports, ExportGroup, ExportMap, ExportMapBuilder, SELF_KEY};
pub use scanner::{Binding, IncludeDirective, ScannedFile, scan};
pub use source::SourceFile;
