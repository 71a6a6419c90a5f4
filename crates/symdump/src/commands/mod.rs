pub mod export_map;
pub mod exported_symbols;

use std::path::{Path, PathBuf};

use anyhow::Context;
use symdump_core::CellRoots;

/// Build the cell root table, anchoring relative roots at the working directory
pub fn cell_roots(assignments: &[(String, PathBuf)]) -> anyhow::Result<CellRoots> {
    let mut cells = CellRoots::new();
    for (name, root) in assignments {
        cells.insert(name.clone(), absolute(root)?);
    }
    Ok(cells)
}

pub fn absolute(path: &Path) -> anyhow::Result<PathBuf> {
    std::path::absolute(path).with_context(|| format!("cannot resolve {}", path.display()))
}
