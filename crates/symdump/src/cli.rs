use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "symdump")]
#[command(version)]
#[command(about = "Report the symbols build files export, directly or through include_defs")]
pub struct Cli {
    /// Print JSON instead of plain text
    #[arg(long, global = true)]
    pub json: bool,

    /// Cell root as NAME=PATH (repeatable)
    #[arg(
        long = "cell_root",
        value_name = "NAME=PATH",
        value_parser = parse_cell_root_arg,
        global = true
    )]
    pub cell_roots: Vec<(String, PathBuf)>,

    /// More logging on stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the names a build file binds at top level
    #[command(name = "exported_symbols")]
    ExportedSymbols {
        /// Build file to inspect
        build_file: PathBuf,
    },

    /// Print the symbols each directly included file contributes
    #[command(name = "export_map")]
    ExportMap {
        /// Render groups as load(...) statements
        #[arg(long = "print_as_load_functions")]
        print_as_load_functions: bool,

        /// Prepended to cell names in load paths (e.g. @)
        #[arg(long = "cell_prefix", default_value = "")]
        cell_prefix: String,

        /// Key groups by their load import string
        #[arg(long = "use_load_function_import_string_format")]
        use_load_function_import_string_format: bool,

        /// Build file to inspect
        build_file: PathBuf,
    },
}

fn parse_cell_root_arg(value: &str) -> Result<(String, PathBuf), String> {
    symdump_core::parse_cell_root(value).map_err(|err| err.to_string())
}
