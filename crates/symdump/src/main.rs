mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use symdump_render::RenderOptions;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries only rendered output
    let level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    let cells = commands::cell_roots(&cli.cell_roots)?;

    match cli.command {
        Commands::ExportedSymbols { build_file } => {
            let options = RenderOptions {
                json: cli.json,
                ..Default::default()
            };
            commands::exported_symbols::run(&build_file, &cells, &options)
        }
        Commands::ExportMap {
            print_as_load_functions,
            cell_prefix,
            use_load_function_import_string_format,
            build_file,
        } => {
            let options = RenderOptions {
                json: cli.json,
                print_as_load_functions,
                cell_prefix,
                use_load_function_import_string_format,
            };
            commands::export_map::run(&build_file, &cells, &options)
        }
    }
}
