use std::path::Path;

use anyhow::Context;
use symdump_core::{CellRoots, ExportMapBuilder};
use symdump_render::{RenderOptions, render_symbols};

pub fn run(build_file: &Path, cells: &CellRoots, options: &RenderOptions) -> anyhow::Result<()> {
    let build_file = super::absolute(build_file)?;
    let symbols = ExportMapBuilder::new(cells).exported_symbols(&build_file)?;
    tracing::info!(file = %build_file.display(), symbols = symbols.len(), "exported symbols");

    let output = render_symbols(&symbols, options).context("failed to render symbols")?;
    println!("{output}");
    Ok(())
}
