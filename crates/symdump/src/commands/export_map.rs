use std::path::Path;

use anyhow::Context;
use symdump_core::{CellRoots, ExportMapBuilder};
use symdump_render::{RenderOptions, render_export_map};

pub fn run(build_file: &Path, cells: &CellRoots, options: &RenderOptions) -> anyhow::Result<()> {
    let build_file = super::absolute(build_file)?;
    let map = ExportMapBuilder::new(cells).export_map(&build_file)?;
    tracing::info!(file = %build_file.display(), groups = map.len(), "export map");

    let output = render_export_map(&map, options).context("failed to render export map")?;
    println!("{output}");
    Ok(())
}
