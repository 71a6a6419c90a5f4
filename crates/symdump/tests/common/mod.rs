use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temp cell with `BUCK` including `cell//<defs_path>`, which defines `foo`
pub struct Fixture {
    pub dir: TempDir,
    pub build_file: PathBuf,
}

impl Fixture {
    pub fn with_defs(defs_path: &str) -> Self {
        let dir = TempDir::new().unwrap();
        let defs = dir.path().join(defs_path);
        let package = defs.parent().unwrap().to_path_buf();
        std::fs::create_dir_all(&package).unwrap();
        std::fs::write(&defs, "foo = \"FOO\"").unwrap();

        let build_file = package.join("BUCK");
        std::fs::write(&build_file, format!("include_defs(\"cell//{defs_path}\")")).unwrap();
        Self { dir, build_file }
    }

    pub fn cell_root(&self) -> String {
        format!("cell={}", self.dir.path().display())
    }
}

pub fn write_build_file(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("BUCK");
    std::fs::write(&path, content).unwrap();
    path
}

pub fn symdump() -> Command {
    let mut cmd = Command::cargo_bin("symdump").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}
