//! Cell root table and include reference resolution

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, SymdumpError};

/// Mapping from cell name to the directory its paths are rooted at
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellRoots {
    roots: HashMap<String, PathBuf>,
}

/// Where an include reference points and how it is keyed in an export map
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedInclude {
    /// `cell//relative/path`, or the reference as written for local includes
    pub group_key: String,
    pub path: PathBuf,
}

/// Parse a `NAME=PATH` cell root assignment
pub fn parse_cell_root(value: &str) -> Result<(String, PathBuf)> {
    match value.split_once('=') {
        Some((name, path)) if !path.is_empty() && !name.contains("//") => {
            Ok((name.to_string(), PathBuf::from(path)))
        }
        _ => Err(SymdumpError::InvalidCellRoot(value.to_string())),
    }
}

impl CellRoots {
    pub fn new() -> Self {
        Self {
            roots: HashMap::new(),
        }
    }

    /// Build a table from `NAME=PATH` assignments; later names override earlier ones
    pub fn from_assignments<I, S>(assignments: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut cells = Self::new();
        for assignment in assignments {
            let (name, root) = parse_cell_root(assignment.as_ref())?;
            cells.insert(name, root);
        }
        Ok(cells)
    }

    pub fn insert(&mut self, name: impl Into<String>, root: impl Into<PathBuf>) -> Option<PathBuf> {
        self.roots.insert(name.into(), root.into())
    }

    pub fn get(&self, name: &str) -> Option<&Path> {
        self.roots.get(name).map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Resolve an include reference found in `including_file`.
    ///
    /// `cell//relative/path` is rooted at the named cell; a reference without
    /// `//` is relative to the including file's directory.
    pub fn resolve_include(
        &self,
        reference: &str,
        including_file: &Path,
    ) -> Result<ResolvedInclude> {
        let resolved = match reference.split_once("//") {
            Some((cell, relative)) => {
                let root = self.get(cell).ok_or_else(|| SymdumpError::UnknownCell {
                    cell: cell.to_string(),
                    reference: reference.to_string(),
                })?;
                ResolvedInclude {
                    group_key: reference.to_string(),
                    path: root.join(relative.trim_start_matches('/')),
                }
            }
            None => {
                let directory = including_file.parent().unwrap_or_else(|| Path::new(""));
                ResolvedInclude {
                    group_key: reference.to_string(),
                    path: directory.join(reference),
                }
            }
        };

        debug!(
            reference,
            path = %resolved.path.display(),
            "resolved include"
        );
        Ok(resolved)
    }
}

impl FromIterator<(String, PathBuf)> for CellRoots {
    fn from_iter<T: IntoIterator<Item = (String, PathBuf)>>(iter: T) -> Self {
        Self {
            roots: iter.into_iter().collect(),
        }
    }
}
