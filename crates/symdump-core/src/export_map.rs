//! Export map construction for build files and their includes

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::path::Path;
use tracing::debug;

use crate::cells::CellRoots;
use crate::error::Result;
use crate::scanner::scan;
use crate::source::SourceFile;

/// Group key for the entry file's own bindings
pub const SELF_KEY: &str = "__self__";

/// Symbols one file contributes, keyed by that file's identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportGroup {
    pub key: String,
    pub symbols: Vec<String>,
}

impl ExportGroup {
    pub fn new(key: impl Into<String>, symbols: Vec<String>) -> Self {
        Self {
            key: key.into(),
            symbols,
        }
    }
}

/// Export groups in visitation order, at most one per key
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportMap {
    groups: Vec<ExportGroup>,
}

impl ExportMap {
    pub fn new() -> Self {
        Self { groups: Vec::new() }
    }

    /// Add a group unless its key is already present. Returns whether it was added.
    pub fn insert(&mut self, group: ExportGroup) -> bool {
        if self.contains_key(&group.key) {
            return false;
        }
        self.groups.push(group);
        true
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn get(&self, key: &str) -> Option<&ExportGroup> {
        self.groups.iter().find(|group| group.key == key)
    }

    pub fn groups(&self) -> &[ExportGroup] {
        &self.groups
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ExportGroup> {
        self.groups.iter()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Rewrite every key with `rekey`. Groups whose new keys collide are
    /// merged in order, keeping the first occurrence of each symbol.
    pub fn rekeyed<F>(&self, mut rekey: F) -> ExportMap
    where
        F: FnMut(&str) -> String,
    {
        let mut merged: Vec<ExportGroup> = Vec::with_capacity(self.groups.len());
        for group in &self.groups {
            let key = rekey(&group.key);
            match merged.iter_mut().find(|existing| existing.key == key) {
                Some(existing) => {
                    for symbol in &group.symbols {
                        if !existing.symbols.contains(symbol) {
                            existing.symbols.push(symbol.clone());
                        }
                    }
                }
                None => merged.push(ExportGroup::new(key, group.symbols.clone())),
            }
        }
        ExportMap { groups: merged }
    }
}

impl<'a> IntoIterator for &'a ExportMap {
    type Item = &'a ExportGroup;
    type IntoIter = std::slice::Iter<'a, ExportGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

// Serialized as an object of key -> symbols, keeping group order
impl Serialize for ExportMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for group in &self.groups {
            map.serialize_entry(&group.key, &group.symbols)?;
        }
        map.end()
    }
}

/// Everything one build file exports: its own bindings plus one group per
/// directly included file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildFileExports {
    pub own: ExportGroup,
    pub includes: ExportMap,
}

/// Builds export maps against a fixed cell root table
pub struct ExportMapBuilder<'a> {
    cells: &'a CellRoots,
}

impl<'a> ExportMapBuilder<'a> {
    pub fn new(cells: &'a CellRoots) -> Self {
        Self { cells }
    }

    /// Names bound at the top level of `entry` itself. Includes are not resolved.
    pub fn exported_symbols(&self, entry: &Path) -> Result<Vec<String>> {
        let source = SourceFile::read(entry)?;
        Ok(scan(&source)?.symbol_names())
    }

    /// One group per distinct file `entry` includes, in include order
    pub fn export_map(&self, entry: &Path) -> Result<ExportMap> {
        Ok(self.build(entry)?.includes)
    }

    /// Scan `entry` and each file it includes directly.
    ///
    /// Includes inside included files are not followed.
    pub fn build(&self, entry: &Path) -> Result<BuildFileExports> {
        let source = SourceFile::read(entry)?;
        let scanned = scan(&source)?;

        let mut includes = ExportMap::new();
        for directive in &scanned.includes {
            let resolved = self
                .cells
                .resolve_include(&directive.reference, source.path())?;
            if includes.contains_key(&resolved.group_key) {
                debug!(key = %resolved.group_key, "skipping repeated include");
                continue;
            }

            let included = SourceFile::read(&resolved.path)?;
            let symbols = scan(&included)?.symbol_names();
            debug!(
                key = %resolved.group_key,
                symbols = symbols.len(),
                "collected include exports"
            );
            includes.insert(ExportGroup::new(resolved.group_key, symbols));
        }

        Ok(BuildFileExports {
            own: ExportGroup::new(SELF_KEY, scanned.symbol_names()),
            includes,
        })
    }
}
