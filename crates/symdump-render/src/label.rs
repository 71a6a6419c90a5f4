//! Load-statement paths derived from export map keys

/// An export map key split into cell, package and file name.
///
/// `cell//pkg/DEFS` has cell `cell`, package `pkg` and name `DEFS`. Local
/// keys (no `//`) have no cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IncludeLabel<'a> {
    pub cell: Option<&'a str>,
    pub package: &'a str,
    pub name: &'a str,
}

impl<'a> IncludeLabel<'a> {
    pub fn parse(key: &'a str) -> Self {
        let (cell, path) = match key.split_once("//") {
            Some((cell, path)) => (Some(cell), path),
            None => (None, key),
        };
        let (package, name) = path.rsplit_once('/').unwrap_or(("", path));
        Self {
            cell,
            package,
            name,
        }
    }

    /// Path form used inside `load(...)`: the file name moves after a colon
    /// (`cell//pkg/DEFS` becomes `cell//pkg:DEFS`). `cell_prefix` is prepended
    /// to non-empty cell names.
    pub fn import_string(&self, cell_prefix: &str) -> String {
        match self.cell {
            Some("") => format!("//{}:{}", self.package, self.name),
            Some(cell) => format!("{cell_prefix}{cell}//{}:{}", self.package, self.name),
            None => format!("{}:{}", self.package, self.name),
        }
    }
}

/// `load("<path>", "<sym1>", "<sym2>", ...)`
pub fn load_statement(import_string: &str, symbols: &[String]) -> String {
    let args: String = symbols.iter().map(|s| format!(", \"{s}\"")).collect();
    format!("load(\"{import_string}\"{args})")
}
