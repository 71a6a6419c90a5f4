use symdump_core::ExportMap;
use thiserror::Error;

use crate::json::to_json_string;
use crate::label::{IncludeLabel, load_statement};

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("rendered JSON is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Output presentation flags
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// JSON instead of plain text
    pub json: bool,

    /// Render each export group as a `load(...)` statement
    pub print_as_load_functions: bool,

    /// Prepended verbatim to cell names in load paths (e.g. `@`)
    pub cell_prefix: String,

    /// Key groups by their load import string, merging groups that share one
    pub use_load_function_import_string_format: bool,
}

/// Render a plain symbol list
pub fn render_symbols(symbols: &[String], options: &RenderOptions) -> Result<String, RenderError> {
    if options.json {
        to_json_string(symbols)
    } else {
        Ok(symbols.join("\n"))
    }
}

/// Render an export map according to `options`
pub fn render_export_map(map: &ExportMap, options: &RenderOptions) -> Result<String, RenderError> {
    let import_keyed;
    let map = if options.use_load_function_import_string_format {
        import_keyed =
            map.rekeyed(|key| IncludeLabel::parse(key).import_string(&options.cell_prefix));
        &import_keyed
    } else {
        map
    };

    if options.print_as_load_functions {
        let statements: Vec<String> = map
            .iter()
            .map(|group| {
                if options.use_load_function_import_string_format {
                    // Keys are already import strings
                    load_statement(&group.key, &group.symbols)
                } else {
                    let path = IncludeLabel::parse(&group.key).import_string(&options.cell_prefix);
                    load_statement(&path, &group.symbols)
                }
            })
            .collect();
        return if options.json {
            to_json_string(&statements)
        } else {
            Ok(statements.join("\n"))
        };
    }

    if options.json {
        to_json_string(map)
    } else {
        Ok(plain_export_map(map))
    }
}

fn plain_export_map(map: &ExportMap) -> String {
    let mut lines = Vec::new();
    for group in map {
        lines.push(format!("{}:", group.key));
        for symbol in &group.symbols {
            lines.push(format!("  {symbol}"));
        }
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use symdump_core::ExportGroup;

    fn sample_map() -> ExportMap {
        let mut map = ExportMap::new();
        map.insert(ExportGroup::new("cell//DEFS", vec!["foo".to_string()]));
        map
    }

    fn two_group_map() -> ExportMap {
        let mut map = sample_map();
        map.insert(ExportGroup::new(
            "other//pkg/DEFS",
            vec!["bar".to_string(), "baz".to_string()],
        ));
        map
    }

    #[test]
    fn test_symbols_plain_and_json() {
        let symbols = vec!["foo".to_string(), "bar".to_string()];
        let mut options = RenderOptions::default();
        assert_eq!(render_symbols(&symbols, &options).unwrap(), "foo\nbar");

        options.json = true;
        assert_eq!(render_symbols(&symbols, &options).unwrap(), r#"["foo", "bar"]"#);
    }

    #[test]
    fn test_empty_symbols() {
        let options = RenderOptions {
            json: true,
            ..Default::default()
        };
        assert_eq!(render_symbols(&[], &options).unwrap(), "[]");
        assert_eq!(render_symbols(&[], &RenderOptions::default()).unwrap(), "");
    }

    #[test]
    fn test_export_map_plain() {
        let rendered = render_export_map(&two_group_map(), &RenderOptions::default()).unwrap();
        assert_eq!(rendered, "cell//DEFS:\n  foo\nother//pkg/DEFS:\n  bar\n  baz");
    }

    #[test]
    fn test_export_map_json() {
        let options = RenderOptions {
            json: true,
            ..Default::default()
        };
        assert_eq!(
            render_export_map(&sample_map(), &options).unwrap(),
            r#"{"cell//DEFS": ["foo"]}"#
        );
    }

    #[test]
    fn test_load_functions_plain() {
        let options = RenderOptions {
            print_as_load_functions: true,
            ..Default::default()
        };
        assert_eq!(
            render_export_map(&two_group_map(), &options).unwrap(),
            "load(\"cell//:DEFS\", \"foo\")\nload(\"other//pkg:DEFS\", \"bar\", \"baz\")"
        );
    }

    #[test]
    fn test_load_functions_json_with_prefix() {
        let options = RenderOptions {
            json: true,
            print_as_load_functions: true,
            cell_prefix: "@".to_string(),
            ..Default::default()
        };
        assert_eq!(
            render_export_map(&sample_map(), &options).unwrap(),
            r#"["load(\"@cell//:DEFS\", \"foo\")"]"#
        );
    }

    #[test]
    fn test_import_string_format_json() {
        let options = RenderOptions {
            json: true,
            use_load_function_import_string_format: true,
            ..Default::default()
        };
        assert_eq!(
            render_export_map(&sample_map(), &options).unwrap(),
            r#"{"cell//:DEFS": ["foo"]}"#
        );
    }

    #[test]
    fn test_import_string_format_merges_shared_paths() {
        let mut map = ExportMap::new();
        map.insert(ExportGroup::new("cell//DEFS", vec!["foo".to_string()]));
        map.insert(ExportGroup::new("cell///DEFS", vec!["foo".to_string(), "bar".to_string()]));

        let options = RenderOptions {
            json: true,
            use_load_function_import_string_format: true,
            ..Default::default()
        };
        assert_eq!(
            render_export_map(&map, &options).unwrap(),
            r#"{"cell//:DEFS": ["foo", "bar"]}"#
        );
    }

    #[test]
    fn test_import_string_format_with_load_functions() {
        let options = RenderOptions {
            print_as_load_functions: true,
            use_load_function_import_string_format: true,
            cell_prefix: "@".to_string(),
            ..Default::default()
        };
        assert_eq!(
            render_export_map(&sample_map(), &options).unwrap(),
            r#"load("@cell//:DEFS", "foo")"#
        );
    }

    fn package_map() -> ExportMap {
        let mut map = ExportMap::new();
        map.insert(ExportGroup::new("cell//pkg/DEFS", vec!["foo".to_string()]));
        map
    }

    #[test]
    fn test_import_string_format_plain_with_prefix() {
        let options = RenderOptions {
            use_load_function_import_string_format: true,
            cell_prefix: "@".to_string(),
            ..Default::default()
        };
        assert_eq!(
            render_export_map(&package_map(), &options).unwrap(),
            "@cell//pkg:DEFS:\n  foo"
        );
    }

    #[test]
    fn test_import_string_format_json_with_prefix() {
        let options = RenderOptions {
            json: true,
            use_load_function_import_string_format: true,
            cell_prefix: "@".to_string(),
            ..Default::default()
        };
        assert_eq!(
            render_export_map(&package_map(), &options).unwrap(),
            r#"{"@cell//pkg:DEFS": ["foo"]}"#
        );
    }

    #[test]
    fn test_json_escapes_non_ascii() {
        let mut map = ExportMap::new();
        map.insert(ExportGroup::new("café//DEFS", vec!["bär".to_string()]));
        let options = RenderOptions {
            json: true,
            use_load_function_import_string_format: true,
            cell_prefix: "@".to_string(),
            ..Default::default()
        };
        assert_eq!(
            render_export_map(&map, &options).unwrap(),
            r#"{"@caf\u00e9//:DEFS": ["b\u00e4r"]}"#
        );

        // Plain text stays as written
        let plain = RenderOptions {
            json: false,
            ..options
        };
        assert_eq!(render_export_map(&map, &plain).unwrap(), "@café//:DEFS:\n  bär");
    }

    #[test]
    fn test_empty_export_map() {
        assert_eq!(render_export_map(&ExportMap::new(), &RenderOptions::default()).unwrap(), "");
        let options = RenderOptions {
            json: true,
            ..Default::default()
        };
        assert_eq!(render_export_map(&ExportMap::new(), &options).unwrap(), "{}");
    }
}
