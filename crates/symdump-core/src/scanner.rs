//! Statement-level scanning of build files
//!
//! Build files are not evaluated. The scanner cuts the text into logical
//! statements (respecting brackets, strings, comments and line
//! continuations) and recognises two top-level forms:
//!
//! - `name = "literal"` bindings
//! - `include_defs("cell//path")` directives
//!
//! Everything else is skipped.

use regex::Regex;
use std::sync::OnceLock;
use tracing::trace;

use crate::error::{Result, SymdumpError};
use crate::source::SourceFile;

/// A top-level assignment of a string literal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub name: String,
    pub literal_value: String,
    pub line: usize,
}

/// A top-level `include_defs` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeDirective {
    pub reference: String,
    pub line: usize,
}

/// Bindings and includes found in one build file, in source order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScannedFile {
    pub bindings: Vec<Binding>,
    pub includes: Vec<IncludeDirective>,
}

impl ScannedFile {
    /// Binding names in first-seen order, without repeats
    pub fn symbol_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::with_capacity(self.bindings.len());
        for binding in &self.bindings {
            if !names.contains(&binding.name) {
                names.push(binding.name.clone());
            }
        }
        names
    }
}

static BINDING_RE: OnceLock<Regex> = OnceLock::new();
static INCLUDE_RE: OnceLock<Regex> = OnceLock::new();

/// Scan a build file for top-level bindings and include directives
pub fn scan(source: &SourceFile) -> Result<ScannedFile> {
    let binding_re =
        BINDING_RE.get_or_init(|| Regex::new(r"(?s)^([A-Za-z_]\w*)\s*=(.*)$").unwrap());
    let include_re =
        INCLUDE_RE.get_or_init(|| Regex::new(r"(?s)^include_defs\s*\((.*)\)$").unwrap());

    let mut scanned = ScannedFile::default();

    for statement in split_statements(source.text()) {
        if !statement.top_level {
            continue;
        }

        if let Some(cap) = include_re.captures(&statement.text) {
            let reference = single_literal(&cap[1]).ok_or_else(|| SymdumpError::Parse {
                path: source.path().to_path_buf(),
                reason: format!(
                    "line {}: include_defs expects a single string literal argument",
                    statement.line
                ),
            })?;
            trace!(line = statement.line, %reference, "include directive");
            scanned.includes.push(IncludeDirective {
                reference,
                line: statement.line,
            });
        } else if let Some(cap) = binding_re.captures(&statement.text) {
            if let Some(literal_value) = string_expression(&cap[2]) {
                trace!(line = statement.line, name = &cap[1], "string binding");
                scanned.bindings.push(Binding {
                    name: cap[1].to_string(),
                    literal_value,
                    line: statement.line,
                });
            }
        }
    }

    Ok(scanned)
}

/// One logical statement with comments removed
#[derive(Debug, Clone, PartialEq, Eq)]
struct Statement {
    text: String,
    line: usize,
    top_level: bool,
}

struct Pending {
    buf: String,
    segment_start: usize,
    line: usize,
    top_level: bool,
}

/// Cuts source text into logical statements.
///
/// Works on bytes: every delimiter it cares about is ASCII, so slicing at
/// those positions always lands on a char boundary.
struct Splitter<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
    line: usize,
    line_start: usize,
    depth: usize,
    current: Option<Pending>,
    // Statements after `;` share the indentation of the line's first one
    inherited_top_level: Option<bool>,
    statements: Vec<Statement>,
}

fn split_statements(text: &str) -> Vec<Statement> {
    Splitter::new(text).split()
}

impl<'a> Splitter<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            bytes: text.as_bytes(),
            pos: 0,
            line: 1,
            line_start: 0,
            depth: 0,
            current: None,
            inherited_top_level: None,
            statements: Vec::new(),
        }
    }

    fn split(mut self) -> Vec<Statement> {
        while self.pos < self.bytes.len() {
            match self.bytes[self.pos] {
                b'#' => self.skip_comment(),
                quote @ (b'"' | b'\'') => {
                    self.begin();
                    self.skip_string(quote);
                }
                b'\\' if self.continuation_len() > 0 => {
                    self.pos += self.continuation_len();
                    self.newline();
                }
                b'\n' => {
                    if self.depth == 0 {
                        self.finish(self.pos);
                        self.inherited_top_level = None;
                    }
                    self.pos += 1;
                    self.newline();
                }
                b';' if self.depth == 0 => {
                    self.inherited_top_level = self.finish(self.pos);
                    self.pos += 1;
                }
                b' ' | b'\t' | b'\r' | b'\x0c' => self.pos += 1,
                b'(' | b'[' | b'{' => {
                    self.begin();
                    self.depth += 1;
                    self.pos += 1;
                }
                b')' | b']' | b'}' => {
                    self.begin();
                    self.depth = self.depth.saturating_sub(1);
                    self.pos += 1;
                }
                _ => {
                    self.begin();
                    self.pos += 1;
                }
            }
        }
        self.finish(self.pos);
        self.statements
    }

    fn newline(&mut self) {
        self.line += 1;
        self.line_start = self.pos;
    }

    /// Length of a backslash line continuation at the cursor, or 0
    fn continuation_len(&self) -> usize {
        let rest = &self.bytes[self.pos..];
        if rest.starts_with(b"\\\n") {
            2
        } else if rest.starts_with(b"\\\r\n") {
            3
        } else {
            0
        }
    }

    fn begin(&mut self) {
        if self.current.is_some() {
            return;
        }
        let top_level = self
            .inherited_top_level
            .take()
            .unwrap_or(self.pos == self.line_start);
        self.current = Some(Pending {
            buf: String::new(),
            segment_start: self.pos,
            line: self.line,
            top_level,
        });
    }

    fn finish(&mut self, end: usize) -> Option<bool> {
        let mut pending = self.current.take()?;
        pending
            .buf
            .push_str(&self.text[pending.segment_start..end]);
        self.depth = 0;
        self.statements.push(Statement {
            text: pending.buf.trim().to_string(),
            line: pending.line,
            top_level: pending.top_level,
        });
        Some(pending.top_level)
    }

    fn skip_comment(&mut self) {
        let end = self.bytes[self.pos..]
            .iter()
            .position(|&b| b == b'\n')
            .map_or(self.bytes.len(), |offset| self.pos + offset);
        if let Some(pending) = self.current.as_mut() {
            pending
                .buf
                .push_str(&self.text[pending.segment_start..self.pos]);
            pending.segment_start = end;
        }
        self.pos = end;
    }

    fn skip_string(&mut self, quote: u8) {
        let closing = [quote; 3];
        let triple = self.bytes[self.pos..].starts_with(&closing);
        let delim = if triple { 3 } else { 1 };
        self.pos += delim;

        while self.pos < self.bytes.len() {
            match self.bytes[self.pos] {
                b'\\' => {
                    let continuation = self.continuation_len();
                    if continuation > 0 {
                        self.pos += continuation;
                        self.newline();
                    } else {
                        self.pos += 2;
                    }
                }
                // Unterminated single-line string: let the newline end the statement
                b'\n' if !triple => return,
                b'\n' => {
                    self.pos += 1;
                    self.newline();
                }
                c if c == quote && (!triple || self.bytes[self.pos..].starts_with(&closing)) => {
                    self.pos += delim;
                    return;
                }
                _ => self.pos += 1,
            }
        }
        self.pos = self.bytes.len();
    }
}

/// Decode the argument list of an include call: exactly one string literal
fn single_literal(args: &str) -> Option<String> {
    let args = args.trim();
    let args = args.strip_suffix(',').unwrap_or(args);
    let (value, rest) = take_literal(skip_blank(args))?;
    skip_blank(rest).is_empty().then_some(value)
}

/// Decode one string literal or several adjacent ones, optionally parenthesized
fn string_expression(expr: &str) -> Option<String> {
    let expr = expr.trim();
    let mut rest = expr
        .strip_prefix('(')
        .and_then(|inner| inner.strip_suffix(')'))
        .unwrap_or(expr);

    let mut value = String::new();
    let mut pieces = 0;
    loop {
        rest = skip_blank(rest);
        if rest.is_empty() {
            break;
        }
        let (piece, tail) = take_literal(rest)?;
        value.push_str(&piece);
        pieces += 1;
        rest = tail;
    }
    (pieces > 0).then_some(value)
}

fn skip_blank(mut input: &str) -> &str {
    loop {
        input = input.trim_start();
        match input
            .strip_prefix("\\\n")
            .or_else(|| input.strip_prefix("\\\r\n"))
        {
            Some(rest) => input = rest,
            None => return input,
        }
    }
}

/// Split one string literal off the front of `input`, returning its decoded
/// value and the remaining text
fn take_literal(input: &str) -> Option<(String, &str)> {
    let (raw, prefix_len) = match input.as_bytes().first()? {
        b'r' | b'R' => (true, 1),
        b'u' | b'U' => (false, 1),
        _ => (false, 0),
    };
    let rest = &input[prefix_len..];
    let quote = *rest.as_bytes().first()?;
    if quote != b'"' && quote != b'\'' {
        return None;
    }

    let triple = rest.as_bytes().starts_with(&[quote; 3]);
    let delim = if triple { 3 } else { 1 };
    let closing = &rest[..delim];
    let body = &rest[delim..];
    let bytes = body.as_bytes();

    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'\n' if !triple => return None,
            c if c == quote && body[i..].starts_with(closing) => {
                let content = &body[..i];
                let value = if raw {
                    content.to_string()
                } else {
                    unescape(content)
                };
                return Some((value, &body[i + delim..]));
            }
            _ => i += 1,
        }
    }
    None
}

fn unescape(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut chars = content.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some(escaped @ ('\\' | '\'' | '"')) => out.push(escaped),
            Some('\n') => {}
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
