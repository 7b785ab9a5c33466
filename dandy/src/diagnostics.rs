//! Source-position tracking and caret-annotated diagnostics, shared by the regex lexer,
//! the regex parser, and the automaton file loader.
//!
//! The reference implementation reconstructs a caret's column from pointer arithmetic at
//! the point an error is raised. Here a [`SourceContext`] is built once up front and
//! threaded through lexing/parsing, so a diagnostic only ever needs the byte offset it
//! already has in hand.

use std::fmt;

/// A 1-based line/column position within a source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourcePos {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for SourcePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// The full source text of a single regex or file, with byte-offset -> line/column
/// resolution.
#[derive(Debug, Clone)]
pub struct SourceContext<'a> {
    source: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> SourceContext<'a> {
    pub fn new(source: &'a str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            source
                .char_indices()
                .filter(|&(_, c)| c == '\n')
                .map(|(i, _)| i + 1),
        );
        Self {
            source,
            line_starts,
        }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Resolves a byte offset into the source to a line/column position.
    pub fn resolve(&self, byte_offset: usize) -> SourcePos {
        let line_idx = match self.line_starts.binary_search(&byte_offset) {
            Ok(i) => i,
            Err(i) => i.saturating_sub(1),
        };
        let line_start = self.line_starts[line_idx];
        SourcePos {
            line: line_idx + 1,
            column: byte_offset - line_start + 1,
        }
    }

    fn line_text(&self, line_idx: usize) -> &'a str {
        let start = self.line_starts[line_idx];
        let end = self
            .line_starts
            .get(line_idx + 1)
            .map(|&e| e.saturating_sub(1))
            .unwrap_or(self.source.len());
        &self.source[start..end.max(start)]
    }

    /// Renders the source line containing `byte_offset`, followed by a caret line with
    /// `width` carets (`^`) starting under that offset.
    pub fn caret_at(&self, byte_offset: usize, width: usize) -> String {
        let pos = self.resolve(byte_offset);
        let line = self.line_text(pos.line - 1);
        let mut out = String::with_capacity(line.len() * 2 + 8);
        out.push_str(line);
        out.push('\n');
        out.extend(std::iter::repeat(' ').take(pos.column.saturating_sub(1)));
        out.extend(std::iter::repeat('^').take(width.max(1)));
        out
    }
}

/// A fully-formed diagnostic, ready to be printed to stderr by a CLI front end.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub path: Option<String>,
    pub pos: SourcePos,
    pub message: String,
    pub caret: Option<String>,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) => writeln!(f, "{path}:{}: {}", self.pos, self.message)?,
            None => writeln!(f, "{}: {}", self.pos, self.message)?,
        }
        if let Some(caret) = &self.caret {
            write!(f, "{caret}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_positions_across_lines() {
        let ctx = SourceContext::new("ab\ncd\nef");
        assert_eq!(ctx.resolve(0), SourcePos { line: 1, column: 1 });
        assert_eq!(ctx.resolve(2), SourcePos { line: 1, column: 3 });
        assert_eq!(ctx.resolve(3), SourcePos { line: 2, column: 1 });
        assert_eq!(ctx.resolve(7), SourcePos { line: 3, column: 2 });
    }

    #[test]
    fn caret_points_under_offending_column() {
        let ctx = SourceContext::new("a+*b");
        let rendered = ctx.caret_at(2, 1);
        assert_eq!(rendered, "a+*b\n  ^");
    }
}
