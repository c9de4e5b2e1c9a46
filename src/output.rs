//! Comment-ordered output sink.
//!
//! Source comments live in a side list ordered by position. Before any text
//! is written on behalf of a node, every comment group that starts before
//! the node is flushed, so comments come out in reading order. The cursor
//! only moves forward; comments after the last written node are dropped.

use std::io::{self, Write};

use mugo_parser::ParsedFile;
use mugo_parser::ast::CommentGroupId;

use crate::error::{TranslateError, Unsupported};

pub struct Output<'p, W> {
    out: W,
    file: &'p ParsedFile,
    comments: &'p [CommentGroupId],
    next_comment: usize,
}

impl<'p, W: Write> Output<'p, W> {
    pub fn new(out: W, file: &'p ParsedFile) -> Self {
        Self {
            out,
            file,
            comments: file.arena.comment_group_ids(file.file.comments),
            next_comment: 0,
        }
    }

    /// Writes `text` on behalf of a node starting at byte offset `at`.
    pub fn write(&mut self, at: u32, text: &str) -> io::Result<()> {
        self.flush_comments_before(at)?;
        self.out.write_all(text.as_bytes())
    }

    fn flush_comments_before(&mut self, at: u32) -> io::Result<()> {
        let arena = &self.file.arena;
        while let Some(&group) = self.comments.get(self.next_comment) {
            let span = arena.comment_groups.span(group);
            if span.start >= at {
                break;
            }
            for &c in arena.comment_ids(arena.comment_groups[group].comments) {
                let text = self.file.text(arena.comments.span(c));
                writeln!(self.out, "{text}")?;
            }
            tracing::trace!(line = self.file.line_of(span.start), "flushed comment group");
            self.next_comment += 1;
        }
        Ok(())
    }

    /// Attaches the 1-based line of `at` to `kind`.
    pub fn error_at(&self, at: u32, kind: Unsupported) -> TranslateError {
        TranslateError {
            line: self.file.line_of(at),
            kind,
        }
    }

    /// Comment groups not yet flushed.
    pub fn pending_comments(&self) -> usize {
        self.comments.len() - self.next_comment
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mugo_parser::parse_source;

    #[test]
    fn flushes_groups_before_position_once() {
        let src = "package p\n\n// one\n// two\n\n/* three */\nvar x int\n\n// tail\n";
        let file = parse_source(src).unwrap();
        let x = src.find("var").unwrap() as u32;

        let mut out = Output::new(Vec::new(), &file);
        assert_eq!(out.pending_comments(), 3);
        out.write(x, "A\n").unwrap();
        out.write(x, "B\n").unwrap();
        assert_eq!(out.pending_comments(), 1);

        let text = String::from_utf8(out.into_inner()).unwrap();
        assert_eq!(text, "// one\n// two\n/* three */\nA\nB\n");
    }

    #[test]
    fn comment_at_node_start_is_not_flushed() {
        let src = "package p\n/* c */ var x int\n";
        let file = parse_source(src).unwrap();
        let c = src.find("/*").unwrap() as u32;

        let mut out = Output::new(Vec::new(), &file);
        out.write(c, "").unwrap();
        assert_eq!(out.pending_comments(), 1);
        out.write(c + 1, "").unwrap();
        assert_eq!(out.pending_comments(), 0);
    }

    #[test]
    fn error_lines_are_one_based() {
        let src = "package p\n\nvar x int\n";
        let file = parse_source(src).unwrap();
        let out = Output::new(io::sink(), &file);
        let err = out.error_at(src.find("var").unwrap() as u32, Unsupported::typ("T"));
        assert_eq!(err.line, 3);
        assert_eq!(err.to_string(), "line 3: unsupported type: T");
    }
}
