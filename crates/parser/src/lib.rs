//! Go subset front end (Logos lexer + recursive descent parser).
//!
//! - Lexer uses Logos and implements Go semicolon insertion; comments are
//!   kept and grouped the way `go/parser` groups them.
//! - Parser builds an arena-allocated syntax tree.
//! - `resolve` classifies declared names; `line_index` maps offsets to lines.

pub mod ast;
pub mod error;
pub mod lexer;
pub mod line_index;
pub mod parser;
mod parser_support;
pub mod resolve;
pub mod walk;

pub use error::{Diag, DiagKind, ParseFailure, Span};
pub use lexer::Lexer;
pub use line_index::LineIndex;
pub use resolve::{BindingKind, Bindings};

use ast::{AstArena, IdentName, Interner, SourceFile, Symbol};

/// A parsed translation unit and everything derived from it.
#[derive(Debug)]
pub struct ParsedFile {
    src: String,
    pub arena: AstArena,
    pub interner: Interner,
    pub file: SourceFile,
    pub bindings: Bindings,
    pub lines: LineIndex,
}

impl ParsedFile {
    #[inline]
    pub fn src(&self) -> &str {
        &self.src
    }

    /// Source text covered by `span`.
    #[inline]
    pub fn text(&self, span: Span) -> &str {
        self.src
            .get(span.start as usize..span.end as usize)
            .unwrap_or_default()
    }

    #[inline]
    pub fn name(&self, sym: Symbol) -> &str {
        self.interner.resolve(sym)
    }

    #[inline]
    pub fn ident(&self, name: IdentName) -> &str {
        self.interner.resolve(name.sym)
    }

    #[inline]
    pub fn line_of(&self, offset: u32) -> usize {
        self.lines.line(offset)
    }
}

/// Parses `src` and classifies its declarations.
#[tracing::instrument(skip_all, fields(len = src.len()))]
pub fn parse_source(src: &str) -> Result<ParsedFile, ParseFailure> {
    let parser::Parsed {
        arena,
        interner,
        file,
    } = parser::parse(src).inspect_err(|e| {
        tracing::debug!(diags = e.diags.len(), "parse failed");
    })?;
    let bindings = Bindings::collect(&arena, &file);
    tracing::debug!(
        decls = file.decls.len(),
        comment_groups = file.comments.len(),
        bindings = bindings.len(),
        "parsed"
    );
    Ok(ParsedFile {
        src: src.to_owned(),
        lines: LineIndex::new(src),
        arena,
        interner,
        file,
        bindings,
    })
}
