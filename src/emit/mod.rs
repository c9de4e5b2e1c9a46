//! Translation of a parsed Go unit into Arduino C++ text.
//!
//! [`Translator`] owns the output sink and is implemented across the
//! submodules, one per concern:
//! - [`types`]: type expressions to C type spellings
//! - [`infer`]: literal kinds and zero values for declarations
//! - [`expr`]: expressions
//! - [`stmt`]: statements inside function bodies
//! - [`decl`]: top-level declarations
//!
//! Every emitter fails on the first construct outside the subset; text
//! written before the failure stays in the sink.

mod decl;
mod expr;
mod infer;
mod stmt;
mod types;

pub use infer::{Literal, token_spelling};
pub use types::MappedType;

use std::io::Write;

use mugo_parser::ParsedFile;
use mugo_parser::ast::{GenDeclKind, TopLevelDecl};

use crate::error::{Error, Unsupported};
use crate::output::Output;

type EmitResult<T> = Result<T, Error>;

pub struct Translator<'p, W> {
    file: &'p ParsedFile,
    out: Output<'p, W>,
}

impl<'p, W: Write> Translator<'p, W> {
    pub fn new(out: W, file: &'p ParsedFile) -> Self {
        Self {
            file,
            out: Output::new(out, file),
        }
    }

    /// Translates every top-level declaration in source order.
    ///
    /// Import specs are visited first so that comments ahead of them are
    /// flushed before any code.
    pub fn translate_file(&mut self) -> EmitResult<()> {
        let file = self.file;
        let decls = file.arena.top_decls(file.file.decls);

        for &decl in decls {
            let TopLevelDecl::Gen(id) = decl else {
                continue;
            };
            if file.arena.gen_decls[id].kind == GenDeclKind::Import {
                self.gen_decl(id)?;
            }
        }

        for &decl in decls {
            self.decl(decl)?;
        }
        self.out.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }

    /// Fails with `kind` located at byte offset `at`.
    fn fail<T>(&self, at: u32, kind: Unsupported) -> EmitResult<T> {
        Err(self.out.error_at(at, kind).into())
    }

    #[inline]
    fn write(&mut self, at: u32, text: &str) -> EmitResult<()> {
        self.out.write(at, text)?;
        Ok(())
    }
}
