use std::io::Write;

use mugo_parser::ast::{Expr, ExprId, Type, TypeId};

use super::{EmitResult, Translator};
use crate::error::Unsupported;

/// C spelling of a Go type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedType {
    pub spelling: String,
    /// Set when the type came from a `...T` parameter.
    pub variadic: bool,
}

impl MappedType {
    fn plain(spelling: impl Into<String>) -> Self {
        Self {
            spelling: spelling.into(),
            variadic: false,
        }
    }

    fn pointer_to(inner: MappedType) -> Self {
        Self {
            spelling: format!("*{}", inner.spelling),
            variadic: inner.variadic,
        }
    }
}

impl<W: Write> Translator<'_, W> {
    /// Maps a type expression to its C spelling.
    ///
    /// Arrays and slices decay to pointers; no length survives.
    pub(super) fn map_type(&self, id: TypeId) -> EmitResult<MappedType> {
        let file = self.file;
        let at = file.arena.types.span(id).start;
        match file.arena.types[id] {
            Type::Name(sym) => Ok(MappedType::plain(file.name(sym))),
            Type::Pointer(inner) | Type::Slice(inner) | Type::Array { elem: inner, .. } => {
                Ok(MappedType::pointer_to(self.map_type(inner)?))
            }
            Type::Variadic(inner) => Ok(MappedType {
                variadic: true,
                ..self.map_type(inner)?
            }),
            Type::Interface { .. } => Ok(MappedType::plain("void *")),
            Type::Qualified { pkg, name } => Ok(MappedType::plain(format!(
                "{}.{}",
                file.ident(pkg),
                file.ident(name)
            ))),
            Type::Paren(inner) => self.map_type(inner),
            Type::Func(_) => self.fail(at, Unsupported::construct("function pointers")),
            Type::Map { .. } => self.fail(at, Unsupported::construct("map type")),
            Type::Chan { .. } => self.fail(at, Unsupported::construct("channel type")),
            Type::Struct { .. } => self.fail(at, Unsupported::construct("struct type")),
        }
    }

    /// Spells a call target: a name, a dotted member path or a dereference.
    pub(super) fn callee_name(&self, id: ExprId) -> EmitResult<String> {
        let file = self.file;
        match file.arena.exprs[id] {
            Expr::Ident(sym) => Ok(file.name(sym).to_owned()),
            Expr::Selector { expr, sel } => {
                Ok(format!("{}.{}", self.callee_name(expr)?, file.ident(sel)))
            }
            Expr::Star(inner) => Ok(format!("*{}", self.callee_name(inner)?)),
            Expr::Paren(inner) => Ok(format!("({})", self.callee_name(inner)?)),
            Expr::Type(t) => Ok(self.map_type(t)?.spelling),
            _ => self.fail(
                file.arena.exprs.span(id).start,
                Unsupported::construct("call target"),
            ),
        }
    }
}
