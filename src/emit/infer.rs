use std::io::Write;

use mugo_parser::ast::{BasicLitKind, Expr, ExprId, ListRef, Type, TypeId};

use super::expr::expr_kind_name;
use super::{EmitResult, Translator};
use crate::error::Unsupported;

/// Kind and source text of the value a declaration is initialized with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Literal<'p> {
    pub kind: BasicLitKind,
    pub text: &'p str,
}

/// Closest C type for a literal kind; `None` when there is none.
pub fn token_spelling(kind: BasicLitKind, is_const: bool) -> Option<&'static str> {
    match (kind, is_const) {
        (BasicLitKind::Int, false) => Some("int"),
        (BasicLitKind::Int, true) => Some("const int"),
        (BasicLitKind::String, false) => Some("const char *"),
        (BasicLitKind::String, true) => Some("const char * const"),
        _ => None,
    }
}

pub(super) fn kind_name(kind: BasicLitKind) -> &'static str {
    match kind {
        BasicLitKind::Int => "integer",
        BasicLitKind::Float => "float",
        BasicLitKind::Imag => "imaginary",
        BasicLitKind::Rune => "rune",
        BasicLitKind::String => "string",
    }
}

impl<'p, W: Write> Translator<'p, W> {
    /// Literal a value spec is initialized with.
    ///
    /// Without a value, `int` and `string` default to their zero values. With
    /// one, the value must be a literal; an explicit type must agree with it.
    pub(super) fn spec_literal(
        &self,
        at: u32,
        typ: Option<TypeId>,
        values: ListRef<ExprId>,
    ) -> EmitResult<Literal<'p>> {
        let file = self.file;
        let values = file.arena.exprs_list(values);

        let lit = match *values {
            [] => {
                let Some(typ) = typ else {
                    return self.fail(at, Unsupported::initializer("missing type and value"));
                };
                return self.zero_value(typ);
            }
            [value] => match file.arena.exprs[value] {
                Expr::BasicLit(lit) => Literal {
                    kind: lit.kind,
                    text: file.text(file.arena.exprs.span(value)),
                },
                _ => {
                    let text = file.text(file.arena.exprs.span(value));
                    return self.fail(at, Unsupported::initializer(format!("`{text}`")));
                }
            },
            _ => {
                return self.fail(
                    at,
                    Unsupported::initializer(format!("{} values", values.len())),
                );
            }
        };

        if let Some(typ) = typ {
            let declared = self.zero_value(typ)?;
            if declared.kind != lit.kind {
                let name = file.text(file.arena.types.span(typ));
                return self.fail(
                    at,
                    Unsupported::typ(format!("{name} = {} literal", kind_name(lit.kind))),
                );
            }
        }
        Ok(lit)
    }

    fn zero_value(&self, typ: TypeId) -> EmitResult<Literal<'p>> {
        let file = self.file;
        let span = file.arena.types.span(typ);
        if let Type::Name(sym) = file.arena.types[typ] {
            match file.name(sym) {
                "int" => {
                    return Ok(Literal {
                        kind: BasicLitKind::Int,
                        text: "0",
                    });
                }
                "string" => {
                    return Ok(Literal {
                        kind: BasicLitKind::String,
                        text: "\"\"",
                    });
                }
                _ => {}
            }
        }
        self.fail(span.start, Unsupported::typ(file.text(span)))
    }

    /// Type token written in front of a `:=` target.
    ///
    /// Literals give their C type. Anything else falls back to the text of
    /// the leftmost identifier of the value, so `b := a + 1` declares `a b`;
    /// the result only compiles when that identifier names a type. Unary
    /// operators and parentheses are looked through; other shapes are
    /// rejected.
    pub(super) fn define_type(&self, value: ExprId) -> EmitResult<String> {
        let file = self.file;
        let at = file.arena.exprs.span(value).start;
        match file.arena.exprs[value] {
            Expr::BasicLit(lit) => match token_spelling(lit.kind, false) {
                Some(spelling) => Ok(spelling.to_owned()),
                None => self.fail(
                    at,
                    Unsupported::typ(format!("{} literal", kind_name(lit.kind))),
                ),
            },
            Expr::Ident(sym) => Ok(file.name(sym).to_owned()),
            Expr::Binary { left, .. } => self.define_type(left),
            Expr::Unary { expr, .. } | Expr::Paren(expr) => self.define_type(expr),
            ref other => self.fail(
                at,
                Unsupported::construct(format!("`:=` from a {}", expr_kind_name(other))),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use mugo_parser::ast::{Spec, TopLevelDecl};
    use mugo_parser::parse_source;

    use super::*;
    use crate::error::Error;

    fn literal_of(src: &str) -> Result<(BasicLitKind, String), Error> {
        let file = parse_source(src).unwrap();
        let TopLevelDecl::Gen(g) = file.arena.top_decls(file.file.decls)[0] else {
            panic!("expected declaration");
        };
        let id = file.arena.specs_list(file.arena.gen_decls[g].specs)[0];
        let Spec::Value { typ, values, .. } = file.arena.specs[id] else {
            panic!("expected value spec");
        };
        let t = Translator::new(Vec::new(), &file);
        let at = file.arena.specs.span(id).start;
        t.spec_literal(at, typ, values)
            .map(|lit| (lit.kind, lit.text.to_owned()))
    }

    #[test]
    fn zero_values() {
        assert_eq!(
            literal_of("package p\nvar a int\n").unwrap(),
            (BasicLitKind::Int, "0".to_owned())
        );
        assert_eq!(
            literal_of("package p\nvar a string\n").unwrap(),
            (BasicLitKind::String, "\"\"".to_owned())
        );
        let err = literal_of("package p\nvar a float64\n").unwrap_err();
        assert_eq!(err.unsupported(), Some(&Unsupported::typ("float64")));
    }

    #[test]
    fn literals_pass_through_verbatim() {
        assert_eq!(
            literal_of("package p\nconst a = 0x1F\n").unwrap(),
            (BasicLitKind::Int, "0x1F".to_owned())
        );
        assert_eq!(
            literal_of("package p\nconst a = `raw`\n").unwrap(),
            (BasicLitKind::String, "`raw`".to_owned())
        );
        assert_eq!(
            literal_of("package p\nvar a int = 3\n").unwrap(),
            (BasicLitKind::Int, "3".to_owned())
        );
    }

    #[test]
    fn rejected_initializers() {
        let err = literal_of("package p\nvar a = b\n").unwrap_err();
        assert_eq!(err.unsupported(), Some(&Unsupported::initializer("`b`")));

        let err = literal_of("package p\nvar a, b = 1, 2\n").unwrap_err();
        assert_eq!(err.unsupported(), Some(&Unsupported::initializer("2 values")));

        let err = literal_of("package p\nvar a string = 1\n").unwrap_err();
        assert!(matches!(err.unsupported(), Some(Unsupported::Type { .. })));
    }

    #[test]
    fn spellings() {
        assert_eq!(token_spelling(BasicLitKind::Int, true), Some("const int"));
        assert_eq!(
            token_spelling(BasicLitKind::String, true),
            Some("const char * const")
        );
        assert_eq!(token_spelling(BasicLitKind::String, false), Some("const char *"));
        assert_eq!(token_spelling(BasicLitKind::Float, false), None);
    }
}
