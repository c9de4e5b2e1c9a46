use crate::ast::{self, Span};

/// One comma-separated entry of a parameter list before grouping.
///
/// `typ == None` marks a bare identifier, which is either a parameter name
/// waiting for a type or a type name on its own; only the rest of the list
/// can tell which.
#[derive(Clone, Debug)]
pub struct ParamDecl {
    pub names: Vec<ast::IdentName>,
    pub typ: Option<ast::TypeId>,
    pub span: Span,
}

/// Groups parameter entries into fields.
///
/// `(a, b int, s string)` yields two fields, `(a b)` names `a` with type `b`,
/// and `(int, string)` yields two anonymous fields.
pub fn resolve_param_list(
    arena: &mut ast::AstArena,
    params: Vec<ParamDecl>,
) -> Vec<ast::FieldId> {
    let mut out = Vec::new();
    let mut pending_names: Vec<ast::IdentName> = Vec::new();
    let mut pending_start: Option<u32> = None;

    for param in params {
        if let Some(typ) = param.typ {
            let mut names = std::mem::take(&mut pending_names);
            names.extend(param.names);

            let names_ref = if names.is_empty() {
                ast::ListRef::EMPTY
            } else {
                arena.list_ident_names(names)
            };
            let start = pending_start.take().unwrap_or(param.span.start);
            let span = Span {
                start,
                end: param.span.end,
            };
            out.push(arena.fields.alloc(
                ast::Field {
                    names: names_ref,
                    typ,
                },
                span,
            ));
        } else {
            if pending_names.is_empty() {
                pending_start = Some(param.span.start);
            }
            pending_names.extend(param.names);
        }
    }

    // Trailing bare identifiers were types all along.
    for name in pending_names {
        let typ = arena.types.alloc(ast::Type::Name(name.sym), name.pos);
        out.push(arena.fields.alloc(
            ast::Field {
                names: ast::ListRef::EMPTY,
                typ,
            },
            name.pos,
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{AstArena, IdentName, Interner, Type};

    fn bare(interner: &mut Interner, name: &str, at: usize) -> ParamDecl {
        let pos = Span::new(at, at + name.len());
        ParamDecl {
            names: vec![IdentName {
                sym: interner.intern(name),
                pos,
            }],
            typ: None,
            span: pos,
        }
    }

    #[test]
    fn shared_type_absorbs_pending_names() {
        let mut arena = AstArena::new();
        let mut interner = Interner::new();
        let int = interner.intern("int");
        let typ = arena.types.alloc(Type::Name(int), Span::new(5, 8));
        let mut b = bare(&mut interner, "b", 3);
        b.typ = Some(typ);
        b.span = Span::new(3, 8);

        let params = vec![bare(&mut interner, "a", 0), b];
        let fields = resolve_param_list(&mut arena, params);
        assert_eq!(fields.len(), 1);
        let field = arena.fields[fields[0]];
        assert_eq!(arena.ident_names(field.names).len(), 2);
        assert_eq!(arena.fields.span(fields[0]), Span::new(0, 8));
    }

    #[test]
    fn bare_names_become_types() {
        let mut arena = AstArena::new();
        let mut interner = Interner::new();
        let params = vec![
            bare(&mut interner, "int", 0),
            bare(&mut interner, "string", 5),
        ];
        let fields = resolve_param_list(&mut arena, params);
        assert_eq!(fields.len(), 2);
        for id in fields {
            let field = arena.fields[id];
            assert!(field.names.is_empty());
            assert!(matches!(arena.types[field.typ], Type::Name(_)));
        }
    }
}
