use crate::ast::*;

pub trait Walk<'ast> {
    fn walk<V: Visitor<'ast> + ?Sized>(&self, a: &'ast AstArena, v: &mut V);
}

/// Pre-order visitor over the tree.
///
/// Every method defaults to walking the node's children, so an override that
/// still wants the subtree must call `walk` itself.
pub trait Visitor<'ast> {
    #[inline(always)]
    fn visit_source_file(&mut self, a: &'ast AstArena, f: &'ast SourceFile) {
        f.walk(a, self);
    }

    #[inline(always)]
    fn visit_gen_decl(&mut self, a: &'ast AstArena, id: GenDeclId) {
        a.gen_decls[id].walk(a, self);
    }

    #[inline(always)]
    fn visit_spec(&mut self, a: &'ast AstArena, id: SpecId) {
        a.specs[id].walk(a, self);
    }

    #[inline(always)]
    fn visit_func_decl(&mut self, a: &'ast AstArena, id: FuncDeclId) {
        a.funcs[id].walk(a, self);
    }

    #[inline(always)]
    fn visit_stmt(&mut self, a: &'ast AstArena, id: StmtId) {
        a.stmts[id].walk(a, self);
    }

    #[inline(always)]
    fn visit_expr(&mut self, a: &'ast AstArena, id: ExprId) {
        a.exprs[id].walk(a, self);
    }

    #[inline(always)]
    fn visit_type(&mut self, a: &'ast AstArena, id: TypeId) {
        a.types[id].walk(a, self);
    }

    #[inline(always)]
    fn visit_field(&mut self, a: &'ast AstArena, id: FieldId) {
        a.fields[id].walk(a, self);
    }

    #[inline(always)]
    fn visit_case_clause(&mut self, a: &'ast AstArena, id: CaseClauseId) {
        a.case_clauses[id].walk(a, self);
    }

    /// Identifier occurrences that name something (declarations, selectors,
    /// labels). Plain identifier expressions go through `visit_expr`.
    #[inline(always)]
    fn visit_ident_name(&mut self, _a: &'ast AstArena, _name: IdentName) {}

    #[inline(always)]
    fn visit_comment(&mut self, _a: &'ast AstArena, _id: CommentId) {}

    #[inline(always)]
    fn visit_comment_group(&mut self, a: &'ast AstArena, id: CommentGroupId) {
        a.comment_groups[id].walk(a, self);
    }
}

macro_rules! impl_walk_for_ids {
    ($($id:ty => $visit:ident),* $(,)?) => {
        $(
            impl<'ast> Walk<'ast> for $id {
                #[inline(always)]
                fn walk<V: Visitor<'ast> + ?Sized>(&self, a: &'ast AstArena, v: &mut V) {
                    v.$visit(a, *self);
                }
            }
        )*
    };
}

impl_walk_for_ids! {
    GenDeclId => visit_gen_decl,
    SpecId => visit_spec,
    FuncDeclId => visit_func_decl,
    StmtId => visit_stmt,
    ExprId => visit_expr,
    TypeId => visit_type,
    FieldId => visit_field,
    CaseClauseId => visit_case_clause,
    IdentName => visit_ident_name,
    CommentId => visit_comment,
    CommentGroupId => visit_comment_group,
}

pub trait ListSlice<T> {
    fn slice(&self, r: ListRef<T>) -> &[T];
}

impl<'ast, T> Walk<'ast> for ListRef<T>
where
    AstArena: ListSlice<T>,
    T: Walk<'ast>,
{
    #[inline(always)]
    fn walk<V: Visitor<'ast> + ?Sized>(&self, a: &'ast AstArena, v: &mut V) {
        for item in a.slice(*self) {
            item.walk(a, v);
        }
    }
}

macro_rules! impl_list_slice {
    ($($t:ty => $getter:ident),* $(,)?) => {
        $(
            impl ListSlice<$t> for AstArena {
                #[inline(always)]
                fn slice(&self, r: ListRef<$t>) -> &[$t] {
                    self.$getter(r)
                }
            }
        )*
    };
}

impl_list_slice! {
    IdentName => ident_names,
    ExprId => exprs_list,
    StmtId => stmts_list,
    FieldId => fields_list,
    SpecId => specs_list,
    TopLevelDecl => top_decls,
    CaseClauseId => case_clauses_list,
    CommentId => comment_ids,
    CommentGroupId => comment_group_ids,
}

impl<'ast, T: Walk<'ast>> Walk<'ast> for Option<T> {
    #[inline(always)]
    fn walk<V: Visitor<'ast> + ?Sized>(&self, a: &'ast AstArena, v: &mut V) {
        if let Some(x) = self {
            x.walk(a, v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        exprs: usize,
        names: usize,
    }

    impl<'ast> Visitor<'ast> for Counter {
        fn visit_expr(&mut self, a: &'ast AstArena, id: ExprId) {
            self.exprs += 1;
            a.exprs[id].walk(a, self);
        }

        fn visit_ident_name(&mut self, _a: &'ast AstArena, _name: IdentName) {
            self.names += 1;
        }
    }

    #[test]
    fn walk_reaches_nested_exprs() {
        let mut arena = AstArena::new();
        let mut interner = Interner::new();
        let x = interner.intern("x");
        let left = arena.exprs.alloc(Expr::Ident(x), Span::new(0, 1));
        let right = arena.exprs.alloc(Expr::Ident(x), Span::new(4, 5));
        let sum = arena.exprs.alloc(
            Expr::Binary {
                left,
                op: BinaryOp::Add,
                right,
            },
            Span::new(0, 5),
        );
        let sel = arena.exprs.alloc(
            Expr::Selector {
                expr: sum,
                sel: IdentName {
                    sym: x,
                    pos: Span::new(6, 7),
                },
            },
            Span::new(0, 7),
        );

        let mut counter = Counter::default();
        counter.visit_expr(&arena, sel);
        assert_eq!(counter.exprs, 4);
        assert_eq!(counter.names, 1);
    }
}
