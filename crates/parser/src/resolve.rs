//! Declaration-site classification of names.
//!
//! Every identifier that introduces a binding is recorded with what it
//! binds, keyed by its source span. Lookups go through the declaring
//! occurrence, which is all the translator needs to tell `const` specs
//! from `var` specs.

use std::collections::HashMap;

use crate::ast::*;
use crate::walk::{Visitor, Walk};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingKind {
    Const,
    Var,
    Type,
    Func,
    Package,
    Label,
}

#[derive(Debug, Default, Clone)]
pub struct Bindings {
    kinds: HashMap<Span, BindingKind>,
}

impl Bindings {
    pub fn collect(arena: &AstArena, file: &SourceFile) -> Self {
        let mut collector = Collector {
            out: Bindings::default(),
            decl_kind: None,
        };
        collector.visit_source_file(arena, file);
        collector.out
    }

    #[inline]
    pub fn kind_of(&self, name: IdentName) -> Option<BindingKind> {
        self.kinds.get(&name.pos).copied()
    }

    #[inline]
    pub fn is_const(&self, name: IdentName) -> bool {
        self.kind_of(name) == Some(BindingKind::Const)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    fn bind(&mut self, name: IdentName, kind: BindingKind) {
        self.kinds.insert(name.pos, kind);
    }
}

struct Collector {
    out: Bindings,
    decl_kind: Option<GenDeclKind>,
}

impl Collector {
    fn bind_fields(&mut self, a: &AstArena, fields: ListRef<FieldId>) {
        for &f in a.fields_list(fields) {
            for &name in a.ident_names(a.fields[f].names) {
                self.out.bind(name, BindingKind::Var);
            }
        }
    }

    fn bind_signature(&mut self, a: &AstArena, sig: Signature) {
        self.bind_fields(a, sig.params);
        self.bind_fields(a, sig.results);
    }

    fn bind_ident_expr(&mut self, a: &AstArena, e: Option<ExprId>) {
        let Some(e) = e else { return };
        if let Expr::Ident(sym) = a.exprs[e] {
            let pos = a.exprs.span(e);
            self.out.bind(IdentName { sym, pos }, BindingKind::Var);
        }
    }
}

impl<'ast> Visitor<'ast> for Collector {
    fn visit_gen_decl(&mut self, a: &'ast AstArena, id: GenDeclId) {
        let prev = self.decl_kind.replace(a.gen_decls[id].kind);
        a.gen_decls[id].walk(a, self);
        self.decl_kind = prev;
    }

    fn visit_spec(&mut self, a: &'ast AstArena, id: SpecId) {
        match a.specs[id] {
            Spec::Import {
                name: Some(name), ..
            } => self.out.bind(name, BindingKind::Package),
            Spec::Import { name: None, .. } => {}
            Spec::Value { names, .. } => {
                let kind = match self.decl_kind {
                    Some(GenDeclKind::Const) => BindingKind::Const,
                    _ => BindingKind::Var,
                };
                for &name in a.ident_names(names) {
                    self.out.bind(name, kind);
                }
            }
            Spec::Type { name, .. } => self.out.bind(name, BindingKind::Type),
        }
        a.specs[id].walk(a, self);
    }

    fn visit_func_decl(&mut self, a: &'ast AstArena, id: FuncDeclId) {
        let func = &a.funcs[id];
        self.out.bind(func.name, BindingKind::Func);
        if let Some(recv) = func.recv {
            self.bind_fields(a, recv);
        }
        self.bind_signature(a, func.sig);
        func.walk(a, self);
    }

    fn visit_stmt(&mut self, a: &'ast AstArena, id: StmtId) {
        match a.stmts[id] {
            Stmt::ShortVarDecl { names, .. } => {
                for &name in a.ident_names(names) {
                    self.out.bind(name, BindingKind::Var);
                }
            }
            Stmt::Labeled { label, .. } => self.out.bind(label, BindingKind::Label),
            Stmt::For {
                kind:
                    ForKind::Range {
                        key,
                        value,
                        define: true,
                        ..
                    },
                ..
            } => {
                self.bind_ident_expr(a, key);
                self.bind_ident_expr(a, value);
            }
            _ => {}
        }
        a.stmts[id].walk(a, self);
    }

    fn visit_expr(&mut self, a: &'ast AstArena, id: ExprId) {
        if let Expr::FuncLit { sig, .. } = a.exprs[id] {
            self.bind_signature(a, sig);
        }
        a.exprs[id].walk(a, self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn kinds_by_name(src: &str) -> Vec<(String, BindingKind)> {
        let p = parse(src).expect("parse");
        let b = Bindings::collect(&p.arena, &p.file);
        let mut out: Vec<_> = b
            .kinds
            .iter()
            .map(|(span, kind)| (span.text(src).to_owned(), *kind))
            .collect();
        out.sort_by(|l, r| l.0.cmp(&r.0));
        out
    }

    #[test]
    fn classifies_declarations() {
        let src = "package p\n\nimport m \"math\"\n\nconst c = 1\nvar v int\ntype T int\n\nfunc f(a int) {\n\tx := a\nloop:\n\tfor i := range x {\n\t}\n}\n";
        let kinds = kinds_by_name(src);
        assert_eq!(
            kinds,
            vec![
                ("T".to_owned(), BindingKind::Type),
                ("a".to_owned(), BindingKind::Var),
                ("c".to_owned(), BindingKind::Const),
                ("f".to_owned(), BindingKind::Func),
                ("i".to_owned(), BindingKind::Var),
                ("loop".to_owned(), BindingKind::Label),
                ("m".to_owned(), BindingKind::Package),
                ("v".to_owned(), BindingKind::Var),
                ("x".to_owned(), BindingKind::Var),
            ]
        );
    }

    #[test]
    fn grouped_consts_stay_const() {
        let src = "package p\nconst (\n\ta = 1\n\tb = 2\n)\nvar (\n\tc = 3\n)\n";
        let p = parse(src).expect("parse");
        let b = Bindings::collect(&p.arena, &p.file);
        let consts = b
            .kinds
            .values()
            .filter(|k| **k == BindingKind::Const)
            .count();
        assert_eq!(consts, 2);
        assert_eq!(b.len(), 3);
    }
}
