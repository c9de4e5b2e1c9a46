use std::io::Write;

use mugo_parser::ast::{Expr, ExprId, UnaryOp};

use super::{EmitResult, Translator};
use crate::error::Unsupported;

pub(super) fn expr_kind_name(expr: &Expr) -> &'static str {
    match expr {
        Expr::Ident(_) => "identifier",
        Expr::BasicLit(_) => "literal",
        Expr::CompositeLit { .. } => "composite literal",
        Expr::KeyValue { .. } => "key/value pair",
        Expr::FuncLit { .. } => "function literal",
        Expr::Paren(_) => "parenthesized expression",
        Expr::Selector { .. } => "selector",
        Expr::Index { .. } => "index expression",
        Expr::Slice { .. } => "slice expression",
        Expr::TypeAssert { .. } => "type assertion",
        Expr::Call { .. } => "call",
        Expr::Star(_) => "dereference",
        Expr::Unary { .. } => "unary expression",
        Expr::Binary { .. } => "binary expression",
        Expr::Type(_) => "type expression",
    }
}

impl<W: Write> Translator<'_, W> {
    /// Renders an expression as C++ text.
    ///
    /// Binary operators are written without spaces and without added
    /// parentheses; grouping is whatever the tree shape already implies.
    pub(super) fn expr(&self, id: ExprId) -> EmitResult<String> {
        let file = self.file;
        let span = file.arena.exprs.span(id);
        match file.arena.exprs[id] {
            Expr::BasicLit(_) => Ok(file.text(span).to_owned()),
            Expr::Ident(sym) => Ok(file.name(sym).to_owned()),
            Expr::Binary { left, op, right } => Ok(format!(
                "{}{}{}",
                self.expr(left)?,
                op.as_str(),
                self.expr(right)?
            )),
            Expr::Unary { op: UnaryOp::Recv, .. } => {
                self.fail(span.start, Unsupported::construct("channel receive"))
            }
            Expr::Unary { op, expr } => Ok(format!("{}{}", op.as_str(), self.expr(expr)?)),
            Expr::Selector { expr, sel } => {
                Ok(format!("{}.{}", self.expr(expr)?, file.ident(sel)))
            }
            Expr::Star(inner) => Ok(format!("*{}", self.expr(inner)?)),
            Expr::Paren(inner) => Ok(format!("({})", self.expr(inner)?)),
            Expr::Call { variadic: true, .. } => {
                self.fail(span.start, Unsupported::construct("variadic call"))
            }
            Expr::Call { fun, args, .. } => {
                let callee = self.callee_name(fun)?;
                let args = file
                    .arena
                    .exprs_list(args)
                    .iter()
                    .map(|&arg| self.expr(arg))
                    .collect::<EmitResult<Vec<_>>>()?;
                Ok(format!("{callee}({})", args.join(", ")))
            }
            ref other => self.fail(span.start, Unsupported::construct(expr_kind_name(other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use mugo_parser::ast::{Stmt, TopLevelDecl};
    use mugo_parser::parse_source;

    use super::*;
    use crate::error::Error;

    /// Renders the expression statement that forms the body of `func f()`.
    fn render(expr: &str) -> Result<String, Error> {
        let src = format!("package p\n\nfunc f() {{\n\t{expr}\n}}\n");
        let file = parse_source(&src).unwrap();
        let TopLevelDecl::Func(f) = file.arena.top_decls(file.file.decls)[0] else {
            panic!("expected function");
        };
        let body = file.arena.funcs[f].body.unwrap();
        let stmt = file.arena.stmts_list(body.stmts)[0];
        let Stmt::Expr(e) = file.arena.stmts[stmt] else {
            panic!("expected expression statement");
        };
        Translator::new(Vec::new(), &file).expr(e)
    }

    #[test]
    fn calls_join_arguments() {
        assert_eq!(render("pinMode(ledPin, OUTPUT)").unwrap(), "pinMode(ledPin, OUTPUT)");
        assert_eq!(render("loop()").unwrap(), "loop()");
        assert_eq!(
            render("time.Sleep(100 * time.Millisecond)").unwrap(),
            "time.Sleep(100*time.Millisecond)"
        );
    }

    #[test]
    fn operators_render_without_spaces() {
        assert_eq!(render("f(a + b*c)").unwrap(), "f(a+b*c)");
        assert_eq!(render("f(-x, !ok, ^m)").unwrap(), "f(-x, !ok, ^m)");
        assert_eq!(render("f((a + b) * c)").unwrap(), "f((a+b)*c)");
        assert_eq!(render("f(*p, s.field)").unwrap(), "f(*p, s.field)");
    }

    #[test]
    fn literals_are_verbatim() {
        let src = r#"print("a\tb", 0x10, 1e3, 'x')"#;
        assert_eq!(render(src).unwrap(), src);
    }

    #[test]
    fn method_calls_through_pointers() {
        assert_eq!(render("(*led).On()").unwrap(), "(*led).On()");
        assert_eq!(render("a.b.c(1)").unwrap(), "a.b.c(1)");
    }

    #[test]
    fn unsupported_expressions_name_their_kind() {
        let err = render("f(xs[0])").unwrap_err();
        assert_eq!(err.to_string(), "line 4: unsupported index expression");

        let err = render("f(func() {})").unwrap_err();
        assert_eq!(err.unsupported(), Some(&Unsupported::construct("function literal")));

        let err = render("f(xs...)").unwrap_err();
        assert_eq!(err.unsupported(), Some(&Unsupported::construct("variadic call")));

        let err = render("f(<-ch)").unwrap_err();
        assert_eq!(err.unsupported(), Some(&Unsupported::construct("channel receive")));
    }
}
