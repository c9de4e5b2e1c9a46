use std::io::Write;

use mugo_parser::ast::{AssignOp, Block, Stmt, StmtId};

use super::{EmitResult, Translator};
use crate::error::Unsupported;

fn indent(depth: usize) -> String {
    "  ".repeat(depth)
}

fn stmt_kind_name(stmt: &Stmt) -> &'static str {
    match stmt {
        Stmt::Empty => "empty statement",
        Stmt::Expr(_) => "expression statement",
        Stmt::Assign { .. } => "assignment",
        Stmt::ShortVarDecl { .. } => "short variable declaration",
        Stmt::IncDec { .. } => "increment/decrement statement",
        Stmt::Send { .. } => "send statement",
        Stmt::Decl(_) => "local declaration",
        Stmt::Labeled { .. } => "labeled statement",
        Stmt::Go { .. } => "go statement",
        Stmt::Defer { .. } => "defer statement",
        Stmt::Return { .. } => "return statement",
        Stmt::Branch { .. } => "branch statement",
        Stmt::Block(_) => "block statement",
        Stmt::If { .. } => "if statement",
        Stmt::For { .. } => "for statement",
        Stmt::Switch { .. } => "switch statement",
        Stmt::Select { .. } => "select statement",
    }
}

impl<W: Write> Translator<'_, W> {
    /// Writes the statements of `block` at `depth` levels of indentation.
    pub(super) fn block(&mut self, block: Block, depth: usize) -> EmitResult<()> {
        let file = self.file;
        for &stmt in file.arena.stmts_list(block.stmts) {
            self.stmt(stmt, depth)?;
        }
        Ok(())
    }

    fn stmt(&mut self, id: StmtId, depth: usize) -> EmitResult<()> {
        let file = self.file;
        let at = file.arena.stmts.span(id).start;
        let ind = indent(depth);

        match file.arena.stmts[id] {
            Stmt::Empty => Ok(()),
            Stmt::Expr(expr) => {
                let text = self.expr(expr)?;
                self.write(at, &format!("{ind}{text};\n"))
            }
            Stmt::Assign { op: AssignOp::Assign, lhs, rhs } => {
                let lhs = file.arena.exprs_list(lhs);
                let rhs = file.arena.exprs_list(rhs);
                let ([target], [value]) = (lhs, rhs) else {
                    return self.fail(at, assign_arity(lhs.len(), rhs.len()));
                };
                let target = self.expr(*target)?;
                let value = self.expr(*value)?;
                self.write(at, &format!("{ind}{target} = {value};\n"))
            }
            Stmt::Assign { op, .. } => {
                self.fail(at, Unsupported::construct(format!("`{}` assignment", op.as_str())))
            }
            Stmt::ShortVarDecl { names, values } => {
                let names = file.arena.ident_names(names);
                let values = file.arena.exprs_list(values);
                let ([name], [value]) = (names, values) else {
                    return self.fail(at, assign_arity(names.len(), values.len()));
                };
                let typ = self.define_type(*value)?;
                let value = self.expr(*value)?;
                let name = file.ident(*name);
                self.write(at, &format!("{ind}{typ} {name} = {value};\n"))
            }
            Stmt::If {
                init,
                cond,
                then_block,
                else_stmt,
            } => {
                if init.is_some() {
                    return self.fail(at, Unsupported::construct("if statement with initializer"));
                }
                let else_block = match else_stmt.map(|s| (s, file.arena.stmts[s])) {
                    None => None,
                    Some((_, Stmt::Block(block))) => Some(block),
                    Some((s, _)) => {
                        let at = file.arena.stmts.span(s).start;
                        return self.fail(at, Unsupported::construct("else if chain"));
                    }
                };

                let cond = self.expr(cond)?;
                self.write(at, &format!("{ind}if ({cond}) {{\n"))?;
                self.block(then_block, depth + 1)?;
                // A comment between `}` and `else` goes above `} else {`.
                let close = else_block.map_or(then_block.r_brace.start, |b| b.l_brace.start);
                self.write(close, &format!("{ind}}}"))?;

                let end = match else_block {
                    Some(block) => {
                        self.write(block.l_brace.start, " else {\n")?;
                        self.block(block, depth + 1)?;
                        self.write(block.r_brace.start, &format!("{ind}}}"))?;
                        block.r_brace.start
                    }
                    None => then_block.r_brace.start,
                };
                self.write(end, "\n")
            }
            Stmt::Return { results } => match *file.arena.exprs_list(results) {
                [] => self.write(at, &format!("{ind}return;\n")),
                [value] => {
                    let value = self.expr(value)?;
                    self.write(at, &format!("{ind}return {value};\n"))
                }
                ref many => self.fail(at, Unsupported::arity("return values", many.len())),
            },
            ref other => self.fail(at, Unsupported::construct(stmt_kind_name(other))),
        }
    }
}

fn assign_arity(targets: usize, values: usize) -> Unsupported {
    if targets != 1 {
        Unsupported::arity("assignment targets", targets)
    } else {
        Unsupported::arity("assignment values", values)
    }
}

#[cfg(test)]
mod tests {
    use mugo_parser::ast::TopLevelDecl;
    use mugo_parser::parse_source;

    use super::*;
    use crate::error::Error;

    /// Translates the body of `func f()` at depth 1.
    fn body(stmts: &str) -> Result<String, Error> {
        let src = format!("package p\n\nfunc f() {{\n{stmts}\n}}\n");
        let file = parse_source(&src).unwrap();
        let TopLevelDecl::Func(f) = file.arena.top_decls(file.file.decls)[0] else {
            panic!("expected function");
        };
        let block = file.arena.funcs[f].body.unwrap();
        let mut t = Translator::new(Vec::new(), &file);
        t.block(block, 1)?;
        Ok(String::from_utf8(t.into_inner()).unwrap())
    }

    #[test]
    fn expression_and_assignment_statements() {
        assert_eq!(
            body("\tdigitalWrite(ledPin, HIGH)\n\tledState = LOW").unwrap(),
            "  digitalWrite(ledPin, HIGH);\n  ledState = LOW;\n"
        );
    }

    #[test]
    fn short_declarations_take_a_type_token() {
        assert_eq!(body("\tn := 10").unwrap(), "  int n = 10;\n");
        assert_eq!(body("\ts := \"hi\"").unwrap(), "  const char * s = \"hi\";\n");
        assert_eq!(
            body("\tbrightness := brightness + fadeAmount").unwrap(),
            "  brightness brightness = brightness+fadeAmount;\n"
        );
    }

    #[test]
    fn short_declarations_look_through_unary_and_parens() {
        assert_eq!(body("\tfadeAmount := -5").unwrap(), "  int fadeAmount = -5;\n");
        assert_eq!(body("\tv := (n + 1)").unwrap(), "  n v = (n+1);\n");
        assert_eq!(body("\tok := !done").unwrap(), "  done ok = !done;\n");
        assert_eq!(body("\tx := 0 - 5").unwrap(), "  int x = 0-5;\n");
    }

    #[test]
    fn short_declarations_from_other_shapes_are_constructs() {
        let err = body("\tv := digitalRead(pin)").unwrap_err();
        assert_eq!(err.unsupported(), Some(&Unsupported::construct("`:=` from a call")));
        assert_eq!(err.to_string(), "line 4: unsupported `:=` from a call");

        let err = body("\tv := led.pin").unwrap_err();
        assert_eq!(err.unsupported(), Some(&Unsupported::construct("`:=` from a selector")));
    }

    #[test]
    fn if_else_blocks_nest() {
        let out = body("\tif a == HIGH {\n\t\tf()\n\t} else {\n\t\tif b {\n\t\t\tg()\n\t\t}\n\t}").unwrap();
        assert_eq!(
            out,
            "  if (a==HIGH) {\n    f();\n  } else {\n    if (b) {\n      g();\n    }\n  }\n"
        );
    }

    #[test]
    fn comment_before_else_is_not_split_across_the_brace() {
        let out = body("\tif a {\n\t\tf()\n\t} /* otherwise */ else {\n\t\tg()\n\t}").unwrap();
        assert_eq!(
            out,
            "  if (a) {\n    f();\n/* otherwise */\n  } else {\n    g();\n  }\n"
        );
    }

    #[test]
    fn returns() {
        assert_eq!(body("\treturn").unwrap(), "  return;\n");
        assert_eq!(body("\treturn x + 1").unwrap(), "  return x+1;\n");
        let err = body("\treturn 1, 2").unwrap_err();
        assert_eq!(err.unsupported(), Some(&Unsupported::arity("return values", 2)));
    }

    #[test]
    fn rejected_statements() {
        let err = body("\tx += 1").unwrap_err();
        assert_eq!(err.to_string(), "line 4: unsupported `+=` assignment");

        let err = body("\ta, b = 1, 2").unwrap_err();
        assert_eq!(
            err.unsupported(),
            Some(&Unsupported::arity("assignment targets", 2))
        );

        let err = body("\tif a {\n\t} else if b {\n\t}").unwrap_err();
        assert_eq!(err.to_string(), "line 5: unsupported else if chain");

        let err = body("\tfor {\n\t}").unwrap_err();
        assert_eq!(err.unsupported(), Some(&Unsupported::construct("for statement")));

        let err = body("\tx++").unwrap_err();
        assert!(matches!(err.unsupported(), Some(Unsupported::Construct { .. })));
    }
}
