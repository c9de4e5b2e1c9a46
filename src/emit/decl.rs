use std::io::Write;

use mugo_parser::ast::{
    FieldId, FuncDeclId, GenDeclId, GenDeclKind, ListRef, Spec, SpecId, TopLevelDecl, Type,
};

use super::infer::{kind_name, token_spelling};
use super::{EmitResult, Translator};
use crate::error::Unsupported;

impl<W: Write> Translator<'_, W> {
    pub(super) fn decl(&mut self, decl: TopLevelDecl) -> EmitResult<()> {
        match decl {
            TopLevelDecl::Gen(id) => self.gen_decl(id),
            TopLevelDecl::Func(id) => self.func_decl(id),
        }
    }

    /// Imports only move the comment cursor; constants and variables are
    /// written one line per declared name.
    pub(super) fn gen_decl(&mut self, id: GenDeclId) -> EmitResult<()> {
        let file = self.file;
        let decl = file.arena.gen_decls[id];
        tracing::debug!(
            kind = ?decl.kind,
            line = file.line_of(file.arena.gen_decls.span(id).start),
            "declaration"
        );

        for &spec in file.arena.specs_list(decl.specs) {
            let at = file.arena.specs.span(spec).start;
            match decl.kind {
                GenDeclKind::Import => self.write(at, "")?,
                GenDeclKind::Const | GenDeclKind::Var => self.value_spec(spec)?,
                GenDeclKind::Type => {
                    return self.fail(at, Unsupported::construct("type declaration"));
                }
            }
        }
        Ok(())
    }

    fn value_spec(&mut self, id: SpecId) -> EmitResult<()> {
        let file = self.file;
        let at = file.arena.specs.span(id).start;
        let Spec::Value { names, typ, values } = file.arena.specs[id] else {
            return self.fail(at, Unsupported::construct("declaration"));
        };
        let names = file.arena.ident_names(names);
        let Some(&first) = names.first() else {
            return self.fail(at, Unsupported::arity("declared names", 0));
        };

        let lit = self.spec_literal(at, typ, values)?;
        let is_const = file.bindings.is_const(first);
        let Some(spelling) = token_spelling(lit.kind, is_const) else {
            return self.fail(at, Unsupported::typ(format!("{} literal", kind_name(lit.kind))));
        };

        for &name in names {
            let name = file.ident(name);
            self.write(at, &format!("{spelling} {name} = {};\n", lit.text))?;
        }
        Ok(())
    }

    fn func_decl(&mut self, id: FuncDeclId) -> EmitResult<()> {
        let file = self.file;
        let func = file.arena.funcs[id];
        let at = file.arena.funcs.span(id).start;
        let name = file.ident(func.name);
        tracing::debug!(name, line = file.line_of(at), "function");

        let Some(body) = func.body else {
            return self.fail(at, Unsupported::construct("function declaration without body"));
        };

        let results = self.field_types(func.sig.results)?;
        let ret = match results.as_slice() {
            [] => "void".to_owned(),
            [ret] => ret.clone(),
            many => return self.fail(at, Unsupported::arity("results", many.len())),
        };

        let mut params = Vec::new();
        if let Some(recv) = func.recv {
            params.extend(self.receiver_type(at, recv)?);
        }
        params.extend(self.field_types(func.sig.params)?);

        self.write(at, &format!("{ret} {name}({}) {{\n", params.join(" ")))?;
        self.block(body, 1)?;
        self.write(body.r_brace.start, "}\n")
    }

    /// Only a pointer receiver becomes a parameter; a value receiver is
    /// dropped.
    fn receiver_type(&self, at: u32, recv: ListRef<FieldId>) -> EmitResult<Option<String>> {
        let file = self.file;
        let [field] = *file.arena.fields_list(recv) else {
            let count = recv.len();
            return self.fail(at, Unsupported::arity("receivers", count));
        };
        let typ = file.arena.fields[field].typ;
        match file.arena.types[typ] {
            Type::Pointer(_) => Ok(Some(self.map_type(typ)?.spelling)),
            _ => Ok(None),
        }
    }

    /// One mapped type per declared name; an unnamed field counts once.
    fn field_types(&self, fields: ListRef<FieldId>) -> EmitResult<Vec<String>> {
        let file = self.file;
        let fields = file.arena.fields_list(fields);
        let mut types = Vec::with_capacity(fields.len());

        for (i, &id) in fields.iter().enumerate() {
            let field = file.arena.fields[id];
            let mapped = self.map_type(field.typ)?;
            if mapped.variadic {
                let at = file.arena.fields.span(id).start;
                let what = if i + 1 == fields.len() {
                    "variadic parameter"
                } else {
                    "variadic parameter before the last position"
                };
                return self.fail(at, Unsupported::construct(what));
            }
            let count = field.names.len().max(1);
            types.extend(std::iter::repeat_n(mapped.spelling, count));
        }
        Ok(types)
    }
}

#[cfg(test)]
mod tests {
    use mugo_parser::parse_source;

    use super::*;
    use crate::error::Error;

    fn translate(src: &str) -> Result<String, Error> {
        let file = parse_source(src).unwrap();
        let mut t = Translator::new(Vec::new(), &file);
        t.translate_file()?;
        Ok(String::from_utf8(t.into_inner()).unwrap())
    }

    #[test]
    fn constants_and_variables() {
        let out = translate(
            "package main\n\nconst buttonPin = 2\nconst name = \"led\"\n\nvar buttonState int\nvar label string\nvar count = 3\n",
        )
        .unwrap();
        assert_eq!(
            out,
            "const int buttonPin = 2;\n\
             const char * const name = \"led\";\n\
             int buttonState = 0;\n\
             const char * label = \"\";\n\
             int count = 3;\n"
        );
    }

    #[test]
    fn grouped_names_fan_out() {
        let out = translate("package main\n\nvar (\n\ta, b, c int\n)\n").unwrap();
        assert_eq!(out, "int a = 0;\nint b = 0;\nint c = 0;\n");
    }

    #[test]
    fn function_signatures() {
        let out = translate("package main\n\nfunc setup() {\n}\n").unwrap();
        assert_eq!(out, "void setup() {\n}\n");

        let out = translate("package main\n\nfunc add(a, b int, s string) int {\n\treturn a\n}\n")
            .unwrap();
        assert_eq!(out, "int add(int int string) {\n  return a;\n}\n");

        let out = translate("package main\n\nfunc f(int, *byte) {\n}\n").unwrap();
        assert_eq!(out, "void f(int *byte) {\n}\n");
    }

    #[test]
    fn receivers() {
        let out = translate("package main\n\nfunc (l *Led) On(p int) {\n}\n").unwrap();
        assert_eq!(out, "void On(*Led int) {\n}\n");

        let out = translate("package main\n\nfunc (l Led) On() {\n}\n").unwrap();
        assert_eq!(out, "void On() {\n}\n");
    }

    #[test]
    fn rejected_declarations() {
        let err = translate("package main\n\ntype Led struct{}\n").unwrap_err();
        assert_eq!(err.to_string(), "line 3: unsupported type declaration");

        let err = translate("package main\n\nfunc f() (int, int) {\n}\n").unwrap_err();
        assert_eq!(err.unsupported(), Some(&Unsupported::arity("results", 2)));

        let err = translate("package main\n\nfunc f(xs ...int) {\n}\n").unwrap_err();
        assert_eq!(err.unsupported(), Some(&Unsupported::construct("variadic parameter")));

        let err = translate("package main\n\nfunc f(a ...int, b int) {\n}\n").unwrap_err();
        assert_eq!(
            err.unsupported(),
            Some(&Unsupported::construct(
                "variadic parameter before the last position"
            ))
        );
        assert_eq!(
            err.to_string(),
            "line 3: unsupported variadic parameter before the last position"
        );

        let err = translate("package main\n\nfunc f() int\n").unwrap_err();
        assert!(matches!(err.unsupported(), Some(Unsupported::Construct { .. })));

        let err = translate("package main\n\nconst f = 1.5\n").unwrap_err();
        assert_eq!(err.unsupported(), Some(&Unsupported::typ("float literal")));
    }
}
