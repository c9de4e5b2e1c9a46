use mugo_parser::ast::{GenDeclKind, Spec, Stmt, TopLevelDecl};
use mugo_parser::{BindingKind, DiagKind, ParsedFile, parse_source};

fn assert_parses(src: &str) -> ParsedFile {
    match parse_source(src) {
        Ok(file) => file,
        Err(f) => panic!("expected parse ok, got diagnostics: {:#?}", f.diags),
    }
}

#[test]
fn parses_imports_and_decls() {
    let file = assert_parses(
        r#"
package main

import (
    "fmt"
    . "math"
    _ "net/http"
)

const (
    A = 1
    B int = 2
)

var (
    x = 1
    y, z int
)

type (
    T = int
    U struct { F, G int; H string }
    V interface {
        M(x int) int
        fmt.Stringer
    }
)

func main() {
    fmt.Println(Sqrt(4))
}
"#,
    );

    let kinds: Vec<_> = file
        .arena
        .top_decls(file.file.decls)
        .iter()
        .map(|d| match *d {
            TopLevelDecl::Gen(g) => Some(file.arena.gen_decls[g].kind),
            TopLevelDecl::Func(_) => None,
        })
        .collect();
    assert_eq!(
        kinds,
        vec![
            Some(GenDeclKind::Import),
            Some(GenDeclKind::Const),
            Some(GenDeclKind::Var),
            Some(GenDeclKind::Type),
            None,
        ]
    );
    assert_eq!(file.ident(file.file.name), "main");
}

#[test]
fn parses_statements() {
    assert_parses(
        r#"
package p

func f(x int) int {
    if x < 0 { return -x }
    for i := 0; i < 10; i++ {
        if i == 5 { break }
        continue
    }
    for range []int{1,2,3} {
    }
    for k, v := range m {
        _, _ = k, v
    }
    switch x {
    case 0, 1:
        x++
    default:
        x = 3
    }
    switch v := y.(type) {
    case int:
        _ = v
    }
    select {
    case ch <- x:
        return x
    case v, ok := <-ch:
        _, _ = v, ok
    default:
        return 0
    }
outer:
    for {
        goto outer
    }
    go g()
    defer h()
    var local int
    { local = 1 }
    return local
}
"#,
    );
}

#[test]
fn parses_expressions() {
    assert_parses(
        r#"
package p

func f(a, b, c int, ch chan<- int, xs ...int) {
    _ = a + b*c - (a<<2)
    _ = a == b || a < c && b <= c
    _ = &a
    _ = <-ch
    _ = []int{1,2,3}[0]
    _ = []int{1,2,3}[1:]
    _ = []int{1,2,3}[:2]
    _ = []int{1,2,3}[0:2:3]
    _ = map[string]int{"a":1, "b":2}["a"]
    _ = struct{ X int }{X: 1}
    _ = func(n int) int { return n * 2 }(a)
    _ = f(a, b, c, ch, xs...)
    _ = []byte("x")
    _ = x.(fmt.Stringer)
}
"#,
    );
}

#[test]
fn methods_keep_their_receiver() {
    let file = assert_parses("package p\n\nfunc (l *Led) On() {}\n\nfunc Off() {}\n");
    let funcs: Vec<_> = file
        .arena
        .top_decls(file.file.decls)
        .iter()
        .filter_map(|d| match *d {
            TopLevelDecl::Func(f) => Some(file.arena.funcs[f]),
            TopLevelDecl::Gen(_) => None,
        })
        .collect();
    assert_eq!(funcs.len(), 2);
    assert!(funcs[0].recv.is_some());
    assert!(funcs[1].recv.is_none());
}

#[test]
fn else_if_is_a_nested_if() {
    let file = assert_parses("package p\nfunc f() {\n\tif a {\n\t} else if b {\n\t} else {\n\t}\n}\n");
    let TopLevelDecl::Func(f) = file.arena.top_decls(file.file.decls)[0] else {
        panic!("expected func");
    };
    let body = file.arena.funcs[f].body.unwrap();
    let stmt = file.arena.stmts_list(body.stmts)[0];
    let Stmt::If { else_stmt: Some(els), .. } = file.arena.stmts[stmt] else {
        panic!("expected if with else");
    };
    let Stmt::If { else_stmt: Some(last), .. } = file.arena.stmts[els] else {
        panic!("expected else-if");
    };
    assert!(matches!(file.arena.stmts[last], Stmt::Block(_)));
}

#[test]
fn comment_groups_are_collected_in_order() {
    let src = "// doc\n// more\npackage p\n\n// one\nvar a int // trailing\n\n/* two */\nfunc f() {}\n";
    let file = assert_parses(src);
    let groups: Vec<_> = file
        .arena
        .comment_group_ids(file.file.comments)
        .iter()
        .map(|&g| file.text(file.arena.comment_groups.span(g)))
        .collect();
    assert_eq!(groups, vec!["// doc\n// more", "// one", "// trailing", "/* two */"]);
}

#[test]
fn consts_and_vars_are_classified() {
    let file = assert_parses("package p\n\nconst a = 1\n\nvar b, c = 2, 3\n\nfunc d(e int) {}\n");
    let TopLevelDecl::Gen(g) = file.arena.top_decls(file.file.decls)[0] else {
        panic!("expected const");
    };
    let spec = file.arena.specs_list(file.arena.gen_decls[g].specs)[0];
    let Spec::Value { names, .. } = file.arena.specs[spec] else {
        panic!("expected value spec");
    };
    let a = file.arena.ident_names(names)[0];
    assert!(file.bindings.is_const(a));
    assert_eq!(file.bindings.kind_of(a), Some(BindingKind::Const));
}

#[test]
fn errors_report_every_lexical_diag_and_the_first_syntax_diag() {
    let err = parse_source("package p\nvar s = \"\\q\"\nvar t = 09\nfunc (\n").unwrap_err();
    let (last, lex) = err.diags.split_last().unwrap();
    assert_eq!(last.kind, DiagKind::Parse);
    assert!(lex.len() >= 2, "{:#?}", err.diags);
    assert!(lex.iter().all(|d| d.kind == DiagKind::Lex));
}

#[test]
fn rejects_missing_package_clause() {
    let err = parse_source("func main() {}\n").unwrap_err();
    assert_eq!(err.diags.len(), 1);
    assert_eq!(err.diags[0].span.start, 0);
}
