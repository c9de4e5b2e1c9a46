use mugo_parser::lexer::{Lexer, Tok};

/// Token stream rendered compactly: injected semicolons print as `;`,
/// explicit ones as `;;`, literals by their class.
fn render(input: &str) -> String {
    Lexer::new(input)
        .map(|(s, t, e)| match t {
            Tok::Semi if s == e => ";".to_owned(),
            Tok::Semi => ";;".to_owned(),
            Tok::Ident(name) => name.to_owned(),
            Tok::IntLit(_) => "INT".to_owned(),
            Tok::FloatLit(_) => "FLOAT".to_owned(),
            Tok::ImagLit(_) => "IMAG".to_owned(),
            Tok::RuneLit(_) => "CHAR".to_owned(),
            Tok::StringLit(_) | Tok::RawStringLit(_) => "STRING".to_owned(),
            other => format!("{other:?}"),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[rustfmt::skip]
const CASES: &[(&str, &str)] = &[
    ("", ""),
    ("\u{FEFF};", ";;"),
    ("foo\n", "foo ;"),
    ("123\n", "INT ;"),
    ("1.5\n", "FLOAT ;"),
    ("2i\n", "IMAG ;"),
    ("'x'\n", "CHAR ;"),
    ("\"x\"\n", "STRING ;"),
    ("`x\ny`\n", "STRING ;"),
    ("break\n", "KwBreak ;"),
    ("continue\n", "KwContinue ;"),
    ("fallthrough\n", "KwFallthrough ;"),
    ("return\n", "KwReturn ;"),
    ("x++\n", "x Inc ;"),
    ("x--\n", "x Dec ;"),
    (")\n", "RParen ;"),
    ("]\n", "RBrack ;"),
    ("}\n", "RBrace ;"),
    ("if\n", "KwIf"),
    ("+\n", "Plus"),
    ("=\n", "Assign"),
    (":=\n", "Define"),
    ("(\n", "LParen"),
    (",\n", "Comma"),
    ("foo", "foo ;"),
    ("foo // comment", "foo ;"),
    ("foo /* one line */\n", "foo ;"),
    ("foo /* two\nlines */ bar", "foo ; bar ;"),
    ("foo\n\n\nbar\n", "foo ; bar ;"),
    ("foo;\n", "foo ;;"),
];

#[test]
fn semicolons_are_inserted_where_go_inserts_them() {
    for (input, want) in CASES {
        assert_eq!(render(input), *want, "input={input:?}");
    }
}

#[test]
fn injected_semicolon_sits_at_the_newline() {
    let src = "x := 1\ny()\n";
    let semis: Vec<usize> = Lexer::new(src)
        .filter(|(s, t, e)| matches!(t, Tok::Semi) && s == e)
        .map(|(s, _, _)| s)
        .collect();
    assert_eq!(semis, vec![6, 10]);
}

#[test]
fn statement_lines_of_a_sketch() {
    let src = "func loop() {\n\tdigitalWrite(ledPin, HIGH)\n\tdelay(1000)\n}\n";
    assert_eq!(
        render(src),
        "KwFunc loop LParen RParen LBrace \
         digitalWrite LParen ledPin Comma HIGH RParen ; \
         delay LParen INT RParen ; \
         RBrace ;"
    );
}
