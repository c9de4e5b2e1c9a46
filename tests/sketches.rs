use std::path::Path;

use walkdir::WalkDir;

const SKETCH_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/sketches");

/// Drops blank lines and surrounding whitespace on each line.
fn normalize(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn check_sketch(go: &Path) {
    let src = std::fs::read_to_string(go).unwrap();
    let ino = std::fs::read_to_string(go.with_extension("ino"))
        .unwrap_or_else(|e| panic!("missing golden for {}: {e}", go.display()));

    let out = match mugo::transpile_to_string(&src) {
        Ok(out) => out,
        Err(e) => panic!("failed to transpile {}: {e}", go.display()),
    };
    assert_eq!(
        normalize(&out),
        normalize(&ino),
        "{}: expected:\n{ino}-- got:\n{out}",
        go.display()
    );
}

#[test]
fn sketches_match_golden_output() {
    let mut seen = 0;
    for entry in WalkDir::new(SKETCH_DIR).sort_by_file_name() {
        let entry = entry.unwrap();
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("go") {
            continue;
        }
        check_sketch(path);
        seen += 1;
    }
    assert!(seen >= 3, "expected the blink, button and fade sketches, found {seen}");
}

#[test]
fn sketch_output_is_exact() {
    let src = include_str!("sketches/fade.go");
    let ino = include_str!("sketches/fade.ino");
    assert_eq!(mugo::transpile_to_string(src).unwrap(), ino);
}
