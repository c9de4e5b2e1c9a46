use mugo::Error;
use walkdir::WalkDir;

/// Runs every `.go` file under `$MUGO_CORPUS` through the translator.
///
/// Files outside the subset are expected to fail, but only with a
/// positioned error; anything else (a panic, an I/O error) fails the test.
#[test]
fn translates_go_corpus_if_configured() {
    let Some(root) = std::env::var_os("MUGO_CORPUS") else {
        eprintln!("MUGO_CORPUS not set; skipping corpus test");
        return;
    };

    let mut total = 0usize;
    let mut translated = 0usize;

    for entry in WalkDir::new(&root).into_iter().filter_map(|e| e.ok()) {
        let path = entry.path();
        if !entry.file_type().is_file() || path.extension().and_then(|e| e.to_str()) != Some("go")
        {
            continue;
        }
        let Ok(src) = std::fs::read_to_string(path) else {
            continue;
        };

        total += 1;
        match mugo::transpile_to_string(&src) {
            Ok(_) => translated += 1,
            Err(Error::Parse { .. } | Error::Translate(_)) => {}
            Err(e) => panic!("{}: {e}", path.display()),
        }
    }

    eprintln!("Translated {translated} of {total} Go files.");
}
