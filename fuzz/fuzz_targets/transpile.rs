#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(src) = std::str::from_utf8(data) else {
        return;
    };
    let mut out = Vec::new();
    match mugo::transpile(&mut out, src) {
        Ok(_) => assert!(std::str::from_utf8(&out).is_ok()),
        Err(mugo::Error::Parse { line, .. })
        | Err(mugo::Error::Translate(mugo::TranslateError { line, .. })) => assert!(line >= 1),
        Err(mugo::Error::Io(e)) => panic!("writing to a Vec failed: {e}"),
    }
});
