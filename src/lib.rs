//! Go subset to Arduino C++ translator.
//!
//! - Parsing lives in [`mugo_parser`]; this crate only consumes its tree.
//! - [`emit::Translator`] walks top-level declarations once, in source
//!   order, writing C++ text through a comment-ordered sink.
//! - The first construct outside the subset aborts the translation with
//!   an [`Error`] carrying its 1-based line.

pub mod emit;
pub mod error;
pub mod output;

pub use error::{Error, TranslateError, Unsupported};
pub use mugo_parser::{self, ParsedFile, parse_source};

use std::io::Write;

use emit::Translator;

/// Translates an already-parsed unit into `out`.
///
/// Text written before a failure stays in `out`; callers must discard it.
#[tracing::instrument(skip_all, fields(package = file.ident(file.file.name)))]
pub fn translate<W: Write>(out: W, file: &ParsedFile) -> Result<(), Error> {
    let mut translator = Translator::new(out, file);
    translator.translate_file().inspect_err(|e| {
        tracing::debug!(error = %e, "translation failed");
    })
}

/// Parses `src` and translates it into `out`.
///
/// Returns the parsed file so callers can inspect or dump it.
pub fn transpile<W: Write>(out: W, src: &str) -> Result<ParsedFile, Error> {
    let file = parse_source(src).map_err(|failure| Error::parse(failure, src))?;
    translate(out, &file)?;
    Ok(file)
}

/// Parses and translates `src`, returning the sketch text.
pub fn transpile_to_string(src: &str) -> Result<String, Error> {
    let mut out = Vec::new();
    transpile(&mut out, src)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blink() {
        let src = "package main\n\nimport \"arduino\"\n\nconst ledPin = 13\n\nfunc setup() {\n\tpinMode(ledPin, OUTPUT)\n}\n";
        assert_eq!(
            transpile_to_string(src).unwrap(),
            "const int ledPin = 13;\nvoid setup() {\n  pinMode(ledPin, OUTPUT);\n}\n"
        );
    }

    #[test]
    fn parse_errors_surface_with_a_line() {
        let err = transpile_to_string("package main\n\nfunc f() {\n\tx = \n}\n").unwrap_err();
        assert!(matches!(err, Error::Parse { line: 5, .. }), "{err}");
    }

    #[test]
    fn partial_output_stays_written() {
        let mut out = Vec::new();
        let err = transpile(&mut out, "package main\n\nvar a int\nvar b float64\n").unwrap_err();
        assert_eq!(err.to_string(), "line 4: unsupported type: float64");
        assert_eq!(out, b"int a = 0;\n");
    }
}
