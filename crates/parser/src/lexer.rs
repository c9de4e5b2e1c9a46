use crate::ast::{CommentKind, Span};
use crate::error::{Diag, LexError, LexErrorKind};
use logos::{Lexer as LogosLexer, Logos};
use std::ops::Range;

// =============================================================================
// 0. Shared helpers
// =============================================================================

#[inline(always)]
const fn first_newline_offset(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        if matches!(bytes[i], b'\n' | b'\r') {
            return Some(i);
        }
        i += 1;
    }

    None
}

#[inline(always)]
pub const fn is_dec_digit(b: u8) -> bool {
    b.is_ascii_digit()
}

#[inline(always)]
pub const fn is_hex_digit(b: u8) -> bool {
    b.is_ascii_hexdigit()
}

#[inline(always)]
const fn is_oct_digit(b: u8) -> bool {
    matches!(b, b'0'..=b'7')
}

// =============================================================================
// 1. Block comment scanner
// =============================================================================

#[inline]
fn lex_block_comment(lex: &mut LogosLexer<'_, RawTok>) -> Result<(), LexErrorKind> {
    use memchr::memchr;

    let rem = lex.remainder().as_bytes();
    let mut search_start = 0;

    while let Some(star_pos) = memchr(b'*', &rem[search_start..]) {
        let abs_pos = search_start + star_pos;

        if rem.get(abs_pos + 1) == Some(&b'/') {
            lex.bump(abs_pos + 2);
            return Ok(());
        }

        search_start = abs_pos + 1;
    }

    lex.bump(rem.len());
    Err(LexErrorKind::UnterminatedComment)
}

// =============================================================================
// 2. Escape validation (strings and runes)
// =============================================================================

mod esc {
    use super::*;

    /// Validates one escape sequence starting right after the backslash.
    ///
    /// Returns the number of bytes consumed after the backslash.
    pub fn validate_escape(body: &[u8], at: usize, quote: u8) -> Result<usize, LexErrorKind> {
        let Some(&c) = body.get(at) else {
            return Err(LexErrorKind::InvalidEscape);
        };

        let (digits, is_digit, max): (usize, fn(u8) -> bool, u32) = match c {
            b'a' | b'b' | b'f' | b'n' | b'r' | b't' | b'v' | b'\\' => return Ok(1),
            _ if c == quote => return Ok(1),
            b'x' => (2, |b| is_hex_digit(b), 0xFF),
            b'u' => (4, |b| is_hex_digit(b), 0x10_FFFF),
            b'U' => (8, |b| is_hex_digit(b), 0x10_FFFF),
            b'0'..=b'7' => (3, |b| is_oct_digit(b), 0xFF),
            _ => return Err(LexErrorKind::InvalidEscape),
        };

        let (start, radix) = match c {
            b'0'..=b'7' => (at, 8),
            _ => (at + 1, 16),
        };
        let end = start + digits;
        if end > body.len() || !body[start..end].iter().all(|&b| is_digit(b)) {
            return Err(LexErrorKind::InvalidEscape);
        }

        let text = std::str::from_utf8(&body[start..end]).map_err(|_| LexErrorKind::InvalidEscape)?;
        let value = u32::from_str_radix(text, radix).map_err(|_| LexErrorKind::InvalidEscape)?;
        let surrogate = (0xD800..=0xDFFF).contains(&value) && matches!(c, b'u' | b'U');
        if value > max || surrogate {
            return Err(LexErrorKind::InvalidEscape);
        }

        Ok(end - at)
    }

    /// Walks a literal body, validating every escape. Returns the number of
    /// logical characters in the body.
    fn validate_body(body: &[u8], quote: u8) -> Result<usize, LexErrorKind> {
        let mut i = 0;
        let mut chars = 0;
        while i < body.len() {
            if body[i] == b'\\' {
                i += 1 + validate_escape(body, i + 1, quote)?;
            } else {
                // Skip UTF-8 continuation bytes so a multi-byte rune counts once.
                i += 1;
                while i < body.len() && (body[i] & 0xC0) == 0x80 {
                    i += 1;
                }
            }
            chars += 1;
        }
        Ok(chars)
    }

    pub fn validate_interpreted_string(
        lex: &mut LogosLexer<'_, super::RawTok>,
    ) -> Result<(), LexErrorKind> {
        let s = lex.slice().as_bytes();
        if s.len() < 2 || s[0] != b'"' || s[s.len() - 1] != b'"' {
            return Err(LexErrorKind::UnterminatedString);
        }
        validate_body(&s[1..s.len() - 1], b'"').map(|_| ())
    }

    pub fn validate_rune(lex: &mut LogosLexer<'_, super::RawTok>) -> Result<(), LexErrorKind> {
        let s = lex.slice().as_bytes();
        if s.len() < 3 || s[0] != b'\'' || s[s.len() - 1] != b'\'' {
            return Err(LexErrorKind::InvalidToken);
        }
        match validate_body(&s[1..s.len() - 1], b'\'')? {
            1 => Ok(()),
            _ => Err(LexErrorKind::InvalidToken),
        }
    }
}

// =============================================================================
// 3. Numeric literals: maximal munch + classification
// =============================================================================

pub mod num {
    use super::*;

    #[inline]
    fn digits_ok(digits: &[u8], is_digit: fn(u8) -> bool) -> bool {
        // Underscores only between digits (or right after a base prefix).
        let mut prev_digit = false;
        for (i, &b) in digits.iter().enumerate() {
            if b == b'_' {
                let next_digit = digits.get(i + 1).is_some_and(|&n| is_digit(n));
                if !next_digit {
                    return false;
                }
                prev_digit = false;
            } else if is_digit(b) {
                prev_digit = true;
            } else {
                return false;
            }
        }
        prev_digit || digits.is_empty()
    }

    /// Classifies a munched literal: `Ok(true)` for floats, `Ok(false)` for ints.
    pub fn classify_number(lit: &[u8]) -> Result<bool, LexErrorKind> {
        if lit.is_empty() {
            return Err(LexErrorKind::InvalidNumber);
        }

        let lower: Vec<u8> = lit.iter().map(|b| b.to_ascii_lowercase()).collect();
        let (prefix, body) = match lower.as_slice() {
            [b'0', b'x', rest @ ..] => (16, rest),
            [b'0', b'o', rest @ ..] => (8, rest),
            [b'0', b'b', rest @ ..] => (2, rest),
            other => (10, other),
        };

        let is_digit: fn(u8) -> bool = match prefix {
            16 => |b| is_hex_digit(b),
            8 => |b| is_oct_digit(b),
            2 => |b| matches!(b, b'0' | b'1'),
            _ => |b| is_dec_digit(b),
        };
        let exp_marker = if prefix == 16 { b'p' } else { b'e' };

        let (mantissa, exponent) = match body.iter().position(|&b| b == exp_marker) {
            Some(i) if prefix == 10 || prefix == 16 => (&body[..i], Some(&body[i + 1..])),
            Some(_) => return Err(LexErrorKind::InvalidNumber),
            None => (body, None),
        };

        let (int_part, frac_part) = match mantissa.iter().position(|&b| b == b'.') {
            Some(i) if prefix == 10 || prefix == 16 => (&mantissa[..i], Some(&mantissa[i + 1..])),
            Some(_) => return Err(LexErrorKind::InvalidNumber),
            None => (mantissa, None),
        };

        // `0x_1` is valid; strip one leading underscore after a prefix.
        let int_digits = match (prefix, int_part) {
            (10, d) => d,
            (_, [b'_', rest @ ..]) => rest,
            (_, d) => d,
        };

        if !digits_ok(int_digits, is_digit) {
            return Err(LexErrorKind::InvalidNumber);
        }
        if let Some(frac) = frac_part {
            if !digits_ok(frac, is_digit) || (int_digits.is_empty() && frac.is_empty()) {
                return Err(LexErrorKind::InvalidNumber);
            }
        } else if int_digits.is_empty() {
            return Err(LexErrorKind::InvalidNumber);
        }
        if let Some(exp) = exponent {
            let exp = exp.strip_prefix(b"+").or_else(|| exp.strip_prefix(b"-")).unwrap_or(exp);
            if exp.is_empty() || !digits_ok(exp, |b| is_dec_digit(b)) {
                return Err(LexErrorKind::InvalidNumber);
            }
        } else if prefix == 16 && frac_part.is_some() {
            // Hex floats require a `p` exponent.
            return Err(LexErrorKind::InvalidNumber);
        }

        // Legacy octal `0777`: every digit must be octal unless it is a float.
        let is_float = frac_part.is_some() || exponent.is_some();
        if prefix == 10 && !is_float && int_digits.len() > 1 && int_digits[0] == b'0' {
            let octal = int_digits.iter().all(|&b| b == b'_' || is_oct_digit(b));
            if !octal {
                return Err(LexErrorKind::InvalidNumber);
            }
        }

        Ok(is_float)
    }

    #[inline]
    fn munch_digits(src: &[u8], mut i: usize, hex: bool) -> usize {
        while i < src.len() {
            let b = src[i];
            let ok = if hex { is_hex_digit(b) } else { is_dec_digit(b) };
            if !(ok || b == b'_') {
                break;
            }
            i += 1;
        }
        i
    }

    pub fn lex_number(lex: &mut LogosLexer<'_, super::RawTok>) -> Result<(), LexErrorKind> {
        let src = lex.source().as_bytes();
        let start = lex.span().start;
        let n = src.len();

        let mut i = start;
        let mut hex = false;

        if src[i] == b'0' && i + 1 < n && matches!(src[i + 1] | 0x20, b'x' | b'o' | b'b') {
            hex = (src[i + 1] | 0x20) == b'x';
            i += 2;
        }
        i = munch_digits(src, i, hex);

        // A `.` followed by another `.` belongs to `...`, not to the number.
        if i < n && src[i] == b'.' && src.get(i + 1) != Some(&b'.') {
            i = munch_digits(src, i + 1, hex);
        }

        if i < n && matches!(src[i] | 0x20, b'e' | b'p') && !(hex && (src[i] | 0x20) == b'e') {
            i += 1;
            if i < n && matches!(src[i], b'+' | b'-') {
                i += 1;
            }
            i = munch_digits(src, i, false);
        }

        let already = lex.span().end;
        if i > already {
            lex.bump(i - already);
        }
        Ok(())
    }
}

// =============================================================================
// 4. Raw tokens (logos DFA)
// =============================================================================

#[repr(u8)]
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(error = LexErrorKind)]
#[logos(skip r"[ \t]+")]
#[rustfmt::skip]
enum RawTok {
    #[token("\u{FEFF}")] Bom,

    // Trivia
    #[regex(r"\r\n|\n|\r")] Newline,
    #[regex(r"//[^\n\r]*", allow_greedy = true)] LineComment,
    #[token("/*", lex_block_comment)]
    BlockComment,

    // Keywords (before Ident)
    #[token("break")] KwBreak,
    #[token("case")] KwCase,
    #[token("chan")] KwChan,
    #[token("const")] KwConst,
    #[token("continue")] KwContinue,
    #[token("default")] KwDefault,
    #[token("defer")] KwDefer,
    #[token("else")] KwElse,
    #[token("fallthrough")] KwFallthrough,
    #[token("for")] KwFor,
    #[token("func")] KwFunc,
    #[token("go")] KwGo,
    #[token("goto")] KwGoto,
    #[token("if")] KwIf,
    #[token("import")] KwImport,
    #[token("interface")] KwInterface,
    #[token("map")] KwMap,
    #[token("package")] KwPackage,
    #[token("range")] KwRange,
    #[token("return")] KwReturn,
    #[token("select")] KwSelect,
    #[token("struct")] KwStruct,
    #[token("switch")] KwSwitch,
    #[token("type")] KwType,
    #[token("var")] KwVar,

    #[regex(r"[_\p{L}][_\p{L}\p{Nd}]*")] Ident,

    #[regex(r"[0-9]|\.[0-9]", num::lex_number)] Number,

    #[regex(r"`[^`]*`")] RawString,
    #[regex(r#""([^"\\\n\r]|\\.)*""#, esc::validate_interpreted_string)] String,
    #[regex(r"'([^'\\\n\r]|\\.)+'", esc::validate_rune)] Rune,

    // Operators
    #[token("...")] Ellipsis,
    #[token("<<=")] ShlAssign,
    #[token(">>=")] ShrAssign,
    #[token("&^=")] AndNotAssign,
    #[token("+=")] AddAssign,
    #[token("-=")] SubAssign,
    #[token("*=")] MulAssign,
    #[token("/=")] DivAssign,
    #[token("%=")] ModAssign,
    #[token("&=")] AndAssign,
    #[token("|=")] OrAssign,
    #[token("^=")] XorAssign,
    #[token("<<")] Shl,
    #[token(">>")] Shr,
    #[token("&^")] AndNot,
    #[token("&&")] LAnd,
    #[token("||")] LOr,
    #[token("==")] EqEq,
    #[token("!=")] NotEq,
    #[token("<=")] Le,
    #[token(">=")] Ge,
    #[token("++")] Inc,
    #[token("--")] Dec,
    #[token(":=")] Define,
    #[token("<-")] Arrow,
    #[token("=")] Assign,
    #[token("+")] Plus,
    #[token("-")] Minus,
    #[token("*")] Star,
    #[token("/")] Slash,
    #[token("%")] Percent,
    #[token("&")] Amp,
    #[token("|")] Pipe,
    #[token("^")] Caret,
    #[token("~")] Tilde,
    #[token("!")] Bang,
    #[token("<")] Lt,
    #[token(">")] Gt,

    // Delimiters
    #[token("(")] LParen,
    #[token(")")] RParen,
    #[token("[")] LBrack,
    #[token("]")] RBrack,
    #[token("{")] LBrace,
    #[token("}")] RBrace,
    #[token(",")] Comma,
    #[token(";")] Semi,
    #[token(":")] Colon,
    #[token(".")] Dot,

    #[regex(r".", priority = 0)] Error,
}

impl RawTok {
    /// Tokens after which a newline ends the statement.
    #[inline(always)]
    const fn can_insert_semicolon(self) -> bool {
        matches!(
            self,
            Self::Ident
                | Self::Number
                | Self::Rune
                | Self::String
                | Self::RawString
                | Self::KwBreak
                | Self::KwContinue
                | Self::KwFallthrough
                | Self::KwReturn
                | Self::Inc
                | Self::Dec
                | Self::RParen
                | Self::RBrack
                | Self::RBrace
        )
    }

    #[inline]
    fn to_token<'src>(self, slice: &'src str) -> Tok<'src> {
        macro_rules! simple_tok {
            ($($raw:ident),* $(,)?) => {
                match self {
                    Self::Ident => Tok::Ident(slice),
                    Self::Rune => Tok::RuneLit(slice),
                    Self::String => Tok::StringLit(slice),
                    Self::RawString => Tok::RawStringLit(slice),
                    $(Self::$raw => Tok::$raw,)*
                    // Numbers, trivia and BOMs never reach this point.
                    Self::Number | Self::Newline | Self::LineComment | Self::BlockComment
                    | Self::Bom | Self::Error => Tok::Error,
                }
            };
        }

        simple_tok! {
            KwBreak, KwCase, KwChan, KwConst, KwContinue, KwDefault, KwDefer, KwElse,
            KwFallthrough, KwFor, KwFunc, KwGo, KwGoto, KwIf, KwImport, KwInterface,
            KwMap, KwPackage, KwRange, KwReturn, KwSelect, KwStruct, KwSwitch, KwType, KwVar,

            Ellipsis, ShlAssign, ShrAssign, AndNotAssign, AddAssign, SubAssign, MulAssign,
            DivAssign, ModAssign, AndAssign, OrAssign, XorAssign, Shl, Shr, AndNot, LAnd, LOr,
            EqEq, NotEq, Le, Ge, Inc, Dec, Define, Arrow, Assign, Plus, Minus, Star, Slash,
            Percent, Amp, Pipe, Caret, Tilde, Bang, Lt, Gt,

            LParen, RParen, LBrack, RBrack, LBrace, RBrace, Comma, Semi, Colon, Dot,
        }
    }
}

// =============================================================================
// 5. Public tokens (zero-copy)
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tok<'input> {
    Ident(&'input str),
    IntLit(&'input str),
    FloatLit(&'input str),
    ImagLit(&'input str),
    RuneLit(&'input str),
    StringLit(&'input str),
    RawStringLit(&'input str),

    // Keywords
    KwBreak,
    KwCase,
    KwChan,
    KwConst,
    KwContinue,
    KwDefault,
    KwDefer,
    KwElse,
    KwFallthrough,
    KwFor,
    KwFunc,
    KwGo,
    KwGoto,
    KwIf,
    KwImport,
    KwInterface,
    KwMap,
    KwPackage,
    KwRange,
    KwReturn,
    KwSelect,
    KwStruct,
    KwSwitch,
    KwType,
    KwVar,

    // Operators / Delimiters
    Ellipsis,
    ShlAssign,
    ShrAssign,
    AndNotAssign,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    ModAssign,
    AndAssign,
    OrAssign,
    XorAssign,
    Shl,
    Shr,
    AndNot,
    LAnd,
    LOr,
    EqEq,
    NotEq,
    Le,
    Ge,
    Inc,
    Dec,
    Define,
    Arrow,
    Assign,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Amp,
    Pipe,
    Caret,
    Tilde,
    Bang,
    Lt,
    Gt,
    LParen,
    RParen,
    LBrack,
    RBrack,
    LBrace,
    RBrace,
    Comma,
    Semi,
    Colon,
    Dot,

    Error,
}

impl<'input> std::fmt::Display for Tok<'input> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tok::Ident(s)
            | Tok::IntLit(s)
            | Tok::FloatLit(s)
            | Tok::ImagLit(s)
            | Tok::RuneLit(s)
            | Tok::StringLit(s)
            | Tok::RawStringLit(s) => write!(f, "{s:?}"),
            other => write!(f, "{other:?}"),
        }
    }
}

// =============================================================================
// 6. Comments as seen by the lexer
// =============================================================================

/// A comment recorded while lexing.
///
/// `group_start` is set when the comment opens a new group: a real token was
/// produced since the previous comment, or more than one newline separates
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexedComment {
    pub kind: CommentKind,
    pub span: Span,
    pub group_start: bool,
}

// =============================================================================
// 7. Lexer wrapper: semicolon insertion + imag lookahead + comments + diags
// =============================================================================

pub struct Lexer<'src> {
    logos: LogosLexer<'src, RawTok>,
    pending: Option<(usize, Tok<'src>, usize)>,
    diags: Vec<Diag>,
    comments: Vec<LexedComment>,
    newlines_since_comment: u32,
    token_since_comment: bool,
    last_can_insert_semi: bool,
    src_len: usize,
    eof_done: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(input: &'src str) -> Self {
        Self {
            logos: RawTok::lexer(input),
            pending: None,
            diags: Vec::with_capacity(16),
            comments: Vec::new(),
            newlines_since_comment: 0,
            token_since_comment: true,
            last_can_insert_semi: false,
            src_len: input.len(),
            eof_done: false,
        }
    }

    pub fn take_diags(&mut self) -> Vec<Diag> {
        std::mem::take(&mut self.diags)
    }

    /// Comments seen so far, in source order.
    pub fn take_comments(&mut self) -> Vec<LexedComment> {
        std::mem::take(&mut self.comments)
    }

    #[inline]
    fn push_lex_diag(&mut self, kind: LexErrorKind, span: Range<usize>) {
        let span = Span::new(span.start, span.end);
        self.diags.push(LexError { kind, span }.diag());
    }

    #[inline]
    fn emit_semi_at(&mut self, pos: usize) {
        self.pending = Some((pos, Tok::Semi, pos));
    }

    fn record_comment(&mut self, kind: CommentKind, span: &Range<usize>) {
        let group_start = self.token_since_comment || self.newlines_since_comment > 1;
        self.comments.push(LexedComment {
            kind,
            span: Span::new(span.start, span.end),
            group_start,
        });
        self.token_since_comment = false;
        self.newlines_since_comment = 0;
    }

    #[inline]
    fn handle_trivia(&mut self, raw: RawTok, span: &Range<usize>, slice: &str) -> bool {
        match raw {
            RawTok::Newline => {
                self.newlines_since_comment = self.newlines_since_comment.saturating_add(1);
                if self.last_can_insert_semi {
                    self.last_can_insert_semi = false;
                    self.emit_semi_at(span.start);
                }
                true
            }
            RawTok::LineComment => {
                self.record_comment(CommentKind::Line, span);
                true
            }
            RawTok::BlockComment => {
                self.record_comment(CommentKind::Block, span);
                if self.last_can_insert_semi {
                    if let Some(off) = first_newline_offset(slice) {
                        self.last_can_insert_semi = false;
                        self.emit_semi_at(span.start + off);
                    }
                }
                true
            }
            _ => false,
        }
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = (usize, Tok<'src>, usize);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(tok) = self.pending.take() {
                return Some(tok);
            }

            if self.eof_done {
                return None;
            }

            match self.logos.next() {
                None => {
                    // Loop again so a pending ';' at EOF is still emitted.
                    self.handle_eof();
                    continue;
                }

                Some(Err(kind)) => return self.handle_lex_error(kind),

                Some(Ok(raw)) => {
                    if let Some(item) = self.handle_raw_token(raw) {
                        return Some(item);
                    }
                }
            }
        }
    }
}

impl<'src> Lexer<'src> {
    #[inline]
    fn handle_eof(&mut self) {
        self.eof_done = true;

        if self.last_can_insert_semi {
            self.last_can_insert_semi = false;
            self.emit_semi_at(self.src_len);
        }
    }

    #[inline]
    fn handle_lex_error(&mut self, kind: LexErrorKind) -> Option<(usize, Tok<'src>, usize)> {
        let span = self.logos.span();
        self.push_lex_diag(kind, span.clone());
        self.last_can_insert_semi = false;
        self.token_since_comment = true;
        Some((span.start, Tok::Error, span.end))
    }

    /// Returns `None` for trivia, which produces no token.
    #[inline]
    fn handle_raw_token(&mut self, raw: RawTok) -> Option<(usize, Tok<'src>, usize)> {
        let span = self.logos.span();
        let slice = self.logos.slice();

        if raw == RawTok::Bom {
            if span.start == 0 {
                return None;
            }
            self.push_lex_diag(LexErrorKind::InvalidToken, span.clone());
            self.last_can_insert_semi = false;
            return Some((span.start, Tok::Error, span.end));
        }

        if self.handle_trivia(raw, &span, slice) {
            return None;
        }

        self.token_since_comment = true;

        if raw == RawTok::Error {
            self.push_lex_diag(LexErrorKind::InvalidToken, span.clone());
            self.last_can_insert_semi = false;
            return Some((span.start, Tok::Error, span.end));
        }

        if raw == RawTok::Number {
            return Some(self.handle_number_token(span, slice));
        }

        self.last_can_insert_semi = raw.can_insert_semicolon();
        Some((span.start, raw.to_token(slice), span.end))
    }

    #[inline]
    fn handle_number_token(
        &mut self,
        span: Range<usize>,
        slice: &'src str,
    ) -> (usize, Tok<'src>, usize) {
        let src = self.logos.source();
        let has_i_suffix = span.end < self.src_len && src.as_bytes()[span.end] == b'i';

        if has_i_suffix {
            let end_with_i = span.end + 1;
            let is_valid = num::classify_number(slice.as_bytes()).is_ok();

            self.logos.bump(1);
            self.last_can_insert_semi = is_valid;

            if !is_valid {
                self.push_lex_diag(LexErrorKind::InvalidNumber, span.start..end_with_i);
                return (span.start, Tok::Error, end_with_i);
            }
            return (span.start, Tok::ImagLit(&src[span.start..end_with_i]), end_with_i);
        }

        match num::classify_number(slice.as_bytes()) {
            Ok(is_float) => {
                self.last_can_insert_semi = true;
                let tok = if is_float {
                    Tok::FloatLit(slice)
                } else {
                    Tok::IntLit(slice)
                };
                (span.start, tok, span.end)
            }
            Err(kind) => {
                self.push_lex_diag(kind, span.clone());
                self.last_can_insert_semi = false;
                (span.start, Tok::Error, span.end)
            }
        }
    }
}
