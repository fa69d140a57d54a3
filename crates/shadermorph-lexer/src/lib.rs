// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Lexical analysis for GLSL shader sources.
//!
//! This crate tokenizes GLSL (desktop and ES dialects) using logos.
//!
//! # Design
//!
//! - `Token` - keywords, operators, delimiters, literals, identifiers
//! - Comments and whitespace are stripped during lexing (not tokens)
//! - Preprocessor lines (`#version 300 es`) are kept whole as `Token::Directive`
//! - Built-in type names (`vec3`, `mat4x2`, ...) are ordinary identifiers; the
//!   parser classifies them
//! - Token strings defined once in `TOKEN_STRINGS` table (single source of truth for Display)
//!
//! # Examples
//!
//! ```
//! # use shadermorph_lexer::Token;
//! # use logos::Logos;
//! let source = "void main() { int A[5]; A[2] = 1; }";
//! let tokens: Vec<Result<Token, ()>> = Token::lexer(source).collect();
//! assert!(tokens.iter().all(Result::is_ok));
//! ```

use logos::Logos;
use std::rc::Rc;

/// GLSL token.
///
/// Token strings for keywords, operators, and delimiters are defined once
/// in the `TOKEN_STRINGS` table and indexed by discriminant for Display.
///
/// # Layout
///
/// Uses `#[repr(u16)]` to guarantee discriminant values are stable and
/// can be safely used to index into `TOKEN_STRINGS`. Variants carrying data
/// are declared last so that every simple token has an index in the table.
#[derive(Logos, Debug, Clone, PartialEq)]
#[repr(u16)]
#[logos(skip r"[ \t\r\n\f]+")] // Skip whitespace
#[logos(skip r"//[^\n]*")] // Skip // comments
#[logos(skip r"/\*([^*]|\*+[^*/])*\*+/")] // Skip /* */ comments
pub enum Token {
    // === Keywords ===

    // Storage qualifiers
    /// Keyword `const`
    #[token("const")]
    Const,
    /// Keyword `uniform`
    #[token("uniform")]
    Uniform,
    /// Keyword `buffer`
    #[token("buffer")]
    Buffer,
    /// Keyword `shared`
    #[token("shared")]
    Shared,
    /// Keyword `in`
    #[token("in")]
    In,
    /// Keyword `out`
    #[token("out")]
    Out,
    /// Keyword `inout`
    #[token("inout")]
    InOut,
    /// Keyword `attribute`
    #[token("attribute")]
    Attribute,
    /// Keyword `varying`
    #[token("varying")]
    Varying,
    /// Keyword `centroid`
    #[token("centroid")]
    Centroid,

    // Interpolation, invariance and memory qualifiers
    /// Keyword `flat`
    #[token("flat")]
    Flat,
    /// Keyword `smooth`
    #[token("smooth")]
    Smooth,
    /// Keyword `invariant`
    #[token("invariant")]
    Invariant,
    /// Keyword `coherent`
    #[token("coherent")]
    Coherent,
    /// Keyword `volatile`
    #[token("volatile")]
    Volatile,
    /// Keyword `restrict`
    #[token("restrict")]
    Restrict,
    /// Keyword `readonly`
    #[token("readonly")]
    ReadOnly,
    /// Keyword `writeonly`
    #[token("writeonly")]
    WriteOnly,

    // Precision
    /// Keyword `highp`
    #[token("highp")]
    HighP,
    /// Keyword `mediump`
    #[token("mediump")]
    MediumP,
    /// Keyword `lowp`
    #[token("lowp")]
    LowP,
    /// Keyword `precision`
    #[token("precision")]
    Precision,

    // Structure
    /// Keyword `layout`
    #[token("layout")]
    Layout,
    /// Keyword `struct`
    #[token("struct")]
    Struct,
    /// Keyword `void`
    #[token("void")]
    Void,

    // Control flow
    /// Keyword `if`
    #[token("if")]
    If,
    /// Keyword `else`
    #[token("else")]
    Else,
    /// Keyword `for`
    #[token("for")]
    For,
    /// Keyword `while`
    #[token("while")]
    While,
    /// Keyword `do`
    #[token("do")]
    Do,
    /// Keyword `switch`
    #[token("switch")]
    Switch,
    /// Keyword `case`
    #[token("case")]
    Case,
    /// Keyword `default`
    #[token("default")]
    Default,
    /// Keyword `return`
    #[token("return")]
    Return,
    /// Keyword `break`
    #[token("break")]
    Break,
    /// Keyword `continue`
    #[token("continue")]
    Continue,
    /// Keyword `discard`
    #[token("discard")]
    Discard,

    // Boolean literals
    /// Keyword `true`
    #[token("true")]
    True,
    /// Keyword `false`
    #[token("false")]
    False,

    // === Operators ===

    // Arithmetic
    /// Operator `+`
    #[token("+")]
    Plus,
    /// Operator `-`
    #[token("-")]
    Minus,
    /// Operator `*`
    #[token("*")]
    Star,
    /// Operator `/`
    #[token("/")]
    Slash,
    /// Operator `%`
    #[token("%")]
    Percent,
    /// Operator `++`
    #[token("++")]
    PlusPlus,
    /// Operator `--`
    #[token("--")]
    MinusMinus,

    // Bitwise
    /// Operator `<<`
    #[token("<<")]
    Shl,
    /// Operator `>>`
    #[token(">>")]
    Shr,
    /// Operator `&`
    #[token("&")]
    Amp,
    /// Operator `^`
    #[token("^")]
    Caret,
    /// Operator `|`
    #[token("|")]
    Pipe,
    /// Operator `~`
    #[token("~")]
    Tilde,

    // Comparison
    /// Operator `==`
    #[token("==")]
    EqEq,
    /// Operator `!=`
    #[token("!=")]
    BangEq,
    /// Operator `<`
    #[token("<")]
    Lt,
    /// Operator `<=`
    #[token("<=")]
    LtEq,
    /// Operator `>`
    #[token(">")]
    Gt,
    /// Operator `>=`
    #[token(">=")]
    GtEq,

    // Logic
    /// Operator `&&`
    #[token("&&")]
    AmpAmp,
    /// Operator `||`
    #[token("||")]
    PipePipe,
    /// Operator `^^`
    #[token("^^")]
    CaretCaret,
    /// Operator `!`
    #[token("!")]
    Bang,

    // Assignment
    /// Operator `=`
    #[token("=")]
    Eq,
    /// Operator `+=`
    #[token("+=")]
    PlusEq,
    /// Operator `-=`
    #[token("-=")]
    MinusEq,
    /// Operator `*=`
    #[token("*=")]
    StarEq,
    /// Operator `/=`
    #[token("/=")]
    SlashEq,
    /// Operator `%=`
    #[token("%=")]
    PercentEq,
    /// Operator `<<=`
    #[token("<<=")]
    ShlEq,
    /// Operator `>>=`
    #[token(">>=")]
    ShrEq,
    /// Operator `&=`
    #[token("&=")]
    AmpEq,
    /// Operator `^=`
    #[token("^=")]
    CaretEq,
    /// Operator `|=`
    #[token("|=")]
    PipeEq,

    // Other
    /// Operator `?`
    #[token("?")]
    Question,
    /// Operator `:`
    #[token(":")]
    Colon,
    /// Operator `.`
    #[token(".")]
    Dot,
    /// Operator `,`
    #[token(",")]
    Comma,
    /// Operator `;`
    #[token(";")]
    Semicolon,

    // === Delimiters ===
    /// Delimiter `(`
    #[token("(")]
    LParen,
    /// Delimiter `)`
    #[token(")")]
    RParen,
    /// Delimiter `{`
    #[token("{")]
    LBrace,
    /// Delimiter `}`
    #[token("}")]
    RBrace,
    /// Delimiter `[`
    #[token("[")]
    LBracket,
    /// Delimiter `]`
    #[token("]")]
    RBracket,

    // === Literals ===
    /// Signed integer literal (decimal, octal or hexadecimal)
    #[regex(r"[0-9]+", |lex| parse_integer(lex.slice()).map(|v| Numeral::new(v, lex.slice())))]
    #[regex(r"0[xX][0-9a-fA-F]+", |lex| parse_integer(lex.slice()).map(|v| Numeral::new(v, lex.slice())))]
    Integer(Numeral<i64>),

    /// Unsigned integer literal (`u` / `U` suffix)
    #[regex(r"[0-9]+[uU]", |lex| parse_unsigned(lex.slice()).map(|v| Numeral::new(v, lex.slice())))]
    #[regex(r"0[xX][0-9a-fA-F]+[uU]", |lex| parse_unsigned(lex.slice()).map(|v| Numeral::new(v, lex.slice())))]
    Unsigned(Numeral<u64>),

    /// Floating-point literal, kept as written so printing is lossless
    #[regex(r"[0-9]+\.[0-9]*([eE][+-]?[0-9]+)?[fF]?", |lex| Rc::from(lex.slice()))]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?[fF]?", |lex| Rc::from(lex.slice()))]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+[fF]?", |lex| Rc::from(lex.slice()))]
    Float(Rc<str>),

    /// Identifier, including built-in type names such as `vec3`
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| Rc::from(lex.slice()))]
    Ident(Rc<str>),

    /// Whole preprocessor line, e.g. `#version 300 es`
    #[regex(r"#[^\n]*", |lex| Rc::from(lex.slice().trim_end()))]
    Directive(Rc<str>),
}

/// Integer literal value together with the text it was written as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Numeral<T> {
    pub value: T,
    pub text: Rc<str>,
}

impl<T> Numeral<T> {
    pub fn new(value: T, text: &str) -> Self {
        Self {
            value,
            text: Rc::from(text),
        }
    }
}

/// Digits and radix of an unsuffixed literal.
///
/// A leading `0` selects octal, `0x` selects hexadecimal.
fn split_radix(text: &str) -> (&str, u32) {
    if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        (hex, 16)
    } else if text.len() > 1 && text.starts_with('0') {
        (&text[1..], 8)
    } else {
        (text, 10)
    }
}

/// Parse a signed integer literal in GLSL notation.
///
/// Hex and octal literals denote a 32-bit pattern, so `0xFFFFFFFF` is -1.
fn parse_integer(text: &str) -> Option<i64> {
    let (digits, radix) = split_radix(text);
    let value = i64::from_str_radix(digits, radix).ok()?;
    match u32::try_from(value) {
        Ok(bits) if radix != 10 => Some(i64::from(bits as i32)),
        _ => Some(value),
    }
}

fn parse_unsigned(text: &str) -> Option<u64> {
    let (digits, radix) = split_radix(&text[..text.len() - 1]);
    u64::from_str_radix(digits, radix).ok()
}

const TOKEN_STRINGS: &[&str] = &[
    "const",
    "uniform",
    "buffer",
    "shared",
    "in",
    "out",
    "inout",
    "attribute",
    "varying",
    "centroid", // storage
    "flat",
    "smooth",
    "invariant",
    "coherent",
    "volatile",
    "restrict",
    "readonly",
    "writeonly", // interpolation & memory
    "highp",
    "mediump",
    "lowp",
    "precision", // precision
    "layout",
    "struct",
    "void", // structure
    "if",
    "else",
    "for",
    "while",
    "do",
    "switch",
    "case",
    "default",
    "return",
    "break",
    "continue",
    "discard", // control flow
    "true",
    "false", // booleans
    "+",
    "-",
    "*",
    "/",
    "%",
    "++",
    "--", // arithmetic
    "<<",
    ">>",
    "&",
    "^",
    "|",
    "~", // bitwise
    "==",
    "!=",
    "<",
    "<=",
    ">",
    ">=", // comparison
    "&&",
    "||",
    "^^",
    "!", // logic
    "=",
    "+=",
    "-=",
    "*=",
    "/=",
    "%=",
    "<<=",
    ">>=",
    "&=",
    "^=",
    "|=", // assignment
    "?",
    ":",
    ".",
    ",",
    ";", // other
    "(",
    ")",
    "{",
    "}",
    "[",
    "]", // delimiters
];

impl Token {
    fn token_string_index(&self) -> usize {
        // Safe: Token has #[repr(u16)] so discriminant values are stable
        let discriminant = unsafe { *(self as *const Token as *const u16) };
        discriminant as usize
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // Literals with data (not in TOKEN_STRINGS table)
            Token::Integer(n) => write!(f, "{}", n.text),
            Token::Unsigned(n) => write!(f, "{}", n.text),
            Token::Float(text) => write!(f, "{}", text),
            Token::Ident(id) => write!(f, "{}", id),
            Token::Directive(line) => write!(f, "{}", line),

            // Simple tokens (keywords, operators, delimiters)
            // Index into TOKEN_STRINGS using discriminant
            _ => {
                let idx = self.token_string_index();
                let s = TOKEN_STRINGS
                    .get(idx)
                    .expect("BUG: token discriminant out of bounds for TOKEN_STRINGS");
                write!(f, "{}", s)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(source: &str) -> Vec<Token> {
        Token::lexer(source)
            .filter_map(|result| result.ok())
            .collect()
    }

    fn ident(s: &str) -> Token {
        Token::Ident(Rc::from(s))
    }

    fn int(value: i64, text: &str) -> Token {
        Token::Integer(Numeral::new(value, text))
    }

    fn uint(value: u64, text: &str) -> Token {
        Token::Unsigned(Numeral::new(value, text))
    }

    fn float(s: &str) -> Token {
        Token::Float(Rc::from(s))
    }

    #[test]
    fn test_keywords() {
        let tokens = lex("const uniform in out inout highp precision");
        assert_eq!(
            tokens,
            vec![
                Token::Const,
                Token::Uniform,
                Token::In,
                Token::Out,
                Token::InOut,
                Token::HighP,
                Token::Precision,
            ]
        );
    }

    #[test]
    fn test_type_names_are_identifiers() {
        let tokens = lex("vec3 mat4x2 uint sampler2D");
        assert_eq!(
            tokens,
            vec![
                ident("vec3"),
                ident("mat4x2"),
                ident("uint"),
                ident("sampler2D"),
            ]
        );
    }

    #[test]
    fn test_integer_literals() {
        let tokens = lex("17 0 010 0x1F 0XfF");
        assert_eq!(
            tokens,
            vec![
                int(17, "17"),
                int(0, "0"),
                int(8, "010"),
                int(31, "0x1F"),
                int(255, "0XfF"),
            ]
        );
    }

    #[test]
    fn test_unsigned_literals() {
        let tokens = lex("19u 15U 0x10u 0u");
        assert_eq!(
            tokens,
            vec![
                uint(19, "19u"),
                uint(15, "15U"),
                uint(16, "0x10u"),
                uint(0, "0u"),
            ]
        );
    }

    #[test]
    fn test_hex_and_octal_fold_to_32_bit_signed() {
        let tokens = lex("0xFFFFFFFF 0x80000000 037777777777 0x7FFFFFFF 4294967295");
        assert_eq!(
            tokens,
            vec![
                int(-1, "0xFFFFFFFF"),
                int(i64::from(i32::MIN), "0x80000000"),
                int(-1, "037777777777"),
                int(i64::from(i32::MAX), "0x7FFFFFFF"),
                int(4_294_967_295, "4294967295"),
            ]
        );
    }

    #[test]
    fn test_unsigned_hex_keeps_full_range() {
        assert_eq!(lex("0xFFFFFFFFu"), vec![uint(4_294_967_295, "0xFFFFFFFFu")]);
    }

    #[test]
    fn test_float_literals_keep_spelling() {
        let tokens = lex("2.0 1. .5 1e10 3.5e-2 1.0f");
        assert_eq!(
            tokens,
            vec![
                float("2.0"),
                float("1."),
                float(".5"),
                float("1e10"),
                float("3.5e-2"),
                float("1.0f"),
            ]
        );
    }

    #[test]
    fn test_invalid_octal_is_error() {
        let results: Vec<_> = Token::lexer("09").collect();
        assert!(results.iter().any(Result::is_err));
    }

    #[test]
    fn test_operators_longest_match() {
        let tokens = lex("<<= << <= < >>= >> >= > && & || | ^^ ^ ++ + -- -");
        assert_eq!(
            tokens,
            vec![
                Token::ShlEq,
                Token::Shl,
                Token::LtEq,
                Token::Lt,
                Token::ShrEq,
                Token::Shr,
                Token::GtEq,
                Token::Gt,
                Token::AmpAmp,
                Token::Amp,
                Token::PipePipe,
                Token::Pipe,
                Token::CaretCaret,
                Token::Caret,
                Token::PlusPlus,
                Token::Plus,
                Token::MinusMinus,
                Token::Minus,
            ]
        );
    }

    #[test]
    fn test_indexing_chain() {
        let tokens = lex("As[x][y]");
        assert_eq!(
            tokens,
            vec![
                ident("As"),
                Token::LBracket,
                ident("x"),
                Token::RBracket,
                Token::LBracket,
                ident("y"),
                Token::RBracket,
            ]
        );
    }

    #[test]
    fn test_directive_is_whole_line() {
        let tokens = lex("#version 300 es\nvoid main() {}");
        assert_eq!(tokens[0], Token::Directive(Rc::from("#version 300 es")));
        assert_eq!(tokens[1], Token::Void);
    }

    #[test]
    fn test_comments_are_skipped() {
        let tokens = lex("a /* column */ [ // trailing\n b ] /** doc **/");
        assert_eq!(
            tokens,
            vec![ident("a"), Token::LBracket, ident("b"), Token::RBracket]
        );
    }

    #[test]
    fn test_lexer_error_detection() {
        let results: Vec<_> = Token::lexer("x @ y").collect();
        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert!(results[2].is_ok());
    }

    /// Verify that TOKEN_STRINGS matches token definitions.
    #[test]
    fn test_token_string_consistency() {
        assert_eq!(Token::Const.to_string(), "const");
        assert_eq!(Token::Precision.to_string(), "precision");
        assert_eq!(Token::Discard.to_string(), "discard");
        assert_eq!(Token::False.to_string(), "false");
        assert_eq!(Token::MinusMinus.to_string(), "--");
        assert_eq!(Token::Tilde.to_string(), "~");
        assert_eq!(Token::GtEq.to_string(), ">=");
        assert_eq!(Token::Bang.to_string(), "!");
        assert_eq!(Token::PipeEq.to_string(), "|=");
        assert_eq!(Token::Semicolon.to_string(), ";");
        assert_eq!(Token::RBracket.to_string(), "]");
        assert_eq!(uint(16, "0x10u").to_string(), "0x10u");
        assert_eq!(int(-1, "0xFFFFFFFF").to_string(), "0xFFFFFFFF");
        assert_eq!(float("2.0").to_string(), "2.0");
    }
}
