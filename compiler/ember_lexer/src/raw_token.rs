//! Raw tokens recognised by logos, before cooking.

use logos::Logos;

use crate::cook::{parse_decimal, parse_radix};

/// Raw token from logos.
///
/// Literal text is left uncooked except for numbers; string escapes and
/// identifier interning happen in [`crate::Lexer`].
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\u{000B}\u{000C}\u{00A0}\u{FEFF}]+")]
pub(crate) enum RawToken {
    // Trivia
    #[regex(r"//[^\n]*")]
    LineComment,
    #[regex(r"/\*([^*]|\*+[^*/])*\*+/")]
    BlockComment,
    #[token("/*")]
    UnterminatedComment,
    #[regex(r"\n|\u{2028}|\u{2029}")]
    Newline,

    // Keywords
    #[token("var")]
    Var,
    #[token("let")]
    Let,
    #[token("const")]
    Const,
    #[token("function")]
    Function,
    #[token("return")]
    Return,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("while")]
    While,
    #[token("do")]
    Do,
    #[token("for")]
    For,
    #[token("break")]
    Break,
    #[token("continue")]
    Continue,
    #[token("switch")]
    Switch,
    #[token("case")]
    Case,
    #[token("default")]
    Default,
    #[token("try")]
    Try,
    #[token("catch")]
    Catch,
    #[token("finally")]
    Finally,
    #[token("throw")]
    Throw,
    #[token("typeof")]
    Typeof,
    #[token("void")]
    Void,
    #[token("delete")]
    Delete,
    #[token("in")]
    In,
    #[token("instanceof")]
    Instanceof,
    #[token("new")]
    New,
    #[token("this")]
    This,
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("null")]
    Null,
    #[token("debugger")]
    Debugger,

    // Literals
    #[regex(r"([0-9]+(\.[0-9]*)?|\.[0-9]+)([eE][+-]?[0-9]+)?", |lex| parse_decimal(lex.slice()))]
    Number(f64),
    #[regex(r"0[xX][0-9a-fA-F]+", |lex| parse_radix(&lex.slice()[2..], 16))]
    #[regex(r"0[oO][0-7]+", |lex| parse_radix(&lex.slice()[2..], 8))]
    #[regex(r"0[bB][01]+", |lex| parse_radix(&lex.slice()[2..], 2))]
    RadixNumber(f64),
    #[regex(r#""([^"\\\n]|\\(.|\n))*""#)]
    #[regex(r"'([^'\\\n]|\\(.|\n))*'")]
    String,
    #[regex(r#""([^"\\\n]|\\(.|\n))*"#)]
    #[regex(r"'([^'\\\n]|\\(.|\n))*")]
    UnterminatedString,
    #[regex(r"[A-Za-z_$][A-Za-z0-9_$]*")]
    Ident,

    // Punctuation
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token(":")]
    Colon,
    #[token("?")]
    Question,
    #[token("=>")]
    Arrow,

    // Operators
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("++")]
    PlusPlus,
    #[token("--")]
    MinusMinus,
    #[token("<<")]
    Shl,
    #[token(">>")]
    Shr,
    #[token(">>>")]
    UShr,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("!")]
    Bang,
    #[token("~")]
    Tilde,
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("===")]
    EqEqEq,
    #[token("!==")]
    NotEqEq,
    #[token("=")]
    Eq,
    #[token("+=")]
    PlusEq,
    #[token("-=")]
    MinusEq,
    #[token("*=")]
    StarEq,
    #[token("/=")]
    SlashEq,
    #[token("%=")]
    PercentEq,
    #[token("<<=")]
    ShlEq,
    #[token(">>=")]
    ShrEq,
    #[token(">>>=")]
    UShrEq,
    #[token("&=")]
    AmpEq,
    #[token("|=")]
    PipeEq,
    #[token("^=")]
    CaretEq,
}
