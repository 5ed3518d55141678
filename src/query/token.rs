//! Tokenizer for query expressions.
//!
//! Tokenizing never fails. Anything that is not punctuation or an operator
//! becomes a lowercased [`TokenKind::Word`]; grammar errors surface in the
//! parser.

use std::sync::LazyLock;

use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Word,
    Operator,
    LParen,
    RParen,
    Star,
    Comma,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Normalised text: uppercase for operators (including any `/spec`
    /// suffix), lowercase for words.
    pub text: String,
}

impl Token {
    fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn is_word(&self) -> bool {
        self.kind == TokenKind::Word
    }

    /// True for an operator token whose text is exactly one of `names`.
    pub fn is_operator(&self, names: &[&str]) -> bool {
        self.kind == TokenKind::Operator && names.contains(&self.text.as_str())
    }
}

/// `foo*` is shorthand for `foo *`.
static COMPACT_WILDCARD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\w+)\*").expect("valid wildcard regex"));

static PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([(),])").expect("valid punctuation regex"));

static OPERATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)^(?:AND|OR|XOR|NOT|IN|INOF|STR|END|LIKE|ONLY|\*",
        r"|(?:NEAR|BEF|AFT)(?:/(?:\*|\d+(?:-\d+)?))?",
        r"|(?:LEN|SIZE)(?:/\d+(?:-\d+)?)?",
        r")$",
    ))
    .expect("valid operator regex")
});

/// Split a query expression into tokens.
pub fn tokenize(expression: &str) -> Vec<Token> {
    let expanded = COMPACT_WILDCARD.replace_all(expression, "$1 *");
    let padded = PUNCTUATION.replace_all(&expanded, " $1 ");

    let tokens: Vec<Token> = padded.split_whitespace().map(classify).collect();
    log::trace!("tokenized {expression:?} into {tokens:?}");
    tokens
}

fn classify(atom: &str) -> Token {
    match atom {
        "(" => Token::new(TokenKind::LParen, atom),
        ")" => Token::new(TokenKind::RParen, atom),
        "," => Token::new(TokenKind::Comma, atom),
        "*" => Token::new(TokenKind::Star, atom),
        _ if OPERATOR.is_match(atom) => Token::new(TokenKind::Operator, atom.to_uppercase()),
        _ => Token::new(TokenKind::Word, atom.to_lowercase()),
    }
}
