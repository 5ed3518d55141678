//! Recursive descent parser for query expressions.
//!
//! Boolean operators have no relative precedence: `a OR b AND c` is
//! `(a OR b) AND c`. `NOT` binds to the following unary expression only.

use std::iter::Peekable;
use std::vec::IntoIter;

use super::ast::*;
use super::grammar::{
    ErrorCode, LENGTH_OPERATORS, MATCH_OPERATORS, MEMBERSHIP_OPERATORS, POSITIONAL_OPERATORS,
    split_operator,
};
use super::token::{Token, TokenKind, tokenize};

/// Errors that can occur while parsing a query expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    EmptyExpression,
    UnexpectedEnd,
    ExpectedWord(String),
    TrailingTokens(String),
    MissingBooleanOperand(String),
    MisplacedNot,
    NotAfterExpression,
    MissingNotOperand,
    UnbalancedParenthesis,
    MatchAfterExpression(String),
    MatchWithoutWords(String),
    MissingPositionalOperand(String),
    InvalidDistance { op: String, spec: String },
    MisplacedSetOperator(String),
    InvalidSetList(String),
    InvalidLength { op: String, spec: Option<String> },
    NestingTooDeep,
}

impl GrammarError {
    /// Catalogue code for this failure, if it belongs to a documented class.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Self::EmptyExpression
            | Self::UnexpectedEnd
            | Self::ExpectedWord(_)
            | Self::TrailingTokens(_)
            | Self::NestingTooDeep => None,
            Self::MissingBooleanOperand(_) => Some(ErrorCode::BO1),
            Self::MisplacedNot => Some(ErrorCode::BO2),
            Self::NotAfterExpression => Some(ErrorCode::BO3),
            Self::MissingNotOperand => Some(ErrorCode::BO4),
            Self::UnbalancedParenthesis => Some(ErrorCode::BO5),
            Self::MatchAfterExpression(_) => Some(ErrorCode::MO1),
            Self::MatchWithoutWords(_) => Some(ErrorCode::MO2),
            Self::MissingPositionalOperand(_) => Some(ErrorCode::PP1),
            Self::InvalidDistance { .. } => Some(ErrorCode::PP2),
            Self::MisplacedSetOperator(_) | Self::InvalidSetList(_) => Some(ErrorCode::SO1),
            Self::InvalidLength { .. } => Some(ErrorCode::LO1),
        }
    }
}

impl GrammarError {
    /// What went wrong at this particular spot in the expression.
    fn detail(&self) -> String {
        match self {
            Self::EmptyExpression => "Empty expression".to_string(),
            Self::UnexpectedEnd => "Unexpected end of input".to_string(),
            Self::ExpectedWord(found) => format!("Expected word, found {found:?}"),
            Self::TrailingTokens(found) => {
                format!("Trailing tokens after complete expression at {found:?}")
            }
            Self::MissingBooleanOperand(op) => format!("{op} is missing an operand"),
            Self::MisplacedNot => {
                "NOT cannot be the operand of a positional operator".to_string()
            }
            Self::NotAfterExpression => {
                "NOT cannot follow a complete subexpression".to_string()
            }
            Self::MissingNotOperand => "NOT has nothing after it".to_string(),
            Self::UnbalancedParenthesis => "Missing or unmatched parenthesis".to_string(),
            Self::MatchAfterExpression(op) => {
                format!("{op} cannot follow a complete subexpression")
            }
            Self::MatchWithoutWords(op) => format!("{op} must be followed by at least one word"),
            Self::MissingPositionalOperand(op) => format!("{op} is missing a word"),
            Self::InvalidDistance { op, spec } => format!("Invalid distance {spec:?} for {op}"),
            Self::MisplacedSetOperator(op) => format!("{op} without a positional operator"),
            Self::InvalidSetList(op) => {
                format!("{op} must be followed by a parenthesized word list")
            }
            Self::InvalidLength { op, spec: None } => format!("{op} has no bounds"),
            Self::InvalidLength { op, spec: Some(spec) } => {
                format!("Invalid bounds {spec:?} for {op}")
            }
            Self::NestingTooDeep => {
                format!("Expression nested deeper than {MAX_DEPTH} levels")
            }
        }
    }
}

impl std::fmt::Display for GrammarError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.code() {
            Some(code) => write!(f, "{code}: {} ({})", code.description(), self.detail()),
            None => f.write_str(&self.detail()),
        }
    }
}

impl std::error::Error for GrammarError {}

/// Deepest nesting of `NOT`, parentheses and chained boolean operators.
///
/// Parsing and evaluation recurse once per level.
pub const MAX_DEPTH: usize = 256;

/// Tokenize and parse an expression in one step.
pub fn tokenize_and_parse(expression: &str) -> Result<Node, GrammarError> {
    let node = parse(tokenize(expression))?;
    log::debug!("parsed {expression:?} into {node:?}");
    Ok(node)
}

/// Parse a token sequence into a single [`Node`].
///
/// Every token must be consumed; leftovers are an error.
pub fn parse(tokens: Vec<Token>) -> Result<Node, GrammarError> {
    if tokens.is_empty() {
        return Err(GrammarError::EmptyExpression);
    }
    let mut parser = Parser {
        tokens: tokens.into_iter().peekable(),
        depth: 0,
    };
    let node = parser.parse_expression_list()?;
    match parser.tokens.peek() {
        Some(tok) => Err(unexpected_after_expression(tok, false)),
        None => Ok(node),
    }
}

struct Parser {
    tokens: Peekable<IntoIter<Token>>,
    depth: usize,
}

impl Parser {
    fn parse_expression_list(&mut self) -> Result<Node, GrammarError> {
        let mut nodes = vec![self.parse_boolean_chain()?];
        while self.next_if_kind(TokenKind::Comma).is_some() {
            nodes.push(self.parse_boolean_chain()?);
        }
        if nodes.len() == 1 {
            return Ok(nodes.remove(0));
        }
        Ok(Node::ExprList(nodes))
    }

    /// Unary expressions joined by AND/OR/XOR, folded strictly left to right.
    fn parse_boolean_chain(&mut self) -> Result<Node, GrammarError> {
        let depth = self.depth;
        let mut node = self.parse_unary()?;
        while let Some(op) = self.tokens.next_if(|t| t.is_operator(&["AND", "OR", "XOR"])) {
            if self.tokens.peek().is_none() {
                return Err(GrammarError::MissingBooleanOperand(op.text));
            }
            // Each fold puts the chain so far one level further down.
            self.descend()?;
            let right = Box::new(self.parse_unary()?);
            let left = Box::new(node);
            node = match op.text.as_str() {
                "AND" => Node::And(left, right),
                "OR" => Node::Or(left, right),
                _ => Node::Xor(left, right),
            };
        }
        self.depth = depth;
        Ok(node)
    }

    fn parse_unary(&mut self) -> Result<Node, GrammarError> {
        if self.tokens.next_if(|t| t.is_operator(&["NOT"])).is_some() {
            if self.tokens.peek().is_none() {
                return Err(GrammarError::MissingNotOperand);
            }
            self.descend()?;
            let inner = self.parse_unary()?;
            self.depth -= 1;
            return Ok(Node::Not(Box::new(inner)));
        }
        self.parse_atom()
    }

    fn parse_atom(&mut self) -> Result<Node, GrammarError> {
        let Some(tok) = self.tokens.peek() else {
            return Err(GrammarError::UnexpectedEnd);
        };

        if tok.kind == TokenKind::LParen {
            self.tokens.next();
            self.descend()?;
            let inner = self.parse_boolean_chain()?;
            self.depth -= 1;
            return match self.tokens.next() {
                Some(t) if t.kind == TokenKind::RParen => Ok(Node::Group(Box::new(inner))),
                Some(t) => Err(unexpected_after_expression(&t, true)),
                None => Err(GrammarError::UnbalancedParenthesis),
            };
        }

        if tok.kind == TokenKind::Operator {
            let (name, _) = split_operator(&tok.text);
            if MATCH_OPERATORS.contains(name) {
                return self.parse_match_expression();
            }
            if LENGTH_OPERATORS.contains(name) {
                return self.parse_length_expression();
            }
        }

        let left = self.parse_word()?;
        let Some(op_token) = self.tokens.next_if(is_positional_operator) else {
            return Ok(Node::Word(left));
        };
        let (name, spec) = split_operator(&op_token.text);
        let op = positional_kind(name);
        let distance = parse_distance_spec(op, name, spec)?;

        if let Some(set_op) = self.tokens.next_if(is_membership_operator) {
            let mode = if set_op.text == "IN" {
                SetMode::All
            } else {
                SetMode::Any
            };
            let words = self.parse_word_list(&set_op.text)?;
            return Ok(Node::PosSetOp {
                op,
                distance,
                left,
                mode,
                words,
            });
        }

        match self.tokens.peek() {
            Some(t) if t.is_word() => {}
            Some(t) if t.is_operator(&["NOT"]) => return Err(GrammarError::MisplacedNot),
            _ => return Err(GrammarError::MissingPositionalOperand(name.to_string())),
        }
        let right = self.parse_word()?;
        Ok(Node::PosOp {
            op,
            distance,
            left,
            right,
        })
    }

    /// `STR|END|LIKE|ONLY` followed by one or more words.
    fn parse_match_expression(&mut self) -> Result<Node, GrammarError> {
        let Some(op_token) = self.tokens.next() else {
            return Err(GrammarError::UnexpectedEnd);
        };
        let op = match op_token.text.as_str() {
            "ONLY" => MatchOpKind::Only,
            "LIKE" => MatchOpKind::Like,
            "STR" => MatchOpKind::Str,
            _ => MatchOpKind::End,
        };
        let words: Vec<Word> = std::iter::from_fn(|| self.tokens.next_if(Token::is_word))
            .map(|t| Word::new(t.text))
            .collect();
        if words.is_empty() {
            return Err(GrammarError::MatchWithoutWords(op_token.text));
        }
        Ok(Node::MatchOp { op, words })
    }

    /// `LEN/N`, `LEN/M-N`, `SIZE/N` or `SIZE/M-N`. A bare `N` means `0-N`.
    fn parse_length_expression(&mut self) -> Result<Node, GrammarError> {
        let Some(op_token) = self.tokens.next() else {
            return Err(GrammarError::UnexpectedEnd);
        };
        let (name, spec) = split_operator(&op_token.text);
        let op = if name == "LEN" {
            LengthOpKind::Len
        } else {
            LengthOpKind::Size
        };
        let invalid = || GrammarError::InvalidLength {
            op: name.to_string(),
            spec: spec.map(str::to_string),
        };
        let (minimum, maximum) = spec.and_then(|s| parse_range(s, 0)).ok_or_else(invalid)?;
        Ok(Node::LengthOp {
            op,
            bounds: DistanceSpec::new(minimum, Some(maximum)),
        })
    }

    /// `( word word ... )` after `IN` or `INOF`.
    fn parse_word_list(&mut self, mode: &str) -> Result<Vec<Word>, GrammarError> {
        if self.next_if_kind(TokenKind::LParen).is_none() {
            return Err(GrammarError::InvalidSetList(mode.to_string()));
        }
        let words: Vec<Word> = std::iter::from_fn(|| self.tokens.next_if(Token::is_word))
            .map(|t| Word::new(t.text))
            .collect();
        if words.is_empty() {
            return Err(GrammarError::InvalidSetList(mode.to_string()));
        }
        if self.next_if_kind(TokenKind::RParen).is_none() {
            return Err(GrammarError::UnbalancedParenthesis);
        }
        Ok(words)
    }

    /// A word, optionally followed by `*` to make it a prefix match.
    fn parse_word(&mut self) -> Result<Word, GrammarError> {
        let Some(tok) = self.tokens.next_if(Token::is_word) else {
            return Err(self.word_expected());
        };
        let wildcard = self.next_if_kind(TokenKind::Star).is_some();
        Ok(Word {
            text: tok.text,
            wildcard,
        })
    }

    /// Classify the token found where a word was required.
    fn word_expected(&mut self) -> GrammarError {
        let Some(tok) = self.tokens.peek() else {
            return GrammarError::UnexpectedEnd;
        };
        if tok.kind != TokenKind::Operator {
            return GrammarError::ExpectedWord(tok.text.clone());
        }
        let (name, _) = split_operator(&tok.text);
        match name {
            "AND" | "OR" | "XOR" => GrammarError::MissingBooleanOperand(name.to_string()),
            "NOT" => GrammarError::MisplacedNot,
            _ if MEMBERSHIP_OPERATORS.contains(name) => {
                GrammarError::MisplacedSetOperator(name.to_string())
            }
            _ if POSITIONAL_OPERATORS.contains(name) => {
                GrammarError::MissingPositionalOperand(name.to_string())
            }
            _ if MATCH_OPERATORS.contains(name) => {
                GrammarError::MatchWithoutWords(name.to_string())
            }
            _ => GrammarError::ExpectedWord(tok.text.clone()),
        }
    }

    fn descend(&mut self) -> Result<(), GrammarError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(GrammarError::NestingTooDeep);
        }
        Ok(())
    }

    fn next_if_kind(&mut self, kind: TokenKind) -> Option<Token> {
        self.tokens.next_if(|t| t.kind == kind)
    }
}

fn is_positional_operator(tok: &Token) -> bool {
    tok.kind == TokenKind::Operator && POSITIONAL_OPERATORS.contains(split_operator(&tok.text).0)
}

fn is_membership_operator(tok: &Token) -> bool {
    tok.kind == TokenKind::Operator && MEMBERSHIP_OPERATORS.contains(tok.text.as_str())
}

fn positional_kind(name: &str) -> PosOpKind {
    match name {
        "NEAR" => PosOpKind::Near,
        "BEF" => PosOpKind::Bef,
        _ => PosOpKind::Aft,
    }
}

/// Error for a token left over after a complete (sub)expression.
fn unexpected_after_expression(tok: &Token, in_group: bool) -> GrammarError {
    match tok.kind {
        TokenKind::Operator if tok.text == "NOT" => GrammarError::NotAfterExpression,
        TokenKind::Operator if MATCH_OPERATORS.contains(tok.text.as_str()) => {
            GrammarError::MatchAfterExpression(tok.text.clone())
        }
        TokenKind::RParen => GrammarError::UnbalancedParenthesis,
        _ if in_group => GrammarError::UnbalancedParenthesis,
        _ => GrammarError::TrailingTokens(tok.text.clone()),
    }
}

/// Parse the `/spec` suffix of `NEAR`, `BEF` or `AFT`.
///
/// | Suffix | NEAR        | BEF / AFT   |
/// |--------|-------------|-------------|
/// | none   | `[0,1]`     | `[1,1]`     |
/// | `*`    | `[0,∞]`     | `[1,∞]`     |
/// | `N`    | `[0,N]`     | `[1,N]`     |
/// | `M-N`  | `[M,N]`     | `[M,N]`     |
fn parse_distance_spec(
    op: PosOpKind,
    name: &str,
    spec: Option<&str>,
) -> Result<DistanceSpec, GrammarError> {
    let floor = op.floor();
    match spec {
        None if op == PosOpKind::Near => Ok(DistanceSpec::new(0, Some(1))),
        None => Ok(DistanceSpec::new(1, Some(1))),
        Some("*") => Ok(DistanceSpec::new(floor, None)),
        Some(s) => parse_range(s, floor)
            .map(|(lo, hi)| DistanceSpec::new(lo, Some(hi)))
            .ok_or_else(|| GrammarError::InvalidDistance {
                op: name.to_string(),
                spec: s.to_string(),
            }),
    }
}

/// Parse `N` as `(floor, N)` or `M-N` as `(M, N)`.
///
/// Returns `None` for non-integers, values below `floor`, or `N < M`.
fn parse_range(fragment: &str, floor: usize) -> Option<(usize, usize)> {
    let (lo, hi) = match fragment.split_once('-') {
        Some((lo, hi)) => (lo.parse::<usize>().ok()?, hi.parse::<usize>().ok()?),
        None => (floor, fragment.parse::<usize>().ok()?),
    };
    (lo >= floor && hi >= lo).then_some((lo, hi))
}
