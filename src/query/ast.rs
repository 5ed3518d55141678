//! AST types for query expressions.

/// A literal word. With `wildcard` set it matches any token starting with `text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    pub text: String,
    pub wildcard: bool,
}

impl Word {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            wildcard: false,
        }
    }

    pub fn prefix(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            wildcard: true,
        }
    }
}

/// Inclusive range of allowed values. `maximum = None` is unbounded.
///
/// Used both for token distances and for length bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DistanceSpec {
    pub minimum: usize,
    pub maximum: Option<usize>,
}

impl DistanceSpec {
    pub fn new(minimum: usize, maximum: Option<usize>) -> Self {
        Self { minimum, maximum }
    }

    pub fn contains(&self, value: usize) -> bool {
        value >= self.minimum && self.maximum.is_none_or(|max| value <= max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOpKind {
    Only, // ONLY — distinct tokens equal the word set
    Like, // LIKE — every word occurs in the text
    Str,  // STR  — text starts with the words
    End,  // END  — text ends with the words
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthOpKind {
    Len,  // LEN  — token count
    Size, // SIZE — UTF-8 byte length of the cleaned text
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PosOpKind {
    Near,
    Bef,
    Aft,
}

impl PosOpKind {
    /// Smallest distance the operator accepts.
    pub fn floor(self) -> usize {
        match self {
            Self::Near => 0,
            Self::Bef | Self::Aft => 1,
        }
    }
}

/// How the per-word results of a positional set operator combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetMode {
    All, // IN
    Any, // INOF
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Word(Word),
    MatchOp {
        op: MatchOpKind,
        words: Vec<Word>,
    },
    LengthOp {
        op: LengthOpKind,
        bounds: DistanceSpec,
    },
    PosOp {
        op: PosOpKind,
        distance: DistanceSpec,
        left: Word,
        right: Word,
    },
    PosSetOp {
        op: PosOpKind,
        distance: DistanceSpec,
        left: Word,
        mode: SetMode,
        words: Vec<Word>,
    },
    Not(Box<Node>),
    And(Box<Node>, Box<Node>),
    Or(Box<Node>, Box<Node>),
    Xor(Box<Node>, Box<Node>),
    Group(Box<Node>),
    /// Comma-separated top-level expressions; every member must match.
    ExprList(Vec<Node>),
}
