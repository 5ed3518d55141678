//! Reserved words and the grammar error catalogue.

use phf::{Map, Set, phf_map, phf_set};

pub const BOOLEAN_OPERATORS: Set<&'static str> = phf_set! {"AND", "OR", "NOT", "XOR"};
pub const POSITIONAL_OPERATORS: Set<&'static str> = phf_set! {"NEAR", "BEF", "AFT"};
pub const MATCH_OPERATORS: Set<&'static str> = phf_set! {"ONLY", "LIKE", "STR", "END", "*"};
pub const MEMBERSHIP_OPERATORS: Set<&'static str> = phf_set! {"IN", "INOF"};
pub const LENGTH_OPERATORS: Set<&'static str> = phf_set! {"LEN", "SIZE"};

/// Separates an operator name from its numeric suffix, as in `NEAR/2-5`.
pub const NUMBER_TAG: char = '/';

/// True if `word` (any case) is a reserved operator name.
pub fn is_reserved(word: &str) -> bool {
    let upper = word.to_ascii_uppercase();
    let word = upper.as_str();
    BOOLEAN_OPERATORS.contains(word)
        || POSITIONAL_OPERATORS.contains(word)
        || MATCH_OPERATORS.contains(word)
        || MEMBERSHIP_OPERATORS.contains(word)
        || LENGTH_OPERATORS.contains(word)
}

/// Split an operator token into its name and optional numeric suffix.
///
/// `"NEAR/2-5"` gives `("NEAR", Some("2-5"))`, `"BEF"` gives `("BEF", None)`.
pub fn split_operator(token: &str) -> (&str, Option<&str>) {
    match token.split_once(NUMBER_TAG) {
        Some((name, spec)) => (name, Some(spec)),
        None => (token, None),
    }
}

/// Stable diagnostic codes for documented classes of grammar failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    BO1,
    BO2,
    BO3,
    BO4,
    BO5,
    MO1,
    MO2,
    PP1,
    PP2,
    SO1,
    LO1,
}

/// Catalogue of error codes to their documented meaning.
/// Keep in sync with [`ErrorCode`].
const GRAMMAR_ERRORS: Map<&'static str, &'static str> = phf_map! {
    "BO1" => "Boolean operators AND or OR must be surrounded by two expressions.",
    "BO2" => "Boolean operator NOT must be the first token in the subexpression.",
    "BO3" => "Can't have subexpression before boolean operator NOT.",
    "BO4" => "Boolean operator NOT must be followed by an expression.",
    "BO5" => "Parentheses must wrap a complete subexpression and close properly.",
    "MO1" => "Can't have expression before match operators (ONLY, LIKE, STR, END, '*').",
    "MO2" => "The match operators (ONLY, LIKE, STR, END, '*') must be the only token in the minimal expression.",
    "PP1" => "The position operators (BEF, AFT, NEAR) must be surrounded by two minimal or wildcard expressions.",
    "PP2" => "Positional distance spec must be a positive integer, a range MIN-MAX, or * for unlimited distance.",
    "SO1" => "Set operators (IN, INOF) must directly follow a positional expression.",
    "LO1" => "Length operators (LEN, SIZE) must include an upper bound (/N) or range (/M-N).",
};

impl ErrorCode {
    pub const ALL: [ErrorCode; 11] = [
        Self::BO1,
        Self::BO2,
        Self::BO3,
        Self::BO4,
        Self::BO5,
        Self::MO1,
        Self::MO2,
        Self::PP1,
        Self::PP2,
        Self::SO1,
        Self::LO1,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::BO1 => "BO1",
            Self::BO2 => "BO2",
            Self::BO3 => "BO3",
            Self::BO4 => "BO4",
            Self::BO5 => "BO5",
            Self::MO1 => "MO1",
            Self::MO2 => "MO2",
            Self::PP1 => "PP1",
            Self::PP2 => "PP2",
            Self::SO1 => "SO1",
            Self::LO1 => "LO1",
        }
    }

    /// Catalogue text for this code.
    pub fn description(self) -> &'static str {
        GRAMMAR_ERRORS.get(self.as_str()).copied().unwrap_or_default()
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_code_is_catalogued() {
        for code in ErrorCode::ALL {
            assert!(
                !code.description().is_empty(),
                "missing catalogue entry for {code}"
            );
        }
        assert_eq!(GRAMMAR_ERRORS.len(), ErrorCode::ALL.len());
    }

    #[test]
    fn test_reserved_words_any_case() {
        assert!(is_reserved("NEAR"));
        assert!(is_reserved("inof"));
        assert!(is_reserved("Size"));
        assert!(is_reserved("*"));
        assert!(!is_reserved("nasa"));
        assert!(!is_reserved("NEAR/2"));
    }

    #[test]
    fn test_split_operator() {
        assert_eq!(split_operator("NEAR/2-5"), ("NEAR", Some("2-5")));
        assert_eq!(split_operator("BEF/*"), ("BEF", Some("*")));
        assert_eq!(split_operator("LEN"), ("LEN", None));
    }
}
