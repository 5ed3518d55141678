//! Binding of query expressions to texts.

use crate::query::{GrammarError, Node, evaluate, tokenize_and_parse};
use crate::text::{TextIndex, pre_clean};

/// A text prepared once and queried with any number of expressions.
#[derive(Debug, Clone)]
pub struct LexiQuery {
    original: String,
    index: TextIndex,
}

impl LexiQuery {
    /// Bind `text` using the default cleaner ([`pre_clean`]).
    pub fn new(text: &str) -> Self {
        Self::with_cleaner(text, pre_clean)
    }

    /// Bind `text` using a custom cleaner.
    ///
    /// The cleaner's output is split on whitespace; query words are always
    /// lowercase, so a cleaner that keeps uppercase makes those tokens
    /// unreachable.
    pub fn with_cleaner(text: &str, clean: impl Fn(&str) -> String) -> Self {
        Self {
            original: text.to_string(),
            index: TextIndex::new(clean(text)),
        }
    }

    /// The text as given, before cleaning.
    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn index(&self) -> &TextIndex {
        &self.index
    }

    /// Parse `expression` and evaluate it against this text.
    pub fn query(&self, expression: &str) -> Result<bool, GrammarError> {
        let node = tokenize_and_parse(expression)?;
        Ok(self.evaluate(&node))
    }

    pub fn evaluate(&self, node: &Node) -> bool {
        let matched = evaluate(node, &self.index);
        log::debug!("{matched} for {:?}", self.original);
        matched
    }
}

/// An expression validated once and run against many texts.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryExpression {
    expression: String,
    node: Node,
}

impl QueryExpression {
    pub fn new(expression: &str) -> Result<Self, GrammarError> {
        Ok(Self {
            expression: expression.to_string(),
            node: tokenize_and_parse(expression)?,
        })
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn node(&self) -> &Node {
        &self.node
    }

    /// Does `text` match?
    pub fn query(&self, text: &str) -> bool {
        LexiQuery::new(text).evaluate(&self.node)
    }

    /// The texts that match, in their original order.
    pub fn query_list<'a, I>(&self, texts: I) -> Vec<&'a str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        texts.into_iter().filter(|text| self.query(text)).collect()
    }
}

impl std::str::FromStr for QueryExpression {
    type Err = GrammarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// True if `expression` parses. The specific error is discarded.
pub fn is_valid_grammar(expression: &str) -> bool {
    tokenize_and_parse(expression).is_ok()
}
