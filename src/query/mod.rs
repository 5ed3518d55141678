//! Query language: tokenizer, parser and evaluator.
//!
//! An expression is tokenized, parsed into a [`Node`] tree and evaluated
//! against a [`TextIndex`](crate::TextIndex).
//!
//! # Expression syntax
//!
//! | Form                 | Meaning                                            |
//! |----------------------|----------------------------------------------------|
//! | `word`               | Word occurs in the text                            |
//! | `word*`, `word *`    | Some token starts with `word`                      |
//! | `A AND B`            | Both hold                                          |
//! | `A OR B`             | Either holds                                       |
//! | `A XOR B`            | Exactly one holds                                  |
//! | `NOT A`              | A does not hold                                    |
//! | `(A)`                | Grouping                                           |
//! | `A, B`               | Every comma-separated expression holds             |
//! | `a NEAR/spec b`      | `a` and `b` within distance, either order          |
//! | `a BEF/spec b`       | `a` occurs before `b` within distance              |
//! | `a AFT/spec b`       | `a` occurs after `b` within distance               |
//! | `a BEF/spec IN(b c)` | Relation holds for every listed word               |
//! | `a BEF/spec INOF(b c)` | Relation holds for at least one listed word      |
//! | `LEN/N`, `LEN/M-N`   | Token count in `[0,N]` or `[M,N]`                  |
//! | `SIZE/N`, `SIZE/M-N` | Byte length in `[0,N]` or `[M,N]`                  |
//! | `ONLY a b`           | Distinct tokens are exactly `{a, b}`               |
//! | `LIKE a b`           | Every word occurs                                  |
//! | `STR a b`            | Text starts with `a b`                             |
//! | `END a b`            | Text ends with `a b`                               |
//!
//! Distance specs: none (`[0,1]` for NEAR, `[1,1]` otherwise), `*`
//! (unbounded), `N` or `M-N`.
//!
//! AND, OR and XOR share one precedence level and fold left to right.

pub mod ast;
pub mod evaluator;
pub mod grammar;
pub mod parser;
pub mod token;

#[cfg(test)]
mod tests;

pub use ast::Node;
pub use evaluator::evaluate;
pub use grammar::ErrorCode;
pub use parser::{GrammarError, parse, tokenize_and_parse};
pub use token::{Token, TokenKind, tokenize};
