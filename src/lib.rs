//! A query language for matching text against boolean, positional, length
//! and lexical constraints.
//!
//! # Example
//!
//! ```rust
//! use lexiquery::{LexiQuery, QueryExpression, is_valid_grammar};
//!
//! let text = LexiQuery::new("The quick brown fox jumps over the lazy dog.");
//!
//! // `quick` occurs at most three tokens before `jumps`
//! assert_eq!(text.query("quick BEF/3 jumps"), Ok(true));
//!
//! // AND/OR/XOR fold left to right: (cat OR fox) AND dog
//! assert_eq!(text.query("cat OR fox AND dog"), Ok(true));
//!
//! // Comma-separated expressions must all hold
//! assert_eq!(text.query("LEN/5-10, END lazy dog"), Ok(true));
//!
//! let expr = QueryExpression::new("fox NEAR/2 IN(brown jumps)").unwrap();
//! assert_eq!(expr.query_list(["brown fox jumps", "a fox"]), vec!["brown fox jumps"]);
//!
//! assert!(!is_valid_grammar("LEN"));
//! ```

mod lexi_query;
pub mod query;
pub mod text;

pub use lexi_query::{LexiQuery, QueryExpression, is_valid_grammar};
pub use query::grammar::is_reserved;
pub use query::{ErrorCode, GrammarError, Node, evaluate, tokenize_and_parse};
pub use text::{TextIndex, pre_clean};
