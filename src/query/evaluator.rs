//! Tree-walking evaluation of a query [`Node`] against a [`TextIndex`].
//!
//! Evaluation is total: unknown words resolve to empty position lists and
//! simply fail to match.

use std::borrow::Cow;
use std::collections::HashSet;

use itertools::Itertools;

use crate::text::TextIndex;

use super::ast::*;

/// Evaluate `node` against `index`.
pub fn evaluate(node: &Node, index: &TextIndex) -> bool {
    match node {
        Node::Word(word) => !word_positions(word, index).is_empty(),
        Node::MatchOp { op, words } => match_op(*op, words, index),
        Node::LengthOp { op, bounds } => {
            let metric = match op {
                LengthOpKind::Len => index.tokens().len(),
                LengthOpKind::Size => index.text().len(),
            };
            bounds.contains(metric)
        }
        Node::PosOp {
            op,
            distance,
            left,
            right,
        } => positional(
            *op,
            distance,
            &word_positions(left, index),
            &word_positions(right, index),
        ),
        Node::PosSetOp {
            op,
            distance,
            left,
            mode,
            words,
        } => {
            let left = word_positions(left, index);
            if left.is_empty() {
                return false;
            }
            let mut results = words
                .iter()
                .map(|w| positional(*op, distance, &left, &word_positions(w, index)));
            match mode {
                SetMode::All => results.all(|matched| matched),
                SetMode::Any => results.any(|matched| matched),
            }
        }
        Node::Not(inner) => !evaluate(inner, index),
        Node::And(left, right) => evaluate(left, index) && evaluate(right, index),
        Node::Or(left, right) => evaluate(left, index) || evaluate(right, index),
        Node::Xor(left, right) => evaluate(left, index) ^ evaluate(right, index),
        Node::Group(inner) => evaluate(inner, index),
        Node::ExprList(nodes) => nodes.iter().all(|n| evaluate(n, index)),
    }
}

/// Positions where `word` occurs; a wildcard word collects every token it prefixes.
pub fn word_positions<'a>(word: &Word, index: &'a TextIndex) -> Cow<'a, [usize]> {
    if word.wildcard {
        Cow::Owned(index.prefix_positions(&word.text))
    } else {
        Cow::Borrowed(index.positions(&word.text))
    }
}

fn match_op(op: MatchOpKind, words: &[Word], index: &TextIndex) -> bool {
    let tokens = index.tokens();
    match op {
        MatchOpKind::Only => {
            let wanted: HashSet<&str> = words.iter().map(|w| w.text.as_str()).collect();
            wanted.len() == index.distinct().len()
                && wanted.iter().all(|w| index.distinct().contains(*w))
        }
        MatchOpKind::Like => words.iter().all(|w| index.distinct().contains(&w.text)),
        MatchOpKind::Str => {
            tokens.len() >= words.len() && sequence_equals(&tokens[..words.len()], words)
        }
        MatchOpKind::End => {
            tokens.len() >= words.len()
                && sequence_equals(&tokens[tokens.len() - words.len()..], words)
        }
    }
}

fn sequence_equals(tokens: &[String], words: &[Word]) -> bool {
    tokens.iter().zip(words).all(|(t, w)| *t == w.text)
}

/// Apply a positional operator to two position lists.
pub fn positional(op: PosOpKind, spec: &DistanceSpec, left: &[usize], right: &[usize]) -> bool {
    match op {
        PosOpKind::Near => near(left, right, spec),
        PosOpKind::Bef => before(left, right, spec),
        PosOpKind::Aft => after(left, right, spec),
    }
}

/// Some `l`, `r` are within `spec` of each other in either direction.
pub fn near(left: &[usize], right: &[usize], spec: &DistanceSpec) -> bool {
    left.iter()
        .cartesian_product(right)
        .any(|(&l, &r)| spec.contains(l.abs_diff(r)))
}

/// Some `l` occurs before some `r` at a distance within `spec`.
pub fn before(left: &[usize], right: &[usize], spec: &DistanceSpec) -> bool {
    left.iter()
        .cartesian_product(right)
        .any(|(&l, &r)| r > l && spec.contains(r - l))
}

/// Some `l` occurs after some `r` at a distance within `spec`.
pub fn after(left: &[usize], right: &[usize], spec: &DistanceSpec) -> bool {
    before(right, left, spec)
}
