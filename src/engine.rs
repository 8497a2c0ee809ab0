// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The substring query engine.
//!
//! Deliberately the simplest thing that works: a linear scan over the
//! corpus, matching the normalized query against normalized title and
//! excerpt. No tokenization, no ranking. Result order is corpus order,
//! which keeps rendering stable across keystrokes. The ranked alternative
//! lives in [`crate::inverted`].
//!
//! A blank query is not a query. [`ParsedQuery`] forces callers to decide
//! that upfront, because "the user typed nothing yet" and "nothing matched"
//! are different view states and must never collapse into each other.

use crate::types::{Hit, PostRecord};
use crate::utils::normalize;

/// Score assigned to every substring match. The engine does not rank.
const SUBSTRING_SCORE: f64 = 1.0;

/// A query string, classified before any matching happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedQuery {
    /// Empty or whitespace-only input. Renders the prompt state.
    Empty,
    /// A normalized (trimmed, lowercased, diacritic-folded) search term.
    Term(String),
}

impl ParsedQuery {
    /// Classify raw input. Whitespace-only input parses to [`ParsedQuery::Empty`].
    pub fn parse(raw: &str) -> Self {
        let normalized = normalize(raw);
        if normalized.is_empty() {
            ParsedQuery::Empty
        } else {
            ParsedQuery::Term(normalized)
        }
    }

    /// The normalized term, if there is one.
    pub fn term(&self) -> Option<&str> {
        match self {
            ParsedQuery::Empty => None,
            ParsedQuery::Term(term) => Some(term),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ParsedQuery::Empty)
    }
}

/// Filter the corpus down to records containing the query.
///
/// A record matches if the term is a substring of its normalized title OR
/// its normalized excerpt. Hits come back in corpus order with uniform
/// scores. An empty query always yields an empty vec; the caller decides
/// how to present that (see [`crate::render`]).
pub fn search(query: &ParsedQuery, corpus: &[PostRecord]) -> Vec<Hit> {
    let Some(term) = query.term() else {
        return Vec::new();
    };

    corpus
        .iter()
        .enumerate()
        .filter(|(_, record)| {
            normalize(&record.title).contains(term) || normalize(&record.excerpt).contains(term)
        })
        .map(|(id, _)| Hit::new(id, SUBSTRING_SCORE))
        .collect()
}
