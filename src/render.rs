// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Result rendering behind a minimal port.
//!
//! The query and load logic never touches a page directly. It speaks to a
//! [`RenderPort`]: one call to pick the visible state, one call to hand
//! over display fragments. A host adapter (web page, terminal, test stub)
//! implements the port; the logic stays identical everywhere.
//!
//! **Invariant**: exactly one of the three view states is visible after
//! every render. `EmptyPrompt` is the "type something" affordance and is
//! never shown for a query that simply matched nothing.

use crate::engine::ParsedQuery;
use crate::types::{Hit, PostRecord};

/// The three mutually exclusive states of the result container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    /// No query entered yet. Prompt the user.
    EmptyPrompt,
    /// A real query matched nothing.
    NoResults,
    /// The result list is populated.
    Results,
}

/// One display fragment per result: linked title, snippet, date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub title: String,
    pub url: String,
    pub excerpt: String,
    pub date: String,
}

impl Fragment {
    fn from_record(record: &PostRecord) -> Self {
        Fragment {
            title: record.title.clone(),
            url: record.url.clone(),
            excerpt: record.excerpt.clone(),
            date: record.date.clone(),
        }
    }
}

/// What the host page implements: toggle container visibility and fill the
/// result list. No other DOM knowledge leaks into the search logic.
pub trait RenderPort {
    /// Make exactly this state visible, hiding the other two.
    fn set_state(&mut self, state: ViewState);
    /// Replace the rendered list with these fragments, in order.
    fn render_results(&mut self, results: &[Fragment]);
}

/// Map (query, hits) onto the port and return the rendered fragments.
///
/// The full result set is rendered every time; there is no pagination.
/// Hits are joined against the corpus by positional id, in hit order.
/// Out-of-range ids (a hit from a stale corpus) are skipped rather than
/// panicking.
pub fn render<P: RenderPort + ?Sized>(
    query: &ParsedQuery,
    hits: &[Hit],
    corpus: &[PostRecord],
    port: &mut P,
) -> Vec<Fragment> {
    if query.is_empty() {
        port.set_state(ViewState::EmptyPrompt);
        return Vec::new();
    }

    let fragments: Vec<Fragment> = hits
        .iter()
        .filter_map(|hit| corpus.get(hit.id.as_usize()))
        .map(Fragment::from_record)
        .collect();

    if fragments.is_empty() {
        port.set_state(ViewState::NoResults);
    } else {
        port.render_results(&fragments);
        port.set_state(ViewState::Results);
    }
    fragments
}
