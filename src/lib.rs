//! Lazy-loading client-side search for static blogs.
//!
//! A static-site generator emits a post index (`search.json`) at build
//! time; this crate is everything that happens to it afterwards: loading
//! it exactly once per session, filtering it per keystroke, and driving
//! the search modal's states. All page effects go through ports, so the
//! same logic runs under a web shell, a terminal, or a test stub.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌─────────────┐
//! │  loader.rs  │────▶│  engine.rs   │────▶│  render.rs  │
//! │ (IndexLoader│     │ (search,     │     │ (RenderPort,│
//! │  IndexSource│     │  ParsedQuery)│     │  ViewState) │
//! └─────────────┘     └──────────────┘     └─────────────┘
//!        ▲                   │ inverted.rs         ▲
//!        │                   ▼ (ranked variant)    │
//! ┌─────────────────────────────────────────────────────┐
//! │                   controller.rs                      │
//! │  (modal state machine, Debounce, Shell port,        │
//! │   UiEvent loop)                                     │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Guarantees
//!
//! | Concern          | Guarantee                                        |
//! |------------------|--------------------------------------------------|
//! | Index loading    | At most one fetch per session, shared in-flight  |
//! | Load failure     | Collapses to an empty corpus, never an error     |
//! | Empty query      | Prompt state, distinct from "no results"         |
//! | Result order     | Corpus order (substring) / relevance (ranked)    |
//! | Debounce         | Trailing, last write wins by cancellation        |
//! | Missing anchors  | Feature disables itself silently                 |
//!
//! # Usage
//!
//! ```ignore
//! use sift::{Controller, FileSource, IndexLoader, SearchConfig};
//!
//! let loader = Arc::new(IndexLoader::new(FileSource::new("site/search.json")));
//! let (events, controller) = Controller::attach(shell, loader, SearchConfig::default())?;
//! tokio::spawn(controller.run());
//! events.send(UiEvent::Open(OpenTrigger::Toggle))?;
//! ```

// Module declarations
mod config;
mod controller;
mod debounce;
mod engine;
mod inverted;
mod loader;
mod render;
mod types;
mod utils;

// Re-exports for public API
pub use config::SearchConfig;
pub use controller::{
    Anchor, CloseTrigger, Controller, EventSender, OpenTrigger, Shell, UiEvent,
};
pub use debounce::Debounce;
pub use engine::{search, ParsedQuery};
pub use inverted::{tokenize, FieldKind, InvertedIndex, CONTENT_BOOST, DEFAULT_BOOST};
pub use loader::{FileSource, IndexLoader, IndexSource, LoadPhase, SourceError};
pub use render::{render, Fragment, RenderPort, ViewState};
pub use types::{DocId, Hit, PostRecord};
pub use utils::normalize;

#[cfg(test)]
mod tests {
    //! Property tests over the query/render pipeline.
    //!
    //! Random corpora and queries, checked against the contracts the
    //! modules promise individually: matches are exact, order is stable,
    //! and the renderer always lands in exactly one view state.

    use super::*;
    use proptest::collection::vec;
    use proptest::prelude::*;

    fn record_strategy() -> impl Strategy<Value = PostRecord> {
        ("[a-zA-Z ]{0,20}", "[a-zA-Z ]{0,40}").prop_map(|(title, excerpt)| PostRecord {
            title,
            excerpt,
            url: "/post".to_string(),
            date: "2024-01-01".to_string(),
            author: None,
            category: None,
            tags: vec![],
        })
    }

    struct CountingPort {
        states: Vec<ViewState>,
        render_calls: usize,
    }

    impl RenderPort for CountingPort {
        fn set_state(&mut self, state: ViewState) {
            self.states.push(state);
        }
        fn render_results(&mut self, _results: &[Fragment]) {
            self.render_calls += 1;
        }
    }

    proptest! {
        #[test]
        fn prop_empty_query_never_matches(corpus in vec(record_strategy(), 0..8)) {
            prop_assert!(search(&ParsedQuery::Empty, &corpus).is_empty());
        }

        #[test]
        fn prop_hits_are_exactly_the_matches_in_corpus_order(
            corpus in vec(record_strategy(), 0..8),
            raw in "[a-zA-Z]{1,4}",
        ) {
            let query = ParsedQuery::parse(&raw);
            let term = query.term().unwrap().to_string();
            let hits = search(&query, &corpus);

            for window in hits.windows(2) {
                prop_assert!(window[0].id < window[1].id, "corpus order violated");
            }

            for (id, record) in corpus.iter().enumerate() {
                let matches = normalize(&record.title).contains(&term)
                    || normalize(&record.excerpt).contains(&term);
                let listed = hits.iter().any(|hit| hit.id.as_usize() == id);
                prop_assert_eq!(matches, listed, "record {} mismatch", id);
            }
        }

        #[test]
        fn prop_render_lands_in_exactly_one_state(
            corpus in vec(record_strategy(), 0..8),
            raw in "[a-zA-Z ]{0,6}",
        ) {
            let query = ParsedQuery::parse(&raw);
            let hits = search(&query, &corpus);
            let mut port = CountingPort { states: Vec::new(), render_calls: 0 };
            let fragments = render(&query, &hits, &corpus, &mut port);

            prop_assert_eq!(port.states.len(), 1);
            match port.states[0] {
                ViewState::EmptyPrompt => {
                    prop_assert!(query.is_empty());
                    prop_assert_eq!(port.render_calls, 0);
                }
                ViewState::NoResults => {
                    prop_assert!(!query.is_empty());
                    prop_assert!(fragments.is_empty());
                    prop_assert_eq!(port.render_calls, 0);
                }
                ViewState::Results => {
                    prop_assert!(!fragments.is_empty());
                    prop_assert_eq!(port.render_calls, 1);
                }
            }
        }

        #[test]
        fn prop_ranked_hits_are_sorted_by_score(
            corpus in vec(record_strategy(), 0..8),
            raw in "[a-zA-Z]{1,4}",
        ) {
            let index = InvertedIndex::build(&corpus);
            let hits = index.search(&ParsedQuery::parse(&raw));
            for window in hits.windows(2) {
                prop_assert!(
                    window[0].score > window[1].score
                        || (window[0].score == window[1].score && window[0].id < window[1].id)
                );
            }
        }
    }
}
