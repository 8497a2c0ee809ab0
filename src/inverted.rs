//! Inverted index construction and ranked search.
//!
//! The alternative to the linear substring scan in [`crate::engine`]: an
//! in-memory index built once over the corpus, mapping normalized terms to
//! posting lists. Matching is per-token rather than per-substring, and
//! results come back in relevance order instead of corpus order. Each hit
//! is re-joined against the corpus by positional id for display.
//!
//! # INVARIANTS (DO NOT VIOLATE)
//!
//! 1. **POSTING_LIST_SORTED**: Each posting list is sorted by (doc_id, field)
//! 2. **NON_EMPTY**: Every indexed term has at least one posting
//! 3. **POSTING_WELLFORMED**: Every posting's doc_id is a valid corpus index

use crate::engine::ParsedQuery;
use crate::types::{DocId, Hit, PostRecord};
use crate::utils::normalize;
use std::collections::HashMap;

// =============================================================================
// FIELD BOOSTS
// =============================================================================
// The excerpt carries the body of the post, so it dominates: a term found
// there is worth ten title/taxonomy occurrences. Title, author, category and
// tags all weigh the same.

/// Boost multiplier for content (excerpt) occurrences.
pub const CONTENT_BOOST: f64 = 10.0;

/// Boost multiplier for every other field.
pub const DEFAULT_BOOST: f64 = 1.0;

/// Which field of a record a term occurrence came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldKind {
    Title,
    Content,
    Author,
    Category,
    Tags,
}

impl FieldKind {
    /// Score contribution of one occurrence in this field.
    #[inline]
    pub fn boost(self) -> f64 {
        match self {
            FieldKind::Content => CONTENT_BOOST,
            _ => DEFAULT_BOOST,
        }
    }
}

/// One occurrence of a term in one field of one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Posting {
    doc_id: u32,
    field: FieldKind,
}

/// Word boundary detection: checks if character is a word separator.
fn is_word_boundary(c: char) -> bool {
    !c.is_alphanumeric()
}

/// Tokenize text into normalized words.
///
/// Splits at non-alphanumeric boundaries and normalizes each word. Empty
/// tokens (punctuation runs, whitespace) are dropped.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(is_word_boundary)
        .filter(|word| !word.is_empty())
        .map(normalize)
        .filter(|word| !word.is_empty())
        .collect()
}

/// Term-to-postings index over a corpus of post records.
#[derive(Debug, Clone, Default)]
pub struct InvertedIndex {
    terms: HashMap<String, Vec<Posting>>,
    total_docs: usize,
}

impl InvertedIndex {
    /// Build the index over a corpus.
    ///
    /// Indexed fields per record: title, excerpt (as content), author,
    /// category, and each tag. Postings are generated in corpus order and
    /// sorted per term, so POSTING_LIST_SORTED holds.
    pub fn build(corpus: &[PostRecord]) -> Self {
        let mut terms: HashMap<String, Vec<Posting>> = HashMap::new();

        for (doc_id, record) in corpus.iter().enumerate() {
            let doc_id = doc_id as u32;
            let mut index_field = |text: &str, field: FieldKind| {
                for word in tokenize(text) {
                    terms.entry(word).or_default().push(Posting { doc_id, field });
                }
            };

            index_field(&record.title, FieldKind::Title);
            index_field(&record.excerpt, FieldKind::Content);
            if let Some(author) = &record.author {
                index_field(author, FieldKind::Author);
            }
            if let Some(category) = &record.category {
                index_field(category, FieldKind::Category);
            }
            for tag in &record.tags {
                index_field(tag, FieldKind::Tags);
            }
        }

        // INVARIANT: POSTING_LIST_SORTED
        for postings in terms.values_mut() {
            postings.sort();
        }

        InvertedIndex {
            terms,
            total_docs: corpus.len(),
        }
    }

    /// Number of documents the index was built over.
    pub fn total_docs(&self) -> usize {
        self.total_docs
    }

    /// Number of distinct terms in the index.
    pub fn vocabulary_size(&self) -> usize {
        self.terms.len()
    }

    /// Ranked search: boost-weighted term frequency, descending.
    ///
    /// Every query token contributes independently, so documents matching
    /// more tokens (or matching in the content field) float up. Ties break
    /// by doc id, which keeps ranking deterministic across runs.
    pub fn search(&self, query: &ParsedQuery) -> Vec<Hit> {
        let Some(term) = query.term() else {
            return Vec::new();
        };

        let mut scores: HashMap<u32, f64> = HashMap::new();
        for word in tokenize(term) {
            if let Some(postings) = self.terms.get(&word) {
                for posting in postings {
                    *scores.entry(posting.doc_id).or_insert(0.0) += posting.field.boost();
                }
            }
        }

        let mut hits: Vec<Hit> = scores
            .into_iter()
            .map(|(doc_id, score)| Hit {
                id: DocId(doc_id),
                score,
            })
            .collect();
        hits.sort_by(|a, b| b.score.total_cmp(&a.score).then(a.id.cmp(&b.id)));
        hits
    }
}
