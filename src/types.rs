// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The building blocks of the search runtime.
//!
//! A corpus is an ordered sequence of [`PostRecord`]s. Records carry no
//! declared key; the position in the corpus is the identity, wrapped in
//! [`DocId`] so it cannot be confused with an ordinary count or offset.
//! Everything downstream (hits, result joins, ranked postings) refers back
//! to the corpus through that positional id.
//!
//! # Invariants
//!
//! - **Hit**: `id.as_usize() < corpus.len()` for the corpus the hit was
//!   produced from. Hits are only meaningful against that corpus.
//! - **Corpus**: immutable for the lifetime of a session. The loader hands
//!   out a shared slice and never mutates it afterwards.

use serde::{Deserialize, Serialize};

/// Type-safe document identifier.
///
/// Prevents accidentally passing a result count where a corpus position is
/// expected. Constructed by the engines while walking the corpus, so values
/// are in bounds by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct DocId(pub u32);

impl DocId {
    /// Get the underlying value.
    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }

    /// Convert to usize for corpus indexing.
    #[inline]
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for DocId {
    fn from(id: u32) -> Self {
        DocId(id)
    }
}

impl From<DocId> for usize {
    fn from(id: DocId) -> Self {
        id.0 as usize
    }
}

/// A single indexed blog post surrogate.
///
/// This is the shape of one entry in the generated index file: the display
/// fields a result needs plus the optional taxonomy fields the ranked
/// engine weighs. The static-site generator emits these at build time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRecord {
    pub title: String,
    /// Excerpt for the simple engine, full content for richer indexes.
    /// Either way it is the text a result snippet is cut from.
    pub excerpt: String,
    pub url: String,
    pub date: String,
    /// Author name (for multi-author blogs)
    #[serde(default)]
    pub author: Option<String>,
    /// Category for client-side filtering (e.g., "engineering", "adventures")
    #[serde(default)]
    pub category: Option<String>,
    /// Tags/labels for categorization
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A match joined back against the corpus by positional id.
///
/// The substring engine emits uniform scores in corpus order; the ranked
/// engine emits relevance scores in descending order. Display fields are
/// resolved later by indexing the corpus with `id`.
#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    pub id: DocId,
    /// Relevance score (higher is better). Uniform for substring matches.
    pub score: f64,
}

impl Hit {
    pub fn new(id: usize, score: f64) -> Self {
        Hit {
            id: DocId(id as u32),
            score,
        }
    }
}
