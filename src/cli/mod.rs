// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the sift command-line interface.
//!
//! Two subcommands: `search` to query an index file the way the page
//! would, and `inspect` to examine what the generator actually emitted.
//! The search command goes through the real loader, so a missing or
//! malformed index behaves exactly like it does in the browser: empty
//! corpus, "no results", exit 0.

pub mod display;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "sift",
    about = "Query and inspect static-blog search indexes",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search an index file and display results
    Search {
        /// Path to the generated index JSON (a top-level array of post records)
        file: String,

        /// Search query
        query: String,

        /// Maximum number of results to return
        #[arg(short, long, default_value = "10")]
        limit: usize,

        /// Rank with the weighted inverted index instead of corpus order
        ///
        /// Fields and boosts: title, excerpt x10, author, category, tags.
        /// Without this flag, results come back in corpus order, the same
        /// order the page's substring filter produces.
        #[arg(long)]
        ranked: bool,
    },

    /// Inspect an index file structure
    Inspect {
        /// Path to index JSON
        file: String,
    },
}
