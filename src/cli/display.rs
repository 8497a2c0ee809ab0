// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal display utilities for the sift CLI.
//!
//! Plain ANSI, no themes: bold titles, dim metadata, cyan links. Respects
//! `NO_COLOR` and falls back to undecorated output when stdout is not a
//! TTY, so piping into other tools stays clean.

use sift::{Fragment, RenderPort, ViewState};
use std::sync::OnceLock;

/// Width between the box borders in `inspect` output.
pub const BOX_WIDTH: usize = 56;

/// Cached color decision
static COLORS: OnceLock<bool> = OnceLock::new();

fn colors_enabled() -> bool {
    *COLORS.get_or_init(|| {
        std::env::var_os("NO_COLOR").is_none() && atty::is(atty::Stream::Stdout)
    })
}

fn paint(code: &str, text: &str) -> String {
    if colors_enabled() {
        format!("\x1b[{}m{}\x1b[0m", code, text)
    } else {
        text.to_string()
    }
}

pub fn bold(text: &str) -> String {
    paint("1", text)
}

pub fn dim(text: &str) -> String {
    paint("2", text)
}

pub fn cyan(text: &str) -> String {
    paint("36", text)
}

pub fn yellow(text: &str) -> String {
    paint("33", text)
}

/// Cut a snippet down to `max` characters, on a char boundary.
fn snippet(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max).collect();
    format!("{}…", cut.trim_end())
}

// ═══════════════════════════════════════════════════════════════════════════
// RESULT RENDERING
// ═══════════════════════════════════════════════════════════════════════════

/// [`RenderPort`] over stdout. The CLI drives the same render path the
/// page does; this is the terminal's version of the result container.
pub struct TermRenderer {
    query: String,
}

impl TermRenderer {
    pub fn new(query: &str) -> Self {
        TermRenderer {
            query: query.to_string(),
        }
    }
}

impl RenderPort for TermRenderer {
    fn set_state(&mut self, state: ViewState) {
        match state {
            ViewState::EmptyPrompt => println!("Nothing to search for. Give me a query."),
            ViewState::NoResults => {
                println!("No results for {}.", yellow(&format!("'{}'", self.query)));
            }
            // render_results already printed the list
            ViewState::Results => {}
        }
    }

    fn render_results(&mut self, results: &[Fragment]) {
        for (rank, fragment) in results.iter().enumerate() {
            println!(
                "{:>3}. {}  {}",
                rank + 1,
                bold(&fragment.title),
                dim(&fragment.date)
            );
            println!("     {}", cyan(&fragment.url));
            if !fragment.excerpt.is_empty() {
                println!("     {}", snippet(&fragment.excerpt, 72));
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// BOX DRAWING (inspect output)
// ═══════════════════════════════════════════════════════════════════════════

pub fn box_top(title: &str) -> String {
    let mut out = format!("┌{}┐\n", "─".repeat(BOX_WIDTH));
    out.push_str(&format!("│ {:<width$} │\n", title, width = BOX_WIDTH - 2));
    out.push_str(&format!("├{}┤", "─".repeat(BOX_WIDTH)));
    out
}

pub fn box_row(label: &str, value: &str) -> String {
    format!(
        "│ {:<18}{:<width$} │",
        label,
        value,
        width = BOX_WIDTH - 20
    )
}

pub fn box_bottom() -> String {
    format!("└{}┘", "─".repeat(BOX_WIDTH))
}
