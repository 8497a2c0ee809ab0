//! Shared test utilities and fixtures.

#![allow(dead_code)]

use sift::{Anchor, Fragment, PostRecord, RenderPort, Shell, ViewState};
use std::sync::{Arc, Mutex};

/// Build a post record with the fields tests actually vary.
pub fn record(title: &str, excerpt: &str, url: &str, date: &str) -> PostRecord {
    PostRecord {
        title: title.to_string(),
        excerpt: excerpt.to_string(),
        url: url.to_string(),
        date: date.to_string(),
        author: None,
        category: None,
        tags: vec![],
    }
}

/// The two-post corpus used throughout: "hello" hits the first title and
/// the second excerpt.
pub fn sample_corpus() -> Vec<PostRecord> {
    vec![
        record("Hello World", "intro post", "/a", "2024-01-01"),
        record("Second", "hello again", "/b", "2024-02-01"),
    ]
}

/// Everything a shell was asked to do, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCall {
    ModalVisible(bool),
    LockScroll,
    UnlockScroll,
    FocusInput,
    ClearInput,
    Navigate(String),
    State(ViewState),
    /// Urls of the rendered fragments, in render order.
    Rendered(Vec<String>),
}

/// Shell stub that records every call. The log handle survives the shell
/// being moved into a controller task.
pub struct RecordingShell {
    log: Arc<Mutex<Vec<ShellCall>>>,
    missing: Vec<Anchor>,
}

impl RecordingShell {
    pub fn new() -> (Self, Arc<Mutex<Vec<ShellCall>>>) {
        let log = Arc::new(Mutex::new(Vec::new()));
        (
            RecordingShell {
                log: Arc::clone(&log),
                missing: Vec::new(),
            },
            log,
        )
    }

    fn push(&self, call: ShellCall) {
        self.log.lock().unwrap().push(call);
    }
}

impl RenderPort for RecordingShell {
    fn set_state(&mut self, state: ViewState) {
        self.push(ShellCall::State(state));
    }

    fn render_results(&mut self, results: &[Fragment]) {
        self.push(ShellCall::Rendered(
            results.iter().map(|f| f.url.clone()).collect(),
        ));
    }
}

impl Shell for RecordingShell {
    fn has_anchor(&self, anchor: Anchor) -> bool {
        !self.missing.contains(&anchor)
    }
    fn set_modal_visible(&mut self, visible: bool) {
        self.push(ShellCall::ModalVisible(visible));
    }
    fn lock_scroll(&mut self) {
        self.push(ShellCall::LockScroll);
    }
    fn unlock_scroll(&mut self) {
        self.push(ShellCall::UnlockScroll);
    }
    fn focus_input(&mut self) {
        self.push(ShellCall::FocusInput);
    }
    fn clear_input(&mut self) {
        self.push(ShellCall::ClearInput);
    }
    fn navigate(&mut self, url: &str) {
        self.push(ShellCall::Navigate(url.to_string()));
    }
}

/// Count how many times anything was rendered.
pub fn render_count(log: &Arc<Mutex<Vec<ShellCall>>>) -> usize {
    log.lock()
        .unwrap()
        .iter()
        .filter(|call| matches!(call, ShellCall::Rendered(_)))
        .count()
}

/// The most recent view state the shell was put into.
pub fn last_state(log: &Arc<Mutex<Vec<ShellCall>>>) -> Option<ViewState> {
    log.lock().unwrap().iter().rev().find_map(|call| match call {
        ShellCall::State(state) => Some(*state),
        _ => None,
    })
}
