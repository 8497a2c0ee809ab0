// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The interaction controller: modal lifecycle, debounced input, and the
//! wiring between shell events and the search pipeline.
//!
//! The controller is one cooperative task. It owns the shell, the debounce
//! state, and a handle to the shared loader, and drains a channel of
//! [`UiEvent`]s in a `select!` loop whose only other wake source is the
//! debounce deadline. That mirrors how the feature behaves on a page:
//! handlers run to completion, and the suspension points are the index
//! fetch and the pending timer.
//!
//! # Modal state machine
//!
//! `Closed → Open` on any open trigger, `Open → Closed` on any close
//! trigger. No nesting, no stacking. Escape while closed is a no-op, as is
//! typing into a closed modal (a host should not deliver either, but a
//! misbehaving one must not corrupt state).

use crate::config::SearchConfig;
use crate::debounce::Debounce;
use crate::engine::{self, ParsedQuery};
use crate::loader::{IndexLoader, IndexSource};
use crate::render::{render, RenderPort, ViewState};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};

/// The page hooks the feature expects. Element ids follow the stock theme
/// markup; a host page missing any required one gets no search, silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Modal,
    Toggle,
    MobileToggle,
    Close,
    Overlay,
    Input,
    List,
    EmptyPrompt,
    NoResults,
}

impl Anchor {
    /// Anchors without which the feature disables itself.
    pub const REQUIRED: [Anchor; 3] = [Anchor::Modal, Anchor::Toggle, Anchor::Input];

    /// The element id the host page provides for this anchor.
    pub fn element_id(self) -> &'static str {
        match self {
            Anchor::Modal => "search-modal",
            Anchor::Toggle => "search-toggle",
            Anchor::MobileToggle => "search-toggle-mobile",
            Anchor::Close => "search-close",
            Anchor::Overlay => "search-overlay",
            Anchor::Input => "search-input",
            Anchor::List => "search-list",
            Anchor::EmptyPrompt => "search-empty",
            Anchor::NoResults => "search-no-results",
        }
    }
}

/// Host adapter for everything beyond result rendering: modal visibility,
/// scroll locking, input focus, and navigation.
pub trait Shell: RenderPort {
    /// Does the page provide this anchor?
    fn has_anchor(&self, anchor: Anchor) -> bool;
    fn set_modal_visible(&mut self, visible: bool);
    fn lock_scroll(&mut self);
    fn unlock_scroll(&mut self);
    fn focus_input(&mut self);
    fn clear_input(&mut self);
    fn navigate(&mut self, url: &str);
}

/// Which affordance opened the modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenTrigger {
    Toggle,
    MobileToggle,
}

/// Which affordance closed the modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseTrigger {
    Button,
    Overlay,
    Escape,
}

/// Everything the host can tell the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Open(OpenTrigger),
    Close(CloseTrigger),
    /// The input's full current value after a keystroke.
    Input(String),
    /// Enter pressed: navigate to the first rendered result, if any.
    Enter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Modal {
    Closed,
    Open,
}

/// Sender half handed back to the host for delivering [`UiEvent`]s.
pub type EventSender = mpsc::UnboundedSender<UiEvent>;

/// One controller instance per page.
pub struct Controller<S, Src> {
    shell: S,
    loader: Arc<IndexLoader<Src>>,
    config: SearchConfig,
    modal: Modal,
    debounce: Debounce,
    first_url: Option<String>,
    events: mpsc::UnboundedReceiver<UiEvent>,
}

impl<S, Src> Controller<S, Src>
where
    S: Shell + Send + 'static,
    Src: IndexSource + 'static,
{
    /// Wire up the controller, or return `None` when a required anchor is
    /// missing. That is the whole failure mode: no panic, no error state,
    /// the page just has no search.
    pub fn attach(
        shell: S,
        loader: Arc<IndexLoader<Src>>,
        config: SearchConfig,
    ) -> Option<(EventSender, Self)> {
        for anchor in Anchor::REQUIRED {
            if !shell.has_anchor(anchor) {
                log::debug!("search disabled: missing #{}", anchor.element_id());
                return None;
            }
        }

        let debounce = Debounce::new(config.debounce());
        let (sender, events) = mpsc::unbounded_channel();
        Some((
            sender,
            Controller {
                shell,
                loader,
                config,
                modal: Modal::Closed,
                debounce,
                first_url: None,
                events,
            },
        ))
    }

    /// Drain events until the host drops its sender.
    pub async fn run(mut self) {
        loop {
            let deadline = self.debounce.deadline();
            tokio::select! {
                event = self.events.recv() => {
                    match event {
                        Some(event) => self.on_event(event).await,
                        None => break,
                    }
                }
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    if let Some(raw) = self.debounce.fire(Instant::now()) {
                        self.run_query(&raw).await;
                    }
                }
            }
        }
    }

    async fn on_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::Open(trigger) => self.open(trigger),
            UiEvent::Close(trigger) => self.close(trigger),
            UiEvent::Input(value) => self.input(value),
            UiEvent::Enter => self.submit(),
        }
    }

    fn open(&mut self, trigger: OpenTrigger) {
        if self.modal == Modal::Open {
            return;
        }
        log::trace!("search opened via {:?}", trigger);
        self.modal = Modal::Open;
        self.shell.set_modal_visible(true);
        self.shell.lock_scroll();
        self.shell.focus_input();
        self.shell.set_state(ViewState::EmptyPrompt);

        // Kick the lazy load. Queries fired before it resolves await the
        // same in-flight fetch inside the loader.
        let loader = Arc::clone(&self.loader);
        tokio::spawn(async move {
            let _ = loader.load().await;
        });
    }

    fn close(&mut self, trigger: CloseTrigger) {
        if self.modal == Modal::Closed {
            // Escape with the modal closed is a no-op.
            return;
        }
        log::trace!("search closed via {:?}", trigger);
        self.modal = Modal::Closed;
        self.shell.set_modal_visible(false);
        self.shell.clear_input();
        self.shell.unlock_scroll();
        self.debounce.cancel();
        self.first_url = None;
        self.shell.set_state(ViewState::EmptyPrompt);
    }

    fn input(&mut self, value: String) {
        if self.modal == Modal::Closed {
            return;
        }
        self.debounce.schedule(value, Instant::now());
    }

    fn submit(&mut self) {
        if self.modal == Modal::Closed {
            return;
        }
        if let Some(url) = self.first_url.clone() {
            self.shell.navigate(&url);
        }
    }

    async fn run_query(&mut self, raw: &str) {
        let corpus = self.loader.load().await;
        let query = ParsedQuery::parse(raw);
        let mut hits = engine::search(&query, &corpus);
        hits.truncate(self.config.clamp_len(hits.len()));
        let fragments = render(&query, &hits, &corpus, &mut self.shell);
        self.first_url = fragments.first().map(|fragment| fragment.url.clone());
    }
}
