//! TUI application state and event handling.
//!
//! `App` wraps a [`ResearchController`] with the view state only the terminal
//! front end needs: which overlay is open, list selections, summary scroll,
//! theme and transient status messages.
//!
//! # Event loop
//!
//! The loop is synchronous: draw when dirty, poll the keyboard for 100ms, handle
//! the action. A search is started with [`ResearchController::begin_submit`],
//! the request is spawned on the tokio runtime and its outcome comes back over
//! a oneshot channel that is polled every tick. The controller is only ever
//! touched from the loop thread.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use ratatui::Terminal;
use ratatui::backend::Backend;
use tokio::runtime::Handle;
use tokio::sync::oneshot::{self, error::TryRecvError};

use super::events::{Action, poll_event};
use super::rendering::{RenderState, render_ui};
use super::theme::Palette;
use crate::clipboard::copy_source;
use crate::controller::{NoticeKind, PendingSearch, ResearchController};
use crate::error::{ResearchError, SubmitError};
use crate::models::ResearchResult;
use crate::storage::{KeyValueStore, ThemeMode, load_theme, save_theme};

/// Duration for success status messages (milliseconds)
const STATUS_SUCCESS_DURATION_MS: u64 = 3000;
/// Duration for error status messages (milliseconds)
const STATUS_ERROR_DURATION_MS: u64 = 5000;
/// Longest query accepted from the keyboard
const MAX_QUERY_CHARS: usize = 500;
/// Lines moved per PgUp/PgDn in the summary
const SCROLL_STEP: u16 = 5;

/// Type of status message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Success,
    Error,
}

/// Transient status message with expiry
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub message_type: MessageType,
    pub expires_at: Instant,
}

/// Modal layer drawn over the main view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    History,
    ConfirmClear,
}

struct InFlight {
    pending: PendingSearch,
    receiver: oneshot::Receiver<Result<ResearchResult, ResearchError>>,
}

pub struct App {
    controller: ResearchController,
    preferences: Arc<dyn KeyValueStore>,
    runtime: Handle,
    in_flight: Option<InFlight>,
    overlay: Overlay,
    history_selected: usize,
    source_selected: usize,
    summary_scroll: u16,
    theme: ThemeMode,
    spinner_frame: usize,
    should_quit: bool,
    // Status message (clipboard feedback, search errors, etc.)
    status_message: Option<StatusMessage>,
    // Dirty state tracking for efficient rendering
    needs_redraw: bool,
    last_draw_time: Instant,
}

impl App {
    pub fn new(
        controller: ResearchController,
        preferences: Arc<dyn KeyValueStore>,
        runtime: Handle,
    ) -> Self {
        let theme = load_theme(preferences.as_ref());

        Self {
            controller,
            preferences,
            runtime,
            in_flight: None,
            overlay: Overlay::None,
            history_selected: 0,
            source_selected: 0,
            summary_scroll: 0,
            theme,
            spinner_frame: 0,
            should_quit: false,
            status_message: None,
            needs_redraw: true, // Initial draw needed
            last_draw_time: Instant::now(),
        }
    }

    /// Set a transient status message with automatic expiry
    fn set_status(&mut self, text: impl Into<String>, message_type: MessageType) {
        let duration_ms = match message_type {
            MessageType::Success => STATUS_SUCCESS_DURATION_MS,
            MessageType::Error => STATUS_ERROR_DURATION_MS,
        };
        self.status_message = Some(StatusMessage {
            text: text.into(),
            message_type,
            expires_at: Instant::now() + Duration::from_millis(duration_ms),
        });
        self.needs_redraw = true;
    }

    /// Check and clear expired status messages
    fn check_and_clear_expired_status(&mut self) {
        let should_clear = self
            .status_message
            .as_ref()
            .map(|msg| Instant::now() >= msg.expires_at)
            .unwrap_or(false);
        if should_clear {
            self.status_message = None;
            self.needs_redraw = true;
        }
    }

    /// Move a controller notice into the status bar
    fn surface_notice(&mut self) {
        if let Some(notice) = self.controller.take_notice() {
            match notice.kind {
                NoticeKind::Info => self.set_status(format!("✓ {}", notice.text), MessageType::Success),
                NoticeKind::Error => self.set_status(format!("✗ {}", notice.text), MessageType::Error),
            }
        }
    }

    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while !self.should_quit {
            self.check_and_clear_expired_status();
            self.poll_in_flight();

            if self.controller.is_loading() {
                self.spinner_frame = self.spinner_frame.wrapping_add(1);
                self.needs_redraw = true;
            }

            // Draw if dirty or if it's been >100ms (for terminal resize handling)
            let now = Instant::now();
            let elapsed = now.duration_since(self.last_draw_time);
            if self.needs_redraw || elapsed >= Duration::from_millis(100) {
                terminal.draw(|f| render_ui(f, &self.render_state()))?;
                self.needs_redraw = false;
                self.last_draw_time = now;
            }

            let action = poll_event(Duration::from_millis(100))?;
            self.handle_action(action);
        }

        if self.in_flight.is_some() {
            tracing::info!("Exiting with a search still in flight, its result is discarded");
        }

        Ok(())
    }

    fn render_state(&self) -> RenderState<'_> {
        RenderState {
            palette: Palette::for_mode(self.theme),
            query: self.controller.query(),
            category: self.controller.active_category(),
            loading: self.controller.is_loading(),
            spinner_frame: self.spinner_frame,
            result: self.controller.result(),
            history: self.controller.history(),
            suggestions: self.controller.suggestions(),
            overlay: self.overlay,
            history_selected: self.history_selected,
            source_selected: self.source_selected,
            summary_scroll: self.summary_scroll,
            status_message: self.status_message.as_ref(),
        }
    }

    fn start_search(&mut self) {
        match self.controller.begin_submit(None, None) {
            Ok(pending) => {
                let (tx, rx) = oneshot::channel();
                let client = self.controller.client().clone();
                let query = pending.query.clone();
                let category = pending.category;

                self.runtime.spawn(async move {
                    let outcome = client.conduct_research(&query, category).await;
                    // Receiver is gone only if the app already exited
                    let _ = tx.send(outcome);
                });

                self.in_flight = Some(InFlight { pending, receiver: rx });
                self.overlay = Overlay::None;
                self.status_message = None;
            }
            Err(SubmitError::Busy) => {
                self.set_status("✗ A search is already running", MessageType::Error);
            }
            Err(SubmitError::EmptyQuery) => {
                self.set_status("✗ Type something to research first", MessageType::Error);
            }
        }
        self.needs_redraw = true;
    }

    /// Hand a finished request back to the controller
    fn poll_in_flight(&mut self) {
        let Some(in_flight) = self.in_flight.as_mut() else {
            return;
        };

        let outcome = match in_flight.receiver.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Closed) => {
                Err(ResearchError::request_failed("Search task ended without a result"))
            }
        };

        let Some(in_flight) = self.in_flight.take() else {
            return;
        };
        if self.controller.finish_submit(in_flight.pending, outcome).is_ok() {
            self.source_selected = 0;
            self.summary_scroll = 0;
            self.history_selected = 0;
        }
        self.surface_notice();
        self.needs_redraw = true;
    }

    /// Handle a user action (extracted for testing)
    fn handle_action(&mut self, action: Action) {
        if action == Action::None {
            return;
        }
        self.needs_redraw = true;

        if action == Action::Quit {
            self.should_quit = true;
            return;
        }
        if action == Action::ToggleTheme {
            self.toggle_theme();
            return;
        }

        // The loading overlay owns the screen until the request settles
        if self.controller.is_loading() {
            if action == Action::Submit {
                self.start_search();
            }
            return;
        }

        match self.overlay {
            Overlay::ConfirmClear => self.handle_confirm_action(action),
            Overlay::History => self.handle_history_action(action),
            Overlay::None => self.handle_main_action(action),
        }
    }

    fn handle_confirm_action(&mut self, action: Action) {
        match action {
            Action::Input('y') | Action::Input('Y') | Action::Submit => {
                self.controller.clear_history();
                self.history_selected = 0;
                self.overlay = Overlay::None;
                self.surface_notice();
            }
            Action::Input('n') | Action::Input('N') | Action::Back => {
                self.overlay = Overlay::None;
            }
            _ => {}
        }
    }

    fn handle_history_action(&mut self, action: Action) {
        let count = self.controller.history().len();
        match action {
            Action::Back | Action::ToggleHistory => self.overlay = Overlay::None,
            Action::MoveUp => self.history_selected = step(self.history_selected, -1, count),
            Action::MoveDown => self.history_selected = step(self.history_selected, 1, count),
            Action::Submit => self.open_selected_history(),
            Action::DeleteEntry => self.delete_selected_history(),
            Action::ClearHistory => self.request_clear(),
            _ => {}
        }
    }

    fn handle_main_action(&mut self, action: Action) {
        match action {
            Action::Back => self.back(),
            Action::Submit => self.start_search(),
            Action::Input(c) => {
                if self.controller.query().chars().count() < MAX_QUERY_CHARS {
                    self.controller.push_query_char(c);
                }
            }
            Action::DeleteChar => {
                self.controller.pop_query_char();
            }
            Action::CycleCategory => {
                let next = self.controller.active_category().next();
                self.controller.select_category(next);
            }
            Action::Suggestion(idx) => {
                if let Some(suggestion) = self.controller.suggestions().get(idx) {
                    self.controller.apply_suggestion(suggestion);
                }
            }
            Action::ToggleHistory => {
                self.overlay = Overlay::History;
                self.history_selected = 0;
            }
            Action::ClearHistory => self.request_clear(),
            Action::MoveUp => self.source_selected = step(self.source_selected, -1, self.source_count()),
            Action::MoveDown => self.source_selected = step(self.source_selected, 1, self.source_count()),
            Action::ScrollUp => self.summary_scroll = self.summary_scroll.saturating_sub(SCROLL_STEP),
            Action::ScrollDown => self.summary_scroll = self.summary_scroll.saturating_add(SCROLL_STEP),
            Action::CopySource => self.copy_selected_source(),
            _ => {}
        }
    }

    /// Esc unwinds one level: result view, then query text, then the app
    fn back(&mut self) {
        if self.controller.result().is_some() {
            self.controller.reset();
            self.source_selected = 0;
            self.summary_scroll = 0;
        } else if !self.controller.query().is_empty() {
            self.controller.set_query("");
        } else {
            self.should_quit = true;
        }
    }

    fn source_count(&self) -> usize {
        self.controller.result().map(|r| r.sources.len()).unwrap_or(0)
    }

    fn request_clear(&mut self) {
        if self.controller.history().is_empty() {
            self.set_status("✗ History is already empty", MessageType::Error);
        } else {
            self.overlay = Overlay::ConfirmClear;
        }
    }

    fn open_selected_history(&mut self) {
        let Some(id) = self.controller.history().get(self.history_selected).map(|h| h.id.clone())
        else {
            return;
        };

        if self.controller.select_history(&id) {
            self.overlay = Overlay::None;
            self.source_selected = 0;
            self.summary_scroll = 0;
        }
    }

    fn delete_selected_history(&mut self) {
        let Some(id) = self.controller.history().get(self.history_selected).map(|h| h.id.clone())
        else {
            return;
        };

        if self.controller.delete_history(&id) {
            let remaining = self.controller.history().len();
            self.history_selected = self.history_selected.min(remaining.saturating_sub(1));
            self.set_status("✓ Entry removed", MessageType::Success);
        }
        // A persistence failure overrides the confirmation
        self.surface_notice();
    }

    fn copy_selected_source(&mut self) {
        let Some(result) = self.controller.result() else {
            self.set_status("✗ No result to copy from", MessageType::Error);
            return;
        };
        let Some(source) = result.sources.get(self.source_selected) else {
            self.set_status("✗ No sources to copy", MessageType::Error);
            return;
        };

        match copy_source(source) {
            Ok(()) => self.set_status("✓ Link copied to clipboard", MessageType::Success),
            Err(e) => self.set_status(format!("✗ Clipboard error: {}", e), MessageType::Error),
        }
    }

    fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        match save_theme(self.preferences.as_ref(), self.theme) {
            Ok(()) => self.set_status(format!("✓ {} theme", self.theme), MessageType::Success),
            Err(e) => {
                tracing::warn!(error = %format!("{:#}", e), "Theme preference not saved");
                self.set_status("✗ Theme could not be saved", MessageType::Error);
            }
        }
    }
}

/// Move a list selection by `delta`, clamped to `[0, total)`
fn step(current: usize, delta: isize, total: usize) -> usize {
    if total == 0 {
        return 0;
    }
    current.saturating_add_signed(delta).min(total - 1)
}
