//! The search field state machine.
//!
//! [`SearchFieldController`] owns the candidate list, the current results
//! and the panel geometry. The host forwards input events to it (text
//! changes, focus, return key, row taps, keyboard notifications, expired
//! timers) and it answers by driving a [`PanelView`].
//!
//! # Timers
//!
//! The controller schedules on a [`Scheduler`] it does not drive. The host
//! loop collects expired ids from its [`TimerManager`] and routes each one
//! through [`SearchFieldController::handle_timer`]:
//!
//! ```ignore
//! let expired = timers.borrow_mut().process_expired();
//! for id in expired {
//!     controller.borrow_mut().handle_timer(id);
//! }
//! ```
//!
//! # Re-entrancy
//!
//! The selection handler and `typing_stopped` slots run while the
//! controller is mutably borrowed. When the controller lives in an
//! `Rc<RefCell<_>>`, they must defer any call back into it. A selection
//! handler that only wants to change the field's text returns it instead.
//!
//! [`TimerManager`]: horizon_suggest_core::TimerManager

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use horizon_suggest_core::{ConnectionGuard, Scheduler, Signal, TimerId};

use crate::animation::FrameTransition;
use crate::candidate::{AnnotatedResult, Candidate};
use crate::config::SearchFieldConfig;
use crate::debounce::DebounceTimer;
use crate::geometry::Rect;
use crate::inline::InlineCompletionResolver;
use crate::matcher::{FilterMode, MatchEngine};
use crate::placement::{Direction, PanelPlacement};
use crate::theme::{HighlightStyle, Theme};
use crate::view::{KeyboardEvent, PanelRow, PanelStyle, PanelUpdate, PanelView, RowKind};

/// How long keyboard frame changes settle before the panel follows them.
pub const KEYBOARD_SETTLE_DELAY: Duration = Duration::from_millis(100);

/// Called when the user picks a result: all current results and the index
/// of the chosen one. Returning `Some` commits that text to the field.
pub type SelectionHandler = Box<dyn FnMut(&[AnnotatedResult], usize) -> Option<String>>;

/// Whether the field is being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldState {
    #[default]
    Idle,
    Editing,
}

/// Drives a search field's suggestions.
pub struct SearchFieldController {
    config: SearchFieldConfig,
    theme: Theme,
    highlight: HighlightStyle,
    header_height: Option<f32>,
    engine: MatchEngine,
    placement: PanelPlacement,
    inline: InlineCompletionResolver,
    debounce: DebounceTimer,
    scheduler: Box<dyn Scheduler>,
    view: Box<dyn PanelView>,

    state: FieldState,
    text: String,
    candidates: Vec<Candidate>,
    row_kind: RowKind,
    results: Vec<AnnotatedResult>,
    interacted_with: bool,
    ghost_text: Option<String>,
    loading: bool,

    anchor_frame: Rect,
    viewport_bounds: Rect,
    keyboard_showing: bool,
    keyboard_frame: Option<Rect>,
    pending_keyboard: Option<(TimerId, Rect)>,
    direction: Direction,
    panel_visible: bool,

    selection_handler: Option<SelectionHandler>,
    typing_stopped: Signal<()>,
    subscriptions: Vec<ConnectionGuard<KeyboardEvent>>,
}

impl SearchFieldController {
    /// Create a controller with the light theme.
    pub fn new(
        config: SearchFieldConfig,
        scheduler: impl Scheduler + 'static,
        view: impl PanelView + 'static,
    ) -> Self {
        Self::with_theme(config, Theme::light(), scheduler, view)
    }

    /// Create a controller with a specific theme.
    pub fn with_theme(
        config: SearchFieldConfig,
        theme: Theme,
        scheduler: impl Scheduler + 'static,
        view: impl PanelView + 'static,
    ) -> Self {
        let engine = MatchEngine::new(config.match_options());
        let placement = PanelPlacement::new(config.placement_metrics(theme.row_height));
        let debounce = DebounceTimer::new(config.typing_stopped_duration());
        let interacted_with = config.start_visible_without_interaction;
        let highlight = HighlightStyle::title(&theme);

        Self {
            config,
            theme,
            highlight,
            header_height: None,
            engine,
            placement,
            inline: InlineCompletionResolver::new(),
            debounce,
            scheduler: Box::new(scheduler),
            view: Box::new(view),
            state: FieldState::Idle,
            text: String::new(),
            candidates: Vec::new(),
            row_kind: RowKind::Standard,
            results: Vec::new(),
            interacted_with,
            ghost_text: None,
            loading: false,
            anchor_frame: Rect::ZERO,
            viewport_bounds: Rect::ZERO,
            keyboard_showing: false,
            keyboard_frame: None,
            pending_keyboard: None,
            direction: Direction::Down,
            panel_visible: false,
            selection_handler: None,
            typing_stopped: Signal::new(),
            subscriptions: Vec::new(),
        }
    }

    // =========================================================================
    // Subscriptions
    // =========================================================================

    /// Subscribe `this` to the host's keyboard notifications.
    ///
    /// The subscription holds only a weak reference and is released by
    /// [`detach`](Self::detach) or when the controller is dropped.
    pub fn attach(this: &Rc<RefCell<Self>>, keyboard_events: &Signal<KeyboardEvent>) {
        let weak = Rc::downgrade(this);
        let guard = keyboard_events.connect_scoped(move |event: &KeyboardEvent| {
            let Some(controller) = weak.upgrade() else {
                return;
            };
            match controller.try_borrow_mut() {
                Ok(mut controller) => controller.on_keyboard_event(*event),
                Err(_) => tracing::warn!(
                    target: "horizon_suggest::controller",
                    ?event,
                    "keyboard event delivered re-entrantly, dropped"
                ),
            }
        });
        this.borrow_mut().subscriptions.push(guard);
    }

    /// Drop all subscriptions and cancel outstanding timers.
    ///
    /// Safe to call any number of times.
    pub fn detach(&mut self) {
        self.debounce.on_destroy(&mut *self.scheduler);
        if let Some((id, _)) = self.pending_keyboard.take() {
            self.scheduler.cancel(id);
        }
        for mut guard in self.subscriptions.drain(..) {
            guard.disconnect();
        }
        tracing::debug!(target: "horizon_suggest::controller", "controller detached");
    }

    /// Whether any keyboard subscription is live.
    pub fn is_attached(&self) -> bool {
        self.subscriptions.iter().any(ConnectionGuard::is_connected)
    }

    // =========================================================================
    // Callbacks
    // =========================================================================

    /// Register the handler called when a result is picked. Without one, the
    /// picked title is committed to the field.
    pub fn set_selection_handler<F>(&mut self, handler: F)
    where
        F: FnMut(&[AnnotatedResult], usize) -> Option<String> + 'static,
    {
        self.selection_handler = Some(Box::new(handler));
    }

    /// Remove the selection handler.
    pub fn clear_selection_handler(&mut self) {
        self.selection_handler = None;
    }

    /// Emitted once the user pauses typing for the configured delay.
    pub fn typing_stopped(&self) -> &Signal<()> {
        &self.typing_stopped
    }

    // =========================================================================
    // Input events
    // =========================================================================

    /// The field's text changed.
    pub fn on_text_changed(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
        self.interacted_with = true;
        self.debounce.on_keystroke(&mut *self.scheduler);

        self.refilter();
        if self.text.is_empty() {
            self.render();
        } else {
            self.reposition();
        }
    }

    /// The field started editing.
    pub fn on_focus_gained(&mut self) {
        self.set_state(FieldState::Editing);
        self.interacted_with = true;

        if (self.config.start_visible || self.config.start_visible_without_interaction)
            && self.text.is_empty()
        {
            self.results.clear();
            self.filter(true);
        }
        self.render();
    }

    /// The field stopped editing.
    pub fn on_focus_lost(&mut self) {
        self.set_state(FieldState::Idle);
        self.results.clear();
        self.render();
    }

    /// The user pressed return: pick the first result.
    pub fn on_return_key_pressed(&mut self) {
        if self.results.is_empty() {
            return;
        }

        if let Some(handler) = self.selection_handler.as_mut() {
            if let Some(text) = handler(&self.results, 0) {
                self.commit(text);
            }
            return;
        }

        let title = self.results[0].title();
        let committed = match self.inline_trigger() {
            Some(trigger) => {
                let head = self
                    .text
                    .split_once(trigger)
                    .map_or(self.text.as_str(), |(head, _)| head);
                format!("{head}{trigger}{title}")
            }
            None => title.to_string(),
        };
        self.commit(committed);
        self.clear_ghost_text();
    }

    /// The user tapped the row at `index` of the current results.
    pub fn on_row_selected(&mut self, index: usize) {
        let Some(result) = self.results.get(index) else {
            tracing::trace!(
                target: "horizon_suggest::controller",
                index,
                results = self.results.len(),
                "row selection out of range"
            );
            return;
        };

        let committed = match self.selection_handler.as_mut() {
            Some(handler) => handler(&self.results, index),
            None => Some(result.title().to_string()),
        };
        if let Some(text) = committed {
            self.commit(text);
        }

        self.results.clear();
        self.render();
    }

    /// Dispatch a keyboard notification.
    pub fn on_keyboard_event(&mut self, event: KeyboardEvent) {
        match event {
            KeyboardEvent::Shown(frame) => self.on_keyboard_shown(frame),
            KeyboardEvent::Hidden => self.on_keyboard_hidden(),
            KeyboardEvent::FrameChanged(frame) => self.on_keyboard_frame_changed(frame),
        }
    }

    /// The on-screen keyboard appeared.
    pub fn on_keyboard_shown(&mut self, frame: Rect) {
        if self.state != FieldState::Editing || self.keyboard_showing {
            return;
        }
        self.keyboard_showing = true;
        self.keyboard_frame = Some(frame);
        self.interacted_with = true;
        tracing::debug!(target: "horizon_suggest::controller", ?frame, "keyboard shown");
        self.reposition();
    }

    /// The keyboard frame moved. Applied after it settles.
    pub fn on_keyboard_frame_changed(&mut self, frame: Rect) {
        if let Some((previous, _)) = self.pending_keyboard.take() {
            self.scheduler.cancel(previous);
        }
        let id = self.scheduler.start_one_shot(KEYBOARD_SETTLE_DELAY);
        self.pending_keyboard = Some((id, frame));
    }

    /// The on-screen keyboard went away.
    pub fn on_keyboard_hidden(&mut self) {
        if !self.keyboard_showing {
            return;
        }
        self.keyboard_showing = false;
        self.keyboard_frame = None;
        self.direction = Direction::Down;
        tracing::debug!(target: "horizon_suggest::controller", "keyboard hidden");
        self.render();
    }

    /// Route an expired timer. Returns `true` if it belonged to this
    /// controller.
    pub fn handle_timer(&mut self, id: TimerId) -> bool {
        if self.debounce.handle_timer(id) {
            tracing::debug!(target: "horizon_suggest::controller", "typing stopped");
            self.typing_stopped.emit(());
            return true;
        }

        match self.pending_keyboard {
            Some((pending, frame)) if pending == id => {
                self.pending_keyboard = None;
                self.keyboard_frame = Some(frame);
                self.reposition();
                true
            }
            _ => false,
        }
    }

    // =========================================================================
    // Data and presentation
    // =========================================================================

    /// Replace the candidates with structured items.
    pub fn set_candidates(&mut self, candidates: Vec<Candidate>) {
        self.replace_candidates(candidates, RowKind::Standard);
    }

    /// Replace the candidates with plain strings.
    pub fn set_strings<I, S>(&mut self, strings: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let candidates = strings.into_iter().map(Candidate::new).collect();
        self.replace_candidates(candidates, RowKind::SingleLine);
    }

    /// Switch themes. The highlight style keeps everything but its font
    /// size, which follows the new theme.
    pub fn apply_theme(&mut self, theme: Theme) {
        self.placement.metrics_mut().row_height = theme.row_height;
        self.highlight = self.highlight.resized_for(&theme);
        self.theme = theme;
        self.render();
    }

    /// Set how matched title text is emphasized. Subtitle matches use a
    /// scaled-down copy.
    pub fn set_highlight_style(&mut self, style: HighlightStyle) {
        self.highlight = style;
        self.render();
    }

    /// Reserve room for a header above the results, or remove it.
    pub fn set_results_header(&mut self, height: Option<f32>) {
        self.header_height = height.filter(|height| *height > 0.0);
        self.render();
    }

    /// Change configuration in place and resync everything derived from it,
    /// including the current results.
    pub fn update_config(&mut self, update: impl FnOnce(&mut SearchFieldConfig)) {
        let was_start_visible = self.config.start_visible_without_interaction;
        update(&mut self.config);
        *self.engine.options_mut() = self.config.match_options();
        *self.placement.metrics_mut() = self.config.placement_metrics(self.theme.row_height);
        self.debounce.set_delay(self.config.typing_stopped_duration());

        if self.config.start_visible_without_interaction && !was_start_visible {
            self.interacted_with = true;
        }
        self.refilter();
        self.reposition();
    }

    /// Show all candidates even before any interaction.
    pub fn set_start_visible_without_interaction(&mut self, enabled: bool) {
        self.config.start_visible_without_interaction = enabled;
        if enabled {
            let text = std::mem::take(&mut self.text);
            self.on_text_changed(&text);
        }
    }

    /// The field's frame in window coordinates.
    pub fn set_anchor_frame(&mut self, frame: Rect) {
        self.anchor_frame = frame;
        self.reposition();
    }

    /// The window's bounds.
    pub fn set_viewport_bounds(&mut self, bounds: Rect) {
        self.viewport_bounds = bounds;
        self.reposition();
    }

    /// Collapse the panel without clearing the results.
    pub fn hide_results_list(&mut self) {
        if self.panel_visible {
            self.view.hide_panel(FrameTransition::PANEL);
            self.panel_visible = false;
        }
    }

    pub fn show_loading_indicator(&mut self) {
        self.loading = true;
        self.view.set_loading(true);
    }

    pub fn stop_loading_indicator(&mut self) {
        self.loading = false;
        self.view.set_loading(false);
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn text(&self) -> &str {
        &self.text
    }

    /// All current results.
    pub fn results(&self) -> &[AnnotatedResult] {
        &self.results
    }

    /// The results that get a row, after the `max_results` cap.
    pub fn visible_rows(&self) -> &[AnnotatedResult] {
        match self.config.max_results {
            0 => &self.results,
            max => &self.results[..self.results.len().min(max)],
        }
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn row_kind(&self) -> RowKind {
        self.row_kind
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn state(&self) -> FieldState {
        self.state
    }

    pub fn is_panel_visible(&self) -> bool {
        self.panel_visible
    }

    pub fn ghost_text(&self) -> Option<&str> {
        self.ghost_text.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_keyboard_showing(&self) -> bool {
        self.keyboard_showing
    }

    pub fn keyboard_frame(&self) -> Option<Rect> {
        self.keyboard_frame
    }

    pub fn has_interacted(&self) -> bool {
        self.interacted_with
    }

    pub fn config(&self) -> &SearchFieldConfig {
        &self.config
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn highlight_style(&self) -> &HighlightStyle {
        &self.highlight
    }

    pub fn results_header(&self) -> Option<f32> {
        self.header_height
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn set_state(&mut self, state: FieldState) {
        if self.state != state {
            tracing::debug!(target: "horizon_suggest::controller", from = ?self.state, to = ?state, "field state");
            self.state = state;
        }
    }

    fn replace_candidates(&mut self, candidates: Vec<Candidate>, kind: RowKind) {
        tracing::debug!(
            target: "horizon_suggest::controller",
            count = candidates.len(),
            ?kind,
            "candidates replaced"
        );
        self.candidates = candidates;
        self.row_kind = kind;
        self.filter(self.config.force_no_filtering);
        self.render();

        if self.config.start_visible_without_interaction {
            let text = std::mem::take(&mut self.text);
            self.on_text_changed(&text);
        }
    }

    fn filter_mode(&self) -> FilterMode {
        if self.config.inline_mode {
            FilterMode::Inline
        } else {
            FilterMode::Standard
        }
    }

    /// Recompute the results for the current text.
    fn refilter(&mut self) {
        if self.text.is_empty() {
            self.results.clear();
            if self.config.start_visible || self.config.start_visible_without_interaction {
                self.filter(true);
            }
        } else {
            self.filter(self.config.force_no_filtering);
        }
    }

    fn filter(&mut self, force_show_all: bool) {
        self.results =
            self.engine
                .filter(&self.text, &self.candidates, self.filter_mode(), force_show_all);
    }

    fn inline_trigger(&self) -> Option<&str> {
        if !self.config.inline_mode {
            return None;
        }
        self.config
            .start_filtering_after
            .as_deref()
            .filter(|trigger| !trigger.is_empty())
    }

    fn commit(&mut self, text: String) {
        tracing::debug!(target: "horizon_suggest::controller", text = %text, "committing selection");
        self.text = text;
        self.view.set_input_text(&self.text);
    }

    fn active_keyboard(&self) -> Option<Rect> {
        if self.keyboard_showing { self.keyboard_frame } else { None }
    }

    fn reposition(&mut self) {
        let direction =
            self.placement
                .decide_direction(self.anchor_frame, self.viewport_bounds, self.active_keyboard());
        if direction != self.direction {
            tracing::debug!(target: "horizon_suggest::controller", ?direction, "panel direction changed");
            self.direction = direction;
        }
        self.render();
    }

    fn build_rows(&self) -> Vec<PanelRow> {
        self.visible_rows()
            .iter()
            .map(|result| match self.row_kind {
                RowKind::Standard => PanelRow {
                    kind: RowKind::Standard,
                    title: result.title().to_string(),
                    subtitle: result.candidate.subtitle().map(str::to_string),
                    image: result.candidate.image(),
                    title_span: result.title_span,
                    subtitle_span: result.subtitle_span,
                },
                RowKind::SingleLine => PanelRow {
                    kind: RowKind::SingleLine,
                    title: result.title().to_string(),
                    subtitle: None,
                    image: None,
                    title_span: None,
                    subtitle_span: None,
                },
            })
            .collect()
    }

    fn render(&mut self) {
        if self.config.inline_mode {
            self.refresh_ghost_text();
            if self.panel_visible {
                self.view.hide_panel(FrameTransition::IMMEDIATE);
                self.panel_visible = false;
            }
            return;
        }

        self.clear_ghost_text();

        if !self.interacted_with || self.results.is_empty() {
            if self.panel_visible {
                self.view.hide_panel(FrameTransition::IMMEDIATE);
                self.panel_visible = false;
            }
            return;
        }

        let rows = self.build_rows();
        let content_height =
            rows.len() as f32 * self.theme.row_height + self.header_height.unwrap_or(0.0);
        let placed = self.placement.layout(
            self.direction,
            self.anchor_frame,
            self.viewport_bounds,
            self.active_keyboard(),
            content_height,
            self.config.max_panel_height,
        );

        let update = PanelUpdate {
            frame: placed.frame,
            shadow: placed.shadow,
            direction: placed.direction,
            transition: FrameTransition::PANEL,
            rows,
            header_height: self.header_height,
            style: PanelStyle::new(
                &self.theme,
                &self.highlight,
                self.config.corner_radius,
                self.config.force_right_to_left,
            ),
        };
        tracing::trace!(
            target: "horizon_suggest::controller",
            rows = update.rows.len(),
            frame = ?update.frame,
            "showing panel"
        );
        self.view.show_panel(&update);
        self.panel_visible = true;
    }

    fn clear_ghost_text(&mut self) {
        if self.ghost_text.take().is_some() {
            self.view.set_ghost_text(None, None);
        }
    }

    fn refresh_ghost_text(&mut self) {
        let ghost = self.inline.resolve(&self.text, &self.results);

        let frame = ghost.as_ref().and_then(|_| {
            self.view
                .text_geometry()
                .map(|geometry| self.inline.ghost_frame(geometry.placeholder, geometry.caret, geometry.text))
        });

        if ghost != self.ghost_text || ghost.is_some() {
            self.view.set_ghost_text(ghost.as_deref(), frame);
        }
        self.ghost_text = ghost;
    }
}

impl Drop for SearchFieldController {
    fn drop(&mut self) {
        self.detach();
    }
}

impl fmt::Debug for SearchFieldController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchFieldController")
            .field("state", &self.state)
            .field("text", &self.text)
            .field("candidates", &self.candidates.len())
            .field("results", &self.results.len())
            .field("direction", &self.direction)
            .field("panel_visible", &self.panel_visible)
            .field("keyboard_showing", &self.keyboard_showing)
            .finish_non_exhaustive()
    }
}
