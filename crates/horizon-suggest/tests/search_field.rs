//! End-to-end behavior of the search field controller.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use horizon_suggest::logging::filter_directive;
use horizon_suggest::prelude::*;
use horizon_suggest::theme::HighlightStyle;

const VIEWPORT: Rect = Rect::new(0.0, 0.0, 320.0, 640.0);
const LOWER_HALF_KEYBOARD: Rect = Rect::new(0.0, 320.0, 320.0, 320.0);

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter_directive("trace"))
        .with_test_writer()
        .try_init();
}

#[derive(Debug, Clone, PartialEq)]
enum ViewCall {
    Show(PanelUpdate),
    Hide(FrameTransition),
    Ghost(Option<String>, Option<Rect>),
    Input(String),
    Loading(bool),
}

#[derive(Clone, Default)]
struct RecordingView {
    calls: Rc<RefCell<Vec<ViewCall>>>,
    geometry: Option<TextGeometry>,
}

impl RecordingView {
    fn calls(&self) -> Vec<ViewCall> {
        self.calls.borrow().clone()
    }

    fn clear(&self) {
        self.calls.borrow_mut().clear();
    }

    fn last_update(&self) -> Option<PanelUpdate> {
        self.calls.borrow().iter().rev().find_map(|call| match call {
            ViewCall::Show(update) => Some(update.clone()),
            _ => None,
        })
    }

    fn shown_count(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| matches!(call, ViewCall::Show(_)))
            .count()
    }
}

impl PanelView for RecordingView {
    fn show_panel(&mut self, update: &PanelUpdate) {
        self.calls.borrow_mut().push(ViewCall::Show(update.clone()));
    }

    fn hide_panel(&mut self, transition: FrameTransition) {
        self.calls.borrow_mut().push(ViewCall::Hide(transition));
    }

    fn set_ghost_text(&mut self, text: Option<&str>, frame: Option<Rect>) {
        self.calls
            .borrow_mut()
            .push(ViewCall::Ghost(text.map(str::to_string), frame));
    }

    fn set_input_text(&mut self, text: &str) {
        self.calls.borrow_mut().push(ViewCall::Input(text.to_string()));
    }

    fn set_loading(&mut self, loading: bool) {
        self.calls.borrow_mut().push(ViewCall::Loading(loading));
    }

    fn text_geometry(&self) -> Option<TextGeometry> {
        self.geometry
    }
}

struct Harness {
    field: SearchFieldController,
    timers: Rc<RefCell<TimerManager<ManualClock>>>,
    clock: ManualClock,
    view: RecordingView,
}

impl Harness {
    fn new(config: SearchFieldConfig) -> Self {
        Self::with_view(config, RecordingView::default())
    }

    fn with_view(config: SearchFieldConfig, view: RecordingView) -> Self {
        init_tracing();
        let clock = ManualClock::new();
        let timers = Rc::new(RefCell::new(TimerManager::with_clock(clock.clone())));
        let mut field = SearchFieldController::new(config, timers.clone(), view.clone());
        field.set_viewport_bounds(VIEWPORT);
        field.set_anchor_frame(Rect::new(10.0, 100.0, 300.0, 40.0));

        Self {
            field,
            timers,
            clock,
            view,
        }
    }

    /// Advance time and route every expired timer to the field.
    fn advance(&mut self, by: Duration) -> usize {
        self.clock.advance(by);
        let expired = self.timers.borrow_mut().process_expired();
        expired
            .into_iter()
            .filter(|&id| self.field.handle_timer(id))
            .count()
    }

    fn titles(&self) -> Vec<String> {
        self.field
            .results()
            .iter()
            .map(|result| result.title().to_string())
            .collect()
    }
}

fn cities() -> Vec<Candidate> {
    vec![
        Candidate::new("Paris").with_subtitle("France"),
        Candidate::new("Berlin").with_subtitle("Germany"),
        Candidate::new("Madrid").with_subtitle("Spain"),
    ]
}

// =============================================================================
// Filtering
// =============================================================================

#[test]
fn test_start_visible_shows_everything_without_spans() {
    let mut h = Harness::new(SearchFieldConfig {
        start_visible: true,
        ..SearchFieldConfig::default()
    });
    h.field.set_candidates(cities());
    assert!(!h.field.is_panel_visible());

    h.field.on_focus_gained();

    assert_eq!(h.titles(), ["Paris", "Berlin", "Madrid"]);
    let update = h.view.last_update().unwrap();
    assert_eq!(update.rows.len(), 3);
    assert!(
        update
            .rows
            .iter()
            .all(|row| row.title_span.is_none() && row.subtitle_span.is_none())
    );
}

#[test]
fn test_start_visible_without_interaction() {
    let mut h = Harness::new(SearchFieldConfig::default());
    h.field.set_candidates(cities());
    assert!(!h.field.is_panel_visible());

    h.field.set_start_visible_without_interaction(true);
    assert!(h.field.is_panel_visible());
    assert_eq!(h.field.state(), FieldState::Idle);
    assert_eq!(h.titles(), ["Paris", "Berlin", "Madrid"]);

    // New candidates re-run the change with the current (empty) text.
    h.field.set_strings(["Rome", "Oslo"]);
    assert_eq!(h.titles(), ["Rome", "Oslo"]);
    assert_eq!(h.view.last_update().unwrap().rows[0].kind, RowKind::SingleLine);
}

#[test]
fn test_min_length_gate() {
    let mut h = Harness::new(SearchFieldConfig {
        min_characters_to_start_filtering: 3,
        force_no_filtering: true,
        ..SearchFieldConfig::default()
    });
    h.field.set_candidates(cities());
    h.field.on_focus_gained();

    h.field.on_text_changed("pa");
    assert!(h.field.results().is_empty());
    assert!(!h.field.is_panel_visible());

    h.field.on_text_changed("par");
    assert_eq!(h.field.results().len(), 3);
    assert!(h.field.is_panel_visible());
}

#[test]
fn test_standard_scenario_spans() {
    let mut h = Harness::new(SearchFieldConfig::default());
    h.field.set_candidates(cities());
    h.field.on_focus_gained();
    h.field.on_text_changed("ri");

    assert_eq!(h.titles(), ["Paris", "Madrid"]);
    let update = h.view.last_update().unwrap();
    assert_eq!(update.rows[0].title_span, Some(HighlightSpan::new(2, 2)));
    assert_eq!(update.rows[1].title_span, Some(HighlightSpan::new(3, 2)));
    assert_eq!(update.rows[1].subtitle.as_deref(), Some("Spain"));
}

#[test]
fn test_subtitle_match_highlights_subtitle() {
    let mut h = Harness::new(SearchFieldConfig::default());
    h.field.set_candidates(cities());
    h.field.on_focus_gained();
    h.field.on_text_changed("GERM");

    assert_eq!(h.titles(), ["Berlin"]);
    let row = &h.view.last_update().unwrap().rows[0];
    assert_eq!(row.title_span, None);
    assert_eq!(row.subtitle_span, Some(HighlightSpan::new(0, 4)));
}

#[test]
fn test_clearing_text_hides_panel() {
    let mut h = Harness::new(SearchFieldConfig::default());
    h.field.set_candidates(cities());
    h.field.on_focus_gained();
    h.field.on_text_changed("a");
    assert!(h.field.is_panel_visible());

    h.field.on_text_changed("");
    assert!(h.field.results().is_empty());
    assert!(!h.field.is_panel_visible());
    assert_eq!(
        h.view.calls().last(),
        Some(&ViewCall::Hide(FrameTransition::IMMEDIATE))
    );
}

#[test]
fn test_max_results_truncates_rows() {
    let mut h = Harness::new(SearchFieldConfig {
        max_results: 2,
        ..SearchFieldConfig::default()
    });
    h.field.set_strings(["Paris", "Berlin", "Madrid", "Rome"]);
    h.field.on_focus_gained();
    h.field.on_text_changed("r");

    assert_eq!(h.field.results().len(), 4);
    assert_eq!(h.field.visible_rows().len(), 2);

    let update = h.view.last_update().unwrap();
    assert_eq!(update.rows.len(), 2);
    assert_eq!(update.frame.height(), 60.0);
}

#[test]
fn test_case_sensitive_comparison() {
    let mut h = Harness::new(SearchFieldConfig {
        comparison: ComparisonMode::CaseSensitive,
        ..SearchFieldConfig::default()
    });
    h.field.set_candidates(cities());
    h.field.on_focus_gained();

    h.field.on_text_changed("paris");
    assert!(h.field.results().is_empty());
    h.field.on_text_changed("Par");
    assert_eq!(h.titles(), ["Paris"]);
}

// =============================================================================
// Inline mode
// =============================================================================

fn inline_config(trigger: Option<&str>) -> SearchFieldConfig {
    SearchFieldConfig {
        inline_mode: true,
        start_filtering_after: trigger.map(str::to_string),
        ..SearchFieldConfig::default()
    }
}

fn text_geometry() -> TextGeometry {
    TextGeometry {
        placeholder: Rect::new(0.0, 4.0, 280.0, 22.0),
        caret: Rect::new(0.0, 4.0, 64.0, 22.0),
        text: Rect::new(8.0, 4.0, 264.0, 22.0),
    }
}

#[test]
fn test_inline_prefix_without_trigger() {
    let mut h = Harness::new(inline_config(None));
    h.field.set_strings(["Berlin", "Bern", "Paris"]);
    h.field.on_focus_gained();
    h.field.on_text_changed("bEr");

    assert_eq!(h.titles(), ["Berlin"]);
    assert_eq!(h.field.ghost_text(), Some("lin"));
    assert_eq!(h.view.shown_count(), 0);

    h.field.on_text_changed("x");
    assert!(h.field.results().is_empty());
    assert_eq!(h.field.ghost_text(), None);
}

#[test]
fn test_inline_trigger_and_commit() {
    let view = RecordingView {
        geometry: Some(text_geometry()),
        ..RecordingView::default()
    };
    let mut h = Harness::with_view(inline_config(Some("@")), view);
    h.field.set_strings(["gmail.com", "gmx.net", "hotmail.com"]);
    h.field.on_focus_gained();

    h.field.on_text_changed("john");
    assert_eq!(h.field.ghost_text(), None);
    h.field.on_text_changed("john@");
    assert_eq!(h.field.ghost_text(), None);

    h.field.on_text_changed("john@gma");
    assert_eq!(h.field.ghost_text(), Some("il.com"));
    assert_eq!(
        h.view.calls().last(),
        Some(&ViewCall::Ghost(
            Some("il.com".to_string()),
            Some(Rect::new(72.0, 4.0, 208.0, 22.0))
        ))
    );

    h.field.on_return_key_pressed();
    assert_eq!(h.field.text(), "john@gmail.com");
    assert!(h.view.calls().contains(&ViewCall::Input("john@gmail.com".to_string())));
    assert_eq!(h.view.shown_count(), 0);
}

#[test]
fn test_inline_trigger_suggest_immediately() {
    let mut config = inline_config(Some("@"));
    config.start_suggesting_immediately = true;
    let mut h = Harness::new(config);
    h.field.set_strings(["gmail.com", "hotmail.com"]);
    h.field.on_focus_gained();

    h.field.on_text_changed("john@");
    assert_eq!(h.field.ghost_text(), Some("gmail.com"));
}

#[test]
fn test_inline_commit_uses_text_before_first_trigger() {
    let mut h = Harness::new(inline_config(Some("@")));
    h.field.set_strings(["example.org"]);
    h.field.on_focus_gained();
    h.field.on_text_changed("a@b@ex");

    h.field.on_return_key_pressed();
    assert_eq!(h.field.text(), "a@example.org");
}

// =============================================================================
// Debounce
// =============================================================================

#[test]
fn test_typing_stopped_fires_once_after_burst() {
    let mut h = Harness::new(SearchFieldConfig::default());
    let fired = Rc::new(Cell::new(0));
    let counter = fired.clone();
    h.field
        .typing_stopped()
        .connect(move |_| counter.set(counter.get() + 1));

    let delay = h.field.config().typing_stopped_duration();
    let step = delay / 2;
    for (i, text) in ["p", "pa", "par", "pari", "paris"].into_iter().enumerate() {
        if i > 0 {
            h.advance(step);
        }
        h.field.on_text_changed(text);
    }
    assert_eq!(fired.get(), 0);

    assert_eq!(h.advance(delay - Duration::from_millis(1)), 0);
    assert_eq!(fired.get(), 0);
    assert_eq!(h.advance(Duration::from_millis(1)), 1);
    assert_eq!(fired.get(), 1);

    assert_eq!(h.advance(delay * 4), 0);
    assert_eq!(fired.get(), 1);
}

#[test]
fn test_typing_stopped_delay_from_config() {
    let mut h = Harness::new(SearchFieldConfig {
        typing_stopped_delay: 0.25,
        ..SearchFieldConfig::default()
    });
    let fired = Rc::new(Cell::new(false));
    let flag = fired.clone();
    h.field.typing_stopped().connect(move |_| flag.set(true));

    h.field.on_text_changed("a");
    h.advance(Duration::from_millis(249));
    assert!(!fired.get());
    h.advance(Duration::from_millis(1));
    assert!(fired.get());
}

// =============================================================================
// Placement and keyboard
// =============================================================================

#[test]
fn test_keyboard_over_lower_half_opens_upward() {
    let mut h = Harness::new(SearchFieldConfig::default());
    let anchor = Rect::new(10.0, 580.0, 300.0, 40.0);
    h.field.set_anchor_frame(anchor);
    h.field.set_strings(["Paris", "Berlin", "Madrid"]);
    h.field.on_focus_gained();
    h.field.on_keyboard_shown(LOWER_HALF_KEYBOARD);
    h.field.on_text_changed("a");

    assert_eq!(h.field.direction(), Direction::Up);
    let update = h.view.last_update().unwrap();
    assert_eq!(update.direction, Direction::Up);
    assert_eq!(update.frame.bottom(), anchor.top());
    assert_eq!(update.transition, FrameTransition::PANEL);
}

#[test]
fn test_top_anchor_without_keyboard_opens_downward() {
    let mut h = Harness::new(SearchFieldConfig::default());
    let anchor = Rect::new(10.0, 0.0, 300.0, 40.0);
    h.field.set_anchor_frame(anchor);
    h.field.set_strings(["Paris", "Berlin", "Madrid"]);
    h.field.on_focus_gained();
    h.field.on_text_changed("a");

    assert_eq!(h.field.direction(), Direction::Down);
    let update = h.view.last_update().unwrap();
    assert_eq!(update.frame, Rect::new(12.0, 42.0, 296.0, 60.0));
    assert_eq!(update.shadow, Rect::new(13.0, 42.0, 294.0, 1.0));
}

#[test]
fn test_keyboard_hidden_forces_down() {
    let mut h = Harness::new(SearchFieldConfig::default());
    h.field.set_anchor_frame(Rect::new(10.0, 580.0, 300.0, 40.0));
    h.field.set_strings(["Paris", "Madrid"]);
    h.field.on_focus_gained();
    h.field.on_keyboard_shown(LOWER_HALF_KEYBOARD);
    h.field.on_text_changed("a");
    assert_eq!(h.field.direction(), Direction::Up);

    h.field.on_keyboard_hidden();
    assert!(!h.field.is_keyboard_showing());
    assert_eq!(h.field.keyboard_frame(), None);
    assert_eq!(h.field.direction(), Direction::Down);

    // 20pt left below the field, minus the bottom margin.
    let update = h.view.last_update().unwrap();
    assert_eq!(update.direction, Direction::Down);
    assert_eq!(update.frame.height(), 10.0);
}

#[test]
fn test_keyboard_ignored_while_idle() {
    let mut h = Harness::new(SearchFieldConfig::default());
    h.field.on_keyboard_shown(LOWER_HALF_KEYBOARD);
    assert!(!h.field.is_keyboard_showing());
    assert!(!h.field.has_interacted());

    h.field.on_focus_gained();
    h.field.on_keyboard_shown(LOWER_HALF_KEYBOARD);
    assert!(h.field.is_keyboard_showing());

    // Already showing: later frames come through frame changes.
    h.field.on_keyboard_shown(Rect::new(0.0, 100.0, 320.0, 540.0));
    assert_eq!(h.field.keyboard_frame(), Some(LOWER_HALF_KEYBOARD));
}

#[test]
fn test_keyboard_frame_change_settles() {
    let mut h = Harness::new(SearchFieldConfig::default());
    h.field.set_anchor_frame(Rect::new(10.0, 200.0, 300.0, 40.0));
    h.field.set_strings(["Paris", "Madrid"]);
    h.field.on_focus_gained();
    h.field.on_keyboard_shown(Rect::new(0.0, 540.0, 320.0, 100.0));
    h.field.on_text_changed("a");
    assert_eq!(h.field.direction(), Direction::Down);

    let taller = Rect::new(0.0, 250.0, 320.0, 390.0);
    h.field.on_keyboard_frame_changed(taller);
    assert_eq!(h.advance(Duration::from_millis(99)), 0);
    assert_eq!(h.field.direction(), Direction::Down);

    assert_eq!(h.advance(Duration::from_millis(1)), 1);
    assert_eq!(h.field.keyboard_frame(), Some(taller));
    assert_eq!(h.field.direction(), Direction::Up);
}

#[test]
fn test_keyboard_events_through_subscription() {
    init_tracing();
    let clock = ManualClock::new();
    let timers = Rc::new(RefCell::new(TimerManager::with_clock(clock.clone())));
    let view = RecordingView::default();
    let field = Rc::new(RefCell::new(SearchFieldController::new(
        SearchFieldConfig::default(),
        timers.clone(),
        view,
    )));
    let keyboard = Signal::new();
    SearchFieldController::attach(&field, &keyboard);

    field.borrow_mut().on_focus_gained();
    keyboard.emit(KeyboardEvent::Shown(LOWER_HALF_KEYBOARD));
    assert!(field.borrow().is_keyboard_showing());

    keyboard.emit(KeyboardEvent::FrameChanged(Rect::new(0.0, 300.0, 320.0, 340.0)));
    assert_eq!(timers.borrow().active_count(), 1);

    keyboard.emit(KeyboardEvent::Hidden);
    assert!(!field.borrow().is_keyboard_showing());

    field.borrow_mut().detach();
    assert_eq!(keyboard.connection_count(), 0);
    assert_eq!(timers.borrow().active_count(), 0);

    keyboard.emit(KeyboardEvent::Shown(LOWER_HALF_KEYBOARD));
    assert!(!field.borrow().is_keyboard_showing());
}

// =============================================================================
// Selection
// =============================================================================

#[test]
fn test_row_selection_commits_title() {
    let mut h = Harness::new(SearchFieldConfig::default());
    h.field.set_candidates(cities());
    h.field.on_focus_gained();
    h.field.on_text_changed("ri");

    h.field.on_row_selected(1);
    assert_eq!(h.field.text(), "Madrid");
    assert!(h.field.results().is_empty());
    assert!(!h.field.is_panel_visible());
    assert!(h.view.calls().contains(&ViewCall::Input("Madrid".to_string())));
}

#[test]
fn test_row_selection_out_of_range_ignored() {
    let mut h = Harness::new(SearchFieldConfig::default());
    h.field.set_candidates(cities());
    h.field.on_focus_gained();
    h.field.on_text_changed("ri");
    h.view.clear();

    h.field.on_row_selected(7);
    assert_eq!(h.field.text(), "ri");
    assert_eq!(h.field.results().len(), 2);
    assert!(h.view.calls().is_empty());
}

#[test]
fn test_selection_handler_replaces_commit() {
    let mut h = Harness::new(SearchFieldConfig::default());
    let picked = Rc::new(RefCell::new(Vec::new()));
    let sink = picked.clone();
    h.field.set_selection_handler(move |results, index| {
        sink.borrow_mut()
            .push((results[index].title().to_string(), results.len()));
        None
    });
    h.field.set_candidates(cities());
    h.field.on_focus_gained();
    h.field.on_text_changed("ri");

    h.field.on_return_key_pressed();
    h.field.on_row_selected(1);

    assert_eq!(
        *picked.borrow(),
        vec![("Paris".to_string(), 2), ("Madrid".to_string(), 2)]
    );
    assert_eq!(h.field.text(), "ri");
    assert!(h.field.results().is_empty());
    assert!(!h.view.calls().iter().any(|call| matches!(call, ViewCall::Input(_))));
}

#[test]
fn test_selection_handler_returns_text_to_commit() {
    let mut h = Harness::new(SearchFieldConfig::default());
    h.field.set_selection_handler(|results, index| {
        let picked = &results[index].candidate;
        Some(format!("{}, {}", picked.title(), picked.subtitle().unwrap_or_default()))
    });
    h.field.set_candidates(cities());
    h.field.on_focus_gained();
    h.field.on_text_changed("ri");

    h.field.on_row_selected(1);
    assert_eq!(h.field.text(), "Madrid, Spain");
    assert!(h.view.calls().contains(&ViewCall::Input("Madrid, Spain".to_string())));
    assert!(!h.field.is_panel_visible());

    h.field.on_text_changed("par");
    h.field.on_return_key_pressed();
    assert_eq!(h.field.text(), "Paris, France");
}

#[test]
fn test_return_key_commits_first_result() {
    let mut h = Harness::new(SearchFieldConfig::default());
    h.field.set_candidates(cities());
    h.field.on_focus_gained();

    h.field.on_return_key_pressed();
    assert_eq!(h.field.text(), "");

    h.field.on_text_changed("ri");
    h.field.on_return_key_pressed();
    assert_eq!(h.field.text(), "Paris");
}

// =============================================================================
// Presentation
// =============================================================================

#[test]
fn test_apply_theme_rerenders() {
    let mut h = Harness::new(SearchFieldConfig::default());
    h.field.set_candidates(cities());
    h.field.on_focus_gained();
    h.field.on_text_changed("ri");

    let mut theme = Theme::dark();
    theme.row_height = 44.0;
    theme.font = FontSpec::named("Avenir", 20.0);
    h.field.apply_theme(theme.clone());

    let update = h.view.last_update().unwrap();
    assert_eq!(update.frame.height(), 88.0);
    assert_eq!(update.style.theme, theme);
    // The highlight only picks up the new size, not the family.
    assert_eq!(update.style.title_highlight.font, FontSpec::system(20.0));
    assert!(update.style.title_highlight.bold);
    assert_eq!(update.style.subtitle_highlight.font.size, 14.0);
}

#[test]
fn test_custom_highlight_style_survives_theme_change() {
    let mut h = Harness::new(SearchFieldConfig::default());
    h.field.set_candidates(cities());
    h.field.on_focus_gained();
    h.field.on_text_changed("ri");

    let red = Color::from_rgb(1.0, 0.0, 0.0);
    h.field.set_highlight_style(HighlightStyle {
        bold: false,
        font: FontSpec::named("Georgia", 16.0),
        color: Some(red),
    });
    let style = h.view.last_update().unwrap().style;
    assert_eq!(style.title_highlight.font, FontSpec::named("Georgia", 16.0));
    assert_eq!(style.subtitle_highlight.font.size, 16.0 * 0.7);
    assert_eq!(style.subtitle_highlight.color, Some(red));

    let mut theme = Theme::light();
    theme.font = FontSpec::system(30.0);
    h.field.apply_theme(theme);

    let style = h.view.last_update().unwrap().style;
    assert_eq!(style.title_highlight.font, FontSpec::named("Georgia", 30.0));
    assert_eq!(style.title_highlight.color, Some(red));
    assert!(!style.title_highlight.bold);
    assert_eq!(style.subtitle_highlight.font, FontSpec::named("Georgia", 21.0));
    assert_eq!(h.field.highlight_style().font.size, 30.0);
}

#[test]
fn test_results_header_adds_to_panel_height() {
    let mut h = Harness::new(SearchFieldConfig::default());
    h.field.set_candidates(cities());
    h.field.on_focus_gained();
    h.field.on_text_changed("ri");
    assert_eq!(h.view.last_update().unwrap().frame.height(), 60.0);

    h.field.set_results_header(Some(25.0));
    let update = h.view.last_update().unwrap();
    assert_eq!(update.header_height, Some(25.0));
    assert_eq!(update.frame.height(), 85.0);
    assert_eq!(update.rows.len(), 2);

    h.field.set_results_header(None);
    let update = h.view.last_update().unwrap();
    assert_eq!(update.header_height, None);
    assert_eq!(update.frame.height(), 60.0);
}

#[test]
fn test_update_config_refilters_current_text() {
    let mut h = Harness::new(SearchFieldConfig::default());
    h.field.set_candidates(cities());
    h.field.on_focus_gained();
    h.field.on_text_changed("ri");
    assert_eq!(h.titles(), ["Paris", "Madrid"]);

    h.field.update_config(|config| config.force_no_filtering = true);
    assert_eq!(h.titles(), ["Paris", "Berlin", "Madrid"]);
    assert_eq!(h.view.last_update().unwrap().rows.len(), 3);

    h.field.update_config(|config| {
        config.force_no_filtering = false;
        config.inline_mode = true;
    });
    assert!(h.field.results().is_empty());
    assert!(!h.field.is_panel_visible());

    h.field.on_text_changed("ma");
    assert_eq!(h.field.ghost_text(), Some("drid"));
}

#[test]
fn test_update_config_start_visible_counts_as_interaction() {
    let mut h = Harness::new(SearchFieldConfig::default());
    h.field.set_candidates(cities());
    assert!(!h.field.has_interacted());
    assert!(!h.field.is_panel_visible());

    h.field
        .update_config(|config| config.start_visible_without_interaction = true);
    assert!(h.field.has_interacted());
    assert_eq!(h.titles(), ["Paris", "Berlin", "Madrid"]);
    assert!(h.field.is_panel_visible());
}

#[test]
fn test_style_carries_config() {
    let mut h = Harness::new(SearchFieldConfig {
        corner_radius: 6.0,
        force_right_to_left: true,
        ..SearchFieldConfig::default()
    });
    h.field.set_strings(["Paris"]);
    h.field.on_focus_gained();
    h.field.on_text_changed("p");

    let style = h.view.last_update().unwrap().style;
    assert_eq!(style.corner_radius, 6.0);
    assert!(style.right_to_left);
}

#[test]
fn test_hide_results_list_animates_collapse() {
    let mut h = Harness::new(SearchFieldConfig::default());
    h.field.set_candidates(cities());
    h.field.on_focus_gained();
    h.field.on_text_changed("ri");

    h.field.hide_results_list();
    assert!(!h.field.is_panel_visible());
    assert_eq!(h.field.results().len(), 2);
    assert_eq!(
        h.view.calls().last(),
        Some(&ViewCall::Hide(FrameTransition::PANEL))
    );

    h.view.clear();
    h.field.hide_results_list();
    assert!(h.view.calls().is_empty());
}

#[test]
fn test_loading_indicator_forwarded() {
    let mut h = Harness::new(SearchFieldConfig::default());
    h.field.show_loading_indicator();
    h.field.stop_loading_indicator();

    assert_eq!(
        h.view.calls(),
        vec![ViewCall::Loading(true), ViewCall::Loading(false)]
    );
}

#[test]
fn test_focus_lost_clears_everything() {
    let mut h = Harness::new(SearchFieldConfig::default());
    h.field.set_candidates(cities());
    h.field.on_focus_gained();
    h.field.on_text_changed("a");
    assert_eq!(h.field.state(), FieldState::Editing);

    h.field.on_focus_lost();
    assert_eq!(h.field.state(), FieldState::Idle);
    assert!(h.field.results().is_empty());
    assert!(!h.field.is_panel_visible());
    assert_eq!(h.field.text(), "a");
}
