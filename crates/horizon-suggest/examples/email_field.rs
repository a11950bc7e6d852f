//! Horizon Suggest email field example
//!
//! Drives an inline-mode search field from a scripted sequence of events and
//! prints what a real view would draw:
//! - Ghost-text completion of email domains after `@`
//! - Return key committing the completion
//! - "Typing stopped" detection on the host-driven timer loop
//!
//! Run with: RUST_LOG=debug cargo run -p horizon-suggest --example email_field

use std::cell::RefCell;
use std::rc::Rc;
use std::thread;

use horizon_suggest::logging::filter_directive;
use horizon_suggest::prelude::*;
use tracing_subscriber::EnvFilter;

/// Prints every instruction instead of drawing it.
struct ConsoleView;

impl PanelView for ConsoleView {
    fn show_panel(&mut self, update: &PanelUpdate) {
        let titles: Vec<&str> = update.rows.iter().map(|row| row.title.as_str()).collect();
        println!("panel {:?} at {:?}: {titles:?}", update.direction, update.frame);
    }

    fn hide_panel(&mut self, _transition: FrameTransition) {
        println!("panel hidden");
    }

    fn set_ghost_text(&mut self, text: Option<&str>, frame: Option<Rect>) {
        match text {
            Some(text) => println!("ghost text {text:?} at {frame:?}"),
            None => println!("ghost text cleared"),
        }
    }

    fn set_input_text(&mut self, text: &str) {
        println!("field text set to {text:?}");
    }

    fn set_loading(&mut self, loading: bool) {
        println!("loading indicator: {loading}");
    }

    fn text_geometry(&self) -> Option<TextGeometry> {
        Some(TextGeometry {
            placeholder: Rect::new(0.0, 4.0, 280.0, 22.0),
            caret: Rect::new(0.0, 4.0, 64.0, 22.0),
            text: Rect::new(8.0, 4.0, 264.0, 22.0),
        })
    }
}

fn main() {
    let directive = std::env::var("RUST_LOG").unwrap_or_else(|_| filter_directive("info"));
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(directive))
        .init();

    let config = SearchFieldConfig {
        inline_mode: true,
        start_filtering_after: Some("@".to_string()),
        typing_stopped_delay: 0.3,
        ..SearchFieldConfig::default()
    };

    let timers = Rc::new(RefCell::new(TimerManager::new()));
    let field = Rc::new(RefCell::new(SearchFieldController::new(
        config,
        timers.clone(),
        ConsoleView,
    )));

    let keyboard = Signal::new();
    SearchFieldController::attach(&field, &keyboard);

    field.borrow().typing_stopped().connect(|_| println!("user stopped typing"));
    field
        .borrow_mut()
        .set_strings(["gmail.com", "hotmail.com", "yahoo.com", "outlook.com"]);

    field.borrow_mut().on_focus_gained();
    keyboard.emit(KeyboardEvent::Shown(Rect::new(0.0, 400.0, 320.0, 240.0)));

    for text in ["j", "jo", "john", "john@", "john@h", "john@ho"] {
        println!("> typed {text:?}");
        field.borrow_mut().on_text_changed(text);
    }

    // Host loop: wait for the debounce to expire, then route the timers.
    loop {
        let next = timers.borrow_mut().time_until_next();
        let Some(wait) = next else {
            break;
        };
        thread::sleep(wait);
        let expired = timers.borrow_mut().process_expired();
        for id in expired {
            field.borrow_mut().handle_timer(id);
        }
    }

    field.borrow_mut().on_return_key_pressed();
    println!("final text: {:?}", field.borrow().text());

    keyboard.emit(KeyboardEvent::Hidden);
    field.borrow_mut().on_focus_lost();
}
