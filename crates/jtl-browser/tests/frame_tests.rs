//! The frame loop: input dispatch, handlers, frame hooks and the watcher.

use std::thread;
use std::time::Duration;

use jtl_browser::{EngineConfig, Page, PageLocation};
use jtl_dom::{ElementRecord, keys};
use jtl_js::ScriptValue;
use jtl_widgets::{DisplayCommand, ElementFactory, InputState, KeyInput};

fn config() -> EngineConfig {
    let mut config = EngineConfig::default();
    config.watcher.enabled = false;
    config
}

fn page_with(records: Vec<ElementRecord>, config: &EngineConfig) -> Page {
    Page::open(records, PageLocation::Inline, config, ElementFactory::with_builtins()).unwrap()
}

fn page(records: Vec<ElementRecord>) -> Page {
    page_with(records, &config())
}

fn script(source: &str) -> ElementRecord {
    ElementRecord::with_tag("script").with(keys::CONTENTS, source)
}

fn button(id: &str) -> ElementRecord {
    ElementRecord::with_tag("button")
        .with(keys::ID, id)
        .with(keys::CONTENTS, id)
}

fn count(page: &Page, contents: &str) -> usize {
    page.records()
        .iter()
        .filter(|record| record.contents() == contents)
        .count()
}

const IDLE: InputState = InputState::hover(0.0, 0.0);

// ========== pointer ==========

#[test]
fn test_click_is_edge_triggered() {
    let mut page = page(vec![
        button("go"),
        script("document.onEvent('#go', 'click', \"document.add(document.create('p', 'clicked'))\")"),
    ]);

    let _ = page.frame(&InputState::pressed(50.0, 40.0), &[]);
    let _ = page.frame(&InputState::pressed(50.0, 40.0), &[]);
    assert_eq!(count(&page, "clicked"), 1);

    let _ = page.frame(&InputState::hover(50.0, 40.0), &[]);
    let _ = page.frame(&InputState::pressed(50.0, 40.0), &[]);
    assert_eq!(count(&page, "clicked"), 2);
}

#[test]
fn test_clickrepeat_fires_every_held_frame() {
    let mut page = page(vec![
        button("go"),
        script("document.onEvent('#go', 'clickrepeat', \"document.add(document.create('p', 'held'))\")"),
    ]);
    for _ in 0..3 {
        let _ = page.frame(&InputState::pressed(50.0, 40.0), &[]);
    }
    let _ = page.frame(&IDLE, &[]);
    assert_eq!(count(&page, "held"), 3);
}

#[test]
fn test_press_outside_fires_nothing() {
    let mut page = page(vec![
        button("go"),
        script("document.onEvent('#go', 'click', \"document.add(document.create('p', 'clicked'))\")"),
    ]);
    let _ = page.frame(&InputState::pressed(500.0, 500.0), &[]);
    assert_eq!(count(&page, "clicked"), 0);
}

#[test]
fn test_handler_follows_widget_after_insert() {
    let mut page = page(vec![
        button("go"),
        script("document.onEvent('#go', 'click', \"document.add(document.create('p', 'clicked'))\")"),
    ]);
    let _ = page
        .run_script("document.insert(1, document.create('p', 'above'))")
        .unwrap();

    // The button moved down one slot: 20 + 40 + 20.
    let _ = page.frame(&InputState::pressed(50.0, 100.0), &[]);
    assert_eq!(count(&page, "clicked"), 1);
}

#[test]
fn test_failing_handler_does_not_stop_the_frame() {
    let mut page = page(vec![
        button("a"),
        button("b"),
        script(
            "document.onEvent('#a', 'clickrepeat', 'throw new Error(1)');\
             document.onFrame(\"document.add(document.create('p', 'tick'))\")",
        ),
    ]);
    let list = page.frame(&InputState::pressed(50.0, 40.0), &[]);
    assert!(!list.commands().is_empty());
    assert_eq!(count(&page, "tick"), 1);
}

#[test]
fn test_pressed_button_paints_darker() {
    let mut page = page(vec![button("go")]);
    let fill = |list: &jtl_widgets::DisplayList| {
        list.commands()
            .iter()
            .find_map(|command| match command {
                DisplayCommand::FillRect { color, .. } => Some(*color),
                _ => None,
            })
            .unwrap()
    };
    let idle = fill(&page.frame(&IDLE, &[]));
    let pressed = fill(&page.frame(&InputState::pressed(50.0, 40.0), &[]));
    assert!(pressed.r < idle.r);
}

// ========== keys ==========

#[test]
fn test_text_field_submit_sees_typed_text() {
    let mut page = page(vec![
        ElementRecord::with_tag("textfield").with(keys::ID, "name"),
        script("document.onEvent('#name', 'submit', \"document.add(document.create('p', 'got ' + document.get('#name').text))\")"),
    ]);

    let _ = page.frame(&InputState::pressed(50.0, 40.0), &[]);
    let _ = page.frame(
        &IDLE,
        &[KeyInput::Char('h'), KeyInput::Char('i'), KeyInput::Enter],
    );
    assert_eq!(count(&page, "got hi"), 1);
}

#[test]
fn test_keys_without_focus_go_nowhere() {
    let mut page = page(vec![
        ElementRecord::with_tag("textfield").with(keys::ID, "name"),
        script("document.onEvent('#name', 'submit', \"document.add(document.create('p', 'sent'))\")"),
    ]);
    let _ = page.frame(&IDLE, &[KeyInput::Char('x'), KeyInput::Enter]);
    assert_eq!(count(&page, "sent"), 0);
    assert_eq!(page.run_script("document.get('#name').text").unwrap(), ScriptValue::from(""));
}

// ========== frame hooks ==========

#[test]
fn test_on_frame_runs_every_frame_until_cleared() {
    let mut page = page(vec![script(
        "document.onFrame(\"document.add(document.create('p', 'tick'))\")",
    )]);
    let _ = page.frame(&IDLE, &[]);
    let _ = page.frame(&IDLE, &[]);
    assert_eq!(count(&page, "tick"), 2);

    let _ = page.run_script("document.onFrame('')").unwrap();
    let _ = page.frame(&IDLE, &[]);
    assert_eq!(count(&page, "tick"), 2);
}

#[test]
fn test_request_frame_runs_once() {
    let mut page = page(vec![]);
    let _ = page
        .run_script("document.requestFrame(\"document.add(document.create('p', 'once'))\")")
        .unwrap();
    let _ = page.frame(&IDLE, &[]);
    let _ = page.frame(&IDLE, &[]);
    assert_eq!(count(&page, "once"), 1);
}

#[test]
fn test_request_frame_from_a_hook_waits_for_the_next_frame() {
    let mut page = page(vec![]);
    let _ = page
        .run_script(
            "document.requestFrame(\"document.add(document.create('p', 'one'));\
             document.requestFrame(\\\"document.add(document.create('p', 'two'))\\\")\")",
        )
        .unwrap();
    let _ = page.frame(&IDLE, &[]);
    assert_eq!((count(&page, "one"), count(&page, "two")), (1, 0));
    let _ = page.frame(&IDLE, &[]);
    assert_eq!((count(&page, "one"), count(&page, "two")), (1, 1));
}

// ========== dirty documents ==========

#[test]
fn test_update_marks_dirty_and_reruns_page_scripts() {
    let mut page = page(vec![script("document.add(document.create('p', 'ran'))")]);
    assert_eq!(count(&page, "ran"), 1);

    let _ = page
        .run_script("document.update([{KEY: 'p', Contents: 'only'}])")
        .unwrap();
    assert_eq!(page.records().len(), 1);
    assert!(page.check_dirty());
    assert!(!page.check_dirty());

    let _ = page.frame(&IDLE, &[]);
    assert_eq!(count(&page, "only"), 1);
    assert_eq!(count(&page, "ran"), 1);
}

#[test]
fn test_add_does_not_mark_dirty() {
    let mut page = page(vec![]);
    let _ = page.run_script("document.add({text: 'x'})").unwrap();
    assert!(!page.check_dirty());
}

#[test]
fn test_rerun_can_be_switched_off() {
    let mut config = config();
    config.watcher.rerun_scripts = false;
    let mut page = page_with(vec![script("document.add(document.create('p', 'ran'))")], &config);
    let _ = page.run_script("document.update([])").unwrap();
    assert!(page.check_dirty());
    let _ = page.frame(&IDLE, &[]);
    assert_eq!(count(&page, "ran"), 0);
}

#[test]
fn test_watcher_thread_queues_the_rerun() {
    let mut config = EngineConfig::default();
    config.watcher.interval_ms = 10;
    let mut page = page_with(vec![script("document.add(document.create('p', 'ran'))")], &config);
    let _ = page
        .run_script("document.update([{KEY: 'p', Contents: 'only'}])")
        .unwrap();

    for _ in 0..200 {
        let _ = page.frame(&IDLE, &[]);
        if count(&page, "ran") == 1 {
            break;
        }
        thread::sleep(Duration::from_millis(10));
    }
    assert_eq!(count(&page, "ran"), 1);
    assert_eq!(count(&page, "only"), 1);
}
