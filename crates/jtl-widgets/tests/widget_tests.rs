//! Tests for painting, pointer and keyboard handling of the built-in widgets.

use jtl_css::{ColorValue, Viewport, apply_style};
use jtl_widgets::button::BUTTON_COLOR;
use jtl_widgets::text::PLACEHOLDER;
use jtl_widgets::text_field::FOCUS_BORDER_COLOR;
use jtl_widgets::{
    ApproximateFontMetrics, Button, DisplayCommand, DisplayList, EventKind, InputState, KeyInput,
    PaintContext, Rect, SeedContext, Text, TextField, Widget, WidgetSeed,
};

fn seed(content: &str) -> WidgetSeed {
    WidgetSeed::new(content, Rect::new(20.0, 20.0, 200.0, 40.0), SeedContext::default())
}

fn paint(widget: &dyn Widget) -> DisplayList {
    let metrics = ApproximateFontMetrics;
    let context = PaintContext {
        viewport: Viewport::default(),
        metrics: &metrics,
    };
    let mut list = DisplayList::new();
    widget.paint(&mut list, &context);
    list
}

fn fill_color(list: &DisplayList) -> ColorValue {
    list.commands()
        .iter()
        .find_map(|command| match command {
            DisplayCommand::FillRect { color, .. } => Some(*color),
            _ => None,
        })
        .unwrap()
}

fn stroke_color(list: &DisplayList) -> ColorValue {
    list.commands()
        .iter()
        .find_map(|command| match command {
            DisplayCommand::StrokeRect { color, .. } => Some(*color),
            _ => None,
        })
        .unwrap()
}

// ========== button ==========

#[test]
fn test_button_paints_fill_border_and_label() {
    let button = Button::new(&seed("Go"));
    let list = paint(&button);
    assert_eq!(list.len(), 3);
    assert_eq!(fill_color(&list), BUTTON_COLOR);
    assert_eq!(list.texts(), ["Go"]);
}

#[test]
fn test_button_shades_on_hover_and_press() {
    let mut button = Button::new(&seed("Go"));
    let viewport = Viewport::default();
    let mut fired = Vec::new();

    button.handle_pointer(&InputState::hover(30.0, 30.0), viewport, &mut fired);
    assert_eq!(fill_color(&paint(&button)), BUTTON_COLOR.scaled(1.2));

    button.handle_pointer(&InputState::pressed(30.0, 30.0), viewport, &mut fired);
    assert_eq!(fill_color(&paint(&button)), BUTTON_COLOR.scaled(0.8));

    button.handle_pointer(&InputState::hover(500.0, 500.0), viewport, &mut fired);
    assert_eq!(fill_color(&paint(&button)), BUTTON_COLOR);
}

#[test]
fn test_button_click_handlers_fire_with_source() {
    let mut button = Button::new(&seed("Go"));
    button.base.set_event_handler(EventKind::Click, "clicked()");
    let viewport = Viewport::default();
    let mut fired = Vec::new();

    button.handle_pointer(&InputState::pressed(30.0, 30.0), viewport, &mut fired);
    button.handle_pointer(&InputState::pressed(30.0, 30.0), viewport, &mut fired);

    assert_eq!(fired.len(), 1);
    assert_eq!(fired[0].kind, EventKind::Click);
    assert_eq!(fired[0].source, "clicked()");
}

#[test]
fn test_centered_button_hit_tests_where_drawn() {
    let mut button = Button::new(&seed("Go"));
    apply_style("center:true", &mut button, Viewport::default());
    button.base.set_event_handler(EventKind::Click, "c()");
    let mut fired = Vec::new();

    button.handle_pointer(&InputState::pressed(30.0, 30.0), Viewport::default(), &mut fired);
    assert!(fired.is_empty());
    button.handle_pointer(&InputState::pressed(400.0, 300.0), Viewport::default(), &mut fired);
    assert_eq!(fired.len(), 1);
}

// ========== text ==========

#[test]
fn test_empty_text_draws_placeholder() {
    let text = Text::new(&seed(""));
    assert_eq!(paint(&text).texts(), [PLACEHOLDER]);
}

#[test]
fn test_text_margins_offset_position_once() {
    let mut text = Text::new(&seed("moved"));
    let style = "margin:5;margin-left:10;margin-down:3";
    apply_style(style, &mut text, Viewport::default());
    apply_style(style, &mut text, Viewport::default());

    let list = paint(&text);
    let DisplayCommand::DrawText { x, y, .. } = &list.commands()[0] else {
        panic!("expected text");
    };
    assert!((x - 35.0).abs() < f32::EPSILON);
    assert!((y - 22.0).abs() < f32::EPSILON);
}

#[test]
fn test_rotation_is_carried_on_commands() {
    let mut text = Text::new(&seed("spin"));
    apply_style("rotate:90", &mut text, Viewport::default());
    let list = paint(&text);
    let DisplayCommand::DrawText { rotation, .. } = &list.commands()[0] else {
        panic!("expected text");
    };
    assert!((rotation - 90.0).abs() < f32::EPSILON);
}

// ========== text field ==========

#[test]
fn test_text_field_focus_and_editing() {
    let mut field = TextField::new(&seed(""));
    field.base.set_event_handler(EventKind::Submit, "sent()");
    let viewport = Viewport::default();
    let mut fired = Vec::new();

    // Keys are ignored until focused.
    assert!(!field.handle_key(KeyInput::Char('x'), &mut fired));

    field.handle_pointer(&InputState::pressed(30.0, 30.0), viewport, &mut fired);
    assert!(field.focused);
    assert_eq!(stroke_color(&paint(&field)), FOCUS_BORDER_COLOR);

    for c in ['h', 'i', '\u{7f}', 'é', '!'] {
        assert!(field.handle_key(KeyInput::Char(c), &mut fired));
    }
    assert_eq!(field.text, "hi!");
    assert!(field.handle_key(KeyInput::Backspace, &mut fired));
    assert_eq!(field.text, "hi");

    assert!(field.handle_key(KeyInput::Enter, &mut fired));
    assert_eq!(fired.len(), 1);
    assert_eq!(fired[0].kind, EventKind::Submit);

    assert!(field.handle_key(KeyInput::Escape, &mut fired));
    assert!(!field.focused);
}

#[test]
fn test_press_outside_unfocuses() {
    let mut field = TextField::new(&seed(""));
    let mut fired = Vec::new();
    field.handle_pointer(&InputState::pressed(30.0, 30.0), Viewport::default(), &mut fired);
    field.handle_pointer(&InputState::pressed(700.0, 500.0), Viewport::default(), &mut fired);
    assert!(!field.focused);
}

#[test]
fn test_carry_state_keeps_typed_text_and_focus() {
    let mut old = TextField::new(&seed("initial"));
    let mut fired = Vec::new();
    old.handle_pointer(&InputState::pressed(30.0, 30.0), Viewport::default(), &mut fired);
    let _ = old.handle_key(KeyInput::Char('!'), &mut fired);

    let mut rebuilt = TextField::new(&seed("initial"));
    rebuilt.carry_state_from(&old);
    assert!(rebuilt.focused);
    assert_eq!(rebuilt.text, "initial!");

    // An untouched field takes the new content.
    let untouched = TextField::new(&seed("old"));
    let mut replaced = TextField::new(&seed("new"));
    replaced.carry_state_from(&untouched);
    assert_eq!(replaced.text, "new");
}
