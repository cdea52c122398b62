//! Store mutations through `DocumentState` and the render list they produce.

use jtl_browser::{DocumentState, EngineConfig};
use jtl_css::ColorValue;
use jtl_dom::{ElementRecord, Selector, keys};
use jtl_widgets::{Container, ElementFactory};
use quickcheck_macros::quickcheck;

fn state() -> DocumentState {
    DocumentState::new(&EngineConfig::default(), ElementFactory::with_builtins())
}

fn paragraph(contents: &str) -> ElementRecord {
    ElementRecord::with_tag("p").with(keys::CONTENTS, contents)
}

fn button(id: &str) -> ElementRecord {
    ElementRecord::with_tag("button")
        .with(keys::ID, id)
        .with(keys::CONTENTS, id)
}

// ========== insert / remove / replace ==========

#[test]
fn test_insert_then_query_and_widget_count() {
    let mut state = state();
    state.insert(button("go"));
    state.insert(paragraph("hello"));

    let record = state.first_record(&Selector::parse("#go")).unwrap();
    assert_eq!(record.contents(), "go");
    assert_eq!(state.render_list().len(), 2);
    assert_eq!(state.render_list().widgets()[0].kind(), "button");
    assert_eq!(state.render_list().widgets()[1].kind(), "text");
}

#[test]
fn test_remove_empties_query_and_shrinks_render_list() {
    let mut state = state();
    state.load(vec![
        paragraph("a").with(keys::CLASS, "gone"),
        paragraph("b"),
        paragraph("c").with(keys::CLASS, "gone"),
    ]);
    assert_eq!(state.render_list().len(), 3);

    let selector = Selector::parse(".gone");
    assert_eq!(state.remove(&selector), 2);
    assert!(state.first_record(&selector).is_none());
    assert_eq!(state.render_list().len(), 1);
}

#[test]
fn test_replace_keeps_the_index() {
    let mut state = state();
    state.load(vec![paragraph("a"), button("b"), paragraph("c")]);

    let index = state.replace(&Selector::parse("#b"), button("b2"));
    assert_eq!(index, 1);
    assert_eq!(state.position(&Selector::parse("#b2")), Some(1));
    assert!(state.first_record(&Selector::parse("#b")).is_none());
    assert_eq!(state.store().len(), 3);
}

#[test]
fn test_replace_without_match_appends() {
    let mut state = state();
    state.load(vec![paragraph("a")]);
    assert_eq!(state.replace(&Selector::parse("#none"), button("new")), 1);
    assert_eq!(state.render_list().len(), 2);
}

#[test]
fn test_insert_at_past_the_end_appends() {
    let mut state = state();
    state.load(vec![paragraph("a"), paragraph("b")]);
    assert_eq!(state.insert_at(5, paragraph("c")), 2);
    assert_eq!(state.store().records()[2].contents(), "c");
}

// ========== layout ==========

#[test]
fn test_flow_layout_stacks_widgets() {
    let mut state = state();
    state.load(vec![paragraph("a"), button("b")]);
    let widgets = state.render_list().widgets();
    assert!((widgets[0].base().x - 20.0).abs() < f32::EPSILON);
    assert!((widgets[0].base().y - 20.0).abs() < f32::EPSILON);
    assert!((widgets[1].base().y - 80.0).abs() < f32::EPSILON);
    assert!((state.render_list().content_height() - 120.0).abs() < f32::EPSILON);
}

#[test]
fn test_script_and_unknown_records_get_no_widget() {
    let mut state = state();
    state.load(vec![
        ElementRecord::with_tag("script").with(keys::CONTENTS, "1"),
        ElementRecord::with_tag("marquee"),
        paragraph("a"),
    ]);
    assert_eq!(state.store().len(), 3);
    assert_eq!(state.render_list().len(), 1);
}

#[test]
fn test_registered_tag_renders_existing_records() {
    let mut state = state();
    state.load(vec![ElementRecord::with_tag("label").with(keys::CONTENTS, "x")]);
    assert!(state.render_list().is_empty());

    state.register_widget("label", |factory, seed| {
        factory.create("p", seed).unwrap()
    });
    assert_eq!(state.render_list().len(), 1);
}

#[test]
fn test_container_color_stays_off_child_paragraph() {
    let mut state = state();
    state.load(vec![
        ElementRecord::with_tag("div")
            .with(keys::STYLE, "color:255,0,0,255")
            .with(keys::CHILDREN, vec![paragraph("inside")]),
    ]);

    let widget = &state.render_list().widgets()[0];
    assert_eq!(widget.base().color, ColorValue::rgba(255, 0, 0, 255));
    let container = widget.as_any().downcast_ref::<Container>().unwrap();
    assert_eq!(container.children.len(), 1);
    assert_eq!(container.children[0].base().color, ColorValue::BLACK);
}

#[test]
fn test_replace_all_keeps_widget_state_for_same_tag() {
    let mut state = state();
    state.load(vec![button("a")]);
    state.replace_all(vec![button("a")]);
    assert_eq!(state.render_list().len(), 1);
    assert_eq!(state.live_text(&Selector::parse("#a")), Some("a"));
}

// ========== properties ==========

#[quickcheck]
#[allow(clippy::needless_pass_by_value)]
fn prop_insert_at_clamps_and_render_list_follows(count: u8, index: u16) -> bool {
    let count = usize::from(count % 16);
    let mut state = state();
    state.load((0..count).map(|i| paragraph(&i.to_string())).collect());

    let used = state.insert_at(usize::from(index), paragraph("new"));
    used == usize::from(index).min(count)
        && state.store().records()[used].contents() == "new"
        && state.render_list().len() == count + 1
}

#[quickcheck]
#[allow(clippy::needless_pass_by_value)]
fn prop_remove_shrinks_render_list_by_removed(classes: Vec<bool>) -> bool {
    let classes: Vec<bool> = classes.into_iter().take(24).collect();
    let mut state = state();
    state.load(
        classes
            .iter()
            .map(|&gone| paragraph("x").with(keys::CLASS, if gone { "gone" } else { "kept" }))
            .collect(),
    );
    let before = state.render_list().len();
    let removed = state.remove(&Selector::parse(".gone"));
    removed == classes.iter().filter(|&&gone| gone).count()
        && state.render_list().len() == before - removed
}
