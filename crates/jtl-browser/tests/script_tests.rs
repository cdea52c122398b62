//! The `document` API as page scripts see it.

use jtl_browser::{EngineConfig, Page, PageLocation};
use jtl_css::ColorValue;
use jtl_dom::{ElementRecord, keys};
use jtl_js::{ScriptError, ScriptValue};
use jtl_widgets::ElementFactory;
use jtl_widgets::button::BUTTON_COLOR;

fn config() -> EngineConfig {
    let mut config = EngineConfig::default();
    config.watcher.enabled = false;
    config
}

fn page(records: Vec<ElementRecord>) -> Page {
    Page::open(records, PageLocation::Inline, &config(), ElementFactory::with_builtins()).unwrap()
}

fn paragraph(contents: &str) -> ElementRecord {
    ElementRecord::with_tag("p").with(keys::CONTENTS, contents)
}

fn button(id: &str) -> ElementRecord {
    ElementRecord::with_tag("button")
        .with(keys::ID, id)
        .with(keys::CONTENTS, id)
}

fn contents(page: &Page) -> Vec<String> {
    page.records()
        .iter()
        .map(|record| record.contents().to_string())
        .collect()
}

// ========== page scripts ==========

#[test]
fn test_page_scripts_run_after_the_store_is_filled() {
    let page = page(vec![
        ElementRecord::with_tag("script")
            .with(keys::CONTENTS, "document.add(document.create('p', 'n=' + document.objects().length))"),
        paragraph("a"),
    ]);
    assert_eq!(contents(&page).last().map(String::as_str), Some("n=1"));
    assert_eq!(page.snapshot().len(), 2);
}

#[test]
fn test_failing_page_script_does_not_fail_the_load() {
    let page = page(vec![
        ElementRecord::with_tag("script").with(keys::CONTENTS, "throw new Error('boom')"),
        paragraph("a"),
    ]);
    assert_eq!(page.snapshot().len(), 1);
}

#[test]
fn test_inline_json_page() {
    let page = Page::from_source(r#"[{"KEY": "p", "Contents": "hi"}, {"KEY": "button", "id": "b"}]"#, &config())
        .unwrap();
    assert_eq!(page.snapshot().len(), 2);
    assert_eq!(page.draw().texts(), ["hi", ""]);
}

// ========== queries ==========

#[test]
fn test_get_returns_record_with_text() {
    let mut page = page(vec![paragraph("hello").with(keys::ID, "greeting")]);
    assert_eq!(
        page.run_script("let g = document.get('#greeting'); [g.KEY, g.Contents, g.text]").unwrap(),
        ScriptValue::List(vec!["p".into(), "hello".into(), "hello".into()])
    );
    assert_eq!(page.run_script("document.get('#missing')").unwrap(), ScriptValue::Nil);
}

#[test]
fn test_get_remove_removes_every_match() {
    let mut page = page(vec![
        paragraph("a").with(keys::CLASS, "x"),
        paragraph("b"),
        paragraph("c").with(keys::CLASS, "x"),
    ]);
    let _ = page.run_script("document.get('.x').remove()").unwrap();
    assert_eq!(contents(&page), ["b"]);
    assert_eq!(page.snapshot().len(), 1);
}

#[test]
fn test_objects_lists_types_and_indices() {
    let mut page = page(vec![paragraph("a"), button("b")]);
    assert_eq!(
        page.run_script("document.objects().map(o => o.type + o.index).join(',')").unwrap(),
        ScriptValue::from("text1,button2")
    );
}

#[test]
fn test_whereis_is_one_based() {
    let mut page = page(vec![paragraph("a"), button("b")]);
    assert_eq!(page.run_script("document.whereis('#b')").unwrap(), ScriptValue::Number(2.0));
    assert_eq!(page.run_script("document.whereis('#zzz')").unwrap(), ScriptValue::Nil);
}

#[test]
fn test_create_does_not_insert() {
    let mut page = page(vec![]);
    assert_eq!(
        page.run_script("let r = document.create('button', 'Go', {id: 'go'}); [r.KEY, r.Contents, r.id]")
            .unwrap(),
        ScriptValue::List(vec!["button".into(), "Go".into(), "go".into()])
    );
    assert!(page.records().is_empty());
}

// ========== mutations ==========

#[test]
fn test_add_normalizes_records() {
    let mut page = page(vec![]);
    let _ = page.run_script("document.add({text: 'plain'})").unwrap();
    let records = page.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].tag(), Some("p"));
    assert_eq!(records[0].contents(), "plain");
}

#[test]
fn test_insert_clamps_to_the_end() {
    let mut page = page(vec![paragraph("a"), paragraph("b")]);
    let _ = page.run_script("document.insert(5, document.create('p', 'c'))").unwrap();
    let _ = page.run_script("document.insert(1, document.create('p', 'first'))").unwrap();
    assert_eq!(contents(&page), ["first", "a", "b", "c"]);
}

#[test]
fn test_replace_keeps_position_and_drops_old_fields() {
    let mut page = page(vec![
        paragraph("a"),
        button("b").with(keys::STYLE, "color:1,2,3,255"),
        paragraph("c"),
    ]);
    let _ = page
        .run_script("document.replace('#b', document.create('button', 'B2', {id: 'b2'}))")
        .unwrap();
    assert_eq!(page.run_script("document.whereis('#b2')").unwrap(), ScriptValue::Number(2.0));
    assert_eq!(page.records()[1].get_str(keys::STYLE), None);
    assert_eq!(page.snapshot().widgets()[1].base().color, BUTTON_COLOR);
}

#[test]
fn test_children_survive_a_script_round_trip() {
    let nested = ElementRecord::with_tag("div")
        .with(keys::ID, "box")
        .with(keys::CHILDREN, vec![paragraph("inner"), button("deep")]);
    let mut page = page(vec![nested.clone()]);
    let _ = page.run_script("document.update([document.get('#box')])").unwrap();
    let records = page.records();
    assert_eq!(records[0].children(), nested.children());
}

#[test]
fn test_bad_arguments_throw_catchable_errors() {
    let mut page = page(vec![]);
    assert!(matches!(page.run_script("document.add(5)"), Err(ScriptError::Exception(_))));
    assert_eq!(
        page.run_script("try { document.insert('x', {}); 'no' } catch (e) { 'caught' }").unwrap(),
        ScriptValue::from("caught")
    );
}

// ========== styles ==========

#[test]
fn test_add_style_survives_store_mutations() {
    let red = ColorValue::rgba(255, 0, 0, 255);
    let mut page = page(vec![button("go")]);
    let _ = page.run_script("document.addStyle('#go', 'color:255,0,0,255')").unwrap();
    assert_eq!(page.snapshot().widgets()[0].base().color, red);

    let _ = page.run_script("document.insert(1, document.create('p', 'above'))").unwrap();
    let snapshot = page.snapshot();
    assert_eq!(snapshot.widgets()[1].base().id, "go");
    assert_eq!(snapshot.widgets()[1].base().color, red);
}

#[test]
fn test_remove_all_style_restores_defaults() {
    let mut page = page(vec![button("go").with(keys::STYLE, "color:0,0,255,255")]);
    let _ = page.run_script("document.addStyle('#go', 'color:255,0,0,255')").unwrap();
    let _ = page.run_script("document.removeAllStyle('#go')").unwrap();
    assert_eq!(page.snapshot().widgets()[0].base().color, BUTTON_COLOR);
}

#[test]
fn test_unknown_event_kind_is_ignored() {
    let mut page = page(vec![button("go")]);
    assert_eq!(
        page.run_script("document.onEvent('#go', 'hover', 'x()')").unwrap(),
        ScriptValue::Nil
    );
    assert!(page.snapshot().widgets()[0].base().event_handlers.is_empty());
}

// ========== fetch ==========

#[test]
fn test_fetch_without_a_site_is_null() {
    let mut page = page(vec![]);
    assert_eq!(page.run_script("document.fetch('index')").unwrap(), ScriptValue::Nil);
}
