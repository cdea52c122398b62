//! The `document` object scripts use to read and change the page.
//!
//! Every call goes through the page session: it takes the document lock for
//! the duration of one store operation and rebuild, and releases it before
//! returning to the script. Selectors are `.class`, `#id` or a bare tag;
//! indices are 1-based on the script side.
//!
//! | Call | Effect |
//! |---|---|
//! | `get(selector)` | first matching record with `text` and a bound `remove()`, or `null` |
//! | `objects()` | `[{type, index}]` for the render list, `index` from 1 |
//! | `update(records)` | replace the document and mark it dirty |
//! | `onEvent(selector, kind, source)` | attach a handler to the first matching widget |
//! | `create(tag, content, attrs)` | build a record without inserting it |
//! | `add(record)` / `insert(index, record)` | append / insert |
//! | `replace(selector, record)` | replace the first match in place |
//! | `whereis(selector)` | index of the first match, or `null` |
//! | `addStyle(selector, decl)` / `removeAllStyle(selector)` | widget style edits |
//! | `fetch(identifier)` | `{status, type, body}` from the JTLTP site, or `null` |
//! | `onFrame(source)` / `requestFrame(source)` | every-frame / next-frame hook |

use std::cell::RefCell;
use std::rc::Rc;
use std::str::FromStr;
use std::sync::Arc;

use jtl_common::warning::warn_once;
use jtl_dom::{ElementRecord, Selector, keys};
use jtl_js::{
    ScriptError, ScriptFunction, ScriptHost, ScriptValue, record_to_value, value_to_record,
    value_to_records,
};
use jtl_net::Fetcher;
use jtl_widgets::EventKind;

use crate::overrides::WidgetEdit;
use crate::state::PageShared;

/// Global object the API is installed under.
const DOCUMENT: &str = "document";

/// Script hooks run by the frame loop.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameHooks {
    every_frame: Option<String>,
    next_frame: Option<String>,
}

impl FrameHooks {
    /// Hooks due this frame: the every-frame hook, then the one-shot hook,
    /// which is cleared.
    pub fn take_due(&mut self) -> Vec<String> {
        self.every_frame
            .clone()
            .into_iter()
            .chain(self.next_frame.take())
            .collect()
    }

    /// Set or clear (with an empty source) the every-frame hook.
    pub fn set_every_frame(&mut self, source: String) {
        self.every_frame = Some(source).filter(|s| !s.is_empty());
    }

    /// Set or clear (with an empty source) the next-frame hook.
    pub fn set_next_frame(&mut self, source: String) {
        self.next_frame = Some(source).filter(|s| !s.is_empty());
    }
}

/// Everything the `document` natives of one page share.
pub struct PageSession {
    /// The document.
    pub shared: Arc<PageShared>,
    /// Frame hooks registered by scripts.
    pub hooks: RefCell<FrameHooks>,
    /// JTLTP client for `document.fetch`, when a site is known.
    pub fetcher: Option<Box<dyn Fetcher>>,
}

impl std::fmt::Debug for PageSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageSession")
            .field("shared", &self.shared)
            .field("hooks", &self.hooks)
            .field("fetcher", &self.fetcher.is_some())
            .finish()
    }
}

type DocumentFn = fn(&PageSession, &[ScriptValue]) -> Result<ScriptValue, ScriptError>;

const DOCUMENT_API: [(&str, DocumentFn); 14] = [
    ("get", get),
    ("objects", objects),
    ("update", update),
    ("onEvent", on_event),
    ("create", create),
    ("add", add),
    ("insert", insert),
    ("replace", replace),
    ("whereis", whereis),
    ("addStyle", add_style),
    ("removeAllStyle", remove_all_style),
    ("fetch", fetch),
    ("onFrame", on_frame),
    ("requestFrame", request_frame),
];

/// Install the `document` API on `host`.
///
/// # Errors
///
/// Returns [`ScriptError::Registration`] if a function cannot be installed.
pub fn install<H: ScriptHost>(host: &mut H, session: &Rc<PageSession>) -> Result<(), ScriptError> {
    for (name, call) in DOCUMENT_API {
        let session = Rc::clone(session);
        host.register_native_function(
            &format!("{DOCUMENT}.{name}"),
            Rc::new(move |args: &[ScriptValue]| call(&session, args)),
        )?;
    }
    Ok(())
}

// ========== arguments ==========

fn string_arg(function: &str, args: &[ScriptValue], index: usize) -> Result<String, ScriptError> {
    args.get(index)
        .and_then(ScriptValue::coerce_string)
        .ok_or_else(|| {
            ScriptError::bad_argument(
                &format!("{DOCUMENT}.{function}"),
                format!("argument {} must be a string", index + 1),
            )
        })
}

fn selector_arg(function: &str, args: &[ScriptValue], index: usize) -> Result<Selector, ScriptError> {
    string_arg(function, args, index).map(|s| Selector::parse(&s))
}

fn record_arg(function: &str, args: &[ScriptValue], index: usize) -> Result<ElementRecord, ScriptError> {
    args.get(index).and_then(value_to_record).ok_or_else(|| {
        ScriptError::bad_argument(
            &format!("{DOCUMENT}.{function}"),
            format!("argument {} must be an element object", index + 1),
        )
    })
}

/// A 0-based position as a 1-based script index.
fn script_index(position: usize) -> ScriptValue {
    u32::try_from(position + 1).map_or(ScriptValue::Nil, |index| ScriptValue::Number(f64::from(index)))
}

/// A 1-based script index as a 0-based position. Anything below 1 is 0.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn store_position(index: f64) -> usize {
    if index.is_nan() || index < 1.0 {
        0
    } else {
        (index - 1.0) as usize
    }
}

// ========== queries ==========

fn get(session: &PageSession, args: &[ScriptValue]) -> Result<ScriptValue, ScriptError> {
    let selector = selector_arg("get", args, 0)?;
    let (mut value, text) = {
        let state = session.shared.read();
        let Some(record) = state.first_record(&selector) else {
            return Ok(ScriptValue::Nil);
        };
        let text = state
            .live_text(&selector)
            .unwrap_or_else(|| record.contents())
            .to_string();
        (record_to_value(record), text)
    };
    value.set(keys::TEXT, ScriptValue::String(text));

    let shared = Arc::clone(&session.shared);
    value.set(
        "remove",
        ScriptValue::Function(ScriptFunction::new(move |_| {
            let removed = shared.write().remove(&selector);
            tracing::debug!(%selector, removed, "removed from script");
            Ok(ScriptValue::Nil)
        })),
    );
    Ok(value)
}

/// `[{type, index}]`, one entry per widget in render order. `index` is
/// 1-based, like every index the API hands out.
fn objects(session: &PageSession, _args: &[ScriptValue]) -> Result<ScriptValue, ScriptError> {
    let state = session.shared.read();
    let items = state
        .render_list()
        .widgets()
        .iter()
        .enumerate()
        .map(|(position, widget)| {
            ScriptValue::Table(vec![
                ("type".to_string(), ScriptValue::from(widget.kind())),
                ("index".to_string(), script_index(position)),
            ])
        })
        .collect();
    Ok(ScriptValue::List(items))
}

fn whereis(session: &PageSession, args: &[ScriptValue]) -> Result<ScriptValue, ScriptError> {
    let selector = selector_arg("whereis", args, 0)?;
    Ok(session
        .shared
        .read()
        .position(&selector)
        .map_or(ScriptValue::Nil, script_index))
}

fn create(_session: &PageSession, args: &[ScriptValue]) -> Result<ScriptValue, ScriptError> {
    let tag = string_arg("create", args, 0)?;
    let content = args
        .get(1)
        .and_then(ScriptValue::coerce_string)
        .unwrap_or_default();
    let mut record = ElementRecord::with_tag(&tag).with(keys::CONTENTS, content);
    if let Some(ScriptValue::Table(attributes)) = args.get(2) {
        for (key, value) in attributes {
            if let Some(value) = value.coerce_string() {
                let _ = record.set(key, value);
            }
        }
    }
    Ok(record_to_value(&record))
}

// ========== mutations ==========

fn update(session: &PageSession, args: &[ScriptValue]) -> Result<ScriptValue, ScriptError> {
    let records = match args.first() {
        Some(value @ (ScriptValue::List(_) | ScriptValue::Table(_))) => value_to_records(value),
        _ => {
            return Err(ScriptError::bad_argument(
                "document.update",
                "argument 1 must be a list of element objects",
            ));
        }
    };
    session.shared.write().replace_all(records);
    session.shared.mark_dirty();
    Ok(ScriptValue::Nil)
}

fn add(session: &PageSession, args: &[ScriptValue]) -> Result<ScriptValue, ScriptError> {
    let record = record_arg("add", args, 0)?;
    session.shared.write().insert(record);
    Ok(ScriptValue::Nil)
}

fn insert(session: &PageSession, args: &[ScriptValue]) -> Result<ScriptValue, ScriptError> {
    let index = args.first().and_then(ScriptValue::as_number).ok_or_else(|| {
        ScriptError::bad_argument("document.insert", "argument 1 must be a number")
    })?;
    let record = record_arg("insert", args, 1)?;
    let _ = session.shared.write().insert_at(store_position(index), record);
    Ok(ScriptValue::Nil)
}

fn replace(session: &PageSession, args: &[ScriptValue]) -> Result<ScriptValue, ScriptError> {
    let selector = selector_arg("replace", args, 0)?;
    let record = record_arg("replace", args, 1)?;
    let _ = session.shared.write().replace(&selector, record);
    Ok(ScriptValue::Nil)
}

// ========== widget edits ==========

fn on_event(session: &PageSession, args: &[ScriptValue]) -> Result<ScriptValue, ScriptError> {
    let selector = selector_arg("onEvent", args, 0)?;
    let kind = string_arg("onEvent", args, 1)?;
    let source = string_arg("onEvent", args, 2)?;
    let Ok(kind) = EventKind::from_str(&kind) else {
        warn_once("script", &format!("unknown event kind '{kind}'"));
        return Ok(ScriptValue::Nil);
    };
    session
        .shared
        .write()
        .edit_widget(selector, WidgetEdit::Handler { kind, source });
    Ok(ScriptValue::Nil)
}

fn add_style(session: &PageSession, args: &[ScriptValue]) -> Result<ScriptValue, ScriptError> {
    let selector = selector_arg("addStyle", args, 0)?;
    let declarations = string_arg("addStyle", args, 1)?;
    session
        .shared
        .write()
        .edit_widget(selector, WidgetEdit::AddStyle(declarations));
    Ok(ScriptValue::Nil)
}

fn remove_all_style(session: &PageSession, args: &[ScriptValue]) -> Result<ScriptValue, ScriptError> {
    let selector = selector_arg("removeAllStyle", args, 0)?;
    session
        .shared
        .write()
        .edit_widget(selector, WidgetEdit::ClearStyle);
    Ok(ScriptValue::Nil)
}

// ========== outside the document ==========

fn fetch(session: &PageSession, args: &[ScriptValue]) -> Result<ScriptValue, ScriptError> {
    let identifier = string_arg("fetch", args, 0)?;
    let Some(fetcher) = &session.fetcher else {
        warn_once("fetch", "no JTLTP site configured");
        return Ok(ScriptValue::Nil);
    };
    match fetcher.fetch(&identifier) {
        Ok(response) => Ok(ScriptValue::Table(vec![
            ("status".to_string(), ScriptValue::Number(f64::from(response.status))),
            ("type".to_string(), ScriptValue::String(response.doc_type)),
            ("body".to_string(), ScriptValue::String(response.body)),
        ])),
        Err(e) => {
            tracing::error!(identifier, error = %e, "fetch failed");
            Ok(ScriptValue::Nil)
        }
    }
}

fn on_frame(session: &PageSession, args: &[ScriptValue]) -> Result<ScriptValue, ScriptError> {
    let source = string_arg("onFrame", args, 0)?;
    session.hooks.borrow_mut().set_every_frame(source);
    Ok(ScriptValue::Nil)
}

fn request_frame(session: &PageSession, args: &[ScriptValue]) -> Result<ScriptValue, ScriptError> {
    let source = string_arg("requestFrame", args, 0)?;
    session.hooks.borrow_mut().set_next_frame(source);
    Ok(ScriptValue::Nil)
}
