//! Warnings and page-relative resource paths.

use std::path::{Path, PathBuf};

use jtl_common::path::{is_remote, resolve_relative_to_page, resolve_relative_to_url};
use jtl_common::warning::{clear_warnings, has_warned, warn_once};

#[test]
fn test_warnings_are_remembered_until_cleared() {
    assert!(!has_warned("render", "no widget for tag 'blink'"));
    warn_once("render", "no widget for tag 'blink'");
    warn_once("render", "no widget for tag 'blink'");
    assert!(has_warned("render", "no widget for tag 'blink'"));
    assert!(!has_warned("style", "no widget for tag 'blink'"));

    clear_warnings();
    assert!(!has_warned("render", "no widget for tag 'blink'"));
}

#[test]
fn test_relative_page_without_directory() {
    assert_eq!(
        resolve_relative_to_page(Path::new("index.json"), "app.js"),
        PathBuf::from("app.js")
    );
    assert_eq!(
        resolve_relative_to_page(Path::new("pages/index.json"), "lib/app.js"),
        PathBuf::from("pages/lib/app.js")
    );
}

#[test]
fn test_remote_script_source_is_kept() {
    assert_eq!(
        resolve_relative_to_url("http://a.example/index.json", "https://cdn.example/x.js"),
        "https://cdn.example/x.js"
    );
    assert_eq!(
        resolve_relative_to_url("http://a.example/site/index.json", "x.js"),
        "http://a.example/site/x.js"
    );
}

#[test]
fn test_is_remote_needs_a_scheme() {
    assert!(is_remote("https://a.example/page.json"));
    assert!(!is_remote("jtltp://127.0.0.1:8080/index"));
    assert!(!is_remote("./http/page.json"));
}
