//! `jtl serve`: answer JTLTP requests from a directory.

use std::fs;
use std::path::{Component, Path, PathBuf};

use anyhow::Context;
use jtl_net::{Request, Response, Server};
use owo_colors::OwoColorize;

/// Document type reported for pages.
const PAGE_TYPE: &str = "jtl";
/// Document type reported for everything else.
const TEXT_TYPE: &str = "text";

/// Serve `dir` on `addr` until the process is killed.
pub fn run(dir: &Path, addr: &str) -> anyhow::Result<()> {
    let root = dir
        .canonicalize()
        .with_context(|| format!("cannot open '{}'", dir.display()))?;
    let server = Server::bind(addr).with_context(|| format!("cannot listen on {addr}"))?;
    let local = server.local_addr()?;
    println!(
        "{} {} on {}",
        "Serving".green().bold(),
        root.display(),
        format!("jtltp://{local}").cyan()
    );
    server.serve(|request| answer(&root, request))
}

fn answer(root: &Path, request: &Request) -> Response {
    let Some(path) = document_path(root, &request.identifier) else {
        tracing::warn!(identifier = %request.identifier, "refused identifier");
        return Response::bad(TEXT_TYPE, "Bad Request");
    };
    match fs::read_to_string(&path) {
        Ok(body) => {
            tracing::info!(identifier = %request.identifier, bytes = body.len(), "served");
            Response::ok(document_type(&path), body)
        }
        Err(e) => {
            tracing::info!(identifier = %request.identifier, error = %e, "not found");
            Response::not_found()
        }
    }
}

/// Map an identifier to a file under `root`. Identifiers that climb out of
/// the root are refused. `name` falls back to `name.json` when no file has
/// the bare name.
fn document_path(root: &Path, identifier: &str) -> Option<PathBuf> {
    let relative = Path::new(identifier);
    if !relative
        .components()
        .all(|component| matches!(component, Component::Normal(_)))
    {
        return None;
    }
    let path = root.join(relative);
    if path.is_file() || relative.extension().is_some() {
        return Some(path);
    }
    Some(path.with_extension("json"))
}

fn document_type(path: &Path) -> &'static str {
    match path.extension().and_then(|extension| extension.to_str()) {
        Some("json" | "jtl") => PAGE_TYPE,
        _ => TEXT_TYPE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifiers_stay_under_the_root() {
        let root = Path::new("/srv/pages");
        assert_eq!(document_path(root, "../etc/passwd"), None);
        assert_eq!(document_path(root, "/etc/passwd"), None);
        assert_eq!(
            document_path(root, "scripts/main.js"),
            Some(PathBuf::from("/srv/pages/scripts/main.js"))
        );
    }

    #[test]
    fn test_bare_names_fall_back_to_json() {
        assert_eq!(
            document_path(Path::new("/srv/pages"), "index"),
            Some(PathBuf::from("/srv/pages/index.json"))
        );
    }

    #[test]
    fn test_document_types() {
        assert_eq!(document_type(Path::new("a/index.json")), "jtl");
        assert_eq!(document_type(Path::new("a/main.js")), "text");
    }

    #[test]
    fn test_answer_serves_files_and_misses() {
        let root = std::env::temp_dir().join(format!("jtl-serve-{}", std::process::id()));
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("index.json"), "[]").unwrap();

        let hit = answer(&root, &Request::new("index"));
        assert_eq!((hit.status, hit.doc_type.as_str(), hit.body.as_str()), (200, "jtl", "[]"));
        assert_eq!(answer(&root, &Request::new("page2")), Response::not_found());
        assert_eq!(answer(&root, &Request::new("../x")).status, 400);
        let _ = fs::remove_dir_all(root);
    }
}
