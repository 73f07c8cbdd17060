//! Server-rendered HTML for the public site and the admin area.

pub mod admin;
pub mod editor;
pub mod public;

use maud::{html, Markup, DOCTYPE};
use motoserwis_core::document::FieldPath;
use motoserwis_core::editor::ops::get_at;
use serde_json::Value;

const CSS: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; color: #1d1d1f; background: #fafafa; }
header.site-header { background: #111; color: #fff; padding: 0.75rem 1.5rem; }
header.site-header a { color: #f5a300; margin-right: 1rem; text-decoration: none; }
main { max-width: 960px; margin: 0 auto; padding: 1.5rem; }
section { margin-bottom: 2rem; }
img { max-width: 100%; height: auto; }
fieldset { border: 1px solid #ccc; margin: 0 0 1rem; padding: 0.75rem; }
label { display: block; margin-bottom: 0.5rem; }
label span { display: block; font-size: 0.85rem; color: #555; }
input[type=text], input[type=email], input[type=password], textarea { width: 100%; box-sizing: border-box; }
.item { border-left: 3px solid #f5a300; padding-left: 0.75rem; margin-bottom: 0.75rem; }
.toolbar { position: sticky; top: 0; background: #fafafa; padding: 0.5rem 0; }
.notice { padding: 0.5rem 0.75rem; margin-bottom: 1rem; }
.notice-info { background: #e8f0fe; }
.notice-success { background: #e6f4ea; }
.notice-error { background: #fce8e6; }
.preview { max-height: 80px; display: block; }
"#;

/// Full HTML document. `refresh_secs` adds a periodic reload.
pub fn base_document(title: &str, refresh_secs: Option<u64>, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="pl" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                @if let Some(secs) = refresh_secs {
                    meta http-equiv="refresh" content=(secs);
                }
                title { (title) }
                style { (maud::PreEscaped(CSS)) }
            }
            body {
                (content)
            }
        }
    }
}

/// Display text for the leaf at `path`; missing and `null` read as "".
pub fn leaf_text(doc: &Value, path: &FieldPath) -> String {
    match get_at(doc, path) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
