use maud::{html, Markup};
use motoserwis_core::assets::Asset;
use motoserwis_core::document::FieldPath;
use motoserwis_core::editor::ops::get_at;
use motoserwis_core::editor::{
    EditAction, EditorSession, FieldSpec, Notice, NoticeLevel, PageSchema, Widget,
};
use serde_json::Value;

use super::{base_document, leaf_text};

/// Form field carrying the serialized editor session.
pub const SESSION_FIELD: &str = "__session";
/// Submit-button field carrying the chosen [`EditAction`].
pub const ACTION_FIELD: &str = "__action";
/// Prefix for leaf value fields: `f:{path}`.
pub const VALUE_PREFIX: &str = "f:";
/// Prefix for image file inputs: `upload:{path}`.
pub const UPLOAD_PREFIX: &str = "upload:";

const IMAGE_LIBRARY_ID: &str = "image-library";

/// The editor form for one page. Structural list actions are submit
/// buttons, so the whole session round-trips through the form.
pub fn render_editor(
    schema: &PageSchema,
    session: &EditorSession,
    notice: Option<&Notice>,
    images: &[Asset],
) -> Markup {
    let encoded = serde_json::to_string(session).unwrap_or_default();
    let doc = session.document();
    let root = FieldPath::root();
    let action = format!("/admin/{}", schema.type_key);

    let body = html! {
        header.site-header {
            a href="/admin" { "← All pages" }
            a href=(super::public::page_href(schema)) target="_blank" { "View page" }
        }
        main {
            h1 { "Edit: " (schema.title) }
            @if let Some(notice) = notice {
                div class=(notice_class(notice.level)) role="status" { (notice.message) }
            }
            form method="post" action=(action) enctype="multipart/form-data" {
                input type="hidden" name=(SESSION_FIELD) value=(encoded);
                div.toolbar {
                    (action_button(&EditAction::Update, "Apply"))
                    " "
                    (action_button(&EditAction::Save, "Save"))
                    @if session.is_dirty() {
                        " " em { "Unsaved changes" }
                    }
                }
                @for group in &schema.groups {
                    fieldset {
                        legend { (group.label) }
                        @for field in &group.fields {
                            (render_field(field, &root, doc))
                        }
                    }
                }
                datalist id=(IMAGE_LIBRARY_ID) {
                    @for image in images {
                        option value=(image.url) {}
                    }
                }
            }
        }
    };
    base_document(&format!("Edit {}", schema.title), None, body)
}

fn notice_class(level: NoticeLevel) -> &'static str {
    match level {
        NoticeLevel::Info => "notice notice-info",
        NoticeLevel::Success => "notice notice-success",
        NoticeLevel::Error => "notice notice-error",
    }
}

fn action_button(action: &EditAction, label: &str) -> Markup {
    html! {
        button type="submit" name=(ACTION_FIELD) value=(action.to_string()) { (label) }
    }
}

fn render_field(field: &FieldSpec, base: &FieldPath, doc: &Value) -> Markup {
    let path = base.join(&field.path);
    let input_name = format!("{VALUE_PREFIX}{path}");
    match &field.widget {
        Widget::Text => html! {
            label {
                span { (field.label) }
                input type="text" name=(input_name) value=(leaf_text(doc, &path));
            }
        },
        Widget::TextArea => html! {
            label {
                span { (field.label) }
                textarea name=(input_name) rows="4" { (leaf_text(doc, &path)) }
            }
        },
        Widget::Image => {
            let url = leaf_text(doc, &path);
            html! {
                label {
                    span { (field.label) }
                    @if !url.is_empty() {
                        img.preview src=(url) alt="";
                    }
                    input type="text" name=(input_name) value=(url) list=(IMAGE_LIBRARY_ID);
                    input type="file" name=(format!("{UPLOAD_PREFIX}{path}")) accept="image/*";
                }
            }
        }
        Widget::List { item_fields, .. } => {
            let count = get_at(doc, &path)
                .and_then(Value::as_array)
                .map_or(0, Vec::len);
            html! {
                fieldset.list {
                    legend { (field.label) }
                    @for i in 0..count {
                        div.item {
                            @for item_field in item_fields {
                                (render_field(item_field, &path.index(i), doc))
                            }
                            @if i > 0 {
                                (action_button(&EditAction::Move(path.clone(), i, i - 1), "↑"))
                            }
                            @if i + 1 < count {
                                (action_button(&EditAction::Move(path.clone(), i, i + 1), "↓"))
                            }
                            (action_button(&EditAction::Remove(path.clone(), i), "Remove"))
                        }
                    }
                    (action_button(&EditAction::Append(path.clone()), "Add"))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use motoserwis_core::editor::PageRegistry;
    use motoserwis_core::TypeKey;
    use serde_json::json;

    fn pricing() -> PageSchema {
        PageRegistry::builtin()
            .unwrap()
            .get(&TypeKey::parse("pricing-transport").unwrap())
            .unwrap()
            .clone()
    }

    #[test]
    fn renders_inputs_and_list_buttons() {
        let schema = pricing();
        let session: EditorSession = serde_json::from_value(json!({
            "typeKey": "pricing-transport",
            "document": {"categories": [{"name": "A", "rows": []}, {"name": "B", "rows": []}]},
            "dirty": false,
            "status": "ready"
        }))
        .unwrap();
        let html = render_editor(&schema, &session, None, &[]).into_string();
        assert!(html.contains(r#"name="f:categories[0].name" value="A""#));
        assert!(html.contains(r#"value="move:categories:0:1""#));
        assert!(html.contains(r#"value="move:categories:1:0""#));
        assert!(html.contains(r#"value="remove:categories:1""#));
        assert!(html.contains(r#"value="append:categories[1].rows""#));
        assert!(html.contains(r#"value="append:categories""#));
        assert!(html.contains(SESSION_FIELD));
    }

    #[test]
    fn notice_is_shown() {
        let schema = pricing();
        let session: EditorSession = serde_json::from_value(json!({
            "typeKey": "pricing-transport",
            "document": {},
            "dirty": true,
            "status": "saveFailed"
        }))
        .unwrap();
        let notice: Notice =
            serde_json::from_value(json!({"level": "error", "message": "Saving failed"})).unwrap();
        let html = render_editor(&schema, &session, Some(&notice), &[]).into_string();
        assert!(html.contains("notice-error"));
        assert!(html.contains("Saving failed"));
        assert!(html.contains("Unsaved changes"));
    }
}
