use maud::{html, Markup};
use motoserwis_core::document::FieldPath;
use motoserwis_core::editor::ops::get_at;
use motoserwis_core::editor::{FieldSpec, PageRegistry, PageSchema, Widget};
use serde_json::Value;

use super::{base_document, leaf_text};

/// Public rendering of one page from its declaration and content.
pub fn render_page(
    registry: &PageRegistry,
    schema: &PageSchema,
    content: &Value,
    refresh_secs: Option<u64>,
) -> Markup {
    let root = FieldPath::root();
    let body = html! {
        header.site-header { (nav(registry)) }
        main {
            h1 { (schema.title) }
            @for group in &schema.groups {
                section {
                    @for field in &group.fields {
                        (render_field(field, &root, content))
                    }
                }
            }
        }
    };
    base_document(&schema.title, refresh_secs, body)
}

pub fn not_found(registry: &PageRegistry) -> Markup {
    let body = html! {
        header.site-header { (nav(registry)) }
        main {
            h1 { "Page not found" }
            p { a href="/" { "Back to the home page" } }
        }
    };
    base_document("Not found", None, body)
}

fn nav(registry: &PageRegistry) -> Markup {
    html! {
        nav {
            @for page in registry.pages() {
                a href=(page_href(page)) { (page.title) }
            }
        }
    }
}

/// Public URL of a page; `home` is the site root.
pub fn page_href(page: &PageSchema) -> String {
    if page.type_key.as_str() == "home" {
        "/".to_string()
    } else {
        format!("/pages/{}", page.type_key)
    }
}

fn render_field(field: &FieldSpec, base: &FieldPath, doc: &Value) -> Markup {
    let path = base.join(&field.path);
    match &field.widget {
        Widget::Text => {
            let text = leaf_text(doc, &path);
            html! {
                @if !text.is_empty() {
                    p.text { (text) }
                }
            }
        }
        Widget::TextArea => {
            let text = leaf_text(doc, &path);
            html! {
                @for paragraph in text.split("\n\n").filter(|p| !p.trim().is_empty()) {
                    p { (paragraph) }
                }
            }
        }
        Widget::Image => {
            let src = leaf_text(doc, &path);
            html! {
                @if !src.is_empty() {
                    img src=(src) alt=(field.label) loading="lazy";
                }
            }
        }
        Widget::List { item_fields, .. } => {
            let count = get_at(doc, &path)
                .and_then(Value::as_array)
                .map_or(0, Vec::len);
            html! {
                @if count > 0 {
                    ul.list {
                        @for i in 0..count {
                            li {
                                @for item_field in item_fields {
                                    (render_field(item_field, &path.index(i), doc))
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use motoserwis_core::TypeKey;
    use serde_json::json;

    #[test]
    fn renders_stored_values_and_lists() {
        let registry = PageRegistry::builtin().unwrap();
        let schema = registry.get(&TypeKey::parse("pricing-transport").unwrap()).unwrap();
        let content = json!({
            "title": "Ceny",
            "categories": [{"name": "Lokalnie", "rows": [{"service": "Do 20 km", "price": "150 zł"}]}]
        });
        let html = render_page(&registry, schema, &content, None).into_string();
        assert!(html.contains("Ceny"));
        assert!(html.contains("Lokalnie"));
        assert!(html.contains("150 zł"));
        assert!(!html.contains("http-equiv"));
    }

    #[test]
    fn escapes_content() {
        let registry = PageRegistry::builtin().unwrap();
        let schema = registry.get(&TypeKey::parse("contact").unwrap()).unwrap();
        let content = json!({"title": "<script>alert(1)</script>"});
        let html = render_page(&registry, schema, &content, Some(60)).into_string();
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
