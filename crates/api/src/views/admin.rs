use chrono::{DateTime, Utc};
use maud::{html, Markup};
use motoserwis_core::assets::Asset;
use motoserwis_core::document::ContentSummary;
use motoserwis_core::editor::PageRegistry;

use super::base_document;

pub fn login_page(error: Option<&str>) -> Markup {
    let body = html! {
        main {
            h1 { "Admin sign-in" }
            @if let Some(error) = error {
                div.notice.notice-error role="alert" { (error) }
            }
            form method="post" action="/admin/login" {
                label { span { "Email" } input type="email" name="email" required; }
                label { span { "Password" } input type="password" name="password" required; }
                button type="submit" { "Sign in" }
            }
        }
    };
    base_document("Sign in", None, body)
}

/// Page list with last-saved times, plus the image library.
pub fn dashboard(
    user_name: &str,
    registry: &PageRegistry,
    stored: Option<&[ContentSummary]>,
    images: &[Asset],
) -> Markup {
    let updated_at = |key: &str| -> Option<DateTime<Utc>> {
        stored?
            .iter()
            .find(|s| s.type_key.as_str() == key)
            .map(|s| s.updated_at)
    };
    let body = html! {
        header.site-header {
            "Signed in as " (user_name)
            form method="post" action="/admin/logout" style="display:inline; margin-left:1rem" {
                button type="submit" { "Sign out" }
            }
        }
        main {
            h1 { "Pages" }
            @if stored.is_none() {
                div.notice.notice-info { "Could not read saved content; editors will start from defaults." }
            }
            table {
                thead { tr { th { "Page" } th { "Key" } th { "Last saved" } } }
                tbody {
                    @for page in registry.pages() {
                        tr {
                            td { a href=(format!("/admin/{}", page.type_key)) { (page.title) } }
                            td { code { (page.type_key) } }
                            td {
                                @match updated_at(page.type_key.as_str()) {
                                    Some(at) => { (at.format("%Y-%m-%d %H:%M UTC")) }
                                    None => { em { "never (defaults)" } }
                                }
                            }
                        }
                    }
                }
            }
            h2 { "Images" }
            @if images.is_empty() {
                p { "No images uploaded yet." }
            } @else {
                ul {
                    @for image in images {
                        li { a href=(image.url) target="_blank" { (image.file_name) } }
                    }
                }
            }
        }
    };
    base_document("Admin", None, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use motoserwis_core::TypeKey;

    #[test]
    fn dashboard_lists_pages_and_save_times() {
        let registry = PageRegistry::builtin().unwrap();
        let at = Utc::now();
        let stored = vec![ContentSummary {
            type_key: TypeKey::parse("home").unwrap(),
            created_at: at,
            updated_at: at,
        }];
        let html = dashboard("Admin", &registry, Some(&stored), &[]).into_string();
        assert!(html.contains(r#"href="/admin/services-serwis""#));
        assert!(html.contains(&at.format("%Y-%m-%d %H:%M UTC").to_string()));
        assert!(html.contains("never (defaults)"));
        assert!(html.contains("No images uploaded yet."));
    }

    #[test]
    fn login_shows_error() {
        let html = login_page(Some("Invalid email or password")).into_string();
        assert!(html.contains("Invalid email or password"));
        assert!(html.contains(r#"action="/admin/login""#));
    }
}
