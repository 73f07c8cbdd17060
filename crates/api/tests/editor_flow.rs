mod common;

use motoserwis_core::store::ContentStore;
use motoserwis_core::TypeKey;
use reqwest::header::COOKIE;
use reqwest::multipart::{Form, Part};
use serde_json::{json, Value};

fn pricing_session(categories: Value) -> String {
    json!({
        "typeKey": "pricing-transport",
        "document": {"title": "Prices", "categories": categories},
        "dirty": false,
        "status": "ready"
    })
    .to_string()
}

async fn stored(server: &common::TestServer, page: &str) -> Option<Value> {
    server
        .store
        .find(&TypeKey::parse(page).unwrap())
        .await
        .unwrap()
        .map(|doc| doc.content)
}

#[tokio::test]
async fn editor_opens_with_defaults() {
    let server = common::spawn().await;
    let cookie = server.session_cookie().await;
    let resp = server
        .client
        .get(server.url("/admin/pricing-transport"))
        .header(COOKIE, &cookie)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let html = resp.text().await.unwrap();
    assert!(html.contains("Transport prices"));
    assert!(html.contains("move:categories:0:1"));
}

#[tokio::test]
async fn unknown_editor_page_is_not_found() {
    let server = common::spawn().await;
    let cookie = server.session_cookie().await;
    let resp = server
        .client
        .get(server.url("/admin/blog"))
        .header(COOKIE, &cookie)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn move_is_local_until_saved() {
    let server = common::spawn().await;
    let cookie = server.session_cookie().await;
    let categories = json!([
        {"name": "A", "rows": []},
        {"name": "B", "rows": []},
        {"name": "C", "rows": []}
    ]);

    let resp = server
        .client
        .post(server.url("/admin/pricing-transport"))
        .header(COOKIE, &cookie)
        .multipart(
            Form::new()
                .text("__session", pricing_session(categories))
                .text("__action", "move:categories:0:2"),
        )
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let html = resp.text().await.unwrap();
    let (b, c, a) = (
        html.find("value=\"B\"").unwrap(),
        html.find("value=\"C\"").unwrap(),
        html.find("value=\"A\"").unwrap(),
    );
    assert!(b < c && c < a);
    assert!(stored(&server, "pricing-transport").await.is_none());

    let moved = json!([
        {"name": "B", "rows": []},
        {"name": "C", "rows": []},
        {"name": "A", "rows": []}
    ]);
    let resp = server
        .client
        .post(server.url("/admin/pricing-transport"))
        .header(COOKIE, &cookie)
        .multipart(
            Form::new()
                .text("__session", pricing_session(moved.clone()))
                .text("f:title", "Transport 2026")
                .text("__action", "save"),
        )
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(
        stored(&server, "pricing-transport").await.unwrap(),
        json!({"title": "Transport 2026", "categories": moved})
    );
}

#[tokio::test]
async fn append_uses_nested_template() {
    let server = common::spawn().await;
    let cookie = server.session_cookie().await;
    let resp = server
        .client
        .post(server.url("/admin/pricing-transport"))
        .header(COOKIE, &cookie)
        .multipart(
            Form::new()
                .text("__session", pricing_session(json!([{"name": "A", "rows": []}])))
                .text("__action", "append:categories[0].rows"),
        )
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let html = resp.text().await.unwrap();
    assert!(html.contains("f:categories[0].rows[0].service"));
    assert!(html.contains("f:categories[0].rows[0].price"));
}

#[tokio::test]
async fn malformed_action_is_bad_request() {
    let server = common::spawn().await;
    let cookie = server.session_cookie().await;
    let resp = server
        .client
        .post(server.url("/admin/pricing-transport"))
        .header(COOKIE, &cookie)
        .multipart(Form::new().text("__action", "explode"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn failed_save_keeps_edits_and_reports() {
    let server = common::spawn().await;
    let cookie = server.session_cookie().await;
    server.store.set_offline(true);
    let resp = server
        .client
        .post(server.url("/admin/pricing-transport"))
        .header(COOKIE, &cookie)
        .multipart(
            Form::new()
                .text("__session", pricing_session(json!([])))
                .text("f:title", "Unsaved title")
                .text("__action", "save"),
        )
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 500);
    let html = resp.text().await.unwrap();
    assert!(html.contains("Unsaved title"));
}

#[tokio::test]
async fn editor_upload_sets_image_field() {
    let server = common::spawn().await;
    let cookie = server.session_cookie().await;
    let session = json!({
        "typeKey": "home",
        "document": {"hero": {"title": "Hi"}},
        "dirty": false,
        "status": "ready"
    })
    .to_string();
    let resp = server
        .client
        .post(server.url("/admin/home"))
        .header(COOKIE, &cookie)
        .multipart(
            Form::new().text("__session", session).text("__action", "save").part(
                "upload:hero.image",
                Part::bytes(vec![1u8; 16])
                    .file_name("Hero.PNG")
                    .mime_str("image/png")
                    .unwrap(),
            ),
        )
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let saved = stored(&server, "home").await.unwrap();
    let url = saved["hero"]["image"].as_str().unwrap();
    let name = url.strip_prefix("/images/").unwrap();
    assert!(common::is_stamped(name, "hero.png"), "{name}");
    assert_eq!(saved["hero"]["title"], "Hi");
}

#[tokio::test]
async fn editor_rejects_non_image_upload_and_does_not_save() {
    let server = common::spawn().await;
    let cookie = server.session_cookie().await;
    let resp = server
        .client
        .post(server.url("/admin/home"))
        .header(COOKIE, &cookie)
        .multipart(
            Form::new().text("__action", "save").part(
                "upload:hero.image",
                Part::bytes(b"#!/bin/sh".to_vec())
                    .file_name("run.sh")
                    .mime_str("application/x-sh")
                    .unwrap(),
            ),
        )
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    assert!(resp.text().await.unwrap().contains("Image upload failed"));
    assert!(stored(&server, "home").await.is_none());
}

#[tokio::test]
async fn resubmitting_rendered_values_keeps_types() {
    let server = common::spawn().await;
    let cookie = server.session_cookie().await;
    let categories = json!([{"name": "A", "rows": [{"service": "Tow", "price": 99}]}]);
    let resp = server
        .client
        .post(server.url("/admin/pricing-transport"))
        .header(COOKIE, &cookie)
        .multipart(
            Form::new()
                .text("__session", pricing_session(categories.clone()))
                .text("f:title", "Prices")
                .text("f:intro", "")
                .text("f:categories[0].name", "A")
                .text("f:categories[0].rows[0].service", "Tow")
                .text("f:categories[0].rows[0].price", "99")
                .text("__action", "update"),
        )
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert!(!resp.text().await.unwrap().contains("Unsaved changes"));

    let resp = server
        .client
        .post(server.url("/admin/pricing-transport"))
        .header(COOKIE, &cookie)
        .multipart(
            Form::new()
                .text("__session", pricing_session(categories.clone()))
                .text("f:categories[0].rows[0].price", "120")
                .text("__action", "save"),
        )
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let saved = stored(&server, "pricing-transport").await.unwrap();
    assert_eq!(saved["categories"][0]["rows"][0]["price"], json!(120));
    assert_eq!(saved["title"], "Prices");
}

#[tokio::test]
async fn far_out_of_range_index_is_ignored() {
    let server = common::spawn().await;
    let cookie = server.session_cookie().await;
    let categories = json!([{"name": "A", "rows": []}]);
    for field in [
        "f:categories[100000000000].name",
        "f:categories[18446744073709551615].name",
    ] {
        let resp = server
            .client
            .post(server.url("/admin/pricing-transport"))
            .header(COOKIE, &cookie)
            .multipart(
                Form::new()
                    .text("__session", pricing_session(categories.clone()))
                    .text(field, "x")
                    .text("__action", "save"),
            )
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200, "{field}");
        let saved = stored(&server, "pricing-transport").await.unwrap();
        assert_eq!(saved["categories"], categories);
    }
}
