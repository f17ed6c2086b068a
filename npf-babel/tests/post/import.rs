//! Posts and pages responses → content records.

use npf_babel::post::{import_pages, import_posts, PostDefaults};
use npf_babel::{ConvertError, FormatTags};

fn response() -> String {
    std::fs::read_to_string("tests/fixtures/posts_response.json").unwrap()
}

#[test]
fn test_records_follow_post_order() {
    let results = import_posts(&response(), &PostDefaults::default(), &FormatTags::default()).unwrap();
    assert_eq!(results.len(), 3);

    let first = results[0].as_ref().unwrap();
    assert_eq!(first.title, "First");
    assert_eq!(
        first.content,
        "<!-- wp:paragraph --><p><strong>Hello</strong></p><!-- /wp:paragraph -->"
    );
    assert_eq!(first.date.as_deref(), Some("2023-11-14 22:13:20"));
    assert!(first.sticky);

    assert_eq!(
        results[1],
        Err(ConvertError::MissingField {
            index: 0,
            block: "image",
            field: "media.url"
        })
    );

    let legacy = results[2].as_ref().unwrap();
    assert_eq!(legacy.content, "<p>old body</p>");
    assert_eq!(legacy.date, None);
    assert!(!legacy.sticky);
}

#[test]
fn test_defaults_reach_every_record() {
    let defaults = PostDefaults {
        status: "draft".to_string(),
        author: 3,
    };
    let results = import_posts(&response(), &defaults, &FormatTags::default()).unwrap();
    for record in results.into_iter().flatten() {
        assert_eq!(record.status, "draft");
        assert_eq!(record.author, 3);
    }
}

#[test]
fn test_record_json_shape() {
    let results = import_posts(&response(), &PostDefaults::default(), &FormatTags::default()).unwrap();
    let value = serde_json::to_value(results[2].as_ref().unwrap()).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "title": "Legacy",
            "content": "<p>old body</p>",
            "date": null,
            "status": "publish",
            "author": 1,
            "sticky": false
        })
    );
}

fn pages() -> String {
    std::fs::read_to_string("tests/fixtures/pages_response.json").unwrap()
}

#[test]
fn test_page_records_follow_page_order() {
    let results = import_pages(&pages(), &PostDefaults::default(), &FormatTags::default()).unwrap();
    assert_eq!(results.len(), 3);

    let about = results[0].as_ref().unwrap();
    assert_eq!(about.title, "About");
    assert_eq!(about.content, "<p>Who we are</p>");
    assert_eq!(about.status, "publish");
    assert_eq!(about.menu_order, 1);
    assert_eq!(about.slug.as_deref(), Some("about"));
    assert_eq!(about.date.as_deref(), Some("2023-11-14 22:13:20"));

    assert!(matches!(results[1], Err(ConvertError::Malformed { .. })));

    let notes = results[2].as_ref().unwrap();
    assert_eq!(notes.status, "draft");
    assert_eq!(notes.menu_order, 0);
    assert_eq!(notes.slug, None);
    assert_eq!(notes.modified.as_deref(), Some("2023-11-14 23:13:20"));
}

#[test]
fn test_page_record_json_shape() {
    let results = import_pages(&pages(), &PostDefaults::default(), &FormatTags::default()).unwrap();
    let value = serde_json::to_value(results[0].as_ref().unwrap()).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "title": "About",
            "content": "<p>Who we are</p>",
            "status": "publish",
            "author": 1,
            "menu_order": 1,
            "date": "2023-11-14 22:13:20",
            "modified": "2023-11-14 22:13:20",
            "slug": "about"
        })
    );
}
