// Tests for the public library API
// WHY: Behavior external callers rely on must hold end to end, not only per module

use pagewright::content::is_truthy;
use pagewright::segmenter::{split_text_with_emails, DEFAULT_KEY_PREFIX};
use pagewright::{
    compact_label, extract_text, faq_page_json_ld, linkify_plain_text, linkify_portable_value, plain_text,
    prepare_rich_text, resolve_href, resolve_link_label, CompactLabelRules, FaqBlock, HeaderModel, LinkValue,
    Linkified, Navigation, RenderedText, RichValue, SiteSettings,
};
use serde_json::{json, Value};

#[path = "integration/mod.rs"]
mod test_utils;
use test_utils::{paragraph, sample_faq, sample_navigation, TestFixture};

#[test]
fn test_split_pieces_concatenate_to_input() {
    let inputs = [
        "",
        "no address here",
        "a@b.co",
        "Write to sales@acme.test or support@acme.test!",
        "edge:first@x.io,second@y.org.",
        "caf\u{e9} \u{2014} m\u{fc}ller@acme.test",
    ];

    for input in inputs {
        let pieces = split_text_with_emails(input);
        let joined: String = pieces.iter().map(|piece| piece.value).collect();
        assert_eq!(joined, input, "pieces must reassemble {input:?}");
        assert!(!pieces.is_empty());
    }
}

#[test]
fn test_plain_text_linkify_keeps_text() {
    let text = "Questions? Email help@acme.test or call.";
    let linkified = linkify_plain_text(text, DEFAULT_KEY_PREFIX);
    assert_eq!(linkified.plain(), text);

    let Linkified::Fragments(fragments) = linkified else {
        panic!("expected fragments");
    };
    let keys: Vec<&str> = fragments.iter().map(|fragment| fragment.key()).collect();
    assert_eq!(keys, ["email-text-0", "email-mail-1", "email-text-2"]);
}

#[test]
fn test_portable_linkify_is_idempotent_and_pure() {
    let document = json!([
        paragraph("p1", &["Reach ", "sales@acme.test", " today"]),
        {"_type": "image", "asset": {"_ref": "img-1"}},
        paragraph("p2", &["No address here"])
    ]);
    let original = document.clone();

    let once = linkify_portable_value(&document);
    assert_eq!(document, original, "input must not be mutated");

    let twice = linkify_portable_value(&once);
    assert_eq!(once, twice, "second pass must be a no-op");

    // non-block entries and untouched blocks survive verbatim
    assert_eq!(once[1], original[1]);
    assert_eq!(once[2], original[2]);

    // text content is preserved
    assert_eq!(plain_text(&once), plain_text(&original));

    let mark_defs = once[0]["markDefs"].as_array().unwrap();
    assert_eq!(mark_defs.len(), 1);
    assert_eq!(mark_defs[0]["href"], "mailto:sales@acme.test");
    assert_eq!(once[0]["style"], "normal");
}

#[test]
fn test_linkify_non_array_is_identity() {
    for value in [json!(null), json!("hi@acme.test"), json!({"_type": "block"}), json!(12)] {
        assert_eq!(linkify_portable_value(&value), value);
    }
}

#[test]
fn test_extract_text_shapes() {
    let value = json!([
        "Hello",
        {"text": "world"},
        {"current": "slug"},
        {"children": [{"text": "a"}, {"text": "b"}]},
        3,
        null
    ]);
    assert_eq!(extract_text(&RichValue::from(&value)), "Hello world slug ab 3");
    assert!(!is_truthy(&json!("")));
    assert!(is_truthy(&json!([])));
}

#[test]
fn test_href_resolution_table() {
    let cases: [(Value, &str); 8] = [
        (json!(null), "#"),
        (json!("#top"), "#top"),
        (json!("mailto:a@b.co"), "mailto:a@b.co"),
        (json!("https://acme.test/path?q=1"), "https://acme.test/path?q=1"),
        (json!("services"), "/services"),
        (json!({"internal": {"slug": {"current": "home"}}}), "/"),
        (json!({"slug": {"current": "/pricing"}}), "/pricing"),
        (json!({"href": "contact"}), "/contact"),
    ];

    for (input, expected) in cases {
        assert_eq!(resolve_href(&LinkValue::from(&input)), expected, "input {input}");
    }
}

#[test]
fn test_label_pipeline() {
    let link = LinkValue::from(json!({"internal": {"title": "Managed IT Services and Support Plans"}}));
    let label = resolve_link_label(&RichValue::from("Acme Industries"), &link, "Acme Industries Ltd");
    assert_eq!(label, "Managed IT Services and Support Plans");

    let compact = compact_label(&RichValue::Text(label), &CompactLabelRules::default());
    assert_eq!(compact, "Managed IT Services and S...");
}

#[test]
fn test_rich_text_classification() {
    assert!(prepare_rich_text(&json!(false), "k").is_nothing());
    assert!(matches!(prepare_rich_text(&json!("hi"), "k"), RenderedText::Inline(_)));
    assert!(matches!(prepare_rich_text(&json!([paragraph("p", &["x"])]), "k"), RenderedText::Document(_)));
}

#[test]
fn test_faq_view_and_structured_data() {
    let block: FaqBlock = serde_json::from_value(sample_faq()).unwrap();

    let page = faq_page_json_ld(&block.items).unwrap();
    assert_eq!(page.main_entity.len(), 1);
    assert_eq!(page.main_entity[0].accepted_answer.text, "Yes. Write to orders@acme.test for rates.");

    let view = block.prepare().unwrap();
    assert_eq!(view.entries.len(), 2);
    let RenderedText::Document(answer) = &view.entries[0].answer else {
        panic!("expected document answer");
    };
    let answer = serde_json::to_value(answer).unwrap();
    assert_eq!(answer[0]["markDefs"][0]["href"], "mailto:orders@acme.test");
    assert!(view.entries[1].answer.is_nothing());
}

#[test]
fn test_header_model_from_sample_navigation() {
    let navigation: Navigation = serde_json::from_value(sample_navigation()).unwrap();
    let settings = SiteSettings::from_json_str(r#"{"siteTitle": "Acme Inc."}"#).unwrap();
    let header = HeaderModel::build(&navigation, &settings, &settings.site_title);

    let labels: Vec<&str> = header.links.iter().map(|entry| entry.label.as_str()).collect();
    assert_eq!(labels, ["Welcome", "Our Services", "About", "Blog"]);

    let hrefs: Vec<&str> = header.links.iter().map(|entry| entry.link.href.as_str()).collect();
    assert_eq!(hrefs, ["/", "/our-services", "/about", "https://blog.acme.test/"]);

    assert_eq!(header.links[2].children.len(), 1);
    assert_eq!(header.links[2].children[0].label, "Team");
    assert_eq!(header.links[2].children[0].link.href, "/about/team");

    assert_eq!(header.phone.as_ref().map(|phone| phone.href.as_str()), Some("tel:+1 555 0100"));
    assert_eq!(header.cta.as_ref().map(|cta| cta.href.as_str()), Some("/contact"));
    assert_eq!(header.brand_text, "Acme Inc.");
}

#[tokio::test]
async fn test_settings_load_from_file() {
    let fixture = TestFixture::new();
    let path = fixture.write_json(
        "settings.json",
        &json!({"siteTitle": "Acme", "headerBackgroundColor": "#224466", "labelRules": {"maxChars": 10, "keepChars": 7}}),
    );

    let settings = SiteSettings::load(&path).await.unwrap();
    assert_eq!(settings.site_title, "Acme");
    assert_eq!(settings.header_background(), "#224466");
    assert_eq!(settings.label_rules.truncate("Extremely long"), "Extreme...");
}

#[tokio::test]
async fn test_settings_load_rejects_bad_json() {
    let fixture = TestFixture::new();
    let path = fixture.write_raw("settings.json", "{\"siteTitle\": ");

    let err = SiteSettings::load(&path).await.unwrap_err();
    assert!(format!("{err:#}").contains("Failed to parse settings file"));
}
