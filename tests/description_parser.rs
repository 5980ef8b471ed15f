// tests/description_parser.rs
//
// Description block parsing against real markup.
use chrono::NaiveDateTime;
use scraper::Selector;

use statue_watch::core::{HtmlPage, MarkupTree};
use statue_watch::specs::{description, product};

fn container() -> Selector {
    Selector::parse("div#tab-description").unwrap()
}

fn parse_html(html: &str) -> description::DescriptionBlock {
    let sel = container();
    let page = HtmlPage::parse(html, &sel);
    page.container_leaves()
        .map(|leaves| description::parse(&leaves))
        .unwrap_or_default()
}

#[test]
fn duplicate_labels_merge_in_first_seen_order() {
    let block = parse_html(
        r#"<div id="tab-description">
             <p>Material: resin</p>
             <p>Scale: 1/4</p>
             <p>Material: hand-painted</p>
           </div>"#,
    );
    assert_eq!(block.fields["Material"], "resin; hand-painted");
    let labels: Vec<&str> = block.fields.keys().map(String::as_str).collect();
    assert_eq!(labels, ["Material", "Scale"]);
}

#[test]
fn splits_only_on_first_colon() {
    let block = parse_html(r#"<div id="tab-description"><li>Scale: 1:4</li></div>"#);
    assert_eq!(block.fields["Scale"], "1:4");
}

#[test]
fn unlabeled_text_becomes_notes_in_order() {
    let block = parse_html(
        r#"<div id="tab-description">
             <p>Limited to 300 pieces</p>
             <p>Size: 60cm</p>
             <p>Limited to 300 pieces</p>
             <p>  Artist proof included </p>
           </div>"#,
    );
    assert_eq!(
        block.notes,
        ["Limited to 300 pieces", "Limited to 300 pieces", "Artist proof included"]
    );
    assert_eq!(block.fields.len(), 1);
}

#[test]
fn nested_markup_is_walked_depth_first() {
    let block = parse_html(
        r#"<div id="tab-description">
             <div><span>Edition:</span> <b>Deluxe</b></div>
             <ul><li><em>Height: 45cm</em></li></ul>
           </div>"#,
    );
    // "Edition:" is its own leaf, so its value is empty and "Deluxe" is a note.
    assert_eq!(block.fields["Edition"], "");
    assert_eq!(block.fields["Height"], "45cm");
    assert_eq!(block.notes, ["Deluxe"]);
}

#[test]
fn absent_container_yields_nothing() {
    let block = parse_html(r#"<div id="tab-reviews"><p>Scale: 1/6</p></div>"#);
    assert!(block.fields.is_empty());
    assert!(block.notes.is_empty());
}

#[test]
fn malformed_markup_never_fails() {
    let block = parse_html(r#"<div id="tab-description"><p>Scale: 1/4<p><<<>>"#);
    assert_eq!(block.fields["Scale"], "1/4");
}

#[test]
fn full_page_extraction() {
    let sel = container();
    let html = r#"<html><body>
        <header>Figure Shop</header>
        <p class="phase">Product Phase: <span> Pre-order </span></p>
        <p class="eta">Est Released Time:   <span>Q4
          2025</span></p>
        <div id="tab-description"><p>Scale: 1/4</p><p>Material: PU resin</p></div>
      </body></html>"#;

    let at = NaiveDateTime::default();
    let rec = product::from_markup(html, &sel, at);
    assert_eq!(rec.phase.as_deref(), Some("Pre-order"));
    assert_eq!(rec.released_time.as_deref(), Some("Q4 2025"));
    assert_eq!(rec.description["Scale"], "1/4");
    assert_eq!(rec.description["Material"], "PU resin");
    assert_eq!(rec.checked_at, at);
}

#[test]
fn page_without_markers_is_all_none() {
    let sel = container();
    let rec = product::from_markup("<html><body><p>Sold out</p></body></html>", &sel, NaiveDateTime::default());
    assert_eq!(rec.phase, None);
    assert_eq!(rec.released_time, None);
    assert!(rec.description.is_empty());
}

#[test]
fn labels_wrapped_in_inline_tags_are_stripped() {
    let sel = container();
    let html = r#"<html><body>
        <h1>Fig</h1>
        <p><b>Product Phase</b>: Pre-order</p>
        <p><strong>Est Released Time</strong> : <em>2025-04</em></p>
      </body></html>"#;

    let rec = product::from_markup(html, &sel, NaiveDateTime::default());
    assert_eq!(rec.phase.as_deref(), Some("Pre-order"));
    assert_eq!(rec.released_time.as_deref(), Some("2025-04"));
}
