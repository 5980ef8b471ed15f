// src/specs/product.rs
//! Scraping *spec* for a product page.
//!
//! Purpose:
//! - Read `Product Phase:` and `Est Released Time:` from the first block whose
//!   visible text starts with the label; the value is every string under that
//!   block, space-joined, with the label itself removed.
//! - Hand the description container (`div#tab-description` by default) to
//!   [`description::parse`](super::description::parse).
//!
//! Missing markers are not errors: the field is `None` (or the description empty).
//! Only the fetch itself can fail, and then there is no record at all.

use std::time::Duration;

use chrono::{Local, NaiveDateTime};
use scraper::Selector;

use super::description;
use crate::config::consts::{PHASE_LABEL, RELEASED_TIME_LABEL};
use crate::core::sanitize::{join_stripped, strip_label};
use crate::core::{Fetcher, HtmlPage, MarkupTree};
use crate::error::FetchError;
use crate::record::ProductRecord;

/// Fetch `url` and extract a record stamped with the current time.
pub fn fetch(
    fetcher: &dyn Fetcher,
    url: &str,
    timeout: Duration,
    container: &Selector,
) -> Result<ProductRecord, FetchError> {
    let markup = fetcher.fetch(url, timeout)?;
    Ok(from_markup(&markup, container, Local::now().naive_local()))
}

pub fn from_markup(markup: &str, container: &Selector, checked_at: NaiveDateTime) -> ProductRecord {
    let page = HtmlPage::parse(markup, container);
    extract(&page, checked_at)
}

pub fn extract(tree: &impl MarkupTree, checked_at: NaiveDateTime) -> ProductRecord {
    let block = tree
        .container_leaves()
        .map(|leaves| description::parse(&leaves))
        .unwrap_or_default();

    ProductRecord {
        phase: labelled_value(tree, PHASE_LABEL),
        released_time: labelled_value(tree, RELEASED_TIME_LABEL),
        description: block.fields,
        unlabeled_notes: block.notes,
        checked_at,
    }
}

/// Label found with nothing after it counts as absent.
fn labelled_value(tree: &impl MarkupTree, label: &str) -> Option<String> {
    let strings = tree.find_first_text_starting_with(label)?;
    let joined = join_stripped(&strings);
    let value = strip_label(&joined, label);
    (!value.is_empty()).then(|| s!(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TextLeaf;

    /// Hand-built tree; no HTML involved.
    struct FakeTree {
        phase: Option<Vec<&'static str>>,
        leaves: Option<Vec<TextLeaf>>,
    }

    impl MarkupTree for FakeTree {
        fn find_first_text_starting_with(&self, label: &str) -> Option<Vec<String>> {
            if label == PHASE_LABEL {
                self.phase.as_ref().map(|v| v.iter().map(|s| s!(*s)).collect())
            } else {
                None
            }
        }

        fn container_leaves(&self) -> Option<Vec<TextLeaf>> {
            self.leaves.clone()
        }
    }

    fn t0() -> NaiveDateTime {
        NaiveDateTime::default()
    }

    #[test]
    fn phase_value_drops_label_and_collapses_whitespace() {
        let tree = FakeTree {
            phase: Some(vec!["Product Phase:", "Pre-order", "(closing  soon)"]),
            leaves: None,
        };
        let rec = extract(&tree, t0());
        assert_eq!(rec.phase.as_deref(), Some("Pre-order (closing soon)"));
        assert_eq!(rec.released_time, None);
        assert!(rec.description.is_empty());
        assert!(rec.unlabeled_notes.is_empty());
    }

    #[test]
    fn bare_label_is_absent() {
        let tree = FakeTree { phase: Some(vec!["Product Phase:"]), leaves: None };
        assert_eq!(extract(&tree, t0()).phase, None);
    }

    #[test]
    fn container_feeds_description() {
        let tree = FakeTree {
            phase: None,
            leaves: Some(vec![TextLeaf::new("Scale: 1/4"), TextLeaf::new("Limited run")]),
        };
        let rec = extract(&tree, t0());
        assert_eq!(rec.description.get("Scale"), Some(&s!("1/4")));
        assert_eq!(rec.unlabeled_notes, vec![s!("Limited run")]);
    }
}
