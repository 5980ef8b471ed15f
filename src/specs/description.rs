// src/specs/description.rs
//! Description block parser.
//!
//! Turns the text leaves of the description container into labelled values
//! plus free-standing notes:
//! - `Label: value` leaves split on the **first** colon (`Scale: 1:4` → `Scale` / `1:4`).
//! - A label seen again is appended with `"; "`; the first-seen position is kept.
//! - Leaves without a colon become notes, verbatim and in order.
//! - Blank leaves, and leaves whose parent element has no visible text, are skipped.
//!
//! Never fails: no leaves means an empty description and no notes.

use crate::config::consts::DUPLICATE_SEP;
use crate::core::TextLeaf;
use crate::core::sanitize::split_label;
use crate::record::Description;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DescriptionBlock {
    pub fields: Description,
    pub notes: Vec<String>,
}

pub fn parse(leaves: &[TextLeaf]) -> DescriptionBlock {
    let mut block = DescriptionBlock::default();

    for leaf in leaves {
        let text = leaf.text.trim();
        if text.is_empty() || !leaf.parent_has_text {
            continue;
        }

        match split_label(text) {
            Some((label, value)) => merge(&mut block.fields, label, value),
            None => block.notes.push(s!(text)),
        }
    }
    block
}

fn merge(fields: &mut Description, label: &str, value: &str) {
    match fields.get_mut(label) {
        Some(existing) => {
            existing.push_str(DUPLICATE_SEP);
            existing.push_str(value);
        }
        None => {
            fields.insert(s!(label), s!(value));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaves(texts: &[&str]) -> Vec<TextLeaf> {
        texts.iter().map(|t| TextLeaf::new(*t)).collect()
    }

    #[test]
    fn empty_input_is_empty_block() {
        assert_eq!(parse(&[]), DescriptionBlock::default());
    }

    #[test]
    fn leaf_under_blank_parent_is_skipped() {
        let mut input = leaves(&["Scale: 1/4"]);
        input.push(TextLeaf { text: s!("Ghost: yes"), parent_has_text: false });
        let block = parse(&input);
        assert_eq!(block.fields.len(), 1);
        assert!(!block.fields.contains_key("Ghost"));
    }

    #[test]
    fn empty_label_is_still_a_label() {
        let block = parse(&leaves(&[": orphan value"]));
        assert_eq!(block.fields.get(""), Some(&s!("orphan value")));
    }
}
