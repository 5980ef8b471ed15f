// src/core/sanitize.rs

/// Collapse runs of whitespace into a single space and trim.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Join already-trimmed strings with single spaces, then collapse whatever
/// whitespace survived inside each piece.
pub fn join_stripped<S: AsRef<str>>(parts: &[S]) -> String {
    let mut out = s!();
    for p in parts {
        let p = p.as_ref().trim();
        if p.is_empty() { continue; }
        if !out.is_empty() { out.push(' '); }
        out.push_str(p);
    }
    normalize_ws(&out)
}

/// Rest of `text` after a leading `label`, or `None` if it does not start
/// with it. Whitespace inside the prefix is not significant, so
/// `Product Phase :` matches `Product Phase:` (labels split across inline
/// tags pick up an extra space).
fn after_label<'a>(text: &'a str, label: &str) -> Option<&'a str> {
    let mut rest = text;
    for want in label.chars().filter(|c| !c.is_whitespace()) {
        rest = rest.trim_start().strip_prefix(want)?;
    }
    Some(rest)
}

pub fn starts_with_label(text: &str, label: &str) -> bool {
    after_label(text.trim_start(), label).is_some()
}

/// Drop a leading `label` and trim what is left.
/// Text that does not start with the label is returned trimmed.
pub fn strip_label<'a>(text: &'a str, label: &str) -> &'a str {
    let t = text.trim_start();
    after_label(t, label).unwrap_or(t).trim()
}

/// Split `Label: value` on the first `:` only.
/// Returns `None` when there is no colon.
pub fn split_label(text: &str) -> Option<(&str, &str)> {
    let (label, value) = text.split_once(':')?;
    Some((label.trim(), value.trim()))
}
