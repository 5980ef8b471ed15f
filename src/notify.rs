// src/notify.rs
//
// Message composition and delivery.
//
// `compose` is pure: same item + diffs always render the same text.
// Delivery goes through `Notifier`; failures are reported, never retried.

use std::io::Write;
use std::time::Duration;

use reqwest::blocking::Client;
use serde::Serialize;

use crate::config::consts::{TELEGRAM_API, UNKNOWN, USER_AGENT};
use crate::diff::{FieldDiff, PHASE, RELEASED_TIME};
use crate::error::{ConfigError, NotifyError};

pub const HEADER: &str = "🔄 *Status changed!*";

fn field_title(field: &str) -> &str {
    match field {
        PHASE => "Status",
        RELEASED_TIME => "Release time",
        other => other,
    }
}

/// Backslash-escape Telegram (legacy) Markdown entity characters in plain text.
fn escape_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '_' | '*' | '`' | '[') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// Code spans take no escapes; a backtick would close the span early.
fn code_span(value: &str) -> String {
    join!("`", &value.replace('`', "'"), "`")
}

fn diff_line(d: &FieldDiff) -> String {
    let old = d.old_value.as_deref().unwrap_or(UNKNOWN);
    format!(
        "• {}: {} → {}",
        escape_markdown(field_title(&d.field_name)),
        code_span(old),
        code_span(&d.new_value)
    )
}

/// Render one message for `item`, or `None` when there is nothing to say.
pub fn compose(item: &str, diffs: &[FieldDiff]) -> Option<String> {
    if diffs.is_empty() {
        return None;
    }
    let mut lines = Vec::with_capacity(diffs.len() + 2);
    lines.push(s!(HEADER));
    lines.push(join!("• Item: ", &escape_markdown(item)));
    lines.extend(diffs.iter().map(diff_line));
    Some(lines.join("\n"))
}

pub trait Notifier {
    /// Deliver `message` to `destination` (a chat id for Telegram).
    fn send(&self, destination: &str, message: &str) -> Result<(), NotifyError>;
}

/* ---------------- Telegram ---------------- */

pub struct TelegramNotifier {
    client: Client,
    endpoint: String,
}

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'static str,
}

impl TelegramNotifier {
    pub fn new(token: &str) -> Result<Self, ConfigError> {
        if token.trim().is_empty() {
            return Err(ConfigError::MissingCredential("TELEGRAM_BOT_TOKEN"));
        }
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: format!("{TELEGRAM_API}/bot{}/sendMessage", token.trim()),
        })
    }
}

impl Notifier for TelegramNotifier {
    fn send(&self, destination: &str, message: &str) -> Result<(), NotifyError> {
        let payload = SendMessage { chat_id: destination, text: message, parse_mode: "Markdown" };
        let resp = self
            .client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .map_err(|e| NotifyError::Request(e.without_url().to_string()))?;

        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }
        let body = resp.text().unwrap_or_else(|_| s!("<body unavailable>"));
        Err(NotifyError::Status { status: status.as_u16(), body })
    }
}

/* ---------------- Console (dry run) ---------------- */

pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn send(&self, _destination: &str, message: &str) -> Result<(), NotifyError> {
        let mut out = std::io::stdout().lock();
        writeln!(out, "{message}\n").map_err(|e| NotifyError::Request(e.to_string()))
    }
}
