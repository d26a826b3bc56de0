use std::{ffi::OsStr, time::Duration};

use chrono::{DateTime, Local, NaiveDate, Utc};
use encoding_rs::Encoding;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::{Result, SyncError};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub fn generate_nonce() -> String {
    Uuid::new_v4().to_string()
}

/// Formats an instant the way Trakt expects `watched_at`, with the
/// milliseconds always zero.
pub fn format_watched_at(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%dT%H:%M:%S.000Z").to_string()
}

pub fn format_diary_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Decodes a raw invocation argument from the encoding named by `label` into
/// UTF-8.
///
/// `label` is any WHATWG encoding label, e.g. `UTF-8`, `latin1` or
/// `windows-1252`. Undecodable bytes become U+FFFD rather than failing.
pub fn decode_argument(raw: &OsStr, label: &str) -> Result<String> {
    let encoding = Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| SyncError::UnknownEncoding(label.to_string()))?;
    let (text, _) = encoding.decode_without_bom_handling(raw.as_encoded_bytes());
    Ok(text.into_owned())
}

pub fn http_client() -> Result<Client> {
    let client = Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}

/// Fails with [`SyncError::Provider`] unless the response has a 2xx status.
///
/// The error message names `context` and includes the start of the response
/// body, which is where both services explain what went wrong.
pub fn ensure_success(res: Response, context: &str) -> Result<Response> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }

    let body = res.text().unwrap_or_default();
    let detail: String = body.trim().chars().take(200).collect();
    Err(SyncError::Provider(if detail.is_empty() {
        format!("{context} failed with status {status}")
    } else {
        format!("{context} failed with status {status}: {detail}")
    }))
}

/// Checks the status and deserializes the body into `T`.
///
/// A body that does not match `T` is a provider error, so shape mismatches
/// such as an empty search result surface with the endpoint that caused them.
pub fn read_json<T: DeserializeOwned>(res: Response, context: &str) -> Result<T> {
    let res = ensure_success(res, context)?;
    let body = res.text()?;
    serde_json::from_str(&body)
        .map_err(|e| SyncError::Provider(format!("Unexpected response from {context}: {e}")))
}
