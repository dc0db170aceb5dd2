use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::stats::UserStats;

/// Result of a remote push. The spreadsheet endpoint yields an opaque
/// response, so a completed request is only ever "attempted", never
/// confirmed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The request was issued (or failed); either way nothing is known.
    Unconfirmed,
    /// No endpoint configured; nothing was sent.
    Skipped,
}

/// Client for the spreadsheet-backed progress store. Cheap to clone; worker
/// threads take a clone each.
#[derive(Clone)]
pub struct SheetClient {
    url: String,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct LoadResponse {
    result: String,
    data: Option<UserStats>,
}

#[derive(Debug, Serialize)]
struct SavePayload<'a> {
    email: &'a str,
    stats: &'a UserStats,
}

impl SheetClient {
    pub fn new(url: String, timeout: Duration) -> Self {
        Self { url, timeout }
    }

    pub fn is_configured(&self) -> bool {
        !self.url.is_empty()
    }

    /// Fetch persisted stats for `email`. Any transport failure, non-2xx
    /// status or malformed payload yields `None`, which the caller treats as
    /// "keep whatever is cached locally".
    pub fn load(&self, email: &str) -> Option<UserStats> {
        if !self.is_configured() {
            return None;
        }
        let body = fetch_stats_body(&self.url, email, self.timeout)?;
        parse_load_body(&body)
    }

    /// Push the full current stats for `email`. Fire-and-forget: the
    /// response is ignored and errors are only logged.
    pub fn save(&self, email: &str, stats: &UserStats) -> SaveOutcome {
        if !self.is_configured() {
            return SaveOutcome::Skipped;
        }
        let payload = SavePayload { email, stats };
        match serde_json::to_string(&payload) {
            Ok(body) => {
                post_stats_body(&self.url, body, self.timeout);
                SaveOutcome::Unconfirmed
            }
            Err(err) => {
                log::warn!("failed to serialize stats for remote save: {err}");
                SaveOutcome::Unconfirmed
            }
        }
    }
}

/// Parse a load response body. Anything but `result == "success"` with a
/// data payload means "no data available".
fn parse_load_body(body: &str) -> Option<UserStats> {
    match serde_json::from_str::<LoadResponse>(body) {
        Ok(response) if response.result == "success" => response.data,
        Ok(response) => {
            log::debug!("remote load returned result={:?}", response.result);
            None
        }
        Err(err) => {
            log::warn!("remote load returned malformed JSON: {err}");
            None
        }
    }
}

#[cfg(feature = "network")]
fn fetch_stats_body(url: &str, email: &str, timeout: Duration) -> Option<String> {
    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()
        .ok()?;
    // Cache-busting timestamp; the spreadsheet endpoint serves stale bodies
    // without it.
    let ts = chrono::Utc::now().timestamp_millis().to_string();
    let response = match client
        .get(url)
        .query(&[("email", email), ("t", ts.as_str())])
        .send()
    {
        Ok(r) => r,
        Err(err) => {
            log::warn!("remote load failed: {err}");
            return None;
        }
    };
    if !response.status().is_success() {
        log::warn!("remote load returned status {}", response.status());
        return None;
    }
    response.text().ok()
}

#[cfg(not(feature = "network"))]
fn fetch_stats_body(_url: &str, _email: &str, _timeout: Duration) -> Option<String> {
    None
}

#[cfg(feature = "network")]
fn post_stats_body(url: &str, body: String, timeout: Duration) {
    let client = match reqwest::blocking::Client::builder().timeout(timeout).build() {
        Ok(c) => c,
        Err(err) => {
            log::warn!("remote save client build failed: {err}");
            return;
        }
    };
    // The Apps Script endpoint expects the JSON body with a text/plain
    // content type; anything else trips its CORS preflight handling.
    let result = client
        .post(url)
        .header(reqwest::header::CONTENT_TYPE, "text/plain;charset=utf-8")
        .body(body)
        .send();
    if let Err(err) = result {
        log::warn!("remote save failed: {err}");
    }
}

#[cfg(not(feature = "network"))]
fn post_stats_body(_url: &str, _body: String, _timeout: Duration) {}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(url: &str) -> SheetClient {
        SheetClient::new(url.to_string(), Duration::from_secs(1))
    }

    #[test]
    fn unconfigured_load_is_absent() {
        assert!(client("").load("a@b.c").is_none());
    }

    #[test]
    fn unconfigured_save_is_skipped() {
        let outcome = client("").save("a@b.c", &UserStats::default());
        assert_eq!(outcome, SaveOutcome::Skipped);
    }

    #[test]
    fn parse_success_payload() {
        let body = r#"{"result":"success","data":{"email":"a@b.c","syllogisms":{"correct":2,"total":3,"streak":1}}}"#;
        let stats = parse_load_body(body).unwrap();
        assert_eq!(stats.total_correct(), 2);
        assert_eq!(stats.email.as_deref(), Some("a@b.c"));
    }

    #[test]
    fn parse_non_success_result_is_absent() {
        assert!(parse_load_body(r#"{"result":"error","data":null}"#).is_none());
        assert!(parse_load_body(r#"{"result":"success","data":null}"#).is_none());
    }

    #[test]
    fn parse_malformed_body_is_absent() {
        assert!(parse_load_body("<!doctype html><html>login</html>").is_none());
        assert!(parse_load_body("").is_none());
        assert!(parse_load_body(r#"{"data":{}}"#).is_none());
    }

    #[test]
    fn save_payload_shape() {
        let stats = UserStats::default().record_answer("syllogisms", true, "a@b.c");
        let payload = SavePayload {
            email: "a@b.c",
            stats: &stats,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["email"], "a@b.c");
        assert_eq!(json["stats"]["syllogisms"]["total"], 1);
    }
}
