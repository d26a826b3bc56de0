mod common;

use std::{collections::HashMap, fs};

use chrono::{NaiveDate, Utc};
use mockito::Matcher;
use reqwest::Method;
use serde_json::json;

use common::{SETTINGS, ScriptedPrompt, settings_file};
use watchsync::{
    SyncError,
    letterboxd::{LetterboxdClient, SOURCE_TAG, SignaturePlacement, signing},
    management::{SECTION_LETTERBOXD, Settings},
    types::WatchEvent,
};

const TOKEN: &str = r#"{
    "access_token": "fresh-access",
    "token_type": "bearer",
    "refresh_token": "fresh-refresh",
    "expires_in": 3600
}"#;

const FILMS: &str = r#"{
    "next": null,
    "items": [{"id": "2bbs", "name": "The Shawshank Redemption", "releaseYear": 1994}]
}"#;

fn signed_query() -> Matcher {
    Matcher::AllOf(vec![
        Matcher::UrlEncoded("apikey".into(), "lb-key".into()),
        Matcher::Regex("nonce=[0-9a-f-]{36}".into()),
        Matcher::Regex("timestamp=[0-9]+".into()),
        Matcher::Regex("signature=[0-9a-f]{64}$".into()),
    ])
}

fn signed_header() -> Matcher {
    Matcher::Regex("^Signature [0-9a-f]{64}$".into())
}

fn movie() -> WatchEvent {
    WatchEvent::Movie {
        imdb_id: "tt0111161".to_string(),
    }
}

#[test]
fn test_sign_header_covers_url_and_body() {
    let (_dir, path) = settings_file(SETTINGS);
    let mut settings = Settings::load(&path).unwrap();
    let client = LetterboxdClient::new(&mut settings, "https://api.letterboxd.com/api/v0").unwrap();

    let builder = client
        .request(Method::POST, "/auth/token")
        .form(&[("grant_type", "password")]);
    let request = client.sign(builder, SignaturePlacement::Header).unwrap();

    let params: HashMap<_, _> = request.url().query_pairs().into_owned().collect();
    assert_eq!(params["apikey"], "lb-key");
    assert!(uuid::Uuid::parse_str(&params["nonce"]).is_ok());
    let timestamp: i64 = params["timestamp"].parse().unwrap();
    assert!((Utc::now().timestamp() - timestamp).abs() < 60);
    assert!(!params.contains_key("signature"));

    let body = request.body().unwrap().as_bytes().unwrap();
    assert_eq!(body, b"grant_type=password");

    let expected = signing::sign("lb-secret", "POST", request.url().as_str(), body).unwrap();
    let header = request.headers()["authorization"].to_str().unwrap();
    assert_eq!(header, format!("Signature {expected}"));
}

#[test]
fn test_sign_query_is_computed_before_signature_param() {
    let (_dir, path) = settings_file(SETTINGS);
    let mut settings = Settings::load(&path).unwrap();
    let client = LetterboxdClient::new(&mut settings, "https://api.letterboxd.com/api/v0").unwrap();

    let builder = client
        .request(Method::GET, "/films")
        .bearer_auth("lb-access")
        .query(&[("filmId", "imdb:tt0111161")]);
    let request = client.sign(builder, SignaturePlacement::Query).unwrap();

    let url = request.url().as_str();
    let (unsigned, signature) = url.rsplit_once("&signature=").unwrap();
    assert!(unsigned.contains("filmId=imdb%3Att0111161"));
    assert_eq!(signature, signing::sign("lb-secret", "GET", unsigned, b"").unwrap());
    assert_eq!(request.headers()["authorization"], "Bearer lb-access");
}

#[test]
fn test_every_request_gets_a_new_nonce() {
    let (_dir, path) = settings_file(SETTINGS);
    let mut settings = Settings::load(&path).unwrap();
    let client = LetterboxdClient::new(&mut settings, "https://api.letterboxd.com/api/v0").unwrap();

    let first = client
        .sign(client.request(Method::GET, "/films"), SignaturePlacement::Query)
        .unwrap();
    let second = client
        .sign(client.request(Method::GET, "/films"), SignaturePlacement::Query)
        .unwrap();

    assert_ne!(first.url(), second.url());
}

#[test]
fn test_authenticate_stores_tokens() {
    let mut server = mockito::Server::new();
    let token = server
        .mock("POST", "/auth/token")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("apikey".into(), "lb-key".into()),
            Matcher::Regex("nonce=".into()),
            Matcher::Regex("timestamp=".into()),
        ]))
        .match_header("authorization", signed_header())
        .match_header("content-type", "application/x-www-form-urlencoded")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("grant_type".into(), "password".into()),
            Matcher::UrlEncoded("username".into(), "alice".into()),
            Matcher::UrlEncoded("password".into(), "p@ss word".into()),
        ]))
        .with_status(200)
        .with_body(TOKEN)
        .create();

    let (_dir, path) = settings_file(SETTINGS);
    let mut settings = Settings::load(&path).unwrap();
    let mut prompt = ScriptedPrompt::credentials("alice", "p@ss word");

    LetterboxdClient::new(&mut settings, &server.url())
        .unwrap()
        .authenticate(&mut prompt)
        .unwrap();

    token.assert();
    assert_eq!(prompt.asked, vec!["Username:".to_string(), "Password:".to_string()]);
    let session = Settings::load(&path).unwrap().session(SECTION_LETTERBOXD).unwrap();
    assert_eq!(session.access_token, "fresh-access");
    assert_eq!(session.refresh_token, "fresh-refresh");
}

#[test]
fn test_authenticate_invalid_credentials_keeps_settings() {
    let mut server = mockito::Server::new();
    let token = server
        .mock("POST", "/auth/token")
        .match_query(Matcher::Any)
        .with_status(400)
        .with_body(r#"{"error":"invalid_grant"}"#)
        .create();

    let (_dir, path) = settings_file(SETTINGS);
    let mut settings = Settings::load(&path).unwrap();
    let mut prompt = ScriptedPrompt::credentials("alice", "wrong");

    let result = LetterboxdClient::new(&mut settings, &server.url())
        .unwrap()
        .authenticate(&mut prompt);

    token.assert();
    match result {
        Err(SyncError::ProviderAuth(message)) => assert!(message.contains("Invalid")),
        other => panic!("expected ProviderAuth, got {:?}", other),
    }
    assert_eq!(fs::read_to_string(&path).unwrap(), SETTINGS);
}

#[test]
fn test_refresh_access_token() {
    let mut server = mockito::Server::new();
    let token = server
        .mock("POST", "/auth/token")
        .match_query(Matcher::Any)
        .match_header("authorization", signed_header())
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("grant_type".into(), "refresh_token".into()),
            Matcher::UrlEncoded("refresh_token".into(), "lb-refresh".into()),
        ]))
        .with_status(200)
        .with_body(TOKEN)
        .create();

    let (_dir, path) = settings_file(SETTINGS);
    let mut settings = Settings::load(&path).unwrap();
    LetterboxdClient::new(&mut settings, &server.url())
        .unwrap()
        .refresh_access_token()
        .unwrap();

    token.assert();
    let session = Settings::load(&path).unwrap().session(SECTION_LETTERBOXD).unwrap();
    assert_eq!(session.access_token, "fresh-access");
}

#[test]
fn test_refresh_rejected_needs_reauthentication() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("POST", "/auth/token")
        .match_query(Matcher::Any)
        .with_status(400)
        .create();

    let (_dir, path) = settings_file(SETTINGS);
    let mut settings = Settings::load(&path).unwrap();
    let result = LetterboxdClient::new(&mut settings, &server.url())
        .unwrap()
        .refresh_access_token();

    match result {
        Err(SyncError::ProviderAuth(message)) => assert!(message.contains("re-authentication")),
        other => panic!("expected ProviderAuth, got {:?}", other),
    }
    assert_eq!(fs::read_to_string(&path).unwrap(), SETTINGS);
}

#[test]
fn test_log_entry_creates_diary_entry() {
    let mut server = mockito::Server::new();
    let lookup = server
        .mock("GET", "/films")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("filmId".into(), "imdb:tt0111161".into()),
            signed_query(),
        ]))
        .match_header("authorization", "Bearer lb-access")
        .with_status(200)
        .with_body(FILMS)
        .create();
    let entry = server
        .mock("POST", "/log-entries")
        .match_query(signed_query())
        .match_header("authorization", "Bearer lb-access")
        .match_body(Matcher::Json(json!({
            "filmId": "2bbs",
            "diaryDetails": {"diaryDate": "2024-05-06", "rewatch": false},
            "tags": [SOURCE_TAG]
        })))
        .with_status(201)
        .with_body(r#"{"id": "entry-1", "name": "The Shawshank Redemption"}"#)
        .create();

    let (_dir, path) = settings_file(SETTINGS);
    let mut settings = Settings::load(&path).unwrap();
    let date = NaiveDate::from_ymd_opt(2024, 5, 6).unwrap();

    LetterboxdClient::new(&mut settings, &server.url())
        .unwrap()
        .log_entry_on(&movie(), date)
        .unwrap();

    lookup.assert();
    entry.assert();
}

#[test]
fn test_log_entry_unknown_film_is_fatal() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("GET", "/films")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"items": []}"#)
        .create();
    let entry = server
        .mock("POST", "/log-entries")
        .match_query(Matcher::Any)
        .expect(0)
        .create();

    let (_dir, path) = settings_file(SETTINGS);
    let mut settings = Settings::load(&path).unwrap();
    let result = LetterboxdClient::new(&mut settings, &server.url())
        .unwrap()
        .log_entry(&movie());

    match result {
        Err(SyncError::Provider(message)) => assert!(message.contains("imdb:tt0111161")),
        other => panic!("expected provider error, got {:?}", other),
    }
    entry.assert();
}
