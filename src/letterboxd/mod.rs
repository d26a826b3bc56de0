//! # Letterboxd Integration Module
//!
//! Client for the Letterboxd API: password-grant authentication, token
//! refresh and diary log entries for watched movies.
//!
//! ## Request signing
//!
//! Every request carries `apikey`, a fresh `nonce` and the current Unix
//! `timestamp` as query parameters and is signed with the API secret (see
//! [`signing::sign`]). The signature is computed over the request exactly as
//! it will be sent and then attached in one of two places:
//!
//! - [`SignaturePlacement::Header`] - `Authorization: Signature <hex>`, used
//!   by `/auth/token` where no bearer token exists yet
//! - [`SignaturePlacement::Query`] - a trailing `signature` query parameter,
//!   used by content endpoints whose `Authorization` header holds the bearer
//!   token
//!
//! ## API Coverage
//!
//! - `POST /auth/token` - Password and refresh-token grants
//! - `GET /films?filmId=imdb:{id}` - Film lookup by IMDb id
//! - `POST /log-entries` - Diary entry creation

mod auth;
mod diary;
pub mod signing;

use chrono::Utc;
use reqwest::{
    blocking::{Client, Request, RequestBuilder},
    header::{AUTHORIZATION, HeaderValue},
};

use crate::{Result, SyncError, management::SECTION_LETTERBOXD, management::Settings, utils};

pub use diary::SOURCE_TAG;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignaturePlacement {
    Header,
    Query,
}

pub struct LetterboxdClient<'a> {
    settings: &'a mut Settings,
    http: Client,
    base_url: String,
    api_key: String,
    api_secret: String,
}

impl<'a> LetterboxdClient<'a> {
    /// Creates a client from the `[Letterboxd]` API credentials.
    pub fn new(settings: &'a mut Settings, base_url: &str) -> Result<Self> {
        let api_key = settings.get(SECTION_LETTERBOXD, "api_key")?;
        let api_secret = settings.get(SECTION_LETTERBOXD, "api_secret")?;

        Ok(Self {
            settings,
            http: utils::http_client()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            api_secret,
        })
    }

    /// Starts a request against `path` below the API base URL.
    pub fn request(&self, method: reqwest::Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}{}", self.base_url, path))
            .header("Accept", "application/json")
    }

    /// Adds the signing parameters to `builder`, builds it and attaches the
    /// signature.
    pub fn sign(&self, builder: RequestBuilder, placement: SignaturePlacement) -> Result<Request> {
        let nonce = utils::generate_nonce();
        let timestamp = Utc::now().timestamp().to_string();
        let mut request = builder
            .query(&[
                ("apikey", self.api_key.as_str()),
                ("nonce", nonce.as_str()),
                ("timestamp", timestamp.as_str()),
            ])
            .build()?;

        let signature = {
            let body = request.body().and_then(|b| b.as_bytes()).unwrap_or_default();
            signing::sign(
                &self.api_secret,
                request.method().as_str(),
                request.url().as_str(),
                body,
            )?
        };

        match placement {
            SignaturePlacement::Header => {
                let value = HeaderValue::from_str(&format!("Signature {signature}"))
                    .map_err(|e| SyncError::Signing(e.to_string()))?;
                request.headers_mut().insert(AUTHORIZATION, value);
            }
            SignaturePlacement::Query => {
                request
                    .url_mut()
                    .query_pairs_mut()
                    .append_pair("signature", &signature);
            }
        }

        Ok(request)
    }

    fn execute(&self, request: Request) -> Result<reqwest::blocking::Response> {
        log::debug!("{} {}", request.method(), request.url().path());
        let res = self.http.execute(request)?;
        log::debug!("-> {}", res.status());
        Ok(res)
    }

    fn access_token(&self) -> Result<String> {
        self.settings.get(SECTION_LETTERBOXD, "access_token")
    }
}
