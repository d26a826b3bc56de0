use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::{Result, SyncError};

type HmacSha256 = Hmac<Sha256>;

/// Computes the Letterboxd request signature.
///
/// The signed message is the uppercase method, the full URL and the body,
/// separated by NUL bytes. The result is the lowercase hex HMAC-SHA256 of
/// that message keyed with the API secret.
pub fn sign(secret: &str, method: &str, url: &str, body: &[u8]) -> Result<String> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| SyncError::Signing(e.to_string()))?;

    mac.update(method.to_ascii_uppercase().as_bytes());
    mac.update(&[0]);
    mac.update(url.as_bytes());
    mac.update(&[0]);
    mac.update(body);

    Ok(hex::encode(mac.finalize().into_bytes()))
}
