// LMv1 API token request signing.
//
// Every request carries `Authorization: LMv1 {access_id}:{signature}:{epoch_ms}`
// where the signature is the base64 encoding of the lowercase hex HMAC-SHA256
// digest of `{VERB}{epoch_ms}{body}{resource_path}` keyed by the access key.
// The resource path is signed without the query string.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// An API token credential pair for one account.
///
/// The access key is held behind [`SecretString`] so it never appears in
/// debug output; it is only exposed at the moment a signature is computed.
#[derive(Debug, Clone)]
pub struct ApiToken {
    pub access_id: String,
    pub access_key: SecretString,
}

impl ApiToken {
    pub fn new(access_id: impl Into<String>, access_key: SecretString) -> Self {
        Self {
            access_id: access_id.into(),
            access_key,
        }
    }

    /// Build the `Authorization` header value for one request.
    ///
    /// `body` is the serialized JSON body, or `""` for bodyless requests.
    pub fn authorization(&self, verb: &str, resource_path: &str, body: &str) -> String {
        self.authorization_at(verb, resource_path, body, chrono::Utc::now().timestamp_millis())
    }

    /// Signature derivation with an explicit timestamp.
    ///
    /// Split out from [`Self::authorization`] so tests can pin the epoch.
    pub fn authorization_at(
        &self,
        verb: &str,
        resource_path: &str,
        body: &str,
        epoch_ms: i64,
    ) -> String {
        let to_sign = format!("{verb}{epoch_ms}{body}{resource_path}");

        // HMAC-SHA256 accepts keys of any length; new_from_slice cannot fail.
        let mut mac = HmacSha256::new_from_slice(self.access_key.expose_secret().as_bytes())
            .unwrap_or_else(|_| unreachable!("HMAC accepts any key length"));
        mac.update(to_sign.as_bytes());
        let digest = hex::encode(mac.finalize().into_bytes());
        let signature = BASE64.encode(digest.as_bytes());

        format!("LMv1 {}:{signature}:{epoch_ms}", self.access_id)
    }
}
