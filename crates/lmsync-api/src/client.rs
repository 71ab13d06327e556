// Signed HTTP client for the santaba REST API.
//
// Wraps `reqwest::Client` with LMv1 signing, query construction, and
// envelope validation. Endpoint modules (devices, groups, collectors)
// are implemented as inherent methods via separate files to keep this
// module focused on transport mechanics.

use reqwest::Method;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::auth::ApiToken;
use crate::error::Error;
use crate::models::RestResponse;
use crate::query::{Filter, RequestOptions};
use crate::transport::TransportConfig;

/// Raw client for one account's backend host.
///
/// Handles the `{ status, errmsg, data }` envelope and the
/// filter/fields/size/patchFields query grammar. A response is valid
/// when the HTTP status and the envelope status both indicate success;
/// anything else surfaces as [`Error::Api`] with the raw body attached.
/// The client never retries.
#[derive(Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    token: ApiToken,
}

impl ApiClient {
    /// Create a client from a `TransportConfig`.
    ///
    /// `base_url` is the account host root, e.g.
    /// `https://acme.logicmonitor.com`.
    pub fn new(base_url: Url, token: ApiToken, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            base_url,
            token,
        })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url, token: ApiToken) -> Self {
        Self {
            http,
            base_url,
            token,
        }
    }

    /// The account host root.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── Verb helpers ─────────────────────────────────────────────────

    /// Filtered, projected GET.
    pub async fn get(&self, path: &str, opts: &RequestOptions) -> Result<RestResponse, Error> {
        self.call(Method::GET, path, opts, None).await
    }

    /// POST with a JSON body (create).
    pub async fn post(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<RestResponse, Error> {
        self.call(Method::POST, path, &RequestOptions::new(), Some(body))
            .await
    }

    /// PATCH with a JSON body; `opts.patch_fields` restricts which body
    /// keys the backend applies.
    pub async fn patch(
        &self,
        path: &str,
        opts: &RequestOptions,
        body: &serde_json::Value,
    ) -> Result<RestResponse, Error> {
        self.call(Method::PATCH, path, opts, Some(body)).await
    }

    /// DELETE by resource path.
    pub async fn delete(&self, path: &str) -> Result<RestResponse, Error> {
        self.call(Method::DELETE, path, &RequestOptions::new(), None)
            .await
    }

    // ── Typed helpers ────────────────────────────────────────────────

    /// GET `data.items` deserialized into `T`.
    pub async fn get_items<T: DeserializeOwned>(
        &self,
        path: &str,
        opts: &RequestOptions,
    ) -> Result<Vec<T>, Error> {
        let resp = self.get(path, opts).await?;
        resp.items()
            .iter()
            .map(|item| {
                serde_json::from_value(item.clone()).map_err(|e| Error::Deserialization {
                    message: e.to_string(),
                    body: item.to_string(),
                })
            })
            .collect()
    }

    /// Search-for-one by unique-key filter: size 1, projected fields,
    /// first item or `None`.
    pub async fn find_one<T: DeserializeOwned>(
        &self,
        path: &str,
        filter: Filter,
        fields: &str,
    ) -> Result<Option<T>, Error> {
        let opts = RequestOptions::new().filter(filter).fields(fields).size(1);
        let mut items = self.get_items(path, &opts).await?;
        if items.is_empty() {
            Ok(None)
        } else {
            Ok(Some(items.remove(0)))
        }
    }

    /// Decode the envelope's `data` object (single-resource responses).
    pub fn decode_data<T: DeserializeOwned>(resp: &RestResponse) -> Result<T, Error> {
        let data = resp.data.clone().unwrap_or(serde_json::Value::Null);
        serde_json::from_value(data.clone()).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body: data.to_string(),
        })
    }

    // ── Request core ─────────────────────────────────────────────────

    async fn call(
        &self,
        method: Method,
        path: &str,
        opts: &RequestOptions,
        body: Option<&serde_json::Value>,
    ) -> Result<RestResponse, Error> {
        let mut url = self.base_url.join(path)?;
        {
            let mut query = url.query_pairs_mut();
            for (key, value) in opts.to_query_pairs() {
                query.append_pair(key, &value);
            }
        }

        // Sign the exact body string that goes on the wire; the resource
        // path is signed without the query string.
        let body_str = match body {
            Some(value) => serde_json::to_string(value).map_err(|e| Error::Deserialization {
                message: e.to_string(),
                body: String::new(),
            })?,
            None => String::new(),
        };
        let authorization = self.token.authorization(method.as_str(), path, &body_str);

        debug!("{} {}", method, url);

        let mut request = self
            .http
            .request(method, url)
            .header("Authorization", authorization);
        if body.is_some() {
            request = request
                .header("Content-Type", "application/json")
                .body(body_str);
        }

        let resp = request.send().await.map_err(Error::Transport)?;
        let http_status = resp.status();
        let text = resp.text().await.map_err(Error::Transport)?;

        if !http_status.is_success() {
            return Err(Error::Api {
                status: http_status.as_u16(),
                body: text,
            });
        }

        let envelope: RestResponse =
            serde_json::from_str(&text).map_err(|e| Error::Deserialization {
                message: e.to_string(),
                body: text.clone(),
            })?;

        // The backend reports failures in-band with HTTP 200.
        if envelope.status != 200 {
            return Err(Error::Api {
                status: u16::try_from(envelope.status).unwrap_or(0),
                body: text,
            });
        }

        Ok(envelope)
    }
}
