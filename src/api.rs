//! Counters Endpoint Client
//!
//! Frontend bindings to the spreadsheet-backed web app.
//! Every call resolves to an [`Envelope`]; transport and decode errors are folded into it.

use gloo_net::http::Request;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde_json::{Map, Value};

use crate::models::{Action, Envelope, Method};

/// RFC 3986 unreserved characters stay as-is
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

#[derive(Debug, Clone)]
pub struct ApiClient {
    endpoint: String,
    novel_id: String,
    demo: bool,
}

impl ApiClient {
    pub fn new(endpoint: &str, novel_id: &str, demo: bool) -> Self {
        Self {
            endpoint: endpoint.trim().to_string(),
            novel_id: novel_id.to_string(),
            demo,
        }
    }

    pub fn novel_id(&self) -> &str {
        &self.novel_id
    }

    /// URL for a query-string request
    pub fn read_url(&self, action: Action) -> String {
        let separator = if self.endpoint.contains('?') { '&' } else { '?' };
        format!(
            "{}{}action={}&novelId={}",
            self.endpoint,
            separator,
            utf8_percent_encode(action.as_str(), QUERY_VALUE),
            utf8_percent_encode(&self.novel_id, QUERY_VALUE),
        )
    }

    /// JSON body for a write: payload fields, then `novelId` and `action` on top
    pub fn write_body(&self, action: Action, payload: Option<Value>) -> Value {
        let mut body = match payload {
            Some(Value::Object(fields)) => fields,
            _ => Map::new(),
        };
        body.insert("novelId".to_string(), Value::String(self.novel_id.clone()));
        body.insert("action".to_string(), Value::String(action.as_str().to_string()));
        Value::Object(body)
    }

    pub async fn call(&self, action: Action, method: Method, payload: Option<Value>) -> Envelope {
        if self.demo {
            log::warn!("[Api] Endpoint URL is not set, serving demo data for {}", action);
            return Envelope::demo();
        }
        match self.send(action, method, payload).await {
            Ok(envelope) => {
                if let Some(error) = envelope.error.as_deref().filter(|_| !envelope.success) {
                    log::warn!("[Api] {} rejected: {}", action, error);
                }
                envelope
            }
            Err(e) => {
                log::error!("[Api] Error calling {}: {}", action, e);
                Envelope::failure(e)
            }
        }
    }

    pub async fn read(&self, action: Action) -> Envelope {
        self.call(action, Method::Get, None).await
    }

    pub async fn write(&self, action: Action, payload: Option<Value>) -> Envelope {
        self.call(action, Method::Post, payload).await
    }

    async fn send(&self, action: Action, method: Method, payload: Option<Value>) -> Result<Envelope, String> {
        let request = match method {
            Method::Get => Request::get(&self.read_url(action))
                .header("Content-Type", "application/json")
                .build(),
            Method::Post => Request::post(&self.endpoint)
                .header("Content-Type", "application/json")
                .json(&self.write_body(action, payload)),
        }
        .map_err(|e| e.to_string())?;

        let response = request.send().await.map_err(|e| e.to_string())?;
        response.json::<Envelope>().await.map_err(|e| e.to_string())
    }
}
