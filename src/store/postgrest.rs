//! PostgREST (Supabase) remote store over blocking HTTP.
//!
//! Only the transport lives here: URL building, auth headers, status and
//! timeout mapping, JSON decoding.

use super::{RemoteFailure, RemoteResult, RemoteStore};
use crate::models::{OfficerPatch, OfficerRecord};
use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder, Response};
use std::time::Duration;
use url::Url;

const TABLE_PATH: &str = "rest/v1/house_officers";
const USER_AGENT: &str = concat!("hoflow/", env!("CARGO_PKG_VERSION"));

pub struct PostgrestRemote {
    client: Client,
    table_url: Url,
    api_key: String,
}

impl PostgrestRemote {
    /// `base_url` is the project root (`https://xyz.supabase.co`).
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> RemoteResult<Self> {
        let table_url = table_url(base_url)?;
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| RemoteFailure::Backend(e.to_string()))?;

        Ok(Self {
            client,
            table_url,
            api_key: api_key.to_string(),
        })
    }

    fn authed(&self, req: RequestBuilder) -> RequestBuilder {
        req.header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
    }

    fn send(&self, req: RequestBuilder) -> RemoteResult<Response> {
        let resp = self.authed(req).send().map_err(map_transport_error)?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().unwrap_or_default();
        Err(map_status_error(status, &body))
    }
}

impl RemoteStore for PostgrestRemote {
    fn name(&self) -> &'static str {
        "postgrest"
    }

    fn load_all(&self) -> RemoteResult<Vec<OfficerRecord>> {
        let url = with_query(&self.table_url, &[("select", "*"), ("order", "createdAt.desc")]);
        let resp = self.send(self.client.get(url))?;
        decode(resp)
    }

    fn insert(&mut self, record: &OfficerRecord) -> RemoteResult<OfficerRecord> {
        let resp = self.send(
            self.client
                .post(self.table_url.clone())
                .header("Prefer", "return=representation")
                .json(&[record]),
        )?;

        let mut rows: Vec<OfficerRecord> = decode(resp)?;
        rows.pop()
            .ok_or_else(|| RemoteFailure::Decode("insert returned no row".into()))
    }

    fn update(&mut self, id: &str, patch: &OfficerPatch) -> RemoteResult<()> {
        let filter = format!("eq.{id}");
        let url = with_query(&self.table_url, &[("id", filter.as_str())]);
        self.send(self.client.patch(url).json(patch))?;
        Ok(())
    }

    fn delete(&mut self, id: &str) -> RemoteResult<()> {
        let filter = format!("eq.{id}");
        let url = with_query(&self.table_url, &[("id", filter.as_str())]);
        self.send(self.client.delete(url))?;
        Ok(())
    }

    fn replace_all(&mut self, records: &[OfficerRecord]) -> RemoteResult<()> {
        // PostgREST refuses an unfiltered DELETE
        let url = with_query(&self.table_url, &[("id", "neq.")]);
        self.send(self.client.delete(url))?;

        if records.is_empty() {
            return Ok(());
        }
        self.send(self.client.post(self.table_url.clone()).json(records))?;
        Ok(())
    }
}

fn table_url(base_url: &str) -> RemoteResult<Url> {
    let mut base = Url::parse(base_url.trim())
        .map_err(|e| RemoteFailure::Backend(format!("invalid remote url {base_url}: {e}")))?;

    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }

    base.join(TABLE_PATH)
        .map_err(|e| RemoteFailure::Backend(e.to_string()))
}

fn with_query(base: &Url, pairs: &[(&str, &str)]) -> Url {
    let mut url = base.clone();
    url.query_pairs_mut().extend_pairs(pairs);
    url
}

fn decode<T: serde::de::DeserializeOwned>(resp: Response) -> RemoteResult<T> {
    let body = resp.text().map_err(map_transport_error)?;
    serde_json::from_str(&body).map_err(|e| RemoteFailure::Decode(e.to_string()))
}

fn map_transport_error(error: reqwest::Error) -> RemoteFailure {
    if error.is_timeout() {
        RemoteFailure::Timeout
    } else if error.is_connect() || error.is_request() {
        RemoteFailure::Unreachable(error.to_string())
    } else {
        RemoteFailure::Backend(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &str) -> RemoteFailure {
    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => RemoteFailure::Timeout,
        StatusCode::BAD_GATEWAY | StatusCode::SERVICE_UNAVAILABLE => {
            RemoteFailure::Unreachable(format!("status {}", status.as_u16()))
        }
        _ => RemoteFailure::Rejected {
            status: status.as_u16(),
            message: body_preview(body),
        },
    }
}

fn body_preview(body: &str) -> String {
    const LIMIT: usize = 160;

    let compact = body.split_whitespace().collect::<Vec<_>>().join(" ");
    if compact.chars().count() > LIMIT {
        let head: String = compact.chars().take(LIMIT).collect();
        format!("{head}...")
    } else {
        compact
    }
}
