//! One paginated fetch cycle against the query API
//!
//! A cycle issues a single GET, retries connection failures, checks the HTTP
//! status, strips a possible UTF-8 byte-order mark, parses the JSON body, and
//! extracts both the page's records and the continuation cursor for the next
//! cycle. An empty cursor means the list is exhausted.

use crate::config::HarvestConfig;
use crate::error::{Error, Result};
use crate::item::ItemDescriptor;
use crate::lists::ListSpec;
use crate::retry::{self, IsRetryable};
use serde_json::Value;
use url::Url;

/// Some wikis serve `format=json` with a UTF-8 BOM prefix
const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

/// One page of query results plus the cursor for the next page
#[derive(Debug, Clone)]
pub struct QueryPage {
    /// Records of this page, normalized to an ordered sequence
    pub records: Vec<Value>,
    /// Continuation cursor; empty means pagination is complete
    pub next_cursor: String,
}

/// Build the GET URL for one page of `spec` at `cursor`
///
/// Shape: `http://<api>?action=query&list=<name>&<id>limit=<n>&format=json&<id>{from|offset}=<cursor>`,
/// with the cursor value query-encoded.
pub(crate) fn build_request_url(
    config: &HarvestConfig,
    item: &ItemDescriptor,
    spec: &ListSpec,
    cursor: &str,
) -> Result<Url> {
    let mut url = Url::parse(&format!("http://{}", item.api_endpoint)).map_err(|e| {
        Error::MalformedIdentifier(format!("invalid API endpoint {}: {}", item.api_endpoint, e))
    })?;
    url.query_pairs_mut()
        .append_pair("action", "query")
        .append_pair("list", spec.name)
        .append_pair(
            &format!("{}limit", spec.id_prefix),
            &config.page_limit.to_string(),
        )
        .append_pair("format", "json")
        .append_pair(
            &format!("{}{}", spec.id_prefix, item.site_type.cursor_param()),
            cursor,
        );
    Ok(url)
}

/// Execute one fetch cycle for `spec` at `cursor`
///
/// Connection failures are retried per the config's retry policy and surface
/// as [`Error::TransportExhausted`] once the budget is spent. A non-2xx
/// status is [`Error::UpstreamStatus`] immediately, with no retry.
pub(crate) async fn fetch_page(
    client: &reqwest::Client,
    config: &HarvestConfig,
    item: &ItemDescriptor,
    spec: &ListSpec,
    cursor: &str,
) -> Result<QueryPage> {
    let url = build_request_url(config, item, spec, cursor)?;
    tracing::debug!(url = %url, list = spec.name, cursor = cursor, "requesting query page");

    let response = retry::with_fixed_delay(&config.retry, || client.get(url.clone()).send())
        .await
        .map_err(|source| {
            if source.is_retryable() {
                Error::TransportExhausted {
                    attempts: config.retry.max_attempts,
                    source,
                }
            } else {
                Error::Network(source)
            }
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::UpstreamStatus {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    let bytes = response.bytes().await?;
    let raw: &[u8] = bytes.as_ref();
    let body = raw.strip_prefix(UTF8_BOM).unwrap_or(raw);
    let json: Value = serde_json::from_slice(body)?;

    let next_cursor = extract_cursor(&json, spec);
    let records = normalize_records(&json, spec)?;
    Ok(QueryPage {
        records,
        next_cursor,
    })
}

/// Pull the continuation cursor out of `query-continue[<list>]`
///
/// Three key shapes exist in the wild, checked in this precedence:
/// `<id>continue`, `<id>from`, `<id>offset`. The first one present wins.
/// Numeric offsets (exturlusage) are stringified. No continuation at all
/// means the list is done.
pub(crate) fn extract_cursor(body: &Value, spec: &ListSpec) -> String {
    let Some(cont) = body.get("query-continue").and_then(|qc| qc.get(spec.name)) else {
        return String::new();
    };
    for suffix in ["continue", "from", "offset"] {
        if let Some(value) = cont.get(format!("{}{}", spec.id_prefix, suffix)) {
            return cursor_value(value);
        }
    }
    String::new()
}

fn cursor_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

/// Normalize `query[<list>]` to an ordered sequence of records
///
/// Servers answer with either a JSON array or a keyed object; object values
/// are taken in the API's own order. Anything else is a shape error.
pub(crate) fn normalize_records(body: &Value, spec: &ListSpec) -> Result<Vec<Value>> {
    match body.get("query").and_then(|q| q.get(spec.name)) {
        Some(Value::Array(records)) => Ok(records.clone()),
        Some(Value::Object(map)) => Ok(map.values().cloned().collect()),
        Some(_) => Err(Error::UnexpectedResponse(format!(
            "query.{} is neither a sequence nor a mapping",
            spec.name
        ))),
        None => Err(Error::UnexpectedResponse(format!(
            "response has no query.{} collection",
            spec.name
        ))),
    }
}
