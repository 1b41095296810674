//! Assembly of a `TransportRequest` from a method, a URI and a config.

use crate::config::RequestConfig;
use crate::error::UsageError;
use crate::http::{HttpMethod, RequestMode, TransportRequest};

pub const ACCEPT_JSON: (&str, &str) = ("Accept", "application/json");

/// Build the request a transport will execute.
///
/// Fails without side effects when `search` is combined with a URI that
/// already has a query string.
pub fn build_request(
    method: HttpMethod,
    uri: &str,
    config: Option<RequestConfig>,
) -> Result<TransportRequest, UsageError> {
    let RequestConfig {
        headers,
        search,
        body,
        json,
    } = config.unwrap_or_default();

    let mut uri = uri.to_string();
    if let Some(search) = search {
        if uri.contains('?') {
            return Err(UsageError::SearchWithQuery { uri });
        }
        uri.push('?');
        uri.push_str(&encode_search(&search)?);
    }

    Ok(TransportRequest {
        method,
        uri,
        mode: RequestMode::Cors,
        headers: merge_headers(headers),
        body,
        json,
    })
}

/// Form-encode query pairs: spaces become `+`, reserved characters are
/// percent-escaped.
pub fn encode_search(search: &[(String, String)]) -> Result<String, UsageError> {
    Ok(serde_urlencoded::to_string(search)?)
}

fn merge_headers(caller: Vec<(String, String)>) -> Vec<(String, String)> {
    let (accept_name, accept_value) = ACCEPT_JSON;
    let mut headers = vec![(accept_name.to_string(), accept_value.to_string())];
    for (name, value) in caller {
        match headers
            .iter_mut()
            .find(|(key, _)| key.eq_ignore_ascii_case(&name))
        {
            Some(existing) => *existing = (name, value),
            None => headers.push((name, value)),
        }
    }
    headers
}
