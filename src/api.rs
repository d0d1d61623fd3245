use crate::config::KalshiConfig;
use crate::error::{ApiError, ApiResult, Result, UNKNOWN_ERROR_MESSAGE};
use async_trait::async_trait;
use log::debug;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Request seam used by the aggregation pipeline.
///
/// Implementations never fail out of band: every outcome, including
/// transport failures, comes back as an [`ApiResult`].
#[async_trait]
pub trait KalshiApi: Send + Sync {
    /// GET `endpoint` with the given query pairs. Pairs whose value is `None` are omitted.
    async fn get_value(&self, endpoint: &str, params: &[(&str, Option<&str>)]) -> ApiResult<Value>;

    /// POST `body` as JSON to `endpoint`.
    async fn post_value(&self, endpoint: &str, body: &Value) -> ApiResult<Value>;
}

/// GET and decode the payload into `T`. A payload that does not fit `T` is a client error.
pub async fn get_typed<T, A>(api: &A, endpoint: &str, params: &[(&str, Option<&str>)]) -> ApiResult<T>
where
    T: DeserializeOwned,
    A: KalshiApi + ?Sized,
{
    let value = api.get_value(endpoint, params).await?;
    Ok(serde_json::from_value(value)?)
}

pub struct KalshiClient {
    client: Client,
    base_url: String,
    headers: HeaderMap,
}

impl KalshiClient {
    /// Build a client whose header set (defaults plus bearer token) is fixed for its lifetime.
    pub fn new(config: &KalshiConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        for (name, value) in &config.default_headers {
            headers.insert(HeaderName::from_bytes(name.as_bytes())?, HeaderValue::from_str(value)?);
        }
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.api_key))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            headers,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, Option<&str>)],
    ) -> ApiResult<T> {
        get_typed(self, endpoint, params).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(&self, endpoint: &str, body: &B) -> ApiResult<T> {
        let body = serde_json::to_value(body)?;
        let value = self.post_value(endpoint, &body).await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn execute(&self, request: RequestBuilder) -> ApiResult<Value> {
        let response = request.headers(self.headers.clone()).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            // An unreadable error body is a client-side failure, not a server one.
            let error_data: Value = serde_json::from_str(&text)?;
            debug!("API error response [{}]: {}", status, text);
            return Err(server_error(status.as_u16(), &error_data));
        }

        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl KalshiApi for KalshiClient {
    async fn get_value(&self, endpoint: &str, params: &[(&str, Option<&str>)]) -> ApiResult<Value> {
        let url = build_url(&self.base_url, endpoint, params);
        debug!("GET {}", url);
        self.execute(self.client.get(&url)).await
    }

    async fn post_value(&self, endpoint: &str, body: &Value) -> ApiResult<Value> {
        let url = build_url(&self.base_url, endpoint, &[]);
        debug!("POST {}", url);
        let body = serde_json::to_string(body)?;
        self.execute(self.client.post(&url).body(body)).await
    }
}

/// Concatenate base URL and endpoint, then append the encoded query string if any pair survives.
pub fn build_url(base_url: &str, endpoint: &str, params: &[(&str, Option<&str>)]) -> String {
    let query = build_query_string(params);
    if query.is_empty() {
        format!("{}{}", base_url, endpoint)
    } else {
        format!("{}{}?{}", base_url, endpoint, query)
    }
}

pub fn build_query_string(params: &[(&str, Option<&str>)]) -> String {
    params
        .iter()
        .filter_map(|(key, value)| {
            value.map(|v| format!("{}={}", encode_component(key), encode_component(v)))
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Everything `encodeURIComponent` escapes: all but `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub fn encode_component(input: &str) -> String {
    utf8_percent_encode(input, COMPONENT).to_string()
}

fn server_error(status: u16, body: &Value) -> ApiError {
    let message = match body.get("message") {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        _ => UNKNOWN_ERROR_MESSAGE.to_string(),
    };
    let code = match body.get("code") {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Number(n)) if n.as_f64() != Some(0.0) => n.to_string(),
        _ => status.to_string(),
    };
    ApiError::new(message, code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn url_without_params_has_no_question_mark() {
        assert_eq!(build_url("https://x/v2", "/series", &[]), "https://x/v2/series");
        assert_eq!(
            build_url("https://x/v2", "/events", &[("status", None)]),
            "https://x/v2/events"
        );
    }

    #[test]
    fn url_keeps_param_order_and_skips_missing_values() {
        let url = build_url(
            "https://x/v2",
            "/events",
            &[("series_ticker", Some("KXHIGHNY")), ("status", None), ("with_nested_markets", Some("true"))],
        );
        assert_eq!(url, "https://x/v2/events?series_ticker=KXHIGHNY&with_nested_markets=true");
    }

    #[test]
    fn components_are_percent_encoded() {
        assert_eq!(encode_component("a b&c=d"), "a%20b%26c%3Dd");
        assert_eq!(encode_component("snow_and_rain"), "snow_and_rain");
        assert_eq!(encode_component("it's (ok)!*~."), "it's (ok)!*~.");
        assert_eq!(encode_component("°C"), "%C2%B0C");
        assert_eq!(encode_component("100%/x+y"), "100%25%2Fx%2By");
    }

    #[test]
    fn server_error_prefers_body_fields() {
        let err = server_error(401, &json!({"message": "Unauthorized", "code": "AUTH_ERROR"}));
        assert_eq!(err, ApiError::new("Unauthorized", "AUTH_ERROR"));
    }

    #[test]
    fn server_error_falls_back_to_status() {
        let err = server_error(503, &json!({}));
        assert_eq!(err, ApiError::new(UNKNOWN_ERROR_MESSAGE, "503"));

        let err = server_error(404, &json!({"message": "", "code": ""}));
        assert_eq!(err, ApiError::new(UNKNOWN_ERROR_MESSAGE, "404"));
    }

    #[test]
    fn client_carries_bearer_header() {
        let config = KalshiConfig::new("https://x/v2", "secret-key");
        let client = KalshiClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "https://x/v2");
        assert_eq!(client.headers().get(AUTHORIZATION).unwrap(), "Bearer secret-key");
        assert_eq!(client.headers().get("accept").unwrap(), "application/json");
    }
}
