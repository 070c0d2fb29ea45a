//! HTTP Client implementation using reqwest.
//!
//! This adapter implements the `HttpClient` port using the reqwest library.
//! Every status code is returned as a response; only transport failures
//! become errors.

use std::error::Error as _;
use std::time::{Duration, Instant};

use courier_application::ports::{HttpClient, HttpClientError, HttpFuture, OutboundRequest};
use courier_domain::{CourierSettings, HttpResponse};
use indexmap::IndexMap;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, Url};

const MAX_REDIRECTS: usize = 10;

/// HTTP client implementation using reqwest.
pub struct ReqwestHttpClient {
    client: Client,
    timeout: Option<Duration>,
}

impl ReqwestHttpClient {
    /// Creates a client from settings.
    ///
    /// Configuration:
    /// - User-Agent from `user_agent`
    /// - Follow redirects: up to 10
    /// - Timeout from `request_timeout_ms`, none when unset
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new(settings: &CourierSettings) -> Result<Self, HttpClientError> {
        let client = Client::builder()
            .user_agent(settings.user_agent.clone())
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| HttpClientError::Other(e.to_string()))?;

        Ok(Self {
            client,
            timeout: settings.request_timeout(),
        })
    }

    fn to_reqwest_method(method: &str) -> Result<Method, HttpClientError> {
        Method::from_bytes(method.as_bytes())
            .map_err(|_| HttpClientError::InvalidMethod(method.to_string()))
    }

    fn to_header_map(headers: &IndexMap<String, String>) -> Result<HeaderMap, HttpClientError> {
        let mut map = HeaderMap::with_capacity(headers.len());
        for (key, value) in headers {
            let name = HeaderName::from_bytes(key.as_bytes())
                .map_err(|_| HttpClientError::InvalidHeader(key.clone()))?;
            let value = HeaderValue::from_str(value)
                .map_err(|_| HttpClientError::InvalidHeader(format!("{key}: {value}")))?;
            map.insert(name, value);
        }
        Ok(map)
    }

    /// Flattens an error and its sources into one line.
    fn describe(error: &reqwest::Error) -> String {
        let mut message = error.to_string();
        let mut source = error.source();
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        message
    }

    /// Maps reqwest errors to `HttpClientError`.
    fn map_error(error: &reqwest::Error, timeout: Option<Duration>) -> HttpClientError {
        let host = || {
            error
                .url()
                .and_then(|u| u.host_str().map(str::to_string))
                .unwrap_or_else(|| "unknown".to_string())
        };

        if error.is_timeout() {
            let timeout_ms = timeout.map(|t| u64::try_from(t.as_millis()).unwrap_or(u64::MAX));
            return HttpClientError::Timeout { timeout_ms };
        }

        if error.is_redirect() {
            return HttpClientError::TooManyRedirects { max: MAX_REDIRECTS };
        }

        let message = Self::describe(error);
        let lower = message.to_lowercase();

        if error.is_connect() {
            if lower.contains("dns") || lower.contains("resolve") || lower.contains("lookup") {
                return HttpClientError::DnsError {
                    host: host(),
                    message,
                };
            }
            if lower.contains("refused") {
                return HttpClientError::ConnectionRefused {
                    host: host(),
                    port: error
                        .url()
                        .and_then(Url::port_or_known_default)
                        .unwrap_or(80),
                };
            }
            if lower.contains("certificate") || lower.contains("tls") {
                return HttpClientError::Tls(message);
            }
            return HttpClientError::ConnectionFailed(message);
        }

        HttpClientError::Other(message)
    }

    fn collect_headers(headers: &HeaderMap) -> IndexMap<String, String> {
        let mut collected: IndexMap<String, String> = IndexMap::new();
        for (name, value) in headers {
            let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
            collected
                .entry(name.as_str().to_string())
                .and_modify(|existing| {
                    existing.push_str(", ");
                    existing.push_str(&value);
                })
                .or_insert(value);
        }
        collected
    }
}

impl HttpClient for ReqwestHttpClient {
    fn execute(&self, request: &OutboundRequest) -> HttpFuture<'_> {
        let request = request.clone();
        let timeout = self.timeout;

        Box::pin(async move {
            let url = Url::parse(&request.url)
                .map_err(|e| HttpClientError::InvalidUrl(format!("{e}: {}", request.url)))?;
            let method = Self::to_reqwest_method(&request.method)?;
            let headers = Self::to_header_map(&request.headers)?;

            let start = Instant::now();

            let mut builder = self.client.request(method, url).headers(headers);
            if let Some(timeout) = timeout {
                builder = builder.timeout(timeout);
            }
            if let Some(body) = &request.body {
                builder = builder.json(body);
            }

            let response = builder
                .send()
                .await
                .map_err(|e| Self::map_error(&e, timeout))?;

            let status = response.status();
            let response_headers = Self::collect_headers(response.headers());
            let body = response
                .bytes()
                .await
                .map_err(|e| Self::map_error(&e, timeout))?;

            let mut decoded = HttpResponse::new(status.as_u16(), response_headers, &body)
                .with_duration(start.elapsed());
            if let Some(reason) = status.canonical_reason() {
                decoded.status_text = reason.to_string();
            }
            tracing::debug!(
                status = decoded.status,
                elapsed_ms = decoded.duration.as_millis(),
                "received response"
            );
            Ok(decoded)
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_to_reqwest_method() {
        assert_eq!(ReqwestHttpClient::to_reqwest_method("GET").unwrap(), Method::GET);
        assert_eq!(ReqwestHttpClient::to_reqwest_method("PATCH").unwrap(), Method::PATCH);
        assert_eq!(
            ReqwestHttpClient::to_reqwest_method("PURGE").unwrap().as_str(),
            "PURGE"
        );
        assert!(matches!(
            ReqwestHttpClient::to_reqwest_method("BAD METHOD"),
            Err(HttpClientError::InvalidMethod(_))
        ));
    }

    #[test]
    fn test_client_creation() {
        let client = ReqwestHttpClient::new(&CourierSettings::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_header_map_rejects_invalid_names() {
        let mut headers = IndexMap::new();
        headers.insert("X-Ok".to_string(), "1".to_string());
        assert_eq!(ReqwestHttpClient::to_header_map(&headers).unwrap().len(), 1);

        headers.insert("Bad Name".to_string(), "1".to_string());
        assert!(matches!(
            ReqwestHttpClient::to_header_map(&headers),
            Err(HttpClientError::InvalidHeader(_))
        ));
    }

    #[test]
    fn test_repeated_response_headers_are_joined() {
        let mut map = HeaderMap::new();
        map.append("set-cookie", HeaderValue::from_static("a=1"));
        map.append("set-cookie", HeaderValue::from_static("b=2"));
        map.append("content-type", HeaderValue::from_static("text/plain"));

        let collected = ReqwestHttpClient::collect_headers(&map);
        assert_eq!(collected.get("set-cookie").map(String::as_str), Some("a=1, b=2"));
        assert_eq!(collected.len(), 2);
    }

    #[tokio::test]
    async fn test_invalid_url_fails_before_sending() {
        let client = ReqwestHttpClient::new(&CourierSettings::default()).unwrap();
        let request = OutboundRequest {
            method: "GET".into(),
            url: "not a url".into(),
            ..OutboundRequest::default()
        };
        assert!(matches!(
            client.execute(&request).await,
            Err(HttpClientError::InvalidUrl(_))
        ));
    }
}
