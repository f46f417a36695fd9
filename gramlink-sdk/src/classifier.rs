//! Translation of failed HTTP exchanges into [`ServiceError`]s.
//!
//! Only the statuses listed in [`ServiceError`] are classified. Everything
//! else, including 401 and 422, is handed back to the caller untouched.
//!
//! Client-side errors (4xx) get a detail suffix taken from the response body
//! when the API supplied one:
//!
//! ```text
//! GET https://api.example.com/v1/users/self: 400: The access_token provided is invalid.
//! ```
//!
//! Server-side errors (5xx) get a fixed description instead, because their
//! bodies are usually an HTML error page from a proxy:
//!
//! ```text
//! GET https://api.example.com/v1/users/self: 503: The remote service is rate limiting your requests.
//! ```

use serde_json::Value;

use crate::error::ServiceError;
use crate::transport::{ApiRequest, Exchange, RequestExecutor};

/// How the message for a classified status is built.
enum Style {
    /// `{METHOD} {URL}: {STATUS}` plus optional body detail.
    Client,
    /// `{METHOD} {URL}: {STATUS}: {description}`.
    Server(&'static str),
}

fn monitored(status: u16) -> Option<(fn(String) -> ServiceError, Style)> {
    let entry: (fn(String) -> ServiceError, Style) = match status {
        400 => (ServiceError::BadRequest, Style::Client),
        403 => (ServiceError::Forbidden, Style::Client),
        404 => (ServiceError::NotFound, Style::Client),
        429 => (ServiceError::TooManyRequests, Style::Client),
        500 => (
            ServiceError::InternalServerError,
            Style::Server("Something is technically wrong."),
        ),
        502 => (
            ServiceError::BadGateway,
            Style::Server("The server returned an invalid or incomplete response."),
        ),
        503 => (
            ServiceError::ServiceUnavailable,
            Style::Server("The remote service is rate limiting your requests."),
        ),
        504 => (ServiceError::GatewayTimeout, Style::Server("504 Gateway Time-out")),
        _ => return None,
    };
    Some(entry)
}

/// Check a completed exchange, failing with the matching [`ServiceError`].
pub fn check(exchange: &Exchange) -> Result<(), ServiceError> {
    let Some((raise, style)) = monitored(exchange.status) else {
        return Ok(());
    };

    let prefix = format!(
        "{} {}: {}",
        exchange.method.to_ascii_uppercase(),
        exchange.url,
        exchange.status
    );

    let message = match style {
        Style::Client => match ErrorBody::parse(exchange.body.as_deref()).detail() {
            Some(detail) => format!("{prefix}: {detail}"),
            None => prefix,
        },
        Style::Server(description) => format!("{prefix}: {description}"),
    };

    Err(raise(message))
}

/// Pass a successful exchange through, or fail with the matching
/// [`ServiceError`].
pub fn classify(exchange: Exchange) -> Result<Exchange, ServiceError> {
    check(&exchange)?;
    Ok(exchange)
}

// ---------------------------------------------------------------------------
// Error body extraction
// ---------------------------------------------------------------------------

/// A parsed API error body.
///
/// The v1 API nests errors under `meta`; the OAuth endpoints put them at the
/// top level together with an `error_type`. Each field is looked up on its
/// own, so an odd-typed sibling never hides a usable message.
#[derive(Debug)]
enum ErrorBody {
    /// No body, or an empty one.
    Absent,
    /// Not JSON.
    Unparsable,
    Structured(Value),
}

impl ErrorBody {
    fn parse(body: Option<&[u8]>) -> Self {
        match body {
            None | Some([]) => ErrorBody::Absent,
            // A broken error body must never hide the status that caused it.
            Some(raw) => match serde_json::from_slice::<Value>(raw) {
                Ok(value) => ErrorBody::Structured(value),
                Err(_) => ErrorBody::Unparsable,
            },
        }
    }

    fn detail(&self) -> Option<String> {
        let ErrorBody::Structured(value) = self else {
            return None;
        };

        fn text(value: Option<&Value>) -> Option<&str> {
            value
                .and_then(Value::as_str)
                .filter(|message| !message.is_empty())
        }

        if let Some(nested) = text(value.pointer("/meta/error_message")) {
            return Some(nested.to_owned());
        }

        let message = text(value.get("error_message"))?;
        Some(match value.get("error_type").and_then(Value::as_str) {
            Some(error_type) => format!("{error_type}: {message}"),
            None => message.to_owned(),
        })
    }
}

// ---------------------------------------------------------------------------
// Executor decorator
// ---------------------------------------------------------------------------

/// A [`RequestExecutor`] that classifies every exchange produced by the
/// executor it wraps.
///
/// Classified failures are converted into the inner executor's error type, so
/// callers see a single error enum for transport and service failures alike.
#[derive(Debug, Clone)]
pub struct RaiseHttpError<E> {
    inner: E,
}

impl<E> RaiseHttpError<E> {
    pub fn new(inner: E) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &E {
        &self.inner
    }

    pub fn into_inner(self) -> E {
        self.inner
    }
}

#[async_trait::async_trait]
impl<E> RequestExecutor for RaiseHttpError<E>
where
    E: RequestExecutor,
    E::Error: From<ServiceError>,
{
    type Error = E::Error;

    async fn execute(&self, request: ApiRequest) -> Result<Exchange, Self::Error> {
        let exchange = self.inner.execute(request).await?;
        Ok(classify(exchange)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::HttpMethod;
    use std::sync::Mutex;

    const URL: &str = "https://api.example.com/v1/users/self/feed";

    fn exchange(status: u16) -> Exchange {
        Exchange::new("get", URL, status)
    }

    #[test]
    fn test_monitored_statuses_map_to_variants() {
        let cases: [(u16, fn(&ServiceError) -> bool); 8] = [
            (400, |e| matches!(e, ServiceError::BadRequest(_))),
            (403, |e| matches!(e, ServiceError::Forbidden(_))),
            (404, |e| matches!(e, ServiceError::NotFound(_))),
            (429, |e| matches!(e, ServiceError::TooManyRequests(_))),
            (500, |e| matches!(e, ServiceError::InternalServerError(_))),
            (502, |e| matches!(e, ServiceError::BadGateway(_))),
            (503, |e| matches!(e, ServiceError::ServiceUnavailable(_))),
            (504, |e| matches!(e, ServiceError::GatewayTimeout(_))),
        ];

        for (status, is_expected) in cases {
            let err = classify(exchange(status)).unwrap_err();
            assert!(is_expected(&err), "status {status} produced {err:?}");
            assert_eq!(err.status(), status);
        }
    }

    #[test]
    fn test_other_statuses_pass_through() {
        for status in [200, 201, 204, 301, 304, 401, 405, 409, 422, 501, 505] {
            let original = exchange(status).with_body(r#"{"meta": {"error_message": "x"}}"#);
            let passed = classify(original.clone()).unwrap();
            assert_eq!(passed, original);
        }
    }

    #[test]
    fn test_client_error_without_body() {
        let err = classify(exchange(404)).unwrap_err();
        assert_eq!(err.message(), format!("GET {URL}: 404"));
    }

    #[test]
    fn test_client_error_with_empty_or_broken_body() {
        for body in ["", "<html>Not Found</html>", "{\"meta\":", "[1, 2, 3]", "\"text\""] {
            let err = classify(exchange(400).with_body(body)).unwrap_err();
            assert_eq!(err, ServiceError::BadRequest(format!("GET {URL}: 400")));
        }
    }

    #[test]
    fn test_client_error_meta_message() {
        let body = r#"{"meta": {"error_type": "APINotFoundError", "code": 404, "error_message": "this user does not exist"}}"#;
        let err = classify(exchange(404).with_body(body)).unwrap_err();
        assert_eq!(
            err.message(),
            format!("GET {URL}: 404: this user does not exist")
        );
        assert!(err.message().ends_with(": this user does not exist"));
    }

    #[test]
    fn test_client_error_top_level_message() {
        let body = r#"{"error_type": "OAuthException", "code": 400, "error_message": "No matching code found."}"#;
        let err = classify(exchange(400).with_body(body)).unwrap_err();
        assert_eq!(
            err.message(),
            format!("GET {URL}: 400: OAuthException: No matching code found.")
        );

        let body = r#"{"error_message": "Slow down."}"#;
        let err = classify(exchange(429).with_body(body)).unwrap_err();
        assert_eq!(err.message(), format!("GET {URL}: 429: Slow down."));
    }

    #[test]
    fn test_empty_meta_message_falls_back() {
        let body = r#"{"meta": {"error_message": ""}, "error_type": "OAuthRateLimitException", "error_message": "Too many requests."}"#;
        let err = classify(exchange(429).with_body(body)).unwrap_err();
        assert_eq!(
            err.message(),
            format!("GET {URL}: 429: OAuthRateLimitException: Too many requests.")
        );

        let body = r#"{"meta": {"code": 403}, "error_message": ""}"#;
        let err = classify(exchange(403).with_body(body)).unwrap_err();
        assert_eq!(err.message(), format!("GET {URL}: 403"));
    }

    #[test]
    fn test_meta_message_survives_odd_sibling_fields() {
        let bodies = [
            r#"{"meta": {"error_message": "X"}, "error_type": 404}"#,
            r#"{"meta": {"error_message": "X", "code": 400}, "error_message": {"en": "y"}}"#,
            r#"{"meta": {"error_message": "X", "code": 400}, "error_message": ["a"]}"#,
            r#"{"meta": {"error_message": "X", "error_type": null, "code": "400"}}"#,
        ];
        for body in bodies {
            let err = classify(exchange(400).with_body(body)).unwrap_err();
            assert_eq!(err.message(), format!("GET {URL}: 400: X"), "body {body}");
        }

        // A non-string error_type is dropped; the message is still used.
        let body = r#"{"error_type": 7, "error_message": "Rate limited."}"#;
        let err = classify(exchange(429).with_body(body)).unwrap_err();
        assert_eq!(err.message(), format!("GET {URL}: 429: Rate limited."));

        let body = r#"{"meta": {"error_message": 12}, "error_message": false}"#;
        let err = classify(exchange(400).with_body(body)).unwrap_err();
        assert_eq!(err.message(), format!("GET {URL}: 400"));
    }

    #[test]
    fn test_server_error_descriptions() {
        let cases = [
            (500, "Something is technically wrong."),
            (502, "The server returned an invalid or incomplete response."),
            (503, "The remote service is rate limiting your requests."),
            (504, "504 Gateway Time-out"),
        ];
        for (status, description) in cases {
            // The body is never consulted for 5xx.
            let err = classify(
                exchange(status).with_body(r#"{"meta": {"error_message": "ignored"}}"#),
            )
            .unwrap_err();
            assert_eq!(err.message(), format!("GET {URL}: {status}: {description}"));
        }
    }

    #[derive(Debug, thiserror::Error)]
    enum ScriptError {
        #[error(transparent)]
        Service(#[from] ServiceError),
    }

    struct Scripted {
        status: u16,
        seen: Mutex<Vec<ApiRequest>>,
    }

    #[async_trait::async_trait]
    impl RequestExecutor for Scripted {
        type Error = ScriptError;

        async fn execute(&self, request: ApiRequest) -> Result<Exchange, ScriptError> {
            let exchange = Exchange::new(request.method.as_str(), request.url.as_str(), self.status);
            self.seen.lock().unwrap().push(request);
            Ok(exchange)
        }
    }

    #[tokio::test]
    async fn test_decorator_raises_and_passes_through() {
        let url = url::Url::parse(URL).unwrap();

        let ok = RaiseHttpError::new(Scripted {
            status: 200,
            seen: Mutex::new(Vec::new()),
        });
        let exchange = ok
            .execute(ApiRequest::new(HttpMethod::Get, url.clone()))
            .await
            .unwrap();
        assert_eq!(exchange.status, 200);
        assert_eq!(ok.inner().seen.lock().unwrap().len(), 1);

        let failing = RaiseHttpError::new(Scripted {
            status: 403,
            seen: Mutex::new(Vec::new()),
        });
        let ScriptError::Service(err) = failing
            .execute(ApiRequest::new(HttpMethod::Delete, url))
            .await
            .unwrap_err();
        assert_eq!(err, ServiceError::Forbidden(format!("DELETE {URL}: 403")));
    }
}
