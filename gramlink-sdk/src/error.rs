//! Service-level error taxonomy.

/// Errors raised for the HTTP statuses the API uses to report failures.
///
/// Each variant corresponds to exactly one status code and carries the fully
/// formatted message built by the [classifier](crate::classifier), e.g.
/// `GET https://api.example.com/v1/users/self: 404: you cannot view this resource`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    /// 400
    #[error("{0}")]
    BadRequest(String),
    /// 403
    #[error("{0}")]
    Forbidden(String),
    /// 404
    #[error("{0}")]
    NotFound(String),
    /// 429
    #[error("{0}")]
    TooManyRequests(String),
    /// 500
    #[error("{0}")]
    InternalServerError(String),
    /// 502
    #[error("{0}")]
    BadGateway(String),
    /// 503
    #[error("{0}")]
    ServiceUnavailable(String),
    /// 504
    #[error("{0}")]
    GatewayTimeout(String),
}

impl ServiceError {
    /// The HTTP status code this error was raised for.
    pub fn status(&self) -> u16 {
        match self {
            ServiceError::BadRequest(_) => 400,
            ServiceError::Forbidden(_) => 403,
            ServiceError::NotFound(_) => 404,
            ServiceError::TooManyRequests(_) => 429,
            ServiceError::InternalServerError(_) => 500,
            ServiceError::BadGateway(_) => 502,
            ServiceError::ServiceUnavailable(_) => 503,
            ServiceError::GatewayTimeout(_) => 504,
        }
    }

    /// The formatted message.
    pub fn message(&self) -> &str {
        match self {
            ServiceError::BadRequest(message)
            | ServiceError::Forbidden(message)
            | ServiceError::NotFound(message)
            | ServiceError::TooManyRequests(message)
            | ServiceError::InternalServerError(message)
            | ServiceError::BadGateway(message)
            | ServiceError::ServiceUnavailable(message)
            | ServiceError::GatewayTimeout(message) => message,
        }
    }

    /// Returns `true` for the 5xx variants.
    pub fn is_server_error(&self) -> bool {
        self.status() >= 500
    }
}
