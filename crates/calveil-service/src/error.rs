use thiserror::Error;

/// Service layer errors
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    CoreError(#[from] calveil_core::error::CoreError),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Malformed URL")]
    MalformedUrl,

    #[error("Protocol forbidden")]
    ForbiddenProtocol,

    #[error("Domain not authorized")]
    UnauthorizedHost,

    #[error("Upstream returned status {0}")]
    UpstreamStatus(u16),

    #[error("Invalid content type: {0}")]
    UnsupportedContentType(String),

    #[error("Body too large: {0} bytes")]
    BodyTooLarge(u64),

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token sealing failed")]
    TokenSealFailed,
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
