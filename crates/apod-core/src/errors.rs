/// Core error type.
///
/// Adapter crates map their transport-specific failures into this type so the
/// pipeline can tell fatal fetch failures apart from best-effort delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("upstream error: status {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("delivery error: {0}")]
    Delivery(String),

    #[error("transport error: {0}")]
    Transport(String),
}

pub type Result<T> = std::result::Result<T, Error>;
