use thiserror::Error;

/// Errors returned by the Overpass client.
#[derive(Debug, Error)]
pub enum OverpassError {
    /// Network, TLS or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The interpreter answered with a non-success status (429 and 504 are
    /// the usual rate-limit and load-shedding responses).
    #[error("unexpected HTTP status {status} from Overpass: {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The query ran but the interpreter aborted it and said so in `remark`.
    #[error("Overpass runtime error: {0}")]
    Runtime(String),

    #[error("invalid Overpass endpoint \"{url}\": {reason}")]
    InvalidEndpoint { url: String, reason: String },
}
