use thiserror::Error;

/// Errors from the Zendesk gateway, tagged by the kind of call that failed.
#[derive(Debug, Error)]
pub enum ZendeskError {
    #[error("zendesk lookup failed: HTTP {status}: {body}")]
    Lookup { status: u16, body: String },

    #[error("zendesk update failed: HTTP {status}: {body}")]
    Update { status: u16, body: String },

    #[error("zendesk transport error: {0}")]
    Http(#[from] reqwest::Error),
}
