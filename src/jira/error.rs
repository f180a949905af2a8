use thiserror::Error;

/// Errors from the Jira gateway, tagged by the kind of call that failed.
#[derive(Debug, Error)]
pub enum JiraError {
    #[error("jira lookup failed: HTTP {status}: {body}")]
    Lookup { status: u16, body: String },

    #[error("jira update failed: HTTP {status}: {body}")]
    Update { status: u16, body: String },

    #[error("jira transport error: {0}")]
    Http(#[from] reqwest::Error),
}
