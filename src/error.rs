use thiserror::Error;

/// Failure modes of one sign-on attempt. Every variant is fatal to the
/// attempt; nothing is retried.
#[derive(Debug, Error)]
pub enum LoginError {
    /// A URL needed by the flow could not be constructed (bad hostname or
    /// unjoinable form action). The HTML parser itself is error-tolerant
    /// and never fails.
    #[error("failed to build request URL: {0}")]
    Parse(#[from] url::ParseError),

    /// An expected page element is absent: the sign-on form, a credential
    /// field, or the assertion-bearing input. Wrong credentials also end
    /// here, since a rejected login re-renders the form instead of the
    /// assertion page.
    #[error("can't find {0}")]
    NotFound(&'static str),

    /// Connection, protocol, or body-read failure on either HTTP call.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}
