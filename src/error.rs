use thiserror::Error;

/// Everything that can go wrong between the API call and the files on disk.
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// Network or HTTP-level failure (DNS, timeout, connection reset, bad status on a page).
    #[error("transport error for {url}: {reason}")]
    Transport { url: String, reason: String },

    /// The API rejected our cookie. Only seen inside the gateway, which retries once.
    #[error("session token rejected: {0}")]
    AuthExpired(String),

    /// No paragraph on the page had both a bold element and enough text.
    #[error("no qualifying paragraph found (need <{selector}> and more than {min_chars} chars)")]
    NoQualifyingParagraph { selector: String, min_chars: usize },

    /// The API answered, but not with the shape we expected.
    #[error("malformed response from {url}: {reason}")]
    MalformedResponse { url: String, reason: String },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ScrapeError {
    pub fn transport(url: &str, reason: impl ToString) -> Self {
        ScrapeError::Transport {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn malformed(url: &str, reason: impl ToString) -> Self {
        ScrapeError::MalformedResponse {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
