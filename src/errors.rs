use thiserror::Error;

#[derive(Error, Debug)]
pub enum PageError {
    /// Non-2xx answer from the pagination endpoint. `detail` is the `error`
    /// field of the JSON body when the server sent one.
    #[error("HTTP {status}{}", detail_suffix(.detail))]
    Http {
        status: u16,
        detail: Option<String>,
    },
    #[error("{0}")]
    Network(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Unknown input type: {0}")]
    UnknownInputType(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail.as_deref().map(|d| format!(" ({d})")).unwrap_or_default()
}

impl From<reqwest::Error> for PageError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            PageError::Parse(err.to_string())
        } else {
            PageError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for PageError {
    fn from(err: serde_json::Error) -> Self {
        PageError::Parse(err.to_string())
    }
}
