use std::fmt;
use reqwest::StatusCode;

/// Errors while talking to OpenWeatherMap
#[derive(Debug)]
pub enum OwmError {
    /// The request never got a response (connect, timeout, body read)
    Transport(String),
    /// OpenWeatherMap answered with a non success status, e.g. unknown city or bad api key
    Upstream(StatusCode, String),
    /// The response body was not the expected json
    Document(String),
}

impl OwmError {
    /// Whether the requested location is unknown to OpenWeatherMap
    pub fn is_not_found(&self) -> bool {
        matches!(self, OwmError::Upstream(StatusCode::NOT_FOUND, _))
    }
}

impl fmt::Display for OwmError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OwmError::Transport(e) => write!(f, "OwmError::Transport: {}", e),
            OwmError::Upstream(status, message) => write!(f, "OwmError::Upstream: {} {}", status, message),
            OwmError::Document(e) => write!(f, "OwmError::Document: {}", e),
        }
    }
}
impl From<reqwest::Error> for OwmError {
    fn from(e: reqwest::Error) -> Self {
        OwmError::Transport(e.to_string())
    }
}
impl From<serde_json::Error> for OwmError {
    fn from(e: serde_json::Error) -> Self {
        OwmError::Document(e.to_string())
    }
}
