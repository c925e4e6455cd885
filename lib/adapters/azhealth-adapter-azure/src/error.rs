use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AzureApiError {
    #[error("Azure returned {status} for {url}: {code}: {message}")]
    Status {
        status: StatusCode,
        url: String,
        code: String,
        message: String,
    },
    #[error("access token is missing; set AZURE_ACCESS_TOKEN (e.g. from `az account get-access-token`)")]
    MissingToken,
}

impl AzureApiError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::MissingToken => None,
        }
    }
}
