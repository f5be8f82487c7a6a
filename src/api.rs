use serde::{Deserialize, Serialize};

/// Body of `POST /api/save`. `content` is optional so that a body without
/// the field gets the same rejection as an empty string.
#[derive(Debug, Deserialize)]
pub struct SaveRequest {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub success: bool,
    pub url: String,
    #[serde(rename = "rawUrl")]
    pub raw_url: String,
    #[serde(rename = "userId")]
    pub user_id: String,
}

impl SaveResponse {
    pub fn new(id: &str, user_id: &str) -> Self {
        SaveResponse {
            success: true,
            url: format!("/paste/{}", id),
            raw_url: format!("/raw/{}", id),
            user_id: user_id.to_owned(),
        }
    }
}

/// Failure envelope shared by the API error responses.
#[derive(Debug, Serialize)]
pub struct ApiFailure {
    pub success: bool,
    pub message: String,
}

impl ApiFailure {
    pub fn new(message: &str) -> Self {
        ApiFailure {
            success: false,
            message: message.to_owned(),
        }
    }
}
