use serde::{Deserialize, Serialize};

pub const DEFAULT_TOKEN_TYPE: &str = "bearer";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

impl Token {
    pub fn bearer(access_token: String, refresh_token: Option<String>) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: default_token_type(),
        }
    }
}

fn default_token_type() -> String {
    DEFAULT_TOKEN_TYPE.to_string()
}
