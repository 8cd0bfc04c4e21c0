use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct MovieQuery {
    pub title: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
