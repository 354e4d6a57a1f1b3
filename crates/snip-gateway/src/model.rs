use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CreateLinkRequest {
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub id: String,
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct BulkCreateRequest {
    pub urls: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct BulkCreateResponse {
    pub ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct BulkDeleteRequest {
    pub ids: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct BulkDeleteResponse {
    pub removed: u64,
}

#[derive(Debug, Serialize)]
pub struct CacheStatusResponse {
    pub id: String,
    pub cached: bool,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
