use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct DocumentListResponse {
    pub owner: Uuid,
    pub documents: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct DocumentsPurgedResponse {
    pub purged_by: Uuid,
}
