use axum::{extract::Path, response::Json};
use serde::Serialize;

// Journal data is served by the persistence layer; these endpoints answer
// with empty collections until it is wired in.

#[derive(Serialize)]
pub struct EntriesResponse {
    pub entries: Vec<EntryResponse>,
    pub count: usize,
}

#[derive(Serialize)]
pub struct EntryResponse {
    pub id: i64,
}

pub async fn list_entries() -> Json<EntriesResponse> {
    Json(EntriesResponse {
        entries: Vec::new(),
        count: 0,
    })
}

pub async fn get_entry(Path(id): Path<i64>) -> Json<EntryResponse> {
    Json(EntryResponse { id })
}

pub async fn list_insights() -> Json<serde_json::Value> {
    Json(serde_json::json!({"insights": []}))
}
