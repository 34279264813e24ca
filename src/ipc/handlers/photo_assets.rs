use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use crate::photo;
use serde_json::json;
use std::path::Path;

/// File-to-data-URI conversion for the creation form. Runs before
/// `roster.create`, which then receives the finished URI as a plain field;
/// an empty photo selection simply never calls this.
fn handle_photo_encode(req: &Request) -> serde_json::Value {
    let Some(path) = req.params.get("path").and_then(|v| v.as_str()) else {
        return err(&req.id, "bad_params", "missing params.path", None);
    };
    match photo::encode_photo(Path::new(path)) {
        Ok(data_uri) => ok(&req.id, json!({ "dataUri": data_uri })),
        Err(e) => err(&req.id, "photo_failed", e.to_string(), None),
    }
}

pub fn try_handle(_state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "photo.encode" => Some(handle_photo_encode(req)),
        _ => None,
    }
}
