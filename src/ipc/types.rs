use std::path::PathBuf;

use serde::Deserialize;

use crate::kv::KvStore;
use crate::roster::Roster;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

pub struct AppState {
    pub workspace: Option<PathBuf>,
    pub store: Option<KvStore>,
    /// Empty until a workspace is selected; fully reloaded on select/import.
    pub roster: Roster,
}

impl AppState {
    pub fn new() -> AppState {
        AppState {
            workspace: None,
            store: None,
            roster: Roster::default(),
        }
    }
}
