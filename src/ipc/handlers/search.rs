use crate::ipc::error::{err, ok};
use crate::ipc::helpers::{get_required_str, to_json, HandlerErr};
use crate::ipc::types::{AppState, Request};
use crate::roster::Roster;
use crate::view;
use serde_json::json;

fn search_query(
    roster: &Roster,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let query = get_required_str(params, "query")?;
    Ok(match view::search(roster, &query) {
        // Empty query: render nothing. Not the same as showing everything.
        None => json!({ "cards": [], "noMatches": false }),
        Some(cards) if cards.is_empty() => json!({
            "cards": [],
            "noMatches": true,
            "message": view::NO_MATCH_MESSAGE
        }),
        Some(cards) => json!({ "cards": to_json(&cards), "noMatches": false }),
    })
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "search.query" => {
            if state.store.is_none() {
                return Some(err(&req.id, "no_workspace", "select a workspace first", None));
            }
            Some(match search_query(&state.roster, &req.params) {
                Ok(result) => ok(&req.id, result),
                Err(error) => error.response(&req.id),
            })
        }
        _ => None,
    }
}
