use crate::ipc::error::{err, ok};
use crate::ipc::helpers::{get_bool, get_required_str, get_str_or_default, to_json, HandlerErr};
use crate::ipc::types::{AppState, Request};
use crate::kv::KvStore;
use crate::roster::Roster;
use crate::view;
use serde_json::json;

fn roster_view(roster: &Roster, params: &serde_json::Value) -> serde_json::Value {
    match params.get("classFilter").and_then(|v| v.as_str()) {
        Some(selected) => {
            let subset = view::filter_class(roster, selected);
            to_json(&view::project(roster, &subset))
        }
        None => to_json(&view::project_full(roster)),
    }
}

fn roster_create(
    roster: &mut Roster,
    store: &KvStore,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    // Raw user-supplied strings; nothing is validated and empty strings are
    // stored as-is. The class label is normalized on the way in.
    let roll = get_required_str(params, "roll")?;
    let name = get_required_str(params, "name")?;
    let class = get_required_str(params, "class")?;
    let photo = get_str_or_default(params, "photo");

    let student_id = roster.create(roll, name, class, photo).id.clone();
    roster
        .save(store)
        .map_err(|e| HandlerErr::new("db_update_failed", e.to_string()))?;
    Ok(json!({
        "studentId": student_id,
        "views": to_json(&view::project_full(roster))
    }))
}

fn roster_delete(
    roster: &mut Roster,
    store: &KvStore,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let student_id = get_required_str(params, "studentId")?;

    // The yes/no dialog lives in the UI shell; an unconfirmed request is the
    // declined gate and a full no-op.
    if !get_bool(params, "confirmed") {
        return Ok(json!({ "deleted": false }));
    }

    if roster.delete(&student_id).is_none() {
        return Err(HandlerErr::new("not_found", "student not found"));
    }
    roster
        .save(store)
        .map_err(|e| HandlerErr::new("db_update_failed", e.to_string()))?;
    Ok(json!({
        "deleted": true,
        "views": to_json(&view::project_full(roster))
    }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "roster.view" => {
            if state.store.is_none() {
                return Some(err(&req.id, "no_workspace", "select a workspace first", None));
            }
            Some(ok(&req.id, roster_view(&state.roster, &req.params)))
        }
        "roster.create" => {
            let Some(store) = state.store.as_ref() else {
                return Some(err(&req.id, "no_workspace", "select a workspace first", None));
            };
            Some(match roster_create(&mut state.roster, store, &req.params) {
                Ok(result) => ok(&req.id, result),
                Err(error) => error.response(&req.id),
            })
        }
        "roster.delete" => {
            let Some(store) = state.store.as_ref() else {
                return Some(err(&req.id, "no_workspace", "select a workspace first", None));
            };
            Some(match roster_delete(&mut state.roster, store, &req.params) {
                Ok(result) => ok(&req.id, result),
                Err(error) => error.response(&req.id),
            })
        }
        _ => None,
    }
}
