use crate::ipc::error::{err, ok};
use crate::ipc::helpers::{get_mark_value, to_json, HandlerErr};
use crate::ipc::types::{AppState, Request};
use crate::kv::KvStore;
use crate::roster::Roster;
use crate::view;
use serde_json::json;

fn marks_assign(
    roster: &mut Roster,
    store: &KvStore,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    // The dropdown's placeholder has an empty value; submitting with it still
    // selected is the no-selection case and must not touch any state.
    let student_id = params
        .get("studentId")
        .and_then(|v| v.as_str())
        .unwrap_or("");
    if student_id.is_empty() {
        return Err(HandlerErr::new("no_selection", "Select a student!"));
    }

    let maths = get_mark_value(params, "maths");
    let science = get_mark_value(params, "science");
    let english = get_mark_value(params, "english");

    let Some(student) = roster.set_marks(student_id, maths, science, english) else {
        return Err(HandlerErr::new("not_found", "student not found"));
    };
    let marks = student.marks;
    let grade = student.grade.clone();

    roster
        .save(store)
        .map_err(|e| HandlerErr::new("db_update_failed", e.to_string()))?;
    Ok(json!({
        "marks": to_json(&marks),
        "grade": grade,
        "views": to_json(&view::project_full(roster))
    }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "marks.assign" => {
            let Some(store) = state.store.as_ref() else {
                return Some(err(&req.id, "no_workspace", "select a workspace first", None));
            };
            Some(match marks_assign(&mut state.roster, store, &req.params) {
                Ok(result) => ok(&req.id, result),
                Err(error) => error.response(&req.id),
            })
        }
        _ => None,
    }
}
