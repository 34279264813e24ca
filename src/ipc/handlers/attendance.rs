use crate::calc;
use crate::ipc::error::{err, ok};
use crate::ipc::helpers::{get_required_str, to_json, HandlerErr};
use crate::ipc::types::{AppState, Request};
use crate::kv::KvStore;
use crate::roster::{AttendanceKind, Roster};
use crate::view;
use serde_json::json;

fn attendance_mark(
    roster: &mut Roster,
    store: &KvStore,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let student_id = get_required_str(params, "studentId")?;
    let kind_raw = get_required_str(params, "kind")?;
    let kind = AttendanceKind::parse(&kind_raw)
        .ok_or_else(|| HandlerErr::new("bad_params", "kind must be present or absent"))?;

    let Some(student) = roster.mark_attendance(&student_id, kind) else {
        return Err(HandlerErr::new("not_found", "student not found"));
    };
    let summary = calc::attendance_summary(student.present, student.absent);

    roster
        .save(store)
        .map_err(|e| HandlerErr::new("db_update_failed", e.to_string()))?;
    Ok(json!({
        "attendance": to_json(&summary),
        "views": to_json(&view::project_full(roster))
    }))
}

fn attendance_reset(
    roster: &mut Roster,
    store: &KvStore,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let student_id = get_required_str(params, "studentId")?;

    let Some(student) = roster.reset_attendance(&student_id) else {
        return Err(HandlerErr::new("not_found", "student not found"));
    };
    let summary = calc::attendance_summary(student.present, student.absent);

    roster
        .save(store)
        .map_err(|e| HandlerErr::new("db_update_failed", e.to_string()))?;
    Ok(json!({
        "attendance": to_json(&summary),
        "views": to_json(&view::project_full(roster))
    }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    type Handler =
        fn(&mut Roster, &KvStore, &serde_json::Value) -> Result<serde_json::Value, HandlerErr>;
    let handler: Handler = match req.method.as_str() {
        "attendance.mark" => attendance_mark,
        "attendance.reset" => attendance_reset,
        _ => return None,
    };
    let Some(store) = state.store.as_ref() else {
        return Some(err(&req.id, "no_workspace", "select a workspace first", None));
    };
    Some(match handler(&mut state.roster, store, &req.params) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    })
}
