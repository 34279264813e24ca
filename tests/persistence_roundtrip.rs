
use serde_json::json;
use test_support::{create_student, request_ok, spawn_sidecar, temp_dir};

#[test]
fn roster_survives_a_process_restart_intact() {
    let workspace = temp_dir("rosterd-roundtrip");

    let first_table = {
        let (mut child, mut stdin, mut reader) = spawn_sidecar();
        let _ = request_ok(
            &mut stdin,
            &mut reader,
            "1",
            "workspace.select",
            json!({ "path": workspace.to_string_lossy() }),
        );
        let amy = create_student(&mut stdin, &mut reader, "2", "1", "Amy", "5");
        create_student(&mut stdin, &mut reader, "3", "2", "Bob", "3");
        let _ = request_ok(
            &mut stdin,
            &mut reader,
            "4",
            "attendance.mark",
            json!({ "studentId": amy, "kind": "present" }),
        );
        let _ = request_ok(
            &mut stdin,
            &mut reader,
            "5",
            "marks.assign",
            json!({ "studentId": amy, "maths": 95, "science": 85, "english": 90 }),
        );
        let views = request_ok(&mut stdin, &mut reader, "6", "roster.view", json!({}));
        drop(stdin);
        let _ = child.wait();
        views.get("table").cloned().expect("table")
    };

    let (_child, mut stdin, mut reader) = spawn_sidecar();
    let selected = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "workspace.select",
        json!({ "path": workspace.to_string_lossy() }),
    );
    assert_eq!(selected.get("studentCount").and_then(|v| v.as_u64()), Some(2));

    let views = request_ok(&mut stdin, &mut reader, "2", "roster.view", json!({}));
    assert_eq!(
        views.get("table").expect("table"),
        &first_table,
        "reloaded projection equals the one rendered before the restart"
    );

    let _ = std::fs::remove_dir_all(workspace);
}

#[test]
fn selecting_a_fresh_workspace_yields_an_empty_roster() {
    let workspace = temp_dir("rosterd-roundtrip-fresh");
    let (_child, mut stdin, mut reader) = spawn_sidecar();

    let selected = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "workspace.select",
        json!({ "path": workspace.to_string_lossy() }),
    );
    assert_eq!(selected.get("studentCount").and_then(|v| v.as_u64()), Some(0));

    let views = request_ok(&mut stdin, &mut reader, "2", "roster.view", json!({}));
    assert!(views
        .get("table")
        .and_then(|v| v.as_array())
        .expect("table")
        .is_empty());

    let _ = std::fs::remove_dir_all(workspace);
}
