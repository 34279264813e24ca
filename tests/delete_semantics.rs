
use serde_json::json;
use test_support::{create_student, request_ok, spawn_sidecar, temp_dir};

#[test]
fn unconfirmed_delete_is_a_full_no_op() {
    let workspace = temp_dir("rosterd-delete-unconfirmed");
    let (_child, mut stdin, mut reader) = spawn_sidecar();

    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "workspace.select",
        json!({ "path": workspace.to_string_lossy() }),
    );
    let amy = create_student(&mut stdin, &mut reader, "2", "1", "Amy", "Class 5");

    // Declined confirmation gate.
    let declined = request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "roster.delete",
        json!({ "studentId": amy }),
    );
    assert_eq!(declined.get("deleted").and_then(|v| v.as_bool()), Some(false));

    let views = request_ok(&mut stdin, &mut reader, "4", "roster.view", json!({}));
    assert_eq!(
        views.get("table").and_then(|v| v.as_array()).expect("table").len(),
        1
    );

    let _ = std::fs::remove_dir_all(workspace);
}

#[test]
fn confirmed_delete_removes_exactly_one_record_preserving_identities() {
    let workspace = temp_dir("rosterd-delete-identity");
    let (_child, mut stdin, mut reader) = spawn_sidecar();

    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "workspace.select",
        json!({ "path": workspace.to_string_lossy() }),
    );
    let _amy = create_student(&mut stdin, &mut reader, "2", "1", "Amy", "Class 5");
    let bob = create_student(&mut stdin, &mut reader, "3", "2", "Bob", "Class 3");
    let _cid = create_student(&mut stdin, &mut reader, "4", "3", "Cid", "Class 4");

    let deleted = request_ok(
        &mut stdin,
        &mut reader,
        "5",
        "roster.delete",
        json!({ "studentId": bob, "confirmed": true }),
    );
    assert_eq!(deleted.get("deleted").and_then(|v| v.as_bool()), Some(true));

    let table = deleted
        .get("views")
        .and_then(|v| v.get("table"))
        .and_then(|v| v.as_array())
        .expect("table");
    let mut rolls: Vec<&str> = table
        .iter()
        .filter_map(|r| r.get("roll").and_then(|v| v.as_str()))
        .collect();
    rolls.sort_unstable();
    assert_eq!(rolls, ["1", "3"], "only Bob's record is gone");

    // Storage positions shift, but each survivor keeps its own roll/identity.
    for row in table {
        let roll = row.get("roll").and_then(|v| v.as_str()).unwrap_or("");
        let name = row.get("name").and_then(|v| v.as_str()).unwrap_or("");
        match roll {
            "1" => assert_eq!(name, "Amy"),
            "3" => assert_eq!(name, "Cid"),
            other => panic!("unexpected roll {}", other),
        }
    }

    let _ = std::fs::remove_dir_all(workspace);
}
