use crate::calc::{self, AttendanceSummary};
use crate::roster::{Roster, Student};
use serde::Serialize;

pub const ALL_CLASSES: &str = "All Classes";
pub const SELECT_PLACEHOLDER: &str = "Select Student";
pub const NO_MATCH_MESSAGE: &str = "No student found.";

/// Numeric portion of a `"Class <n>"` label, as the filter compares it:
/// plain string equality after stripping the prefix.
fn class_numeric_portion(label: &str) -> String {
    label.replacen("Class ", "", 1)
}

/// Display sort key. Labels whose numeric portion does not parse sort last,
/// keeping their insertion order under the stable sort.
fn class_sort_key(label: &str) -> i64 {
    class_numeric_portion(label)
        .trim()
        .parse::<i64>()
        .unwrap_or(i64::MAX)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarksSummary {
    pub maths: f64,
    pub science: f64,
    pub english: f64,
    pub average: f64,
    pub grade: String,
}

fn marks_summary(s: &Student) -> Option<MarksSummary> {
    let marks = s.marks.as_ref()?;
    Some(MarksSummary {
        maths: marks.maths,
        science: marks.science,
        english: marks.english,
        average: marks.average(),
        grade: s.grade.clone().unwrap_or_default(),
    })
}

/// One rendered table row. `student_id` and `position` are the action
/// wiring: the id is the stable capability, the position is its resolution
/// against the canonical collection at projection time. Rows from filtered
/// or sorted views therefore still address the correct underlying record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    pub student_id: String,
    pub position: usize,
    pub roll: String,
    pub name: String,
    pub class: String,
    pub has_photo: bool,
    pub photo: String,
    pub marks: Option<MarksSummary>,
    pub attendance: AttendanceSummary,
}

/// Sorts a copy of `list` by numeric class ascending (storage order is never
/// touched) and resolves each row's storage position from the canonical
/// collection.
pub fn table_rows(roster: &Roster, list: &[Student]) -> Vec<TableRow> {
    let mut sorted: Vec<&Student> = list.iter().collect();
    sorted.sort_by_key(|s| class_sort_key(&s.class));

    sorted
        .into_iter()
        .filter_map(|s| {
            let position = roster.position_of(&s.id)?;
            Some(TableRow {
                student_id: s.id.clone(),
                position,
                roll: s.roll.clone(),
                name: s.name.clone(),
                class: s.class.clone(),
                has_photo: !s.photo.is_empty(),
                photo: s.photo.clone(),
                marks: marks_summary(s),
                attendance: calc::attendance_summary(s.present, s.absent),
            })
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// Placeholder option first, then one option per student keyed by stable id
/// with label `"<name> (<roll>)"`.
pub fn select_options(list: &[Student]) -> Vec<SelectOption> {
    let mut options = Vec::with_capacity(list.len() + 1);
    options.push(SelectOption {
        value: String::new(),
        label: SELECT_PLACEHOLDER.to_string(),
    });
    for s in list {
        options.push(SelectOption {
            value: s.id.clone(),
            label: format!("{} ({})", s.name, s.roll),
        });
    }
    options
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartAxis {
    pub begin_at_zero: bool,
    pub max: f64,
}

/// Parallel labels/values for the bar-chart sink. Each payload is complete
/// and replaces whatever chart was rendered before; the sink must dispose
/// the previous instance rather than accumulate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub axis: ChartAxis,
}

pub fn chart_data(list: &[Student]) -> ChartData {
    ChartData {
        labels: list.iter().map(|s| s.name.clone()).collect(),
        values: list
            .iter()
            .map(|s| s.marks.as_ref().map(|m| m.average()).unwrap_or(0.0))
            .collect(),
        axis: ChartAxis {
            begin_at_zero: true,
            max: 100.0,
        },
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewBundle {
    pub table: Vec<TableRow>,
    pub select_options: Vec<SelectOption>,
    pub chart: ChartData,
}

/// Table, select options, and chart from the same scope, in that order. All
/// three share the display sort, as the original renders did.
pub fn project(roster: &Roster, list: &[Student]) -> ViewBundle {
    let mut sorted: Vec<Student> = list.to_vec();
    sorted.sort_by_key(|s| class_sort_key(&s.class));
    ViewBundle {
        table: table_rows(roster, &sorted),
        select_options: select_options(&sorted),
        chart: chart_data(&sorted),
    }
}

/// The unfiltered full-roster projection every mutation redraws.
pub fn project_full(roster: &Roster) -> ViewBundle {
    project(roster, roster.students())
}

/// `"All Classes"` passes the roster through unchanged; anything else keeps
/// the students whose numeric class portion matches the selection's exactly.
pub fn filter_class(roster: &Roster, selected: &str) -> Vec<Student> {
    if selected == ALL_CLASSES {
        return roster.students().to_vec();
    }
    let want = class_numeric_portion(selected);
    roster
        .students()
        .iter()
        .filter(|s| class_numeric_portion(&s.class) == want)
        .cloned()
        .collect()
}

/// Read-only search card: no action wiring, no storage-position bindings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCard {
    pub name: String,
    pub roll: String,
    pub class: String,
    pub has_photo: bool,
    pub photo: String,
    pub marks: Option<MarksSummary>,
}

/// Case-insensitive substring match of the trimmed query against name or
/// roll. An empty query renders nothing at all, which is distinct from the
/// no-match outcome (`None` vs `Some(empty)`).
pub fn search(roster: &Roster, query: &str) -> Option<Vec<SearchCard>> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return None;
    }
    let cards = roster
        .students()
        .iter()
        .filter(|s| s.name.to_lowercase().contains(&q) || s.roll.to_lowercase().contains(&q))
        .map(|s| SearchCard {
            name: s.name.clone(),
            roll: s.roll.clone(),
            class: s.class.clone(),
            has_photo: !s.photo.is_empty(),
            photo: s.photo.clone(),
            marks: marks_summary(s),
        })
        .collect();
    Some(cards)
}
