use crate::calc;
use crate::kv::{KvStore, STUDENTS_KEY};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Per-subject marks. Values are kept as raw f64 so that the NaN sentinel
/// produced by non-numeric input flows through average and grade unchanged.
/// serde_json writes non-finite floats as `null`; the deserializer maps a
/// `null` back to NaN so the persisted shape round-trips.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubjectMarks {
    #[serde(deserialize_with = "f64_null_as_nan")]
    pub maths: f64,
    #[serde(deserialize_with = "f64_null_as_nan")]
    pub science: f64,
    #[serde(deserialize_with = "f64_null_as_nan")]
    pub english: f64,
}

fn f64_null_as_nan<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

impl SubjectMarks {
    pub fn average(&self) -> f64 {
        calc::subject_average(self.maths, self.science, self.english)
    }
}

/// One enrolled student. The serde shape doubles as the persisted record;
/// every field beyond roll/name/class defaults so blobs written by older
/// versions load cleanly (the one-time normalization pass finishes the job).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    /// Stable action-capability key. Backfilled on load for records persisted
    /// without one; never user-visible.
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub roll: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub class: String,
    #[serde(default)]
    pub photo: String,
    #[serde(default)]
    pub present: u64,
    #[serde(default)]
    pub absent: u64,
    #[serde(default)]
    pub marks: Option<SubjectMarks>,
    #[serde(default)]
    pub grade: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttendanceKind {
    Present,
    Absent,
}

impl AttendanceKind {
    pub fn parse(raw: &str) -> Option<AttendanceKind> {
        match raw {
            "present" => Some(AttendanceKind::Present),
            "absent" => Some(AttendanceKind::Absent),
            _ => None,
        }
    }
}

/// `"Class 5"` stays `"Class 5"`, `"5"` becomes `"Class 5"`.
pub fn normalize_class_label(raw: &str) -> String {
    if raw.starts_with("Class ") {
        raw.to_string()
    } else {
        format!("Class {}", raw)
    }
}

fn normalize_student(mut s: Student) -> Student {
    if s.id.is_empty() {
        s.id = Uuid::new_v4().to_string();
    }
    // grade is defined iff marks is defined; repair either direction.
    match &s.marks {
        Some(m) if s.grade.is_none() => {
            s.grade = Some(calc::letter_grade(m.average()).to_string());
        }
        None => s.grade = None,
        _ => {}
    }
    s
}

/// The canonical ordered collection. Storage order is insertion order and is
/// never resorted; every projection that sorts works on a copy.
#[derive(Debug, Default)]
pub struct Roster {
    students: Vec<Student>,
}

impl Roster {
    /// Reads and normalizes the persisted blob. Missing or malformed content
    /// degrades to an empty roster; this never fails outward.
    pub fn load(store: &KvStore) -> Roster {
        let raw = match store.get(STUDENTS_KEY) {
            Ok(Some(v)) => v,
            _ => return Roster::default(),
        };
        let parsed: Vec<Student> = serde_json::from_str(&raw).unwrap_or_default();
        Roster {
            students: parsed.into_iter().map(normalize_student).collect(),
        }
    }

    /// Serializes the full collection under the one well-known key,
    /// unconditionally overwriting prior content.
    pub fn save(&self, store: &KvStore) -> anyhow::Result<()> {
        let blob = serde_json::to_string(&self.students)?;
        store.set(STUDENTS_KEY, &blob)
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    /// Storage position of a record, resolved at the moment an action fires.
    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.students.iter().position(|s| s.id == id)
    }

    /// Appends a new student. Nothing is validated (empty strings are stored
    /// as-is) and roll uniqueness is not enforced.
    pub fn create(&mut self, roll: String, name: String, class: String, photo: String) -> &Student {
        let idx = self.students.len();
        self.students.push(Student {
            id: Uuid::new_v4().to_string(),
            roll,
            name,
            class: normalize_class_label(&class),
            photo,
            present: 0,
            absent: 0,
            marks: None,
            grade: None,
        });
        &self.students[idx]
    }

    pub fn delete(&mut self, id: &str) -> Option<Student> {
        let pos = self.position_of(id)?;
        Some(self.students.remove(pos))
    }

    pub fn mark_attendance(&mut self, id: &str, kind: AttendanceKind) -> Option<&Student> {
        let pos = self.position_of(id)?;
        let s = &mut self.students[pos];
        match kind {
            AttendanceKind::Present => s.present += 1,
            AttendanceKind::Absent => s.absent += 1,
        }
        Some(&self.students[pos])
    }

    pub fn reset_attendance(&mut self, id: &str) -> Option<&Student> {
        let pos = self.position_of(id)?;
        let s = &mut self.students[pos];
        s.present = 0;
        s.absent = 0;
        Some(&self.students[pos])
    }

    /// Stores marks and the derived grade together. NaN inputs are accepted
    /// and yield a NaN average, which grades as "Fail".
    pub fn set_marks(
        &mut self,
        id: &str,
        maths: f64,
        science: f64,
        english: f64,
    ) -> Option<&Student> {
        let pos = self.position_of(id)?;
        let marks = SubjectMarks {
            maths,
            science,
            english,
        };
        let grade = calc::letter_grade(marks.average()).to_string();
        let s = &mut self.students[pos];
        s.marks = Some(marks);
        s.grade = Some(grade);
        Some(&self.students[pos])
    }
}
