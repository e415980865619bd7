//! CSV loaders for candidates and slots.
//!
//! Candidates: header `student_id,preferences,gno` (or
//! `id,preferences,priority`); preferences are comma-separated inside one
//! quoted field. Empty entries (`"F1,,F2"`) are kept as preferences that
//! name no slot.
//!
//! ```text
//! student_id,preferences,gno
//! S1,"F1,F3,F2,F5,F4",3.42
//! ```
//!
//! Slots: header `firma_id,kapasite` (or `id,capacity`).
//!
//! ```text
//! firma_id,kapasite
//! F1,3
//! ```
//!
//! Fields are trimmed. Any missing column, empty identifier, or number
//! that does not parse fails the whole load.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::debug;

use crate::error::PlacementError;
use crate::store::{Candidate, EntityStore, Slot};

const CANDIDATE_ID: &[&str] = &["student_id", "id"];
const PREFERENCES: &[&str] = &["preferences"];
const PRIORITY: &[&str] = &["gno", "priority"];
const SLOT_ID: &[&str] = &["firma_id", "id"];
const CAPACITY: &[&str] = &["kapasite", "capacity"];

/// Parses candidates from CSV.
///
/// # Examples
///
/// ```
/// use u_placement::source::read_candidates;
///
/// let data = "student_id,preferences,gno\nS1,\"F1, F2\",3.5\n";
/// let candidates = read_candidates(data.as_bytes()).unwrap();
/// assert_eq!(candidates[0].preferences(), &["F1".to_string(), "F2".to_string()]);
/// ```
pub fn read_candidates<R: Read>(reader: R) -> Result<Vec<Candidate>, PlacementError> {
    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let headers = rdr.headers()?.clone();
    let id_col = column(&headers, CANDIDATE_ID)?;
    let pref_col = column(&headers, PREFERENCES)?;
    let priority_col = column(&headers, PRIORITY)?;

    let mut candidates = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let line = line_of(&record);

        let id = identifier(&record, id_col, line)?;
        let preferences: Vec<&str> = field(&record, pref_col, line)?
            .split(',')
            .map(str::trim)
            .collect();
        let raw_priority = field(&record, priority_col, line)?;
        let priority = raw_priority
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite())
            .ok_or_else(|| {
                let reason = format!("priority `{raw_priority}` is not a number");
                PlacementError::malformed(line, reason)
            })?;

        candidates.push(Candidate::new(id, preferences, priority));
    }
    Ok(candidates)
}

/// Parses slots from CSV.
pub fn read_slots<R: Read>(reader: R) -> Result<Vec<Slot>, PlacementError> {
    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let headers = rdr.headers()?.clone();
    let id_col = column(&headers, SLOT_ID)?;
    let capacity_col = column(&headers, CAPACITY)?;

    let mut slots = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let line = line_of(&record);

        let id = identifier(&record, id_col, line)?;
        let raw_capacity = field(&record, capacity_col, line)?;
        let capacity: usize = raw_capacity.parse().map_err(|_| {
            PlacementError::malformed(
                line,
                format!("capacity `{raw_capacity}` is not a non-negative integer"),
            )
        })?;

        slots.push(Slot::new(id, capacity));
    }
    Ok(slots)
}

pub fn load_candidates(path: impl AsRef<Path>) -> Result<Vec<Candidate>, PlacementError> {
    read_candidates(File::open(path)?)
}

pub fn load_slots(path: impl AsRef<Path>) -> Result<Vec<Slot>, PlacementError> {
    read_slots(File::open(path)?)
}

/// Loads both files and builds the store.
pub fn load_store(
    candidates: impl AsRef<Path>,
    slots: impl AsRef<Path>,
) -> Result<EntityStore, PlacementError> {
    let candidates = load_candidates(candidates)?;
    let slots = load_slots(slots)?;
    debug!(
        event = "input_loaded",
        candidates = candidates.len(),
        slots = slots.len()
    );
    EntityStore::new(candidates, slots)
}

fn column(headers: &StringRecord, names: &[&str]) -> Result<usize, PlacementError> {
    headers
        .iter()
        .position(|h| names.iter().any(|n| h.eq_ignore_ascii_case(n)))
        .ok_or_else(|| PlacementError::malformed(1, format!("missing column `{}`", names[0])))
}

fn line_of(record: &StringRecord) -> u64 {
    record.position().map_or(0, |p| p.line())
}

fn field(record: &StringRecord, col: usize, line: u64) -> Result<&str, PlacementError> {
    record
        .get(col)
        .ok_or_else(|| PlacementError::malformed(line, format!("missing field {}", col + 1)))
}

fn identifier(record: &StringRecord, col: usize, line: u64) -> Result<&str, PlacementError> {
    let id = field(record, col, line)?;
    if id.is_empty() {
        return Err(PlacementError::malformed(line, "empty identifier"));
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_candidates() {
        let data = "student_id,preferences,gno\n\
                    S1,\"F1,F3,F2\",3.42\n\
                    S2,\"F2\",2.10\n";
        let candidates = read_candidates(data.as_bytes()).unwrap();

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].id(), "S1");
        assert_eq!(candidates[0].preferences(), &["F1", "F3", "F2"]);
        assert!((candidates[0].priority() - 3.42).abs() < 1e-12);
        assert_eq!(candidates[1].preferences(), &["F2"]);
    }

    #[test]
    fn test_empty_preference_entries_kept() {
        let data = "student_id,preferences,gno\nS1,\"F1,, F2\",3.0\nS2,\"\",2.0\n";
        let candidates = read_candidates(data.as_bytes()).unwrap();
        assert_eq!(candidates[0].preferences(), &["F1", "", "F2"]);
        assert_eq!(candidates[1].preferences(), &[""]);
    }

    #[test]
    fn test_alias_headers() {
        let data = "id,priority,preferences\nS1,2.5,\"A, B\"\n";
        let candidates = read_candidates(data.as_bytes()).unwrap();
        assert_eq!(candidates[0].preferences(), &["A", "B"]);
        assert!((candidates[0].priority() - 2.5).abs() < 1e-12);

        let slots = read_slots("id,capacity\nA, 4\n".as_bytes()).unwrap();
        assert_eq!(slots[0].capacity(), 4);
    }

    #[test]
    fn test_read_slots() {
        let data = "firma_id,kapasite\nF1,3\n F2 ,0\n";
        let slots = read_slots(data.as_bytes()).unwrap();
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[1].id(), "F2");
        assert_eq!(slots[1].capacity(), 0);
    }

    #[test]
    fn test_bad_capacity() {
        let data = "firma_id,kapasite\nF1,3\nF2,many\n";
        let err = read_slots(data.as_bytes()).unwrap_err();
        match err {
            PlacementError::MalformedInput { line, reason } => {
                assert_eq!(line, 3);
                assert!(reason.contains("many"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_negative_capacity_rejected() {
        let err = read_slots("firma_id,kapasite\nF1,-1\n".as_bytes()).unwrap_err();
        assert!(matches!(err, PlacementError::MalformedInput { .. }));
    }

    #[test]
    fn test_bad_priority() {
        let data = "student_id,preferences,gno\nS1,\"F1\",high\n";
        let err = read_candidates(data.as_bytes()).unwrap_err();
        assert!(matches!(err, PlacementError::MalformedInput { line: 2, .. }));
    }

    #[test]
    fn test_non_finite_priority() {
        let data = "student_id,preferences,gno\nS1,\"F1\",NaN\n";
        let err = read_candidates(data.as_bytes()).unwrap_err();
        assert!(matches!(err, PlacementError::MalformedInput { line: 2, .. }));
    }

    #[test]
    fn test_missing_column() {
        let err = read_slots("firma_id\nF1\n".as_bytes()).unwrap_err();
        match err {
            PlacementError::MalformedInput { reason, .. } => {
                assert!(reason.contains("kapasite"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_id() {
        let err = read_slots("firma_id,kapasite\n,2\n".as_bytes()).unwrap_err();
        assert!(matches!(err, PlacementError::MalformedInput { .. }));
    }

    #[test]
    fn test_ragged_row_is_csv_error() {
        let err = read_slots("firma_id,kapasite\nF1,2,extra\n".as_bytes()).unwrap_err();
        assert!(matches!(err, PlacementError::Csv(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = load_slots("/nonexistent/firms.csv").unwrap_err();
        assert!(matches!(err, PlacementError::Io(_)));
    }
}
