// SPDX-FileCopyrightText: 2026 Civiq Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deterministic issue-type to department lookup.
//!
//! The table keys are a historical format and are preserved verbatim. The
//! lookup normalizes an incoming label by stripping spaces and hyphens and
//! then compares ignoring ASCII case: the historical normalization
//! (capitalize first character, lowercase the rest) can never equal the
//! mixed-case keys below, so an exact comparison would dead-end the whole
//! table. The case-insensitive comparison keeps the keys literal while
//! letting every label that differs only in casing or separators resolve.

/// Department returned for any label absent from the table.
pub const DEFAULT_DEPARTMENT: &str = "General Municipal Department";

/// Fixed issue-type to department table. Keys are literal historical values.
const DEPARTMENT_TABLE: [(&str, &str); 5] = [
    ("potholes", "Public Works Department (PWD)"),
    ("DamagedElectricalPoles", "State Electricity Board"),
    (
        "garbage",
        "Urban Development Department (Municipal Sanitation Wing)",
    ),
    ("WaterLogging", "Municipal Drainage Department"),
    (
        "FallenTrees",
        "Municipal Horticulture Department / Disaster Management Cell",
    ),
];

/// Resolve an issue-type label to its responsible department.
///
/// Pure and total: unmatched labels resolve to [`DEFAULT_DEPARTMENT`]. The
/// result is a fallback only -- a non-empty department from the triage
/// service takes precedence in the persisted record.
pub fn resolve_department(issue_type: &str) -> &'static str {
    let key = strip_separators(issue_type);
    DEPARTMENT_TABLE
        .iter()
        .find(|(table_key, _)| table_key.eq_ignore_ascii_case(&key))
        .map(|(_, department)| *department)
        .unwrap_or(DEFAULT_DEPARTMENT)
}

/// Remove spaces and hyphens, the separators the historical key format drops.
fn strip_separators(label: &str) -> String {
    label.chars().filter(|c| *c != ' ' && *c != '-').collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_labels_resolve_to_named_departments() {
        assert_eq!(
            resolve_department("potholes"),
            "Public Works Department (PWD)"
        );
        assert_eq!(
            resolve_department("DamagedElectricalPoles"),
            "State Electricity Board"
        );
        assert_eq!(
            resolve_department("garbage"),
            "Urban Development Department (Municipal Sanitation Wing)"
        );
        assert_eq!(
            resolve_department("WaterLogging"),
            "Municipal Drainage Department"
        );
        assert_eq!(
            resolve_department("FallenTrees"),
            "Municipal Horticulture Department / Disaster Management Cell"
        );
    }

    #[test]
    fn separators_and_case_are_ignored() {
        assert_eq!(
            resolve_department("damaged electrical-poles"),
            "State Electricity Board"
        );
        assert_eq!(
            resolve_department("water logging"),
            "Municipal Drainage Department"
        );
        assert_eq!(
            resolve_department("Potholes"),
            "Public Works Department (PWD)"
        );
    }

    #[test]
    fn unmatched_labels_fall_back_to_default() {
        assert_eq!(resolve_department("unknown-garbage-xyz"), DEFAULT_DEPARTMENT);
        assert_eq!(resolve_department("Unknown"), DEFAULT_DEPARTMENT);
        assert_eq!(resolve_department(""), DEFAULT_DEPARTMENT);
    }

    #[test]
    fn resolution_is_pure() {
        // Same input, same output, no state.
        for _ in 0..3 {
            assert_eq!(
                resolve_department("potholes"),
                "Public Works Department (PWD)"
            );
        }
    }
}
