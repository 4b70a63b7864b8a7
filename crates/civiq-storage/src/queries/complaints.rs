// SPDX-FileCopyrightText: 2026 Civiq Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Complaint CRUD operations.
//!
//! All list queries return summaries (no image payload), newest first with
//! the serial number as tiebreaker so same-millisecond inserts still order
//! deterministically.

use std::str::FromStr;

use rusqlite::params;

use civiq_core::CiviqError;

use crate::database::{map_tr_err, Database};
use crate::models::{Complaint, ComplaintStatus, ComplaintSummary, NewComplaint, PendingAlert};

/// Columns of a summary row, in mapper order.
const SUMMARY_COLUMNS: &str = "serial_no, submitter_email, issue_type, confidence, department, \
                               priority, justification, status, created_at, location, pincode, zone";

fn status_from_column(idx: usize, raw: String) -> Result<ComplaintStatus, rusqlite::Error> {
    ComplaintStatus::from_str(&raw).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

fn summary_from_row(row: &rusqlite::Row<'_>) -> Result<ComplaintSummary, rusqlite::Error> {
    Ok(ComplaintSummary {
        serial_no: row.get(0)?,
        submitter_email: row.get(1)?,
        issue_type: row.get(2)?,
        confidence: row.get(3)?,
        department: row.get(4)?,
        priority: row.get(5)?,
        justification: row.get(6)?,
        status: status_from_column(7, row.get(7)?)?,
        created_at: row.get(8)?,
        location: row.get(9)?,
        pincode: row.get(10)?,
        zone: row.get(11)?,
    })
}

/// Insert a new complaint. Returns the store-assigned serial number.
///
/// `status` is forced to `pending` and `created_at` to the insert time.
/// Required fields are re-checked here as a last line of defense; the
/// pipeline has already validated them at the boundary.
pub async fn insert(db: &Database, complaint: &NewComplaint) -> Result<i64, CiviqError> {
    for (field, value) in [
        ("submitter_email", &complaint.submitter_email),
        ("image_payload", &complaint.image_payload),
        ("location", &complaint.location),
        ("pincode", &complaint.pincode),
        ("zone", &complaint.zone),
    ] {
        if value.trim().is_empty() {
            return Err(CiviqError::Storage {
                source: format!("refusing to insert complaint with empty {field}").into(),
            });
        }
    }

    let complaint = complaint.clone();
    db.connection()
        .call(move |conn| -> Result<i64, tokio_rusqlite::Error> {
            conn.execute(
                "INSERT INTO complaints
                 (submitter_email, image_payload, issue_type, confidence, department,
                  priority, justification, status, location, pincode, zone)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 'pending', ?8, ?9, ?10)",
                params![
                    complaint.submitter_email,
                    complaint.image_payload,
                    complaint.issue_type,
                    complaint.confidence,
                    complaint.department,
                    complaint.priority,
                    complaint.justification,
                    complaint.location,
                    complaint.pincode,
                    complaint.zone,
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(map_tr_err)
}

/// Get a complaint by serial number, including its image payload.
pub async fn get_by_id(db: &Database, serial_no: i64) -> Result<Option<Complaint>, CiviqError> {
    db.connection()
        .call(move |conn| -> Result<Option<Complaint>, tokio_rusqlite::Error> {
            let mut stmt = conn.prepare(
                "SELECT serial_no, submitter_email, image_payload, issue_type, confidence,
                        department, priority, justification, status, created_at,
                        location, pincode, zone
                 FROM complaints WHERE serial_no = ?1",
            )?;
            let result = stmt.query_row(params![serial_no], |row| {
                Ok(Complaint {
                    serial_no: row.get(0)?,
                    submitter_email: row.get(1)?,
                    image_payload: row.get(2)?,
                    issue_type: row.get(3)?,
                    confidence: row.get(4)?,
                    department: row.get(5)?,
                    priority: row.get(6)?,
                    justification: row.get(7)?,
                    status: status_from_column(8, row.get(8)?)?,
                    created_at: row.get(9)?,
                    location: row.get(10)?,
                    pincode: row.get(11)?,
                    zone: row.get(12)?,
                })
            });
            match result {
                Ok(complaint) => Ok(Some(complaint)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(map_tr_err)
}

/// A submitter's complaints, newest first.
pub async fn get_by_email(
    db: &Database,
    email: &str,
) -> Result<Vec<ComplaintSummary>, CiviqError> {
    let email = email.to_string();
    db.connection()
        .call(move |conn| -> Result<Vec<ComplaintSummary>, tokio_rusqlite::Error> {
            let mut stmt = conn.prepare(&format!(
                "SELECT {SUMMARY_COLUMNS} FROM complaints
                 WHERE submitter_email = ?1
                 ORDER BY created_at DESC, serial_no DESC"
            ))?;
            let rows = stmt.query_map(params![email], summary_from_row)?;
            let mut complaints = Vec::new();
            for row in rows {
                complaints.push(row?);
            }
            Ok(complaints)
        })
        .await
        .map_err(map_tr_err)
}

/// Complaints for a department, matched case- and trim-insensitively.
pub async fn get_by_department(
    db: &Database,
    department: &str,
) -> Result<Vec<ComplaintSummary>, CiviqError> {
    let department = department.to_string();
    db.connection()
        .call(move |conn| -> Result<Vec<ComplaintSummary>, tokio_rusqlite::Error> {
            let mut stmt = conn.prepare(&format!(
                "SELECT {SUMMARY_COLUMNS} FROM complaints
                 WHERE LOWER(TRIM(department)) = LOWER(TRIM(?1))
                 ORDER BY created_at DESC, serial_no DESC"
            ))?;
            let rows = stmt.query_map(params![department], summary_from_row)?;
            let mut complaints = Vec::new();
            for row in rows {
                complaints.push(row?);
            }
            Ok(complaints)
        })
        .await
        .map_err(map_tr_err)
}

/// All complaints, newest first.
pub async fn get_all(db: &Database) -> Result<Vec<ComplaintSummary>, CiviqError> {
    db.connection()
        .call(move |conn| -> Result<Vec<ComplaintSummary>, tokio_rusqlite::Error> {
            let mut stmt = conn.prepare(&format!(
                "SELECT {SUMMARY_COLUMNS} FROM complaints
                 ORDER BY created_at DESC, serial_no DESC"
            ))?;
            let rows = stmt.query_map([], summary_from_row)?;
            let mut complaints = Vec::new();
            for row in rows {
                complaints.push(row?);
            }
            Ok(complaints)
        })
        .await
        .map_err(map_tr_err)
}

/// Update a complaint's status in place, leaving all other fields untouched.
///
/// Fails with `NotFound` if the serial number does not exist.
pub async fn update_status(
    db: &Database,
    serial_no: i64,
    status: ComplaintStatus,
) -> Result<(), CiviqError> {
    let rows = db
        .connection()
        .call(move |conn| -> Result<usize, tokio_rusqlite::Error> {
            let n = conn.execute(
                "UPDATE complaints SET status = ?1 WHERE serial_no = ?2",
                params![status.to_string(), serial_no],
            )?;
            Ok(n)
        })
        .await
        .map_err(map_tr_err)?;

    if rows == 0 {
        return Err(CiviqError::NotFound {
            what: format!("complaint {serial_no}"),
        });
    }
    Ok(())
}

/// Count pending complaints and flag whether the count strictly exceeds the
/// threshold. The pending summaries are returned regardless of the flag.
pub async fn pending_alert(db: &Database, threshold: i64) -> Result<PendingAlert, CiviqError> {
    db.connection()
        .call(move |conn| -> Result<PendingAlert, tokio_rusqlite::Error> {
            let mut stmt = conn.prepare(&format!(
                "SELECT {SUMMARY_COLUMNS} FROM complaints
                 WHERE status = 'pending'
                 ORDER BY created_at DESC, serial_no DESC"
            ))?;
            let rows = stmt.query_map([], summary_from_row)?;
            let mut complaints = Vec::new();
            for row in rows {
                complaints.push(row?);
            }
            let pending_count = complaints.len() as i64;
            Ok(PendingAlert {
                should_alert: pending_count > threshold,
                pending_count,
                complaints,
            })
        })
        .await
        .map_err(map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn setup_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        (db, dir)
    }

    fn make_complaint(email: &str) -> NewComplaint {
        NewComplaint {
            submitter_email: email.to_string(),
            image_payload: "aGVsbG8=".to_string(),
            issue_type: "potholes".to_string(),
            confidence: 0.9,
            department: "Public Works Department (PWD)".to_string(),
            priority: 8,
            justification: "urgent road hazard".to_string(),
            location: "Main St".to_string(),
            pincode: "500001".to_string(),
            zone: "North".to_string(),
        }
    }

    #[tokio::test]
    async fn insert_assigns_increasing_serials_and_pending_status() {
        let (db, _dir) = setup_db().await;

        let first = insert(&db, &make_complaint("a@b.com")).await.unwrap();
        let second = insert(&db, &make_complaint("a@b.com")).await.unwrap();
        assert!(second > first);

        let complaint = get_by_id(&db, first).await.unwrap().unwrap();
        assert_eq!(complaint.status, ComplaintStatus::Pending);
        assert!(!complaint.created_at.is_empty());

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn insert_rejects_empty_required_fields() {
        let (db, _dir) = setup_db().await;

        let mut missing_email = make_complaint("a@b.com");
        missing_email.submitter_email = "  ".to_string();
        let err = insert(&db, &missing_email).await.unwrap_err();
        assert!(matches!(err, CiviqError::Storage { .. }));
        assert!(err.to_string().contains("submitter_email"), "got: {err}");

        let mut missing_zone = make_complaint("a@b.com");
        missing_zone.zone = String::new();
        assert!(insert(&db, &missing_zone).await.is_err());

        // Nothing was persisted.
        assert!(get_all(&db).await.unwrap().is_empty());
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn get_by_id_includes_payload_and_misses_return_none() {
        let (db, _dir) = setup_db().await;

        let serial = insert(&db, &make_complaint("a@b.com")).await.unwrap();
        let complaint = get_by_id(&db, serial).await.unwrap().unwrap();
        assert_eq!(complaint.image_payload, "aGVsbG8=");
        assert_eq!(complaint.submitter_email, "a@b.com");

        assert!(get_by_id(&db, serial + 100).await.unwrap().is_none());
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn get_by_email_returns_newest_first() {
        let (db, _dir) = setup_db().await;

        let first = insert(&db, &make_complaint("a@b.com")).await.unwrap();
        let second = insert(&db, &make_complaint("a@b.com")).await.unwrap();
        insert(&db, &make_complaint("other@b.com")).await.unwrap();

        let complaints = get_by_email(&db, "a@b.com").await.unwrap();
        assert_eq!(complaints.len(), 2);
        assert_eq!(complaints[0].serial_no, second);
        assert_eq!(complaints[1].serial_no, first);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn get_by_department_matches_case_and_trim_insensitively() {
        let (db, _dir) = setup_db().await;

        insert(&db, &make_complaint("a@b.com")).await.unwrap();

        let complaints = get_by_department(&db, "  public works department (pwd) ")
            .await
            .unwrap();
        assert_eq!(complaints.len(), 1);

        let none = get_by_department(&db, "State Electricity Board")
            .await
            .unwrap();
        assert!(none.is_empty());

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn update_status_is_idempotent_and_checks_existence() {
        let (db, _dir) = setup_db().await;

        let serial = insert(&db, &make_complaint("a@b.com")).await.unwrap();

        update_status(&db, serial, ComplaintStatus::Resolved)
            .await
            .unwrap();
        update_status(&db, serial, ComplaintStatus::Resolved)
            .await
            .unwrap();

        let complaint = get_by_id(&db, serial).await.unwrap().unwrap();
        assert_eq!(complaint.status, ComplaintStatus::Resolved);

        let err = update_status(&db, serial + 5, ComplaintStatus::Rejected)
            .await
            .unwrap_err();
        assert!(matches!(err, CiviqError::NotFound { .. }));

        // The miss mutated nothing.
        let all = get_all(&db).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].status, ComplaintStatus::Resolved);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn pending_alert_flags_only_above_threshold() {
        let (db, _dir) = setup_db().await;

        for _ in 0..6 {
            insert(&db, &make_complaint("a@b.com")).await.unwrap();
        }
        for _ in 0..2 {
            let serial = insert(&db, &make_complaint("b@b.com")).await.unwrap();
            update_status(&db, serial, ComplaintStatus::Resolved)
                .await
                .unwrap();
        }

        let alert = pending_alert(&db, 5).await.unwrap();
        assert!(alert.should_alert);
        assert_eq!(alert.pending_count, 6);
        assert_eq!(alert.complaints.len(), 6);

        let no_alert = pending_alert(&db, 6).await.unwrap();
        assert!(!no_alert.should_alert);
        assert_eq!(no_alert.pending_count, 6);
        // Pending summaries come back regardless of the flag.
        assert_eq!(no_alert.complaints.len(), 6);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn concurrent_inserts_yield_distinct_contiguous_serials() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("concurrent.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();

        let mut handles = Vec::new();
        for i in 0..10 {
            let db = db.clone();
            handles.push(tokio::spawn(async move {
                insert(&db, &make_complaint(&format!("user{i}@b.com"))).await
            }));
        }

        let mut serials = Vec::new();
        for handle in handles {
            serials.push(handle.await.unwrap().unwrap());
        }

        serials.sort_unstable();
        serials.dedup();
        assert_eq!(serials.len(), 10, "serials must be distinct");
        // AUTOINCREMENT with no deletions leaves no gaps.
        assert_eq!(serials, (serials[0]..serials[0] + 10).collect::<Vec<_>>());

        db.close().await.unwrap();
    }
}
