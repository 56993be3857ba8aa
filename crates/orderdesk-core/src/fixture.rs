//! Startup data: the nine-record sample and JSON seed files.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use tracing::debug;

use crate::error::StoreError;
use crate::model::record::{Record, RecordDraft, Status};
use crate::query::AppendRequest;
use crate::store::RecordStore;

/// The sample orders, in store order, with timestamps relative to `now`.
#[must_use]
pub fn sample_records(now: DateTime<Utc>) -> Vec<Record> {
    let fixed = Utc
        .with_ymd_and_hms(2023, 2, 2, 0, 0, 0)
        .single()
        .unwrap_or_default();
    let rows = [
        ("#CMP801", "Natai Craig", "Landing Page", "Meadow Lane Oakland", now, Status::InProgress),
        ("#CMP802", "Kate Morrison", "CRM Admin pages", "Larry San Francisco", now - TimeDelta::minutes(1), Status::Complete),
        ("#CMP803", "Drew Cano", "Client Project", "Bagwell Avenue Ocala", now - TimeDelta::hours(1), Status::Pending),
        ("#CMP804", "Orlando Diggs", "Admin Dashboard", "Washburn Baton Rouge", now - TimeDelta::days(1), Status::Approved),
        ("#CMP805", "Andi Lane", "App Landing Page", "Nest Lane Olivette", fixed, Status::Rejected),
        ("#CMP806", "Natai Craig", "Landing Page", "Meadow Lane Oakland", now, Status::InProgress),
        ("#CMP807", "Drew Cano", "Client Project", "Bagwell Avenue Ocala", now - TimeDelta::hours(2), Status::Pending),
        ("#CMP808", "Kate Morrison", "CRM Admin pages", "Larry San Francisco", now - TimeDelta::days(2), Status::Approved),
        ("#CMP809", "Andi Lane", "App Landing Page", "Nest Lane Olivette", now - TimeDelta::days(7), Status::Rejected),
    ];
    rows.into_iter()
        .map(|(id, user, project, address, timestamp, status)| Record {
            id: id.to_string(),
            user: user.to_string(),
            project: project.to_string(),
            address: address.to_string(),
            timestamp,
            status,
        })
        .collect()
}

/// A store holding the sample orders.
///
/// # Errors
///
/// Never in practice; the sample ids are distinct.
pub fn sample_store(now: DateTime<Utc>) -> Result<RecordStore, StoreError> {
    RecordStore::from_records(sample_records(now))
}

/// Read a JSON array of append requests.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid JSON, or an
/// entry has an unparsable date or status.
pub fn load_seed_file(path: &Path) -> Result<Vec<RecordDraft>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let requests: Vec<AppendRequest> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    requests
        .into_iter()
        .enumerate()
        .map(|(index, req)| {
            RecordDraft::try_from(req)
                .with_context(|| format!("Invalid entry {index} in {}", path.display()))
        })
        .collect()
}

/// Build the startup store: optionally the sample, then each seed draft
/// appended in file order.
///
/// # Errors
///
/// Returns an error if the seed file cannot be loaded or a seed entry is
/// rejected by the store.
pub fn build_store(
    with_sample: bool,
    seed_path: Option<&Path>,
    now: DateTime<Utc>,
) -> Result<RecordStore> {
    let mut store = if with_sample {
        sample_store(now)?
    } else {
        RecordStore::new()
    };

    if let Some(path) = seed_path {
        let drafts = load_seed_file(path)?;
        debug!(count = drafts.len(), path = %path.display(), "loading seed drafts");
        for draft in drafts {
            store
                .append(draft)
                .with_context(|| format!("Seed entry rejected from {}", path.display()))?;
        }
    }

    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn sample_has_nine_unique_records() {
        let store = sample_store(now()).unwrap();
        assert_eq!(store.len(), 9);
        assert_eq!(store.records()[0].id, "#CMP801");
        assert_eq!(store.records()[8].id, "#CMP809");
    }

    #[test]
    fn sample_timestamps_follow_now() {
        let records = sample_records(now());
        assert_eq!(records[0].timestamp, now());
        assert_eq!(records[3].timestamp, now() - TimeDelta::days(1));
        assert_eq!(records[4].rendered_date(), "2023-02-02");
    }

    #[test]
    fn build_store_appends_seed_after_sample() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("orders.json");
        fs::write(
            &path,
            r#"[{"user":"Lana Steiner","project":"Dashboard","address":"Oak St","date":"2024-06-01","status":"Pending"}]"#,
        )
        .unwrap();

        let store = build_store(true, Some(&path), now()).unwrap();
        assert_eq!(store.len(), 10);
        assert_eq!(store.records()[0].id, "#CMP810");
        assert_eq!(store.records()[0].user, "Lana Steiner");
    }

    #[test]
    fn build_store_reports_bad_seed_entry() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("orders.json");
        fs::write(
            &path,
            r#"[{"user":"A","project":"B","address":"C","date":"soon","status":"Pending"}]"#,
        )
        .unwrap();

        let err = build_store(false, Some(&path), now()).unwrap_err();
        assert!(format!("{err:#}").contains("Invalid entry 0"));
    }

    #[test]
    fn build_store_rejects_seed_duplicate() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("orders.json");
        fs::write(
            &path,
            r##"[{"user":"A","project":"B","address":"C","date":"2024-01-01","status":"Pending","id":"#CMP801"}]"##,
        )
        .unwrap();

        let err = build_store(true, Some(&path), now()).unwrap_err();
        assert!(format!("{err:#}").contains("already exists"));
    }
}
