//! Per-user expense record persistence
//!
//! Records live in `<data_dir>/records/<user-id>.json`, one file per user.

use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::services::storage::{read_json, update_json};
use crate::types::{ExpenseRecord, NewRecord, RawRecord, Result, SpendtrackError};

/// Source of a user's expense records
pub trait RecordStore: Send + Sync {
    /// All records owned by `user_id`, ordered by creation time ascending
    fn fetch_records(&self, user_id: &str) -> Result<Vec<ExpenseRecord>>;
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecordFile {
    pub user_id: String,
    pub updated_at: i64,
    pub records: Vec<RawRecord>,
}

/// JSON-file backed record store
pub struct JsonRecordStore {
    records_dir: PathBuf,
}

impl JsonRecordStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            records_dir: data_dir.join("records"),
        }
    }

    pub fn records_path(&self, user_id: &str) -> Result<PathBuf> {
        validate_user_id(user_id)?;
        Ok(self.records_dir.join(format!("{}.json", user_id)))
    }

    /// Append a record for `user_id` and return its validated form
    pub fn add_record(&self, user_id: &str, new: NewRecord) -> Result<ExpenseRecord> {
        if !new.amount.is_finite() {
            return Err(SpendtrackError::Parse(format!(
                "amount must be a finite number, got {}",
                new.amount
            )));
        }

        let path = self.records_path(user_id)?;
        let record = RawRecord {
            id: Uuid::new_v4().to_string(),
            amount: serde_json::Value::from(new.amount),
            date: new.date,
            created_at: Utc::now(),
            category: new.category,
            text: new.text,
        };

        // Lock held from load to rename so concurrent adds are not lost
        update_json(&path, |file: Option<RecordFile>| {
            let mut records = owned_records(user_id, &path, file)?;
            records.push(record.clone());
            Ok((RecordFile::new(user_id, records), ()))
        })?;

        tracing::debug!(user_id, record_id = %record.id, "record added");
        Ok(ExpenseRecord::from(record))
    }

    /// Remove a record by id. Returns whether anything was removed.
    pub fn delete_record(&self, user_id: &str, record_id: &str) -> Result<bool> {
        let path = self.records_path(user_id)?;
        update_json(&path, |file: Option<RecordFile>| {
            let mut records = owned_records(user_id, &path, file)?;
            let before = records.len();
            records.retain(|r| r.id != record_id);
            let removed = records.len() != before;
            Ok((RecordFile::new(user_id, records), removed))
        })
    }
}

impl RecordFile {
    fn new(user_id: &str, records: Vec<RawRecord>) -> Self {
        Self {
            user_id: user_id.to_string(),
            updated_at: Utc::now().timestamp(),
            records,
        }
    }
}

/// Records of a loaded file, refusing a file that names another user
fn owned_records(user_id: &str, path: &Path, file: Option<RecordFile>) -> Result<Vec<RawRecord>> {
    match file {
        Some(f) if f.user_id != user_id => Err(SpendtrackError::Store(format!(
            "record file {} belongs to {}",
            path.display(),
            f.user_id
        ))),
        Some(f) => Ok(f.records),
        None => Ok(Vec::new()),
    }
}

impl RecordStore for JsonRecordStore {
    fn fetch_records(&self, user_id: &str) -> Result<Vec<ExpenseRecord>> {
        let path = self.records_path(user_id)?;
        let file: Option<RecordFile> = read_json(&path)?;
        let mut records: Vec<ExpenseRecord> = owned_records(user_id, &path, file)?
            .into_iter()
            .map(ExpenseRecord::from)
            .collect();

        // Stable: equal creation times keep file order
        records.sort_by_key(|r| r.created_at);

        tracing::debug!(user_id, count = records.len(), "records fetched");
        Ok(records)
    }
}

/// User ids become file stems, so only `[A-Za-z0-9_-]` is allowed
fn validate_user_id(user_id: &str) -> Result<()> {
    let valid = !user_id.is_empty()
        && user_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(SpendtrackError::Store(format!("invalid user id {:?}", user_id)))
    }
}
