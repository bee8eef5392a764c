//! Summary action: caller identity in, spend summary or flat error out

use crate::services::{Aggregator, RecordStore};
use crate::types::{DailyCategoryMatrix, SpendSummary, SummaryError};

/// Per-request read side over a record store.
///
/// The caller identity is always passed in explicitly; the service keeps no
/// per-request state.
pub struct SummaryService<S> {
    store: S,
}

impl<S: RecordStore> SummaryService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Total spend and days with spend for the signed-in caller
    pub fn get_user_record(
        &self,
        caller: Option<&str>,
    ) -> std::result::Result<SpendSummary, SummaryError> {
        let user_id = authenticated(caller)?;
        let records = self.store.fetch_records(user_id).map_err(|e| {
            tracing::error!(user_id, error = %e, "Error fetching user record");
            SummaryError::Persistence
        })?;
        Ok(Aggregator::summary(&records))
    }

    /// Day x category chart matrix for the signed-in caller
    pub fn get_daily_breakdown(
        &self,
        caller: Option<&str>,
    ) -> std::result::Result<DailyCategoryMatrix, SummaryError> {
        let user_id = authenticated(caller)?;
        let records = self.store.fetch_records(user_id).map_err(|e| {
            tracing::error!(user_id, error = %e, "Error fetching daily breakdown");
            SummaryError::Persistence
        })?;
        Ok(Aggregator::daily_by_category(&records))
    }
}

fn authenticated(caller: Option<&str>) -> std::result::Result<&str, SummaryError> {
    caller
        .filter(|id| !id.trim().is_empty())
        .ok_or(SummaryError::Unauthenticated)
}
