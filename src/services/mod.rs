//! Services for spend aggregation and persistence

pub mod aggregator;
pub mod record_store;
pub mod storage;
pub mod summary;
pub mod user_store;

pub use aggregator::Aggregator;
pub use record_store::{JsonRecordStore, RecordStore};
pub use summary::SummaryService;
pub use user_store::JsonUserStore;
