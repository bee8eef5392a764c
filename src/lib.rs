//! spendtrack: per-user expense records, spend summaries and daily category charts

pub mod config;
pub mod services;
pub mod types;
