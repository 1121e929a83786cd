//! Data models for order-form records and configuration.

pub mod config;
pub mod record;
