//! HTTP route handlers

pub mod availability;
pub mod error;
pub mod schedule;
pub mod status;
