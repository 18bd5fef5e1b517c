pub mod api;
pub mod config;
pub mod context;
pub mod entities;
pub mod envelope;
pub mod error;
pub mod events;
pub mod metrics;
pub mod migrator;
pub mod ops;
pub mod storage;
pub mod telemetry;
pub mod vendor;

#[cfg(test)]
pub(crate) mod testutil;

pub use sea_orm;
