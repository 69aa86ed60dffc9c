//! Domain layer containing the persisted account records.

pub mod entities;

pub use entities::*;
