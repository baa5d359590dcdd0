//! Domain aggregates exposed by the member search layer.

pub mod member;
pub mod team;
pub mod types;
