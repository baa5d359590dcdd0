//! Database models shared across the member repository.

pub mod config;
pub mod member;
pub mod team;
