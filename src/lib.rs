//! Type-safe member search over SQLite.
//!
//! Optional filters are turned into boxed Diesel conditions
//! ([`repository::predicate`]), ANDed together, applied to a
//! `members LEFT JOIN teams` query and projected straight into flat
//! [`domain::member::MemberTeam`] rows. Paged searches go through
//! [`pagination::fetch_page`], which can skip the count query when the first
//! page already holds every match.

pub mod db;
pub mod domain;
pub mod error_conversions;
pub mod forms;
pub mod models;
pub mod pagination;
pub mod repository;
pub mod schema;
pub mod services;
