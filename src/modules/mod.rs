pub mod auth;
pub mod curators;
pub mod group_sessions;
pub mod reports;
pub mod reviews;
pub mod students;
pub mod teachers;
