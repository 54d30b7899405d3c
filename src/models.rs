pub mod auth;
pub mod dashboard;
pub mod hotel;
pub mod property;
pub mod rbac;
