pub mod auth;
pub mod dashboard;
pub mod hotel;
pub mod properties;
pub mod rbac;
pub mod users;
