pub mod auth;
pub mod hotel;
pub mod permissions;
pub mod rbac;
pub mod token;

pub use auth::AuthService;
pub use hotel::HotelService;
pub use rbac::RbacService;
pub use token::{TokenConfig, TokenService};
