pub mod dashboard_repo;
pub mod hotel_repo;
pub mod property_repo;
pub mod rbac_repo;
pub mod user_repo;

pub use dashboard_repo::DashboardRepository;
pub use hotel_repo::HotelRepository;
pub use property_repo::PropertyRepository;
pub use rbac_repo::RbacRepository;
pub use user_repo::UserRepository;
