pub mod access_jwt;
pub mod bearer;
pub mod factory;
pub mod identity;

pub use access_jwt::{AccessJwtError, AuthService};
pub use factory::build_auth_service;
pub use identity::{Authentication, Identity};
