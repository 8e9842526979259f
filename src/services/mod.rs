pub mod auth;
pub mod scopes;
