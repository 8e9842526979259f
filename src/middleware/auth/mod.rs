pub mod access;
pub mod guards;

pub use guards::{
    ScopePolicy, must_be_authenticated, must_have_all_scopes, must_have_any_scope,
};
