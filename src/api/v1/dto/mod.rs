pub mod documents;
pub mod identity;
