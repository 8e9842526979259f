/*
 * Responsibility
 * - この API が使う scope の一覧 (起動時に identity service へ登録する)
 * - routes の guard もここの定数を参照する
 */
use crate::services::scopes::ScopeDefinition;

pub const DOCUMENTS_READ: &str = "documents:read";
pub const DOCUMENTS_WRITE: &str = "documents:write";
pub const DOCUMENTS_ADMIN: &str = "documents:admin";

pub fn definitions() -> Vec<ScopeDefinition> {
    vec![
        ScopeDefinition::new(DOCUMENTS_READ, "Read documents"),
        ScopeDefinition::new(DOCUMENTS_WRITE, "Create and edit documents"),
        ScopeDefinition::new(DOCUMENTS_ADMIN, "Delete documents"),
    ]
}
