/*
 * Responsibility
 * - identity service に登録する scope 定義の型
 * - wire 形式は {"scope": ..., "description": ...}
 */
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeDefinition {
    #[serde(rename = "scope")]
    pub name: String,
    pub description: String,
}

impl ScopeDefinition {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}
