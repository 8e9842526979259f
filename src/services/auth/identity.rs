/*
 * Responsibility
 * - 認証結果の型 (Identity / Authentication)
 * - middleware が request extensions に入れ、guard と extractor はこの型だけを読む
 *
 * Notes
 * - extension の型そのものがキーになるので、文字列キーは持たない
 */
use axum::http::Extensions;
use uuid::Uuid;

/// An authenticated caller, resolved from a verified access token.
///
/// Built once per request and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    subject: Uuid,
    scopes: Vec<String>,
}

impl Identity {
    pub fn new(subject: Uuid, scopes: Vec<String>) -> Self {
        Self { subject, scopes }
    }

    pub fn subject(&self) -> Uuid {
        self.subject
    }

    pub fn scopes(&self) -> &[String] {
        &self.scopes
    }

    pub fn has_scope(&self, scope: &str) -> bool {
        self.scopes.iter().any(|s| s == scope)
    }
}

/// Outcome of the authentication attempt for a single request.
///
/// `Absent` and `Invalid` are kept apart for logging only; guards reject both.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Authentication {
    /// No `Authorization` header was sent.
    #[default]
    Absent,
    /// A header was sent but extraction, verification or claim resolution failed.
    Invalid,
    Authenticated(Identity),
}

impl Authentication {
    /// Reads the outcome attached by the access middleware.
    ///
    /// A request that never went through the middleware is treated as `Absent`.
    pub fn of(extensions: &Extensions) -> &Authentication {
        static ABSENT: Authentication = Authentication::Absent;
        extensions.get::<Authentication>().unwrap_or(&ABSENT)
    }

    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Authentication::Authenticated(identity) => Some(identity),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Authentication::Authenticated(_))
    }
}
