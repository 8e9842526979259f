/*
 * Responsibility
 * - middleware の公開インターフェース (re-export)
 * - auth: 認証 (access) と認可 (guards)
 * - http: request-id / trace / timeout などの横断的関心事
 */
pub mod auth;
pub mod http;
