/*!
 * Authentication context extractor
 *
 * Responsibility:
 * - 認証済みリクエストの Identity を handler に提供する
 * - 型 (Identity / Authentication) は services::auth 側に置く
 *
 * Public API:
 * - CurrentIdentity
 */

mod core;

pub use core::CurrentIdentity;
