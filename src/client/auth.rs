//! Authentication seam: session tokens come from the Linkhub service, outside this crate.

use std::future::Future;
use std::pin::Pin;

use crate::domain::{CorpNum, Scope, SecurityToken};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("token request failed: [{code}] {message}")]
/// Failure reported by a [`TokenProvider`]; surfaced unchanged as
/// [`crate::PopbillError::Auth`].
pub struct AuthError {
    pub code: i64,
    pub message: String,
}

impl AuthError {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Source of bearer tokens for Popbill calls.
///
/// Called once per request with the scopes registered by the calling service.
/// Implementations that cache tokens must synchronize internally; the client
/// shares one provider across all clones and tasks.
pub trait TokenProvider: Send + Sync {
    fn token<'a>(
        &'a self,
        scopes: &'a [Scope],
        corp_num: &'a CorpNum,
    ) -> BoxFuture<'a, Result<SecurityToken, AuthError>>;
}

#[derive(Debug, Clone)]
/// Provider that hands out one pre-issued token regardless of scope or member.
pub struct StaticTokenProvider {
    token: SecurityToken,
}

impl StaticTokenProvider {
    pub fn new(token: SecurityToken) -> Self {
        Self { token }
    }
}

impl TokenProvider for StaticTokenProvider {
    fn token<'a>(
        &'a self,
        _scopes: &'a [Scope],
        _corp_num: &'a CorpNum,
    ) -> BoxFuture<'a, Result<SecurityToken, AuthError>> {
        Box::pin(async move { Ok(self.token.clone()) })
    }
}
