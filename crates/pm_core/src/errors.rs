//! Minimal error set for core-domain validation & parsing.

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("invalid party id: {0:?}")]
    InvalidId(String),
    #[error("unknown token for {kind}: {token:?}")]
    UnknownToken { kind: &'static str, token: String },
    #[error("domain out of range: {0}")]
    DomainOutOfRange(String),
}
