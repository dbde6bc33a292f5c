//! Asset references used by treasury grants.

use crate::account::AccountId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which asset a grant pays out in.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Asset {
    /// The host ledger's native currency, held directly by the treasury.
    Native,
    /// A token contract the treasury holds a balance in.
    Token(AccountId),
}

impl Asset {
    pub fn is_native(&self) -> bool {
        matches!(self, Self::Native)
    }

    /// The token contract, if this is not the native asset.
    pub fn token(&self) -> Option<&AccountId> {
        match self {
            Self::Native => None,
            Self::Token(id) => Some(id),
        }
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native => write!(f, "native"),
            Self::Token(id) => write!(f, "token {}", id),
        }
    }
}
