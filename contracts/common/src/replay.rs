//! # Consumed-authorization registry
//!
//! Every authorization digest is accepted at most once. The registry stores
//! one persistent flag per consumed digest; a second attempt with the same
//! digest fails with [`CommonError::AuthorizationReplayed`].
//!
//! Authorities that need to approve two otherwise identical intents vary the
//! opaque `param` field, which is part of the digest.
//!
//! ```ignore
//! let digest = authorization::authorize(&env, &intent, &designated, &signer, &sig)?;
//! replay::consume(&env, &digest)?;
//! ```

use soroban_sdk::{contracttype, BytesN, Env};

use crate::CommonError;

// ── Storage key ──────────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
enum ReplayKey {
    Consumed(BytesN<32>),
}

// ── TTL constants (mirror common convention) ─────────────────────────────────

const TTL_THRESHOLD: u32 = 5_184_000;
const TTL_EXTEND_TO: u32 = 10_368_000;

// ── Public API ────────────────────────────────────────────────────────────────

/// Whether `digest` has already been consumed. Read-only.
pub fn is_consumed(env: &Env, digest: &BytesN<32>) -> bool {
    env.storage()
        .persistent()
        .has(&ReplayKey::Consumed(digest.clone()))
}

/// Marks `digest` as consumed.
///
/// # Errors
/// - [`CommonError::AuthorizationReplayed`]: the digest was consumed before.
pub fn consume(env: &Env, digest: &BytesN<32>) -> Result<(), CommonError> {
    let key = ReplayKey::Consumed(digest.clone());
    if env.storage().persistent().has(&key) {
        return Err(CommonError::AuthorizationReplayed);
    }
    env.storage().persistent().set(&key, &true);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
