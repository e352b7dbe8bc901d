//! # Off-chain authorization intents
//!
//! An off-chain authority approves each ledger operation by signing a digest
//! of the intent tuple `(source, destination, amount, scope, param, timestamp)`
//! with a secp256k1 key. The ledger rebuilds the digest, recovers the signing
//! identity and compares it with the designated signer.
//!
//! Digest layout (six 32-byte words, keccak256 over the concatenation):
//!
//! | Word | Content                                      |
//! |------|----------------------------------------------|
//! | 0    | keccak256(XDR(source))                       |
//! | 1    | keccak256(XDR(destination))                  |
//! | 2    | amount, big-endian, left-padded              |
//! | 3    | keccak256(XDR(scope))                        |
//! | 4    | param                                        |
//! | 5    | timestamp, big-endian, left-padded           |
//!
//! The authority signs the personal-message form of the digest
//! (`"\x19Ethereum Signed Message:\n32" || digest`), so signer identities are
//! 20-byte EVM-style addresses.

use soroban_sdk::{
    contracttype, crypto::Hash, xdr::ToXdr, Address, Bytes, BytesN, Env, String,
};

use crate::CommonError;

const SIGNED_MESSAGE_PREFIX: &[u8] = b"\x19Ethereum Signed Message:\n32";

/// secp256k1 group order `n`, big-endian.
const CURVE_ORDER: [u8; 32] = [
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xfe,
    0xba, 0xae, 0xdc, 0xe6, 0xaf, 0x48, 0xa0, 0x3b, 0xbf, 0xd2, 0x5e, 0x8c, 0xd0, 0x36, 0x41, 0x41,
];

/// `n / 2`, the largest `s` the host accepts.
const HALF_CURVE_ORDER: [u8; 32] = [
    0x7f, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0x5d, 0x57, 0x6e, 0x73, 0x57, 0xa4, 0x50, 0x1d, 0xdf, 0xe9, 0x2f, 0x46, 0x68, 0x1b, 0x20, 0xa0,
];

/// Scope bound into every deposit authorization.
pub const SCOPE_DEPOSIT: &str = "stake_lock:deposit";
/// Scope bound into every withdrawal authorization.
pub const SCOPE_WITHDRAW: &str = "stake_lock:withdraw";

/// The semantic record an authority signs. Never persisted.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuthorizationIntent {
    pub source: Address,
    pub destination: Address,
    pub amount: i128,
    pub scope: String,
    pub param: BytesN<32>,
    pub timestamp: u64,
}

fn word_of(env: &Env, xdr: Bytes) -> [u8; 32] {
    env.crypto().keccak256(&xdr).to_array()
}

fn be_word(value: &[u8]) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[32 - value.len()..].copy_from_slice(value);
    word
}

/// Canonical digest of an intent.
pub fn message_hash(env: &Env, intent: &AuthorizationIntent) -> BytesN<32> {
    let mut msg = Bytes::new(env);
    msg.extend_from_array(&word_of(env, intent.source.clone().to_xdr(env)));
    msg.extend_from_array(&word_of(env, intent.destination.clone().to_xdr(env)));
    msg.extend_from_array(&be_word(&intent.amount.to_be_bytes()));
    msg.extend_from_array(&word_of(env, intent.scope.clone().to_xdr(env)));
    msg.extend_from_array(&intent.param.to_array());
    msg.extend_from_array(&be_word(&intent.timestamp.to_be_bytes()));
    env.crypto().keccak256(&msg).into()
}

/// The hash the authority actually signs.
pub fn signed_message_hash(env: &Env, digest: &BytesN<32>) -> Hash<32> {
    let mut msg = Bytes::from_slice(env, SIGNED_MESSAGE_PREFIX);
    msg.extend_from_array(&digest.to_array());
    env.crypto().keccak256(&msg)
}

/// Maps an uncompressed SEC1 public key (`0x04 || x || y`) to its 20-byte
/// signer identity.
pub fn identity_from_public_key(env: &Env, public_key: &BytesN<65>) -> BytesN<20> {
    let body = Bytes::from(public_key.clone()).slice(1..);
    let hash = env.crypto().keccak256(&body).to_array();
    let mut identity = [0u8; 20];
    identity.copy_from_slice(&hash[12..]);
    BytesN::from_array(env, &identity)
}

/// Scalars the host would refuse: `r` outside `[1, n)` or `s` outside
/// `[1, n/2]`. Big-endian arrays compare in numeric order.
fn scalars_out_of_range(r: &[u8; 32], s: &[u8; 32]) -> bool {
    let zero = [0u8; 32];
    *r == zero || *s == zero || *r >= CURVE_ORDER || *s > HALF_CURVE_ORDER
}

/// Recovers the identity that produced `signature` (r || s || v) over the
/// signed form of `digest`.
///
/// Returns `None` for an unknown recovery byte, a zero or out-of-range `r`,
/// and a zero or high `s`. An in-range `r` with no matching curve point still
/// traps in the host.
pub fn recover_signer(
    env: &Env,
    digest: &BytesN<32>,
    signature: &BytesN<65>,
) -> Option<BytesN<20>> {
    let raw = signature.to_array();
    let recovery_id = match raw[64] {
        v @ (0 | 1) => v as u32,
        v @ (27 | 28) => (v - 27) as u32,
        _ => return None,
    };
    let mut r = [0u8; 32];
    let mut s = [0u8; 32];
    r.copy_from_slice(&raw[..32]);
    s.copy_from_slice(&raw[32..64]);
    if scalars_out_of_range(&r, &s) {
        return None;
    }
    let mut rs = [0u8; 64];
    rs.copy_from_slice(&raw[..64]);

    let public_key = env.crypto().secp256k1_recover(
        &signed_message_hash(env, digest),
        &BytesN::from_array(env, &rs),
        recovery_id,
    );
    Some(identity_from_public_key(env, &public_key))
}

/// True iff `signature` over the digest of `intent` recovers to `signer`.
pub fn verify(
    env: &Env,
    intent: &AuthorizationIntent,
    signer: &BytesN<20>,
    signature: &BytesN<65>,
) -> bool {
    let digest = message_hash(env, intent);
    recover_signer(env, &digest, signature).as_ref() == Some(signer)
}

/// Checks an intent against the designated signer and returns its digest.
///
/// # Errors
/// - [`CommonError::SignerMismatch`]: `claimed` is not the designated signer.
/// - [`CommonError::InvalidSignature`]: the signature does not recover to `claimed`.
pub fn authorize(
    env: &Env,
    intent: &AuthorizationIntent,
    designated: &BytesN<20>,
    claimed: &BytesN<20>,
    signature: &BytesN<65>,
) -> Result<BytesN<32>, CommonError> {
    if claimed != designated {
        return Err(CommonError::SignerMismatch);
    }
    let digest = message_hash(env, intent);
    match recover_signer(env, &digest, signature) {
        Some(recovered) if recovered == *claimed => Ok(digest),
        _ => Err(CommonError::InvalidSignature),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
