//! Shared utilities and error types for the stake-lock contract suite.
//!
//! This crate provides:
//! - [`CommonError`]: standardised error codes for shared helpers.
//! - [`authorization`]: digest reconstruction and signer recovery for
//!   off-chain-issued authorization intents.
//! - [`replay`]: the consumed-authorization registry.
//! - [`rewards_interface`]: the capability a reward minter consumes.
//!
//! Contract-specific errors live in each contract crate and convert from
//! [`CommonError`].

#![no_std]

use soroban_sdk::contracterror;

// ── Modules ──────────────────────────────────────────────────────────────────

pub mod authorization;
pub mod replay;
pub mod rewards_interface;

pub use authorization::{AuthorizationIntent, SCOPE_DEPOSIT, SCOPE_WITHDRAW};
pub use rewards_interface::{RewardLedgerClient, RewardLedgerInterface};

// ── Shared error enum ────────────────────────────────────────────────────────

/// Standardised error codes shared by the suite's helpers.
///
/// # Code ranges
/// | Range   | Purpose                       |
/// |---------|-------------------------------|
/// | 10 – 19 | Authentication & authorisation|
#[contracterror]
#[derive(Clone, Debug, Eq, PartialEq, Copy)]
#[repr(u32)]
pub enum CommonError {
    // ── Auth (10–19) ─────────────────────────────────────────
    /// The claimed signer is not the designated signer.
    SignerMismatch = 11,

    /// The signature does not recover to the claimed signer for the
    /// reconstructed digest.
    InvalidSignature = 12,

    /// The authorization digest has already been consumed.
    AuthorizationReplayed = 13,
}
