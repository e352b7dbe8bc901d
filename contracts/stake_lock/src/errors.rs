use common::CommonError;
use soroban_sdk::contracttype;

/// Error categories used to classify failures for callers and monitoring.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ErrorCategory {
    /// Contract lifecycle: initialization and state-layout versioning.
    Lifecycle = 1,
    /// Signature, signer, replay or admin-role failures.
    Authorization = 2,
    /// Amount, balance, time-lock or enabled-switch violations.
    Policy = 3,
    /// Administrative misuse of configuration setters.
    Configuration = 4,
    /// Fixed-point arithmetic exceeded the representable range.
    Arithmetic = 5,
}

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    InvalidInput = 4,
    Disabled = 5,
    BelowMinimum = 6,
    InsufficientAvailable = 7,
    AuthorizationFailed = 8,
    AuthorizationReplayed = 9,
    InvalidConfig = 10,
    WrongRewardModel = 11,
    RewardPeriodActive = 12,
    ArithmeticOverflow = 13,
    MigrationRequired = 14,
    AlreadyMigrated = 15,
}

impl ContractError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ContractError::NotInitialized
            | ContractError::AlreadyInitialized
            | ContractError::MigrationRequired
            | ContractError::AlreadyMigrated => ErrorCategory::Lifecycle,
            ContractError::Unauthorized
            | ContractError::AuthorizationFailed
            | ContractError::AuthorizationReplayed => ErrorCategory::Authorization,
            ContractError::InvalidInput
            | ContractError::Disabled
            | ContractError::BelowMinimum
            | ContractError::InsufficientAvailable => ErrorCategory::Policy,
            ContractError::InvalidConfig
            | ContractError::WrongRewardModel
            | ContractError::RewardPeriodActive => ErrorCategory::Configuration,
            ContractError::ArithmeticOverflow => ErrorCategory::Arithmetic,
        }
    }

    /// Returns a human-readable message for this error.
    pub fn message(&self) -> &'static str {
        match self {
            ContractError::NotInitialized => "Contract has not been initialized",
            ContractError::AlreadyInitialized => "Contract is already initialized",
            ContractError::Unauthorized => "Caller is not authorized for this operation",
            ContractError::InvalidInput => "Input value is not valid",
            ContractError::Disabled => "Deposits and withdrawals are disabled",
            ContractError::BelowMinimum => "Amount is below minimum",
            ContractError::InsufficientAvailable => "Amount exceeds the unlocked balance",
            ContractError::AuthorizationFailed => "Authorization signature is not valid",
            ContractError::AuthorizationReplayed => "Authorization has already been used",
            ContractError::InvalidConfig => "Configuration value is not allowed",
            ContractError::WrongRewardModel => "Operation does not apply to the active reward model",
            ContractError::RewardPeriodActive => "A funded reward period is still running",
            ContractError::ArithmeticOverflow => "Reward arithmetic overflowed",
            ContractError::MigrationRequired => "Stored state must be migrated first",
            ContractError::AlreadyMigrated => "Stored state is already current",
        }
    }
}

impl From<CommonError> for ContractError {
    fn from(err: CommonError) -> Self {
        match err {
            CommonError::SignerMismatch | CommonError::InvalidSignature => {
                ContractError::AuthorizationFailed
            }
            CommonError::AuthorizationReplayed => ContractError::AuthorizationReplayed,
        }
    }
}
