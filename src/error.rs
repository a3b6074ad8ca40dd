//! Unified SDK error types.

use thiserror::Error;

/// Top-level SDK error.
#[derive(Error, Debug)]
pub enum SdkError {
    /// A field could not be parsed as a number.
    #[error("invalid number for `{field}`: '{input}'")]
    InvalidNumberFormat { field: String, input: String },

    /// A numeric field does not fit the wire representation.
    #[error("value for `{field}` out of range: '{input}'")]
    OutOfRange { field: String, input: String },

    /// A required field was not supplied.
    #[error("missing required field: {0}")]
    MissingField(String),

    /// A pubkey field could not be parsed.
    #[error("invalid pubkey for `{field}`: '{input}'")]
    InvalidPubkey { field: String, input: String },

    /// A derivation seed exceeds the maximum seed length.
    #[error("derivation seed too long: {len} bytes (max {max})")]
    SeedTooLong { len: usize, max: usize },

    /// No bump seed produced an off-curve address.
    #[error("no valid bump seed found for derivation")]
    NoValidBump,

    /// The operation is not available for the governance target.
    #[error("operation `{operation}` is not available for governed account {governed}")]
    UnauthorizedOperation {
        operation: &'static str,
        governed: String,
    },

    /// The referenced group is not a known exchange deployment.
    #[error("unknown exchange deployment: {0}")]
    UnknownDeployment(String),

    /// The auxiliary account transaction failed to submit or confirm.
    #[error("account creation failed: {0}")]
    AccountCreationFailed(String),

    /// The funding authority cannot cover rent for the requested accounts.
    #[error("insufficient funds: need {required} lamports, have {available}")]
    InsufficientFunds { required: u64, available: u64 },

    /// Fixed-point conversion error.
    #[error("fixed-point error: {0}")]
    Fixed(#[from] crate::shared::fixed::FixedError),

    /// Token instruction construction error.
    #[error("token instruction error: {0}")]
    TokenInstruction(String),

    /// RPC client error.
    #[cfg(feature = "solana-rpc")]
    #[error("RPC error: {0}")]
    Rpc(#[from] solana_client::client_error::ClientError),
}

/// Result type alias for SDK operations.
pub type SdkResult<T> = Result<T, SdkError>;
