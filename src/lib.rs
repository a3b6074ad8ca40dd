//! # Mango Governance SDK
//!
//! A Rust SDK for composing DAO governance instructions for the Mango v3
//! exchange program, supporting both native and WASM targets.
//!
//! ## Architecture
//!
//! The SDK is organized in layers:
//!
//! 1. **Core** — Fixed-point codec, PDA derivation, instruction builders
//!    (always available, WASM-safe)
//! 2. **Catalog** — Per-target operation gating and the `Composer` dispatch
//! 3. **Provisioning** — Auxiliary account creation against a cluster
//!    (native only, behind the `solana-rpc` feature)
//!
//! Composition is a two-phase protocol: provision any fresh storage
//! accounts first (one confirmed transaction), then build the governing
//! instruction as a pure function of the resolved inputs.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use mango_gov_sdk::prelude::*;
//!
//! let composer = Composer::mainnet();
//! let ops = composer.available_operations(&target, Some(&realm_authority));
//!
//! let params = ChangePerpMarketFields {
//!     group: group.to_string(),
//!     perp_market: market.to_string(),
//!     taker_fee: Some("0".to_string()),
//!     ..Default::default()
//! }
//! .resolve(6)?;
//!
//! let ix = composer.compose(
//!     &target,
//!     Some(&realm_authority),
//!     &OperationRequest::ChangePerpMarketParams(params),
//! )?;
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared types: fixed-point codec, patch fields.
pub mod shared;

/// On-chain program interaction: catalog, builders, PDAs, provisioning.
pub mod program;

/// Unified SDK error types.
pub mod error;

/// Cluster RPC URL constants.
pub mod network;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Fixed-point codec + patch semantics
    pub use crate::shared::fixed::{native_amount, FixedError, PatchField, I80F48};

    // Catalog + composer
    pub use crate::program::catalog::{
        available_operations, Composer, Operation, OperationRequest,
    };

    // Deployment configuration
    pub use crate::program::registry::{DeploymentRegistry, GroupConfig};

    // Resolved parameter types
    pub use crate::program::types::{
        AddOracleParams, AddSpotMarketParams, ChangePerpMarketParams, ChangeSpotMarketParams,
        CreatePerpMarketParams, GovernanceTarget, PerpBookAccounts, SpotBankAccounts,
    };

    // Raw form fields
    pub use crate::program::fields::{
        AddOracleFields, AddSpotMarketFields, ChangePerpMarketFields, ChangeSpotMarketFields,
        CreatePerpMarketFields,
    };

    // Governance-program configuration
    pub use crate::program::governance::{
        GovernanceConfig, SetRealmConfigParams, VoteWeightSource,
    };

    // Provisioning
    pub use crate::program::provision::{
        perp_book_specs, report_unconsumed, spot_listing_specs, AccountSpec, AuxiliaryAccount,
        ProvisionPlan,
    };
    #[cfg(feature = "solana-rpc")]
    pub use crate::program::provision::Provisioner;

    // Errors
    pub use crate::error::{SdkError, SdkResult};

    // Network
    pub use crate::network::{DEVNET_RPC_URL, MAINNET_RPC_URL};
}
