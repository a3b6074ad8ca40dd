//! Type definitions for governance instruction composition.
//!
//! Parameter structs are resolved inputs: pubkeys parsed, numbers encoded,
//! patch fields three-state. Builders consume them without further
//! validation.

use solana_pubkey::Pubkey;

use crate::shared::fixed::{PatchField, I80F48};

/// The authority/governed-account pair a proposal is composed for.
///
/// `authority` is the governance account that signs the final instruction
/// with program-derived authority when the proposal executes;
/// `governed_account` is the account it controls. Immutable once a
/// proposal flow begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GovernanceTarget {
    /// Governance account empowered to sign the final instruction.
    pub authority: Pubkey,
    /// The account under this governance's control.
    pub governed_account: Pubkey,
}

/// Parameters for registering a price oracle with a group.
#[derive(Debug, Clone)]
pub struct AddOracleParams {
    /// Group state account.
    pub group: Pubkey,
    /// Oracle account to register.
    pub oracle: Pubkey,
}

/// Parameters for listing a spot market.
///
/// `node_bank`, `root_bank`, and `base_vault` are auxiliary accounts that
/// must already be created and confirmed on-chain (see
/// [`crate::program::provision`]).
#[derive(Debug, Clone)]
pub struct AddSpotMarketParams {
    /// Group state account.
    pub group: Pubkey,
    /// Oracle for the listed token.
    pub oracle: Pubkey,
    /// DEX market account being listed.
    pub spot_market: Pubkey,
    /// DEX program the market trades on.
    pub dex_program: Pubkey,
    /// Base token mint of the market.
    pub base_mint: Pubkey,
    /// Provisioned node bank account.
    pub node_bank: Pubkey,
    /// Provisioned token vault for the base token.
    pub base_vault: Pubkey,
    /// Provisioned root bank account.
    pub root_bank: Pubkey,
    /// Maintenance position leverage.
    pub maint_leverage: I80F48,
    /// Initial position leverage.
    pub init_leverage: I80F48,
    /// Liquidation fee.
    pub liquidation_fee: I80F48,
    /// Optimal pool utilization.
    pub optimal_util: I80F48,
    /// Interest rate at optimal utilization.
    pub optimal_rate: I80F48,
    /// Maximum pool interest rate.
    pub max_rate: I80F48,
}

/// Provisioned bank and vault accounts for a new spot market listing.
#[derive(Debug, Clone, Copy)]
pub struct SpotBankAccounts {
    /// Provisioned node bank account.
    pub node_bank: Pubkey,
    /// Provisioned token vault for the base token.
    pub base_vault: Pubkey,
    /// Provisioned root bank account.
    pub root_bank: Pubkey,
}

/// Provisioned order-book accounts for a new perp market.
#[derive(Debug, Clone, Copy)]
pub struct PerpBookAccounts {
    /// Provisioned event queue account.
    pub event_queue: Pubkey,
    /// Provisioned bid side of the book.
    pub bids: Pubkey,
    /// Provisioned ask side of the book.
    pub asks: Pubkey,
}

/// Parameters for creating a perp market.
///
/// The market state account and the reward vault are program-derived; the
/// event queue and book sides are provisioned keypair accounts.
#[derive(Debug, Clone)]
pub struct CreatePerpMarketParams {
    /// Group state account.
    pub group: Pubkey,
    /// Oracle the market prices against.
    pub oracle: Pubkey,
    /// Provisioned order-book accounts.
    pub books: PerpBookAccounts,
    /// Reward token mint for liquidity incentives.
    pub reward_mint: Pubkey,
    /// Group signer authority (owns the reward vault).
    pub signer_key: Pubkey,
    /// Maintenance position leverage.
    pub maint_leverage: I80F48,
    /// Initial position leverage.
    pub init_leverage: I80F48,
    /// Liquidation fee.
    pub liquidation_fee: I80F48,
    /// Maker fee.
    pub maker_fee: I80F48,
    /// Taker fee.
    pub taker_fee: I80F48,
    /// Base lot size.
    pub base_lot_size: i64,
    /// Quote lot size.
    pub quote_lot_size: i64,
    /// Initial value for the dynamic incentive rate.
    pub rate: I80F48,
    /// Maximum incentivized order-book depth, in bps.
    pub max_depth_bps: I80F48,
    /// Incentive target period length, in seconds.
    pub target_period_length: u64,
    /// Reward tokens distributed per period, in native units.
    pub reward_per_period: u64,
    /// Order-book depth weight exponent.
    pub exp: u8,
    /// Market version.
    pub version: u8,
    /// x such that max_depth_bps / 2^x is between 1 and 100.
    pub lm_size_shift: u8,
    /// Decimals the base token would be listed with on the spot side.
    pub base_decimals: u8,
}

/// Parameters for patching a perp market's configuration.
///
/// Every field is three-state: absent fields leave the on-chain value
/// untouched, explicit zeros overwrite it.
#[derive(Debug, Clone, Default)]
pub struct ChangePerpMarketParams {
    /// Group state account.
    pub group: Pubkey,
    /// Perp market to patch.
    pub perp_market: Pubkey,
    pub maint_leverage: PatchField<I80F48>,
    pub init_leverage: PatchField<I80F48>,
    pub liquidation_fee: PatchField<I80F48>,
    pub maker_fee: PatchField<I80F48>,
    pub taker_fee: PatchField<I80F48>,
    pub rate: PatchField<I80F48>,
    pub max_depth_bps: PatchField<I80F48>,
    pub target_period_length: PatchField<u64>,
    pub reward_per_period: PatchField<u64>,
    pub exp: PatchField<u8>,
    pub version: PatchField<u8>,
    pub lm_size_shift: PatchField<u8>,
}

/// Parameters for patching a spot market's configuration.
#[derive(Debug, Clone, Default)]
pub struct ChangeSpotMarketParams {
    /// Group state account.
    pub group: Pubkey,
    /// Spot market to patch.
    pub spot_market: Pubkey,
    /// Root bank of the market's base token.
    pub root_bank: Pubkey,
    pub maint_leverage: PatchField<I80F48>,
    pub init_leverage: PatchField<I80F48>,
    pub liquidation_fee: PatchField<I80F48>,
    pub optimal_util: PatchField<I80F48>,
    pub optimal_rate: PatchField<I80F48>,
    pub max_rate: PatchField<I80F48>,
    pub version: PatchField<u8>,
}
