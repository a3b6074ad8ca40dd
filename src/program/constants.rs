//! Constants for the exchange and governance programs.
//!
//! Program IDs, PDA seeds, instruction discriminators, and account layout
//! sizes matching the on-chain programs exactly.

use solana_pubkey::Pubkey;
use std::str::FromStr;

// ============================================================================
// Program IDs
// ============================================================================

lazy_static::lazy_static! {
    /// Mango v3 exchange program deployed under DAO control.
    pub static ref EXCHANGE_PROGRAM_ID: Pubkey =
        Pubkey::from_str("5fP7Z7a87ZEVsKr2tQPApdtq83GcTW4kz919R6ou5h5E").unwrap();

    /// SPL Governance program.
    pub static ref GOVERNANCE_PROGRAM_ID: Pubkey =
        Pubkey::from_str("GovER5Lthms3bLBqWub97yVrMmEogzX7xNjdXpPPCVZw").unwrap();

    /// Serum DEX v3 program (spot markets).
    pub static ref SERUM_DEX_PROGRAM_ID: Pubkey =
        Pubkey::from_str("9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin").unwrap();
}

/// SPL Token Program ID.
pub const TOKEN_PROGRAM_ID: Pubkey = spl_token::ID;

/// System Program ID.
pub const SYSTEM_PROGRAM_ID: Pubkey = solana_sdk_ids::system_program::ID;

/// Rent Sysvar ID.
pub const RENT_SYSVAR_ID: Pubkey = solana_sdk_ids::sysvar::rent::ID;

// ============================================================================
// Instruction Discriminators
// ============================================================================

/// Exchange program instruction discriminators (u32 little-endian on the wire).
pub mod instruction {
    pub const ADD_SPOT_MARKET: u32 = 4;
    pub const ADD_ORACLE: u32 = 10;
    pub const CREATE_PERP_MARKET: u32 = 46;
    pub const CHANGE_PERP_MARKET_PARAMS: u32 = 47;
    pub const CHANGE_SPOT_MARKET_PARAMS: u32 = 59;
}

/// Governance program instruction variants (u8 Borsh tag on the wire).
pub mod governance_instruction {
    pub const SET_GOVERNANCE_CONFIG: u8 = 19;
    pub const SET_REALM_CONFIG: u8 = 22;
}

// ============================================================================
// PDA Seeds
// ============================================================================

/// Perp market PDA seed literal. Part of the wire contract: the market
/// state address is derived from `[group, PERP_MARKET_SEED, oracle]`.
pub const PERP_MARKET_SEED: &[u8] = b"PerpMarket";

// ============================================================================
// Account Layout Sizes
// ============================================================================

/// One side of a perp order book, in bytes (header + node arena).
pub const BOOK_SIDE_SIZE: u64 = 90_152;

/// Perp event queue header, in bytes.
pub const EVENT_QUEUE_HEADER_SIZE: u64 = 32;

/// One perp event queue entry, in bytes.
pub const EVENT_SIZE: u64 = 200;

/// Node bank account, in bytes.
pub const NODE_BANK_SIZE: u64 = 72;

/// Root bank account, in bytes.
pub const ROOT_BANK_SIZE: u64 = 424;

/// SPL token account, in bytes.
pub const TOKEN_ACCOUNT_SIZE: u64 = 165;

/// Total event queue size for a given capacity.
pub fn event_queue_size(max_events: u64) -> u64 {
    EVENT_QUEUE_HEADER_SIZE + max_events * EVENT_SIZE
}
