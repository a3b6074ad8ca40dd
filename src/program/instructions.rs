//! Instruction builders for the exchange program's administrative operations.
//!
//! Each builder is a pure function of its resolved inputs: same parameters,
//! byte-identical instruction. Account ordering, signer/writable flags, and
//! data field order reproduce the exchange program's expected layout
//! exactly. Network effects (auxiliary account creation) live in
//! [`crate::program::provision`], never here.

use solana_instruction::{AccountMeta, Instruction};
use solana_pubkey::Pubkey;

use crate::error::SdkResult;
use crate::program::constants::{
    instruction, RENT_SYSVAR_ID, SYSTEM_PROGRAM_ID, TOKEN_PROGRAM_ID,
};
use crate::program::pda::{get_perp_market_pda, get_reward_vault_pda};
use crate::program::types::{
    AddOracleParams, AddSpotMarketParams, ChangePerpMarketParams, ChangeSpotMarketParams,
    CreatePerpMarketParams,
};
use crate::shared::fixed::{PatchField, I80F48};

// ============================================================================
// Helper Functions
// ============================================================================

/// Create an account meta for a signer account.
fn signer(pubkey: Pubkey) -> AccountMeta {
    AccountMeta::new_readonly(pubkey, true)
}

/// Create an account meta for a signer+writable account.
fn signer_mut(pubkey: Pubkey) -> AccountMeta {
    AccountMeta::new(pubkey, true)
}

/// Create an account meta for a writable account.
fn writable(pubkey: Pubkey) -> AccountMeta {
    AccountMeta::new(pubkey, false)
}

/// Create an account meta for a read-only account.
fn readonly(pubkey: Pubkey) -> AccountMeta {
    AccountMeta::new_readonly(pubkey, false)
}

/// Append the u32 little-endian instruction discriminator.
fn push_discriminator(data: &mut Vec<u8>, discriminator: u32) {
    data.extend_from_slice(&discriminator.to_le_bytes());
}

/// Append a fixed-point value (16 bytes LE).
fn push_fixed(data: &mut Vec<u8>, value: I80F48) {
    data.extend_from_slice(&value.to_le_bytes());
}

/// Append a fixed-width optional fixed-point value.
///
/// One tag byte (0 = leave unchanged, 1 = overwrite) always followed by 16
/// value bytes, zero-filled when absent. Absent and explicit zero differ in
/// the tag byte only.
fn push_opt_fixed(data: &mut Vec<u8>, field: PatchField<I80F48>) {
    match field {
        PatchField::Absent => {
            data.push(0);
            data.extend_from_slice(&[0u8; 16]);
        }
        PatchField::Value(v) => {
            data.push(1);
            data.extend_from_slice(&v.to_le_bytes());
        }
    }
}

/// Append a fixed-width optional u64.
fn push_opt_u64(data: &mut Vec<u8>, field: PatchField<u64>) {
    match field {
        PatchField::Absent => {
            data.push(0);
            data.extend_from_slice(&[0u8; 8]);
        }
        PatchField::Value(v) => {
            data.push(1);
            data.extend_from_slice(&v.to_le_bytes());
        }
    }
}

/// Append a fixed-width optional u8.
fn push_opt_u8(data: &mut Vec<u8>, field: PatchField<u8>) {
    match field {
        PatchField::Absent => {
            data.push(0);
            data.push(0);
        }
        PatchField::Value(v) => {
            data.push(1);
            data.push(v);
        }
    }
}

// ============================================================================
// Instruction Builders
// ============================================================================

/// Build AddOracle instruction.
///
/// Registers a price oracle with the group.
///
/// Accounts:
/// 0. group (mut)
/// 1. oracle (mut)
/// 2. admin (signer) - Governance authority
pub fn build_add_oracle_ix(
    params: &AddOracleParams,
    admin: &Pubkey,
    program_id: &Pubkey,
) -> Instruction {
    let keys = vec![
        writable(params.group),
        writable(params.oracle),
        signer(*admin),
    ];

    let mut data = Vec::with_capacity(4);
    push_discriminator(&mut data, instruction::ADD_ORACLE);

    Instruction {
        program_id: *program_id,
        accounts: keys,
        data,
    }
}

/// Build AddSpotMarket instruction.
///
/// Lists a DEX spot market on the group. The node bank, base vault, and
/// root bank must already exist on-chain (provisioned and confirmed).
///
/// Accounts:
/// 0. group (mut)
/// 1. oracle (readonly)
/// 2. spot_market (readonly)
/// 3. dex_program (readonly)
/// 4. base_mint (readonly)
/// 5. node_bank (mut)
/// 6. base_vault (readonly)
/// 7. root_bank (mut)
/// 8. admin (signer) - Governance authority
pub fn build_add_spot_market_ix(
    params: &AddSpotMarketParams,
    admin: &Pubkey,
    program_id: &Pubkey,
) -> Instruction {
    let keys = vec![
        writable(params.group),
        readonly(params.oracle),
        readonly(params.spot_market),
        readonly(params.dex_program),
        readonly(params.base_mint),
        writable(params.node_bank),
        readonly(params.base_vault),
        writable(params.root_bank),
        signer(*admin),
    ];

    // Data: [discriminator(4), 6 x I80F48(16)] = 100 bytes
    let mut data = Vec::with_capacity(100);
    push_discriminator(&mut data, instruction::ADD_SPOT_MARKET);
    push_fixed(&mut data, params.maint_leverage);
    push_fixed(&mut data, params.init_leverage);
    push_fixed(&mut data, params.liquidation_fee);
    push_fixed(&mut data, params.optimal_util);
    push_fixed(&mut data, params.optimal_rate);
    push_fixed(&mut data, params.max_rate);

    Instruction {
        program_id: *program_id,
        accounts: keys,
        data,
    }
}

/// Build CreatePerpMarket instruction.
///
/// Creates a perp market whose state account and reward vault are derived
/// from the group and oracle; the event queue and both book sides are
/// provisioned keypair accounts.
///
/// Accounts:
/// 0. group (mut)
/// 1. oracle (readonly)
/// 2. perp_market (mut) - PDA [group, "PerpMarket", oracle]
/// 3. event_queue (mut)
/// 4. bids (mut)
/// 5. asks (mut)
/// 6. reward_mint (readonly)
/// 7. reward_vault (mut) - PDA [perp_market, token_program, reward_mint]
/// 8. admin (signer, mut) - Governance authority, pays PDA rent
/// 9. signer_key (readonly)
/// 10. system_program (readonly)
/// 11. token_program (readonly)
/// 12. rent_sysvar (readonly)
pub fn build_create_perp_market_ix(
    params: &CreatePerpMarketParams,
    admin: &Pubkey,
    program_id: &Pubkey,
) -> SdkResult<Instruction> {
    let (perp_market, _) = get_perp_market_pda(&params.group, &params.oracle, program_id)?;
    let (reward_vault, _) = get_reward_vault_pda(&perp_market, &params.reward_mint, program_id)?;

    let keys = vec![
        writable(params.group),
        readonly(params.oracle),
        writable(perp_market),
        writable(params.books.event_queue),
        writable(params.books.bids),
        writable(params.books.asks),
        readonly(params.reward_mint),
        writable(reward_vault),
        signer_mut(*admin),
        readonly(params.signer_key),
        readonly(SYSTEM_PROGRAM_ID),
        readonly(TOKEN_PROGRAM_ID),
        readonly(RENT_SYSVAR_ID),
    ];

    // Data: [discriminator(4), 7 x I80F48(16), 2 x i64(8), 2 x u64(8),
    //        4 x u8(1)] = 152 bytes
    let mut data = Vec::with_capacity(152);
    push_discriminator(&mut data, instruction::CREATE_PERP_MARKET);
    push_fixed(&mut data, params.maint_leverage);
    push_fixed(&mut data, params.init_leverage);
    push_fixed(&mut data, params.liquidation_fee);
    push_fixed(&mut data, params.maker_fee);
    push_fixed(&mut data, params.taker_fee);
    data.extend_from_slice(&params.base_lot_size.to_le_bytes());
    data.extend_from_slice(&params.quote_lot_size.to_le_bytes());
    push_fixed(&mut data, params.rate);
    push_fixed(&mut data, params.max_depth_bps);
    data.extend_from_slice(&params.target_period_length.to_le_bytes());
    data.extend_from_slice(&params.reward_per_period.to_le_bytes());
    data.push(params.exp);
    data.push(params.version);
    data.push(params.lm_size_shift);
    data.push(params.base_decimals);

    Ok(Instruction {
        program_id: *program_id,
        accounts: keys,
        data,
    })
}

/// Build ChangePerpMarketParams instruction.
///
/// Patches a perp market's configuration. Absent fields leave the on-chain
/// value untouched; explicit values (including zero) overwrite it.
///
/// Accounts:
/// 0. group (mut)
/// 1. perp_market (mut)
/// 2. admin (signer) - Governance authority
pub fn build_change_perp_market_params_ix(
    params: &ChangePerpMarketParams,
    admin: &Pubkey,
    program_id: &Pubkey,
) -> Instruction {
    let keys = vec![
        writable(params.group),
        writable(params.perp_market),
        signer(*admin),
    ];

    // Data: [discriminator(4), 7 x opt I80F48(17), 2 x opt u64(9),
    //        3 x opt u8(2)] = 147 bytes
    let mut data = Vec::with_capacity(147);
    push_discriminator(&mut data, instruction::CHANGE_PERP_MARKET_PARAMS);
    push_opt_fixed(&mut data, params.maint_leverage);
    push_opt_fixed(&mut data, params.init_leverage);
    push_opt_fixed(&mut data, params.liquidation_fee);
    push_opt_fixed(&mut data, params.maker_fee);
    push_opt_fixed(&mut data, params.taker_fee);
    push_opt_fixed(&mut data, params.rate);
    push_opt_fixed(&mut data, params.max_depth_bps);
    push_opt_u64(&mut data, params.target_period_length);
    push_opt_u64(&mut data, params.reward_per_period);
    push_opt_u8(&mut data, params.exp);
    push_opt_u8(&mut data, params.version);
    push_opt_u8(&mut data, params.lm_size_shift);

    Instruction {
        program_id: *program_id,
        accounts: keys,
        data,
    }
}

/// Build ChangeSpotMarketParams instruction.
///
/// Patches a spot market's risk and interest-curve configuration.
///
/// Accounts:
/// 0. group (mut)
/// 1. spot_market (mut)
/// 2. root_bank (mut)
/// 3. admin (signer) - Governance authority
pub fn build_change_spot_market_params_ix(
    params: &ChangeSpotMarketParams,
    admin: &Pubkey,
    program_id: &Pubkey,
) -> Instruction {
    let keys = vec![
        writable(params.group),
        writable(params.spot_market),
        writable(params.root_bank),
        signer(*admin),
    ];

    // Data: [discriminator(4), 6 x opt I80F48(17), opt u8(2)] = 108 bytes
    let mut data = Vec::with_capacity(108);
    push_discriminator(&mut data, instruction::CHANGE_SPOT_MARKET_PARAMS);
    push_opt_fixed(&mut data, params.maint_leverage);
    push_opt_fixed(&mut data, params.init_leverage);
    push_opt_fixed(&mut data, params.liquidation_fee);
    push_opt_fixed(&mut data, params.optimal_util);
    push_opt_fixed(&mut data, params.optimal_rate);
    push_opt_fixed(&mut data, params.max_rate);
    push_opt_u8(&mut data, params.version);

    Instruction {
        program_id: *program_id,
        accounts: keys,
        data,
    }
}
