//! Instruction builders for the governance program's own configuration
//! operations.
//!
//! These use the governance program's Borsh framing: a u8 variant tag
//! followed by little-endian fields; enum payloads are tag-prefixed.

use solana_instruction::{AccountMeta, Instruction};
use solana_pubkey::Pubkey;

use crate::program::constants::governance_instruction;

/// How vote weight is sourced when tallying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum VoteWeightSource {
    /// Weight from tokens deposited into the realm.
    Deposit = 0,
    /// Weight from a snapshot at proposal creation.
    Snapshot = 1,
}

/// Configuration of a governance account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GovernanceConfig {
    /// Yes-vote percentage (of voting supply) required to pass.
    pub vote_threshold_percentage: u8,
    /// Minimum community tokens required to create a proposal.
    pub min_community_tokens_to_create_proposal: u64,
    /// Minimum hold-up time before an approved instruction executes, in seconds.
    pub min_instruction_hold_up_time: u32,
    /// Maximum voting duration, in seconds.
    pub max_voting_time: u32,
    /// Vote weight sourcing.
    pub vote_weight_source: VoteWeightSource,
    /// Cool-off period after voting ends, in seconds.
    pub proposal_cool_off_time: u32,
    /// Minimum council tokens required to create a proposal.
    pub min_council_tokens_to_create_proposal: u64,
}

impl GovernanceConfig {
    fn serialize_into(&self, data: &mut Vec<u8>) {
        // VoteThresholdPercentage::YesVote(u8)
        data.push(0);
        data.push(self.vote_threshold_percentage);
        data.extend_from_slice(&self.min_community_tokens_to_create_proposal.to_le_bytes());
        data.extend_from_slice(&self.min_instruction_hold_up_time.to_le_bytes());
        data.extend_from_slice(&self.max_voting_time.to_le_bytes());
        data.push(self.vote_weight_source as u8);
        data.extend_from_slice(&self.proposal_cool_off_time.to_le_bytes());
        data.extend_from_slice(&self.min_council_tokens_to_create_proposal.to_le_bytes());
    }
}

/// Parameters for reconfiguring a realm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetRealmConfigParams {
    /// Realm account to reconfigure.
    pub realm: Pubkey,
    /// Council mint to keep, or `None` to remove the council.
    pub council_mint: Option<Pubkey>,
    /// Minimum community tokens required to create a governance.
    pub min_community_tokens_to_create_governance: u64,
    /// Community mint max-vote-weight supply fraction (10^10 = 100%).
    pub community_mint_max_vote_weight_fraction: u64,
}

/// Build SetGovernanceConfig instruction.
///
/// The governance account signs its own reconfiguration when the proposal
/// executes.
///
/// Accounts:
/// 0. governance (signer, mut)
pub fn build_set_governance_config_ix(
    governance: &Pubkey,
    config: &GovernanceConfig,
    program_id: &Pubkey,
) -> Instruction {
    let keys = vec![AccountMeta::new(*governance, true)];

    // Data: [tag(1), threshold(2), u64(8), u32(4), u32(4), source(1),
    //        u32(4), u64(8)] = 32 bytes
    let mut data = Vec::with_capacity(32);
    data.push(governance_instruction::SET_GOVERNANCE_CONFIG);
    config.serialize_into(&mut data);

    Instruction {
        program_id: *program_id,
        accounts: keys,
        data,
    }
}

/// Build SetRealmConfig instruction.
///
/// Accounts:
/// 0. realm (mut)
/// 1. realm_authority (signer)
/// 2. council_mint (readonly) - only when keeping a council
pub fn build_set_realm_config_ix(
    params: &SetRealmConfigParams,
    realm_authority: &Pubkey,
    program_id: &Pubkey,
) -> Instruction {
    let mut keys = vec![
        AccountMeta::new(params.realm, false),
        AccountMeta::new_readonly(*realm_authority, true),
    ];
    if let Some(council_mint) = params.council_mint {
        keys.push(AccountMeta::new_readonly(council_mint, false));
    }

    // Data: [tag(1), use_council(1), u64(8), fraction tag(1), u64(8)] = 19 bytes
    let mut data = Vec::with_capacity(19);
    data.push(governance_instruction::SET_REALM_CONFIG);
    data.push(params.council_mint.is_some() as u8);
    data.extend_from_slice(
        &params
            .min_community_tokens_to_create_governance
            .to_le_bytes(),
    );
    // MintMaxVoteWeightSource::SupplyFraction(u64)
    data.push(0);
    data.extend_from_slice(&params.community_mint_max_vote_weight_fraction.to_le_bytes());

    Instruction {
        program_id: *program_id,
        accounts: keys,
        data,
    }
}
