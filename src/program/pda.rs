//! PDA (Program Derived Address) derivation.
//!
//! Seed order and seed literals are part of the wire contract with the
//! exchange program and must match it byte-for-byte.

use solana_pubkey::Pubkey;

use crate::error::{SdkError, SdkResult};
use crate::program::constants::{PERP_MARKET_SEED, TOKEN_PROGRAM_ID};

/// Maximum number of seeds in a derivation.
pub const MAX_SEEDS: usize = 16;

/// Maximum length of a single seed, in bytes.
pub const MAX_SEED_LEN: usize = 32;

/// Derive a program address from an ordered seed sequence.
///
/// Deterministic and side-effect free: identical inputs always yield the
/// identical `(address, bump)` pair. Seed order matters — swapping two
/// seeds produces a different address.
pub fn derive(program_id: &Pubkey, seeds: &[&[u8]]) -> SdkResult<(Pubkey, u8)> {
    if seeds.len() > MAX_SEEDS {
        return Err(SdkError::SeedTooLong {
            len: seeds.len(),
            max: MAX_SEEDS,
        });
    }
    for seed in seeds {
        if seed.len() > MAX_SEED_LEN {
            return Err(SdkError::SeedTooLong {
                len: seed.len(),
                max: MAX_SEED_LEN,
            });
        }
    }

    Pubkey::try_find_program_address(seeds, program_id).ok_or(SdkError::NoValidBump)
}

/// Get a Perp Market PDA.
///
/// Seeds: [group, "PerpMarket", oracle]
pub fn get_perp_market_pda(
    group: &Pubkey,
    oracle: &Pubkey,
    program_id: &Pubkey,
) -> SdkResult<(Pubkey, u8)> {
    derive(
        program_id,
        &[group.as_ref(), PERP_MARKET_SEED, oracle.as_ref()],
    )
}

/// Get the reward-token vault PDA for a perp market.
///
/// Seeds: [perp_market, token_program, reward_mint]
pub fn get_reward_vault_pda(
    perp_market: &Pubkey,
    reward_mint: &Pubkey,
    program_id: &Pubkey,
) -> SdkResult<(Pubkey, u8)> {
    derive(
        program_id,
        &[
            perp_market.as_ref(),
            TOKEN_PROGRAM_ID.as_ref(),
            reward_mint.as_ref(),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::program::constants::EXCHANGE_PROGRAM_ID;

    fn test_program_id() -> Pubkey {
        *EXCHANGE_PROGRAM_ID
    }

    #[test]
    fn test_derive_is_deterministic() {
        let program_id = test_program_id();
        let seed_a = Pubkey::new_unique();

        let (pda1, bump1) = derive(&program_id, &[seed_a.as_ref(), b"state"]).unwrap();
        let (pda2, bump2) = derive(&program_id, &[seed_a.as_ref(), b"state"]).unwrap();

        assert_eq!(pda1, pda2);
        assert_eq!(bump1, bump2);
    }

    #[test]
    fn test_seed_order_changes_address() {
        let program_id = test_program_id();
        let a = Pubkey::new_unique();
        let b = Pubkey::new_unique();

        let (forward, _) = derive(&program_id, &[a.as_ref(), b.as_ref()]).unwrap();
        let (reversed, _) = derive(&program_id, &[b.as_ref(), a.as_ref()]).unwrap();

        assert_ne!(forward, reversed);
    }

    #[test]
    fn test_seed_too_long() {
        let program_id = test_program_id();
        let oversized = [0u8; 33];

        assert!(matches!(
            derive(&program_id, &[&oversized]),
            Err(SdkError::SeedTooLong { len: 33, max: 32 })
        ));
    }

    #[test]
    fn test_too_many_seeds() {
        let program_id = test_program_id();
        let seed: &[u8] = b"x";
        let seeds = vec![seed; 17];

        assert!(matches!(
            derive(&program_id, &seeds),
            Err(SdkError::SeedTooLong { len: 17, max: 16 })
        ));
    }

    #[test]
    fn test_perp_market_pda_is_deterministic() {
        let program_id = test_program_id();
        let group = Pubkey::new_unique();
        let oracle = Pubkey::new_unique();

        let (pda1, bump1) = get_perp_market_pda(&group, &oracle, &program_id).unwrap();
        let (pda2, bump2) = get_perp_market_pda(&group, &oracle, &program_id).unwrap();

        assert_eq!(pda1, pda2);
        assert_eq!(bump1, bump2);
    }

    #[test]
    fn test_different_oracles_produce_different_markets() {
        let program_id = test_program_id();
        let group = Pubkey::new_unique();

        let (pda1, _) =
            get_perp_market_pda(&group, &Pubkey::new_unique(), &program_id).unwrap();
        let (pda2, _) =
            get_perp_market_pda(&group, &Pubkey::new_unique(), &program_id).unwrap();

        assert_ne!(pda1, pda2);
    }

    #[test]
    fn test_reward_vault_pda() {
        let program_id = test_program_id();
        let perp_market = Pubkey::new_unique();
        let reward_mint = Pubkey::new_unique();

        let (pda1, _) = get_reward_vault_pda(&perp_market, &reward_mint, &program_id).unwrap();
        let (pda2, _) = get_reward_vault_pda(&perp_market, &reward_mint, &program_id).unwrap();

        assert_eq!(pda1, pda2);
        assert_ne!(pda1, perp_market);
    }
}
