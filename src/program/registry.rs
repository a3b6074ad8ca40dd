//! Known exchange deployments.
//!
//! The set of governed program instances that unlock exchange-specific
//! governance operations is an explicit, injected configuration value: the
//! catalog and the composer consult a [`DeploymentRegistry`] passed to them
//! rather than module-level state, so they can be exercised against
//! synthetic deployments. The hard-coded [`DeploymentRegistry::mainnet`]
//! table is a security boundary — review changes to it accordingly.

use serde::{Deserialize, Serialize};
use solana_pubkey::Pubkey;
use std::str::FromStr;

use crate::error::{SdkError, SdkResult};
use crate::program::constants::{EXCHANGE_PROGRAM_ID, SERUM_DEX_PROGRAM_ID};

/// Static configuration for one deployed exchange group.
///
/// Carries everything builders and sizing helpers need without network
/// lookups: the program that owns the group, the group state account, the
/// group's signer authority (vault owner), and the reward token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupConfig {
    /// Human-readable group name (e.g. `mainnet.1`).
    pub name: String,
    /// Exchange program that owns this group.
    pub program_id: Pubkey,
    /// Group state account.
    pub group: Pubkey,
    /// Program-derived authority that owns the group's vaults.
    pub signer_key: Pubkey,
    /// DEX program spot markets trade on.
    pub serum_program_id: Pubkey,
    /// Quote currency mint.
    pub quote_mint: Pubkey,
    /// Liquidity-incentive reward token mint.
    pub reward_mint: Pubkey,
    /// Decimals of the reward token mint.
    pub reward_mint_decimals: u8,
}

/// The set of exchange deployments a composer will emit instructions for.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeploymentRegistry {
    groups: Vec<GroupConfig>,
}

impl DeploymentRegistry {
    /// The reviewed mainnet deployment table.
    pub fn mainnet() -> Self {
        Self {
            groups: vec![GroupConfig {
                name: "mainnet.1".to_string(),
                program_id: *EXCHANGE_PROGRAM_ID,
                group: Pubkey::from_str("98pjRuQjK3qA6gXts96PqZT4Ze5QmnCmt3QYjhbUSPue")
                    .unwrap(),
                signer_key: Pubkey::from_str("9BVcYqEQxyccuwznvxXqDkSJFavvTyheiTYk231T1A8S")
                    .unwrap(),
                serum_program_id: *SERUM_DEX_PROGRAM_ID,
                quote_mint: Pubkey::from_str("EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v")
                    .unwrap(),
                reward_mint: Pubkey::from_str("MangoCzJ36AjZyKwVj3VnYU4GTonjfVEnJmvvWaxLac")
                    .unwrap(),
                reward_mint_decimals: 6,
            }],
        }
    }

    /// A registry over caller-supplied deployments (tests, devnet).
    pub fn custom(groups: Vec<GroupConfig>) -> Self {
        Self { groups }
    }

    /// All registered groups.
    pub fn groups(&self) -> &[GroupConfig] {
        &self.groups
    }

    /// Whether the governed account is a registered exchange program.
    ///
    /// This is the gate that unlocks exchange-specific operations.
    pub fn is_known_exchange(&self, governed_account: &Pubkey) -> bool {
        self.groups.iter().any(|g| g.program_id == *governed_account)
    }

    /// Look up a group by its state account.
    pub fn group_by_pubkey(&self, group: &Pubkey) -> SdkResult<&GroupConfig> {
        self.groups
            .iter()
            .find(|g| g.group == *group)
            .ok_or_else(|| SdkError::UnknownDeployment(group.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mainnet_table() {
        let registry = DeploymentRegistry::mainnet();
        assert_eq!(registry.groups().len(), 1);
        assert!(registry.is_known_exchange(&EXCHANGE_PROGRAM_ID));
        assert!(!registry.is_known_exchange(&Pubkey::new_unique()));
    }

    #[test]
    fn test_group_lookup() {
        let registry = DeploymentRegistry::mainnet();
        let group = registry.groups()[0].group;
        assert!(registry.group_by_pubkey(&group).is_ok());
        assert!(matches!(
            registry.group_by_pubkey(&Pubkey::new_unique()),
            Err(SdkError::UnknownDeployment(_))
        ));
    }

    #[test]
    fn test_custom_registry() {
        let program_id = Pubkey::new_unique();
        let registry = DeploymentRegistry::custom(vec![GroupConfig {
            name: "test.1".to_string(),
            program_id,
            group: Pubkey::new_unique(),
            signer_key: Pubkey::new_unique(),
            serum_program_id: Pubkey::new_unique(),
            quote_mint: Pubkey::new_unique(),
            reward_mint: Pubkey::new_unique(),
            reward_mint_decimals: 6,
        }]);
        assert!(registry.is_known_exchange(&program_id));
        assert!(!registry.is_known_exchange(&EXCHANGE_PROGRAM_ID));
    }

    #[test]
    fn test_registry_serializes_for_audit() {
        let registry = DeploymentRegistry::mainnet();
        let json = serde_json::to_string(&registry).unwrap();
        let back: DeploymentRegistry = serde_json::from_str(&json).unwrap();
        assert_eq!(back.groups(), registry.groups());
    }
}
