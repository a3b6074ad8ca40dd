//! Operation catalog and composer.
//!
//! The catalog decides which administrative operations are legal for a
//! governance target; the [`Composer`] enforces that decision and
//! dispatches to the matching pure builder. Exchange-specific operations
//! (anything that moves funds or redefines markets) are offered only for
//! governed accounts in the injected [`DeploymentRegistry`] — this gate is
//! not bypassable from parameter input.

use solana_instruction::Instruction;
use solana_pubkey::Pubkey;
use tracing::debug;

use crate::error::{SdkError, SdkResult};
use crate::program::constants::GOVERNANCE_PROGRAM_ID;
use crate::program::governance::{
    build_set_governance_config_ix, build_set_realm_config_ix, GovernanceConfig,
    SetRealmConfigParams,
};
use crate::program::instructions::{
    build_add_oracle_ix, build_add_spot_market_ix, build_change_perp_market_params_ix,
    build_change_spot_market_params_ix, build_create_perp_market_ix,
};
use crate::program::registry::DeploymentRegistry;
use crate::program::types::{
    AddOracleParams, AddSpotMarketParams, ChangePerpMarketParams, ChangeSpotMarketParams,
    CreatePerpMarketParams, GovernanceTarget,
};

/// An administrative operation a governance target may propose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Change the governance account's own configuration.
    SetGovernanceConfig,
    /// Change the realm configuration (realm-authority targets only).
    SetRealmConfig,
    /// Register a price oracle with the exchange group.
    AddOracle,
    /// List a DEX spot market.
    AddSpotMarket,
    /// Create a perp market.
    CreatePerpMarket,
    /// Patch a perp market's parameters.
    ChangePerpMarketParams,
    /// Patch a spot market's parameters.
    ChangeSpotMarketParams,
}

impl Operation {
    /// The exchange-specific operations, in catalog order.
    pub const EXCHANGE_OPERATIONS: [Operation; 5] = [
        Operation::AddOracle,
        Operation::AddSpotMarket,
        Operation::CreatePerpMarket,
        Operation::ChangePerpMarketParams,
        Operation::ChangeSpotMarketParams,
    ];

    /// Stable display label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::SetGovernanceConfig => "set-governance-config",
            Operation::SetRealmConfig => "set-realm-config",
            Operation::AddOracle => "add-oracle",
            Operation::AddSpotMarket => "add-spot-market",
            Operation::CreatePerpMarket => "create-perp-market",
            Operation::ChangePerpMarketParams => "change-perp-market",
            Operation::ChangeSpotMarketParams => "change-spot-market",
        }
    }

    /// Whether this operation requires an allow-listed exchange target.
    pub fn is_exchange_operation(&self) -> bool {
        Self::EXCHANGE_OPERATIONS.contains(self)
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The operations legal for a governance target, in stable order.
///
/// Always includes [`Operation::SetGovernanceConfig`]. Adds
/// [`Operation::SetRealmConfig`] only when the target's authority is the
/// realm authority. Adds the exchange set only when the governed account is
/// a registered exchange deployment.
pub fn available_operations(
    target: &GovernanceTarget,
    realm_authority: Option<&Pubkey>,
    registry: &DeploymentRegistry,
) -> Vec<Operation> {
    let mut operations = vec![Operation::SetGovernanceConfig];

    if realm_authority == Some(&target.authority) {
        operations.push(Operation::SetRealmConfig);
    }

    if registry.is_known_exchange(&target.governed_account) {
        operations.extend(Operation::EXCHANGE_OPERATIONS);
    }

    operations
}

/// A fully resolved request for one operation.
#[derive(Debug, Clone)]
pub enum OperationRequest {
    SetGovernanceConfig(GovernanceConfig),
    SetRealmConfig(SetRealmConfigParams),
    AddOracle(AddOracleParams),
    AddSpotMarket(AddSpotMarketParams),
    CreatePerpMarket(CreatePerpMarketParams),
    ChangePerpMarketParams(ChangePerpMarketParams),
    ChangeSpotMarketParams(ChangeSpotMarketParams),
}

impl OperationRequest {
    /// The catalog tag this request corresponds to.
    pub fn operation(&self) -> Operation {
        match self {
            OperationRequest::SetGovernanceConfig(_) => Operation::SetGovernanceConfig,
            OperationRequest::SetRealmConfig(_) => Operation::SetRealmConfig,
            OperationRequest::AddOracle(_) => Operation::AddOracle,
            OperationRequest::AddSpotMarket(_) => Operation::AddSpotMarket,
            OperationRequest::CreatePerpMarket(_) => Operation::CreatePerpMarket,
            OperationRequest::ChangePerpMarketParams(_) => Operation::ChangePerpMarketParams,
            OperationRequest::ChangeSpotMarketParams(_) => Operation::ChangeSpotMarketParams,
        }
    }
}

/// Composes governance instructions for a fixed set of deployments.
///
/// Stateless apart from the injected registry; every composition is a pure
/// function of the target and the resolved request.
#[derive(Debug, Clone)]
pub struct Composer {
    registry: DeploymentRegistry,
}

impl Composer {
    pub fn new(registry: DeploymentRegistry) -> Self {
        Self { registry }
    }

    /// A composer over the reviewed mainnet deployments.
    pub fn mainnet() -> Self {
        Self::new(DeploymentRegistry::mainnet())
    }

    pub fn registry(&self) -> &DeploymentRegistry {
        &self.registry
    }

    /// The operations legal for `target`, in stable order.
    pub fn available_operations(
        &self,
        target: &GovernanceTarget,
        realm_authority: Option<&Pubkey>,
    ) -> Vec<Operation> {
        available_operations(target, realm_authority, &self.registry)
    }

    /// Compose the instruction for one operation.
    ///
    /// Fails with [`SdkError::UnauthorizedOperation`] when the catalog does
    /// not offer the operation for this target, regardless of the request's
    /// parameters. The governance target's authority signs the instruction
    /// with program-derived authority at execution time.
    pub fn compose(
        &self,
        target: &GovernanceTarget,
        realm_authority: Option<&Pubkey>,
        request: &OperationRequest,
    ) -> SdkResult<Instruction> {
        let operation = request.operation();

        if !self
            .available_operations(target, realm_authority)
            .contains(&operation)
        {
            return Err(SdkError::UnauthorizedOperation {
                operation: operation.as_str(),
                governed: target.governed_account.to_string(),
            });
        }

        debug!(%operation, authority = %target.authority, "composing instruction");

        match request {
            OperationRequest::SetGovernanceConfig(config) => Ok(build_set_governance_config_ix(
                &target.authority,
                config,
                &GOVERNANCE_PROGRAM_ID,
            )),
            OperationRequest::SetRealmConfig(params) => Ok(build_set_realm_config_ix(
                params,
                &target.authority,
                &GOVERNANCE_PROGRAM_ID,
            )),
            OperationRequest::AddOracle(params) => {
                let cfg = self.registry.group_by_pubkey(&params.group)?;
                Ok(build_add_oracle_ix(params, &target.authority, &cfg.program_id))
            }
            OperationRequest::AddSpotMarket(params) => {
                let cfg = self.registry.group_by_pubkey(&params.group)?;
                Ok(build_add_spot_market_ix(
                    params,
                    &target.authority,
                    &cfg.program_id,
                ))
            }
            OperationRequest::CreatePerpMarket(params) => {
                let cfg = self.registry.group_by_pubkey(&params.group)?;
                build_create_perp_market_ix(params, &target.authority, &cfg.program_id)
            }
            OperationRequest::ChangePerpMarketParams(params) => {
                let cfg = self.registry.group_by_pubkey(&params.group)?;
                Ok(build_change_perp_market_params_ix(
                    params,
                    &target.authority,
                    &cfg.program_id,
                ))
            }
            OperationRequest::ChangeSpotMarketParams(params) => {
                let cfg = self.registry.group_by_pubkey(&params.group)?;
                Ok(build_change_spot_market_params_ix(
                    params,
                    &target.authority,
                    &cfg.program_id,
                ))
            }
        }
    }
}
