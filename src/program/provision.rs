//! Auxiliary account provisioning.
//!
//! Operations that create new per-market state need fresh storage accounts
//! (order-book sides, event queue, root/node banks, token vaults) to exist
//! on-chain before the governing instruction can reference them. Planning
//! is pure and always available; submission talks to the cluster and lives
//! behind the `solana-rpc` feature.
//!
//! Provisioning is a single all-or-nothing transaction signed by the
//! funding wallet and by every new account keypair (an account co-signs its
//! own creation). A failed confirmation is fatal to the submission attempt
//! and is never retried here: rent funding is a real cost, and a blind
//! retry could double-spend. If a later build step fails, the created
//! accounts remain on-chain — already paid for, unconsumed — and the caller
//! must surface that; there is no local undo.

use solana_instruction::Instruction;
use solana_pubkey::Pubkey;

use crate::error::{SdkError, SdkResult};
use crate::program::constants::{
    event_queue_size, BOOK_SIDE_SIZE, NODE_BANK_SIZE, ROOT_BANK_SIZE, TOKEN_ACCOUNT_SIZE,
    TOKEN_PROGRAM_ID,
};

// ============================================================================
// Account Specs
// ============================================================================

/// What kind of auxiliary account to create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountSpec {
    /// Raw storage owned by the exchange program.
    Storage { space: u64 },
    /// SPL token account holding `mint`, owned by `owner` (the group's
    /// signer authority).
    TokenVault { mint: Pubkey, owner: Pubkey },
}

impl AccountSpec {
    /// Allocation size in bytes.
    pub fn space(&self) -> u64 {
        match self {
            AccountSpec::Storage { space } => *space,
            AccountSpec::TokenVault { .. } => TOKEN_ACCOUNT_SIZE,
        }
    }
}

/// Specs for a new perp market's order book: event queue, bids, asks.
pub fn perp_book_specs(max_events: u64) -> Vec<AccountSpec> {
    vec![
        AccountSpec::Storage {
            space: event_queue_size(max_events),
        },
        AccountSpec::Storage {
            space: BOOK_SIDE_SIZE,
        },
        AccountSpec::Storage {
            space: BOOK_SIDE_SIZE,
        },
    ]
}

/// Specs for a new spot listing: base vault, node bank, root bank.
pub fn spot_listing_specs(base_mint: Pubkey, vault_owner: Pubkey) -> Vec<AccountSpec> {
    vec![
        AccountSpec::TokenVault {
            mint: base_mint,
            owner: vault_owner,
        },
        AccountSpec::Storage {
            space: NODE_BANK_SIZE,
        },
        AccountSpec::Storage {
            space: ROOT_BANK_SIZE,
        },
    ]
}

// ============================================================================
// Provision Plan (pure)
// ============================================================================

/// One account in a provision plan.
#[derive(Debug, Clone)]
pub struct PlannedAccount {
    pub pubkey: Pubkey,
    pub spec: AccountSpec,
    /// Rent-exempt minimum balance for this account's size.
    pub rent: u64,
}

/// A fully priced provisioning transaction, before signing.
#[derive(Debug, Clone)]
pub struct ProvisionPlan {
    payer: Pubkey,
    owner_program: Pubkey,
    entries: Vec<PlannedAccount>,
}

impl ProvisionPlan {
    /// Assemble a plan from (address, spec, rent) entries, in request order.
    pub fn new(
        payer: Pubkey,
        owner_program: Pubkey,
        entries: Vec<(Pubkey, AccountSpec, u64)>,
    ) -> Self {
        Self {
            payer,
            owner_program,
            entries: entries
                .into_iter()
                .map(|(pubkey, spec, rent)| PlannedAccount { pubkey, spec, rent })
                .collect(),
        }
    }

    /// Planned accounts, in request order.
    pub fn entries(&self) -> &[PlannedAccount] {
        &self.entries
    }

    /// Total lamports the payer must fund.
    pub fn required_lamports(&self) -> u64 {
        self.entries.iter().map(|e| e.rent).sum()
    }

    /// Verify the payer can cover rent for every planned account.
    ///
    /// Must pass before any transaction is built; on failure nothing has
    /// been submitted and no addresses may be used.
    pub fn check_funding(&self, available: u64) -> SdkResult<()> {
        let required = self.required_lamports();
        if available < required {
            return Err(SdkError::InsufficientFunds {
                required,
                available,
            });
        }
        Ok(())
    }

    /// The creation (and, for vaults, initialization) instructions.
    pub fn instructions(&self) -> SdkResult<Vec<Instruction>> {
        let mut instructions = Vec::with_capacity(self.entries.len() * 2);

        for entry in &self.entries {
            match &entry.spec {
                AccountSpec::Storage { space } => {
                    instructions.push(solana_system_interface::instruction::create_account(
                        &self.payer,
                        &entry.pubkey,
                        entry.rent,
                        *space,
                        &self.owner_program,
                    ));
                }
                AccountSpec::TokenVault { mint, owner } => {
                    instructions.push(solana_system_interface::instruction::create_account(
                        &self.payer,
                        &entry.pubkey,
                        entry.rent,
                        TOKEN_ACCOUNT_SIZE,
                        &TOKEN_PROGRAM_ID,
                    ));
                    instructions.push(
                        spl_token::instruction::initialize_account(
                            &TOKEN_PROGRAM_ID,
                            &entry.pubkey,
                            mint,
                            owner,
                        )
                        .map_err(|e| SdkError::TokenInstruction(e.to_string()))?,
                    );
                }
            }
        }

        Ok(instructions)
    }
}

/// A confirmed auxiliary account, ready to be referenced by a builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuxiliaryAccount {
    pub pubkey: Pubkey,
    pub space: u64,
    pub lamports: u64,
}

/// Surface accounts that were created and paid for but not consumed by a
/// later build step. Cleanup is not possible; a resubmission must
/// provision fresh accounts.
pub fn report_unconsumed(accounts: &[AuxiliaryAccount]) {
    for account in accounts {
        tracing::warn!(
            pubkey = %account.pubkey,
            lamports = account.lamports,
            "provisioned account left unconsumed"
        );
    }
}

// ============================================================================
// Provisioner (RPC)
// ============================================================================

#[cfg(feature = "solana-rpc")]
pub use rpc::Provisioner;

#[cfg(feature = "solana-rpc")]
mod rpc {
    use solana_client::nonblocking::rpc_client::RpcClient;
    use solana_hash::Hash;
    use solana_keypair::Keypair;
    use solana_pubkey::Pubkey;
    use solana_signer::Signer;
    use solana_transaction::Transaction;
    use tracing::info;

    use super::{AccountSpec, AuxiliaryAccount, ProvisionPlan};
    use crate::error::{SdkError, SdkResult};

    /// Creates and funds auxiliary accounts against a cluster.
    pub struct Provisioner<'a> {
        rpc: &'a RpcClient,
        owner_program: Pubkey,
    }

    impl<'a> Provisioner<'a> {
        pub fn new(rpc: &'a RpcClient, owner_program: Pubkey) -> Self {
            Self { rpc, owner_program }
        }

        /// Create, fund, and (for vaults) initialize the requested accounts.
        ///
        /// Resolves to the confirmed addresses in request order, or to an
        /// error with nothing usable — never a partial set. Funding is
        /// checked before the transaction is built.
        pub async fn provision(
            &self,
            payer: &Keypair,
            specs: &[AccountSpec],
        ) -> SdkResult<Vec<AuxiliaryAccount>> {
            let keypairs: Vec<Keypair> = specs.iter().map(|_| Keypair::new()).collect();

            let mut entries = Vec::with_capacity(specs.len());
            for (keypair, spec) in keypairs.iter().zip(specs) {
                let rent = self
                    .rpc
                    .get_minimum_balance_for_rent_exemption(spec.space() as usize)
                    .await?;
                entries.push((keypair.pubkey(), spec.clone(), rent));
            }

            let plan = ProvisionPlan::new(payer.pubkey(), self.owner_program, entries);

            let available = self.rpc.get_balance(&payer.pubkey()).await?;
            plan.check_funding(available)?;

            let instructions = plan.instructions()?;
            let blockhash: Hash = self.rpc.get_latest_blockhash().await?;

            let mut signers: Vec<&dyn Signer> = Vec::with_capacity(keypairs.len() + 1);
            signers.push(payer);
            for keypair in &keypairs {
                signers.push(keypair);
            }

            let transaction = Transaction::new_signed_with_payer(
                &instructions,
                Some(&payer.pubkey()),
                &signers,
                blockhash,
            );

            let signature = self
                .rpc
                .send_and_confirm_transaction(&transaction)
                .await
                .map_err(|e| SdkError::AccountCreationFailed(e.to_string()))?;

            info!(%signature, count = specs.len(), "created auxiliary accounts");

            Ok(plan
                .entries()
                .iter()
                .map(|e| AuxiliaryAccount {
                    pubkey: e.pubkey,
                    space: e.spec.space(),
                    lamports: e.rent,
                })
                .collect())
        }
    }
}
