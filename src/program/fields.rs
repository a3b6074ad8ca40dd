//! Raw form-field resolution.
//!
//! The UI layer supplies named string fields with no pre-validation. The
//! resolvers here turn them into typed parameter structs: pubkeys parsed,
//! required numbers encoded, optional numbers resolved with three-way patch
//! semantics. Every error names the offending field.

use std::str::FromStr;

use rust_decimal::Decimal;
use solana_pubkey::Pubkey;

use crate::error::{SdkError, SdkResult};
use crate::program::registry::GroupConfig;
use crate::program::types::{
    AddOracleParams, AddSpotMarketParams, ChangePerpMarketParams, ChangeSpotMarketParams,
    CreatePerpMarketParams, PerpBookAccounts, SpotBankAccounts,
};
use crate::shared::fixed::{
    native_amount, optional_u64_from_str, optional_u8_from_str, FixedError, PatchField, I80F48,
};

// ============================================================================
// Field Parsers
// ============================================================================

fn fixed_error(field: &'static str, input: &str, err: FixedError) -> SdkError {
    match err {
        FixedError::InvalidFormat { .. } => SdkError::InvalidNumberFormat {
            field: field.to_string(),
            input: input.to_string(),
        },
        FixedError::OutOfRange { .. } => SdkError::OutOfRange {
            field: field.to_string(),
            input: input.to_string(),
        },
    }
}

/// Parse a required pubkey field.
pub fn pubkey_field(field: &'static str, input: &str) -> SdkResult<Pubkey> {
    Pubkey::from_str(input.trim()).map_err(|_| SdkError::InvalidPubkey {
        field: field.to_string(),
        input: input.to_string(),
    })
}

fn required_str<'a>(field: &'static str, input: &'a Option<String>) -> SdkResult<&'a str> {
    match input {
        Some(s) if !s.trim().is_empty() => Ok(s.as_str()),
        _ => Err(SdkError::MissingField(field.to_string())),
    }
}

/// Parse a required fixed-point field.
pub fn required_fixed(field: &'static str, input: &Option<String>) -> SdkResult<I80F48> {
    let raw = required_str(field, input)?;
    I80F48::parse(raw).map_err(|e| fixed_error(field, raw, e))
}

/// Parse a required signed integer field.
pub fn required_i64(field: &'static str, input: &Option<String>) -> SdkResult<i64> {
    let raw = required_str(field, input)?;
    raw.trim()
        .parse::<i64>()
        .map_err(|_| SdkError::InvalidNumberFormat {
            field: field.to_string(),
            input: raw.to_string(),
        })
}

/// Parse a required unsigned integer field.
pub fn required_u64(field: &'static str, input: &Option<String>) -> SdkResult<u64> {
    let raw = required_str(field, input)?;
    raw.trim()
        .parse::<u64>()
        .map_err(|_| SdkError::InvalidNumberFormat {
            field: field.to_string(),
            input: raw.to_string(),
        })
}

/// Parse a required u8 field.
pub fn required_u8(field: &'static str, input: &Option<String>) -> SdkResult<u8> {
    let v = required_u64(field, input)?;
    u8::try_from(v).map_err(|_| SdkError::OutOfRange {
        field: field.to_string(),
        input: v.to_string(),
    })
}

/// Parse a required token amount in UI units into native units.
pub fn required_native_amount(
    field: &'static str,
    input: &Option<String>,
    decimals: u8,
) -> SdkResult<u64> {
    let raw = required_str(field, input)?;
    let value = Decimal::from_str(raw.trim()).map_err(|_| SdkError::InvalidNumberFormat {
        field: field.to_string(),
        input: raw.to_string(),
    })?;
    native_amount(value, decimals).map_err(|e| fixed_error(field, raw, e))
}

/// Resolve an optional fixed-point field with patch semantics.
pub fn patch_fixed(
    field: &'static str,
    input: &Option<String>,
) -> SdkResult<PatchField<I80F48>> {
    let raw = input.as_deref();
    I80F48::from_optional_str(raw).map_err(|e| fixed_error(field, raw.unwrap_or(""), e))
}

/// Resolve an optional unsigned integer field with patch semantics.
pub fn patch_u64(field: &'static str, input: &Option<String>) -> SdkResult<PatchField<u64>> {
    let raw = input.as_deref();
    optional_u64_from_str(raw).map_err(|e| fixed_error(field, raw.unwrap_or(""), e))
}

/// Resolve an optional u8 field with patch semantics.
pub fn patch_u8(field: &'static str, input: &Option<String>) -> SdkResult<PatchField<u8>> {
    let raw = input.as_deref();
    optional_u8_from_str(raw).map_err(|e| fixed_error(field, raw.unwrap_or(""), e))
}

/// Resolve an optional token amount in UI units with patch semantics.
pub fn patch_native_amount(
    field: &'static str,
    input: &Option<String>,
    decimals: u8,
) -> SdkResult<PatchField<u64>> {
    match input.as_deref() {
        None => Ok(PatchField::Absent),
        Some(s) if s.trim().is_empty() => Ok(PatchField::Absent),
        Some(s) => {
            let value =
                Decimal::from_str(s.trim()).map_err(|_| SdkError::InvalidNumberFormat {
                    field: field.to_string(),
                    input: s.to_string(),
                })?;
            let scaled = native_amount(value, decimals).map_err(|e| fixed_error(field, s, e))?;
            Ok(PatchField::Value(scaled))
        }
    }
}

// ============================================================================
// Per-Operation Field Sets
// ============================================================================

/// Raw fields for registering an oracle.
#[derive(Debug, Clone, Default)]
pub struct AddOracleFields {
    pub group: String,
    pub oracle: String,
}

impl AddOracleFields {
    pub fn resolve(&self) -> SdkResult<AddOracleParams> {
        Ok(AddOracleParams {
            group: pubkey_field("group", &self.group)?,
            oracle: pubkey_field("oracle", &self.oracle)?,
        })
    }
}

/// Raw fields for listing a spot market.
///
/// The base mint is read from the DEX market account by the surrounding
/// application and passed in typed; the bank and vault accounts come from a
/// confirmed provisioning step.
#[derive(Debug, Clone, Default)]
pub struct AddSpotMarketFields {
    pub group: String,
    pub oracle: String,
    pub spot_market: String,
    pub maint_leverage: Option<String>,
    pub init_leverage: Option<String>,
    pub liquidation_fee: Option<String>,
    pub optimal_util: Option<String>,
    pub optimal_rate: Option<String>,
    pub max_rate: Option<String>,
}

impl AddSpotMarketFields {
    pub fn resolve(
        &self,
        base_mint: Pubkey,
        banks: SpotBankAccounts,
        cfg: &GroupConfig,
    ) -> SdkResult<AddSpotMarketParams> {
        Ok(AddSpotMarketParams {
            group: pubkey_field("group", &self.group)?,
            oracle: pubkey_field("oracle", &self.oracle)?,
            spot_market: pubkey_field("spot_market", &self.spot_market)?,
            dex_program: cfg.serum_program_id,
            base_mint,
            node_bank: banks.node_bank,
            base_vault: banks.base_vault,
            root_bank: banks.root_bank,
            maint_leverage: required_fixed("maint_leverage", &self.maint_leverage)?,
            init_leverage: required_fixed("init_leverage", &self.init_leverage)?,
            liquidation_fee: required_fixed("liquidation_fee", &self.liquidation_fee)?,
            optimal_util: required_fixed("optimal_util", &self.optimal_util)?,
            optimal_rate: required_fixed("optimal_rate", &self.optimal_rate)?,
            max_rate: required_fixed("max_rate", &self.max_rate)?,
        })
    }
}

/// Raw fields for creating a perp market.
///
/// Every numeric field is required: create operations take explicit values,
/// never patches.
#[derive(Debug, Clone, Default)]
pub struct CreatePerpMarketFields {
    pub group: String,
    pub oracle: String,
    pub maint_leverage: Option<String>,
    pub init_leverage: Option<String>,
    pub liquidation_fee: Option<String>,
    pub maker_fee: Option<String>,
    pub taker_fee: Option<String>,
    pub base_lot_size: Option<String>,
    pub quote_lot_size: Option<String>,
    pub max_num_events: Option<String>,
    pub rate: Option<String>,
    pub max_depth_bps: Option<String>,
    pub exp: Option<String>,
    pub target_period_length: Option<String>,
    pub reward_per_period: Option<String>,
    pub version: Option<String>,
    pub lm_size_shift: Option<String>,
    pub base_decimals: Option<String>,
}

impl CreatePerpMarketFields {
    /// Event queue capacity, needed for provisioning before resolution.
    pub fn max_events(&self) -> SdkResult<u64> {
        required_u64("max_num_events", &self.max_num_events)
    }

    pub fn resolve(
        &self,
        books: PerpBookAccounts,
        cfg: &GroupConfig,
    ) -> SdkResult<CreatePerpMarketParams> {
        Ok(CreatePerpMarketParams {
            group: pubkey_field("group", &self.group)?,
            oracle: pubkey_field("oracle", &self.oracle)?,
            books,
            reward_mint: cfg.reward_mint,
            signer_key: cfg.signer_key,
            maint_leverage: required_fixed("maint_leverage", &self.maint_leverage)?,
            init_leverage: required_fixed("init_leverage", &self.init_leverage)?,
            liquidation_fee: required_fixed("liquidation_fee", &self.liquidation_fee)?,
            maker_fee: required_fixed("maker_fee", &self.maker_fee)?,
            taker_fee: required_fixed("taker_fee", &self.taker_fee)?,
            base_lot_size: required_i64("base_lot_size", &self.base_lot_size)?,
            quote_lot_size: required_i64("quote_lot_size", &self.quote_lot_size)?,
            rate: required_fixed("rate", &self.rate)?,
            max_depth_bps: required_fixed("max_depth_bps", &self.max_depth_bps)?,
            target_period_length: required_u64(
                "target_period_length",
                &self.target_period_length,
            )?,
            reward_per_period: required_native_amount(
                "reward_per_period",
                &self.reward_per_period,
                cfg.reward_mint_decimals,
            )?,
            exp: required_u8("exp", &self.exp)?,
            version: required_u8("version", &self.version)?,
            lm_size_shift: required_u8("lm_size_shift", &self.lm_size_shift)?,
            base_decimals: required_u8("base_decimals", &self.base_decimals)?,
        })
    }
}

/// Raw fields for patching a perp market.
///
/// An empty or missing field leaves the on-chain value untouched; `"0"`
/// overwrites it with zero.
#[derive(Debug, Clone, Default)]
pub struct ChangePerpMarketFields {
    pub group: String,
    pub perp_market: String,
    pub maint_leverage: Option<String>,
    pub init_leverage: Option<String>,
    pub liquidation_fee: Option<String>,
    pub maker_fee: Option<String>,
    pub taker_fee: Option<String>,
    pub rate: Option<String>,
    pub max_depth_bps: Option<String>,
    pub target_period_length: Option<String>,
    pub reward_per_period: Option<String>,
    pub exp: Option<String>,
    pub version: Option<String>,
    pub lm_size_shift: Option<String>,
}

impl ChangePerpMarketFields {
    pub fn resolve(&self, reward_mint_decimals: u8) -> SdkResult<ChangePerpMarketParams> {
        Ok(ChangePerpMarketParams {
            group: pubkey_field("group", &self.group)?,
            perp_market: pubkey_field("perp_market", &self.perp_market)?,
            maint_leverage: patch_fixed("maint_leverage", &self.maint_leverage)?,
            init_leverage: patch_fixed("init_leverage", &self.init_leverage)?,
            liquidation_fee: patch_fixed("liquidation_fee", &self.liquidation_fee)?,
            maker_fee: patch_fixed("maker_fee", &self.maker_fee)?,
            taker_fee: patch_fixed("taker_fee", &self.taker_fee)?,
            rate: patch_fixed("rate", &self.rate)?,
            max_depth_bps: patch_fixed("max_depth_bps", &self.max_depth_bps)?,
            target_period_length: patch_u64(
                "target_period_length",
                &self.target_period_length,
            )?,
            reward_per_period: patch_native_amount(
                "reward_per_period",
                &self.reward_per_period,
                reward_mint_decimals,
            )?,
            exp: patch_u8("exp", &self.exp)?,
            version: patch_u8("version", &self.version)?,
            lm_size_shift: patch_u8("lm_size_shift", &self.lm_size_shift)?,
        })
    }
}

/// Raw fields for patching a spot market.
///
/// The root bank address is resolved by the surrounding application (it
/// lives in the group's on-chain state) and supplied as a field here.
#[derive(Debug, Clone, Default)]
pub struct ChangeSpotMarketFields {
    pub group: String,
    pub spot_market: String,
    pub root_bank: String,
    pub maint_leverage: Option<String>,
    pub init_leverage: Option<String>,
    pub liquidation_fee: Option<String>,
    pub optimal_util: Option<String>,
    pub optimal_rate: Option<String>,
    pub max_rate: Option<String>,
    pub version: Option<String>,
}

impl ChangeSpotMarketFields {
    pub fn resolve(&self) -> SdkResult<ChangeSpotMarketParams> {
        Ok(ChangeSpotMarketParams {
            group: pubkey_field("group", &self.group)?,
            spot_market: pubkey_field("spot_market", &self.spot_market)?,
            root_bank: pubkey_field("root_bank", &self.root_bank)?,
            maint_leverage: patch_fixed("maint_leverage", &self.maint_leverage)?,
            init_leverage: patch_fixed("init_leverage", &self.init_leverage)?,
            liquidation_fee: patch_fixed("liquidation_fee", &self.liquidation_fee)?,
            optimal_util: patch_fixed("optimal_util", &self.optimal_util)?,
            optimal_rate: patch_fixed("optimal_rate", &self.optimal_rate)?,
            max_rate: patch_fixed("max_rate", &self.max_rate)?,
            version: patch_u8("version", &self.version)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::program::registry::DeploymentRegistry;

    fn mainnet_group() -> GroupConfig {
        DeploymentRegistry::mainnet().groups()[0].clone()
    }

    #[test]
    fn test_add_oracle_resolve() {
        let fields = AddOracleFields {
            group: mainnet_group().group.to_string(),
            oracle: Pubkey::new_unique().to_string(),
        };
        let params = fields.resolve().unwrap();
        assert_eq!(params.group, mainnet_group().group);
    }

    #[test]
    fn test_invalid_pubkey_names_field() {
        let fields = AddOracleFields {
            group: "not-a-pubkey".to_string(),
            oracle: Pubkey::new_unique().to_string(),
        };
        match fields.resolve() {
            Err(SdkError::InvalidPubkey { field, .. }) => assert_eq!(field, "group"),
            other => panic!("expected InvalidPubkey, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_required_field_named() {
        let fields = CreatePerpMarketFields {
            group: Pubkey::new_unique().to_string(),
            oracle: Pubkey::new_unique().to_string(),
            maint_leverage: Some("20".to_string()),
            ..Default::default()
        };
        let books = PerpBookAccounts {
            event_queue: Pubkey::new_unique(),
            bids: Pubkey::new_unique(),
            asks: Pubkey::new_unique(),
        };
        match fields.resolve(books, &mainnet_group()) {
            Err(SdkError::MissingField(field)) => assert_eq!(field, "init_leverage"),
            other => panic!("expected MissingField, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_required_field_is_missing() {
        assert!(matches!(
            required_fixed("maint_leverage", &Some("  ".to_string())),
            Err(SdkError::MissingField(_))
        ));
    }

    #[test]
    fn test_change_perp_empty_fields_resolve_absent() {
        let fields = ChangePerpMarketFields {
            group: Pubkey::new_unique().to_string(),
            perp_market: Pubkey::new_unique().to_string(),
            ..Default::default()
        };
        let params = fields.resolve(6).unwrap();
        assert!(params.maint_leverage.is_absent());
        assert!(params.taker_fee.is_absent());
        assert!(params.target_period_length.is_absent());
        assert!(params.exp.is_absent());
    }

    #[test]
    fn test_change_perp_zero_is_explicit() {
        let fields = ChangePerpMarketFields {
            group: Pubkey::new_unique().to_string(),
            perp_market: Pubkey::new_unique().to_string(),
            taker_fee: Some("0".to_string()),
            ..Default::default()
        };
        let params = fields.resolve(6).unwrap();
        assert_eq!(params.taker_fee, PatchField::Value(I80F48::ZERO));
        assert!(params.maker_fee.is_absent());
    }

    #[test]
    fn test_change_perp_invalid_number_names_field() {
        let fields = ChangePerpMarketFields {
            group: Pubkey::new_unique().to_string(),
            perp_market: Pubkey::new_unique().to_string(),
            rate: Some("fast".to_string()),
            ..Default::default()
        };
        match fields.resolve(6) {
            Err(SdkError::InvalidNumberFormat { field, input }) => {
                assert_eq!(field, "rate");
                assert_eq!(input, "fast");
            }
            other => panic!("expected InvalidNumberFormat, got {:?}", other),
        }
    }

    #[test]
    fn test_reward_per_period_scaled_to_native() {
        let fields = ChangePerpMarketFields {
            group: Pubkey::new_unique().to_string(),
            perp_market: Pubkey::new_unique().to_string(),
            reward_per_period: Some("250".to_string()),
            ..Default::default()
        };
        let params = fields.resolve(6).unwrap();
        assert_eq!(params.reward_per_period, PatchField::Value(250_000_000));
    }

    #[test]
    fn test_change_spot_resolve() {
        let fields = ChangeSpotMarketFields {
            group: Pubkey::new_unique().to_string(),
            spot_market: Pubkey::new_unique().to_string(),
            root_bank: Pubkey::new_unique().to_string(),
            optimal_util: Some("0.7".to_string()),
            version: Some("1".to_string()),
            ..Default::default()
        };
        let params = fields.resolve().unwrap();
        assert_eq!(
            params.optimal_util,
            PatchField::Value(I80F48::parse("0.7").unwrap())
        );
        assert_eq!(params.version, PatchField::Value(1));
        assert!(params.max_rate.is_absent());
    }

    #[test]
    fn test_create_perp_full_resolve() {
        let fields = CreatePerpMarketFields {
            group: Pubkey::new_unique().to_string(),
            oracle: Pubkey::new_unique().to_string(),
            maint_leverage: Some("20".to_string()),
            init_leverage: Some("10".to_string()),
            liquidation_fee: Some("0.025".to_string()),
            maker_fee: Some("0".to_string()),
            taker_fee: Some("0.0005".to_string()),
            base_lot_size: Some("100".to_string()),
            quote_lot_size: Some("10".to_string()),
            max_num_events: Some("256".to_string()),
            rate: Some("0.00001".to_string()),
            max_depth_bps: Some("200".to_string()),
            exp: Some("4".to_string()),
            target_period_length: Some("3600".to_string()),
            reward_per_period: Some("0".to_string()),
            version: Some("0".to_string()),
            lm_size_shift: Some("0".to_string()),
            base_decimals: Some("9".to_string()),
        };
        let books = PerpBookAccounts {
            event_queue: Pubkey::new_unique(),
            bids: Pubkey::new_unique(),
            asks: Pubkey::new_unique(),
        };
        let cfg = mainnet_group();

        assert_eq!(fields.max_events().unwrap(), 256);

        let params = fields.resolve(books, &cfg).unwrap();
        assert_eq!(params.reward_mint, cfg.reward_mint);
        assert_eq!(params.signer_key, cfg.signer_key);
        assert_eq!(params.base_lot_size, 100);
        assert_eq!(params.reward_per_period, 0);
        assert_eq!(params.maker_fee, I80F48::ZERO);
    }
}
