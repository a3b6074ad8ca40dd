//! End-to-end composition flows: catalog gating, patch semantics on the
//! wire, and the provisioning funding gate.

use mango_gov_sdk::prelude::*;
use solana_pubkey::Pubkey;

fn exchange_target(composer: &Composer) -> GovernanceTarget {
    GovernanceTarget {
        authority: Pubkey::new_unique(),
        governed_account: composer.registry().groups()[0].program_id,
    }
}

fn change_perp_fields(composer: &Composer) -> ChangePerpMarketFields {
    ChangePerpMarketFields {
        group: composer.registry().groups()[0].group.to_string(),
        perp_market: Pubkey::new_unique().to_string(),
        ..Default::default()
    }
}

#[test]
fn scenario_a_allow_listed_target_gets_full_catalog() {
    let composer = Composer::mainnet();
    let target = exchange_target(&composer);

    // realm authority matches the target authority
    let ops = composer.available_operations(&target, Some(&target.authority));
    assert_eq!(
        ops,
        vec![
            Operation::SetGovernanceConfig,
            Operation::SetRealmConfig,
            Operation::AddOracle,
            Operation::AddSpotMarket,
            Operation::CreatePerpMarket,
            Operation::ChangePerpMarketParams,
            Operation::ChangeSpotMarketParams,
        ]
    );

    // the order is stable across calls
    assert_eq!(
        ops,
        composer.available_operations(&target, Some(&target.authority))
    );

    // a target outside the allow-list never sees exchange operations
    let outsider = GovernanceTarget {
        authority: Pubkey::new_unique(),
        governed_account: Pubkey::new_unique(),
    };
    let ops = composer.available_operations(&outsider, None);
    assert_eq!(ops, vec![Operation::SetGovernanceConfig]);
}

#[test]
fn scenario_b_change_perp_with_all_fields_empty_encodes_all_absent() {
    let composer = Composer::mainnet();
    let target = exchange_target(&composer);
    let cfg = composer.registry().groups()[0].clone();

    let params = change_perp_fields(&composer)
        .resolve(cfg.reward_mint_decimals)
        .unwrap();
    let ix = composer
        .compose(
            &target,
            None,
            &OperationRequest::ChangePerpMarketParams(params),
        )
        .unwrap();

    // discriminator, then twelve absent optionals: every byte zero
    assert_eq!(ix.data.len(), 147);
    assert!(ix.data[4..].iter().all(|b| *b == 0));
}

#[test]
fn scenario_c_change_perp_with_zero_taker_fee_encodes_one_explicit_zero() {
    let composer = Composer::mainnet();
    let target = exchange_target(&composer);
    let cfg = composer.registry().groups()[0].clone();

    let mut fields = change_perp_fields(&composer);
    fields.taker_fee = Some("0".to_string());

    let params = fields.resolve(cfg.reward_mint_decimals).unwrap();
    assert_eq!(params.taker_fee, PatchField::Value(I80F48::ZERO));
    assert!(params.maker_fee.is_absent());

    let ix = composer
        .compose(
            &target,
            None,
            &OperationRequest::ChangePerpMarketParams(params),
        )
        .unwrap();

    // taker fee is the fifth optional field: tag at 4 + 4*17
    let taker_tag = 4 + 4 * 17;
    assert_eq!(ix.data[taker_tag], 1);
    assert!(ix.data[taker_tag + 1..taker_tag + 17].iter().all(|b| *b == 0));

    // every other field stays absent
    assert!(ix.data[4..taker_tag].iter().all(|b| *b == 0));
    assert!(ix.data[taker_tag + 17..].iter().all(|b| *b == 0));
}

#[test]
fn scenario_d_insufficient_funds_stops_before_any_builder_runs() {
    let composer = Composer::mainnet();
    let target = exchange_target(&composer);
    let cfg = composer.registry().groups()[0].clone();

    // plan a spot listing: base vault + node bank + root bank
    let base_mint = Pubkey::new_unique();
    let specs = spot_listing_specs(base_mint, cfg.signer_key);
    let rents = [2_039_280u64, 1_392_000, 3_842_880];
    let entries: Vec<(Pubkey, AccountSpec, u64)> = specs
        .iter()
        .zip(rents)
        .map(|(spec, rent)| (Pubkey::new_unique(), spec.clone(), rent))
        .collect();
    let plan = ProvisionPlan::new(Pubkey::new_unique(), cfg.program_id, entries);

    // the payer cannot cover rent: the flow must stop here, with no
    // addresses handed to a builder
    let listing = build_spot_listing(&composer, &target, &cfg, &plan, 1_000_000);
    match listing {
        Err(SdkError::InsufficientFunds {
            required,
            available,
        }) => {
            assert_eq!(required, rents.iter().sum::<u64>());
            assert_eq!(available, 1_000_000);
        }
        other => panic!("expected InsufficientFunds, got {:?}", other),
    }

    // with enough balance the same flow composes the instruction
    let ix = build_spot_listing(&composer, &target, &cfg, &plan, 10_000_000_000).unwrap();
    assert_eq!(ix.program_id, cfg.program_id);
    assert_eq!(ix.accounts.len(), 9);
    assert_eq!(ix.data.len(), 100);
}

/// The caller-side provisioning flow: funding check first, builder last.
fn build_spot_listing(
    composer: &Composer,
    target: &GovernanceTarget,
    cfg: &GroupConfig,
    plan: &ProvisionPlan,
    available: u64,
) -> SdkResult<solana_instruction::Instruction> {
    plan.check_funding(available)?;

    let banks = SpotBankAccounts {
        base_vault: plan.entries()[0].pubkey,
        node_bank: plan.entries()[1].pubkey,
        root_bank: plan.entries()[2].pubkey,
    };

    let fields = AddSpotMarketFields {
        group: cfg.group.to_string(),
        oracle: Pubkey::new_unique().to_string(),
        spot_market: Pubkey::new_unique().to_string(),
        maint_leverage: Some("10".to_string()),
        init_leverage: Some("5".to_string()),
        liquidation_fee: Some("0.05".to_string()),
        optimal_util: Some("0.7".to_string()),
        optimal_rate: Some("0.06".to_string()),
        max_rate: Some("1.5".to_string()),
    };
    let params = fields.resolve(Pubkey::new_unique(), banks, cfg)?;

    composer.compose(target, None, &OperationRequest::AddSpotMarket(params))
}

#[test]
fn create_perp_market_flow_derives_market_from_provisioned_books() {
    let composer = Composer::mainnet();
    let target = exchange_target(&composer);
    let cfg = composer.registry().groups()[0].clone();

    let fields = CreatePerpMarketFields {
        group: cfg.group.to_string(),
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

    // provisioning would create these three accounts sized off the fields
    let specs = perp_book_specs(fields.max_events().unwrap());
    assert_eq!(specs[0].space(), 32 + 256 * 200);

    let books = PerpBookAccounts {
        event_queue: Pubkey::new_unique(),
        bids: Pubkey::new_unique(),
        asks: Pubkey::new_unique(),
    };
    let params = fields.resolve(books, &cfg).unwrap();

    let ix = composer
        .compose(&target, None, &OperationRequest::CreatePerpMarket(params))
        .unwrap();

    assert_eq!(ix.accounts.len(), 13);
    assert_eq!(ix.data.len(), 152);
    assert_eq!(ix.accounts[3].pubkey, books.event_queue);
    assert_eq!(ix.accounts[4].pubkey, books.bids);
    assert_eq!(ix.accounts[5].pubkey, books.asks);
    // authority signs
    assert_eq!(ix.accounts[8].pubkey, target.authority);
    assert!(ix.accounts[8].is_signer);
}

#[test]
fn composing_twice_yields_byte_identical_instructions() {
    let composer = Composer::mainnet();
    let target = exchange_target(&composer);
    let cfg = composer.registry().groups()[0].clone();

    let mut fields = change_perp_fields(&composer);
    fields.rate = Some("0.00001".to_string());
    fields.version = Some("1".to_string());
    let params = fields.resolve(cfg.reward_mint_decimals).unwrap();

    let request = OperationRequest::ChangePerpMarketParams(params);
    let a = composer.compose(&target, None, &request).unwrap();
    let b = composer.compose(&target, None, &request).unwrap();

    assert_eq!(a.data, b.data);
    assert_eq!(a.accounts, b.accounts);
    assert_eq!(a.program_id, b.program_id);
}
