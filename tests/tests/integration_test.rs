use rebase_bridge::Amount as BridgeAmount;
use rebase_integration_tests::*;
use rebase_token::{Amount, PRECISION};
use rebase_vault::{Amount as VaultAmount, Error as VaultError};
use soroban_sdk::{testutils::Address as _, Address};

#[test]
fn test_deposit_accrues_linearly() {
    let ctx = setup_test();

    ctx.vault.deposit(&ctx.user1, &100_000);
    ctx.warp(DAY);

    let expected = 100_000 + 100_000 * RATE * DAY as i128 / PRECISION;
    let balance = ctx.ledger.balance(&ctx.user1);
    assert!((balance - expected).abs() <= 1);

    // Equal-length intervals add equal interest
    let b1 = ctx.ledger.balance(&ctx.user1);
    ctx.warp(DAY);
    let b2 = ctx.ledger.balance(&ctx.user1);
    ctx.warp(DAY);
    let b3 = ctx.ledger.balance(&ctx.user1);
    assert!(((b2 - b1) - (b3 - b2)).abs() <= 1);

    // Reads never touched storage
    assert_eq!(ctx.ledger.principal_balance(&ctx.user1), 100_000);
    assert_eq!(ctx.ledger.last_accrual(&ctx.user1), START);
}

#[test]
fn test_deposit_then_redeem_all_is_exact() {
    let ctx = setup_test();

    ctx.vault.deposit(&ctx.user1, &100_000);
    let redeemed = ctx.vault.redeem(&ctx.user1, &VaultAmount::All);

    assert_eq!(redeemed, 100_000);
    assert_eq!(ctx.ledger.balance(&ctx.user1), 0);
    assert_eq!(ctx.ledger.principal_balance(&ctx.user1), 0);
    assert_eq!(ctx.base.balance(&ctx.user1), USER_FUNDS);
}

#[test]
fn test_transfer_after_rate_cut_keeps_original_rate() {
    let ctx = setup_test();

    ctx.vault.deposit(&ctx.user1, &100_000);
    ctx.ledger.set_global_rate(&LOWER_RATE);

    ctx.ledger
        .transfer(&ctx.user1, &ctx.user2, &Amount::Exact(50_000));

    assert_eq!(ctx.ledger.locked_rate(&ctx.user2), RATE);
    assert_eq!(ctx.ledger.global_rate(), LOWER_RATE);

    // New deposits lock the lowered rate
    let user3 = Address::generate(&ctx.env);
    ctx.base_admin.mint(&user3, &10_000);
    ctx.vault.deposit(&user3, &10_000);
    assert_eq!(ctx.ledger.locked_rate(&user3), LOWER_RATE);
}

#[test]
fn test_rate_cannot_rise() {
    let ctx = setup_test();

    ctx.ledger.set_global_rate(&LOWER_RATE);
    assert!(ctx.ledger.try_set_global_rate(&RATE).is_err());
    assert_eq!(ctx.ledger.global_rate(), LOWER_RATE);
}

#[test]
fn test_interleaved_operations_conserve_principal() {
    let ctx = setup_test();

    ctx.vault.deposit(&ctx.user1, &100_000);
    ctx.warp(DAY);

    ctx.ledger.set_global_rate(&LOWER_RATE);
    ctx.vault.deposit(&ctx.user2, &50_000);
    ctx.warp(DAY);

    let sender_before = ctx.ledger.balance(&ctx.user1);
    let recipient_before = ctx.ledger.balance(&ctx.user2);

    ctx.ledger
        .transfer(&ctx.user1, &ctx.user2, &Amount::Exact(25_000));

    // Post-realization principal moves one-for-one
    assert_eq!(ctx.ledger.principal_balance(&ctx.user1), sender_before - 25_000);
    assert_eq!(ctx.ledger.principal_balance(&ctx.user2), recipient_before + 25_000);
    assert_eq!(ctx.ledger.locked_rate(&ctx.user2), LOWER_RATE);

    let total = ctx.ledger.principal_balance(&ctx.user1) + ctx.ledger.principal_balance(&ctx.user2);
    assert_eq!(ctx.ledger.total_principal(), total);
    assert_eq!(total, sender_before + recipient_before);
}

#[test]
fn test_recipient_redeems_inherited_balance() {
    let ctx = setup_test();

    ctx.vault.deposit(&ctx.user1, &100_000);
    ctx.ledger.transfer(&ctx.user1, &ctx.user2, &Amount::All);

    let redeemed = ctx.vault.redeem(&ctx.user2, &VaultAmount::All);
    assert_eq!(redeemed, 100_000);
    assert_eq!(ctx.base.balance(&ctx.user2), USER_FUNDS + 100_000);
    assert_eq!(ctx.vault.reserves(), 0);
}

#[test]
fn test_unfunded_interest_blocks_full_redeem() {
    let ctx = setup_test();

    ctx.vault.deposit(&ctx.user1, &100_000);
    ctx.warp(DAY);

    let result = ctx.vault.try_redeem(&ctx.user1, &VaultAmount::All);
    assert_eq!(result, Err(Ok(VaultError::ReleaseFailed)));
    assert_eq!(ctx.ledger.last_accrual(&ctx.user1), START);

    // Principal-sized redemption still succeeds
    let redeemed = ctx.vault.redeem(&ctx.user1, &VaultAmount::Exact(100_000));
    assert_eq!(redeemed, 100_000);
    assert_eq!(ctx.ledger.principal_balance(&ctx.user1), 432);
    assert_eq!(ctx.ledger.last_accrual(&ctx.user1), ctx.now());
}

#[test]
fn test_bridge_issues_at_remote_rate() {
    let ctx = setup_test();
    let (remote_ledger, remote_bridge) = ctx.deploy_remote(DOMAIN + 1, LOWER_RATE);

    ctx.vault.deposit(&ctx.user1, &100_000);
    ctx.warp(DAY);

    let nonce = ctx
        .bridge
        .send(&ctx.user1, &(DOMAIN + 1), &ctx.user2, &BridgeAmount::All);
    let message = ctx.bridge.outbound(&nonce);
    assert_eq!(message.amount, 100_432);
    assert_eq!(ctx.ledger.balance(&ctx.user1), 0);

    ctx.warp(3_600);
    assert!(remote_bridge.receive(&message));
    assert!(!remote_bridge.receive(&message));

    assert_eq!(remote_ledger.principal_balance(&ctx.user2), 100_432);
    assert_eq!(remote_ledger.locked_rate(&ctx.user2), LOWER_RATE);
    assert_eq!(remote_ledger.last_accrual(&ctx.user2), ctx.now());
    assert_eq!(ctx.ledger.total_principal(), 0);
}
