//! Shared deployment for cross-contract scenarios.

use rebase_bridge::{RebaseBridge, RebaseBridgeClient};
use rebase_token::{RebaseToken, RebaseTokenClient};
use rebase_vault::{RebaseVault, RebaseVaultClient};
use soroban_sdk::{
    testutils::{Address as _, Ledger},
    token::{StellarAssetClient, TokenClient},
    Address, Env, String,
};

pub const RATE: i128 = 50_000_000_000; // 5e10 per second
pub const LOWER_RATE: i128 = 40_000_000_000;
pub const START: u64 = 1_000;
pub const DAY: u64 = 86_400;
pub const USER_FUNDS: i128 = 1_000_000;
pub const DOMAIN: u32 = 1;

pub struct TestContext<'a> {
    pub env: Env,
    pub admin: Address,
    pub relayer: Address,
    pub user1: Address,
    pub user2: Address,
    pub base: TokenClient<'a>,
    pub base_admin: StellarAssetClient<'a>,
    pub ledger: RebaseTokenClient<'a>,
    pub vault: RebaseVaultClient<'a>,
    pub bridge: RebaseBridgeClient<'a>,
}

impl<'a> TestContext<'a> {
    pub fn warp(&self, seconds: u64) {
        self.env.ledger().with_mut(|li| li.timestamp += seconds);
    }

    pub fn now(&self) -> u64 {
        self.env.ledger().timestamp()
    }

    /// Deploy a second ledger with its own bridge adapter, sharing this relayer
    pub fn deploy_remote(&self, domain: u32, rate: i128) -> (RebaseTokenClient<'a>, RebaseBridgeClient<'a>) {
        let ledger = deploy_ledger(&self.env, &self.admin, rate);
        let bridge = deploy_bridge(&self.env, &self.admin, &ledger, &self.relayer, domain);
        (ledger, bridge)
    }
}

pub fn setup_test<'a>() -> TestContext<'a> {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().with_mut(|li| li.timestamp = START);

    let admin = Address::generate(&env);
    let relayer = Address::generate(&env);
    let user1 = Address::generate(&env);
    let user2 = Address::generate(&env);

    // Base asset (Stellar Asset Contract)
    let base_id = env
        .register_stellar_asset_contract_v2(admin.clone())
        .address();
    let base_admin = StellarAssetClient::new(&env, &base_id);
    base_admin.mint(&user1, &USER_FUNDS);
    base_admin.mint(&user2, &USER_FUNDS);

    let ledger = deploy_ledger(&env, &admin, RATE);

    let vault_id = env.register(RebaseVault, ());
    let vault = RebaseVaultClient::new(&env, &vault_id);
    vault.initialize(&admin, &base_id, &ledger.address);
    ledger.grant_mint_and_burn_role(&vault_id);

    let bridge = deploy_bridge(&env, &admin, &ledger, &relayer, DOMAIN);

    let base = TokenClient::new(&env, &base_id);

    TestContext {
        env,
        admin,
        relayer,
        user1,
        user2,
        base,
        base_admin,
        ledger,
        vault,
        bridge,
    }
}

fn deploy_ledger<'a>(env: &Env, admin: &Address, rate: i128) -> RebaseTokenClient<'a> {
    let ledger_id = env.register(RebaseToken, ());
    let ledger = RebaseTokenClient::new(env, &ledger_id);
    ledger.initialize(
        admin,
        &String::from_str(env, "Rebase Token"),
        &String::from_str(env, "RBT"),
        &7u32,
        &rate,
    );
    ledger
}

fn deploy_bridge<'a>(
    env: &Env,
    admin: &Address,
    ledger: &RebaseTokenClient,
    relayer: &Address,
    domain: u32,
) -> RebaseBridgeClient<'a> {
    let bridge_id = env.register(RebaseBridge, ());
    let bridge = RebaseBridgeClient::new(env, &bridge_id);
    bridge.initialize(admin, &ledger.address, relayer, &domain);
    ledger.grant_mint_and_burn_role(&bridge_id);
    bridge
}
