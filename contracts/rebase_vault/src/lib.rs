#![no_std]

mod error;
mod events;
mod ledger;
mod storage;

pub use error::Error;
pub use ledger::Amount;

use events::*;
use ledger::LedgerClient;
use storage::DataKey;

use soroban_sdk::{contract, contractimpl, log, token, Address, Env, Symbol};

#[contract]
pub struct RebaseVault;

#[contractimpl]
impl RebaseVault {
    // ============================================
    // INITIALIZATION & ADMIN
    // ============================================

    /// Initialize the vault
    ///
    /// The vault must separately be granted the mint-and-burn role on `ledger`.
    ///
    /// # Errors
    /// - `AlreadyInitialized`: Contract already initialized
    pub fn initialize(
        env: Env,
        admin: Address,
        base_asset: Address,
        ledger: Address,
    ) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::AlreadyInitialized);
        }

        admin.require_auth();

        env.storage().instance().set(&DataKey::Initialized, &true);
        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage().instance().set(&DataKey::BaseAsset, &base_asset);
        env.storage().instance().set(&DataKey::Ledger, &ledger);
        env.storage().instance().set(&DataKey::Paused, &false);

        Ok(())
    }

    /// Pause deposits and redemptions (emergency)
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    pub fn pause(env: Env) -> Result<(), Error> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)?;
        admin.require_auth();

        env.storage().instance().set(&DataKey::Paused, &true);
        Ok(())
    }

    /// Unpause contract
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    pub fn unpause(env: Env) -> Result<(), Error> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)?;
        admin.require_auth();

        env.storage().instance().set(&DataKey::Paused, &false);
        Ok(())
    }

    // ============================================
    // DEPOSIT
    // ============================================

    /// Lock `amount` of base asset and issue the same principal at the
    /// ledger's current global rate
    ///
    /// # Errors
    /// - `ContractPaused`: Contract is paused
    /// - `ZeroAmount`: Amount is zero
    /// - `InvalidAmount`: Amount is negative
    /// - `NotInitialized`: Contract not initialized
    pub fn deposit(env: Env, user: Address, amount: i128) -> Result<(), Error> {
        Self::check_not_paused(&env)?;

        if amount == 0 {
            return Err(Error::ZeroAmount);
        }
        if amount < 0 {
            return Err(Error::InvalidAmount);
        }

        user.require_auth();

        let base_asset = Self::base_asset(env.clone())?;
        let ledger = LedgerClient::new(&env, &Self::ledger(env.clone())?);
        let vault = env.current_contract_address();

        token::Client::new(&env, &base_asset).transfer(&user, &vault, &amount);

        let rate = ledger.global_rate();
        ledger.issue(&vault, &user, &amount, &rate);

        env.events().publish(
            (Symbol::new(&env, "deposit"), user.clone()),
            DepositEvent { user, amount, rate },
        );

        Ok(())
    }

    // ============================================
    // REDEEM
    // ============================================

    /// Burn ledger balance and release the same amount of base asset
    ///
    /// `Amount::All` redeems the full effective balance. If the release
    /// fails the call returns `ReleaseFailed` and the burn is discarded with
    /// the rest of the invocation.
    ///
    /// # Errors
    /// - `ContractPaused`: Contract is paused
    /// - `ZeroAmount`: Nothing to redeem
    /// - `InvalidAmount`: Exact amount is negative
    /// - `NotInitialized`: Contract not initialized
    /// - `ReleaseFailed`: Vault could not pay out the base asset
    pub fn redeem(env: Env, user: Address, amount: Amount) -> Result<i128, Error> {
        Self::check_not_paused(&env)?;

        user.require_auth();

        let base_asset = Self::base_asset(env.clone())?;
        let ledger = LedgerClient::new(&env, &Self::ledger(env.clone())?);
        let vault = env.current_contract_address();

        let requested = match amount {
            Amount::Exact(value) => value,
            Amount::All => ledger.balance(&user),
        };

        if requested == 0 {
            return Err(Error::ZeroAmount);
        }
        if requested < 0 {
            return Err(Error::InvalidAmount);
        }

        let burned = ledger.burn(&vault, &user, &Amount::Exact(requested));

        let released = token::Client::new(&env, &base_asset).try_transfer(&vault, &user, &burned);
        if !matches!(released, Ok(Ok(()))) {
            log!(&env, "base asset release failed", user, burned);
            return Err(Error::ReleaseFailed);
        }

        env.events().publish(
            (Symbol::new(&env, "redeem"), user.clone()),
            RedeemEvent {
                user,
                amount: burned,
            },
        );

        Ok(burned)
    }

    // ============================================
    // REWARDS
    // ============================================

    /// Add base asset that backs accrued interest
    ///
    /// # Errors
    /// - `ZeroAmount`: Amount is zero
    /// - `InvalidAmount`: Amount is negative
    /// - `NotInitialized`: Contract not initialized
    pub fn fund_rewards(env: Env, from: Address, amount: i128) -> Result<(), Error> {
        if amount == 0 {
            return Err(Error::ZeroAmount);
        }
        if amount < 0 {
            return Err(Error::InvalidAmount);
        }

        from.require_auth();

        let base_asset = Self::base_asset(env.clone())?;
        token::Client::new(&env, &base_asset).transfer(
            &from,
            &env.current_contract_address(),
            &amount,
        );

        env.events().publish(
            (Symbol::new(&env, "rewards_funded"), from.clone()),
            RewardsFundedEvent { from, amount },
        );

        Ok(())
    }

    // ============================================
    // VIEW FUNCTIONS
    // ============================================

    pub fn base_asset(env: Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::BaseAsset)
            .ok_or(Error::NotInitialized)
    }

    pub fn ledger(env: Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Ledger)
            .ok_or(Error::NotInitialized)
    }

    /// Base asset currently held by the vault
    pub fn reserves(env: Env) -> Result<i128, Error> {
        let base_asset = Self::base_asset(env.clone())?;
        Ok(token::Client::new(&env, &base_asset).balance(&env.current_contract_address()))
    }

    pub fn is_paused(env: Env) -> bool {
        env.storage()
            .instance()
            .get::<DataKey, bool>(&DataKey::Paused)
            .unwrap_or(false)
    }

    // ============================================
    // INTERNAL HELPERS
    // ============================================

    fn check_not_paused(env: &Env) -> Result<(), Error> {
        let paused = env
            .storage()
            .instance()
            .get::<DataKey, bool>(&DataKey::Paused)
            .unwrap_or(false);

        if paused {
            return Err(Error::ContractPaused);
        }
        Ok(())
    }
}
