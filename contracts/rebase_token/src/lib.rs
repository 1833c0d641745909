#![no_std]

mod accrual;
mod error;
mod events;
mod storage;

pub use error::Error;
pub use storage::{Account, Amount, PRECISION, UNLIMITED_ALLOWANCE};

use accrual::effective_balance;
use events::*;
use storage::{
    has_minter_role, read_account, read_allowance, read_total_principal, write_account,
    write_allowance, write_total_principal, DataKey,
};

use soroban_sdk::{contract, contractimpl, log, Address, Env, String, Symbol};

#[contract]
pub struct RebaseToken;

#[contractimpl]
impl RebaseToken {
    // ============================================
    // INITIALIZATION & ADMIN
    // ============================================

    /// Initialize the token contract
    ///
    /// # Errors
    /// - `AlreadyInitialized`: Contract already initialized
    /// - `InvalidRate`: Starting global rate is negative
    pub fn initialize(
        env: Env,
        admin: Address,
        name: String,
        symbol: String,
        decimals: u32,
        global_rate: i128,
    ) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::AlreadyInitialized);
        }

        if global_rate < 0 {
            return Err(Error::InvalidRate);
        }

        admin.require_auth();

        env.storage().instance().set(&DataKey::Initialized, &true);
        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage().instance().set(&DataKey::Name, &name);
        env.storage().instance().set(&DataKey::Symbol, &symbol);
        env.storage().instance().set(&DataKey::Decimals, &decimals);
        env.storage().instance().set(&DataKey::GlobalRate, &global_rate);
        write_total_principal(&env, 0);

        Ok(())
    }

    /// Lower the rate offered to new issuances
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `InvalidRate`: New rate is negative
    /// - `RateIncreaseRejected`: New rate is above the current one
    pub fn set_global_rate(env: Env, new_rate: i128) -> Result<(), Error> {
        let admin = Self::read_admin(&env)?;
        admin.require_auth();

        if new_rate < 0 {
            return Err(Error::InvalidRate);
        }

        let old_rate: i128 = env
            .storage()
            .instance()
            .get(&DataKey::GlobalRate)
            .ok_or(Error::NotInitialized)?;

        if new_rate > old_rate {
            log!(&env, "rate increase rejected", old_rate, new_rate);
            return Err(Error::RateIncreaseRejected);
        }

        env.storage().instance().set(&DataKey::GlobalRate, &new_rate);

        env.events().publish(
            (Symbol::new(&env, "rate_changed"),),
            RateChangedEvent { old_rate, new_rate },
        );

        Ok(())
    }

    /// Allow `account` to issue and burn (vault, bridge adapters)
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    pub fn grant_mint_and_burn_role(env: Env, account: Address) -> Result<(), Error> {
        let admin = Self::read_admin(&env)?;
        admin.require_auth();

        env.storage()
            .instance()
            .set(&DataKey::Minter(account.clone()), &true);

        env.events().publish(
            (Symbol::new(&env, "role_granted"), account.clone()),
            RoleEvent { account },
        );

        Ok(())
    }

    /// Withdraw the mint-and-burn role
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    pub fn revoke_mint_and_burn_role(env: Env, account: Address) -> Result<(), Error> {
        let admin = Self::read_admin(&env)?;
        admin.require_auth();

        env.storage()
            .instance()
            .remove(&DataKey::Minter(account.clone()));

        env.events().publish(
            (Symbol::new(&env, "role_revoked"), account.clone()),
            RoleEvent { account },
        );

        Ok(())
    }

    // ============================================
    // ISSUANCE & BURN (MINTER ROLE)
    // ============================================

    /// Issue principal to `to`, locking it at `rate`
    ///
    /// Accrued interest is realized first, then the rate is re-locked
    /// unconditionally.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `Unauthorized`: `minter` lacks the mint-and-burn role
    /// - `InvalidAmount`: Amount is negative
    /// - `InvalidRate`: Rate is negative
    pub fn issue(
        env: Env,
        minter: Address,
        to: Address,
        amount: i128,
        rate: i128,
    ) -> Result<(), Error> {
        Self::require_minter(&env, &minter)?;

        if amount < 0 {
            return Err(Error::InvalidAmount);
        }
        if rate < 0 {
            return Err(Error::InvalidRate);
        }

        let now = env.ledger().timestamp();
        let mut account = Self::realize(&env, &to, now)?;

        account.locked_rate = rate;
        account.principal = account
            .principal
            .checked_add(amount)
            .ok_or(Error::ArithmeticOverflow)?;
        write_account(&env, &to, &account);
        Self::adjust_total_principal(&env, amount)?;

        env.events().publish(
            (Symbol::new(&env, "issue"), to.clone()),
            IssueEvent {
                minter,
                to,
                amount,
                rate,
            },
        );

        Ok(())
    }

    /// Burn from `from`, returning the amount actually burned
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `Unauthorized`: `minter` lacks the mint-and-burn role
    /// - `InvalidAmount`: Exact amount is negative
    /// - `InsufficientBalance`: Amount exceeds realized principal
    pub fn burn(env: Env, minter: Address, from: Address, amount: Amount) -> Result<i128, Error> {
        Self::require_minter(&env, &minter)?;

        let now = env.ledger().timestamp();
        let mut account = Self::realize(&env, &from, now)?;
        let resolved = Self::resolve(&amount, &account)?;

        if account.principal < resolved {
            return Err(Error::InsufficientBalance);
        }

        account.principal -= resolved;
        write_account(&env, &from, &account);
        Self::adjust_total_principal(&env, -resolved)?;

        env.events().publish(
            (Symbol::new(&env, "burn"), from.clone()),
            BurnEvent {
                minter,
                from,
                amount: resolved,
            },
        );

        Ok(resolved)
    }

    // ============================================
    // TRANSFERS & ALLOWANCES
    // ============================================

    /// Move balance from `from` to `to`
    ///
    /// A recipient holding nothing inherits the sender's locked rate.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `InvalidAmount`: Exact amount is negative
    /// - `InsufficientBalance`: Amount exceeds sender's realized principal
    pub fn transfer(env: Env, from: Address, to: Address, amount: Amount) -> Result<(), Error> {
        Self::require_initialized(&env)?;
        from.require_auth();

        let now = env.ledger().timestamp();
        let (sender, recipient, resolved) = Self::reconcile_pair(&env, &from, &to, &amount, now)?;
        Self::move_principal(&env, &from, &to, &sender, &recipient, resolved)?;

        Ok(())
    }

    /// Move balance on behalf of `from` using `spender`'s allowance
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `InvalidAmount`: Exact amount is negative
    /// - `InsufficientAllowance`: Allowance below the resolved amount
    /// - `InsufficientBalance`: Amount exceeds sender's realized principal
    pub fn transfer_from(
        env: Env,
        spender: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<(), Error> {
        Self::require_initialized(&env)?;
        spender.require_auth();

        let now = env.ledger().timestamp();
        let (sender, recipient, resolved) = Self::reconcile_pair(&env, &from, &to, &amount, now)?;

        let allowance = read_allowance(&env, &from, &spender);
        if allowance < resolved {
            return Err(Error::InsufficientAllowance);
        }
        if allowance != UNLIMITED_ALLOWANCE {
            write_allowance(&env, &from, &spender, allowance - resolved);
        }

        Self::move_principal(&env, &from, &to, &sender, &recipient, resolved)?;

        Ok(())
    }

    /// Set `spender`'s allowance over `from` (`i128::MAX` = unlimited)
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `InvalidAmount`: Amount is negative
    pub fn approve(env: Env, from: Address, spender: Address, amount: i128) -> Result<(), Error> {
        Self::require_initialized(&env)?;
        from.require_auth();

        if amount < 0 {
            return Err(Error::InvalidAmount);
        }

        write_allowance(&env, &from, &spender, amount);

        env.events().publish(
            (Symbol::new(&env, "approve"), from.clone(), spender.clone()),
            ApproveEvent {
                from,
                spender,
                amount,
            },
        );

        Ok(())
    }

    // ============================================
    // VIEW FUNCTIONS
    // ============================================

    /// Effective balance: principal plus interest accrued since last realization
    ///
    /// # Errors
    /// - `ArithmeticOverflow`: Grown balance does not fit in `i128`
    pub fn balance(env: Env, id: Address) -> Result<i128, Error> {
        let account = read_account(&env, &id);
        effective_balance(&env, &account, env.ledger().timestamp())
    }

    /// Stored principal, excluding unrealized interest
    pub fn principal_balance(env: Env, id: Address) -> i128 {
        read_account(&env, &id).principal
    }

    pub fn locked_rate(env: Env, id: Address) -> i128 {
        read_account(&env, &id).locked_rate
    }

    pub fn last_accrual(env: Env, id: Address) -> u64 {
        read_account(&env, &id).last_accrual
    }

    pub fn account(env: Env, id: Address) -> Account {
        read_account(&env, &id)
    }

    pub fn allowance(env: Env, from: Address, spender: Address) -> i128 {
        read_allowance(&env, &from, &spender)
    }

    pub fn global_rate(env: Env) -> Result<i128, Error> {
        env.storage()
            .instance()
            .get(&DataKey::GlobalRate)
            .ok_or(Error::NotInitialized)
    }

    /// Sum of all principals (realized supply)
    pub fn total_principal(env: Env) -> i128 {
        read_total_principal(&env)
    }

    pub fn is_minter(env: Env, account: Address) -> bool {
        has_minter_role(&env, &account)
    }

    pub fn admin(env: Env) -> Result<Address, Error> {
        Self::read_admin(&env)
    }

    pub fn name(env: Env) -> Result<String, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Name)
            .ok_or(Error::NotInitialized)
    }

    pub fn symbol(env: Env) -> Result<String, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Symbol)
            .ok_or(Error::NotInitialized)
    }

    pub fn decimals(env: Env) -> Result<u32, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Decimals)
            .ok_or(Error::NotInitialized)
    }

    // ============================================
    // INTERNAL HELPERS
    // ============================================

    fn read_admin(env: &Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)
    }

    fn require_initialized(env: &Env) -> Result<(), Error> {
        if !env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::NotInitialized);
        }
        Ok(())
    }

    fn require_minter(env: &Env, minter: &Address) -> Result<(), Error> {
        Self::require_initialized(env)?;
        minter.require_auth();

        if !has_minter_role(env, minter) {
            return Err(Error::Unauthorized);
        }
        Ok(())
    }

    /// Fold accrued interest into principal and restart the clock at `now`
    ///
    /// The clock advances even when nothing accrued, so a zero-rate or empty
    /// account never carries a stale backlog into its next issuance.
    fn realize(env: &Env, user: &Address, now: u64) -> Result<Account, Error> {
        let mut account = read_account(env, user);
        let effective = effective_balance(env, &account, now)?;
        let delta = effective - account.principal;

        if delta > 0 {
            account.principal = effective;
            Self::adjust_total_principal(env, delta)?;

            log!(env, "realized interest", user.clone(), delta);
            env.events().publish(
                (Symbol::new(env, "interest"), user.clone()),
                InterestEvent {
                    user: user.clone(),
                    amount: delta,
                },
            );
        }

        account.last_accrual = now;
        write_account(env, user, &account);

        Ok(account)
    }

    /// Realized effective balance equals principal, so `All` takes principal.
    fn resolve(amount: &Amount, realized: &Account) -> Result<i128, Error> {
        let resolved = match amount {
            Amount::Exact(value) => *value,
            Amount::All => realized.principal,
        };

        if resolved < 0 {
            return Err(Error::InvalidAmount);
        }
        Ok(resolved)
    }

    /// Realize sender then recipient at the same instant and resolve the amount
    fn reconcile_pair(
        env: &Env,
        from: &Address,
        to: &Address,
        amount: &Amount,
        now: u64,
    ) -> Result<(Account, Account, i128), Error> {
        let sender = Self::realize(env, from, now)?;
        let recipient = Self::realize(env, to, now)?;
        let resolved = Self::resolve(amount, &sender)?;

        if sender.principal < resolved {
            return Err(Error::InsufficientBalance);
        }

        Ok((sender, recipient, resolved))
    }

    fn move_principal(
        env: &Env,
        from: &Address,
        to: &Address,
        sender: &Account,
        recipient: &Account,
        amount: i128,
    ) -> Result<(), Error> {
        let new_holder = recipient.principal == 0 && amount > 0;

        // Re-read both records: `from` and `to` may be the same account.
        let mut debited = read_account(env, from);
        debited.principal -= amount;
        write_account(env, from, &debited);

        let mut credited = read_account(env, to);
        if new_holder {
            credited.locked_rate = sender.locked_rate;
        }
        credited.principal = credited
            .principal
            .checked_add(amount)
            .ok_or(Error::ArithmeticOverflow)?;
        write_account(env, to, &credited);

        env.events().publish(
            (Symbol::new(env, "transfer"), from.clone(), to.clone()),
            TransferEvent {
                from: from.clone(),
                to: to.clone(),
                amount,
            },
        );

        Ok(())
    }

    fn adjust_total_principal(env: &Env, delta: i128) -> Result<(), Error> {
        let total = read_total_principal(env)
            .checked_add(delta)
            .ok_or(Error::ArithmeticOverflow)?;
        write_total_principal(env, total);
        Ok(())
    }
}
