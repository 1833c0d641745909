#![no_std]

mod error;
mod events;
mod ledger;
mod storage;

pub use error::Error;
pub use ledger::Amount;
pub use storage::BridgeMessage;

use events::*;
use ledger::LedgerClient;
use storage::DataKey;

use soroban_sdk::{contract, contractimpl, log, Address, Env, Symbol};

/// Burn-and-issue adapter between independent ledger instances
///
/// Each ledger keeps its own global rate. Value arriving here is issued at
/// the local rate in force when the relay delivers it.
#[contract]
pub struct RebaseBridge;

#[contractimpl]
impl RebaseBridge {
    // ============================================
    // INITIALIZATION & ADMIN
    // ============================================

    /// Initialize the adapter for the ledger of `domain`
    ///
    /// # Errors
    /// - `AlreadyInitialized`: Contract already initialized
    pub fn initialize(
        env: Env,
        admin: Address,
        ledger: Address,
        relayer: Address,
        domain: u32,
    ) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::AlreadyInitialized);
        }

        admin.require_auth();

        env.storage().instance().set(&DataKey::Initialized, &true);
        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage().instance().set(&DataKey::Ledger, &ledger);
        env.storage().instance().set(&DataKey::Relayer, &relayer);
        env.storage().instance().set(&DataKey::Domain, &domain);
        env.storage().instance().set(&DataKey::NextNonce, &0u64);

        Ok(())
    }

    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    pub fn set_relayer(env: Env, relayer: Address) -> Result<(), Error> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)?;
        admin.require_auth();

        env.storage().instance().set(&DataKey::Relayer, &relayer);
        Ok(())
    }

    // ============================================
    // OUTBOUND
    // ============================================

    /// Burn `amount` from `from` and record a message for the relay
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `ZeroAmount`: Burn resolved to zero
    pub fn send(
        env: Env,
        from: Address,
        dest_domain: u32,
        recipient: Address,
        amount: Amount,
    ) -> Result<u64, Error> {
        from.require_auth();

        let ledger = LedgerClient::new(&env, &Self::ledger(&env)?);
        let source_domain = Self::domain(env.clone())?;

        let burned = ledger.burn(&env.current_contract_address(), &from, &amount);
        if burned == 0 {
            return Err(Error::ZeroAmount);
        }

        let nonce: u64 = env
            .storage()
            .instance()
            .get(&DataKey::NextNonce)
            .unwrap_or(0);

        let message = BridgeMessage {
            source_domain,
            dest_domain,
            nonce,
            origin: from.clone(),
            recipient: recipient.clone(),
            amount: burned,
        };

        env.storage()
            .persistent()
            .set(&DataKey::Outbound(nonce), &message);
        env.storage()
            .instance()
            .set(&DataKey::NextNonce, &(nonce + 1));

        env.events().publish(
            (Symbol::new(&env, "sent"), dest_domain, nonce),
            SentEvent {
                nonce,
                dest_domain,
                origin: from,
                recipient,
                amount: burned,
            },
        );

        Ok(nonce)
    }

    // ============================================
    // INBOUND
    // ============================================

    /// Deliver a relayed message, issuing at this ledger's current global rate
    ///
    /// Returns `false` without side effects when the message was already
    /// processed.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `WrongDomain`: Message is for another domain
    /// - `InvalidAmount`: Message amount is zero or negative
    pub fn receive(env: Env, message: BridgeMessage) -> Result<bool, Error> {
        let relayer: Address = env
            .storage()
            .instance()
            .get(&DataKey::Relayer)
            .ok_or(Error::NotInitialized)?;
        relayer.require_auth();

        if message.dest_domain != Self::domain(env.clone())? {
            return Err(Error::WrongDomain);
        }
        if message.amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        let processed_key = DataKey::Processed(message.source_domain, message.nonce);
        if env.storage().persistent().has(&processed_key) {
            log!(&env, "replayed message ignored", message.source_domain, message.nonce);
            return Ok(false);
        }
        env.storage().persistent().set(&processed_key, &true);

        let ledger = LedgerClient::new(&env, &Self::ledger(&env)?);
        let rate = ledger.global_rate();
        ledger.issue(
            &env.current_contract_address(),
            &message.recipient,
            &message.amount,
            &rate,
        );

        env.events().publish(
            (
                Symbol::new(&env, "received"),
                message.source_domain,
                message.nonce,
            ),
            ReceivedEvent {
                source_domain: message.source_domain,
                nonce: message.nonce,
                recipient: message.recipient,
                amount: message.amount,
                rate,
            },
        );

        Ok(true)
    }

    // ============================================
    // VIEW FUNCTIONS
    // ============================================

    pub fn outbound(env: Env, nonce: u64) -> Result<BridgeMessage, Error> {
        env.storage()
            .persistent()
            .get(&DataKey::Outbound(nonce))
            .ok_or(Error::MessageNotFound)
    }

    pub fn is_processed(env: Env, source_domain: u32, nonce: u64) -> bool {
        env.storage()
            .persistent()
            .has(&DataKey::Processed(source_domain, nonce))
    }

    pub fn domain(env: Env) -> Result<u32, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Domain)
            .ok_or(Error::NotInitialized)
    }

    pub fn relayer(env: Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Relayer)
            .ok_or(Error::NotInitialized)
    }

    // ============================================
    // INTERNAL HELPERS
    // ============================================

    fn ledger(env: &Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Ledger)
            .ok_or(Error::NotInitialized)
    }
}
