#![no_std]

mod oracle;
mod storage;
pub mod types;

use soroban_sdk::{contract, contractimpl, log, token, Address, Env, Symbol};
use crate::storage::*;
pub use crate::oracle::{PriceFeedClient, RoundData, MAX_PRICE_AGE_SECS, REFERENCE_DECIMALS};
pub use crate::types::{Config, DataKey, FundMeError};

/// How the withdrawal loop walks the funder sequence. Both produce the
/// same final state.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum DrainStrategy {
    /// Re-read the count and each entry from storage on every step.
    Direct,
    /// Copy the sequence into a local vector once, then walk the copy.
    Staged,
}

#[contract]
pub struct FundMeContract;

#[contractimpl]
impl FundMeContract {
    /// Initialize the ledger
    ///
    /// # Arguments
    /// * `owner` - The only address allowed to withdraw
    /// * `token` - Token contributions are made in
    /// * `price_feed` - Feed quoting `token` in reference units
    /// * `minimum_usd` - Minimum contribution, reference units with 18 decimals
    pub fn initialize(
        env: Env,
        owner: Address,
        token: Address,
        price_feed: Address,
        minimum_usd: i128,
    ) -> Result<(), FundMeError> {
        if has_config(&env) {
            return Err(FundMeError::AlreadyInitialized);
        }
        if minimum_usd < 0 {
            return Err(FundMeError::InvalidAmount);
        }

        let value_decimals = token::Client::new(&env, &token).decimals();

        let config = Config {
            owner: owner.clone(),
            token,
            price_feed: price_feed.clone(),
            minimum_usd,
            value_decimals,
        };
        set_config(&env, &config);
        set_pooled_value(&env, 0);

        env.events().publish(
            (Symbol::new(&env, "init"), owner),
            (price_feed, minimum_usd),
        );

        Ok(())
    }

    /// Contribute `amount` of the ledger token
    pub fn fund(env: Env, funder: Address, amount: i128) -> Result<(), FundMeError> {
        funder.require_auth();

        let config = get_config(&env)?;
        if amount < 0 {
            return Err(FundMeError::InvalidAmount);
        }

        let value_usd = oracle::conversion_rate(&env, &config, amount)?;
        if value_usd < config.minimum_usd {
            return Err(FundMeError::InsufficientContribution);
        }

        let balance = get_amount_funded(&env, &funder)
            .checked_add(amount)
            .ok_or(FundMeError::ArithmeticOverflow)?;
        let pooled = get_pooled_value(&env)
            .checked_add(amount)
            .ok_or(FundMeError::ArithmeticOverflow)?;

        let token = token::Client::new(&env, &config.token);
        if !matches!(
            token.try_transfer(&funder, &env.current_contract_address(), &amount),
            Ok(Ok(()))
        ) {
            return Err(FundMeError::TransferFailed);
        }

        if !is_funder(&env, &funder) {
            push_funder(&env, &funder);
        }
        set_amount_funded(&env, &funder, balance);
        set_pooled_value(&env, pooled);

        env.events().publish(
            (Symbol::new(&env, "fund"), funder),
            (amount, balance),
        );

        Ok(())
    }

    /// Send the whole pool to the owner and reset every funder record.
    /// Returns the amount transferred.
    pub fn withdraw(env: Env, caller: Address) -> Result<i128, FundMeError> {
        Self::drain(&env, &caller, DrainStrategy::Direct)
    }

    /// Same as `withdraw`, walking a local copy of the funder sequence.
    pub fn cheap_withdraw(env: Env, caller: Address) -> Result<i128, FundMeError> {
        Self::drain(&env, &caller, DrainStrategy::Staged)
    }

    pub fn get_address_to_amount_funded(env: Env, funder: Address) -> i128 {
        get_amount_funded(&env, &funder)
    }

    pub fn get_funder(env: Env, index: u32) -> Result<Address, FundMeError> {
        if index >= get_funder_count(&env) {
            return Err(FundMeError::IndexOutOfRange);
        }
        get_funder(&env, index).ok_or(FundMeError::IndexOutOfRange)
    }

    pub fn get_funder_count(env: Env) -> u32 {
        get_funder_count(&env)
    }

    pub fn get_pooled_value(env: Env) -> i128 {
        get_pooled_value(&env)
    }

    pub fn get_owner(env: Env) -> Result<Address, FundMeError> {
        Ok(get_config(&env)?.owner)
    }

    pub fn get_price_feed(env: Env) -> Result<Address, FundMeError> {
        Ok(get_config(&env)?.price_feed)
    }

    pub fn get_token(env: Env) -> Result<Address, FundMeError> {
        Ok(get_config(&env)?.token)
    }

    pub fn get_minimum_usd(env: Env) -> Result<i128, FundMeError> {
        Ok(get_config(&env)?.minimum_usd)
    }

    /// Reference-unit value (18 decimals) of `amount` at the current rate
    pub fn get_conversion_rate(env: Env, amount: i128) -> Result<i128, FundMeError> {
        let config = get_config(&env)?;
        oracle::conversion_rate(&env, &config, amount)
    }

    // Every storage write happens before the outgoing transfer. A failed
    // transfer returns an error, which rolls the writes back.
    fn drain(env: &Env, caller: &Address, strategy: DrainStrategy) -> Result<i128, FundMeError> {
        let config = get_config(env)?;
        if *caller != config.owner {
            return Err(FundMeError::NotOwner);
        }
        caller.require_auth();

        match strategy {
            DrainStrategy::Direct => {
                let mut index = 0;
                while index < get_funder_count(env) {
                    if let Some(funder) = get_funder(env, index) {
                        clear_amount_funded(env, &funder);
                    }
                    index += 1;
                }
            }
            DrainStrategy::Staged => {
                let funders = load_funders(env);
                for funder in funders.iter() {
                    clear_amount_funded(env, &funder);
                }
            }
        }
        clear_funders(env);

        let amount = get_pooled_value(env);
        set_pooled_value(env, 0);

        if amount > 0 {
            log!(env, "withdrawing pooled value", amount);
            let token = token::Client::new(env, &config.token);
            if !matches!(
                token.try_transfer(&env.current_contract_address(), &config.owner, &amount),
                Ok(Ok(()))
            ) {
                log!(env, "transfer to owner failed", amount);
                return Err(FundMeError::TransferFailed);
            }
        }

        env.events().publish(
            (Symbol::new(env, "withdraw"), config.owner),
            amount,
        );

        Ok(amount)
    }
}
