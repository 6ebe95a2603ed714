#![no_std]
//! Development price feed reporting a single exchange rate in rounds.
//!
//! Local deployments and tests install this in place of a production
//! aggregator. Answers are fixed-point integers scaled by `10^decimals`.

use soroban_sdk::{contract, contractimpl, Address, Env, String, Symbol};

mod storage;
mod types;

use storage::Storage;
pub use types::{Config, PriceFeedError, RoundData};

/// Decimals used by local deployments.
pub const DEFAULT_DECIMALS: u32 = 8;
/// 2000.00000000 reference units per native unit.
pub const DEFAULT_INITIAL_ANSWER: i128 = 200_000_000_000;

const VERSION: u32 = 0;

#[contract]
pub struct MockPriceFeed;

#[contractimpl]
impl MockPriceFeed {
    pub fn initialize(
        env: Env,
        admin: Address,
        decimals: u32,
        initial_answer: i128,
    ) -> Result<(), PriceFeedError> {
        if Storage::has_config(&env) {
            return Err(PriceFeedError::AlreadyInitialized);
        }

        Storage::set_config(&env, &Config { admin, decimals });
        Self::record_round(&env, 1, initial_answer, env.ledger().timestamp());

        Ok(())
    }

    pub fn decimals(env: Env) -> Result<u32, PriceFeedError> {
        Ok(Storage::get_config(&env)?.decimals)
    }

    pub fn version(_env: Env) -> u32 {
        VERSION
    }

    pub fn description(env: Env) -> String {
        String::from_str(&env, "mock price feed")
    }

    pub fn latest_round_data(env: Env) -> Result<RoundData, PriceFeedError> {
        let round_id = Storage::get_latest_round(&env).ok_or(PriceFeedError::NotFound)?;
        Storage::get_round(&env, round_id).ok_or(PriceFeedError::NotFound)
    }

    pub fn latest_answer(env: Env) -> Result<i128, PriceFeedError> {
        Ok(Self::latest_round_data(env)?.answer)
    }

    pub fn get_round_data(env: Env, round_id: u64) -> Result<RoundData, PriceFeedError> {
        Storage::get_round(&env, round_id).ok_or(PriceFeedError::NotFound)
    }

    /// Publish a new answer as the next round, stamped with the ledger time.
    pub fn update_answer(env: Env, answer: i128) -> Result<u64, PriceFeedError> {
        let config = Storage::get_config(&env)?;
        config.admin.require_auth();

        let round_id = Storage::get_latest_round(&env).unwrap_or(0) + 1;
        Self::record_round(&env, round_id, answer, env.ledger().timestamp());
        Ok(round_id)
    }

    /// Overwrite an arbitrary round and make it the latest one. Used to
    /// simulate feeds that stopped updating.
    pub fn update_round_data(
        env: Env,
        round_id: u64,
        answer: i128,
        updated_at: u64,
    ) -> Result<(), PriceFeedError> {
        let config = Storage::get_config(&env)?;
        config.admin.require_auth();

        Self::record_round(&env, round_id, answer, updated_at);
        Ok(())
    }

    fn record_round(env: &Env, round_id: u64, answer: i128, updated_at: u64) {
        let data = RoundData {
            round_id,
            answer,
            started_at: updated_at,
            updated_at,
            answered_in_round: round_id,
        };
        Storage::set_round(env, &data);
        Storage::set_latest_round(env, round_id);

        env.events().publish(
            (Symbol::new(env, "update"), round_id),
            (answer, updated_at),
        );
    }
}
