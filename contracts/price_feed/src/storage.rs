use crate::types::{Config, PriceFeedError, RoundData};
use soroban_sdk::{symbol_short, Env};

pub struct Storage;

impl Storage {
    pub fn has_config(env: &Env) -> bool {
        env.storage().instance().has(&symbol_short!("config"))
    }

    pub fn set_config(env: &Env, config: &Config) {
        env.storage()
            .instance()
            .set(&symbol_short!("config"), config);
    }

    pub fn get_config(env: &Env) -> Result<Config, PriceFeedError> {
        env.storage()
            .instance()
            .get(&symbol_short!("config"))
            .ok_or(PriceFeedError::NotInitialized)
    }

    pub fn get_latest_round(env: &Env) -> Option<u64> {
        env.storage().instance().get(&symbol_short!("latest"))
    }

    pub fn set_latest_round(env: &Env, round_id: u64) {
        env.storage()
            .instance()
            .set(&symbol_short!("latest"), &round_id);
    }

    pub fn set_round(env: &Env, data: &RoundData) {
        env.storage()
            .persistent()
            .set(&(symbol_short!("round"), data.round_id), data);
    }

    pub fn get_round(env: &Env, round_id: u64) -> Option<RoundData> {
        env.storage()
            .persistent()
            .get(&(symbol_short!("round"), round_id))
    }
}
