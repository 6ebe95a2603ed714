use soroban_sdk::{Address, Env, Vec};
use crate::types::{Config, DataKey, FundMeError};

pub fn has_config(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn set_config(env: &Env, config: &Config) {
    env.storage().instance().set(&DataKey::Config, config);
}

pub fn get_config(env: &Env) -> Result<Config, FundMeError> {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(FundMeError::NotInitialized)
}

pub fn get_pooled_value(env: &Env) -> i128 {
    env.storage().instance().get(&DataKey::PooledValue).unwrap_or(0)
}

pub fn set_pooled_value(env: &Env, amount: i128) {
    env.storage().instance().set(&DataKey::PooledValue, &amount);
}

/// An entry exists for every funder of the current round, even one whose
/// recorded amount is zero.
pub fn is_funder(env: &Env, funder: &Address) -> bool {
    env.storage().persistent().has(&DataKey::AmountFunded(funder.clone()))
}

pub fn get_amount_funded(env: &Env, funder: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::AmountFunded(funder.clone()))
        .unwrap_or(0)
}

pub fn set_amount_funded(env: &Env, funder: &Address, amount: i128) {
    env.storage()
        .persistent()
        .set(&DataKey::AmountFunded(funder.clone()), &amount);
}

pub fn clear_amount_funded(env: &Env, funder: &Address) {
    env.storage()
        .persistent()
        .remove(&DataKey::AmountFunded(funder.clone()));
}

pub fn get_funder_count(env: &Env) -> u32 {
    env.storage().instance().get(&DataKey::FunderCount).unwrap_or(0)
}

pub fn get_funder(env: &Env, index: u32) -> Option<Address> {
    env.storage().persistent().get(&DataKey::Funder(index))
}

pub fn push_funder(env: &Env, funder: &Address) {
    let count = get_funder_count(env);
    env.storage().persistent().set(&DataKey::Funder(count), funder);
    env.storage().instance().set(&DataKey::FunderCount, &(count + 1));
}

/// Copy the whole funder sequence out of storage in one pass.
pub fn load_funders(env: &Env) -> Vec<Address> {
    let count = get_funder_count(env);
    let mut funders = Vec::new(env);
    for index in 0..count {
        if let Some(funder) = get_funder(env, index) {
            funders.push_back(funder);
        }
    }
    funders
}

pub fn clear_funders(env: &Env) {
    let count = get_funder_count(env);
    for index in 0..count {
        env.storage().persistent().remove(&DataKey::Funder(index));
    }
    env.storage().instance().set(&DataKey::FunderCount, &0u32);
}
