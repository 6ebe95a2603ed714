//! Read side of the external price feed and the fixed-point conversion
//! from native value to reference units.
//!
//! Reference amounts carry [`REFERENCE_DECIMALS`] decimals regardless of
//! the token's or the feed's own precision, so `50 * 10^18` means 50 USD.

use soroban_sdk::{contractclient, contracttype, Address, Env};

use crate::types::{Config, FundMeError};

pub const REFERENCE_DECIMALS: u32 = 18;

/// Rounds older than this are treated as an unavailable feed.
pub const MAX_PRICE_AGE_SECS: u64 = 3600;

/// Largest power of ten representable in `i128`.
const MAX_I128_EXP: u64 = 38;

#[contracttype(export = false)]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoundData {
    pub round_id: u64,
    pub answer: i128,
    pub started_at: u64,
    pub updated_at: u64,
    pub answered_in_round: u64,
}

// Only the calls the ledger makes. Any feed exposing these two
// functions with matching types can back a deployment.
#[contractclient(name = "PriceFeedClient")]
pub trait PriceFeed {
    fn decimals(env: Env) -> u32;
    fn latest_round_data(env: Env) -> RoundData;
}

/// Current positive, fresh rate together with the feed's decimals.
pub fn read_rate(env: &Env, feed: &Address) -> Result<(i128, u32), FundMeError> {
    let client = PriceFeedClient::new(env, feed);

    let decimals = match client.try_decimals() {
        Ok(Ok(decimals)) => decimals,
        _ => return Err(FundMeError::OracleUnavailable),
    };
    let round = match client.try_latest_round_data() {
        Ok(Ok(round)) => round,
        _ => return Err(FundMeError::OracleUnavailable),
    };

    if round.answer <= 0 {
        return Err(FundMeError::OracleUnavailable);
    }
    let now = env.ledger().timestamp();
    if round.updated_at > now || now - round.updated_at > MAX_PRICE_AGE_SECS {
        return Err(FundMeError::OracleUnavailable);
    }

    Ok((round.answer, decimals))
}

/// `amount * rate / 10^(value_decimals + feed_decimals - REFERENCE_DECIMALS)`,
/// multiplying instead when the exponent is negative. Truncates toward zero,
/// so any divisor beyond `10^38` yields zero.
pub fn to_reference_units(
    amount: i128,
    rate: i128,
    value_decimals: u32,
    feed_decimals: u32,
) -> Result<i128, FundMeError> {
    let scaled = amount
        .checked_mul(rate)
        .ok_or(FundMeError::ArithmeticOverflow)?;
    let source_decimals = value_decimals as u64 + feed_decimals as u64;
    let reference_decimals = REFERENCE_DECIMALS as u64;

    if source_decimals >= reference_decimals {
        let exp = source_decimals - reference_decimals;
        if exp > MAX_I128_EXP {
            return Ok(0);
        }
        Ok(scaled / pow10(exp as u32)?)
    } else {
        scaled
            .checked_mul(pow10((reference_decimals - source_decimals) as u32)?)
            .ok_or(FundMeError::ArithmeticOverflow)
    }
}

/// Reference-unit value of `amount` at the feed's current rate.
pub fn conversion_rate(env: &Env, config: &Config, amount: i128) -> Result<i128, FundMeError> {
    let (rate, feed_decimals) = read_rate(env, &config.price_feed)?;
    to_reference_units(amount, rate, config.value_decimals, feed_decimals)
}

fn pow10(exp: u32) -> Result<i128, FundMeError> {
    10i128.checked_pow(exp).ok_or(FundMeError::ArithmeticOverflow)
}
