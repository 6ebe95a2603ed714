use soroban_sdk::{contracterror, contracttype, Address};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum FundMeError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    NotOwner = 3,
    InsufficientContribution = 4,
    IndexOutOfRange = 5,
    TransferFailed = 6,
    OracleUnavailable = 7,
    InvalidAmount = 8,
    ArithmeticOverflow = 9,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub owner: Address,
    /// Token holding the pooled value.
    pub token: Address,
    pub price_feed: Address,
    /// Minimum contribution in reference units, 18 decimals.
    pub minimum_usd: i128,
    /// Decimals of `token`, read once at initialization.
    pub value_decimals: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Config,
    PooledValue,
    FunderCount,
    Funder(u32),
    AmountFunded(Address),
}
