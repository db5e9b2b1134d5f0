//! Query interfaces between the DVN, its fee-policy delegate and the price feed.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Binary, Uint128};

/// Basis-point denominator (10000 = 1x).
pub const BPS_DENOMINATOR: u128 = 10_000;

/// Fixed-point denominator for `price_ratio` in the price feed (10^20).
pub const PRICE_RATIO_DENOMINATOR: u128 = 100_000_000_000_000_000_000;

/// Request context the DVN forwards to its fee-policy delegate.
#[cw_serde]
pub struct FeeParams {
    pub price_feed: Option<String>,
    pub dst_eid: u32,
    pub confirmations: u64,
    pub sender: String,
    pub default_multiplier_bps: u16,
}

/// Snapshot of the DVN's per-destination pricing config.
#[cw_serde]
pub struct DstConfigView {
    pub gas: Uint128,
    pub multiplier_bps: u16,
    pub floor_margin_usd: Uint128,
}

/// Messages a fee-policy delegate must answer.
#[cw_serde]
#[derive(QueryResponses)]
pub enum FeeLibQueryMsg {
    #[returns(Uint128)]
    GetFee {
        params: FeeParams,
        dst_config: DstConfigView,
        options: Binary,
    },
}

/// Price feed query used by the fee library.
#[cw_serde]
#[derive(QueryResponses)]
pub enum PriceFeedQueryMsg {
    #[returns(EstimateFeeResponse)]
    EstimateFeeByEid {
        dst_eid: u32,
        calldata_size: u64,
        gas: Uint128,
    },
}

#[cw_serde]
pub struct EstimateFeeResponse {
    /// Remote execution cost converted into the local native unit.
    pub fee: Uint128,
    pub price_ratio: Uint128,
    pub price_ratio_denominator: Uint128,
    /// Local native token price in USD, scaled by the feed.
    pub native_price_usd: Uint128,
}
