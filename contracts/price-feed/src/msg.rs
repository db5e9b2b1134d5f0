use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Uint128;
use dvn_common::fee::EstimateFeeResponse;

use crate::state::{FeedConfig, Price};

#[cw_serde]
pub struct InstantiateMsg {
    pub updaters: Vec<String>,
    pub native_price_usd: Uint128,
}

#[cw_serde]
pub struct PriceUpdate {
    pub dst_eid: u32,
    pub price_ratio: Uint128,
    pub gas_price_in_unit: Uint128,
    pub gas_per_byte: u32,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Overwrite remote pricing for each listed destination (updaters only).
    SetPrice { prices: Vec<PriceUpdate> },
    /// Updaters only.
    SetNativePriceUsd { native_price_usd: Uint128 },
    /// Update updater list (admin only).
    UpdateUpdaters {
        add: Vec<String>,
        remove: Vec<String>,
    },
}

/// The `EstimateFeeByEid` variant serializes identically to
/// `dvn_common::fee::PriceFeedQueryMsg`.
#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(FeedConfig)]
    Config {},

    #[returns(Option<Price>)]
    Price { dst_eid: u32 },

    #[returns(EstimateFeeResponse)]
    EstimateFeeByEid {
        dst_eid: u32,
        calldata_size: u64,
        gas: Uint128,
    },
}

#[cw_serde]
pub struct MigrateMsg {}
