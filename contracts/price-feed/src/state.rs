use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Timestamp, Uint128};
use cw_storage_plus::{Item, Map};

pub const CONFIG: Item<FeedConfig> = Item::new("config");
pub const PRICES: Map<u32, Price> = Map::new("prices");

#[cw_serde]
pub struct FeedConfig {
    pub admin: Addr,
    pub updaters: Vec<Addr>,
    /// Local native token price in USD, in the same scale as the fee
    /// library's floor margin.
    pub native_price_usd: Uint128,
}

/// Remote pricing for one destination endpoint.
#[cw_serde]
pub struct Price {
    /// Remote native token value in local native units, scaled by 10^20.
    pub price_ratio: Uint128,
    pub gas_price_in_unit: Uint128,
    pub gas_per_byte: u32,
    pub updated_at: Timestamp,
    pub updated_by: Addr,
}
