use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128};
use cw_storage_plus::Item;

pub const CONFIG: Item<FeeLibConfig> = Item::new("config");

#[cw_serde]
pub struct FeeLibConfig {
    pub admin: Addr,
    /// One whole native token in its smallest unit (10^decimals).
    pub native_decimals_rate: Uint128,
    /// Calldata bytes a verification costs on the destination.
    pub verify_calldata_size: u64,
}
