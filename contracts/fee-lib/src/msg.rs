use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Binary, Uint128};
use dvn_common::fee::{DstConfigView, FeeParams};

use crate::state::FeeLibConfig;

#[cw_serde]
pub struct InstantiateMsg {
    pub native_decimals_rate: Uint128,
    pub verify_calldata_size: u64,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Update config (admin only).
    UpdateConfig {
        admin: Option<String>,
        native_decimals_rate: Option<Uint128>,
        verify_calldata_size: Option<u64>,
    },
}

/// The `GetFee` variant serializes identically to
/// `dvn_common::fee::FeeLibQueryMsg`, so the DVN can query this contract
/// without depending on it.
#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(FeeLibConfig)]
    Config {},

    #[returns(Uint128)]
    GetFee {
        params: FeeParams,
        dst_config: DstConfigView,
        options: Binary,
    },
}

#[cw_serde]
pub struct MigrateMsg {}

pub struct UpdateConfigParams {
    pub admin: Option<String>,
    pub native_decimals_rate: Option<Uint128>,
    pub verify_calldata_size: Option<u64>,
}
