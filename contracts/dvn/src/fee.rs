use cosmwasm_std::{Binary, Deps, Uint128};
use dvn_common::fee::{FeeLibQueryMsg, FeeParams};

use crate::error::ContractError;
use crate::state::{GlobalConfig, DST_CONFIGS};

/// Compute the verification fee for a job.
///
/// With a fee-policy delegate configured, every parameter is forwarded to it
/// and its answer is returned unchanged. Without one, the flat `config.fee`
/// applies. Reads state only, so repeated calls against the same config
/// snapshot agree.
pub fn compute_fee(
    deps: Deps,
    config: &GlobalConfig,
    dst_eid: u32,
    confirmations: u64,
    sender: &str,
    options: &Binary,
) -> Result<Uint128, ContractError> {
    let Some(fee_lib) = &config.fee_lib else {
        return Ok(config.fee);
    };

    let dst_config = DST_CONFIGS
        .may_load(deps.storage, dst_eid)?
        .unwrap_or_default();

    let msg = FeeLibQueryMsg::GetFee {
        params: FeeParams {
            price_feed: config.price_feed.as_ref().map(|a| a.to_string()),
            dst_eid,
            confirmations,
            sender: sender.to_string(),
            default_multiplier_bps: config.default_multiplier_bps,
        },
        dst_config: dst_config.view(),
        options: options.clone(),
    };

    deps.querier
        .query_wasm_smart::<Uint128>(fee_lib, &msg)
        .map_err(|e| ContractError::FeePolicyError {
            reason: e.to_string(),
        })
}
