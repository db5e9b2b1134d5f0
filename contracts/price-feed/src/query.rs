use cosmwasm_std::{to_json_binary, Binary, Deps, StdError, StdResult, Uint128, Uint256};
use dvn_common::fee::{EstimateFeeResponse, PRICE_RATIO_DENOMINATOR};

use crate::state::{CONFIG, PRICES};

pub fn query_config(deps: Deps) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    to_json_binary(&config)
}

pub fn query_price(deps: Deps, dst_eid: u32) -> StdResult<Binary> {
    let price = PRICES.may_load(deps.storage, dst_eid)?;
    to_json_binary(&price)
}

/// Cost of executing `gas` units plus `calldata_size` bytes of calldata on
/// `dst_eid`, converted into the local native unit.
pub fn estimate_fee_by_eid(
    deps: Deps,
    dst_eid: u32,
    calldata_size: u64,
    gas: Uint128,
) -> StdResult<EstimateFeeResponse> {
    let price = PRICES
        .may_load(deps.storage, dst_eid)?
        .ok_or_else(|| StdError::generic_err(format!("no price set for eid {dst_eid}")))?;
    let config = CONFIG.load(deps.storage)?;

    let calldata_gas =
        Uint128::from(calldata_size).checked_mul(Uint128::from(price.gas_per_byte))?;
    let total_gas = gas.checked_add(calldata_gas)?;
    let remote_fee = total_gas.checked_mul(price.gas_price_in_unit)?;

    // Intermediate product can exceed 128 bits before the ratio is divided out
    let fee = remote_fee.full_mul(price.price_ratio) / Uint256::from(PRICE_RATIO_DENOMINATOR);

    Ok(EstimateFeeResponse {
        fee: Uint128::try_from(fee)?,
        price_ratio: price.price_ratio,
        price_ratio_denominator: Uint128::new(PRICE_RATIO_DENOMINATOR),
        native_price_usd: config.native_price_usd,
    })
}

pub fn query_estimate_fee_by_eid(
    deps: Deps,
    dst_eid: u32,
    calldata_size: u64,
    gas: Uint128,
) -> StdResult<Binary> {
    to_json_binary(&estimate_fee_by_eid(deps, dst_eid, calldata_size, gas)?)
}
