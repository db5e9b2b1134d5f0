use cosmwasm_std::{to_json_binary, Binary, Deps, StdError, StdResult, Uint128, Uint256};
use dvn_common::fee::{
    DstConfigView, EstimateFeeResponse, FeeParams, PriceFeedQueryMsg, BPS_DENOMINATOR,
};

use crate::error::ContractError;
use crate::state::CONFIG;

pub fn query_config(deps: Deps) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    to_json_binary(&config)
}

/// Fee for verifying one packet: the price feed's estimate of the remote
/// verification cost, raised by the destination's multiplier or by its USD
/// floor margin, whichever is larger.
pub fn get_fee(
    deps: Deps,
    params: &FeeParams,
    dst_config: &DstConfigView,
    options: &Binary,
) -> Result<Uint128, ContractError> {
    if dst_config.gas.is_zero() {
        return Err(ContractError::EidNotSupported {
            dst_eid: params.dst_eid,
        });
    }
    if !options.is_empty() {
        return Err(ContractError::UnsupportedOptions {});
    }
    let Some(price_feed) = &params.price_feed else {
        return Err(ContractError::PriceFeedNotSet {});
    };

    let config = CONFIG.load(deps.storage)?;
    let estimate: EstimateFeeResponse = deps.querier.query_wasm_smart(
        price_feed,
        &PriceFeedQueryMsg::EstimateFeeByEid {
            dst_eid: params.dst_eid,
            calldata_size: config.verify_calldata_size,
            gas: dst_config.gas,
        },
    )?;

    let multiplier_bps = if dst_config.multiplier_bps == 0 {
        params.default_multiplier_bps
    } else {
        dst_config.multiplier_bps
    };

    apply_premium(
        estimate.fee,
        multiplier_bps,
        dst_config.floor_margin_usd,
        config.native_decimals_rate,
        estimate.native_price_usd,
    )
}

/// `max(fee * multiplier, fee + floor margin converted to native)`. The
/// floor is skipped when either the margin or the native price is unknown.
pub fn apply_premium(
    fee: Uint128,
    multiplier_bps: u16,
    floor_margin_usd: Uint128,
    native_decimals_rate: Uint128,
    native_price_usd: Uint128,
) -> Result<Uint128, ContractError> {
    let with_multiplier =
        fee.full_mul(Uint128::from(multiplier_bps)) / Uint256::from(BPS_DENOMINATOR);
    let with_multiplier = Uint128::try_from(with_multiplier).map_err(StdError::from)?;

    if native_price_usd.is_zero() || floor_margin_usd.is_zero() {
        return Ok(with_multiplier);
    }

    let margin = floor_margin_usd.full_mul(native_decimals_rate) / Uint256::from(native_price_usd);
    let margin = Uint128::try_from(margin).map_err(StdError::from)?;
    let with_floor = fee.checked_add(margin).map_err(StdError::from)?;

    Ok(with_multiplier.max(with_floor))
}

pub fn query_get_fee(
    deps: Deps,
    params: FeeParams,
    dst_config: DstConfigView,
    options: Binary,
) -> StdResult<Binary> {
    let fee = get_fee(deps, &params, &dst_config, &options)
        .map_err(|e| StdError::generic_err(e.to_string()))?;
    to_json_binary(&fee)
}
