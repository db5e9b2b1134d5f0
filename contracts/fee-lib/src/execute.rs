use cosmwasm_std::{DepsMut, Env, MessageInfo, Response, Uint128};

use crate::error::ContractError;
use crate::msg::UpdateConfigParams;
use crate::state::CONFIG;

pub(crate) fn validate_decimals_rate(rate: Uint128) -> Result<(), ContractError> {
    if rate.is_zero() {
        return Err(ContractError::InvalidConfig {
            reason: "native_decimals_rate must be non-zero".to_string(),
        });
    }
    Ok(())
}

pub fn update_config(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    params: UpdateConfigParams,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;

    if info.sender != config.admin {
        return Err(ContractError::Unauthorized {
            reason: "only admin can update config".to_string(),
        });
    }

    if let Some(admin) = params.admin {
        config.admin = deps.api.addr_validate(&admin)?;
    }
    if let Some(rate) = params.native_decimals_rate {
        validate_decimals_rate(rate)?;
        config.native_decimals_rate = rate;
    }
    if let Some(size) = params.verify_calldata_size {
        config.verify_calldata_size = size;
    }

    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "update_config")
        .add_attribute("admin", config.admin.to_string())
        .add_attribute("native_decimals_rate", config.native_decimals_rate.to_string())
        .add_attribute("verify_calldata_size", config.verify_calldata_size.to_string()))
}
