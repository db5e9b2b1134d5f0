use cosmwasm_std::{Addr, DepsMut, Env, Event, MessageInfo, Response, StdResult, Uint128};

use crate::error::ContractError;
use crate::msg::PriceUpdate;
use crate::state::{FeedConfig, Price, CONFIG, PRICES};

fn require_updater(config: &FeedConfig, info: &MessageInfo) -> Result<(), ContractError> {
    if !config.updaters.contains(&info.sender) {
        return Err(ContractError::Unauthorized {
            reason: "only updaters can set prices".to_string(),
        });
    }
    Ok(())
}

/// Store remote pricing for a batch of destinations. The whole batch is
/// validated before anything is written.
pub fn set_price(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    prices: Vec<PriceUpdate>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    require_updater(&config, &info)?;

    for update in &prices {
        if update.price_ratio.is_zero() {
            return Err(ContractError::InvalidPrice {
                dst_eid: update.dst_eid,
                reason: "price_ratio must be non-zero".to_string(),
            });
        }
    }

    let mut response = Response::new()
        .add_attribute("action", "set_price")
        .add_attribute("count", prices.len().to_string());

    for update in prices {
        PRICES.save(
            deps.storage,
            update.dst_eid,
            &Price {
                price_ratio: update.price_ratio,
                gas_price_in_unit: update.gas_price_in_unit,
                gas_per_byte: update.gas_per_byte,
                updated_at: env.block.time,
                updated_by: info.sender.clone(),
            },
        )?;
        response = response.add_event(
            Event::new("dvn_price_updated")
                .add_attribute("dst_eid", update.dst_eid.to_string())
                .add_attribute("price_ratio", update.price_ratio.to_string())
                .add_attribute("gas_price_in_unit", update.gas_price_in_unit.to_string())
                .add_attribute("gas_per_byte", update.gas_per_byte.to_string()),
        );
    }

    Ok(response)
}

pub fn set_native_price_usd(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    native_price_usd: Uint128,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    require_updater(&config, &info)?;

    config.native_price_usd = native_price_usd;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "set_native_price_usd")
        .add_attribute("native_price_usd", native_price_usd.to_string()))
}

/// Update the updater list. Admin only. Every address is validated before
/// the list changes; the event reports only entries that actually moved.
pub fn update_updaters(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    add: Vec<String>,
    remove: Vec<String>,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;

    if info.sender != config.admin {
        return Err(ContractError::Unauthorized {
            reason: "only admin can update updaters".to_string(),
        });
    }

    let remove = remove
        .iter()
        .map(|a| deps.api.addr_validate(a))
        .collect::<StdResult<Vec<Addr>>>()?;
    let add = add
        .iter()
        .map(|a| deps.api.addr_validate(a))
        .collect::<StdResult<Vec<Addr>>>()?;

    let mut removed = Vec::new();
    for addr in remove {
        if config.updaters.contains(&addr) {
            config.updaters.retain(|a| *a != addr);
            removed.push(addr.to_string());
        }
    }

    let mut added = Vec::new();
    for addr in add {
        if !config.updaters.contains(&addr) {
            added.push(addr.to_string());
            config.updaters.push(addr);
        }
    }

    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "update_updaters")
        .add_attribute("added", added.join(","))
        .add_attribute("removed", removed.join(","))
        .add_event(
            Event::new("dvn_updaters_updated")
                .add_attribute("added", added.join(","))
                .add_attribute("removed", removed.join(","))
                .add_attribute("count", config.updaters.len().to_string()),
        ))
}
