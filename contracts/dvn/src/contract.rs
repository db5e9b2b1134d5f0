use cosmwasm_std::{entry_point, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult};
use cw2::{get_contract_version, set_contract_version};
use dvn_common::Role;

use crate::access::{self, store_grant};
use crate::error::ContractError;
use crate::execute;
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query;
use crate::state::{GlobalConfig, CONFIG, NEXT_JOB_ID};

const CONTRACT_NAME: &str = "crates.io:dvn-worker";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[entry_point]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let default_multiplier_bps =
        execute::parse_multiplier_bps("default_multiplier_bps", msg.default_multiplier_bps)?;
    execute::validate_public_key(&msg.oracle_public_key)?;
    if msg.fee_denom.is_empty() {
        return Err(ContractError::InvalidConfig {
            reason: "fee_denom must not be empty".to_string(),
        });
    }

    let config = GlobalConfig {
        app_id: msg.app_id,
        oracle_public_key: msg.oracle_public_key,
        oracle_contract: deps.api.addr_validate(&msg.oracle_contract)?,
        price_feed: msg
            .price_feed
            .map(|a| deps.api.addr_validate(&a))
            .transpose()?,
        fee_lib: msg
            .fee_lib
            .map(|a| deps.api.addr_validate(&a))
            .transpose()?,
        default_multiplier_bps,
        fee: msg.fee,
        fee_denom: msg.fee_denom,
        dvn_config: msg
            .dvn_config
            .map(|a| deps.api.addr_validate(&a))
            .transpose()?,
        version: 1,
    };

    let mut libs = Vec::with_capacity(msg.message_libs.len());
    for lib in &msg.message_libs {
        libs.push(deps.api.addr_validate(lib)?);
    }

    CONFIG.save(deps.storage, &config)?;
    NEXT_JOB_ID.save(deps.storage, &1u64)?;
    store_grant(deps.storage, Role::Admin, &info.sender)?;
    for lib in &libs {
        store_grant(deps.storage, Role::MessageLib, lib)?;
    }

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("contract", "dvn")
        .add_attribute("admin", info.sender.to_string())
        .add_attribute("message_libs", libs.len().to_string()))
}

#[entry_point]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::AssignJob { param, options } => {
            execute::assign_job(deps, env, info, param, options)
        }
        ExecuteMsg::ReportVerification {
            job_id,
            payload_hash_hex,
            result,
        } => execute::report_verification(deps, env, info, job_id, payload_hash_hex, result),
        ExecuteMsg::SetSupportedDstChain { dst_eid, supported } => {
            execute::set_supported_dst_chain(deps, env, info, dst_eid, supported)
        }
        ExecuteMsg::SetDstConfig { params } => execute::set_dst_config(deps, env, info, params),
        ExecuteMsg::SetFeeLib { fee_lib } => execute::set_fee_lib(deps, env, info, fee_lib),
        ExecuteMsg::SetPriceFeed { price_feed } => {
            execute::set_price_feed(deps, env, info, price_feed)
        }
        ExecuteMsg::SetDefaultMultiplierBps { multiplier_bps } => {
            execute::set_default_multiplier_bps(deps, env, info, multiplier_bps)
        }
        ExecuteMsg::SetOraclePublicKey { public_key } => {
            execute::set_oracle_public_key(deps, env, info, public_key)
        }
        ExecuteMsg::SetAppId { app_id } => execute::set_app_id(deps, env, info, app_id),
        ExecuteMsg::SetFee { fee } => execute::set_fee(deps, env, info, fee),
        ExecuteMsg::SetOracleContract { oracle_contract } => {
            execute::set_oracle_contract(deps, env, info, oracle_contract)
        }
        ExecuteMsg::SetDvnConfig { dvn_config } => {
            execute::set_dvn_config(deps, env, info, dvn_config)
        }
        ExecuteMsg::GrantRole { role, address } => {
            access::grant_role(deps, env, info, role, address)
        }
        ExecuteMsg::RevokeRole { role, address } => {
            access::revoke_role(deps, env, info, role, address)
        }
        ExecuteMsg::WithdrawFee { to, amount } => execute::withdraw_fee(deps, env, info, to, amount),
    }
}

#[entry_point]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => query::query_config(deps),
        QueryMsg::DstConfig { dst_eid } => query::query_dst_config(deps, dst_eid),
        QueryMsg::DstConfigs { start_after, limit } => {
            query::query_dst_configs(deps, start_after, limit)
        }
        QueryMsg::Job { job_id } => query::query_job(deps, job_id),
        QueryMsg::Jobs { start_after, limit } => query::query_jobs(deps, start_after, limit),
        QueryMsg::NextJobId {} => query::query_next_job_id(deps),
        QueryMsg::FeePreview {
            dst_eid,
            confirmations,
            sender,
            options,
        } => query::query_fee_preview(deps, dst_eid, confirmations, sender, options),
        QueryMsg::HasRole { role, address } => query::query_has_role(deps, role, address),
        QueryMsg::RoleMembers {
            role,
            start_after,
            limit,
        } => query::query_role_members(deps, role, start_after, limit),
    }
}

#[entry_point]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    let stored = get_contract_version(deps.storage)?;
    if stored.contract != CONTRACT_NAME {
        return Err(ContractError::Unauthorized {
            reason: "Cannot migrate from different contract type".to_string(),
        });
    }

    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("from_version", stored.version)
        .add_attribute("to_version", CONTRACT_VERSION))
}
