use cosmwasm_std::{
    coins, to_json_binary, BankMsg, Binary, DepsMut, Env, Event, HexBinary, MessageInfo,
    Response, StdError, Storage, Uint128, Uint256,
};
use dvn_common::oracle::{JobAssigned, JobFinalized};
use dvn_common::{JobStatus, PacketHeader, PublicKey, Role, VerificationResult};

use crate::access::require_role;
use crate::error::ContractError;
use crate::fee::compute_fee;
use crate::msg::{AssignJobParam, AssignJobResponse, DstConfigParam};
use crate::state::{
    Finalization, GlobalConfig, Job, CONFIG, DST_CONFIGS, FINALIZATIONS, JOBS, JOB_STATUS,
    NEXT_JOB_ID,
};

/// Narrow a basis-point input to the stored u16 range.
pub(crate) fn parse_multiplier_bps(field: &str, value: u32) -> Result<u16, ContractError> {
    u16::try_from(value).map_err(|_| ContractError::InvalidConfig {
        reason: format!("{field} = {value} exceeds {}", u16::MAX),
    })
}

pub(crate) fn validate_public_key(key: &PublicKey) -> Result<(), ContractError> {
    if key.parity > 1 {
        return Err(ContractError::InvalidConfig {
            reason: format!("public key parity must be 0 or 1, got {}", key.parity),
        });
    }
    Ok(())
}

/// Persist an updated config, bumping its version, and describe the change.
fn commit_config(
    storage: &mut dyn Storage,
    mut config: GlobalConfig,
    field: &str,
) -> Result<Response, ContractError> {
    config.version += 1;
    CONFIG.save(storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", format!("set_{field}"))
        .add_event(
            Event::new("dvn_config_updated")
                .add_attribute("field", field)
                .add_attribute("version", config.version.to_string()),
        ))
}

// ─── Job registry ───

/// Register a verification job for the off-chain oracle.
///
/// Every check runs before the first write, so a failed call leaves no trace
/// and does not consume a job id.
pub fn assign_job(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    param: AssignJobParam,
    options: Binary,
) -> Result<Response, ContractError> {
    require_role(deps.storage, Role::MessageLib, &info.sender)?;

    let dst_config = DST_CONFIGS
        .may_load(deps.storage, param.dst_eid)?
        .unwrap_or_default();
    if !dst_config.supported {
        return Err(ContractError::UnsupportedChain {
            dst_eid: param.dst_eid,
        });
    }

    let header_bytes =
        hex::decode(&param.packet_header_hex).map_err(|_| ContractError::InvalidHex {
            field: "packet_header_hex".to_string(),
        })?;
    let header = PacketHeader::decode(&header_bytes)?;
    if header.dst_eid != param.dst_eid {
        return Err(ContractError::PacketHeaderMismatch {
            dst_eid: param.dst_eid,
            header_dst_eid: header.dst_eid,
        });
    }

    let payload_hash =
        hex::decode(&param.payload_hash_hex).map_err(|_| ContractError::InvalidHex {
            field: "payload_hash_hex".to_string(),
        })?;
    if payload_hash.len() != 32 {
        return Err(ContractError::InvalidPayloadHash {
            len: payload_hash.len(),
        });
    }

    let config = CONFIG.load(deps.storage)?;

    let mut paid = Uint128::zero();
    for coin in &info.funds {
        if coin.denom != config.fee_denom {
            return Err(ContractError::WrongDenom {
                expected: config.fee_denom.clone(),
                denom: coin.denom.clone(),
            });
        }
        paid = paid.checked_add(coin.amount).map_err(StdError::from)?;
    }

    let fee = compute_fee(
        deps.as_ref(),
        &config,
        param.dst_eid,
        param.confirmations,
        &param.sender,
        &options,
    )?;
    if paid < fee {
        return Err(ContractError::InsufficientPayment {
            required: fee,
            paid,
        });
    }

    let job_id = NEXT_JOB_ID.may_load(deps.storage)?.unwrap_or(1);
    let job = Job {
        id: job_id,
        origin: info.sender.clone(),
        src_eid: header.src_eid,
        dst_eid: param.dst_eid,
        nonce: header.nonce,
        sender: param.sender,
        receiver: header.receiver_hex(),
        packet_header: HexBinary::from(header_bytes),
        payload_hash: HexBinary::from(payload_hash),
        confirmations: param.confirmations,
        options,
        fee_paid: fee,
        created_at: env.block.time,
    };
    JOBS.save(deps.storage, job_id, &job)?;
    JOB_STATUS.save(deps.storage, job_id, &JobStatus::Pending)?;
    NEXT_JOB_ID.save(deps.storage, &(job_id + 1))?;

    let event = JobAssigned {
        job_id,
        origin: job.origin.to_string(),
        src_eid: job.src_eid,
        dst_eid: job.dst_eid,
        nonce: job.nonce,
        sender: job.sender,
        receiver: job.receiver,
        payload_hash: job.payload_hash.to_hex(),
        packet_header: job.packet_header.to_hex(),
        confirmations: job.confirmations,
        options: job.options,
        fee,
    }
    .into_event();

    Ok(Response::new()
        .set_data(to_json_binary(&AssignJobResponse { job_id, fee })?)
        .add_attribute("action", "assign_job")
        .add_attribute("job_id", job_id.to_string())
        .add_attribute("dst_eid", param.dst_eid.to_string())
        .add_attribute("fee", fee.to_string())
        .add_attribute("paid", paid.to_string())
        .add_event(event))
}

/// Oracle callback: finalize a pending job. Only the configured oracle
/// contract may call this, and a job is finalized at most once.
pub fn report_verification(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    job_id: u64,
    payload_hash_hex: String,
    result: VerificationResult,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.oracle_contract {
        return Err(ContractError::Unauthorized {
            reason: "only the oracle contract can report verification".to_string(),
        });
    }

    let job = JOBS
        .may_load(deps.storage, job_id)?
        .ok_or(ContractError::UnknownJob { job_id })?;

    let current = JOB_STATUS.load(deps.storage, job_id)?;
    if current.is_terminal() {
        return Err(ContractError::AlreadyFinalized { job_id });
    }

    let reported_hash = hex::decode(&payload_hash_hex).map_err(|_| ContractError::InvalidHex {
        field: "payload_hash_hex".to_string(),
    })?;
    if reported_hash.as_slice() != job.payload_hash.as_slice() {
        return Err(ContractError::PayloadHashMismatch { job_id });
    }

    let status = result.status();
    let reason = match result {
        VerificationResult::Verified => None,
        VerificationResult::Failed { reason } => Some(reason),
    };

    JOB_STATUS.save(deps.storage, job_id, &status)?;
    FINALIZATIONS.save(
        deps.storage,
        job_id,
        &Finalization {
            status: status.clone(),
            reported_by: info.sender.clone(),
            finalized_at: env.block.time,
            reason,
        },
    )?;

    Ok(Response::new()
        .add_attribute("action", "report_verification")
        .add_attribute("job_id", job_id.to_string())
        .add_attribute("status", status.as_str())
        .add_event(JobFinalized { job_id, status }.into_event()))
}

// ─── Chain config store ───

/// Toggle support for a destination. Numeric config is left untouched so
/// re-enabling restores it.
pub fn set_supported_dst_chain(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    dst_eid: u32,
    supported: bool,
) -> Result<Response, ContractError> {
    require_role(deps.storage, Role::Admin, &info.sender)?;

    let mut chain = DST_CONFIGS
        .may_load(deps.storage, dst_eid)?
        .unwrap_or_default();
    chain.supported = supported;
    DST_CONFIGS.save(deps.storage, dst_eid, &chain)?;

    Ok(Response::new()
        .add_attribute("action", "set_supported_dst_chain")
        .add_attribute("dst_eid", dst_eid.to_string())
        .add_attribute("supported", supported.to_string())
        .add_event(
            Event::new("dvn_config_updated")
                .add_attribute("field", "supported_dst_chain")
                .add_attribute("dst_eid", dst_eid.to_string())
                .add_attribute("supported", supported.to_string()),
        ))
}

/// Batch upsert of per-destination pricing config. The support flag is
/// independent and never changed here.
pub fn set_dst_config(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    params: Vec<DstConfigParam>,
) -> Result<Response, ContractError> {
    require_role(deps.storage, Role::Admin, &info.sender)?;

    // Validate the whole batch before writing any of it
    let mut validated = Vec::with_capacity(params.len());
    for p in &params {
        let multiplier_bps = parse_multiplier_bps("multiplier_bps", p.multiplier_bps)?;
        validated.push((p.dst_eid, p.gas, multiplier_bps, p.floor_margin_usd));
    }

    let mut eids = Vec::with_capacity(validated.len());
    for (dst_eid, gas, multiplier_bps, floor_margin_usd) in validated {
        let mut chain = DST_CONFIGS
            .may_load(deps.storage, dst_eid)?
            .unwrap_or_default();
        chain.gas = gas;
        chain.multiplier_bps = multiplier_bps;
        chain.floor_margin_usd = floor_margin_usd;
        DST_CONFIGS.save(deps.storage, dst_eid, &chain)?;
        eids.push(dst_eid.to_string());
    }

    Ok(Response::new()
        .add_attribute("action", "set_dst_config")
        .add_attribute("count", eids.len().to_string())
        .add_event(
            Event::new("dvn_config_updated")
                .add_attribute("field", "dst_config")
                .add_attribute("dst_eids", eids.join(",")),
        ))
}

// ─── Global config setters ───

pub fn set_fee_lib(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    fee_lib: Option<String>,
) -> Result<Response, ContractError> {
    require_role(deps.storage, Role::Admin, &info.sender)?;
    let mut config = CONFIG.load(deps.storage)?;
    config.fee_lib = fee_lib.map(|a| deps.api.addr_validate(&a)).transpose()?;
    commit_config(deps.storage, config, "fee_lib")
}

pub fn set_price_feed(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    price_feed: Option<String>,
) -> Result<Response, ContractError> {
    require_role(deps.storage, Role::Admin, &info.sender)?;
    let mut config = CONFIG.load(deps.storage)?;
    config.price_feed = price_feed
        .map(|a| deps.api.addr_validate(&a))
        .transpose()?;
    commit_config(deps.storage, config, "price_feed")
}

pub fn set_default_multiplier_bps(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    multiplier_bps: u32,
) -> Result<Response, ContractError> {
    require_role(deps.storage, Role::Admin, &info.sender)?;
    let mut config = CONFIG.load(deps.storage)?;
    config.default_multiplier_bps =
        parse_multiplier_bps("default_multiplier_bps", multiplier_bps)?;
    commit_config(deps.storage, config, "default_multiplier_bps")
}

pub fn set_oracle_public_key(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    public_key: PublicKey,
) -> Result<Response, ContractError> {
    require_role(deps.storage, Role::Admin, &info.sender)?;
    validate_public_key(&public_key)?;
    let mut config = CONFIG.load(deps.storage)?;
    config.oracle_public_key = public_key;
    commit_config(deps.storage, config, "oracle_public_key")
}

pub fn set_app_id(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    app_id: Uint256,
) -> Result<Response, ContractError> {
    require_role(deps.storage, Role::Admin, &info.sender)?;
    let mut config = CONFIG.load(deps.storage)?;
    config.app_id = app_id;
    commit_config(deps.storage, config, "app_id")
}

pub fn set_fee(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    fee: Uint128,
) -> Result<Response, ContractError> {
    require_role(deps.storage, Role::Admin, &info.sender)?;
    let mut config = CONFIG.load(deps.storage)?;
    config.fee = fee;
    commit_config(deps.storage, config, "fee")
}

pub fn set_oracle_contract(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    oracle_contract: String,
) -> Result<Response, ContractError> {
    require_role(deps.storage, Role::Admin, &info.sender)?;
    let mut config = CONFIG.load(deps.storage)?;
    config.oracle_contract = deps.api.addr_validate(&oracle_contract)?;
    commit_config(deps.storage, config, "oracle_contract")
}

pub fn set_dvn_config(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    dvn_config: Option<String>,
) -> Result<Response, ContractError> {
    require_role(deps.storage, Role::Admin, &info.sender)?;
    let mut config = CONFIG.load(deps.storage)?;
    config.dvn_config = dvn_config
        .map(|a| deps.api.addr_validate(&a))
        .transpose()?;
    commit_config(deps.storage, config, "dvn_config")
}

/// Send collected fees to `to`. Admin only.
pub fn withdraw_fee(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    to: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    require_role(deps.storage, Role::Admin, &info.sender)?;
    if amount.is_zero() {
        return Err(ContractError::InvalidConfig {
            reason: "withdraw amount must be non-zero".to_string(),
        });
    }
    let recipient = deps.api.addr_validate(&to)?;
    let config = CONFIG.load(deps.storage)?;

    let send_msg = BankMsg::Send {
        to_address: recipient.to_string(),
        amount: coins(amount.u128(), &config.fee_denom),
    };

    Ok(Response::new()
        .add_message(send_msg)
        .add_attribute("action", "withdraw_fee")
        .add_attribute("to", recipient.to_string())
        .add_attribute("amount", amount.to_string())
        .add_event(
            Event::new("dvn_fee_withdrawn")
                .add_attribute("to", recipient.to_string())
                .add_attribute("amount", amount.to_string())
                .add_attribute("denom", config.fee_denom),
        ))
}
