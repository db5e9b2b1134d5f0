use cosmwasm_std::{to_json_binary, Binary, Deps, Order, StdError, StdResult};
use cw_storage_plus::Bound;
use dvn_common::Role;

use crate::access::has_role;
use crate::fee::compute_fee;
use crate::msg::{DstConfigEntry, JobResponse, JobsResponse};
use crate::state::{CONFIG, DST_CONFIGS, FINALIZATIONS, JOBS, JOB_STATUS, NEXT_JOB_ID, ROLES};

pub fn query_config(deps: Deps) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    to_json_binary(&config)
}

/// Absent chains read as the zero config with `supported = false`.
pub fn query_dst_config(deps: Deps, dst_eid: u32) -> StdResult<Binary> {
    let config = DST_CONFIGS
        .may_load(deps.storage, dst_eid)?
        .unwrap_or_default();
    to_json_binary(&config)
}

pub fn query_dst_configs(
    deps: Deps,
    start_after: Option<u32>,
    limit: Option<u32>,
) -> StdResult<Binary> {
    let limit = limit.unwrap_or(30).min(100) as usize;
    let start = start_after.map(Bound::exclusive);

    let entries: Vec<DstConfigEntry> = DST_CONFIGS
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .filter_map(|r| r.ok())
        .map(|(dst_eid, config)| DstConfigEntry { dst_eid, config })
        .collect();

    to_json_binary(&entries)
}

fn load_job_response(deps: Deps, job_id: u64) -> StdResult<Option<JobResponse>> {
    let Some(job) = JOBS.may_load(deps.storage, job_id)? else {
        return Ok(None);
    };
    let status = JOB_STATUS.load(deps.storage, job_id)?;
    let finalization = FINALIZATIONS.may_load(deps.storage, job_id)?;
    Ok(Some(JobResponse {
        job,
        status,
        finalization,
    }))
}

pub fn query_job(deps: Deps, job_id: u64) -> StdResult<Binary> {
    to_json_binary(&load_job_response(deps, job_id)?)
}

pub fn query_jobs(deps: Deps, start_after: Option<u64>, limit: Option<u32>) -> StdResult<Binary> {
    let limit = limit.unwrap_or(20).min(100) as usize;
    let start = start_after.map(Bound::exclusive);

    let ids: Vec<u64> = JOBS
        .keys(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .collect::<StdResult<_>>()?;

    let mut jobs = Vec::with_capacity(ids.len());
    for id in ids {
        if let Some(job) = load_job_response(deps, id)? {
            jobs.push(job);
        }
    }

    to_json_binary(&JobsResponse { jobs })
}

pub fn query_next_job_id(deps: Deps) -> StdResult<Binary> {
    let next = NEXT_JOB_ID.may_load(deps.storage)?.unwrap_or(1);
    to_json_binary(&next)
}

pub fn query_fee_preview(
    deps: Deps,
    dst_eid: u32,
    confirmations: u64,
    sender: String,
    options: Binary,
) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    let fee = compute_fee(deps, &config, dst_eid, confirmations, &sender, &options)
        .map_err(|e| StdError::generic_err(e.to_string()))?;
    to_json_binary(&fee)
}

pub fn query_has_role(deps: Deps, role: Role, address: String) -> StdResult<Binary> {
    let addr = deps.api.addr_validate(&address)?;
    to_json_binary(&has_role(deps.storage, role, &addr))
}

pub fn query_role_members(
    deps: Deps,
    role: Role,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<Binary> {
    let limit = limit.unwrap_or(30).min(100) as usize;
    let start_addr = start_after
        .map(|a| deps.api.addr_validate(&a))
        .transpose()?;
    let start = start_addr.as_ref().map(Bound::exclusive);

    let members: Vec<String> = ROLES
        .prefix(role.as_str())
        .keys(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .filter_map(|r| r.ok())
        .map(|addr| addr.to_string())
        .collect();

    to_json_binary(&members)
}
