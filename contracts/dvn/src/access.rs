use cosmwasm_std::{Addr, DepsMut, Empty, Env, Event, MessageInfo, Response, StdResult, Storage};
use dvn_common::Role;

use crate::error::ContractError;
use crate::state::{ADMIN_COUNT, ROLES};

pub fn has_role(storage: &dyn Storage, role: Role, addr: &Addr) -> bool {
    ROLES.has(storage, (role.as_str(), addr))
}

pub fn require_role(storage: &dyn Storage, role: Role, addr: &Addr) -> Result<(), ContractError> {
    if !has_role(storage, role, addr) {
        return Err(ContractError::Unauthorized {
            reason: format!("{} lacks role {}", addr, role.as_str()),
        });
    }
    Ok(())
}

/// Write a grant without an authorization check. Returns false when the
/// grant already existed.
pub(crate) fn store_grant(storage: &mut dyn Storage, role: Role, addr: &Addr) -> StdResult<bool> {
    if has_role(storage, role, addr) {
        return Ok(false);
    }
    ROLES.save(storage, (role.as_str(), addr), &Empty {})?;
    if role == Role::Admin {
        let count = ADMIN_COUNT.may_load(storage)?.unwrap_or(0);
        ADMIN_COUNT.save(storage, &(count + 1))?;
    }
    Ok(true)
}

/// Grant `role` to `address`. Admin only; granting an existing role is a no-op.
pub fn grant_role(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    role: Role,
    address: String,
) -> Result<Response, ContractError> {
    require_role(deps.storage, Role::Admin, &info.sender)?;
    let addr = deps.api.addr_validate(&address)?;

    let granted = store_grant(deps.storage, role, &addr)?;

    let mut response = Response::new()
        .add_attribute("action", "grant_role")
        .add_attribute("role", role.as_str())
        .add_attribute("address", addr.to_string());
    if granted {
        response = response.add_event(role_changed_event(role, &addr, true));
    }
    Ok(response)
}

/// Revoke `role` from `address`. Admin only. The last admin cannot be
/// revoked.
pub fn revoke_role(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    role: Role,
    address: String,
) -> Result<Response, ContractError> {
    require_role(deps.storage, Role::Admin, &info.sender)?;
    let addr = deps.api.addr_validate(&address)?;

    let held = has_role(deps.storage, role, &addr);
    if held && role == Role::Admin {
        let count = ADMIN_COUNT.load(deps.storage)?;
        if count <= 1 {
            return Err(ContractError::Unauthorized {
                reason: "cannot revoke the last admin".to_string(),
            });
        }
        ADMIN_COUNT.save(deps.storage, &(count - 1))?;
    }

    let mut response = Response::new()
        .add_attribute("action", "revoke_role")
        .add_attribute("role", role.as_str())
        .add_attribute("address", addr.to_string());
    if held {
        ROLES.remove(deps.storage, (role.as_str(), &addr));
        response = response.add_event(role_changed_event(role, &addr, false));
    }
    Ok(response)
}

fn role_changed_event(role: Role, addr: &Addr, granted: bool) -> Event {
    Event::new("dvn_role_changed")
        .add_attribute("role", role.as_str())
        .add_attribute("identity", addr.to_string())
        .add_attribute("granted", granted.to_string())
}
