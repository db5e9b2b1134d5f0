//! The boundary with the off-chain verifier network.
//!
//! The DVN announces work through `dvn_job_assigned` events and accepts
//! results through a `report_verification` execute call issued by the oracle
//! contract. The types here describe both directions so the oracle side can
//! decode events and build callbacks without depending on the DVN crate.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{to_json_binary, Binary, Event, StdError, StdResult, Uint128, WasmMsg};

use crate::types::{JobStatus, VerificationResult};

pub const JOB_ASSIGNED_EVENT: &str = "dvn_job_assigned";
pub const JOB_FINALIZED_EVENT: &str = "dvn_job_finalized";

/// Everything the oracle needs to verify a job, as carried by the
/// `dvn_job_assigned` event.
#[cw_serde]
pub struct JobAssigned {
    pub job_id: u64,
    pub origin: String,
    pub src_eid: u32,
    pub dst_eid: u32,
    pub nonce: u64,
    pub sender: String,
    pub receiver: String,
    /// Hex, 32 bytes
    pub payload_hash: String,
    /// Hex, 81 bytes
    pub packet_header: String,
    pub confirmations: u64,
    pub options: Binary,
    pub fee: Uint128,
}

impl JobAssigned {
    pub fn into_event(self) -> Event {
        Event::new(JOB_ASSIGNED_EVENT)
            .add_attribute("job_id", self.job_id.to_string())
            .add_attribute("origin", self.origin)
            .add_attribute("src_eid", self.src_eid.to_string())
            .add_attribute("dst_eid", self.dst_eid.to_string())
            .add_attribute("nonce", self.nonce.to_string())
            .add_attribute("sender", self.sender)
            .add_attribute("receiver", self.receiver)
            .add_attribute("payload_hash", self.payload_hash)
            .add_attribute("packet_header", self.packet_header)
            .add_attribute("confirmations", self.confirmations.to_string())
            .add_attribute("options", self.options.to_base64())
            .add_attribute("fee", self.fee.to_string())
    }

    /// Parse an event emitted by the DVN. Accepts the `wasm-` prefix the
    /// chain adds to contract events.
    pub fn from_event(event: &Event) -> StdResult<Self> {
        expect_type(event, JOB_ASSIGNED_EVENT)?;
        Ok(Self {
            job_id: parse_attr(event, "job_id")?,
            origin: attr(event, "origin")?.to_string(),
            src_eid: parse_attr(event, "src_eid")?,
            dst_eid: parse_attr(event, "dst_eid")?,
            nonce: parse_attr(event, "nonce")?,
            sender: attr(event, "sender")?.to_string(),
            receiver: attr(event, "receiver")?.to_string(),
            payload_hash: attr(event, "payload_hash")?.to_string(),
            packet_header: attr(event, "packet_header")?.to_string(),
            confirmations: parse_attr(event, "confirmations")?,
            options: Binary::from_base64(attr(event, "options")?)?,
            fee: parse_attr(event, "fee")?,
        })
    }
}

#[cw_serde]
pub struct JobFinalized {
    pub job_id: u64,
    pub status: JobStatus,
}

impl JobFinalized {
    pub fn into_event(self) -> Event {
        Event::new(JOB_FINALIZED_EVENT)
            .add_attribute("job_id", self.job_id.to_string())
            .add_attribute("status", self.status.as_str())
    }

    pub fn from_event(event: &Event) -> StdResult<Self> {
        expect_type(event, JOB_FINALIZED_EVENT)?;
        let status = match attr(event, "status")? {
            "pending" => JobStatus::Pending,
            "verified" => JobStatus::Verified,
            "failed" => JobStatus::Failed,
            other => {
                return Err(StdError::generic_err(format!("unknown job status {other}")));
            }
        };
        Ok(Self {
            job_id: parse_attr(event, "job_id")?,
            status,
        })
    }
}

/// Callback surface of the DVN as seen by the oracle contract. Serializes
/// identically to the DVN's own `ExecuteMsg::ReportVerification`.
#[cw_serde]
pub enum GatewayExecuteMsg {
    ReportVerification {
        job_id: u64,
        payload_hash_hex: String,
        result: VerificationResult,
    },
}

/// Build the callback an oracle contract dispatches once the verifier
/// network has reached a result for `job_id`.
pub fn report_verification_msg(
    dvn: impl Into<String>,
    job_id: u64,
    payload_hash_hex: impl Into<String>,
    result: VerificationResult,
) -> StdResult<WasmMsg> {
    Ok(WasmMsg::Execute {
        contract_addr: dvn.into(),
        msg: to_json_binary(&GatewayExecuteMsg::ReportVerification {
            job_id,
            payload_hash_hex: payload_hash_hex.into(),
            result,
        })?,
        funds: vec![],
    })
}

fn expect_type(event: &Event, ty: &str) -> StdResult<()> {
    let actual = event.ty.strip_prefix("wasm-").unwrap_or(&event.ty);
    if actual != ty {
        return Err(StdError::generic_err(format!(
            "expected event {ty}, got {}",
            event.ty
        )));
    }
    Ok(())
}

fn attr<'a>(event: &'a Event, key: &str) -> StdResult<&'a str> {
    event
        .attributes
        .iter()
        .find(|a| a.key == key)
        .map(|a| a.value.as_str())
        .ok_or_else(|| StdError::generic_err(format!("missing attribute {key}")))
}

fn parse_attr<T: std::str::FromStr>(event: &Event, key: &str) -> StdResult<T> {
    attr(event, key)?
        .parse()
        .map_err(|_| StdError::generic_err(format!("malformed attribute {key}")))
}
