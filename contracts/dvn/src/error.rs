use cosmwasm_std::{StdError, Uint128};
use dvn_common::PacketHeaderError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("unauthorized: {reason}")]
    Unauthorized { reason: String },

    #[error("unsupported destination chain {dst_eid}")]
    UnsupportedChain { dst_eid: u32 },

    #[error("insufficient payment: fee is {required}, paid {paid}")]
    InsufficientPayment { required: Uint128, paid: Uint128 },

    #[error("fee policy failed: {reason}")]
    FeePolicyError { reason: String },

    #[error("job {job_id} not found")]
    UnknownJob { job_id: u64 },

    #[error("job {job_id} is already finalized")]
    AlreadyFinalized { job_id: u64 },

    #[error("invalid config: {reason}")]
    InvalidConfig { reason: String },

    #[error("invalid hex input: {field}")]
    InvalidHex { field: String },

    #[error("invalid packet header: {0}")]
    InvalidPacketHeader(#[from] PacketHeaderError),

    #[error("packet header targets chain {header_dst_eid}, request targets {dst_eid}")]
    PacketHeaderMismatch { dst_eid: u32, header_dst_eid: u32 },

    #[error("invalid payload hash length: expected 32 bytes, got {len}")]
    InvalidPayloadHash { len: usize },

    #[error("payload hash does not match job {job_id}")]
    PayloadHashMismatch { job_id: u64 },

    #[error("payment must be sent in {expected}, got {denom}")]
    WrongDenom { expected: String, denom: String },
}
