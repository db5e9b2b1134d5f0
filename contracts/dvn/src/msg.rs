use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Binary, Uint128, Uint256};
use dvn_common::{JobStatus, PublicKey, Role, VerificationResult};

use crate::state::{ChainConfig, Finalization, GlobalConfig, Job};

#[cw_serde]
pub struct InstantiateMsg {
    pub app_id: Uint256,
    pub oracle_public_key: PublicKey,
    /// Address allowed to report verification results
    pub oracle_contract: String,
    /// Granted MESSAGE_LIB at instantiation
    pub message_libs: Vec<String>,
    pub price_feed: Option<String>,
    pub fee_lib: Option<String>,
    pub default_multiplier_bps: u32,
    pub fee: Uint128,
    pub fee_denom: String,
    pub dvn_config: Option<String>,
}

/// A verification request as submitted by a message library.
#[cw_serde]
pub struct AssignJobParam {
    pub dst_eid: u32,
    /// Hex-encoded 81-byte packet header
    pub packet_header_hex: String,
    /// Hex-encoded 32-byte payload hash
    pub payload_hash_hex: String,
    pub confirmations: u64,
    pub sender: String,
}

#[cw_serde]
pub struct DstConfigParam {
    pub dst_eid: u32,
    pub gas: Uint128,
    pub multiplier_bps: u32,
    pub floor_margin_usd: Uint128,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Register a verification job. MESSAGE_LIB only; the fee is paid in
    /// `fee_denom` via attached funds.
    AssignJob {
        param: AssignJobParam,
        options: Binary,
    },
    /// Oracle callback finalizing a pending job.
    ReportVerification {
        job_id: u64,
        payload_hash_hex: String,
        result: VerificationResult,
    },
    SetSupportedDstChain {
        dst_eid: u32,
        supported: bool,
    },
    SetDstConfig {
        params: Vec<DstConfigParam>,
    },
    /// Set or clear the fee-policy delegate.
    SetFeeLib {
        fee_lib: Option<String>,
    },
    SetPriceFeed {
        price_feed: Option<String>,
    },
    SetDefaultMultiplierBps {
        multiplier_bps: u32,
    },
    SetOraclePublicKey {
        public_key: PublicKey,
    },
    SetAppId {
        app_id: Uint256,
    },
    SetFee {
        fee: Uint128,
    },
    SetOracleContract {
        oracle_contract: String,
    },
    SetDvnConfig {
        dvn_config: Option<String>,
    },
    GrantRole {
        role: Role,
        address: String,
    },
    RevokeRole {
        role: Role,
        address: String,
    },
    /// Send collected fees out of the contract. Admin only.
    WithdrawFee {
        to: String,
        amount: Uint128,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(GlobalConfig)]
    Config {},

    #[returns(ChainConfig)]
    DstConfig { dst_eid: u32 },

    #[returns(Vec<DstConfigEntry>)]
    DstConfigs {
        start_after: Option<u32>,
        limit: Option<u32>,
    },

    #[returns(Option<JobResponse>)]
    Job { job_id: u64 },

    #[returns(JobsResponse)]
    Jobs {
        start_after: Option<u64>,
        limit: Option<u32>,
    },

    #[returns(u64)]
    NextJobId {},

    /// Fee a job with these parameters would be charged right now.
    #[returns(Uint128)]
    FeePreview {
        dst_eid: u32,
        confirmations: u64,
        sender: String,
        options: Binary,
    },

    #[returns(bool)]
    HasRole { role: Role, address: String },

    #[returns(Vec<String>)]
    RoleMembers {
        role: Role,
        start_after: Option<String>,
        limit: Option<u32>,
    },
}

#[cw_serde]
pub struct MigrateMsg {}

/// Set as response data on a successful AssignJob.
#[cw_serde]
pub struct AssignJobResponse {
    pub job_id: u64,
    pub fee: Uint128,
}

#[cw_serde]
pub struct DstConfigEntry {
    pub dst_eid: u32,
    pub config: ChainConfig,
}

#[cw_serde]
pub struct JobResponse {
    pub job: Job,
    pub status: JobStatus,
    pub finalization: Option<Finalization>,
}

#[cw_serde]
pub struct JobsResponse {
    pub jobs: Vec<JobResponse>,
}
