use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Binary, Empty, HexBinary, Timestamp, Uint128, Uint256};
use cw_storage_plus::{Item, Map};
use dvn_common::fee::DstConfigView;
use dvn_common::{JobStatus, PublicKey};

pub const CONFIG: Item<GlobalConfig> = Item::new("config");
pub const DST_CONFIGS: Map<u32, ChainConfig> = Map::new("dst_configs");

/// (role tag, identity) -> grant
pub const ROLES: Map<(&str, &Addr), Empty> = Map::new("roles");
/// Number of ADMIN holders, kept alongside ROLES so the last admin can be
/// detected without a range scan.
pub const ADMIN_COUNT: Item<u32> = Item::new("admin_count");

/// Next id handed out by assign_job. Starts at 1 and only advances when a
/// job is actually stored.
pub const NEXT_JOB_ID: Item<u64> = Item::new("next_job_id");
/// Append-only; a record is never rewritten once saved.
pub const JOBS: Map<u64, Job> = Map::new("jobs");
pub const JOB_STATUS: Map<u64, JobStatus> = Map::new("job_status");
pub const FINALIZATIONS: Map<u64, Finalization> = Map::new("finalizations");

#[cw_serde]
pub struct GlobalConfig {
    pub app_id: Uint256,
    pub oracle_public_key: PublicKey,
    /// Only this address may report verification results.
    pub oracle_contract: Addr,
    pub price_feed: Option<Addr>,
    /// Fee-policy delegate. When unset the flat `fee` applies.
    pub fee_lib: Option<Addr>,
    pub default_multiplier_bps: u16,
    /// Flat base fee charged when no delegate is configured
    pub fee: Uint128,
    /// Denom payments are accepted in
    pub fee_denom: String,
    pub dvn_config: Option<Addr>,
    /// Bumped by every setter
    pub version: u64,
}

#[cw_serde]
#[derive(Default)]
pub struct ChainConfig {
    pub supported: bool,
    pub gas: Uint128,
    pub multiplier_bps: u16,
    pub floor_margin_usd: Uint128,
}

impl ChainConfig {
    pub fn view(&self) -> DstConfigView {
        DstConfigView {
            gas: self.gas,
            multiplier_bps: self.multiplier_bps,
            floor_margin_usd: self.floor_margin_usd,
        }
    }
}

#[cw_serde]
pub struct Job {
    pub id: u64,
    /// Message library that assigned the job
    pub origin: Addr,
    pub src_eid: u32,
    pub dst_eid: u32,
    pub nonce: u64,
    pub sender: String,
    /// Hex of the header's 32-byte receiver
    pub receiver: String,
    pub packet_header: HexBinary,
    pub payload_hash: HexBinary,
    pub confirmations: u64,
    pub options: Binary,
    pub fee_paid: Uint128,
    pub created_at: Timestamp,
}

#[cw_serde]
pub struct Finalization {
    pub status: JobStatus,
    pub reported_by: Addr,
    pub finalized_at: Timestamp,
    pub reason: Option<String>,
}
