use cosmwasm_schema::cw_serde;
use cosmwasm_std::Uint256;

/// Lifecycle of a verification job. `Verified` and `Failed` are terminal.
#[cw_serde]
pub enum JobStatus {
    Pending,
    Verified,
    Failed,
}

impl JobStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, JobStatus::Pending)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Verified => "verified",
            JobStatus::Failed => "failed",
        }
    }
}

/// Outcome the oracle network reports for a job.
#[cw_serde]
pub enum VerificationResult {
    Verified,
    Failed { reason: String },
}

impl VerificationResult {
    pub fn status(&self) -> JobStatus {
        match self {
            VerificationResult::Verified => JobStatus::Verified,
            VerificationResult::Failed { .. } => JobStatus::Failed,
        }
    }
}

/// Capability tags checked at each DVN entry point.
#[cw_serde]
#[derive(Copy, Eq, Hash, PartialOrd, Ord)]
pub enum Role {
    Admin,
    MessageLib,
}

impl Role {
    /// Storage key prefix for the role table.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::MessageLib => "message_lib",
        }
    }
}

/// Oracle group public key: x coordinate of the curve point plus the parity
/// bit of y.
#[cw_serde]
pub struct PublicKey {
    pub x: Uint256,
    pub parity: u8,
}
