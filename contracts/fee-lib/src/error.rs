use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("unauthorized: {reason}")]
    Unauthorized { reason: String },

    #[error("eid {dst_eid} not supported")]
    EidNotSupported { dst_eid: u32 },

    #[error("unsupported options")]
    UnsupportedOptions {},

    #[error("price feed not set")]
    PriceFeedNotSet {},

    #[error("invalid config: {reason}")]
    InvalidConfig { reason: String },
}
