pub mod fee;
pub mod oracle;
pub mod packet;
pub mod types;

pub use packet::{PacketHeader, PacketHeaderError, PACKET_HEADER_LEN};
pub use types::{JobStatus, PublicKey, Role, VerificationResult};
