use thiserror::Error;

/// Encoded length of a version-1 packet header.
pub const PACKET_HEADER_LEN: usize = 81;
pub const PACKET_VERSION: u8 = 1;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PacketHeaderError {
    #[error("invalid header length: expected 81 bytes, got {got}")]
    InvalidLength { got: usize },

    #[error("unsupported packet version {version}")]
    InvalidVersion { version: u8 },
}

/// Cross-chain packet header as produced by the send library.
///
/// Layout (big-endian, packed):
/// - version (1 byte), always 1
/// - nonce (8 bytes)
/// - src_eid (4 bytes)
/// - sender (32 bytes, left-padded)
/// - dst_eid (4 bytes)
/// - receiver (32 bytes, left-padded)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PacketHeader {
    pub nonce: u64,
    pub src_eid: u32,
    pub sender: [u8; 32],
    pub dst_eid: u32,
    pub receiver: [u8; 32],
}

impl PacketHeader {
    pub fn decode(bytes: &[u8]) -> Result<Self, PacketHeaderError> {
        if bytes.len() != PACKET_HEADER_LEN {
            return Err(PacketHeaderError::InvalidLength { got: bytes.len() });
        }
        if bytes[0] != PACKET_VERSION {
            return Err(PacketHeaderError::InvalidVersion { version: bytes[0] });
        }

        let mut nonce = [0u8; 8];
        nonce.copy_from_slice(&bytes[1..9]);
        let mut src_eid = [0u8; 4];
        src_eid.copy_from_slice(&bytes[9..13]);
        let mut sender = [0u8; 32];
        sender.copy_from_slice(&bytes[13..45]);
        let mut dst_eid = [0u8; 4];
        dst_eid.copy_from_slice(&bytes[45..49]);
        let mut receiver = [0u8; 32];
        receiver.copy_from_slice(&bytes[49..81]);

        Ok(Self {
            nonce: u64::from_be_bytes(nonce),
            src_eid: u32::from_be_bytes(src_eid),
            sender,
            dst_eid: u32::from_be_bytes(dst_eid),
            receiver,
        })
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(PACKET_HEADER_LEN);
        out.push(PACKET_VERSION);
        out.extend_from_slice(&self.nonce.to_be_bytes());
        out.extend_from_slice(&self.src_eid.to_be_bytes());
        out.extend_from_slice(&self.sender);
        out.extend_from_slice(&self.dst_eid.to_be_bytes());
        out.extend_from_slice(&self.receiver);
        out
    }

    /// Receiver rendered as lowercase hex without a prefix.
    pub fn receiver_hex(&self) -> String {
        hex::encode(self.receiver)
    }
}
