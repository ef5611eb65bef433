//! Journal frame format
//!
//! Each frame on disk is:
//! - Payload length (u32 LE)
//! - Frame kind (u8): APPEND / COMMIT
//! - Payload (JSON, `length` bytes)
//! - Checksum (u32 LE), CRC32 over kind byte and payload
//!
//! A frame is the unit of durability: a commit is acknowledged only once
//! its whole frame has been written and synced.

use crc32fast::Hasher;

use crate::board::ClientRecord;

use super::errors::{StoreError, StoreResult};
use super::unit_of_work::UnitOfWork;

/// Length prefix plus kind byte
pub(crate) const FRAME_HEADER_LEN: u64 = 4 + 1;
/// Trailing checksum
pub(crate) const FRAME_TRAILER_LEN: u64 = 4;
/// Largest payload a frame may declare. Anything larger is corruption.
pub(crate) const MAX_PAYLOAD_LEN: u32 = 16 * 1024 * 1024;

/// Frame kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum FrameKind {
    /// A new record appended to the end of its lane
    Append = 1,
    /// A unit of work
    Commit = 2,
}

impl FrameKind {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(FrameKind::Append),
            2 => Some(FrameKind::Commit),
            _ => None,
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

/// A decoded journal frame
#[derive(Debug, Clone, PartialEq)]
pub enum JournalFrame {
    Append(ClientRecord),
    Commit(UnitOfWork),
}

impl JournalFrame {
    pub fn kind(&self) -> FrameKind {
        match self {
            JournalFrame::Append(_) => FrameKind::Append,
            JournalFrame::Commit(_) => FrameKind::Commit,
        }
    }

    /// Serializes the frame, header and checksum included.
    pub fn encode(&self) -> StoreResult<Vec<u8>> {
        let payload = match self {
            JournalFrame::Append(record) => serde_json::to_vec(record),
            JournalFrame::Commit(unit) => serde_json::to_vec(unit),
        }
        .map_err(|e| StoreError::commit_refused(format!("failed to encode journal frame: {}", e)))?;

        let length = u32::try_from(payload.len())
            .ok()
            .filter(|len| *len <= MAX_PAYLOAD_LEN)
            .ok_or_else(|| {
                StoreError::commit_refused(format!(
                    "journal frame payload of {} bytes exceeds limit",
                    payload.len()
                ))
            })?;

        let kind = self.kind().as_u8();
        let mut bytes =
            Vec::with_capacity((FRAME_HEADER_LEN + FRAME_TRAILER_LEN) as usize + payload.len());
        bytes.extend_from_slice(&length.to_le_bytes());
        bytes.push(kind);
        bytes.extend_from_slice(&payload);
        bytes.extend_from_slice(&frame_checksum(kind, &payload).to_le_bytes());
        Ok(bytes)
    }

    /// Decodes a payload whose checksum has already been verified.
    pub fn decode(kind: u8, payload: &[u8], offset: u64) -> StoreResult<Self> {
        let kind = FrameKind::from_u8(kind).ok_or_else(|| {
            StoreError::corruption_at_offset(offset, format!("unknown frame kind {}", kind))
        })?;

        let decoded = match kind {
            FrameKind::Append => serde_json::from_slice(payload).map(JournalFrame::Append),
            FrameKind::Commit => serde_json::from_slice(payload).map(JournalFrame::Commit),
        };

        decoded.map_err(|e| {
            StoreError::corruption_at_offset(offset, format!("undecodable frame payload: {}", e))
        })
    }
}

/// CRC32 over the kind byte followed by the payload
pub fn frame_checksum(kind: u8, payload: &[u8]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(&[kind]);
    hasher.update(payload);
    hasher.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Lane, NewClient, Position, Priority, RecordId};
    use chrono::Utc;

    fn commit_frame() -> JournalFrame {
        let mut unit = UnitOfWork::new();
        unit.reposition(RecordId::new(2), Position::new(Lane::Complete, Priority::FIRST));
        JournalFrame::Commit(unit)
    }

    #[test]
    fn test_encoded_layout() {
        let bytes = commit_frame().encode().unwrap();

        let length = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as usize;
        assert_eq!(bytes.len(), 4 + 1 + length + 4);
        assert_eq!(bytes[4], FrameKind::Commit.as_u8());

        let payload = &bytes[5..5 + length];
        let stored = u32::from_le_bytes(bytes[5 + length..].try_into().unwrap());
        assert_eq!(stored, frame_checksum(bytes[4], payload));

        let decoded = JournalFrame::decode(bytes[4], payload, 0).unwrap();
        assert_eq!(decoded, commit_frame());
    }

    #[test]
    fn test_checksum_covers_kind_byte() {
        let payload = b"{}";
        assert_ne!(
            frame_checksum(FrameKind::Append.as_u8(), payload),
            frame_checksum(FrameKind::Commit.as_u8(), payload)
        );
    }

    #[test]
    fn test_unknown_kind_is_corruption() {
        let err = JournalFrame::decode(9, b"{}", 64).unwrap_err();
        assert!(err.is_fatal());
        assert_eq!(err.details(), Some("byte_offset: 64"));
    }

    #[test]
    fn test_append_frame_carries_whole_record() {
        let record = crate::board::ClientRecord::from_new(
            RecordId::new(5),
            Priority::FIRST,
            Utc::now(),
            NewClient::new("Umbrella", Lane::Backlog),
        );
        let bytes = JournalFrame::Append(record.clone()).encode().unwrap();
        let length = bytes.len() - 9;
        let decoded = JournalFrame::decode(bytes[4], &bytes[5..5 + length], 0).unwrap();
        assert_eq!(decoded, JournalFrame::Append(record));
    }
}
