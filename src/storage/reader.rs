//! Journal reader for replay
//!
//! Frames are read strictly in file order. A frame that is cut short by
//! the end of the file is a torn tail: the write that produced it was never
//! acknowledged, so the caller may drop it. Anything else that fails to
//! verify is corruption and stops replay.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::errors::{StoreError, StoreResult};
use super::frame::{
    frame_checksum, JournalFrame, FRAME_HEADER_LEN, FRAME_TRAILER_LEN, MAX_PAYLOAD_LEN,
};

/// Result of reading one position in the journal
#[derive(Debug)]
pub(crate) enum ReadOutcome {
    Frame(JournalFrame),
    /// Clean end of file
    End,
    /// An incomplete frame starts at `offset` and runs to end of file
    TornTail { offset: u64 },
}

pub(crate) struct JournalReader {
    reader: BufReader<File>,
    offset: u64,
    file_size: u64,
}

impl JournalReader {
    pub fn open(path: &Path) -> StoreResult<Self> {
        let file = File::open(path).map_err(|e| {
            StoreError::io_error(format!("failed to open journal: {}", path.display()), e)
        })?;
        let file_size = file
            .metadata()
            .map_err(|e| StoreError::io_error("failed to read journal metadata", e))?
            .len();

        Ok(Self {
            reader: BufReader::new(file),
            offset: 0,
            file_size,
        })
    }

    /// Byte offset just past the last frame successfully read
    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn read_next(&mut self) -> StoreResult<ReadOutcome> {
        if self.offset >= self.file_size {
            return Ok(ReadOutcome::End);
        }

        let remaining = self.file_size - self.offset;
        if remaining < FRAME_HEADER_LEN {
            return Ok(ReadOutcome::TornTail {
                offset: self.offset,
            });
        }

        let mut length_bytes = [0u8; 4];
        let mut kind = [0u8; 1];
        self.read_exact(&mut length_bytes)?;
        self.read_exact(&mut kind)?;

        let length = u32::from_le_bytes(length_bytes);
        if length > MAX_PAYLOAD_LEN {
            return Err(StoreError::corruption_at_offset(
                self.offset,
                format!("frame declares {} payload bytes", length),
            ));
        }

        let frame_len = FRAME_HEADER_LEN + u64::from(length) + FRAME_TRAILER_LEN;
        if remaining < frame_len {
            return Ok(ReadOutcome::TornTail {
                offset: self.offset,
            });
        }

        let mut payload = vec![0u8; length as usize];
        let mut checksum = [0u8; 4];
        self.read_exact(&mut payload)?;
        self.read_exact(&mut checksum)?;

        if frame_checksum(kind[0], &payload) != u32::from_le_bytes(checksum) {
            return Err(StoreError::corruption_at_offset(
                self.offset,
                "journal frame checksum mismatch",
            ));
        }

        let frame = JournalFrame::decode(kind[0], &payload, self.offset)?;
        self.offset += frame_len;
        Ok(ReadOutcome::Frame(frame))
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> StoreResult<()> {
        self.reader
            .read_exact(buf)
            .map_err(|e| StoreError::io_error(format!("journal read failed at offset {}", self.offset), e))
    }
}
