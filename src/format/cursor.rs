//! Cursor-based chunk reading
//!
//! [`ChunkCursor`] wraps a borrowed byte buffer and consumes it strictly
//! from the front: little-endian integers, raw byte runs, and tagged chunk
//! headers. Every read checks the remaining length first, which makes the
//! cursor the single point of truncation detection for the whole decoder.
//! [`ChunkCursor::finish`] enforces that a content buffer was consumed
//! exactly, so format drift surfaces as an error instead of silently
//! skewing every later read.

use crate::error::{ParseError, VoxResult};

/// Renders a chunk tag for labels and error messages. Non-printable bytes
/// come out as `?` so hostile tags cannot mangle log lines.
pub fn tag_label(tag: &[u8; 4]) -> String {
    tag.iter()
        .map(|&b| {
            if b.is_ascii_graphic() || b == b' ' {
                b as char
            } else {
                '?'
            }
        })
        .collect()
}

/// Front-consuming reader over a borrowed byte buffer.
///
/// The label names what the buffer holds ("stream" for the whole file, the
/// chunk tag for chunk content) and is threaded into every error.
#[derive(Debug)]
pub struct ChunkCursor<'a> {
    buf: &'a [u8],
    pos: usize,
    label: String,
}

/// One chunk record lifted out of the stream: the tag, the declared child
/// payload size, and the content buffer sliced to its declared length.
#[derive(Debug, Clone, Copy)]
pub struct RawChunk<'a> {
    pub tag: [u8; 4],
    pub children_size: i32,
    pub content: &'a [u8],
}

impl<'a> RawChunk<'a> {
    /// A cursor over this chunk's content, labeled with the chunk tag.
    pub fn cursor(&self) -> ChunkCursor<'a> {
        ChunkCursor::new(self.content, tag_label(&self.tag))
    }
}

impl<'a> ChunkCursor<'a> {
    pub fn new(buf: &'a [u8], label: impl Into<String>) -> Self {
        Self {
            buf,
            pos: 0,
            label: label.into(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    fn take(&mut self, needed: usize) -> Result<&'a [u8], ParseError> {
        let remaining = self.remaining();
        if needed > remaining {
            return Err(ParseError::Truncated {
                chunk: self.label.clone(),
                needed,
                remaining,
            });
        }
        let slice = &self.buf[self.pos..self.pos + needed];
        self.pos += needed;
        Ok(slice)
    }

    /// Reads `count` raw bytes.
    pub fn read_bytes(&mut self, count: usize) -> VoxResult<&'a [u8]> {
        Ok(self.take(count)?)
    }

    pub fn read_u8(&mut self) -> VoxResult<u8> {
        Ok(self.take(1)?[0])
    }

    pub fn read_i32(&mut self) -> VoxResult<i32> {
        let bytes = self.take(4)?;
        Ok(i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Reads a four-byte tag.
    pub fn read_tag(&mut self) -> VoxResult<[u8; 4]> {
        let bytes = self.take(4)?;
        Ok([bytes[0], bytes[1], bytes[2], bytes[3]])
    }

    /// Reads an int32 count or length field that must be non-negative.
    /// `field` names the field in the error when it is not.
    pub fn read_len(&mut self, field: &'static str) -> VoxResult<usize> {
        let value = self.read_i32()?;
        if value < 0 {
            return Err(ParseError::NegativeCount {
                chunk: self.label.clone(),
                field,
                value,
            }
            .into());
        }
        Ok(value as usize)
    }

    /// Reads one chunk header and slices out its content buffer. The
    /// content bytes are consumed here; children chunks (if any) follow in
    /// the stream and are read as further `read_chunk` calls.
    pub fn read_chunk(&mut self) -> VoxResult<RawChunk<'a>> {
        let tag = self.read_tag()?;
        let content_size = self.read_i32()?;
        if content_size < 0 {
            return Err(ParseError::NegativeCount {
                chunk: tag_label(&tag),
                field: "content size",
                value: content_size,
            }
            .into());
        }
        let children_size = self.read_i32()?;
        if children_size < 0 {
            return Err(ParseError::NegativeCount {
                chunk: tag_label(&tag),
                field: "children size",
                value: children_size,
            }
            .into());
        }

        let needed = content_size as usize;
        let remaining = self.remaining();
        if needed > remaining {
            return Err(ParseError::Truncated {
                chunk: tag_label(&tag),
                needed,
                remaining,
            }
            .into());
        }
        let content = &self.buf[self.pos..self.pos + needed];
        self.pos += needed;

        Ok(RawChunk {
            tag,
            children_size,
            content,
        })
    }

    /// Fails if any bytes remain unconsumed. Called after a chunk decoder
    /// finishes so a length mismatch is never ignored.
    pub fn finish(self) -> VoxResult<()> {
        let count = self.remaining();
        if count > 0 {
            return Err(ParseError::TrailingBytes {
                chunk: self.label,
                count,
            }
            .into());
        }
        Ok(())
    }
}
