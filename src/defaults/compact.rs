//! Compact index decoding for raw trailing object data
//!
//! First byte: bit 7 sign, bit 6 continue, bits 0-5 value. Following bytes:
//! bit 7 continue, bits 0-6 value. At most five bytes.

use scroll::ctx::TryFromCtx;
use scroll::Pread;

const MAX_BYTES: usize = 5;

/// Variable-length signed integer as written into package data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompactIndex(pub i32);

impl<'a> TryFromCtx<'a, ()> for CompactIndex {
    type Error = scroll::Error;

    fn try_from_ctx(src: &'a [u8], _ctx: ()) -> Result<(Self, usize), Self::Error> {
        let mut offset = 0;
        let first: u8 = src.gread(&mut offset)?;
        let negative = first & 0x80 != 0;
        let mut more = first & 0x40 != 0;
        let mut value = i64::from(first & 0x3F);
        let mut shift = 6;

        while more {
            if offset >= MAX_BYTES {
                return Err(scroll::Error::BadInput {
                    size: offset,
                    msg: "compact index longer than five bytes",
                });
            }
            let byte: u8 = src.gread(&mut offset)?;
            value |= i64::from(byte & 0x7F) << shift;
            more = byte & 0x80 != 0;
            shift += 7;
        }

        if negative {
            value = -value;
        }
        let value = i32::try_from(value).map_err(|_| scroll::Error::BadInput {
            size: offset,
            msg: "compact index out of range",
        })?;
        Ok((CompactIndex(value), offset))
    }
}

/// Decode the compact index starting at `offset`, if the bytes form one
pub fn read_compact_index(bytes: &[u8], offset: usize) -> Option<i32> {
    bytes.pread::<CompactIndex>(offset).ok().map(|index| index.0)
}
