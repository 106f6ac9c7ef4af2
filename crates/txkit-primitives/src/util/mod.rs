//! Binary serialization utilities.
//!
//! Provides the VarInt codec plus the `ByteReader` and `ByteWriter` types
//! used to walk and assemble wire-format transaction data. All reads are
//! bounds-checked; a buffer that runs out mid-field fails with
//! `PrimitivesError::UnexpectedEof` instead of reading out of range.

use crate::PrimitivesError;

// ---------------------------------------------------------------------------
// VarInt
// ---------------------------------------------------------------------------

/// A protocol variable-length integer.
///
/// VarInt is used in transaction data to carry counts and field lengths.
/// The first byte selects the width: values below 0xFD are stored in the
/// selector byte itself, while 0xFD/0xFE/0xFF announce a trailing 2/4/8-byte
/// little-endian value (3/5/9 bytes total).
///
/// See <http://learnmeabitcoin.com/glossary/varint>
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VarInt(pub u64);

impl VarInt {
    /// Decode a VarInt from the front of a byte slice.
    ///
    /// Any of the four prefix forms is accepted, including non-minimal
    /// encodings of small values; re-encoding always normalizes to the
    /// shortest form.
    ///
    /// # Arguments
    /// * `data` - Byte slice starting with a VarInt encoding.
    ///
    /// # Returns
    /// The decoded value and the number of bytes consumed, or
    /// `UnexpectedEof` if the slice is shorter than the selector requires.
    pub fn from_bytes(data: &[u8]) -> Result<(Self, usize), PrimitivesError> {
        let selector = *data.first().ok_or(PrimitivesError::UnexpectedEof)?;
        match selector {
            0xff => {
                let tail = data.get(1..9).ok_or(PrimitivesError::UnexpectedEof)?;
                let mut buf = [0u8; 8];
                buf.copy_from_slice(tail);
                Ok((VarInt(u64::from_le_bytes(buf)), 9))
            }
            0xfe => {
                let tail = data.get(1..5).ok_or(PrimitivesError::UnexpectedEof)?;
                let mut buf = [0u8; 4];
                buf.copy_from_slice(tail);
                Ok((VarInt(u32::from_le_bytes(buf) as u64), 5))
            }
            0xfd => {
                let tail = data.get(1..3).ok_or(PrimitivesError::UnexpectedEof)?;
                Ok((VarInt(u16::from_le_bytes([tail[0], tail[1]]) as u64), 3))
            }
            b => Ok((VarInt(b as u64), 1)),
        }
    }

    /// Return the wire-format byte length of this VarInt.
    ///
    /// # Returns
    /// 1, 3, 5, or 9 depending on the value.
    pub fn length(&self) -> usize {
        if self.0 < 0xfd {
            1
        } else if self.0 < 0x10000 {
            3
        } else if self.0 < 0x1_0000_0000 {
            5
        } else {
            9
        }
    }

    /// Encode the VarInt into a new byte vector in minimal form.
    ///
    /// # Returns
    /// A `Vec<u8>` of 1, 3, 5, or 9 bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = vec![0u8; self.length()];
        self.put_bytes(&mut buf);
        buf
    }

    /// Write the VarInt into a destination buffer in minimal form.
    ///
    /// The buffer must be at least `self.length()` bytes long.
    ///
    /// # Arguments
    /// * `dst` - Destination buffer to write into.
    ///
    /// # Returns
    /// The number of bytes written.
    pub fn put_bytes(&self, dst: &mut [u8]) -> usize {
        let v = self.0;
        if v < 0xfd {
            dst[0] = v as u8;
            1
        } else if v < 0x10000 {
            dst[0] = 0xfd;
            dst[1..3].copy_from_slice(&(v as u16).to_le_bytes());
            3
        } else if v < 0x1_0000_0000 {
            dst[0] = 0xfe;
            dst[1..5].copy_from_slice(&(v as u32).to_le_bytes());
            5
        } else {
            dst[0] = 0xff;
            dst[1..9].copy_from_slice(&v.to_le_bytes());
            9
        }
    }

    /// Return the underlying u64 value.
    ///
    /// # Returns
    /// The integer value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for VarInt {
    fn from(v: u64) -> Self {
        VarInt(v)
    }
}

impl From<usize> for VarInt {
    fn from(v: usize) -> Self {
        VarInt(v as u64)
    }
}

// ---------------------------------------------------------------------------
// ByteReader
// ---------------------------------------------------------------------------

/// A cursor-based reader over wire-format binary data.
///
/// Wraps a byte slice and maintains a read position, providing methods to
/// read fixed-size little-endian integers and VarInt values. The position
/// is queryable so callers can report how many bytes a decode consumed.
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    /// Create a new reader over the given byte slice.
    ///
    /// # Arguments
    /// * `data` - The byte slice to read from.
    ///
    /// # Returns
    /// A `ByteReader` positioned at the start of the data.
    pub fn new(data: &'a [u8]) -> Self {
        ByteReader { data, pos: 0 }
    }

    /// Read `n` bytes and advance the position.
    ///
    /// # Arguments
    /// * `n` - Number of bytes to read.
    ///
    /// # Returns
    /// A byte slice of length `n`, or `UnexpectedEof` if fewer bytes remain.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], PrimitivesError> {
        let end = self
            .pos
            .checked_add(n)
            .ok_or(PrimitivesError::UnexpectedEof)?;
        let slice = self
            .data
            .get(self.pos..end)
            .ok_or(PrimitivesError::UnexpectedEof)?;
        self.pos = end;
        Ok(slice)
    }

    /// Read a single byte and advance the position.
    ///
    /// # Returns
    /// The byte value, or `UnexpectedEof` if no data remains.
    pub fn read_u8(&mut self) -> Result<u8, PrimitivesError> {
        let bytes = self.read_bytes(1)?;
        Ok(bytes[0])
    }

    /// Read a little-endian u16 and advance the position by 2 bytes.
    ///
    /// # Returns
    /// The decoded u16, or `UnexpectedEof` if fewer than 2 bytes remain.
    pub fn read_u16_le(&mut self) -> Result<u16, PrimitivesError> {
        let bytes = self.read_bytes(2)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    /// Read a little-endian u32 and advance the position by 4 bytes.
    ///
    /// # Returns
    /// The decoded u32, or `UnexpectedEof` if fewer than 4 bytes remain.
    pub fn read_u32_le(&mut self) -> Result<u32, PrimitivesError> {
        let bytes = self.read_bytes(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Read a little-endian u64 and advance the position by 8 bytes.
    ///
    /// # Returns
    /// The decoded u64, or `UnexpectedEof` if fewer than 8 bytes remain.
    pub fn read_u64_le(&mut self) -> Result<u64, PrimitivesError> {
        let bytes = self.read_bytes(8)?;
        let mut buf = [0u8; 8];
        buf.copy_from_slice(bytes);
        Ok(u64::from_le_bytes(buf))
    }

    /// Read a VarInt and advance the position by its encoded width.
    ///
    /// # Returns
    /// The decoded `VarInt`, or `UnexpectedEof` if the encoding is truncated.
    pub fn read_varint(&mut self) -> Result<VarInt, PrimitivesError> {
        match self.read_u8()? {
            0xff => Ok(VarInt(self.read_u64_le()?)),
            0xfe => Ok(VarInt(self.read_u32_le()? as u64)),
            0xfd => Ok(VarInt(self.read_u16_le()? as u64)),
            b => Ok(VarInt(b as u64)),
        }
    }

    /// Return the number of unread bytes.
    ///
    /// # Returns
    /// The count of bytes between the current position and the end.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Return the current read position (bytes consumed so far).
    ///
    /// # Returns
    /// The byte offset of the cursor.
    pub fn position(&self) -> usize {
        self.pos
    }
}

// ---------------------------------------------------------------------------
// ByteWriter
// ---------------------------------------------------------------------------

/// A buffer-based writer for wire-format binary data.
///
/// Wraps a `Vec<u8>` and appends fixed-size little-endian integers and
/// VarInt values.
pub struct ByteWriter {
    buf: Vec<u8>,
}

impl ByteWriter {
    /// Create a new empty writer.
    ///
    /// # Returns
    /// A `ByteWriter` with an empty internal buffer.
    pub fn new() -> Self {
        ByteWriter { buf: Vec::new() }
    }

    /// Create a new writer with a pre-allocated capacity.
    ///
    /// # Arguments
    /// * `capacity` - Initial byte capacity of the internal buffer.
    ///
    /// # Returns
    /// A `ByteWriter` with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        ByteWriter {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Append raw bytes to the buffer.
    ///
    /// # Arguments
    /// * `bytes` - The bytes to append.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Append a single byte to the buffer.
    ///
    /// # Arguments
    /// * `val` - The byte value.
    pub fn write_u8(&mut self, val: u8) {
        self.buf.push(val);
    }

    /// Append a little-endian u16 (2 bytes) to the buffer.
    ///
    /// # Arguments
    /// * `val` - The u16 value.
    pub fn write_u16_le(&mut self, val: u16) {
        self.buf.extend_from_slice(&val.to_le_bytes());
    }

    /// Append a little-endian u32 (4 bytes) to the buffer.
    ///
    /// # Arguments
    /// * `val` - The u32 value.
    pub fn write_u32_le(&mut self, val: u32) {
        self.buf.extend_from_slice(&val.to_le_bytes());
    }

    /// Append a little-endian u64 (8 bytes) to the buffer.
    ///
    /// # Arguments
    /// * `val` - The u64 value.
    pub fn write_u64_le(&mut self, val: u64) {
        self.buf.extend_from_slice(&val.to_le_bytes());
    }

    /// Append a VarInt to the buffer in minimal form.
    ///
    /// # Arguments
    /// * `varint` - The VarInt value to encode and append.
    pub fn write_varint(&mut self, varint: VarInt) {
        let mut buf = [0u8; 9];
        let n = varint.put_bytes(&mut buf);
        self.buf.extend_from_slice(&buf[..n]);
    }

    /// Consume the writer and return the accumulated bytes.
    ///
    /// # Returns
    /// The internal byte buffer.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Return a reference to the current buffer contents.
    ///
    /// # Returns
    /// A byte slice of the written data.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Return the current length of the buffer.
    ///
    /// # Returns
    /// The number of bytes written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Check if the buffer is empty.
    ///
    /// # Returns
    /// `true` if no bytes have been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

impl Default for ByteWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- VarInt decode --

    #[test]
    fn test_decode_varint_widths() {
        // 0xff prefix -> 8 data bytes after prefix -> size 9
        let (vi, sz) = VarInt::from_bytes(&[0xff, 0, 0, 0, 0, 0, 0, 0, 0]).unwrap();
        assert_eq!(vi.0, 0);
        assert_eq!(sz, 9);

        // 0xfe prefix -> 4 data bytes after prefix -> size 5
        let (vi, sz) = VarInt::from_bytes(&[0xfe, 0, 0, 0, 0]).unwrap();
        assert_eq!(vi.0, 0);
        assert_eq!(sz, 5);

        // 0xfd prefix -> 2 data bytes after prefix -> size 3
        let (vi, sz) = VarInt::from_bytes(&[0xfd, 0, 0]).unwrap();
        assert_eq!(vi.0, 0);
        assert_eq!(sz, 3);

        // Plain byte -> the value itself, size 1
        let (vi, sz) = VarInt::from_bytes(&[0x01]).unwrap();
        assert_eq!(vi.0, 1);
        assert_eq!(sz, 1);
    }

    #[test]
    fn test_decode_varint_truncated() {
        assert!(VarInt::from_bytes(&[]).is_err());
        assert!(VarInt::from_bytes(&[0xfd, 0x00]).is_err());
        assert!(VarInt::from_bytes(&[0xfe, 0x00, 0x00, 0x00]).is_err());
        assert!(VarInt::from_bytes(&[0xff, 0, 0, 0, 0, 0, 0, 0]).is_err());
    }

    /// Non-minimal encodings of small values decode to the same value;
    /// re-encoding produces the minimal form.
    #[test]
    fn test_decode_varint_non_canonical() {
        let (vi, sz) = VarInt::from_bytes(&[0xfd, 0x0a, 0x00]).unwrap();
        assert_eq!(vi.0, 10);
        assert_eq!(sz, 3);
        assert_eq!(vi.to_bytes(), vec![0x0a]);

        let (vi, sz) = VarInt::from_bytes(&[0xfe, 0x0a, 0x00, 0x00, 0x00]).unwrap();
        assert_eq!(vi.0, 10);
        assert_eq!(sz, 5);
        assert_eq!(vi.to_bytes(), vec![0x0a]);
    }

    // -- VarInt round trip across every size-class boundary --

    #[test]
    fn test_varint_roundtrip_boundaries() {
        for n in [
            0u64,
            0xfc,
            0xfd,
            0xffff,
            0x10000,
            0xffff_ffff,
            0x1_0000_0000,
            u64::MAX,
        ] {
            let encoded = VarInt(n).to_bytes();
            let (decoded, consumed) = VarInt::from_bytes(&encoded).unwrap();
            assert_eq!(decoded.value(), n, "roundtrip mismatch for {}", n);
            assert_eq!(consumed, encoded.len(), "consumed mismatch for {}", n);
        }
    }

    // -- VarInt encoded widths --

    #[test]
    fn test_varint_byte_length() {
        assert_eq!(VarInt(0).to_bytes().len(), 1);
        assert_eq!(VarInt(252).to_bytes().len(), 1);
        assert_eq!(VarInt(253).to_bytes().len(), 3);
        assert_eq!(VarInt(65535).to_bytes().len(), 3);
        assert_eq!(VarInt(65536).to_bytes().len(), 5);
        assert_eq!(VarInt(4294967295).to_bytes().len(), 5);
        assert_eq!(VarInt(4294967296).to_bytes().len(), 9);
        assert_eq!(VarInt(u64::MAX).to_bytes().len(), 9);
    }

    #[test]
    fn test_varint_length() {
        assert_eq!(VarInt(252).length(), 1);
        assert_eq!(VarInt(253).length(), 3);
        assert_eq!(VarInt(65535).length(), 3);
        assert_eq!(VarInt(65536).length(), 5);
        assert_eq!(VarInt(4294967295).length(), 5);
        assert_eq!(VarInt(4294967296).length(), 9);
    }

    // -- VarInt exact encodings --

    #[test]
    fn test_varint_put_bytes() {
        let cases: Vec<(u64, Vec<u8>)> = vec![
            (0, vec![0x00]),
            (1, vec![0x01]),
            (252, vec![0xfc]),
            (253, vec![0xfd, 0xfd, 0x00]),
            (65535, vec![0xfd, 0xff, 0xff]),
            (65536, vec![0xfe, 0x00, 0x00, 0x01, 0x00]),
            (4294967295, vec![0xfe, 0xff, 0xff, 0xff, 0xff]),
            (4294967296, vec![0xff, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00]),
            (u64::MAX, vec![0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff]),
        ];

        for (value, expected) in cases {
            let vi = VarInt(value);
            let mut buf = vec![0u8; vi.length()];
            let n = vi.put_bytes(&mut buf);
            assert_eq!(n, expected.len(), "put_bytes length mismatch for {}", value);
            assert_eq!(buf, expected, "put_bytes content mismatch for {}", value);
            assert_eq!(vi.to_bytes(), buf, "to_bytes != put_bytes for {}", value);
        }
    }

    // -- ByteReader / ByteWriter --

    #[test]
    fn test_reader_writer_roundtrip() {
        let mut writer = ByteWriter::new();
        writer.write_u8(0x42);
        writer.write_u16_le(0x1234);
        writer.write_u32_le(0xDEADBEEF);
        writer.write_u64_le(0x0102030405060708);
        writer.write_varint(VarInt(300));
        writer.write_bytes(b"hello");

        let data = writer.into_bytes();
        let mut reader = ByteReader::new(&data);

        assert_eq!(reader.read_u8().unwrap(), 0x42);
        assert_eq!(reader.read_u16_le().unwrap(), 0x1234);
        assert_eq!(reader.read_u32_le().unwrap(), 0xDEADBEEF);
        assert_eq!(reader.read_u64_le().unwrap(), 0x0102030405060708);
        assert_eq!(reader.read_varint().unwrap(), VarInt(300));
        assert_eq!(reader.read_bytes(5).unwrap(), b"hello");
        assert_eq!(reader.remaining(), 0);
        assert_eq!(reader.position(), data.len());
    }

    #[test]
    fn test_reader_eof() {
        let mut reader = ByteReader::new(&[0x01]);
        assert!(reader.read_u8().is_ok());
        assert!(reader.read_u8().is_err());
    }

    /// A failed read must not advance the cursor.
    #[test]
    fn test_reader_eof_preserves_position() {
        let mut reader = ByteReader::new(&[0x01, 0x02]);
        assert!(reader.read_u32_le().is_err());
        assert_eq!(reader.position(), 0);
        assert_eq!(reader.read_u16_le().unwrap(), 0x0201);
    }

    #[test]
    fn test_reader_varint_sizes() {
        let mut reader = ByteReader::new(&[0x05]);
        assert_eq!(reader.read_varint().unwrap(), VarInt(5));

        let mut reader = ByteReader::new(&[0xfd, 0x00, 0x01]);
        assert_eq!(reader.read_varint().unwrap(), VarInt(256));

        let mut reader = ByteReader::new(&[0xfe, 0x00, 0x00, 0x01, 0x00]);
        assert_eq!(reader.read_varint().unwrap(), VarInt(65536));

        let mut reader = ByteReader::new(&[0xff, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00]);
        assert_eq!(reader.read_varint().unwrap(), VarInt(4294967296));
    }

    #[test]
    fn test_reader_varint_truncated() {
        let mut reader = ByteReader::new(&[0xfd, 0x00]);
        assert!(reader.read_varint().is_err());
    }
}
