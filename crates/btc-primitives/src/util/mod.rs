//! Utility types for binary serialization.
//!
//! Provides compact-size `VarInt` encoding/decoding and the `BtcReader` /
//! `BtcWriter` cursor types for reading and writing Bitcoin wire-format
//! data: fixed-width little-endian integers, varints, and varint-prefixed
//! byte slices and slice vectors.

use crate::PrimitivesError;

// ---------------------------------------------------------------------------
// VarInt
// ---------------------------------------------------------------------------

/// A Bitcoin compact-size variable-length integer.
///
/// VarInt is used in transaction data to indicate the number of upcoming
/// fields or the length of an upcoming field. The encoding uses 1, 3, 5, or
/// 9 bytes depending on the magnitude of the value, and encoders always emit
/// the minimal form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VarInt(pub u64);

impl VarInt {
    /// Decode a VarInt from the start of a byte slice.
    ///
    /// # Arguments
    /// * `data` - Byte slice starting with a VarInt encoding.
    ///
    /// # Returns
    /// A tuple of `(VarInt, bytes_consumed)`, or an error if the slice is
    /// too short for the encoding its first byte announces.
    pub fn from_bytes(data: &[u8]) -> Result<(Self, usize), PrimitivesError> {
        let first = *data.first().ok_or(PrimitivesError::UnexpectedEof)?;
        let (value, size) = match first {
            0xff => {
                if data.len() < 9 {
                    return Err(PrimitivesError::UnexpectedEof);
                }
                let mut buf = [0u8; 8];
                buf.copy_from_slice(&data[1..9]);
                (u64::from_le_bytes(buf), 9)
            }
            0xfe => {
                if data.len() < 5 {
                    return Err(PrimitivesError::UnexpectedEof);
                }
                let val = u32::from_le_bytes([data[1], data[2], data[3], data[4]]);
                (val as u64, 5)
            }
            0xfd => {
                if data.len() < 3 {
                    return Err(PrimitivesError::UnexpectedEof);
                }
                (u16::from_le_bytes([data[1], data[2]]) as u64, 3)
            }
            b => (b as u64, 1),
        };
        Ok((VarInt(value), size))
    }

    /// Return the wire-format byte length of this VarInt.
    ///
    /// # Returns
    /// 1, 3, 5, or 9 depending on the value.
    pub fn length(&self) -> usize {
        if self.0 < 0xfd {
            1
        } else if self.0 <= 0xffff {
            3
        } else if self.0 <= 0xffff_ffff {
            5
        } else {
            9
        }
    }

    /// Encode the VarInt into a new byte vector.
    ///
    /// # Returns
    /// A `Vec<u8>` of 1, 3, 5, or 9 bytes (minimal encoding).
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = vec![0u8; self.length()];
        self.put_bytes(&mut buf);
        buf
    }

    /// Write the VarInt into a destination buffer.
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
        } else if v <= 0xffff {
            dst[0] = 0xfd;
            dst[1..3].copy_from_slice(&(v as u16).to_le_bytes());
            3
        } else if v <= 0xffff_ffff {
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
// BtcReader
// ---------------------------------------------------------------------------

/// A forward-only cursor for reading Bitcoin wire-format data.
///
/// Wraps a byte slice and maintains a read position. Every read either
/// advances the position by the exact number of bytes consumed or fails
/// with `PrimitivesError::UnexpectedEof` without advancing.
pub struct BtcReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> BtcReader<'a> {
    /// Create a new reader over the given byte slice.
    pub fn new(data: &'a [u8]) -> Self {
        BtcReader { data, pos: 0 }
    }

    /// Read `n` bytes and advance the position.
    ///
    /// # Arguments
    /// * `n` - Number of bytes to read.
    ///
    /// # Returns
    /// A borrowed slice of length `n`, or an error if fewer bytes remain.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], PrimitivesError> {
        if n > self.data.len() - self.pos {
            return Err(PrimitivesError::UnexpectedEof);
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Return the next `n` bytes without advancing the position.
    ///
    /// # Returns
    /// A borrowed slice of length `n`, or an error if fewer bytes remain.
    pub fn peek_bytes(&self, n: usize) -> Result<&'a [u8], PrimitivesError> {
        if n > self.data.len() - self.pos {
            return Err(PrimitivesError::UnexpectedEof);
        }
        Ok(&self.data[self.pos..self.pos + n])
    }

    /// Read a single byte and advance the position.
    pub fn read_u8(&mut self) -> Result<u8, PrimitivesError> {
        let bytes = self.read_bytes(1)?;
        Ok(bytes[0])
    }

    /// Read a little-endian u16 and advance the position by 2 bytes.
    pub fn read_u16_le(&mut self) -> Result<u16, PrimitivesError> {
        let bytes = self.read_bytes(2)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    /// Read a little-endian u32 and advance the position by 4 bytes.
    pub fn read_u32_le(&mut self) -> Result<u32, PrimitivesError> {
        let bytes = self.read_bytes(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Read a little-endian i32 and advance the position by 4 bytes.
    pub fn read_i32_le(&mut self) -> Result<i32, PrimitivesError> {
        let bytes = self.read_bytes(4)?;
        Ok(i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Read a little-endian u64 and advance the position by 8 bytes.
    pub fn read_u64_le(&mut self) -> Result<u64, PrimitivesError> {
        let bytes = self.read_bytes(8)?;
        let mut buf = [0u8; 8];
        buf.copy_from_slice(bytes);
        Ok(u64::from_le_bytes(buf))
    }

    /// Read a VarInt and advance the position accordingly.
    pub fn read_varint(&mut self) -> Result<VarInt, PrimitivesError> {
        let first = self.read_u8()?;
        match first {
            0xff => {
                let val = self.read_u64_le()?;
                Ok(VarInt(val))
            }
            0xfe => {
                let val = self.read_u32_le()? as u64;
                Ok(VarInt(val))
            }
            0xfd => {
                let val = self.read_u16_le()? as u64;
                Ok(VarInt(val))
            }
            b => Ok(VarInt(b as u64)),
        }
    }

    /// Read a varint-prefixed byte slice and advance the position.
    ///
    /// # Returns
    /// The slice contents (without the length prefix), or an error if the
    /// announced length exceeds the remaining data.
    pub fn read_varslice(&mut self) -> Result<&'a [u8], PrimitivesError> {
        let len = self.read_varint()?;
        self.read_bytes(len.value() as usize)
    }

    /// Read a varint-counted vector of varint-prefixed byte slices.
    ///
    /// # Returns
    /// The slices as owned vectors, or an error if the data is truncated.
    pub fn read_vector(&mut self) -> Result<Vec<Vec<u8>>, PrimitivesError> {
        let count = self.read_varint()?;
        let mut items = Vec::with_capacity(count.value() as usize);
        for _ in 0..count.value() {
            items.push(self.read_varslice()?.to_vec());
        }
        Ok(items)
    }

    /// Return the number of bytes remaining.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }
}

// ---------------------------------------------------------------------------
// BtcWriter
// ---------------------------------------------------------------------------

/// A buffer-based writer for Bitcoin wire-format data.
///
/// Wraps a `Vec<u8>` and provides methods to append fixed-width integers in
/// little-endian order, varints, and varint-prefixed slices.
pub struct BtcWriter {
    buf: Vec<u8>,
}

impl BtcWriter {
    /// Create a new empty writer.
    pub fn new() -> Self {
        BtcWriter { buf: Vec::new() }
    }

    /// Create a new writer with a pre-allocated capacity.
    ///
    /// # Arguments
    /// * `capacity` - Initial byte capacity of the internal buffer.
    pub fn with_capacity(capacity: usize) -> Self {
        BtcWriter {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Append raw bytes to the buffer.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Append a single byte to the buffer.
    pub fn write_u8(&mut self, val: u8) {
        self.buf.push(val);
    }

    /// Append a little-endian u16 (2 bytes) to the buffer.
    pub fn write_u16_le(&mut self, val: u16) {
        self.buf.extend_from_slice(&val.to_le_bytes());
    }

    /// Append a little-endian u32 (4 bytes) to the buffer.
    pub fn write_u32_le(&mut self, val: u32) {
        self.buf.extend_from_slice(&val.to_le_bytes());
    }

    /// Append a little-endian i32 (4 bytes) to the buffer.
    pub fn write_i32_le(&mut self, val: i32) {
        self.buf.extend_from_slice(&val.to_le_bytes());
    }

    /// Append a little-endian u64 (8 bytes) to the buffer.
    pub fn write_u64_le(&mut self, val: u64) {
        self.buf.extend_from_slice(&val.to_le_bytes());
    }

    /// Append a VarInt to the buffer.
    pub fn write_varint(&mut self, varint: VarInt) {
        let start = self.buf.len();
        self.buf.resize(start + varint.length(), 0);
        varint.put_bytes(&mut self.buf[start..]);
    }

    /// Append a varint length prefix followed by the slice contents.
    pub fn write_varslice(&mut self, bytes: &[u8]) {
        self.write_varint(VarInt::from(bytes.len()));
        self.write_bytes(bytes);
    }

    /// Append a varint item count followed by each item as a varslice.
    pub fn write_vector(&mut self, items: &[Vec<u8>]) {
        self.write_varint(VarInt::from(items.len()));
        for item in items {
            self.write_varslice(item);
        }
    }

    /// Consume the writer and return the accumulated bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Return a reference to the current buffer contents.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Return the current length of the buffer.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Check if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

impl Default for BtcWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- VarInt encoding boundaries --

    #[test]
    fn test_varint_length() {
        assert_eq!(VarInt(0).length(), 1);
        assert_eq!(VarInt(252).length(), 1);
        assert_eq!(VarInt(253).length(), 3);
        assert_eq!(VarInt(65535).length(), 3);
        assert_eq!(VarInt(65536).length(), 5);
        assert_eq!(VarInt(4294967295).length(), 5);
        assert_eq!(VarInt(4294967296).length(), 9);
        assert_eq!(VarInt(u64::MAX).length(), 9);
    }

    #[test]
    fn test_varint_minimal_encodings() {
        let cases: Vec<(u64, Vec<u8>)> = vec![
            (0, vec![0x00]),
            (1, vec![0x01]),
            (252, vec![0xfc]),
            (253, vec![0xfd, 0xfd, 0x00]),
            (65535, vec![0xfd, 0xff, 0xff]),
            (65536, vec![0xfe, 0x00, 0x00, 0x01, 0x00]),
            (4294967295, vec![0xfe, 0xff, 0xff, 0xff, 0xff]),
            (
                4294967296,
                vec![0xff, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00],
            ),
            (
                u64::MAX,
                vec![0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff],
            ),
        ];

        for (value, expected) in cases {
            let vi = VarInt(value);
            assert_eq!(vi.to_bytes(), expected, "encoding mismatch for {}", value);
            let (decoded, consumed) = VarInt::from_bytes(&expected).unwrap();
            assert_eq!(decoded, vi, "decoding mismatch for {}", value);
            assert_eq!(consumed, expected.len());
        }
    }

    #[test]
    fn test_varint_from_bytes_truncated() {
        assert!(VarInt::from_bytes(&[]).is_err());
        assert!(VarInt::from_bytes(&[0xfd, 0x00]).is_err());
        assert!(VarInt::from_bytes(&[0xfe, 0x00, 0x00]).is_err());
        assert!(VarInt::from_bytes(&[0xff, 0, 0, 0, 0, 0, 0, 0]).is_err());
    }

    // -- Reader / writer round trips --

    #[test]
    fn test_reader_writer_roundtrip() {
        let mut writer = BtcWriter::new();
        writer.write_u8(0x42);
        writer.write_u16_le(0x1234);
        writer.write_u32_le(0xDEADBEEF);
        writer.write_i32_le(-2);
        writer.write_u64_le(0x0102030405060708);
        writer.write_varint(VarInt(300));
        writer.write_varslice(b"hello");
        writer.write_vector(&[b"ab".to_vec(), vec![], b"xyz".to_vec()]);

        let data = writer.into_bytes();
        let mut reader = BtcReader::new(&data);

        assert_eq!(reader.read_u8().unwrap(), 0x42);
        assert_eq!(reader.read_u16_le().unwrap(), 0x1234);
        assert_eq!(reader.read_u32_le().unwrap(), 0xDEADBEEF);
        assert_eq!(reader.read_i32_le().unwrap(), -2);
        assert_eq!(reader.read_u64_le().unwrap(), 0x0102030405060708);
        assert_eq!(reader.read_varint().unwrap(), VarInt(300));
        assert_eq!(reader.read_varslice().unwrap(), b"hello");
        assert_eq!(
            reader.read_vector().unwrap(),
            vec![b"ab".to_vec(), vec![], b"xyz".to_vec()]
        );
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_reader_eof() {
        let mut reader = BtcReader::new(&[0x01]);
        assert!(reader.read_u8().is_ok());
        assert!(reader.read_u8().is_err());
    }

    #[test]
    fn test_reader_does_not_advance_on_eof() {
        let mut reader = BtcReader::new(&[0x01, 0x02]);
        assert!(reader.read_u32_le().is_err());
        // A failed read leaves the cursor in place.
        assert_eq!(reader.remaining(), 2);
        assert_eq!(reader.read_u16_le().unwrap(), 0x0201);
    }

    #[test]
    fn test_reader_varint_sizes() {
        let mut reader = BtcReader::new(&[0x05]);
        assert_eq!(reader.read_varint().unwrap(), VarInt(5));

        let mut reader = BtcReader::new(&[0xfd, 0x00, 0x01]);
        assert_eq!(reader.read_varint().unwrap(), VarInt(256));

        let mut reader = BtcReader::new(&[0xfe, 0x00, 0x00, 0x01, 0x00]);
        assert_eq!(reader.read_varint().unwrap(), VarInt(65536));

        let mut reader =
            BtcReader::new(&[0xff, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00]);
        assert_eq!(reader.read_varint().unwrap(), VarInt(4294967296));
    }

    #[test]
    fn test_reader_varslice_truncated() {
        // Length prefix says 5 bytes but only 3 follow.
        let mut reader = BtcReader::new(&[0x05, 0xaa, 0xbb, 0xcc]);
        assert!(reader.read_varslice().is_err());
    }

    #[test]
    fn test_peek_does_not_advance() {
        let mut reader = BtcReader::new(&[0x00, 0x01, 0x02]);
        assert_eq!(reader.peek_bytes(2).unwrap(), &[0x00, 0x01]);
        assert_eq!(reader.remaining(), 3);
        assert_eq!(reader.read_u8().unwrap(), 0x00);
        assert_eq!(reader.peek_bytes(2).unwrap(), &[0x01, 0x02]);
        assert!(reader.peek_bytes(3).is_err());
    }
}
