//! Bounds-checked reading and writing of raw HID input reports.

use crate::{HidCommonError, HidCommonResult};

/// Cursor over a raw input report.
///
/// All reads are bounds-checked; a read past the end of the report returns
/// [`HidCommonError::TruncatedReport`] instead of panicking. Decoders that
/// select a layout by exact report length can also address fields directly
/// with [`ReportReader::at`] / [`ReportReader::i16_le_at`].
pub struct ReportReader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> ReportReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    pub fn read_u8(&mut self) -> HidCommonResult<u8> {
        let value = self.at(self.position)?;
        self.position += 1;
        Ok(value)
    }

    pub fn read_i8(&mut self) -> HidCommonResult<i8> {
        Ok(self.read_u8()? as i8)
    }

    pub fn read_u16_le(&mut self) -> HidCommonResult<u16> {
        let lo = self.read_u8()? as u16;
        let hi = self.read_u8()? as u16;
        Ok(lo | (hi << 8))
    }

    pub fn read_i16_le(&mut self) -> HidCommonResult<i16> {
        Ok(self.read_u16_le()? as i16)
    }

    pub fn skip(&mut self, count: usize) {
        self.position = (self.position + count).min(self.data.len());
    }

    /// Byte at an absolute offset, independent of the cursor.
    pub fn at(&self, offset: usize) -> HidCommonResult<u8> {
        self.data.get(offset).copied().ok_or_else(|| {
            HidCommonError::TruncatedReport(format!(
                "offset {} out of bounds for {}-byte report",
                offset,
                self.data.len()
            ))
        })
    }

    /// Signed 16-bit little-endian field at an absolute offset.
    pub fn i16_le_at(&self, offset: usize) -> HidCommonResult<i16> {
        let lo = self.at(offset)? as u16;
        let hi = self.at(offset + 1)? as u16;
        Ok((lo | (hi << 8)) as i16)
    }

    /// Signed byte at an absolute offset.
    pub fn i8_at(&self, offset: usize) -> HidCommonResult<i8> {
        Ok(self.at(offset)? as i8)
    }

    pub fn slice(&self) -> &'a [u8] {
        self.data
    }
}

/// Incremental report construction, used by tests and capture tooling to
/// assemble wire-exact reports.
#[derive(Default)]
pub struct ReportBuilder {
    buffer: Vec<u8>,
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
        }
    }

    pub fn write_u8(&mut self, value: u8) -> &mut Self {
        self.buffer.push(value);
        self
    }

    pub fn write_i8(&mut self, value: i8) -> &mut Self {
        self.buffer.push(value as u8);
        self
    }

    pub fn write_i16_le(&mut self, value: i16) -> &mut Self {
        self.buffer.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn write_bytes(&mut self, data: &[u8]) -> &mut Self {
        self.buffer.extend_from_slice(data);
        self
    }

    /// Zero-pad the report up to `len` bytes.
    pub fn pad_to(&mut self, len: usize) -> &mut Self {
        while self.buffer.len() < len {
            self.buffer.push(0);
        }
        self
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.buffer
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buffer
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}
