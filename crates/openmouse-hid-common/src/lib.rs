//! Common HID utilities for gaming-mouse protocol implementations
//!
//! This crate provides the report-reading primitives shared by the OpenMouse
//! protocol crates: a bounds-checked cursor over a raw input report and a
//! small builder used to assemble reports in tests and capture tooling.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod report_reader;

pub use report_reader::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HidCommonError {
    #[error("Truncated report: {0}")]
    TruncatedReport(String),

    #[error("Invalid report format: {0}")]
    InvalidReport(String),
}

pub type HidCommonResult<T> = Result<T, HidCommonError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = HidCommonError::TruncatedReport("wanted 2 bytes".to_string());
        assert_eq!(format!("{}", err), "Truncated report: wanted 2 bytes");

        let err = HidCommonError::InvalidReport("bad length".to_string());
        assert_eq!(format!("{}", err), "Invalid report format: bad length");
    }
}
