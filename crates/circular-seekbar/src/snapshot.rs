use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fixed-point scale for angles: hundredths of a degree.
pub const MULTIPLIER: f64 = 100.0;

pub fn to_fixed(angle: f64) -> i32 {
    (angle * MULTIPLIER) as i32
}

pub fn from_fixed(value: i32) -> f64 {
    f64::from(value) / MULTIPLIER
}

/// State that survives the widget being torn down.
///
/// Encoded as four bytes: the target angle in hundredths of a degree,
/// big-endian two's complement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SavedState {
    pub progress_angle: i32,
}

#[derive(Error, Debug, PartialEq)]
pub enum SnapshotError {
    #[error("Snapshot must be {expected} bytes, got {actual}")]
    Length { expected: usize, actual: usize },
}

impl SavedState {
    pub const ENCODED_LEN: usize = 4;

    pub fn new(progress_angle: i32) -> Self {
        Self { progress_angle }
    }

    pub fn angle(&self) -> f64 {
        from_fixed(self.progress_angle)
    }

    pub fn encode(&self) -> [u8; Self::ENCODED_LEN] {
        self.progress_angle.to_be_bytes()
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let raw: [u8; Self::ENCODED_LEN] =
            bytes.try_into().map_err(|_| SnapshotError::Length {
                expected: Self::ENCODED_LEN,
                actual: bytes.len(),
            })?;
        Ok(Self::new(i32::from_be_bytes(raw)))
    }
}
