//! Decoding of raw seed buffers handed over by array-marshalling layers.
//!
//! The engine stores `f64`. Callers holding a typed slice use the `f64`
//! or `f32` seeding entry points directly; callers holding an untyped
//! byte buffer plus a dtype tag go through [`decode_samples`].

use std::str::FromStr;

use crate::error::SeedError;

/// Supported sample representations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dtype {
    /// IEEE-754 single precision, widened on decode.
    Float32,
    /// IEEE-754 double precision.
    Float64,
}

impl Dtype {
    /// Bytes per sample.
    pub fn width(self) -> usize {
        match self {
            Self::Float32 => 4,
            Self::Float64 => 8,
        }
    }
}

impl FromStr for Dtype {
    type Err = SeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "float32" | "f32" | "f4" | "<f4" => Ok(Self::Float32),
            "float64" | "f64" | "f8" | "<f8" => Ok(Self::Float64),
            other => Err(SeedError::TypeMismatch {
                dtype: other.to_string(),
            }),
        }
    }
}

/// Decode a little-endian byte buffer of `dtype` samples into `f64`.
///
/// Reports `TypeMismatch` for an unsupported dtype and `SizeMismatch`
/// when `bytes` is not a whole number of samples or does not hold exactly
/// `expected` of them.
///
/// ```
/// use fdstep_core::decode_samples;
///
/// let bytes: Vec<u8> = [1.5f32, -2.0].iter().flat_map(|v| v.to_le_bytes()).collect();
/// assert_eq!(decode_samples("float32", &bytes, 2).unwrap(), vec![1.5, -2.0]);
/// assert!(decode_samples("int32", &bytes, 2).is_err());
/// ```
pub fn decode_samples(dtype: &str, bytes: &[u8], expected: usize) -> Result<Vec<f64>, SeedError> {
    let dtype: Dtype = dtype.parse()?;
    let width = dtype.width();
    if bytes.len() % width != 0 || bytes.len() / width != expected {
        return Err(SeedError::SizeMismatch {
            expected,
            got: bytes.len() / width,
        });
    }
    let chunks = bytes.chunks_exact(width);
    let samples = match dtype {
        Dtype::Float32 => chunks
            .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]) as f64)
            .collect(),
        Dtype::Float64 => chunks
            .map(|c| f64::from_le_bytes([c[0], c[1], c[2], c[3], c[4], c[5], c[6], c[7]]))
            .collect(),
    };
    Ok(samples)
}
