//! Exact numeric conversion between `Value` variants.
//!
//! Untyped sources (string-keyed maps, JSON documents) carry numbers in
//! whatever variant the producer picked. These helpers decide whether a
//! particular runtime value fits a narrower or differently signed scalar
//! without changing it.

use crate::value::{Value, ValueTag};
use num_traits::{NumCast, ToPrimitive};

// exact
// Cast `n` into `N` and back; only a lossless round trip counts.
fn exact<S, N>(n: S) -> Option<N>
where
    S: NumCast + ToPrimitive + Copy + PartialEq,
    N: NumCast + ToPrimitive + Copy,
{
    let cast = <N as NumCast>::from(n)?;
    let back = <S as NumCast>::from(cast)?;

    (back == n).then_some(cast)
}

impl Value {
    /// Convert a numeric value into `N` when no information is lost.
    /// Non-numeric values, out-of-range values and fractional floats headed
    /// for an integer return `None`.
    #[must_use]
    pub fn to_exact<N>(&self) -> Option<N>
    where
        N: NumCast + ToPrimitive + Copy,
    {
        match *self {
            Self::Float32(v) => exact(v),
            Self::Float64(v) => exact(v),
            Self::Int8(v) => exact(v),
            Self::Int16(v) => exact(v),
            Self::Int32(v) => exact(v),
            Self::Int64(v) => exact(v),
            Self::Uint8(v) => exact(v),
            Self::Uint16(v) => exact(v),
            Self::Uint32(v) => exact(v),
            Self::Uint64(v) => exact(v),
            _ => None,
        }
    }

    /// Return true when this value converts exactly into a numeric scalar of
    /// `tag`. Always false for non-numeric tags.
    #[must_use]
    pub fn fits(&self, tag: ValueTag) -> bool {
        match tag {
            ValueTag::Float32 => self.to_exact::<f32>().is_some(),
            ValueTag::Float64 => self.to_exact::<f64>().is_some(),
            ValueTag::Int8 => self.to_exact::<i8>().is_some(),
            ValueTag::Int16 => self.to_exact::<i16>().is_some(),
            ValueTag::Int32 => self.to_exact::<i32>().is_some(),
            ValueTag::Int64 => self.to_exact::<i64>().is_some(),
            ValueTag::Uint8 => self.to_exact::<u8>().is_some(),
            ValueTag::Uint16 => self.to_exact::<u16>().is_some(),
            ValueTag::Uint32 => self.to_exact::<u32>().is_some(),
            ValueTag::Uint64 => self.to_exact::<u64>().is_some(),
            _ => false,
        }
    }
}
