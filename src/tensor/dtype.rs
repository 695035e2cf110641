//! Element types and scalar values with widening promotion.

use core::fmt;
use core::ops::{Add, Div, Mul, Neg, Sub};

use half::f16;
use serde::{Deserialize, Serialize};

/// Element type tag for tensors.
///
/// The variant order is the promotion lattice: combining two types yields
/// the greater of the two, so any integer combined with any float widens to
/// the float. The rule is total and commutative.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum DType {
    I32,
    I64,
    F16,
    F32,
    F64,
}

impl DType {
    /// Returns the common type both operands widen to.
    #[inline]
    pub fn promote(a: DType, b: DType) -> DType {
        a.max(b)
    }

    /// Returns true for floating-point types.
    #[inline]
    pub fn is_float(self) -> bool {
        matches!(self, DType::F16 | DType::F32 | DType::F64)
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DType::I32 => "i32",
            DType::I64 => "i64",
            DType::F16 => "f16",
            DType::F32 => "f32",
            DType::F64 => "f64",
        };
        write!(f, "{}", name)
    }
}

/// A single tensor element, tagged with its type.
///
/// Arithmetic promotes both operands to their common [`DType`] first.
/// Division is true division: two integer operands promote to `F64`, so
/// `Value` arithmetic never panics on a zero divisor the way machine
/// integer division would.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    I32(i32),
    I64(i64),
    F16(f16),
    F32(f32),
    F64(f64),
}

impl Value {
    /// Returns the type tag of this value.
    #[inline]
    pub fn dtype(self) -> DType {
        match self {
            Value::I32(_) => DType::I32,
            Value::I64(_) => DType::I64,
            Value::F16(_) => DType::F16,
            Value::F32(_) => DType::F32,
            Value::F64(_) => DType::F64,
        }
    }

    /// The additive identity of the given type.
    pub fn zero(dtype: DType) -> Value {
        match dtype {
            DType::I32 => Value::I32(0),
            DType::I64 => Value::I64(0),
            DType::F16 => Value::F16(f16::ZERO),
            DType::F32 => Value::F32(0.0),
            DType::F64 => Value::F64(0.0),
        }
    }

    /// The multiplicative identity of the given type.
    pub fn one(dtype: DType) -> Value {
        match dtype {
            DType::I32 => Value::I32(1),
            DType::I64 => Value::I64(1),
            DType::F16 => Value::F16(f16::ONE),
            DType::F32 => Value::F32(1.0),
            DType::F64 => Value::F64(1.0),
        }
    }

    /// Converts to the given type, truncating floats on integer targets.
    pub fn cast(self, dtype: DType) -> Value {
        match dtype {
            DType::I32 => Value::I32(self.to_i64() as i32),
            DType::I64 => Value::I64(self.to_i64()),
            DType::F16 => Value::F16(f16::from_f64(self.to_f64())),
            DType::F32 => Value::F32(self.to_f64() as f32),
            DType::F64 => Value::F64(self.to_f64()),
        }
    }

    /// Widens to f64.
    #[inline]
    pub fn to_f64(self) -> f64 {
        match self {
            Value::I32(x) => x as f64,
            Value::I64(x) => x as f64,
            Value::F16(x) => x.to_f64(),
            Value::F32(x) => x as f64,
            Value::F64(x) => x,
        }
    }

    /// Converts to i64, truncating floats toward zero.
    #[inline]
    pub fn to_i64(self) -> i64 {
        match self {
            Value::I32(x) => x as i64,
            Value::I64(x) => x,
            Value::F16(x) => x.to_f64() as i64,
            Value::F32(x) => x as i64,
            Value::F64(x) => x as i64,
        }
    }
}

impl Add for Value {
    type Output = Value;

    fn add(self, rhs: Value) -> Value {
        match DType::promote(self.dtype(), rhs.dtype()) {
            DType::I32 => Value::I32(self.to_i64().wrapping_add(rhs.to_i64()) as i32),
            DType::I64 => Value::I64(self.to_i64().wrapping_add(rhs.to_i64())),
            DType::F16 => Value::F16(f16::from_f64(self.to_f64() + rhs.to_f64())),
            DType::F32 => Value::F32((self.to_f64() + rhs.to_f64()) as f32),
            DType::F64 => Value::F64(self.to_f64() + rhs.to_f64()),
        }
    }
}

impl Sub for Value {
    type Output = Value;

    fn sub(self, rhs: Value) -> Value {
        match DType::promote(self.dtype(), rhs.dtype()) {
            DType::I32 => Value::I32(self.to_i64().wrapping_sub(rhs.to_i64()) as i32),
            DType::I64 => Value::I64(self.to_i64().wrapping_sub(rhs.to_i64())),
            DType::F16 => Value::F16(f16::from_f64(self.to_f64() - rhs.to_f64())),
            DType::F32 => Value::F32((self.to_f64() - rhs.to_f64()) as f32),
            DType::F64 => Value::F64(self.to_f64() - rhs.to_f64()),
        }
    }
}

impl Mul for Value {
    type Output = Value;

    fn mul(self, rhs: Value) -> Value {
        match DType::promote(self.dtype(), rhs.dtype()) {
            DType::I32 => Value::I32(self.to_i64().wrapping_mul(rhs.to_i64()) as i32),
            DType::I64 => Value::I64(self.to_i64().wrapping_mul(rhs.to_i64())),
            DType::F16 => Value::F16(f16::from_f64(self.to_f64() * rhs.to_f64())),
            DType::F32 => Value::F32((self.to_f64() * rhs.to_f64()) as f32),
            DType::F64 => Value::F64(self.to_f64() * rhs.to_f64()),
        }
    }
}

impl Div for Value {
    type Output = Value;

    fn div(self, rhs: Value) -> Value {
        match DType::promote(self.dtype(), rhs.dtype()) {
            DType::I32 | DType::I64 => Value::F64(self.to_f64() / rhs.to_f64()),
            DType::F16 => Value::F16(f16::from_f64(self.to_f64() / rhs.to_f64())),
            DType::F32 => Value::F32((self.to_f64() / rhs.to_f64()) as f32),
            DType::F64 => Value::F64(self.to_f64() / rhs.to_f64()),
        }
    }
}

impl Neg for Value {
    type Output = Value;

    fn neg(self) -> Value {
        match self {
            Value::I32(x) => Value::I32(x.wrapping_neg()),
            Value::I64(x) => Value::I64(x.wrapping_neg()),
            Value::F16(x) => Value::F16(-x),
            Value::F32(x) => Value::F32(-x),
            Value::F64(x) => Value::F64(-x),
        }
    }
}
