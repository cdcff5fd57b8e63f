use prost_types::field_descriptor_proto::Type;

/// A field's parsed default value.
///
/// `STRING`, `BYTES`, and `ENUM` defaults are all stored as the raw declared text: bytes defaults
/// are not C-escape-decoded (this crate treats the default as opaque text, leaving interpretation
/// to callers that actually need the decoded byte sequence), and enum defaults are not resolved
/// against the enum's values (symbol resolution is out of scope here).
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    /// `INT32`, `SINT32`, `SFIXED32`.
    I32(i32),
    /// `INT64`, `SINT64`, `SFIXED64`.
    I64(i64),
    /// `UINT32`, `FIXED32`.
    U32(u32),
    /// `UINT64`, `FIXED64`.
    U64(u64),
    /// `FLOAT`.
    F32(f32),
    /// `DOUBLE`.
    F64(f64),
    /// `BOOL`.
    Bool(bool),
    /// `STRING`, `BYTES`, `ENUM`.
    String(String),
}

/// Parses a field's raw `default_value` text against its declared `type`.
///
/// `MESSAGE` and `GROUP` fields never reach this function: the caller rejects a default on those
/// kinds before parsing is attempted at all.
pub(crate) fn parse(kind: Type, raw: &str) -> Result<DefaultValue, ()> {
    match kind {
        Type::Int32 | Type::Sint32 | Type::Sfixed32 => {
            parse_signed(raw, 32).map(|v| DefaultValue::I32(v as i32))
        }
        Type::Int64 | Type::Sint64 | Type::Sfixed64 => {
            parse_signed(raw, 64).map(DefaultValue::I64)
        }
        Type::Uint32 | Type::Fixed32 => {
            parse_unsigned(raw, 32).map(|v| DefaultValue::U32(v as u32))
        }
        Type::Uint64 | Type::Fixed64 => parse_unsigned(raw, 64).map(DefaultValue::U64),
        Type::Float => parse_float::<f32>(raw).map(DefaultValue::F32),
        Type::Double => parse_float::<f64>(raw).map(DefaultValue::F64),
        Type::Bool => match raw {
            "true" => Ok(DefaultValue::Bool(true)),
            "false" => Ok(DefaultValue::Bool(false)),
            _ => Err(()),
        },
        Type::String | Type::Bytes | Type::Enum => Ok(DefaultValue::String(raw.to_owned())),
        Type::Message | Type::Group => unreachable!("caller rejects defaults on message kinds"),
    }
}

/// Splits a decimal/octal/hex literal with an optional sign into its sign and magnitude, using
/// the same base-detection rule as C's `strtol`/`strtoul` with base `0`: a `0x`/`0X` prefix means
/// hex, a lone leading `0` means octal, anything else is decimal.
fn split_sign_and_magnitude(raw: &str) -> Option<(bool, u64)> {
    let (negative, rest) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };

    let (radix, digits) = if let Some(hex) = rest.strip_prefix("0x").or_else(|| rest.strip_prefix("0X")) {
        (16, hex)
    } else if rest.len() > 1 && rest.starts_with('0') {
        (8, &rest[1..])
    } else {
        (10, rest)
    };

    if digits.is_empty() {
        return None;
    }

    let magnitude = u64::from_str_radix(digits, radix).ok()?;
    Some((negative, magnitude))
}

fn parse_signed(raw: &str, bits: u32) -> Result<i64, ()> {
    let (negative, magnitude) = split_sign_and_magnitude(raw).ok_or(())?;

    let value = if negative {
        if magnitude > i64::MAX as u64 + 1 {
            return Err(());
        }
        (magnitude as i128).wrapping_neg() as i64
    } else {
        if magnitude > i64::MAX as u64 {
            return Err(());
        }
        magnitude as i64
    };

    let (min, max) = signed_range(bits);
    if value < min || value > max {
        return Err(());
    }
    Ok(value)
}

fn parse_unsigned(raw: &str, bits: u32) -> Result<u64, ()> {
    let (negative, magnitude) = split_sign_and_magnitude(raw).ok_or(())?;
    if negative {
        return Err(());
    }

    let max = unsigned_max(bits);
    if magnitude > max {
        return Err(());
    }
    Ok(magnitude)
}

fn signed_range(bits: u32) -> (i64, i64) {
    match bits {
        32 => (i32::MIN as i64, i32::MAX as i64),
        64 => (i64::MIN, i64::MAX),
        _ => unreachable!("only 32 and 64 bit widths are used"),
    }
}

fn unsigned_max(bits: u32) -> u64 {
    match bits {
        32 => u32::MAX as u64,
        64 => u64::MAX,
        _ => unreachable!("only 32 and 64 bit widths are used"),
    }
}

trait ParsableFloat: Sized + Copy {
    const INFINITY: Self;
    const NEG_INFINITY: Self;
    const NAN: Self;
    fn from_str(s: &str) -> Result<Self, ()>;
    fn is_finite(self) -> bool;
}

impl ParsableFloat for f32 {
    const INFINITY: Self = f32::INFINITY;
    const NEG_INFINITY: Self = f32::NEG_INFINITY;
    const NAN: Self = f32::NAN;
    fn from_str(s: &str) -> Result<Self, ()> {
        s.parse().map_err(|_| ())
    }
    fn is_finite(self) -> bool {
        f32::is_finite(self)
    }
}

impl ParsableFloat for f64 {
    const INFINITY: Self = f64::INFINITY;
    const NEG_INFINITY: Self = f64::NEG_INFINITY;
    const NAN: Self = f64::NAN;
    fn from_str(s: &str) -> Result<Self, ()> {
        s.parse().map_err(|_| ())
    }
    fn is_finite(self) -> bool {
        f64::is_finite(self)
    }
}

/// Parses a float default, treating the protobuf-standard tokens `inf`/`-inf`/`nan` (and their
/// `infinity` spellings) as valid regardless of case, and otherwise requiring the literal to
/// parse to a finite value. Rust's own `f32`/`f64::from_str` happily turns an out-of-range
/// literal like `1e999` into `Infinity` instead of failing, which would silently accept a
/// malformed default; rejecting non-finite results unless explicitly requested closes that gap.
fn parse_float<F: ParsableFloat>(raw: &str) -> Result<F, ()> {
    match raw.to_ascii_lowercase().as_str() {
        "inf" | "infinity" => return Ok(F::INFINITY),
        "-inf" | "-infinity" => return Ok(F::NEG_INFINITY),
        "nan" => return Ok(F::NAN),
        _ => {}
    }

    let value = F::from_str(raw)?;
    if !value.is_finite() {
        return Err(());
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_default() {
        assert_eq!(parse(Type::Int32, "42"), Ok(DefaultValue::I32(42)));
        assert_eq!(parse(Type::Int32, "-42"), Ok(DefaultValue::I32(-42)));
    }

    #[test]
    fn hex_and_octal_defaults() {
        assert_eq!(parse(Type::Int32, "0x2A"), Ok(DefaultValue::I32(42)));
        assert_eq!(parse(Type::Int32, "052"), Ok(DefaultValue::I32(42)));
        assert_eq!(parse(Type::Uint32, "0"), Ok(DefaultValue::U32(0)));
    }

    #[test]
    fn int32_boundary() {
        assert_eq!(
            parse(Type::Int32, "0x7fffffff"),
            Ok(DefaultValue::I32(i32::MAX))
        );
        assert_eq!(parse(Type::Int32, "0x80000000"), Err(()));
        assert_eq!(
            parse(Type::Int32, "-2147483648"),
            Ok(DefaultValue::I32(i32::MIN))
        );
    }

    #[test]
    fn unsigned_rejects_negative() {
        assert_eq!(parse(Type::Uint32, "-1"), Err(()));
    }

    #[test]
    fn bool_is_exact_literal() {
        assert_eq!(parse(Type::Bool, "true"), Ok(DefaultValue::Bool(true)));
        assert_eq!(parse(Type::Bool, "false"), Ok(DefaultValue::Bool(false)));
        assert_eq!(parse(Type::Bool, "1"), Err(()));
        assert_eq!(parse(Type::Bool, "True"), Err(()));
    }

    #[test]
    fn float_overflow_is_rejected() {
        assert_eq!(parse(Type::Double, "1e999"), Err(()));
        assert_eq!(parse(Type::Double, "inf"), Ok(DefaultValue::F64(f64::INFINITY)));
    }

    #[test]
    fn string_and_bytes_pass_through_raw() {
        assert_eq!(
            parse(Type::String, ""),
            Ok(DefaultValue::String(String::new()))
        );
        assert_eq!(
            parse(Type::Bytes, "raw bytes"),
            Ok(DefaultValue::String("raw bytes".to_owned()))
        );
    }
}
