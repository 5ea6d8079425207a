/// ## Tagged runtime values
///
/// The ten primitive types of the language in one sum type. The `Display`
/// impl is the canonical text form: it feeds `$`-reference resolution and
/// all printing, so its output is observable program behavior. Floats
/// always render fixed-point with six fractional digits.
///
/// `FMax` is the extended-precision float tier; it carries the widest
/// hardware float available here (`f64`), which is also the accumulator
/// type of the arithmetic library.
#[derive(Debug, Clone, PartialEq)]
pub enum Val {
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    FMax(f64),
    Bool(bool),
    Char(char),
    Str(String),
}

impl Val {
    /// The smallest signed integer tag that holds `v`.
    pub fn narrowest_int(v: i64) -> Val {
        if v >= i8::MIN as i64 && v <= i8::MAX as i64 {
            Val::I8(v as i8)
        } else if v >= i16::MIN as i64 && v <= i16::MAX as i64 {
            Val::I16(v as i16)
        } else if v >= i32::MIN as i64 && v <= i32::MAX as i64 {
            Val::I32(v as i32)
        } else {
            Val::I64(v)
        }
    }

    /// The smallest float tag whose range holds `v`.
    pub fn narrowest_float(v: f64) -> Val {
        if v.abs() <= f32::MAX as f64 {
            Val::F32(v as f32)
        } else {
            Val::F64(v)
        }
    }

    pub fn tag(&self) -> &'static str {
        use Val::*;
        match self {
            I8(_) => "i8",
            I16(_) => "i16",
            I32(_) => "i32",
            I64(_) => "i64",
            F32(_) => "f32",
            F64(_) => "f64",
            FMax(_) => "fmax",
            Bool(_) => "bool",
            Char(_) => "char",
            Str(_) => "string",
        }
    }
}

impl std::fmt::Display for Val {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Val::*;
        match self {
            I8(n) => write!(f, "{}", n),
            I16(n) => write!(f, "{}", n),
            I32(n) => write!(f, "{}", n),
            I64(n) => write!(f, "{}", n),
            F32(n) => write!(f, "{:.6}", n),
            F64(n) => write!(f, "{:.6}", n),
            FMax(n) => write!(f, "{:.6}", n),
            Bool(b) => write!(f, "{}", b),
            Char(c) => write!(f, "{}", c),
            Str(s) => write!(f, "{}", s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Val::I8(-5).to_string(), "-5");
        assert_eq!(Val::I64(i64::MAX).to_string(), "9223372036854775807");
        assert_eq!(Val::F32(2.5).to_string(), "2.500000");
        assert_eq!(Val::F64(3.14159).to_string(), "3.141590");
        assert_eq!(Val::Bool(true).to_string(), "true");
        assert_eq!(Val::Char('a').to_string(), "a");
        assert_eq!(Val::Str("hi".into()).to_string(), "hi");
    }

    #[test]
    fn test_narrowest_int() {
        assert_eq!(Val::narrowest_int(42), Val::I8(42));
        assert_eq!(Val::narrowest_int(-128), Val::I8(-128));
        assert_eq!(Val::narrowest_int(200), Val::I16(200));
        assert_eq!(Val::narrowest_int(70_000), Val::I32(70_000));
        assert_eq!(Val::narrowest_int(1 << 40), Val::I64(1 << 40));
    }

    #[test]
    fn test_narrowest_int_round_trips_through_text() {
        for v in [
            0,
            1,
            -1,
            127,
            128,
            -32768,
            65_000,
            i32::MAX as i64 + 1,
            i64::MIN,
            i64::MAX,
        ] {
            let printed = Val::narrowest_int(v).to_string();
            assert_eq!(printed.parse::<i64>().unwrap(), v);
        }
    }

    #[test]
    fn test_narrowest_float() {
        assert_eq!(Val::narrowest_float(2.5), Val::F32(2.5));
        assert_eq!(Val::narrowest_float(1e40), Val::F64(1e40));
        assert_eq!(Val::narrowest_float(-1e40), Val::F64(-1e40));
    }
}
