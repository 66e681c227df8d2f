//! Operations computed in-process: `sub` and `div`.

use std::fmt;
use std::num::IntErrorKind;

use crate::error::ServiceError;

/// Result of a local operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Integer(i128),
    Float(f64),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{n}"),
            Value::Float(x) => f.write_str(&format_float(*x)),
        }
    }
}

/// `a - b` over integers. Operands beyond the second are ignored.
pub fn subtract(operands: &[&str]) -> Result<Value, ServiceError> {
    let (a, b) = operand_pair("sub", operands)?;
    let a = parse_integer(a)?;
    let b = parse_integer(b)?;
    a.checked_sub(b)
        .map(Value::Integer)
        .ok_or(ServiceError::Overflow)
}

/// `a / b` over floats. A zero divisor is rejected rather than producing
/// an infinity.
pub fn divide(operands: &[&str]) -> Result<Value, ServiceError> {
    let (a, b) = operand_pair("div", operands)?;
    let a = parse_float(a)?;
    let b = parse_float(b)?;
    if b == 0.0 {
        return Err(ServiceError::DivisionByZero);
    }
    Ok(Value::Float(a / b))
}

fn operand_pair<'a>(op: &'static str, operands: &[&'a str]) -> Result<(&'a str, &'a str), ServiceError> {
    match operands {
        [a, b, ..] => Ok((*a, *b)),
        _ => Err(ServiceError::MissingOperands {
            op,
            got: operands.len(),
        }),
    }
}

fn parse_integer(raw: &str) -> Result<i128, ServiceError> {
    raw.parse::<i128>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => ServiceError::Overflow,
        _ => ServiceError::InvalidInteger(raw.to_string()),
    })
}

fn parse_float(raw: &str) -> Result<f64, ServiceError> {
    raw.parse::<f64>()
        .map_err(|_| ServiceError::InvalidNumber(raw.to_string()))
}

/// Significant digits kept when rendering a quotient.
const FLOAT_DIGITS: usize = 12;

/// Render a float as `%.12g`, always marked as a float (`2.0`, not `2`).
///
/// Scientific notation with a signed two-digit exponent is used when the
/// decimal exponent is below -4 or at least 12. Trailing zeros are dropped.
pub fn format_float(x: f64) -> String {
    if x.is_nan() {
        return "nan".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    // The exponent is taken after rounding, so 999999999999.5 is 1e+12.
    let scientific = format!("{x:.prec$e}", prec = FLOAT_DIGITS - 1);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };

    let rendered = if exponent < -4 || exponent >= FLOAT_DIGITS as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{sign}{:02}", trim_fraction(mantissa), exponent.abs())
    } else {
        let prec = (FLOAT_DIGITS as i32 - 1 - exponent).max(0) as usize;
        trim_fraction(&format!("{x:.prec$}")).to_string()
    };

    if rendered.contains(['.', 'e']) {
        rendered
    } else {
        format!("{rendered}.0")
    }
}

fn trim_fraction(digits: &str) -> &str {
    if digits.contains('.') {
        digits.trim_end_matches('0').trim_end_matches('.')
    } else {
        digits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtract() {
        assert_eq!(subtract(&["10", "3"]).unwrap(), Value::Integer(7));
        assert_eq!(subtract(&["3", "10"]).unwrap(), Value::Integer(-7));
        assert_eq!(subtract(&["-4", "+6", "99"]).unwrap(), Value::Integer(-10));
    }

    #[test]
    fn test_subtract_errors() {
        assert!(matches!(
            subtract(&["10"]),
            Err(ServiceError::MissingOperands { op: "sub", got: 1 })
        ));
        assert!(matches!(
            subtract(&["10", "x"]),
            Err(ServiceError::InvalidInteger(s)) if s == "x"
        ));
        assert!(matches!(subtract(&["1.5", "1"]), Err(ServiceError::InvalidInteger(_))));

        let min = i128::MIN.to_string();
        assert!(matches!(subtract(&[min.as_str(), "1"]), Err(ServiceError::Overflow)));
        assert!(matches!(
            subtract(&["1000000000000000000000000000000000000000000", "1"]),
            Err(ServiceError::Overflow)
        ));
    }

    #[test]
    fn test_divide() {
        assert_eq!(divide(&["10", "4"]).unwrap(), Value::Float(2.5));
        assert_eq!(divide(&["1.5", "0.5"]).unwrap(), Value::Float(3.0));
        assert!(matches!(divide(&["1", "0"]), Err(ServiceError::DivisionByZero)));
        assert!(matches!(divide(&["1", "-0.0"]), Err(ServiceError::DivisionByZero)));
        assert!(matches!(divide(&["1", "one"]), Err(ServiceError::InvalidNumber(_))));
        assert!(matches!(
            divide(&[]),
            Err(ServiceError::MissingOperands { op: "div", got: 0 })
        ));
    }

    #[test]
    fn test_divide_matches_float_division() {
        for a in [-17i64, -1, 0, 1, 7, 10, 1_000_003] {
            for b in [-9i64, -2, 1, 3, 4, 11] {
                let Value::Float(got) = divide(&[a.to_string().as_str(), b.to_string().as_str()]).unwrap() else {
                    panic!("div returns a float");
                };
                let want = a as f64 / b as f64;
                assert!((got - want).abs() <= f64::EPSILON * want.abs().max(1.0));
            }
        }
    }

    #[test]
    fn test_format_float() {
        assert_eq!(format_float(2.5), "2.5");
        assert_eq!(format_float(2.0), "2.0");
        assert_eq!(format_float(-0.0), "-0.0");
        assert_eq!(format_float(10.0 / 3.0), "3.33333333333");
        assert_eq!(format_float(1.0 / 3.0), "0.333333333333");
        assert_eq!(format_float(-2.0 / 3.0), "-0.666666666667");
        assert_eq!(format_float(0.1 + 0.2), "0.3");
        assert_eq!(format_float(123456789012.0), "123456789012.0");
        assert_eq!(format_float(1e12), "1e+12");
        assert_eq!(format_float(999999999999.5), "1e+12");
        assert_eq!(format_float(1234567890123.0), "1.23456789012e+12");
        assert_eq!(format_float(0.0001), "0.0001");
        assert_eq!(format_float(0.00001), "1e-05");
        assert_eq!(format_float(1.5e-7), "1.5e-07");
        assert_eq!(format_float(1e20), "1e+20");
        assert_eq!(format_float(-2.5e16), "-2.5e+16");
        assert_eq!(format_float(0.0), "0.0");
        assert_eq!(format_float(1e100), "1e+100");
        assert_eq!(format_float(f64::INFINITY), "inf");
        assert_eq!(format_float(f64::NEG_INFINITY), "-inf");
        assert_eq!(format_float(f64::NAN), "nan");
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::Integer(-3).to_string(), "-3");
        assert_eq!(Value::Float(7.0).to_string(), "7.0");
    }
}
