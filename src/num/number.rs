use crate::constants::GENERAL_PRECISION;
use crate::options::{NonFinite, NumberFormat};

/// Integral values below this magnitude are written through `itoa`.
const INTEGER_FAST_PATH: f64 = 1e15;

pub fn write_number_into(out: &mut String, value: f64, format: NumberFormat, non_finite: NonFinite) {
    if !value.is_finite() {
        write_non_finite(out, value, non_finite);
        return;
    }
    match format {
        NumberFormat::Shortest => write_shortest(out, value),
        NumberFormat::General => write_general(out, value, GENERAL_PRECISION),
    }
}

fn write_non_finite(out: &mut String, value: f64, non_finite: NonFinite) {
    match non_finite {
        NonFinite::Null => out.push_str("null"),
        NonFinite::String if value.is_nan() => out.push_str("\"NaN\""),
        NonFinite::String if value > 0.0 => out.push_str("\"Infinity\""),
        NonFinite::String => out.push_str("\"-Infinity\""),
    }
}

/// Shortest text that reads back as the same `f64`.
pub fn format_shortest(value: f64) -> String {
    let mut out = String::new();
    write_shortest(&mut out, value);
    out
}

fn write_shortest(out: &mut String, value: f64) {
    if value.fract() == 0.0 && value.abs() < INTEGER_FAST_PATH {
        let mut buffer = itoa::Buffer::new();
        out.push_str(buffer.format(value as i64));
        return;
    }
    let mut buffer = ryu::Buffer::new();
    let raw = buffer.format_finite(value);
    out.push_str(raw.strip_suffix(".0").unwrap_or(raw));
}

/// `printf("%.{precision}g")`.
pub fn format_general(value: f64, precision: usize) -> String {
    let mut out = String::new();
    write_general(&mut out, value, precision);
    out
}

fn write_general(out: &mut String, value: f64, precision: usize) {
    let precision = precision.max(1);
    if value.fract() == 0.0 && value.abs() < 10f64.powi(precision.min(15) as i32) {
        let mut buffer = itoa::Buffer::new();
        out.push_str(buffer.format(value as i64));
        return;
    }

    // Rounding to `precision` digits decides the exponent, so take it from
    // the rounded scientific form.
    let scientific = format!("{:.*e}", precision - 1, value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };

    if exponent >= -4 && exponent < precision as i32 {
        let decimals = (precision as i32 - 1 - exponent) as usize;
        out.push_str(trim_fraction(&format!("{value:.decimals$}")));
        return;
    }

    out.push_str(trim_fraction(mantissa));
    out.push('e');
    out.push(if exponent < 0 { '-' } else { '+' });
    let magnitude = exponent.unsigned_abs();
    if magnitude < 10 {
        out.push('0');
    }
    let mut buffer = itoa::Buffer::new();
    out.push_str(buffer.format(magnitude));
}

/// Drop trailing fraction zeros, and the point itself when nothing is left.
fn trim_fraction(value: &str) -> &str {
    if !value.contains('.') {
        return value;
    }
    value.trim_end_matches('0').trim_end_matches('.')
}
