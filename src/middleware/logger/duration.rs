//! Elapsed-time rendering.
//!
//! The unit is the largest one the value fills:
//!
//! | condition                 | unit | significant digits |
//! |---------------------------|------|--------------------|
//! | at least one whole second | `s`  | 2, whole seconds   |
//! | more than 1 ms            | `ms` | 2                  |
//! | more than 1 µs            | `µs` | 4                  |
//! | any nanoseconds           | `ns` | 4                  |
//!
//! Exactly 1 ms stays in `µs` (`1000µs`), exactly 1 µs stays in `ns`.
//! Numbers are written the way ECMAScript's `toPrecision` writes them:
//! fixed notation while the exponent is in `-6..digits`, scientific
//! (`1.5e+2`) beyond. Rounding is half-up on the exact nanosecond count.

use std::time::Duration;

use super::palette::render_separator;

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;

/// `❘ <value><unit>`, or an empty string when nothing measurable elapsed.
pub fn render_duration(elapsed: Duration) -> String {
    match humanize(elapsed) {
        Some(text) => format!("{} {text}", render_separator()),
        None => String::new(),
    }
}

/// The unstyled `<value><unit>` part.
pub fn humanize(elapsed: Duration) -> Option<String> {
    let nanos = elapsed.as_nanos();

    if elapsed.as_secs() > 0 {
        return Some(format!("{}s", to_precision(u128::from(elapsed.as_secs()), 0, 2)));
    }

    let (scale, digits, unit) = if nanos > NANOS_PER_MILLI {
        (6, 2, "ms")
    } else if nanos > NANOS_PER_MICRO {
        (3, 4, "µs")
    } else if elapsed.subsec_nanos() > 0 {
        (0, 4, "ns")
    } else {
        return None;
    };

    Some(format!("{}{unit}", to_precision(nanos, scale, digits)))
}

/// Formats `nanos / 10^scale` with `digits` significant digits.
///
/// `nanos` must be non-zero and `digits` at least one.
fn to_precision(nanos: u128, scale: i32, digits: usize) -> String {
    let raw = nanos.to_string();
    let mut exponent = raw.len() as i32 - 1 - scale;

    let mut mantissa: String = raw.chars().chain(std::iter::repeat('0')).take(digits).collect();
    if raw.as_bytes().get(digits).is_some_and(|&d| d >= b'5') {
        mantissa = round_up(&mantissa);
        if mantissa.len() > digits {
            mantissa.truncate(digits);
            exponent += 1;
        }
    }

    if exponent < -6 || exponent >= digits as i32 {
        let (lead, rest) = mantissa.split_at(1);
        let sign = if exponent < 0 { '-' } else { '+' };
        return if rest.is_empty() {
            format!("{lead}e{sign}{}", exponent.abs())
        } else {
            format!("{lead}.{rest}e{sign}{}", exponent.abs())
        };
    }

    if exponent < 0 {
        let zeros = "0".repeat((-exponent - 1) as usize);
        return format!("0.{zeros}{mantissa}");
    }

    let (int, frac) = mantissa.split_at(exponent as usize + 1);
    if frac.is_empty() {
        int.to_owned()
    } else {
        format!("{int}.{frac}")
    }
}

/// Adds one to a string of decimal digits, growing it on carry-out.
fn round_up(digits: &str) -> String {
    let mut out: Vec<u8> = digits.bytes().collect();
    for d in out.iter_mut().rev() {
        if *d == b'9' {
            *d = b'0';
        } else {
            *d += 1;
            return String::from_utf8_lossy(&out).into_owned();
        }
    }
    out.insert(0, b'1');
    String::from_utf8_lossy(&out).into_owned()
}
