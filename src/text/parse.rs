use std::str;

use derive_more::{Display, Error, IsVariant};

use super::string::{Str, is_space};

/// The error returned when a [`Str`] doesn't start with a number of the requested type.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Error, IsVariant)]
pub enum ParseNumberError {
    /// No digits were found after the leading whitespace and sign.
    #[display("No digits to parse!")]
    NoDigits,
    /// The digits describe a number that the target type can't hold.
    #[display("Number out of range for the target type!")]
    Overflow,
}

type Scan<T> = Result<(T, usize), ParseNumberError>;

fn skip_space(bytes: &[u8]) -> usize {
    bytes.iter().position(|byte| !is_space(*byte)).unwrap_or(bytes.len())
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().position(|byte| !byte.is_ascii_digit()).unwrap_or(bytes.len())
}

/// Accumulates the decimal digits at the start of `bytes`, returning the magnitude and the number
/// of digits read.
fn scan_magnitude(bytes: &[u8]) -> Scan<u64> {
    let digits = count_digits(bytes);
    if digits == 0 {
        return Err(ParseNumberError::NoDigits);
    }

    let value = bytes[..digits].iter().try_fold(0_u64, |acc, digit| {
        acc.checked_mul(10)?.checked_add(u64::from(digit - b'0'))
    });
    Ok((value.ok_or(ParseNumberError::Overflow)?, digits))
}

fn scan_u64(bytes: &[u8]) -> Scan<u64> {
    let mut i = skip_space(bytes);
    if bytes.get(i) == Some(&b'+') {
        i += 1;
    }

    let (value, digits) = scan_magnitude(&bytes[i..])?;
    Ok((value, i + digits))
}

fn scan_i64(bytes: &[u8]) -> Scan<i64> {
    let mut i = skip_space(bytes);
    let negative = match bytes.get(i) {
        Some(b'-') => {
            i += 1;
            true
        },
        Some(b'+') => {
            i += 1;
            false
        },
        _ => false,
    };

    let (magnitude, digits) = scan_magnitude(&bytes[i..])?;
    let value = if negative {
        0_i64.checked_sub_unsigned(magnitude)
    } else {
        i64::try_from(magnitude).ok()
    };
    Ok((value.ok_or(ParseNumberError::Overflow)?, i + digits))
}

fn scan_f64(bytes: &[u8]) -> Scan<f64> {
    let start = skip_space(bytes);
    let mut i = start;
    if matches!(bytes.get(i), Some(b'+' | b'-')) {
        i += 1;
    }

    let special = [&b"infinity"[..], b"inf", b"nan"]
        .into_iter()
        .find(|word| bytes[i..].get(..word.len()).is_some_and(|s| s.eq_ignore_ascii_case(word)));

    let end = match special {
        Some(word) => i + word.len(),
        None => {
            let whole = count_digits(&bytes[i..]);
            i += whole;
            let mut fraction = 0;
            if bytes.get(i) == Some(&b'.') {
                fraction = count_digits(&bytes[i + 1..]);
                if whole + fraction > 0 {
                    i += 1 + fraction;
                }
            }
            if whole + fraction == 0 {
                return Err(ParseNumberError::NoDigits);
            }

            if matches!(bytes.get(i), Some(b'e' | b'E')) {
                let mut j = i + 1;
                if matches!(bytes.get(j), Some(b'+' | b'-')) {
                    j += 1;
                }
                let exponent = count_digits(&bytes[j..]);
                if exponent > 0 {
                    i = j + exponent;
                }
            }
            i
        },
    };

    // The scanned range is ASCII and follows the grammar f64::from_str accepts.
    let value = str::from_utf8(&bytes[start..end])
        .ok()
        .and_then(|text| text.parse::<f64>().ok())
        .ok_or(ParseNumberError::NoDigits)?;

    if value.is_infinite() && special.is_none() {
        return Err(ParseNumberError::Overflow);
    }
    Ok((value, end))
}

impl Str<'_> {
    /// Parses the unsigned decimal number at the start of self, after any leading whitespace and
    /// an optional `+`. Anything after the digits is ignored.
    ///
    /// # Examples
    /// ```
    /// # use arena_std::text::Str;
    /// assert_eq!(Str::new("  64 bytes").parse_u64(), Ok(64));
    /// assert!(Str::new("bytes").parse_u64().unwrap_err().is_no_digits());
    /// ```
    pub fn parse_u64(self) -> Result<u64, ParseNumberError> {
        scan_u64(self.as_bytes()).map(|(value, _)| value)
    }

    /// Parses the signed decimal number at the start of self, after any leading whitespace.
    pub fn parse_i64(self) -> Result<i64, ParseNumberError> {
        scan_i64(self.as_bytes()).map(|(value, _)| value)
    }

    /// Parses the floating point number at the start of self, after any leading whitespace. An
    /// optional fraction and exponent are accepted, as are `inf`, `infinity` and `nan` in any
    /// case.
    pub fn parse_f64(self) -> Result<f64, ParseNumberError> {
        scan_f64(self.as_bytes()).map(|(value, _)| value)
    }

    /// Like [`parse_u64`](Str::parse_u64), also advancing self past the whitespace and number it
    /// read. On error, self is left untouched.
    pub fn chop_u64(&mut self) -> Result<u64, ParseNumberError> {
        let (value, consumed) = scan_u64(self.as_bytes())?;
        self.take(consumed);
        Ok(value)
    }

    /// Like [`parse_i64`](Str::parse_i64), also advancing self past what it read. On error, self
    /// is left untouched.
    pub fn chop_i64(&mut self) -> Result<i64, ParseNumberError> {
        let (value, consumed) = scan_i64(self.as_bytes())?;
        self.take(consumed);
        Ok(value)
    }

    /// Like [`parse_f64`](Str::parse_f64), also advancing self past what it read. On error, self
    /// is left untouched.
    pub fn chop_f64(&mut self) -> Result<f64, ParseNumberError> {
        let (value, consumed) = scan_f64(self.as_bytes())?;
        self.take(consumed);
        Ok(value)
    }
}
