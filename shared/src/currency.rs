//! Rupiah formatting and parsing.
//!
//! Amounts live as whole rupiah (`i64`) everywhere; these helpers are the only
//! place where they become display strings (`Rp 170.000`) or are read back from
//! user input.

use std::fmt;

pub const CURRENCY_PREFIX: &str = "Rp";

/// Largest amount a single form may carry (one trillion rupiah).
///
/// Keeps every stored amount far enough from `i64::MAX` that summing a
/// santri's whole history cannot overflow in practice.
pub const MAX_AMOUNT: i64 = 1_000_000_000_000;

/// Group the digits of `value` in threes with the Indonesian `.` separator
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    grouped
}

/// `170000` -> `"Rp 170.000"`, `-5000` -> `"-Rp 5.000"`
pub fn format_rupiah(amount: i64) -> String {
    let body = format!("{} {}", CURRENCY_PREFIX, format_thousands(amount.unsigned_abs()));
    if amount < 0 {
        format!("-{}", body)
    } else {
        body
    }
}

/// Like [`format_rupiah`] but positive amounts carry a `+`
pub fn format_signed_rupiah(amount: i64) -> String {
    if amount > 0 {
        format!("+{}", format_rupiah(amount))
    } else {
        format_rupiah(amount)
    }
}

/// `2.5` -> `"2,5 kg"`, `3.0` -> `"3 kg"`
pub fn format_weight(weight_kg: f64) -> String {
    let rounded = (weight_kg * 100.0).round() / 100.0;
    let text = if rounded.fract() == 0.0 {
        format!("{:.0}", rounded)
    } else {
        let two = format!("{:.2}", rounded);
        two.trim_end_matches('0').to_string()
    };
    format!("{} kg", text.replace('.', ","))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmountParseError {
    Empty,
    InvalidCharacter(char),
    /// Rupiah amounts are whole numbers; `,50` is rejected
    Fractional,
    /// `.` is only a thousands separator: `1.500.000` is fine, `1.5` is not
    InvalidGrouping,
    Overflow,
}

impl fmt::Display for AmountParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmountParseError::Empty => write!(f, "Nominal kosong"),
            AmountParseError::InvalidCharacter(c) => write!(f, "Karakter tidak valid: '{}'", c),
            AmountParseError::Fractional => write!(f, "Nominal rupiah tidak boleh pecahan"),
            AmountParseError::InvalidGrouping => {
                write!(f, "Pemisah ribuan harus per tiga digit")
            }
            AmountParseError::Overflow => write!(f, "Nominal terlalu besar"),
        }
    }
}

impl std::error::Error for AmountParseError {}

/// Read a rupiah amount typed by a user.
///
/// Accepts `170000`, `170.000`, `Rp 170.000` and `Rp170.000,00`. A trailing
/// decimal part after `,` must be all zeros. Dots must split the digits into
/// groups of three (`1.500.000`); anything else such as `1.5` is rejected
/// rather than silently read as `15`.
pub fn parse_rupiah(input: &str) -> Result<i64, AmountParseError> {
    let mut cleaned = input.trim();

    let negative = cleaned.starts_with('-');
    if negative {
        cleaned = cleaned[1..].trim_start();
    }

    if let Some(prefix) = cleaned.get(..2) {
        if prefix.eq_ignore_ascii_case(CURRENCY_PREFIX) {
            cleaned = cleaned[2..].trim_start();
        }
    }

    let whole = match cleaned.split_once(',') {
        Some((whole, fraction)) => {
            if !fraction.chars().all(|c| c == '0') {
                return Err(AmountParseError::Fractional);
            }
            whole
        }
        None => cleaned,
    };

    let whole: String = whole.chars().filter(|c| *c != ' ').collect();
    if let Some(c) = whole.chars().find(|c| *c != '.' && !c.is_ascii_digit()) {
        return Err(AmountParseError::InvalidCharacter(c));
    }
    if !whole.chars().any(|c| c.is_ascii_digit()) {
        return Err(AmountParseError::Empty);
    }

    let groups: Vec<&str> = whole.split('.').collect();
    if groups.len() > 1 {
        let (head, tail) = groups.split_at(1);
        let head_ok = (1..=3).contains(&head[0].len());
        if !head_ok || tail.iter().any(|group| group.len() != 3) {
            return Err(AmountParseError::InvalidGrouping);
        }
    }

    let mut value: i64 = 0;
    for c in groups.concat().chars() {
        let digit = i64::from(c as u8 - b'0');
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(digit))
            .ok_or(AmountParseError::Overflow)?;
    }

    Ok(if negative { -value } else { value })
}
