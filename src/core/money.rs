//! Integer-cent money helpers.
//!
//! All amounts in the system are carried as `i64` cents; formatting to
//! reais only happens at presentation edges (bill reminders, advice
//! prompts).

use crate::errors::{Error, Result};

/// Validates a monetary amount: strictly positive integer cents.
pub fn validate_amount(amount_cents: i64) -> Result<()> {
    if amount_cents <= 0 {
        return Err(Error::InvalidAmount { amount_cents });
    }
    Ok(())
}

/// Formats integer cents as Brazilian currency, e.g. `R$ 1.234,56`.
#[must_use]
pub fn format_brl(amount_cents: i64) -> String {
    let negative = amount_cents < 0;
    let abs = amount_cents.unsigned_abs();
    let reais = abs / 100;
    let cents = abs % 100;

    // Thousands separated by dots, per pt-BR convention
    let digits = reais.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}R$ {grouped},{cents:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_amount() {
        assert!(validate_amount(1).is_ok());
        assert!(validate_amount(10_000).is_ok());
        assert!(matches!(
            validate_amount(0),
            Err(Error::InvalidAmount { amount_cents: 0 })
        ));
        assert!(validate_amount(-50).is_err());
    }

    #[test]
    fn test_format_brl() {
        assert_eq!(format_brl(0), "R$ 0,00");
        assert_eq!(format_brl(5), "R$ 0,05");
        assert_eq!(format_brl(3334), "R$ 33,34");
        assert_eq!(format_brl(10_000), "R$ 100,00");
        assert_eq!(format_brl(123_456), "R$ 1.234,56");
        assert_eq!(format_brl(1_234_567_89), "R$ 1.234.567,89");
        assert_eq!(format_brl(-9_90), "-R$ 9,90");
    }
}
