use std::fmt;

use thiserror::Error;

pub const ACCOUNT_NUMBER_LEN: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Account number must be exactly 10 digits")]
    WrongLength,
    #[error("Account number must contain only numeric characters")]
    NonNumeric,
    #[error("Account number cannot contain zero digits")]
    ContainsZero,
}

/// An account number that passed [`validate_account_number`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AccountNumber(String);

impl AccountNumber {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Rules are checked in order: length, digits only, no zero digit.
/// Surrounding whitespace is ignored.
pub fn validate_account_number(raw: &str) -> Result<AccountNumber, ValidationError> {
    let value = raw.trim();
    if value.chars().count() != ACCOUNT_NUMBER_LEN {
        return Err(ValidationError::WrongLength);
    }
    if !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::NonNumeric);
    }
    if value.contains('0') {
        return Err(ValidationError::ContainsZero);
    }
    Ok(AccountNumber(value.to_string()))
}
