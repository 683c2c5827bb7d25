//! Field validation predicates shared by the account flows.
//!
//! Every predicate is pure: it reads its input, never the flow state, and
//! reports the first problem as a [`ValidationError`] whose `Display` is the
//! message shown to the user.

use chrono::{Datelike, Months, NaiveDate};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::registration::VerificationCode;

/// Minimum age, in full years, to create an account.
pub const MINIMUM_AGE: u32 = 13;
/// Oldest birthdate offered by the picker, in years before today.
pub const MAXIMUM_AGE: u32 = 100;
pub const MIN_PASSWORD_LEN: usize = 8;
/// Looser floor applied when a signed-in user changes their password.
pub const MIN_CHANGED_PASSWORD_LEN: usize = 6;
pub const PHONE_NUMBER_LEN: usize = 10;
pub const MIN_NAME_LEN: usize = 2;
pub const PASSWORD_SPECIAL_CHARS: &str = "!@#$%^&*(),.?\":{}|<>";

lazy_static! {
    static ref EMAIL_REGEX: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

/// Form fields an error can be attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    FirstName,
    LastName,
    PhoneNumber,
    VerificationCode,
    Gender,
    Birthdate,
    Email,
    EmailOrPhone,
    Password,
    ConfirmPassword,
    Consent,
}

impl Field {
    pub fn label(&self) -> &'static str {
        match self {
            Field::FirstName => "First name",
            Field::LastName => "Last name",
            Field::PhoneNumber => "Phone number",
            Field::VerificationCode => "Verification code",
            Field::Gender => "Gender",
            Field::Birthdate => "Birthdate",
            Field::Email => "Email",
            Field::EmailOrPhone => "Email or phone number",
            Field::Password => "Password",
            Field::ConfirmPassword => "Confirm password",
            Field::Consent => "Consent",
        }
    }
}

/// One of the five password rules, in the order their messages are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PasswordRule {
    MinLength,
    Uppercase,
    Lowercase,
    Digit,
    SpecialChar,
}

impl PasswordRule {
    pub const ALL: [PasswordRule; 5] = [
        PasswordRule::MinLength,
        PasswordRule::Uppercase,
        PasswordRule::Lowercase,
        PasswordRule::Digit,
        PasswordRule::SpecialChar,
    ];

    pub fn message(&self) -> &'static str {
        match self {
            PasswordRule::MinLength => "Password must be at least 8 characters",
            PasswordRule::Uppercase => "Password must contain at least one uppercase letter",
            PasswordRule::Lowercase => "Password must contain at least one lowercase letter",
            PasswordRule::Digit => "Password must contain at least one number",
            PasswordRule::SpecialChar => "Password must contain at least one special character",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationError {
    #[error("Please fill in all required fields")]
    RequiredFieldsMissing { field: Field },
    #[error("{} is required", .field.label())]
    Required { field: Field },
    #[error("Please confirm your password")]
    ConfirmationMissing,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Phone number must be exactly 10 digits")]
    InvalidPhoneNumber,
    #[error("{} must be at least 2 characters", .field.label())]
    NameTooShort { field: Field },
    #[error("{}", .rule.message())]
    WeakPassword { rule: PasswordRule },
    #[error("Please create a stronger password")]
    PasswordNotStrongEnough,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Please select your gender")]
    GenderMissing,
    #[error("Please select your birthdate")]
    BirthdateMissing,
    #[error("You must be at least 13 years old to create an account")]
    Underage { age: i32 },
    #[error("Please request a verification code first")]
    CodeNotSent,
    #[error("Please enter the complete 4-digit code")]
    IncompleteCode,
    #[error("You must agree to the Terms of Service and Privacy Policy")]
    ConsentRequired,
    #[error("Please fill in all fields")]
    AllFieldsRequired,
    #[error("New passwords do not match")]
    NewPasswordMismatch,
    #[error("Password must be at least 6 characters long")]
    NewPasswordTooShort,
}

impl ValidationError {
    /// Field the message belongs next to, if any.
    pub fn field(&self) -> Option<Field> {
        match self {
            ValidationError::RequiredFieldsMissing { field }
            | ValidationError::Required { field }
            | ValidationError::NameTooShort { field } => Some(*field),
            ValidationError::ConfirmationMissing
            | ValidationError::PasswordMismatch
            | ValidationError::NewPasswordMismatch => Some(Field::ConfirmPassword),
            ValidationError::InvalidEmail => Some(Field::Email),
            ValidationError::InvalidPhoneNumber => Some(Field::PhoneNumber),
            ValidationError::WeakPassword { .. }
            | ValidationError::PasswordNotStrongEnough
            | ValidationError::NewPasswordTooShort => Some(Field::Password),
            ValidationError::GenderMissing => Some(Field::Gender),
            ValidationError::BirthdateMissing | ValidationError::Underage { .. } => {
                Some(Field::Birthdate)
            }
            ValidationError::CodeNotSent | ValidationError::IncompleteCode => {
                Some(Field::VerificationCode)
            }
            ValidationError::ConsentRequired => Some(Field::Consent),
            ValidationError::AllFieldsRequired => None,
        }
    }

    /// Alert title used when the error is surfaced as a blocking dialog.
    pub fn title(&self) -> &'static str {
        match self {
            ValidationError::Underage { .. } => "Age Restriction",
            _ => "Error",
        }
    }
}

/// Outcome of the five independent password checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PasswordChecks {
    pub min_length: bool,
    pub uppercase: bool,
    pub lowercase: bool,
    pub digit: bool,
    pub special_char: bool,
}

impl PasswordChecks {
    pub fn evaluate(password: &str) -> Self {
        Self {
            min_length: password.chars().count() >= MIN_PASSWORD_LEN,
            uppercase: password.chars().any(|c| c.is_ascii_uppercase()),
            lowercase: password.chars().any(|c| c.is_ascii_lowercase()),
            digit: password.chars().any(|c| c.is_ascii_digit()),
            special_char: password.chars().any(|c| PASSWORD_SPECIAL_CHARS.contains(c)),
        }
    }

    pub fn passes(&self, rule: PasswordRule) -> bool {
        match rule {
            PasswordRule::MinLength => self.min_length,
            PasswordRule::Uppercase => self.uppercase,
            PasswordRule::Lowercase => self.lowercase,
            PasswordRule::Digit => self.digit,
            PasswordRule::SpecialChar => self.special_char,
        }
    }

    pub fn first_failure(&self) -> Option<PasswordRule> {
        PasswordRule::ALL
            .into_iter()
            .find(|rule| !self.passes(*rule))
    }

    pub fn strength(&self) -> PasswordStrength {
        let passed = PasswordRule::ALL
            .into_iter()
            .filter(|rule| self.passes(*rule))
            .count();
        PasswordStrength(passed as u8)
    }
}

/// Count of passing password checks, 0..=5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PasswordStrength(u8);

impl PasswordStrength {
    pub const MAX: u8 = 5;

    pub fn of(password: &str) -> Self {
        PasswordChecks::evaluate(password).strength()
    }

    pub fn score(&self) -> u8 {
        self.0
    }

    pub fn is_strong(&self) -> bool {
        self.0 == Self::MAX
    }

    pub fn label(&self) -> &'static str {
        match self.0 {
            0 | 1 => "Very Weak",
            2 => "Weak",
            3 => "Fair",
            4 => "Good",
            _ => "Strong",
        }
    }
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if EMAIL_REGEX.is_match(email) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail)
    }
}

/// Checks the password rules and returns its strength when all pass.
pub fn validate_password(password: &str) -> Result<PasswordStrength, ValidationError> {
    let checks = PasswordChecks::evaluate(password);
    match checks.first_failure() {
        Some(rule) => Err(ValidationError::WeakPassword { rule }),
        None => Ok(checks.strength()),
    }
}

pub fn validate_password_confirmation(
    password: &str,
    confirmation: &str,
) -> Result<(), ValidationError> {
    if confirmation.is_empty() {
        return Err(ValidationError::ConfirmationMissing);
    }
    if password != confirmation {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}

/// Checks a password change from the security settings, in dialog order.
pub fn validate_password_change(
    current: &str,
    new: &str,
    confirmation: &str,
) -> Result<(), ValidationError> {
    if current.is_empty() || new.is_empty() || confirmation.is_empty() {
        return Err(ValidationError::AllFieldsRequired);
    }
    if new != confirmation {
        return Err(ValidationError::NewPasswordMismatch);
    }
    if new.chars().count() < MIN_CHANGED_PASSWORD_LEN {
        return Err(ValidationError::NewPasswordTooShort);
    }
    Ok(())
}

pub fn validate_phone_number(phone_number: &str) -> Result<(), ValidationError> {
    if phone_number.len() == PHONE_NUMBER_LEN && phone_number.chars().all(|c| c.is_ascii_digit())
    {
        Ok(())
    } else {
        Err(ValidationError::InvalidPhoneNumber)
    }
}

pub fn validate_name(field: Field, name: &str) -> Result<(), ValidationError> {
    if name.trim().chars().count() < MIN_NAME_LEN {
        return Err(ValidationError::NameTooShort { field });
    }
    Ok(())
}

pub fn require(field: Field, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required { field });
    }
    Ok(())
}

/// Age in full years on `today`.
///
/// Negative for birthdates in the future.
pub fn calculate_age(birthdate: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birthdate.year();
    if (today.month(), today.day()) < (birthdate.month(), birthdate.day()) {
        age -= 1;
    }
    age
}

/// Returns the computed age when it meets [`MINIMUM_AGE`].
pub fn validate_age(birthdate: NaiveDate, today: NaiveDate) -> Result<u32, ValidationError> {
    let age = calculate_age(birthdate, today);
    if age < MINIMUM_AGE as i32 {
        return Err(ValidationError::Underage { age });
    }
    Ok(age as u32)
}

/// Selectable birthdate range `(earliest, latest)` for the date picker.
pub fn birthdate_bounds(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let earliest = today
        .checked_sub_months(Months::new(12 * MAXIMUM_AGE))
        .unwrap_or(NaiveDate::MIN);
    let latest = today
        .checked_sub_months(Months::new(12 * MINIMUM_AGE))
        .unwrap_or(NaiveDate::MIN);
    (earliest, latest)
}

pub fn validate_code_complete(code: &VerificationCode) -> Result<(), ValidationError> {
    if code.is_complete() {
        Ok(())
    } else {
        Err(ValidationError::IncompleteCode)
    }
}
