use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::security::SecretString;
use crate::validation::{calculate_age, PasswordChecks, PasswordStrength};

pub const DEFAULT_COUNTRY_CODE: &str = "+91";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// A single edit to the registration form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftUpdate {
    FirstName(String),
    LastName(String),
    PhoneNumber(String),
    CountryCode(String),
    Gender(Gender),
    Birthdate(NaiveDate),
    Email(String),
    Password(SecretString),
    ConfirmPassword(SecretString),
    AgreeToTerms(bool),
}

/// Registration form state gathered across the steps.
///
/// The derived age is recomputed whenever a birthdate is chosen and the
/// password checks whenever the password changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationDraft {
    first_name: String,
    last_name: String,
    phone_number: String,
    country_code: String,
    gender: Option<Gender>,
    birthdate: Option<NaiveDate>,
    age: Option<i32>,
    email: String,
    password: SecretString,
    confirm_password: SecretString,
    password_checks: PasswordChecks,
    agree_to_terms: bool,
}

impl Default for RegistrationDraft {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            phone_number: String::new(),
            country_code: DEFAULT_COUNTRY_CODE.to_string(),
            gender: None,
            birthdate: None,
            age: None,
            email: String::new(),
            password: SecretString::default(),
            confirm_password: SecretString::default(),
            password_checks: PasswordChecks::default(),
            agree_to_terms: false,
        }
    }
}

impl RegistrationDraft {
    pub fn apply(&mut self, update: DraftUpdate, today: NaiveDate) {
        match update {
            DraftUpdate::FirstName(value) => self.first_name = value,
            DraftUpdate::LastName(value) => self.last_name = value,
            DraftUpdate::PhoneNumber(value) => self.phone_number = value,
            DraftUpdate::CountryCode(value) => self.country_code = value,
            DraftUpdate::Gender(value) => self.gender = Some(value),
            DraftUpdate::Birthdate(value) => {
                self.birthdate = Some(value);
                self.age = Some(calculate_age(value, today));
            }
            DraftUpdate::Email(value) => self.email = value,
            DraftUpdate::Password(value) => {
                self.password_checks = PasswordChecks::evaluate(value.expose());
                self.password = value;
            }
            DraftUpdate::ConfirmPassword(value) => self.confirm_password = value,
            DraftUpdate::AgreeToTerms(value) => self.agree_to_terms = value,
        }
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }

    pub fn country_code(&self) -> &str {
        &self.country_code
    }

    /// Country code and number as dialled, e.g. `+91 9876543210`.
    pub fn full_phone_number(&self) -> String {
        format!("{} {}", self.country_code, self.phone_number)
    }

    pub fn gender(&self) -> Option<Gender> {
        self.gender
    }

    pub fn birthdate(&self) -> Option<NaiveDate> {
        self.birthdate
    }

    pub fn age(&self) -> Option<i32> {
        self.age
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &SecretString {
        &self.password
    }

    pub fn confirm_password(&self) -> &SecretString {
        &self.confirm_password
    }

    pub fn password_checks(&self) -> PasswordChecks {
        self.password_checks
    }

    pub fn password_strength(&self) -> PasswordStrength {
        self.password_checks.strength()
    }

    pub fn agree_to_terms(&self) -> bool {
        self.agree_to_terms
    }
}
