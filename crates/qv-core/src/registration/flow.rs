//! Step sequencer for account registration.
//!
//! The flow has three pages: identity (name, phone, verification code),
//! profile (gender, birthdate) and credentials (email, password, consent).
//! Each page has a forward predicate; `advance` only moves when it holds.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::draft::{DraftUpdate, RegistrationDraft};
use super::verification::VerificationFlow;
use crate::auth::SignupRequest;
use crate::validation::{
    validate_age, validate_code_complete, validate_email, validate_password_confirmation,
    validate_phone_number, Field, ValidationError,
};

pub const TOTAL_STEPS: u8 = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum RegistrationStep {
    /// Step 1: name and phone, then the verification code.
    Identity { verification: VerificationFlow },
    /// Step 2: gender and birthdate.
    Profile,
    /// Step 3: email, password and consent.
    Credentials,
}

impl RegistrationStep {
    /// 1-based position, always within `1..=TOTAL_STEPS`.
    pub fn number(&self) -> u8 {
        match self {
            RegistrationStep::Identity { .. } => 1,
            RegistrationStep::Profile => 2,
            RegistrationStep::Credentials => 3,
        }
    }
}

impl Default for RegistrationStep {
    fn default() -> Self {
        RegistrationStep::Identity {
            verification: VerificationFlow::AwaitingSend,
        }
    }
}

/// Outcome of [`RegistrationFlow::retreat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retreat {
    Moved { to: u8 },
    ExitFlow,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationFlow {
    step: RegistrationStep,
    draft: RegistrationDraft,
}

impl RegistrationFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> &RegistrationStep {
        &self.step
    }

    pub fn step_number(&self) -> u8 {
        self.step.number()
    }

    pub fn draft(&self) -> &RegistrationDraft {
        &self.draft
    }

    pub fn update(&mut self, update: DraftUpdate, today: NaiveDate) {
        self.draft.apply(update, today);
    }

    pub fn verification(&self) -> Option<&VerificationFlow> {
        match &self.step {
            RegistrationStep::Identity { verification } => Some(verification),
            _ => None,
        }
    }

    fn verification_mut(&mut self) -> Option<&mut VerificationFlow> {
        match &mut self.step {
            RegistrationStep::Identity { verification } => Some(verification),
            _ => None,
        }
    }

    /// Checks the identity fields before a code is requested.
    pub fn validate_code_request(&self) -> Result<(), ValidationError> {
        let draft = &self.draft;
        for (field, value) in [
            (Field::FirstName, draft.first_name()),
            (Field::LastName, draft.last_name()),
            (Field::PhoneNumber, draft.phone_number()),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::RequiredFieldsMissing { field });
            }
        }
        validate_phone_number(draft.phone_number())
    }

    pub fn code_sent(&mut self) {
        if let Some(verification) = self.verification_mut() {
            verification.code_sent();
        }
    }

    pub fn enter_digit(&mut self, index: usize, value: &str) -> Option<usize> {
        self.verification_mut()?.enter_digit(index, value)
    }

    pub fn resend(&mut self) -> bool {
        self.verification_mut()
            .is_some_and(VerificationFlow::resend)
    }

    pub fn clear_resend_cooldown(&mut self) {
        if let Some(verification) = self.verification_mut() {
            verification.clear_cooldown();
        }
    }

    pub fn tick(&mut self) -> u32 {
        self.verification_mut().map_or(0, VerificationFlow::tick)
    }

    pub fn change_number(&mut self) {
        if let Some(verification) = self.verification_mut() {
            verification.change_number();
        }
    }

    /// Forward predicate of the current step.
    pub fn validate_current_step(&self, today: NaiveDate) -> Result<(), ValidationError> {
        match &self.step {
            RegistrationStep::Identity { verification } => match verification.code() {
                None => Err(ValidationError::CodeNotSent),
                Some(code) => validate_code_complete(code),
            },
            RegistrationStep::Profile => {
                if self.draft.gender().is_none() {
                    return Err(ValidationError::GenderMissing);
                }
                let birthdate = self
                    .draft
                    .birthdate()
                    .ok_or(ValidationError::BirthdateMissing)?;
                validate_age(birthdate, today).map(|_| ())
            }
            RegistrationStep::Credentials => self.submission(today).map(|_| ()),
        }
    }

    pub fn can_advance(&self, today: NaiveDate) -> bool {
        self.step.number() < TOTAL_STEPS && self.validate_current_step(today).is_ok()
    }

    /// Moves one step forward when the current step validates. Returns whether it moved.
    pub fn advance(&mut self, today: NaiveDate) -> bool {
        if !self.can_advance(today) {
            return false;
        }
        self.step = match self.step {
            RegistrationStep::Identity { .. } => RegistrationStep::Profile,
            RegistrationStep::Profile | RegistrationStep::Credentials => {
                RegistrationStep::Credentials
            }
        };
        true
    }

    /// Moves one step back; from step 1 the caller should leave the flow.
    ///
    /// Returning to step 1 starts verification over: a new code must be sent.
    pub fn retreat(&mut self) -> Retreat {
        self.step = match self.step {
            RegistrationStep::Identity { .. } => return Retreat::ExitFlow,
            RegistrationStep::Profile => RegistrationStep::default(),
            RegistrationStep::Credentials => RegistrationStep::Profile,
        };
        Retreat::Moved {
            to: self.step.number(),
        }
    }

    /// Packages the draft for the auth backend once every field checks out.
    pub fn submission(&self, today: NaiveDate) -> Result<SignupRequest, ValidationError> {
        let draft = &self.draft;
        if draft.email().trim().is_empty() {
            return Err(ValidationError::RequiredFieldsMissing { field: Field::Email });
        }
        if draft.password().is_empty() {
            return Err(ValidationError::RequiredFieldsMissing {
                field: Field::Password,
            });
        }
        if draft.confirm_password().is_empty() {
            return Err(ValidationError::RequiredFieldsMissing {
                field: Field::ConfirmPassword,
            });
        }
        validate_password_confirmation(draft.password(), draft.confirm_password())?;
        if !draft.agree_to_terms() {
            return Err(ValidationError::ConsentRequired);
        }
        if !draft.password_strength().is_strong() {
            return Err(ValidationError::PasswordNotStrongEnough);
        }
        validate_email(draft.email())?;

        let gender = draft.gender().ok_or(ValidationError::GenderMissing)?;
        let birthdate = draft.birthdate().ok_or(ValidationError::BirthdateMissing)?;
        validate_age(birthdate, today)?;

        Ok(SignupRequest {
            first_name: draft.first_name().trim().to_string(),
            last_name: draft.last_name().trim().to_string(),
            phone_number: draft.phone_number().to_string(),
            country_code: draft.country_code().to_string(),
            email: draft.email().trim().to_string(),
            password: draft.password().clone(),
            confirm_password: draft.confirm_password().clone(),
            gender,
            birthdate,
            agree_to_terms: draft.agree_to_terms(),
        })
    }
}
