//! Read-only snapshot of the registration flow for presentation.

use chrono::NaiveDate;
use serde::Serialize;

use super::code::CODE_LENGTH;
use super::draft::Gender;
use super::flow::TOTAL_STEPS;
use super::state_machine::RegistrationState;
use crate::validation::{birthdate_bounds, PasswordRule};

/// What a registration screen needs to render. Secrets are never included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationView {
    pub step: u8,
    pub total_steps: u8,
    pub first_name: String,
    pub last_name: String,
    pub country_code: String,
    pub phone_number: String,
    pub code_sent: bool,
    pub code_cells: [String; CODE_LENGTH],
    pub resend_in_secs: u32,
    pub can_resend: bool,
    pub gender: Option<Gender>,
    pub birthdate: Option<NaiveDate>,
    pub age: Option<i32>,
    pub min_birthdate: NaiveDate,
    pub max_birthdate: NaiveDate,
    pub email: String,
    pub password_strength: u8,
    pub password_strength_label: &'static str,
    /// Rules the current password still fails, in display order.
    pub failing_password_rules: Vec<PasswordRule>,
    pub agree_to_terms: bool,
    pub submitting: bool,
}

impl RegistrationView {
    pub fn of(state: &RegistrationState, today: NaiveDate) -> Self {
        let draft = state.flow.draft();
        let verification = state.flow.verification();
        let checks = draft.password_checks();
        let strength = checks.strength();
        let (min_birthdate, max_birthdate) = birthdate_bounds(today);

        Self {
            step: state.flow.step_number(),
            total_steps: TOTAL_STEPS,
            first_name: draft.first_name().to_string(),
            last_name: draft.last_name().to_string(),
            country_code: draft.country_code().to_string(),
            phone_number: draft.phone_number().to_string(),
            code_sent: verification.is_some_and(|v| v.is_awaiting_entry()),
            code_cells: verification
                .and_then(|v| v.code())
                .map(|code| code.cells())
                .unwrap_or_default(),
            resend_in_secs: verification.map_or(0, |v| v.resend_remaining()),
            can_resend: verification.is_some_and(|v| v.can_resend()),
            gender: draft.gender(),
            birthdate: draft.birthdate(),
            age: draft.age(),
            min_birthdate,
            max_birthdate,
            email: draft.email().to_string(),
            password_strength: strength.score(),
            password_strength_label: strength.label(),
            failing_password_rules: PasswordRule::ALL
                .into_iter()
                .filter(|rule| !checks.passes(*rule))
                .collect(),
            agree_to_terms: draft.agree_to_terms(),
            submitting: state.submitting,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registration::{DraftUpdate, RegistrationEvent, RegistrationStateMachine};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, 20).unwrap()
    }

    #[test]
    fn fresh_view_starts_at_step_one_without_code() {
        let view = RegistrationView::of(&RegistrationState::default(), today());
        assert_eq!(view.step, 1);
        assert_eq!(view.total_steps, 3);
        assert_eq!(view.country_code, "+91");
        assert!(!view.code_sent);
        assert_eq!(view.code_cells, <[String; 4]>::default());
        assert_eq!(view.password_strength_label, "Very Weak");
        assert_eq!(view.failing_password_rules.len(), 5);
        assert_eq!(view.max_birthdate, NaiveDate::from_ymd_opt(2012, 8, 20).unwrap());
        assert_eq!(view.min_birthdate, NaiveDate::from_ymd_opt(1925, 8, 20).unwrap());
    }

    #[test]
    fn view_reflects_password_checks_without_exposing_password() {
        let (state, _) = RegistrationStateMachine::transition(
            RegistrationState::default(),
            RegistrationEvent::Update(DraftUpdate::Password("abcdefgh".into())),
            today(),
        );
        let view = RegistrationView::of(&state, today());
        assert_eq!(view.password_strength, 2);
        assert_eq!(
            view.failing_password_rules,
            vec![
                PasswordRule::Uppercase,
                PasswordRule::Digit,
                PasswordRule::SpecialChar
            ]
        );

        let json = serde_json::to_string(&view).unwrap();
        assert!(!json.contains("abcdefgh"));
    }
}
