//! Phone verification sub-flow of the identity step.

use serde::{Deserialize, Serialize};

use super::code::{CodeInput, VerificationCode, CODE_LENGTH};
use super::resend::ResendTimer;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum VerificationFlow {
    /// No code requested yet, or the user chose to change the number.
    #[default]
    AwaitingSend,
    /// A code was sent; the user fills the cells.
    AwaitingEntry {
        code: VerificationCode,
        timer: ResendTimer,
    },
}

impl VerificationFlow {
    /// The send call resolved: start a fresh entry with the full cooldown.
    pub fn code_sent(&mut self) {
        *self = VerificationFlow::AwaitingEntry {
            code: VerificationCode::default(),
            timer: ResendTimer::started(),
        };
    }

    /// Writes one cell. Returns the cell that should take focus next.
    pub fn enter_digit(&mut self, index: usize, value: &str) -> Option<usize> {
        let VerificationFlow::AwaitingEntry { code, .. } = self else {
            return None;
        };
        match code.set(index, value) {
            CodeInput::Set if index + 1 < CODE_LENGTH => Some(index + 1),
            _ => None,
        }
    }

    /// Restarts the cooldown if it has elapsed. Returns whether a resend may go out.
    pub fn resend(&mut self) -> bool {
        match self {
            VerificationFlow::AwaitingEntry { timer, .. } if timer.can_resend() => {
                timer.restart();
                true
            }
            _ => false,
        }
    }

    /// Drops the cooldown so the user can retry right away.
    pub fn clear_cooldown(&mut self) {
        if let VerificationFlow::AwaitingEntry { timer, .. } = self {
            timer.clear();
        }
    }

    /// One-second cooldown step. Returns the seconds left.
    pub fn tick(&mut self) -> u32 {
        match self {
            VerificationFlow::AwaitingEntry { timer, .. } => timer.tick(),
            VerificationFlow::AwaitingSend => 0,
        }
    }

    /// Back to number entry; the code is discarded.
    pub fn change_number(&mut self) {
        *self = VerificationFlow::AwaitingSend;
    }

    pub fn is_awaiting_entry(&self) -> bool {
        matches!(self, VerificationFlow::AwaitingEntry { .. })
    }

    pub fn is_complete(&self) -> bool {
        self.code().is_some_and(VerificationCode::is_complete)
    }

    pub fn code(&self) -> Option<&VerificationCode> {
        match self {
            VerificationFlow::AwaitingEntry { code, .. } => Some(code),
            VerificationFlow::AwaitingSend => None,
        }
    }

    pub fn resend_remaining(&self) -> u32 {
        match self {
            VerificationFlow::AwaitingEntry { timer, .. } => timer.remaining(),
            VerificationFlow::AwaitingSend => 0,
        }
    }

    pub fn can_resend(&self) -> bool {
        match self {
            VerificationFlow::AwaitingEntry { timer, .. } => timer.can_resend(),
            VerificationFlow::AwaitingSend => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registration::resend::RESEND_COOLDOWN_SECS;

    #[test]
    fn digits_are_ignored_before_code_is_sent() {
        let mut flow = VerificationFlow::default();
        assert_eq!(flow.enter_digit(0, "1"), None);
        assert!(flow.code().is_none());
    }

    #[test]
    fn entry_advances_focus_until_last_cell() {
        let mut flow = VerificationFlow::default();
        flow.code_sent();
        assert_eq!(flow.enter_digit(0, "1"), Some(1));
        assert_eq!(flow.enter_digit(1, "2"), Some(2));
        assert_eq!(flow.enter_digit(2, "3"), Some(3));
        assert!(!flow.is_complete());
        assert_eq!(flow.enter_digit(3, "4"), None);
        assert!(flow.is_complete());
    }

    #[test]
    fn clearing_a_cell_keeps_focus() {
        let mut flow = VerificationFlow::default();
        flow.code_sent();
        flow.enter_digit(0, "1");
        assert_eq!(flow.enter_digit(0, ""), None);
    }

    #[test]
    fn resend_blocked_until_cooldown_elapses() {
        let mut flow = VerificationFlow::default();
        assert!(!flow.resend());

        flow.code_sent();
        assert_eq!(flow.resend_remaining(), RESEND_COOLDOWN_SECS);
        assert!(!flow.resend());

        for _ in 0..RESEND_COOLDOWN_SECS {
            flow.tick();
        }
        assert!(flow.can_resend());
        assert!(flow.resend());
        assert_eq!(flow.resend_remaining(), RESEND_COOLDOWN_SECS);
    }

    #[test]
    fn change_number_then_resend_yields_empty_code_and_full_timer() {
        let mut flow = VerificationFlow::default();
        flow.code_sent();
        flow.enter_digit(0, "9");
        flow.tick();
        flow.change_number();
        assert_eq!(flow, VerificationFlow::AwaitingSend);

        flow.code_sent();
        assert!(flow.code().is_some_and(VerificationCode::is_empty));
        assert_eq!(flow.resend_remaining(), RESEND_COOLDOWN_SECS);
    }
}
