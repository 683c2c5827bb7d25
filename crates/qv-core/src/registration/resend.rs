use serde::{Deserialize, Serialize};

/// Seconds the user waits before another code can be requested.
pub const RESEND_COOLDOWN_SECS: u32 = 22;

/// Countdown gating the resend action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResendTimer {
    remaining: u32,
}

impl ResendTimer {
    /// A timer already counting down from the full cooldown.
    pub fn started() -> Self {
        Self {
            remaining: RESEND_COOLDOWN_SECS,
        }
    }

    pub fn restart(&mut self) {
        self.remaining = RESEND_COOLDOWN_SECS;
    }

    pub fn clear(&mut self) {
        self.remaining = 0;
    }

    /// Advance by one second. Returns the seconds left.
    pub fn tick(&mut self) -> u32 {
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn can_resend(&self) -> bool {
        self.remaining == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_down_to_zero_over_cooldown_ticks() {
        let mut timer = ResendTimer::default();
        assert!(timer.can_resend());

        timer.restart();
        assert_eq!(timer.remaining(), 22);
        for _ in 0..RESEND_COOLDOWN_SECS - 1 {
            timer.tick();
            assert!(!timer.can_resend());
        }
        assert_eq!(timer.tick(), 0);
        assert!(timer.can_resend());
        assert_eq!(timer.tick(), 0);
    }
}
