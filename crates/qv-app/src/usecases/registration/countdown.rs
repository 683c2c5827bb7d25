//! One-second resend countdown.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::AbortHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::debug;

use qv_core::ports::ClockPort;
use qv_core::registration::{RegistrationAction, RegistrationEvent};

use super::context::RegistrationContext;

const TICK: Duration = Duration::from_secs(1);

/// Owns the background task feeding `ResendTick` into the flow.
///
/// At most one task runs at a time; starting again replaces it. The task
/// ends by itself once the timer reaches zero and is aborted on drop.
#[derive(Default)]
pub struct ResendCountdown {
    handle: Mutex<Option<AbortHandle>>,
}

impl ResendCountdown {
    pub async fn start(&self, context: Arc<RegistrationContext>, clock: Arc<dyn ClockPort>) {
        let mut slot = self.handle.lock().await;
        if let Some(previous) = slot.take() {
            previous.abort();
        }

        let task = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + TICK, TICK);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                let actions = context
                    .transition(RegistrationEvent::ResendTick, clock.today())
                    .await;
                if actions.contains(&RegistrationAction::StopResendCountdown) {
                    debug!("resend countdown finished");
                    break;
                }
            }
        });

        *slot = Some(task.abort_handle());
    }

    pub async fn stop(&self) {
        if let Some(handle) = self.handle.lock().await.take() {
            handle.abort();
            debug!("resend countdown stopped");
        }
    }

    pub async fn is_running(&self) -> bool {
        self.handle
            .lock()
            .await
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for ResendCountdown {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.get_mut().take() {
            handle.abort();
        }
    }
}
