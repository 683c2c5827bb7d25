use chrono::NaiveDate;
use tokio::sync::Mutex;
use tracing::{debug, info};

use qv_core::registration::{
    RegistrationAction, RegistrationEvent, RegistrationState, RegistrationStateMachine,
    RegistrationView,
};

/// Shared registration context.
///
/// Shared between `RegistrationOrchestrator` and the resend countdown task.
/// Each transition runs under the `state` lock, so transitions are
/// serialized while collaborator calls run outside of it.
#[derive(Default)]
pub struct RegistrationContext {
    state: Mutex<RegistrationState>,
    /// Code cell that should hold input focus, set by `FocusCodeCell`.
    focused_cell: Mutex<Option<usize>>,
}

impl RegistrationContext {
    pub async fn get_state(&self) -> RegistrationState {
        self.state.lock().await.clone()
    }

    pub async fn view(&self, today: NaiveDate) -> RegistrationView {
        RegistrationView::of(&*self.state.lock().await, today)
    }

    /// Applies one event and returns the actions it produced.
    pub async fn transition(
        &self,
        event: RegistrationEvent,
        today: NaiveDate,
    ) -> Vec<RegistrationAction> {
        let mut state = self.state.lock().await;
        let from_step = state.flow.step_number();
        let event_name = format!("{:?}", event);

        let (next, actions) = RegistrationStateMachine::transition(state.clone(), event, today);

        let to_step = next.flow.step_number();
        if from_step != to_step {
            info!(from_step, to_step, "registration step changed");
        }
        debug!(
            event = %event_name,
            submitting = next.submitting,
            num_actions = actions.len(),
            "registration state transition"
        );

        *state = next;
        actions
    }

    pub async fn set_focused_cell(&self, index: Option<usize>) {
        *self.focused_cell.lock().await = index;
    }

    pub async fn focused_cell(&self) -> Option<usize> {
        *self.focused_cell.lock().await
    }
}
