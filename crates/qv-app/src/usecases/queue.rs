use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, info_span, warn, Instrument};

use qv_core::explore::Business;
use qv_core::ids::{BusinessId, ServiceId, TicketId};
use qv_core::ports::{BusinessCatalogPort, ClockPort, RandomPort};
use qv_core::queue::{ActiveQueues, QueueError, QueueTicket, ServiceSelection};

#[derive(Debug, thiserror::Error)]
pub enum QueueServiceError {
    #[error("business {0} is not in the catalog")]
    UnknownBusiness(BusinessId),
    #[error("catalog unavailable: {0}")]
    Catalog(#[source] anyhow::Error),
    #[error(transparent)]
    Queue(#[from] QueueError),
}

#[derive(Default)]
struct QueueState {
    /// Business whose service picker is open.
    business: Option<Business>,
    selection: ServiceSelection,
    active: ActiveQueues,
}

/// Opening a business, picking services, joining and leaving queues.
pub struct QueueService {
    catalog: Arc<dyn BusinessCatalogPort>,
    random: Arc<dyn RandomPort>,
    clock: Arc<dyn ClockPort>,
    state: Mutex<QueueState>,
}

impl QueueService {
    pub fn new(
        catalog: Arc<dyn BusinessCatalogPort>,
        random: Arc<dyn RandomPort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            catalog,
            random,
            clock,
            state: Mutex::new(QueueState::default()),
        }
    }

    /// Opens the service picker for `id` with nothing selected.
    pub async fn open_business(&self, id: &BusinessId) -> Result<Business, QueueServiceError> {
        let business = self
            .catalog
            .businesses()
            .await
            .map_err(QueueServiceError::Catalog)?
            .into_iter()
            .find(|business| &business.id == id)
            .ok_or_else(|| QueueServiceError::UnknownBusiness(id.clone()))?;

        let mut state = self.state.lock().await;
        state.business = Some(business.clone());
        state.selection.clear();
        Ok(business)
    }

    /// Dismisses the picker, dropping the selection.
    pub async fn close_business(&self) {
        let mut state = self.state.lock().await;
        state.business = None;
        state.selection.clear();
    }

    pub async fn current_business(&self) -> Option<Business> {
        self.state.lock().await.business.clone()
    }

    /// Returns whether `id` is selected afterwards.
    pub async fn toggle_service(&self, id: ServiceId) -> bool {
        self.state.lock().await.selection.toggle(id)
    }

    pub async fn selection(&self) -> ServiceSelection {
        self.state.lock().await.selection.clone()
    }

    /// Joins one queue per selected service and closes the picker.
    ///
    /// Without an open business or a selection nothing changes.
    pub async fn join(&self) -> Result<Vec<QueueTicket>, QueueServiceError> {
        let mut state = self.state.lock().await;
        let Some(business) = state.business.clone() else {
            return Err(QueueError::NoBusiness.into());
        };

        let span = info_span!("usecase.queue.join", business_id = %business.id);
        let _entered = span.enter();
        let joined_at = self.clock.now();
        let QueueState {
            selection, active, ..
        } = &mut *state;
        let issued = active
            .join(&business, selection, joined_at, self.random.as_ref())
            .inspect_err(|err| warn!(error = %err, "join rejected"))?;

        state.business = None;
        state.selection.clear();
        info!(tickets = issued.len(), "joined queues");
        Ok(issued)
    }

    pub async fn leave(&self, id: &TicketId) -> Option<QueueTicket> {
        let left = self.state.lock().await.active.leave(id);
        match &left {
            Some(ticket) => info!(ticket_id = %ticket.id, "left queue"),
            None => warn!(ticket_id = %id, "no such ticket"),
        }
        left
    }

    pub async fn active(&self) -> Vec<QueueTicket> {
        self.state.lock().await.active.tickets().to_vec()
    }
}
