use std::ops::RangeInclusive;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::explore::{Business, BusinessService};
use crate::ids::{BusinessId, TicketId};
use crate::ports::RandomPort;

pub const POSITION_RANGE: RangeInclusive<u32> = 1..=20;
/// People in the queue. Drawn independently of the position.
pub const QUEUE_COUNT_RANGE: RangeInclusive<u32> = 5..=19;
pub const WAIT_MINUTES_RANGE: RangeInclusive<u32> = 15..=44;

/// One joined queue: a single service at a single business.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueTicket {
    pub id: TicketId,
    pub business_id: BusinessId,
    pub business_name: String,
    pub service: BusinessService,
    pub total: f64,
    pub position: u32,
    pub queue_count: u32,
    pub wait_minutes: u32,
    pub joined_at: DateTime<Utc>,
}

impl QueueTicket {
    pub fn issue(
        business: &Business,
        service: &BusinessService,
        joined_at: DateTime<Utc>,
        random: &dyn RandomPort,
    ) -> Self {
        Self {
            id: TicketId::for_service(joined_at, &service.id),
            business_id: business.id.clone(),
            business_name: business.name.clone(),
            service: service.clone(),
            total: service.price,
            position: random.pick(POSITION_RANGE),
            queue_count: random.pick(QUEUE_COUNT_RANGE),
            wait_minutes: random.pick(WAIT_MINUTES_RANGE),
            joined_at,
        }
    }

    /// `"25m"`.
    pub fn wait_time_label(&self) -> String {
        format!("{}m", self.wait_minutes)
    }

    /// Whole minutes since joining, e.g. `"0m ago"`.
    pub fn joined_ago(&self, now: DateTime<Utc>) -> String {
        let minutes = (now - self.joined_at).num_minutes().max(0);
        format!("{minutes}m ago")
    }

    /// Confirmation text for leaving this queue.
    pub fn leave_prompt(&self) -> String {
        format!(
            "Are you sure you want to leave the queue for {} at {}?\nYou will lose your current position ({} out of {} people).",
            self.service.name, self.business_name, self.position, self.queue_count
        )
    }
}
