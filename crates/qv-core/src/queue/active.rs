use chrono::{DateTime, Utc};

use super::{QueueTicket, ServiceSelection};
use crate::explore::Business;
use crate::ids::TicketId;
use crate::ports::RandomPort;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueueError {
    #[error("Please select at least one service")]
    NoServicesSelected,
    #[error("No business selected")]
    NoBusiness,
}

/// Tickets the user currently holds, oldest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActiveQueues {
    tickets: Vec<QueueTicket>,
}

impl ActiveQueues {
    /// Issues one ticket per selected service that `business` offers, in the
    /// business's service order, and returns the new tickets.
    pub fn join(
        &mut self,
        business: &Business,
        selection: &ServiceSelection,
        joined_at: DateTime<Utc>,
        random: &dyn RandomPort,
    ) -> Result<Vec<QueueTicket>, QueueError> {
        if selection.is_empty() {
            return Err(QueueError::NoServicesSelected);
        }

        let issued: Vec<QueueTicket> = business
            .services
            .iter()
            .filter(|service| selection.contains(&service.id))
            .map(|service| QueueTicket::issue(business, service, joined_at, random))
            .collect();
        self.tickets.extend(issued.iter().cloned());
        Ok(issued)
    }

    pub fn leave(&mut self, id: &TicketId) -> Option<QueueTicket> {
        let index = self.tickets.iter().position(|ticket| &ticket.id == id)?;
        Some(self.tickets.remove(index))
    }

    pub fn get(&self, id: &TicketId) -> Option<&QueueTicket> {
        self.tickets.iter().find(|ticket| &ticket.id == id)
    }

    pub fn tickets(&self) -> &[QueueTicket] {
        &self.tickets
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::ops::RangeInclusive;
    use std::sync::Mutex;

    use super::*;
    use crate::explore::BusinessService;
    use crate::ids::{BusinessId, ServiceId};
    use crate::queue::{POSITION_RANGE, QUEUE_COUNT_RANGE, WAIT_MINUTES_RANGE};

    /// Always returns the low bound, recording every requested range.
    #[derive(Default)]
    struct LowestRandom {
        ranges: Mutex<Vec<RangeInclusive<u32>>>,
    }

    impl RandomPort for LowestRandom {
        fn pick(&self, range: RangeInclusive<u32>) -> u32 {
            let low = *range.start();
            self.ranges.lock().unwrap().push(range);
            low
        }
    }

    struct HighestRandom;

    impl RandomPort for HighestRandom {
        fn pick(&self, range: RangeInclusive<u32>) -> u32 {
            *range.end()
        }
    }

    fn service(id: &str, price: f64) -> BusinessService {
        BusinessService {
            id: ServiceId::from(id),
            name: format!("Service {id}"),
            price,
            duration: 30,
            description: String::new(),
        }
    }

    fn salon() -> Business {
        Business {
            id: BusinessId::from("1"),
            name: "Glow & Glam Salon".into(),
            category: "Beauty & Wellness".into(),
            rating: 4.8,
            review_count: 120,
            distance_km: 2.5,
            services: vec![service("s1", 500.0), service("s2", 800.0), service("s3", 250.0)],
        }
    }

    fn joined_at() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-08-20T10:00:00Z")
            .unwrap()
            .to_utc()
    }

    fn select(ids: &[&str]) -> ServiceSelection {
        let mut selection = ServiceSelection::default();
        for id in ids {
            selection.toggle(ServiceId::from(*id));
        }
        selection
    }

    #[test]
    fn join_issues_one_ticket_per_selected_service_in_business_order() {
        let mut queues = ActiveQueues::default();
        let random = LowestRandom::default();

        let issued = queues
            .join(&salon(), &select(&["s3", "s1"]), joined_at(), &random)
            .unwrap();

        let services: Vec<&str> = issued.iter().map(|t| t.service.id.as_str()).collect();
        assert_eq!(services, ["s1", "s3"]);
        assert_eq!(issued[0].id.as_str(), "1755684000000-s1");
        assert_eq!(issued[0].total, 500.0);
        assert_eq!(issued[1].total, 250.0);
        assert_eq!(issued[0].business_name, "Glow & Glam Salon");
        assert_eq!(queues.tickets(), issued.as_slice());

        assert_eq!(
            *random.ranges.lock().unwrap(),
            vec![
                POSITION_RANGE,
                QUEUE_COUNT_RANGE,
                WAIT_MINUTES_RANGE,
                POSITION_RANGE,
                QUEUE_COUNT_RANGE,
                WAIT_MINUTES_RANGE,
            ]
        );
    }

    #[test]
    fn drawn_values_stay_within_bounds() {
        let mut queues = ActiveQueues::default();

        let low = queues
            .join(&salon(), &select(&["s1"]), joined_at(), &LowestRandom::default())
            .unwrap();
        assert_eq!((low[0].position, low[0].queue_count), (1, 5));
        assert_eq!(low[0].wait_time_label(), "15m");

        let high = queues
            .join(&salon(), &select(&["s2"]), joined_at(), &HighestRandom)
            .unwrap();
        assert_eq!((high[0].position, high[0].queue_count), (20, 19));
        assert_eq!(high[0].wait_time_label(), "44m");
    }

    #[test]
    fn join_without_selection_is_rejected_and_adds_nothing() {
        let mut queues = ActiveQueues::default();

        let err = queues
            .join(&salon(), &ServiceSelection::default(), joined_at(), &HighestRandom)
            .unwrap_err();

        assert_eq!(err, QueueError::NoServicesSelected);
        assert!(queues.is_empty());
    }

    #[test]
    fn unknown_service_ids_are_skipped() {
        let mut queues = ActiveQueues::default();
        let issued = queues
            .join(&salon(), &select(&["s9"]), joined_at(), &HighestRandom)
            .unwrap();
        assert!(issued.is_empty());
        assert!(queues.is_empty());
    }

    #[test]
    fn leave_removes_only_that_ticket() {
        let mut queues = ActiveQueues::default();
        queues
            .join(&salon(), &select(&["s1", "s2"]), joined_at(), &HighestRandom)
            .unwrap();
        let id = TicketId::from("1755684000000-s1");

        let left = queues.leave(&id).unwrap();

        assert_eq!(left.service.id, ServiceId::from("s1"));
        assert_eq!(queues.tickets().len(), 1);
        assert!(queues.get(&id).is_none());
        assert!(queues.leave(&id).is_none());
    }

    #[test]
    fn ticket_labels() {
        let mut queues = ActiveQueues::default();
        let ticket = queues
            .join(&salon(), &select(&["s2"]), joined_at(), &HighestRandom)
            .unwrap()
            .remove(0);

        assert_eq!(ticket.joined_ago(joined_at()), "0m ago");
        assert_eq!(
            ticket.joined_ago(joined_at() + chrono::Duration::seconds(150)),
            "2m ago"
        );
        assert_eq!(
            ticket.leave_prompt(),
            "Are you sure you want to leave the queue for Service s2 at Glow & Glam Salon?\nYou will lose your current position (20 out of 19 people)."
        );
    }
}
