//! Headless presentation adapters: a route stack and an alert log.

mod alert_sink;
mod route_stack;

pub use alert_sink::{Alert, TracingAlertSink};
pub use route_stack::RouteStackNavigator;
