pub mod config;
pub mod duration;
pub mod legs;
pub mod transit;

// Re-export commonly used types
pub use duration::{days_from_duration, hours_from_duration, DurationInput, DurationParserError};
pub use legs::{route_transit, LegTransit, RouteTransit};
pub use transit::TransitTime;
