use crate::duration::{days_from_hours, DurationInput};
use log::debug;
use serde::{Deserialize, Serialize};

/// One leg of a multi-leg route, as carried by carrier rate payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegTransit {
    #[serde(default, alias = "leg_order")]
    pub sequence: u32,
    #[serde(default, alias = "transitTime")]
    pub transit_time: DurationInput,
}

impl LegTransit {
    pub fn new(sequence: u32, transit_time: impl Into<DurationInput>) -> Self {
        Self {
            sequence,
            transit_time: transit_time.into(),
        }
    }

    /// Builds legs numbered from 1 in the given order.
    pub fn sequenced<I, T>(values: I) -> Vec<LegTransit>
    where
        I: IntoIterator<Item = T>,
        T: Into<DurationInput>,
    {
        values
            .into_iter()
            .zip(1..)
            .map(|(value, sequence)| LegTransit::new(sequence, value))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegHours {
    pub sequence: u32,
    pub input: DurationInput,
    pub hours: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteTransit {
    pub legs: Vec<LegHours>,
    pub total_hours: Option<u64>,
    pub total_days: Option<u64>,
    pub unparseable_legs: usize,
}

/// Orders legs by sequence, keeping input order for equal sequences.
pub fn sort_legs(legs: &mut [LegTransit]) {
    legs.sort_by_key(|leg| leg.sequence);
}

/// Totals the transit time of a route. Legs that cannot be parsed are
/// counted but contribute nothing; a route with no parseable leg has no total.
pub fn route_transit(legs: &[LegTransit]) -> RouteTransit {
    let mut ordered = legs.to_vec();
    sort_legs(&mut ordered);

    let legs: Vec<LegHours> = ordered
        .into_iter()
        .map(|leg| LegHours {
            sequence: leg.sequence,
            hours: leg.transit_time.hours(),
            input: leg.transit_time,
        })
        .collect();

    let unparseable_legs = legs.iter().filter(|leg| leg.hours.is_none()).count();
    let total_hours = legs
        .iter()
        .filter_map(|leg| leg.hours)
        .reduce(|acc, hours| acc.saturating_add(hours));
    debug!(
        "route of {} legs: total {:?}h, {} unparseable",
        legs.len(),
        total_hours,
        unparseable_legs
    );

    RouteTransit {
        legs,
        total_hours,
        total_days: days_from_hours(total_hours),
        unparseable_legs,
    }
}
