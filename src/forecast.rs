//! Daily forecast aggregation.
//!
//! Condenses an ordered series of 3-hour forecast samples into a fixed number
//! of per-day summaries. Days are bucketed by the local weekday of each
//! sample, and the representative condition of a day is taken from the
//! sample closest to local noon.

use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc, Weekday};
use tracing::warn;

const NOON: i32 = 12;

/// One forecast point as delivered by the weather API.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastSample {
    pub observed_at: DateTime<Utc>,
    pub temperature: f32,
    pub condition_code: i32,
}

/// Aggregated forecast for a single local calendar day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DaySummary {
    /// `num_days_from_sunday()` gives the 0=Sunday..6=Saturday index.
    pub weekday: Weekday,
    pub min_temp: f32,
    pub max_temp: f32,
    pub condition_code: i32,
    /// Local hour of the sample that supplied `condition_code`.
    pub condition_hour: u32,
}

impl DaySummary {
    fn open(weekday: Weekday, hour: u32, sample: &ForecastSample) -> Self {
        Self {
            weekday,
            min_temp: sample.temperature,
            max_temp: sample.temperature,
            condition_code: sample.condition_code,
            condition_hour: hour,
        }
    }

    fn update(&mut self, hour: u32, sample: &ForecastSample) {
        if sample.temperature < self.min_temp {
            self.min_temp = sample.temperature;
        }
        if sample.temperature > self.max_temp {
            self.max_temp = sample.temperature;
        }
        if distance_from_noon(hour) < distance_from_noon(self.condition_hour) {
            self.condition_code = sample.condition_code;
            self.condition_hour = hour;
        }
    }
}

fn distance_from_noon(hour: u32) -> i32 {
    (NOON - hour as i32).abs()
}

enum Cursor {
    NoActiveDay,
    ActiveDay { weekday: Weekday, slot: usize },
    Exhausted { dropped: usize },
}

/// Aggregate `samples` into `D` day summaries.
///
/// Samples must be in ascending time order. Samples falling on
/// `current_weekday` (local time in `tz`) are skipped. A new slot is opened
/// whenever the local weekday changes from one kept sample to the next.
/// Slots that receive no samples stay `None`.
///
/// If the samples span more than `D` days, every sample after the `D`th day
/// is ignored.
pub fn aggregate<Tz: TimeZone, const D: usize>(
    samples: &[ForecastSample],
    current_weekday: Weekday,
    tz: &Tz,
) -> [Option<DaySummary>; D] {
    let mut days: [Option<DaySummary>; D] = [None; D];
    let mut cursor = Cursor::NoActiveDay;

    for sample in samples {
        let local = sample.observed_at.with_timezone(tz);
        let weekday = local.weekday();
        let hour = local.hour();

        if weekday == current_weekday {
            continue;
        }

        cursor = match cursor {
            Cursor::ActiveDay { weekday: active, slot } if active == weekday => {
                Cursor::ActiveDay { weekday, slot }
            }
            Cursor::Exhausted { dropped } => Cursor::Exhausted {
                dropped: dropped + 1,
            },
            Cursor::NoActiveDay if D > 0 => Cursor::ActiveDay { weekday, slot: 0 },
            Cursor::ActiveDay { slot, .. } if slot + 1 < D => Cursor::ActiveDay {
                weekday,
                slot: slot + 1,
            },
            _ => Cursor::Exhausted { dropped: 1 },
        };

        if let Cursor::ActiveDay { slot, .. } = cursor {
            match &mut days[slot] {
                Some(day) => day.update(hour, sample),
                empty => *empty = Some(DaySummary::open(weekday, hour, sample)),
            }
        }
    }

    if let Cursor::Exhausted { dropped } = cursor {
        warn!(
            "forecast spans more than {} days, ignored {} trailing samples",
            D, dropped
        );
    }

    days
}
