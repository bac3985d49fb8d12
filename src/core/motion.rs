//! Automatic duty-status detection from vehicle telemetry.
//!
//! The detector only decides WHAT transition happened; it feeds the same
//! `ChangeLogic::apply` entry point as manual actions, tagged
//! `source=auto`. There is no second write path.

use crate::models::duty_status::DutyStatus;
use crate::models::geo::GeoPoint;
use chrono::NaiveDateTime;

/// Speed above which the vehicle counts as moving.
pub const DRIVING_SPEED_MPH: f64 = 5.0;

/// Motion must be sustained this long before Driving is declared.
pub const DRIVING_SUSTAIN_SECS: i64 = 60;

#[derive(Debug, Clone, Copy)]
pub struct SpeedSample {
    pub ts: NaiveDateTime,
    pub speed_mph: f64,
    pub engine_on: bool,
    pub location: GeoPoint,
}

#[derive(Debug, Clone, Copy)]
pub struct AutoTransition {
    pub status: DutyStatus,
    pub at: NaiveDateTime,
    pub location: GeoPoint,
}

/// Tracks sustained motion across a stream of samples and emits at most
/// one transition per status change.
#[derive(Debug)]
pub struct MotionDetector {
    last_emitted: Option<DutyStatus>,
    moving_since: Option<NaiveDateTime>,
}

impl MotionDetector {
    /// Prime with the driver's current status so an already-driving
    /// driver does not produce a duplicate Driving transition.
    pub fn new(current: Option<DutyStatus>) -> Self {
        Self {
            last_emitted: current,
            moving_since: None,
        }
    }

    pub fn observe(&mut self, sample: &SpeedSample) -> Option<AutoTransition> {
        if sample.speed_mph > DRIVING_SPEED_MPH {
            let since = *self.moving_since.get_or_insert(sample.ts);

            if (sample.ts - since).num_seconds() >= DRIVING_SUSTAIN_SECS
                && self.last_emitted != Some(DutyStatus::Driving)
            {
                self.last_emitted = Some(DutyStatus::Driving);
                // the record starts when motion began, not when the
                // sustain threshold was crossed
                return Some(AutoTransition {
                    status: DutyStatus::Driving,
                    at: since,
                    location: sample.location,
                });
            }

            return None;
        }

        // Motion interrupted before the sustain threshold.
        self.moving_since = None;

        if sample.speed_mph <= 0.0
            && sample.engine_on
            && self.last_emitted == Some(DutyStatus::Driving)
        {
            self.last_emitted = Some(DutyStatus::OnDutyNotDriving);
            return Some(AutoTransition {
                status: DutyStatus::OnDutyNotDriving,
                at: sample.ts,
                location: sample.location,
            });
        }

        None
    }
}
