use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult};
use strum::{AsRefStr, Display, EnumString};

use crate::model::{
    id::{BookingId, SpaceId, UserId},
    role::Role,
};

pub mod event;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    pub booking_id: BookingId,
    pub space_id: SpaceId,
    pub tenant_id: UserId,
    pub status: BookingStatus,
    pub period: BookingPeriod,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    AsRefStr,
    Display,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
}

impl BookingStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, BookingStatus::Rejected | BookingStatus::Cancelled)
    }
}

/// Transitions a booking can take after it has been created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum BookingAction {
    Approve,
    Reject,
    Cancel,
}

impl BookingAction {
    /// The transition table. `None` means the action is not allowed from
    /// `from`.
    pub fn next_status(self, from: BookingStatus) -> Option<BookingStatus> {
        use BookingStatus::*;
        match (from, self) {
            (Pending, BookingAction::Approve) => Some(Approved),
            (Pending, BookingAction::Reject) => Some(Rejected),
            (Pending | Approved, BookingAction::Cancel) => Some(Cancelled),
            _ => None,
        }
    }

    /// The role whose relationship to the booking authorizes the action.
    pub fn actor_role(self) -> Role {
        match self {
            BookingAction::Approve | BookingAction::Reject => Role::Owner,
            BookingAction::Cancel => Role::Tenant,
        }
    }

    pub fn past_tense(self) -> &'static str {
        match self {
            BookingAction::Approve => "approved",
            BookingAction::Reject => "rejected",
            BookingAction::Cancel => "cancelled",
        }
    }

    /// Cancellation is refused once the reserved window has begun.
    pub fn requires_not_started(self) -> bool {
        matches!(self, BookingAction::Cancel)
    }
}

/// A half-open range of calendar days `[date_from, date_to)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BookingPeriod {
    date_from: NaiveDate,
    date_to: NaiveDate,
}

impl BookingPeriod {
    pub fn new(date_from: NaiveDate, date_to: NaiveDate) -> AppResult<Self> {
        if date_from >= date_to {
            return Err(AppError::ValidationError(format!(
                "date_from ({date_from}) must be before date_to ({date_to})"
            )));
        }
        Ok(Self { date_from, date_to })
    }

    pub fn parse(date_from: &str, date_to: &str) -> AppResult<Self> {
        Self::new(parse_date("date_from", date_from)?, parse_date("date_to", date_to)?)
    }

    pub fn date_from(&self) -> NaiveDate {
        self.date_from
    }

    pub fn date_to(&self) -> NaiveDate {
        self.date_to
    }

    pub fn overlaps(&self, other: &BookingPeriod) -> bool {
        !(other.date_to <= self.date_from || other.date_from >= self.date_to)
    }

    /// A period has started once the UTC calendar day reaches `date_from`.
    pub fn has_started(&self, now: DateTime<Utc>) -> bool {
        now.date_naive() >= self.date_from
    }
}

fn parse_date(field: &str, value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|e| {
        AppError::ValidationError(format!(
            "{field} must be a calendar date in YYYY-MM-DD format ({value}): {e}"
        ))
    })
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use chrono::TimeZone;

    use super::*;

    fn period(from: &str, to: &str) -> BookingPeriod {
        BookingPeriod::parse(from, to).unwrap()
    }

    #[test]
    fn transition_table_matches_lifecycle() {
        use BookingAction::*;
        use BookingStatus::*;

        assert_eq!(Approve.next_status(Pending), Some(Approved));
        assert_eq!(Reject.next_status(Pending), Some(Rejected));
        assert_eq!(Cancel.next_status(Pending), Some(Cancelled));
        assert_eq!(Cancel.next_status(Approved), Some(Cancelled));

        for action in [Approve, Reject] {
            for from in [Approved, Rejected, Cancelled] {
                assert_eq!(action.next_status(from), None, "{action} from {from}");
            }
        }
        assert_eq!(Cancel.next_status(Rejected), None);
        assert_eq!(Cancel.next_status(Cancelled), None);
    }

    #[test]
    fn terminal_statuses_have_no_outgoing_transitions() {
        for status in [BookingStatus::Rejected, BookingStatus::Cancelled] {
            assert!(status.is_terminal());
            for action in [
                BookingAction::Approve,
                BookingAction::Reject,
                BookingAction::Cancel,
            ] {
                assert!(action.next_status(status).is_none());
            }
        }
        assert!(!BookingStatus::Pending.is_terminal());
        assert!(!BookingStatus::Approved.is_terminal());
    }

    #[test]
    fn actions_are_gated_by_role() {
        assert_eq!(BookingAction::Approve.actor_role(), Role::Owner);
        assert_eq!(BookingAction::Reject.actor_role(), Role::Owner);
        assert_eq!(BookingAction::Cancel.actor_role(), Role::Tenant);
    }

    #[test]
    fn status_round_trips_through_its_text_form() {
        assert_eq!(BookingStatus::Cancelled.as_ref(), "cancelled");
        assert_eq!(
            BookingStatus::from_str("approved").ok(),
            Some(BookingStatus::Approved)
        );
        assert!(BookingStatus::from_str("deleted").is_err());
    }

    #[test]
    fn period_requires_from_before_to() {
        assert!(BookingPeriod::parse("2025-01-01", "2025-01-10").is_ok());
        assert!(matches!(
            BookingPeriod::parse("2025-01-10", "2025-01-10"),
            Err(AppError::ValidationError(_))
        ));
        assert!(matches!(
            BookingPeriod::parse("2025-01-10", "2025-01-01"),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn period_rejects_malformed_dates() {
        for (from, to) in [
            ("2025-13-01", "2025-12-01"),
            ("01/01/2025", "2025-01-10"),
            ("2025-01-01", ""),
        ] {
            assert!(matches!(
                BookingPeriod::parse(from, to),
                Err(AppError::ValidationError(_))
            ));
        }
    }

    #[test]
    fn overlap_is_half_open() {
        let base = period("2025-01-05", "2025-01-10");

        assert!(base.overlaps(&period("2025-01-01", "2025-01-06")));
        assert!(base.overlaps(&period("2025-01-09", "2025-01-20")));
        assert!(base.overlaps(&period("2025-01-06", "2025-01-07")));
        assert!(base.overlaps(&period("2025-01-01", "2025-01-31")));

        // back-to-back stays are allowed
        assert!(!base.overlaps(&period("2025-01-01", "2025-01-05")));
        assert!(!base.overlaps(&period("2025-01-10", "2025-01-12")));
    }

    #[test]
    fn period_starts_at_midnight_utc() {
        let period = period("2025-01-05", "2025-01-10");
        let eve = Utc.with_ymd_and_hms(2025, 1, 4, 23, 59, 59).unwrap();
        let start = Utc.with_ymd_and_hms(2025, 1, 5, 0, 0, 0).unwrap();

        assert!(!period.has_started(eve));
        assert!(period.has_started(start));
    }
}
