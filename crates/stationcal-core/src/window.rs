//! The visible seven-day window.
//!
//! The anchor is simply the first visible day. It is not aligned to a
//! week start; navigation moves it by whole weeks with no bounds.

use chrono::{Duration, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::error::{Result, StationCalError};
use crate::models::VisibleDay;
use crate::parse::DayKey;
use crate::tz::{MAX_YEAR, MIN_YEAR, format_display_date, is_supported_date, local_date};

/// Number of days shown at once.
pub const DAYS_PER_WEEK: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekWindow {
    anchor: NaiveDate,
}

impl WeekWindow {
    pub fn new(anchor: NaiveDate) -> Self {
        Self { anchor }
    }

    /// A window anchored on today's date in `tz`.
    pub fn today(tz: Tz) -> Self {
        Self::new(local_date(Utc::now(), tz))
    }

    pub fn current_anchor(&self) -> NaiveDate {
        self.anchor
    }

    pub fn set_anchor(&mut self, anchor: NaiveDate) {
        self.anchor = anchor;
    }

    /// The seven visible days, anchor first.
    pub fn visible_days(&self) -> Vec<VisibleDay> {
        self.dates()
            .map(|date| VisibleDay {
                label: date.format("%a").to_string(),
                key: DayKey::new(date),
            })
            .collect()
    }

    /// Range label, e.g. `Apr 01, 2023 - Apr 07, 2023`.
    pub fn display_range(&self) -> String {
        let last = self.dates().last().unwrap_or(self.anchor);
        format!(
            "{} - {}",
            format_display_date(self.anchor),
            format_display_date(last)
        )
    }

    /// Whether `day` is one of the visible days.
    pub fn contains(&self, day: DayKey) -> bool {
        self.dates().any(|date| date == day.date())
    }

    /// Shift the anchor by `weeks` whole weeks (negative moves back).
    ///
    /// Fails when the visible week would leave years
    /// [`MIN_YEAR`]..=[`MAX_YEAR`], in which case the anchor is left
    /// untouched.
    pub fn advance(&mut self, weeks: i64) -> Result<()> {
        let shifted = weeks
            .checked_mul(DAYS_PER_WEEK)
            .and_then(Duration::try_days)
            .and_then(|delta| self.anchor.checked_add_signed(delta))
            .filter(|anchor| {
                is_supported_date(*anchor)
                    && anchor
                        .checked_add_signed(Duration::days(DAYS_PER_WEEK - 1))
                        .is_some_and(is_supported_date)
            })
            .ok_or_else(|| {
                StationCalError::DateOutOfRange(format!(
                    "cannot move {} by {} weeks (years {}-{})",
                    self.anchor, weeks, MIN_YEAR, MAX_YEAR
                ))
            })?;
        self.anchor = shifted;
        Ok(())
    }

    pub fn previous_week(&mut self) -> Result<()> {
        self.advance(-1)
    }

    pub fn next_week(&mut self) -> Result<()> {
        self.advance(1)
    }

    // Stops early only at the end of the representable calendar.
    fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        (0..DAYS_PER_WEEK)
            .map_while(|offset| self.anchor.checked_add_signed(Duration::days(offset)))
    }
}
