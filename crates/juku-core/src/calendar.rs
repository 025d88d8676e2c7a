//! Campaign calendar: year, month, and elapsed-month counter.
//!
//! The calendar is the single source of temporal state for a campaign.
//! Months run 1 through 12; advancing from December wraps to January of
//! the next year. Campaign years start in April, so year 1 month 4 is the
//! default opening date and year 6 month 3 closes the campaign.

/// Errors that can occur during calendar operations.
#[derive(Debug, thiserror::Error)]
pub enum CalendarError {
    /// A month outside 1..=12 was supplied.
    #[error("invalid month {month}: expected 1..=12")]
    InvalidMonth {
        /// The rejected month.
        month: u32,
    },

    /// A counter would overflow.
    #[error("calendar overflow: {counter}")]
    Overflow {
        /// Which counter overflowed.
        counter: &'static str,
    },
}

/// A (year, month) pair. Orders chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate {
    /// Campaign year, 1-based.
    pub year: u32,
    /// Calendar month, 1-12.
    pub month: u32,
}

impl CalendarDate {
    /// Build a date, validating the month.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidMonth`] if `month` is not in 1..=12.
    pub const fn new(year: u32, month: u32) -> Result<Self, CalendarError> {
        if month < 1 || month > 12 {
            return Err(CalendarError::InvalidMonth { month });
        }
        Ok(Self { year, month })
    }
}

/// The campaign calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CampaignCalendar {
    year: u32,
    month: u32,
    elapsed_months: u32,
}

impl CampaignCalendar {
    /// Start a calendar at `start` with no months elapsed.
    pub const fn new(start: CalendarDate) -> Self {
        Self {
            year: start.year,
            month: start.month,
            elapsed_months: 0,
        }
    }

    /// Restore a calendar from persisted parts.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidMonth`] if `month` is not in 1..=12.
    pub const fn from_parts(
        year: u32,
        month: u32,
        elapsed_months: u32,
    ) -> Result<Self, CalendarError> {
        match CalendarDate::new(year, month) {
            Ok(date) => Ok(Self {
                year: date.year,
                month: date.month,
                elapsed_months,
            }),
            Err(err) => Err(err),
        }
    }

    /// Advance by one month. Returns the date that was just left behind.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::Overflow`] if the year or elapsed counter
    /// would overflow. The calendar is unchanged on error.
    pub fn advance(&mut self) -> Result<CalendarDate, CalendarError> {
        let processed = self.date();
        let elapsed_months = self
            .elapsed_months
            .checked_add(1)
            .ok_or(CalendarError::Overflow {
                counter: "elapsed months",
            })?;
        let (year, month) = if self.month >= 12 {
            let year = self
                .year
                .checked_add(1)
                .ok_or(CalendarError::Overflow { counter: "year" })?;
            (year, 1)
        } else {
            (self.year, self.month.saturating_add(1))
        };

        self.year = year;
        self.month = month;
        self.elapsed_months = elapsed_months;
        Ok(processed)
    }

    /// Current campaign year.
    pub const fn year(&self) -> u32 {
        self.year
    }

    /// Current calendar month.
    pub const fn month(&self) -> u32 {
        self.month
    }

    /// Months advanced since the campaign started.
    pub const fn elapsed_months(&self) -> u32 {
        self.elapsed_months
    }

    /// Current date.
    pub const fn date(&self) -> CalendarDate {
        CalendarDate {
            year: self.year,
            month: self.month,
        }
    }
}
