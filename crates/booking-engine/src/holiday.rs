//! Holiday blackout dates.
//!
//! A `HolidaySet` is passed into every slot computation rather than living in
//! a module-level constant, so deployments and tests can supply their own.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::time::parse_date;

/// Calendar dates on which no slots are ever produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HolidaySet {
    dates: BTreeSet<NaiveDate>,
}

impl HolidaySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a list of ISO `YYYY-MM-DD` dates.
    ///
    /// # Errors
    /// Returns `BookingError::InvalidDate` for the first malformed entry.
    pub fn parse_all<S: AsRef<str>>(dates: &[S]) -> Result<Self> {
        dates.iter().map(|d| parse_date(d.as_ref())).collect()
    }

    /// Returns `true` if the date was not already present.
    pub fn insert(&mut self, date: NaiveDate) -> bool {
        self.dates.insert(date)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Dates in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.dates.iter().copied()
    }
}

impl FromIterator<NaiveDate> for HolidaySet {
    fn from_iter<I: IntoIterator<Item = NaiveDate>>(iter: I) -> Self {
        Self {
            dates: iter.into_iter().collect(),
        }
    }
}
