//! Services and their weekly availability windows.
//!
//! Answers the "availability for a date" query: look up the service, pick the
//! window for the date's weekday, and hand both to [`compute_slots`].

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDate, Weekday};

use crate::error::{BookingError, Result};
use crate::holiday::HolidaySet;
use crate::model::{AvailabilityWindow, BookingInterval, Service};
use crate::slots::compute_slots;
use crate::time::ClockTime;

/// Registered services plus at most one availability window per service per weekday.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    services: BTreeMap<u64, Service>,
    windows: HashMap<(u64, Weekday), AvailabilityWindow>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    /// Returns `BookingError::DuplicateService` if the id is already registered.
    pub fn add_service(&mut self, service: Service) -> Result<()> {
        if self.services.contains_key(&service.id()) {
            return Err(BookingError::DuplicateService(service.id()));
        }
        self.services.insert(service.id(), service);
        Ok(())
    }

    /// Attach a window to a registered service on the window's weekday.
    ///
    /// # Errors
    /// Returns `BookingError::UnknownService` for an unregistered id and
    /// `BookingError::DuplicateWindow` if that weekday already has a window.
    pub fn add_window(&mut self, service_id: u64, window: AvailabilityWindow) -> Result<()> {
        if !self.services.contains_key(&service_id) {
            return Err(BookingError::UnknownService(service_id));
        }
        let key = (service_id, window.weekday());
        if self.windows.contains_key(&key) {
            return Err(BookingError::DuplicateWindow {
                service_id,
                weekday: window.weekday(),
            });
        }
        self.windows.insert(key, window);
        Ok(())
    }

    /// # Errors
    /// Returns `BookingError::UnknownService` if no service has this id.
    pub fn service(&self, id: u64) -> Result<&Service> {
        self.services
            .get(&id)
            .ok_or(BookingError::UnknownService(id))
    }

    /// All services, sorted by id.
    pub fn services(&self) -> impl Iterator<Item = &Service> {
        self.services.values()
    }

    /// The window for the weekday `date` falls on, if the service opens that day.
    ///
    /// # Errors
    /// Returns `BookingError::UnknownService` if no service has this id.
    pub fn window_for(&self, service_id: u64, date: NaiveDate) -> Result<Option<&AvailabilityWindow>> {
        self.service(service_id)?;
        Ok(self.windows.get(&(service_id, date.weekday())))
    }

    /// Open slot start times for a service on a date.
    ///
    /// `bookings` must already be restricted to this service and date.
    ///
    /// # Errors
    /// Returns `BookingError::UnknownService` if no service has this id. A
    /// holiday or a closed weekday is not an error; it yields an empty list.
    pub fn available_slots(
        &self,
        service_id: u64,
        date: NaiveDate,
        bookings: &[BookingInterval],
        holidays: &HolidaySet,
    ) -> Result<Vec<ClockTime>> {
        let service = self.service(service_id)?;
        let window = self.window_for(service_id, date)?;
        Ok(compute_slots(service, window, bookings, date, holidays))
    }
}
