//! TOML catalog configuration: services, weekly availability and holidays.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use booking_engine::{AvailabilityWindow, Catalog, HolidaySet, Service};
use chrono::Weekday;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogConfig {
    /// ISO dates on which no slots are offered.
    #[serde(default)]
    pub holidays: Vec<String>,
    #[serde(default)]
    pub services: Vec<ServiceConfig>,
    #[serde(default)]
    pub availability: Vec<AvailabilityConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Minutes.
    pub duration: u32,
    /// Minutes.
    #[serde(default)]
    pub buffer_time: u32,
    #[serde(default)]
    pub price: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AvailabilityConfig {
    pub service_id: u64,
    /// Full or abbreviated English weekday name, e.g. "Sunday" or "sun".
    pub day_of_week: String,
    pub start_time: String,
    pub end_time: String,
}

impl CatalogConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("Invalid config file: {}", path.display()))
    }

    pub fn parse(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Validate every entry and build the engine's catalog and holiday set.
    pub fn build(&self) -> Result<(Catalog, HolidaySet)> {
        let holidays = HolidaySet::parse_all(&self.holidays).context("Invalid holiday list")?;

        let mut catalog = Catalog::new();
        for s in &self.services {
            let mut service = Service::new(s.id, &s.name, s.duration, s.buffer_time)
                .with_context(|| format!("Invalid service {}", s.id))?;
            if let Some(description) = &s.description {
                service = service.with_description(description);
            }
            if let Some(price) = s.price {
                service = service.with_price(price);
            }
            catalog.add_service(service)?;
        }

        for a in &self.availability {
            let weekday: Weekday = a
                .day_of_week
                .parse()
                .map_err(|_| anyhow!("Unknown day_of_week: '{}'", a.day_of_week))?;
            let window = AvailabilityWindow::parse(weekday, &a.start_time, &a.end_time)
                .with_context(|| {
                    format!("Invalid availability for service {} on {}", a.service_id, weekday)
                })?;
            catalog.add_window(a.service_id, window)?;
        }

        tracing::debug!(
            services = self.services.len(),
            windows = self.availability.len(),
            holidays = holidays.len(),
            "catalog loaded"
        );

        Ok((catalog, holidays))
    }
}
