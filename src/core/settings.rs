//! Manual income settings holder.
//!
//! The two manually entered income figures live in process memory and
//! write through to the injected settings store on every change. A
//! storage failure is logged and otherwise ignored: the in-memory value
//! stays correct for the rest of the process lifetime, and the next
//! successful write catches persistence up.

use crate::gateway::SettingsStore;
use crate::models::IncomeSettings;
use std::sync::Arc;
use tracing::warn;

/// Storage key for the active (salary-like) income figure.
pub const ACTIVE_INCOME_KEY: &str = "active_income";
/// Storage key for the passive income figure.
pub const PASSIVE_INCOME_KEY: &str = "passive_income";

/// Process-local holder for the manual income figures.
pub struct IncomeSettingsHolder {
    settings: IncomeSettings,
    store: Arc<dyn SettingsStore>,
}

fn read_figure(store: &dyn SettingsStore, key: &str) -> f64 {
    // Missing or unparsable values default to zero, never an error.
    store
        .read(key)
        .and_then(|raw| raw.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

impl IncomeSettingsHolder {
    /// Reads both figures from the store once, at session start.
    #[must_use]
    pub fn load(store: Arc<dyn SettingsStore>) -> Self {
        let settings = IncomeSettings {
            active_income: read_figure(store.as_ref(), ACTIVE_INCOME_KEY),
            passive_income: read_figure(store.as_ref(), PASSIVE_INCOME_KEY),
        };
        Self { settings, store }
    }

    /// Current figures.
    #[must_use]
    pub fn get(&self) -> IncomeSettings {
        self.settings
    }

    /// Sets the active income and writes it through.
    pub fn set_active(&mut self, value: f64) {
        self.settings.active_income = value;
        self.write_through(ACTIVE_INCOME_KEY, value);
    }

    /// Sets the passive income and writes it through.
    pub fn set_passive(&mut self, value: f64) {
        self.settings.passive_income = value;
        self.write_through(PASSIVE_INCOME_KEY, value);
    }

    fn write_through(&self, key: &str, value: f64) {
        if let Err(e) = self.store.write(key, &value.to_string()) {
            warn!("Failed to persist {}: {}", key, e);
        }
    }
}
