//! Remembered hourly rates per role name

use std::collections::BTreeMap;

/// Last hourly rate entered for each role name.
///
/// Keys are case-sensitive; suggestions match prefixes case-insensitively.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoleRateMemory {
    rates: BTreeMap<String, f64>,
}

impl RoleRateMemory {
    pub fn from_map(rates: BTreeMap<String, f64>) -> Self {
        Self { rates }
    }

    pub fn into_map(self) -> BTreeMap<String, f64> {
        self.rates
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Record the latest rate for a role
    pub fn remember(&mut self, role_name: &str, rate: f64) {
        let role = role_name.trim();
        if role.is_empty() {
            return;
        }
        self.rates.insert(role.to_string(), rate);
    }

    /// Exact lookup
    pub fn get(&self, role_name: &str) -> Option<f64> {
        self.rates.get(role_name.trim()).copied()
    }

    /// Shortest previously seen role name starting with `prefix`
    /// (case-insensitive). Ties go to the alphabetically first name.
    pub fn suggest(&self, prefix: &str) -> Option<(&str, f64)> {
        let prefix = prefix.trim().to_lowercase();
        if prefix.is_empty() {
            return None;
        }

        self.rates
            .iter()
            .filter(|(role, _)| role.to_lowercase().starts_with(&prefix))
            .min_by_key(|(role, _)| role.chars().count())
            .map(|(role, rate)| (role.as_str(), *rate))
    }

    /// Exact match first, then the prefix suggestion
    pub fn rate_for(&self, role_name: &str) -> Option<f64> {
        self.get(role_name)
            .or_else(|| self.suggest(role_name).map(|(_, rate)| rate))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.rates.iter().map(|(role, rate)| (role.as_str(), *rate))
    }
}
