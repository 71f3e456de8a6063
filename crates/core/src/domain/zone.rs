use serde::{Deserialize, Serialize};

/// A selectable timezone as served by `/api/timezones`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimezoneEntry {
    /// IANA identifier, e.g. `Europe/London`
    pub zone: String,
    /// Human readable name
    pub name: String,
    /// ISO 3166 alpha-2 country code
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub flag: String,
}

impl TimezoneEntry {
    pub fn new(zone: &str, name: &str, code: &str) -> Self {
        Self {
            zone: zone.to_string(),
            name: name.to_string(),
            code: code.to_string(),
            flag: flag_glyph(code),
        }
    }

    /// Flag to show next to the name, derived from the country code when
    /// the server sent none.
    pub fn display_flag(&self) -> String {
        if self.flag.trim().is_empty() {
            flag_glyph(&self.code)
        } else {
            self.flag.clone()
        }
    }

    /// Case-insensitive match against zone id, name and country code
    pub fn matches(&self, filter: &str) -> bool {
        let filter = filter.trim().to_lowercase();
        if filter.is_empty() {
            return true;
        }
        self.zone.to_lowercase().contains(&filter)
            || self.name.to_lowercase().contains(&filter)
            || self.code.to_lowercase() == filter
    }
}

impl std::fmt::Display for TimezoneEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.zone)
    }
}

/// Build a flag emoji from a two-letter country code using regional
/// indicator symbols. Anything else yields an empty string.
pub fn flag_glyph(code: &str) -> String {
    let code = code.trim();
    if code.len() != 2 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return String::new();
    }

    code.to_ascii_uppercase()
        .chars()
        .filter_map(|c| char::from_u32(0x1F1E6 + (c as u32 - 'A' as u32)))
        .collect()
}

/// Built-in list used whenever the server cannot provide one
pub fn fallback_zones() -> Vec<TimezoneEntry> {
    vec![
        TimezoneEntry::new("America/New_York", "New York", "US"),
        TimezoneEntry::new("Europe/London", "London", "GB"),
        TimezoneEntry::new("Europe/Paris", "Paris", "FR"),
        TimezoneEntry::new("Asia/Tokyo", "Tokyo", "JP"),
        TimezoneEntry::new("Australia/Sydney", "Sydney", "AU"),
    ]
}

/// Where the zone list came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogSource {
    Server,
    Fallback,
}

/// The list of zones offered in the picker
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneCatalog {
    pub entries: Vec<TimezoneEntry>,
    pub source: CatalogSource,
}

impl ZoneCatalog {
    pub fn fallback() -> Self {
        Self {
            entries: fallback_zones(),
            source: CatalogSource::Fallback,
        }
    }

    /// Accept a server list, dropping entries without a zone id.
    /// An empty result falls back to the built-in list.
    pub fn from_server(entries: Vec<TimezoneEntry>) -> Self {
        let entries: Vec<_> = entries
            .into_iter()
            .filter(|entry| !entry.zone.trim().is_empty())
            .collect();

        if entries.is_empty() {
            return Self::fallback();
        }

        Self {
            entries,
            source: CatalogSource::Server,
        }
    }

    pub fn find(&self, zone: &str) -> Option<&TimezoneEntry> {
        self.entries.iter().find(|entry| entry.zone == zone)
    }

    pub fn filtered(&self, filter: &str) -> Vec<&TimezoneEntry> {
        self.entries.iter().filter(|entry| entry.matches(filter)).collect()
    }
}

impl Default for ZoneCatalog {
    fn default() -> Self {
        Self::fallback()
    }
}
