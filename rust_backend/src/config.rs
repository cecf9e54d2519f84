//! Report configuration file support.
//!
//! This module reads the label alias maps and the period ordering policy
//! from a TOML (or JSON) configuration file. A missing file is not an
//! error: the engine then runs with empty alias maps, which makes placement
//! normalization the identity and leaves periods to the pattern rules.
//!
//! ```toml
//! period_order = "quarter"
//!
//! [periods]
//! Q1 = ["1st Quarter", "First Quarter"]
//! OT = ["Overtime"]
//!
//! [placements]
//! LeftBoard = ["Left Board", "LB"]
//! ```

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ReportError, ReportResult};
use crate::normalization::ordering::PeriodOrderPolicy;

/// Default configuration file name searched by [`ReportConfig::load_default`].
pub const DEFAULT_CONFIG_FILE: &str = "exposure_report.toml";

/// One canonical label and the raw spellings that map onto it.
#[derive(Debug, Clone, PartialEq)]
pub struct AliasEntry {
    pub canonical: String,
    pub aliases: Vec<String>,
    lowered: Vec<String>,
}

impl AliasEntry {
    pub fn new(canonical: impl Into<String>, aliases: Vec<String>) -> Self {
        let canonical = canonical.into();
        let lowered = std::iter::once(&canonical)
            .chain(aliases.iter())
            .map(|s| s.to_lowercase())
            .collect();
        Self {
            canonical,
            aliases,
            lowered,
        }
    }

    fn matches(&self, lowered_input: &str) -> bool {
        self.lowered.iter().any(|candidate| candidate == lowered_input)
    }
}

/// Ordered canonical-name → aliases mapping.
///
/// Entries keep the order in which they appear in the configuration file
/// because lookups stop at the first match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AliasMap {
    entries: Vec<AliasEntry>,
}

impl AliasMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a map from `(canonical, aliases)` pairs, keeping their order.
    pub fn from_entries<I, C, A>(entries: I) -> Self
    where
        I: IntoIterator<Item = (C, A)>,
        C: Into<String>,
        A: IntoIterator,
        A::Item: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(canonical, aliases)| {
                    AliasEntry::new(canonical, aliases.into_iter().map(Into::into).collect())
                })
                .collect(),
        }
    }

    /// Resolve a raw label to its canonical name.
    ///
    /// The input is trimmed and compared case-insensitively against each
    /// canonical name and its aliases. The canonical name is returned
    /// exactly as configured.
    pub fn resolve(&self, raw: &str) -> Option<&str> {
        let needle = raw.trim().to_lowercase();
        self.entries
            .iter()
            .find(|entry| entry.matches(&needle))
            .map(|entry| entry.canonical.as_str())
    }

    pub fn entries(&self) -> &[AliasEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl<'de> Deserialize<'de> for AliasMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct AliasMapVisitor;

        impl<'de> Visitor<'de> for AliasMapVisitor {
            type Value = AliasMap;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a table of canonical names to alias lists")
            }

            fn visit_map<M>(self, mut access: M) -> Result<AliasMap, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut entries = Vec::new();
                while let Some((canonical, aliases)) =
                    access.next_entry::<String, Option<OneOrMany>>()?
                {
                    let aliases = match aliases {
                        None => Vec::new(),
                        Some(OneOrMany::One(alias)) => vec![alias],
                        Some(OneOrMany::Many(list)) => list,
                    };
                    entries.push(AliasEntry::new(canonical, aliases));
                }
                Ok(AliasMap { entries })
            }
        }

        deserializer.deserialize_map(AliasMapVisitor)
    }
}

impl Serialize for AliasMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.canonical, &entry.aliases)?;
        }
        map.end()
    }
}

/// Alias maps consumed by the label normalizer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelConfig {
    pub periods: AliasMap,
    pub placements: AliasMap,
}

/// Complete engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "ConfigFile", into = "ConfigFile")]
pub struct ReportConfig {
    pub period_order: PeriodOrderPolicy,
    pub labels: LabelConfig,
}

/// On-disk layout. Section names also accept the capitalized `Periods` and
/// `Placements` keys, in TOML as well as JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    period_order: PeriodOrderPolicy,
    #[serde(default, alias = "Periods")]
    periods: AliasMap,
    #[serde(default, alias = "Placements")]
    placements: AliasMap,
}

impl From<ConfigFile> for ReportConfig {
    fn from(file: ConfigFile) -> Self {
        Self {
            period_order: file.period_order,
            labels: LabelConfig {
                periods: file.periods,
                placements: file.placements,
            },
        }
    }
}

impl From<ReportConfig> for ConfigFile {
    fn from(config: ReportConfig) -> Self {
        Self {
            period_order: config.period_order,
            periods: config.labels.periods,
            placements: config.labels.placements,
        }
    }
}

impl ReportConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> ReportResult<Self> {
        toml::from_str(content).map_err(|e| {
            ReportError::Configuration(format!("Failed to parse config file: {}", e))
        })
    }

    /// Parse configuration from JSON text.
    pub fn from_json_str(content: &str) -> ReportResult<Self> {
        serde_json::from_str(content).map_err(|e| {
            ReportError::Configuration(format!("Failed to parse config file: {}", e))
        })
    }

    /// Load configuration from a file.
    ///
    /// `.json` files are read as JSON, everything else as TOML.
    ///
    /// # Returns
    /// * `Ok(ReportConfig)` if successful
    /// * `Err(ReportError::Configuration)` if the file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> ReportResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ReportError::Configuration(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let config = if is_json {
            Self::from_json_str(&content)?
        } else {
            Self::from_toml_str(&content)?
        };

        log::info!(
            "Loaded report config from {} ({} period aliases, {} placement aliases, {:?} ordering)",
            path.display(),
            config.labels.periods.len(),
            config.labels.placements.len(),
            config.period_order
        );
        Ok(config)
    }

    /// Load configuration from the default location.
    ///
    /// Searches for `exposure_report.toml` in:
    /// 1. Current directory
    /// 2. Parent directory
    ///
    /// Falls back to [`ReportConfig::default`] when no file is found.
    pub fn load_default() -> ReportResult<Self> {
        match Self::find_config_file() {
            Some(path) => Self::from_file(path),
            None => {
                log::info!(
                    "No {} found, using identity label normalization",
                    DEFAULT_CONFIG_FILE
                );
                Ok(Self::default())
            }
        }
    }

    fn find_config_file() -> Option<PathBuf> {
        let candidates = [
            PathBuf::from(DEFAULT_CONFIG_FILE),
            PathBuf::from("..").join(DEFAULT_CONFIG_FILE),
        ];
        candidates.into_iter().find(|path| path.is_file())
    }
}
