use crate::error::{EditError, Result};
use serde::{Deserialize, Serialize};

/// Settings for an [`EditSession`](crate::EditSession).
///
/// Usually built from a JSON settings string supplied by the host:
///
/// ```
/// use voxedit::EditConfig;
///
/// let config = EditConfig::from_json(r#"{ "max_changes": 5000 }"#).unwrap();
/// assert_eq!(config.max_changes, Some(5000));
/// assert_eq!(config.smoothing.radius, 5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditConfig {
    /// Maximum number of block writes per session. `None` or `0` means no
    /// limit.
    pub max_changes: Option<usize>,
    pub history: HistoryConfig,
    pub smoothing: SmoothingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Oldest batches are evicted once more than this many are kept.
    pub max_batches: usize,
    /// Oldest batches are evicted once the kept batches hold more records
    /// than this. The newest batch is always kept.
    pub max_records: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingConfig {
    pub radius: usize,
    pub sigma: f64,
    pub iterations: u32,
}

impl Default for EditConfig {
    fn default() -> Self {
        Self {
            max_changes: None,
            history: HistoryConfig::default(),
            smoothing: SmoothingConfig::default(),
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_batches: 15,
            max_records: 1_000_000,
        }
    }
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            radius: 5,
            sigma: 1.0,
            iterations: 1,
        }
    }
}

impl EditConfig {
    pub fn from_json(settings: &str) -> Result<Self> {
        let config: EditConfig = serde_json::from_str(settings)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses optional settings, falling back to defaults when absent.
    pub fn from_settings(settings: Option<&str>) -> Result<Self> {
        match settings {
            Some(json) => Self::from_json(json),
            None => Ok(Self::default()),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.history.max_batches == 0 {
            return Err(EditError::Config(
                "history.max_batches must be at least 1".to_string(),
            ));
        }
        if !(self.smoothing.sigma.is_finite() && self.smoothing.sigma > 0.0) {
            return Err(EditError::Config(format!(
                "smoothing.sigma must be positive, got {}",
                self.smoothing.sigma
            )));
        }
        Ok(())
    }

    /// The change limit with `0` folded into "unlimited".
    pub fn effective_max_changes(&self) -> Option<usize> {
        self.max_changes.filter(|&limit| limit > 0)
    }
}
