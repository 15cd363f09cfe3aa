//! Dashboard configuration and the fixed chart theme handed to the charting surface.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, VizError};

/// Epoch counts offered by the epoch selector.
pub const DEFAULT_EPOCH_CHOICES: [u32; 5] = [5, 10, 20, 50, 100];

/// Visual theme for chart rendering. Colours are CSS colour strings.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ChartTheme {
    pub grid_color: String,
    pub axis_border_color: String,
    pub tick_color: String,
    pub legend_color: String,
    pub tooltip_background: String,
    pub tooltip_title_color: String,
    pub tooltip_body_color: String,
    pub tooltip_border_color: String,
    pub tooltip_border_width: f64,
    pub animation_ms: u32,
    pub easing: String,
    /// Marker radius for series that do not override it.
    pub point_radius: f64,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            grid_color: "rgba(75, 85, 99, 0.2)".to_string(),
            axis_border_color: "rgba(99, 102, 241, 0.2)".to_string(),
            tick_color: "#9CA3AF".to_string(),
            legend_color: "#D1D5DB".to_string(),
            tooltip_background: "rgba(17, 24, 39, 0.9)".to_string(),
            tooltip_title_color: "#F3F4F6".to_string(),
            tooltip_body_color: "#D1D5DB".to_string(),
            tooltip_border_color: "rgba(99, 102, 241, 0.3)".to_string(),
            tooltip_border_width: 1.0,
            animation_ms: 750,
            easing: "easeInOutQuart".to_string(),
            point_radius: 3.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DashboardConfig {
    /// Seed for the session's random source. `None` derives one from the clock.
    pub seed: Option<u64>,
    /// Allowed values for the epoch selector, ascending.
    pub epoch_choices: Vec<u32>,
    /// Decimal places in metric table cells.
    pub metric_decimals: usize,
    pub theme: ChartTheme,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            seed: None,
            epoch_choices: DEFAULT_EPOCH_CHOICES.to_vec(),
            metric_decimals: 4,
            theme: ChartTheme::default(),
        }
    }
}

impl DashboardConfig {
    pub const MAX_DECIMALS: usize = 9;

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_epoch_choices(mut self, choices: &[u32]) -> Self {
        self.epoch_choices = choices.to_vec();
        self
    }

    pub fn with_metric_decimals(mut self, decimals: usize) -> Self {
        self.metric_decimals = decimals;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.epoch_choices.is_empty() {
            return Err(VizError::InvalidConfig("epoch_choices must not be empty"));
        }
        if self.epoch_choices.contains(&0) {
            return Err(VizError::InvalidConfig("epoch_choices must be >= 1"));
        }
        if self.epoch_choices.windows(2).any(|w| w[0] >= w[1]) {
            return Err(VizError::InvalidConfig(
                "epoch_choices must be strictly ascending",
            ));
        }
        if self.metric_decimals > Self::MAX_DECIMALS {
            return Err(VizError::InvalidConfig("metric_decimals must be <= 9"));
        }
        if self.theme.animation_ms > 60_000 {
            return Err(VizError::InvalidConfig("theme.animation_ms must be <= 60000"));
        }
        Ok(())
    }

    pub fn allows_epochs(&self, epochs: u32) -> bool {
        self.epoch_choices.contains(&epochs)
    }

    /// Parse and validate a JSON config. Missing fields fall back to defaults.
    #[cfg(feature = "serde")]
    pub fn from_json_str(s: &str) -> Result<Self> {
        let cfg: DashboardConfig = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    #[cfg(feature = "serde")]
    pub fn load(path: &std::path::Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}
