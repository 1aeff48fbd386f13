//! Application configuration, loaded from YAML.

use crate::error::{AppError, AppResult};
use rc_cycle::{Correlation, SizingOptions, SolverConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Refrigerants resolved from property tables unless configured otherwise.
pub const DEFAULT_TABLE_REFRIGERANTS: [&str; 5] =
    ["R-454B", "R-417A", "R-454C", "R-450A", "R-452A"];

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Property-table dataset (YAML or JSON)
    pub tables_path: Option<PathBuf>,
    /// Capillary constants dataset (YAML or JSON)
    pub constants_path: Option<PathBuf>,
    /// Ids resolved from tables rather than the property library
    pub table_refrigerants: Vec<String>,
    pub dome_samples: usize,
    pub energy_balance_derating: f64,
    pub sizing: SizingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let solver = SolverConfig::default();
        Self {
            tables_path: None,
            constants_path: None,
            table_refrigerants: DEFAULT_TABLE_REFRIGERANTS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            dome_samples: solver.dome_samples,
            energy_balance_derating: solver.energy_balance_derating,
            sizing: SizingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CorrelationKind {
    #[default]
    OrificeFlow,
    Linearized,
}

/// Capillary sizing section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SizingConfig {
    pub correlation: CorrelationKind,
    /// Correction factor for the linearized law
    pub linear_correction: f64,
    pub plausible_max_m: f64,
    pub target_length_m: Option<f64>,
    pub similarity_rescale: bool,
}

impl Default for SizingConfig {
    fn default() -> Self {
        let options = SizingOptions::default();
        Self {
            correlation: CorrelationKind::OrificeFlow,
            linear_correction: 1.0,
            plausible_max_m: options.plausible_max_m,
            target_length_m: options.target_length_m,
            similarity_rescale: options.similarity_rescale,
        }
    }
}

impl SizingConfig {
    pub fn options(&self) -> SizingOptions {
        let correlation = match self.correlation {
            CorrelationKind::OrificeFlow => Correlation::OrificeFlow,
            CorrelationKind::Linearized => Correlation::Linearized {
                correction: self.linear_correction,
            },
        };
        SizingOptions {
            correlation,
            plausible_max_m: self.plausible_max_m,
            target_length_m: self.target_length_m,
            similarity_rescale: self.similarity_rescale,
        }
    }
}

impl AppConfig {
    pub fn solver(&self) -> SolverConfig {
        SolverConfig {
            dome_samples: self.dome_samples,
            energy_balance_derating: self.energy_balance_derating,
        }
    }

    /// Check values that would otherwise only fail on the first request.
    pub fn validate(&self) -> AppResult<()> {
        self.solver()
            .validate()
            .map_err(|e| AppError::Config(e.to_string()))?;
        self.sizing
            .options()
            .validate()
            .map_err(|e| AppError::Config(e.to_string()))?;
        Ok(())
    }

    /// Parse a YAML document; missing keys take their defaults.
    pub fn from_yaml(content: &str) -> AppResult<Self> {
        let config: AppConfig = serde_yaml::from_str(content)
            .map_err(|e| AppError::Config(format!("Failed to parse config YAML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }
}

/// Load configuration from a YAML file.
///
/// Relative dataset paths are resolved against the config file's directory.
pub fn load_config(path: &Path) -> AppResult<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| AppError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut config = AppConfig::from_yaml(&content)?;

    if let Some(base) = path.parent() {
        for p in [&mut config.tables_path, &mut config.constants_path]
            .into_iter()
            .flatten()
        {
            if p.is_relative() {
                let joined = base.join(&*p);
                *p = joined;
            }
        }
    }
    Ok(config)
}
