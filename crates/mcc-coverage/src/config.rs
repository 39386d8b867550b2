//! MCC Analysis Configuration
//!
//! Target selection, the decision threshold for synthesis, the failure
//! policy of the suite fitness and logging options. Loadable from YAML:
//!
//! ```yaml
//! min_decisions: 2
//! target_class: com.example.Triangle
//! method_filter:
//!   prefix: classify
//!   exclude: ["<clinit>()V"]
//! cap_on_execution_failure: true
//! log_format: json
//! log_filter: mcc_coverage=debug
//! ```

use crate::result::{MccError, MccResult};
use serde::{Deserialize, Serialize};

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

/// Which methods of the target class get goals
///
/// Exclusions win; an explicit include list wins over the prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MethodFilter {
    /// Exact method names to analyze
    pub include: Vec<String>,
    /// Method-name prefix to analyze
    pub prefix: Option<String>,
    /// Exact method names to skip
    pub exclude: Vec<String>,
}

impl MethodFilter {
    /// Whether `method_name` passes the filter
    #[must_use]
    pub fn matches(&self, method_name: &str) -> bool {
        if self.exclude.iter().any(|m| m == method_name) {
            return false;
        }
        if !self.include.is_empty() {
            return self.include.iter().any(|m| m == method_name);
        }
        self.prefix
            .as_deref()
            .map_or(true, |prefix| method_name.starts_with(prefix))
    }
}

/// Configuration of an analysis session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MccConfig {
    /// Fewest decisions a method needs before obligations are synthesized
    pub min_decisions: usize,
    /// Only produce goals for this class (all classes when unset)
    pub target_class: Option<String>,
    /// Method selection
    pub method_filter: MethodFilter,
    /// Cap suite fitness at its worst value when any run fails
    pub cap_on_execution_failure: bool,
    /// Log output format
    pub log_format: LogFormat,
    /// Default `EnvFilter` directive when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for MccConfig {
    fn default() -> Self {
        Self {
            min_decisions: 2,
            target_class: None,
            method_filter: MethodFilter::default(),
            cap_on_execution_failure: true,
            log_format: LogFormat::Pretty,
            log_filter: "info".to_string(),
        }
    }
}

impl MccConfig {
    /// Create a builder for the configuration
    #[must_use]
    pub fn builder() -> MccConfigBuilder {
        MccConfigBuilder::default()
    }

    /// Parse and validate a YAML document
    pub fn from_yaml_str(yaml: &str) -> MccResult<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration for values the pipeline can't honour
    pub fn validate(&self) -> MccResult<()> {
        if self.min_decisions == 0 {
            return Err(MccError::config("min_decisions must be at least 1"));
        }
        if self.log_filter.trim().is_empty() {
            return Err(MccError::config("log_filter must not be empty"));
        }
        Ok(())
    }

    /// Whether goals of `class_name` are wanted
    #[must_use]
    pub fn targets_class(&self, class_name: &str) -> bool {
        self.target_class
            .as_deref()
            .map_or(true, |target| target == class_name)
    }
}

/// Builder for [`MccConfig`]
#[derive(Debug, Default)]
pub struct MccConfigBuilder {
    config: MccConfig,
}

impl MccConfigBuilder {
    /// Set the decision threshold
    #[must_use]
    pub fn min_decisions(mut self, min: usize) -> Self {
        self.config.min_decisions = min;
        self
    }

    /// Restrict goals to one class
    #[must_use]
    pub fn target_class(mut self, class_name: impl Into<String>) -> Self {
        self.config.target_class = Some(class_name.into());
        self
    }

    /// Set the method filter
    #[must_use]
    pub fn method_filter(mut self, filter: MethodFilter) -> Self {
        self.config.method_filter = filter;
        self
    }

    /// Enable or disable the failure cap
    #[must_use]
    pub fn cap_on_execution_failure(mut self, enabled: bool) -> Self {
        self.config.cap_on_execution_failure = enabled;
        self
    }

    /// Set the log format
    #[must_use]
    pub fn log_format(mut self, format: LogFormat) -> Self {
        self.config.log_format = format;
        self
    }

    /// Set the default log filter
    #[must_use]
    pub fn log_filter(mut self, filter: impl Into<String>) -> Self {
        self.config.log_filter = filter.into();
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> MccResult<MccConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
