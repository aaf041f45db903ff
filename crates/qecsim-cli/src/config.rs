//! Configuration for the `verify` command.
//!
//! Supports loading configuration from:
//! 1. A YAML file (`--config`)
//! 2. Environment variables (with QECSIM_ prefix)
//! 3. Command-line flags
//!
//! Configuration precedence (highest to lowest):
//! 1. Command-line flags
//! 2. Environment variables
//! 3. Configuration file
//! 4. Default values

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use qecsim_codes::Code;
use qecsim_state::{DensityConfig, StateVector};
use serde::{Deserialize, Serialize};

/// Reference input states for verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputState {
    Zero,
    One,
    Plus,
    Minus,
}

impl InputState {
    pub const ALL: [InputState; 4] = [
        InputState::Zero,
        InputState::One,
        InputState::Plus,
        InputState::Minus,
    ];

    pub fn state(self) -> StateVector {
        let s = std::f64::consts::FRAC_1_SQRT_2;
        let (a, b) = match self {
            InputState::Zero => (1.0, 0.0),
            InputState::One => (0.0, 1.0),
            InputState::Plus => (s, s),
            InputState::Minus => (s, -s),
        };
        StateVector::from_qubit(a.into(), b.into())
    }
}

impl fmt::Display for InputState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            InputState::Zero => "|0>",
            InputState::One => "|1>",
            InputState::Plus => "|+>",
            InputState::Minus => "|->",
        };
        f.write_str(label)
    }
}

impl FromStr for InputState {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "zero" | "0" => Ok(InputState::Zero),
            "one" | "1" => Ok(InputState::One),
            "plus" | "+" => Ok(InputState::Plus),
            "minus" | "-" => Ok(InputState::Minus),
            other => bail!("Unknown input state: '{other}'"),
        }
    }
}

/// Settings for exhaustive single-error verification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifyConfig {
    /// Codes to exercise.
    pub codes: Vec<Code>,

    /// Logical input states.
    pub inputs: Vec<InputState>,

    /// Random single-qubit unitaries per (code, input, qubit), for codes that
    /// correct every single-qubit Pauli.
    pub trials: usize,

    /// RNG seed for the random unitaries.
    pub seed: u64,

    /// Minimum acceptable fidelity.
    pub threshold: f64,

    /// Settings for recovering a pure logical state from its density matrix.
    pub density: DensityConfig,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            codes: vec![Code::BitFlip, Code::Shor, Code::Steane],
            inputs: InputState::ALL.to_vec(),
            trials: 5,
            seed: 42,
            threshold: 1.0 - 1e-6,
            density: DensityConfig::default(),
        }
    }
}

/// Values supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub codes: Vec<Code>,
    pub inputs: Vec<InputState>,
    pub trials: Option<usize>,
    pub seed: Option<u64>,
    pub threshold: Option<f64>,
}

impl VerifyConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        let config: VerifyConfig = serde_yaml_ng::from_str(contents)?;
        Ok(config)
    }

    /// Load configuration with the following precedence:
    /// 1. Load from file if provided
    /// 2. Apply environment variable overrides
    /// 3. Apply command-line overrides
    pub fn load(config_file: Option<&str>, overrides: &Overrides) -> Result<Self> {
        let config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        let config = config
            .merge_env(|key| std::env::var(key).ok())?
            .merge_overrides(overrides);
        config.validate()?;
        Ok(config)
    }

    /// Merge `QECSIM_*` variables as reported by `lookup`.
    ///
    /// Absent variables leave the corresponding fields unchanged; present but
    /// unparsable ones are an error.
    fn merge_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(v) = lookup("QECSIM_SEED") {
            self.seed = v.parse().with_context(|| format!("Invalid QECSIM_SEED: {v}"))?;
        }
        if let Some(v) = lookup("QECSIM_TRIALS") {
            self.trials = v.parse().with_context(|| format!("Invalid QECSIM_TRIALS: {v}"))?;
        }
        if let Some(v) = lookup("QECSIM_THRESHOLD") {
            self.threshold = v
                .parse()
                .with_context(|| format!("Invalid QECSIM_THRESHOLD: {v}"))?;
        }
        Ok(self)
    }

    fn merge_overrides(mut self, overrides: &Overrides) -> Self {
        if !overrides.codes.is_empty() {
            self.codes = overrides.codes.clone();
        }
        if !overrides.inputs.is_empty() {
            self.inputs = overrides.inputs.clone();
        }
        if let Some(trials) = overrides.trials {
            self.trials = trials;
        }
        if let Some(seed) = overrides.seed {
            self.seed = seed;
        }
        if let Some(threshold) = overrides.threshold {
            self.threshold = threshold;
        }
        self
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.codes.is_empty() {
            bail!("No codes selected");
        }
        if self.inputs.is_empty() {
            bail!("No input states selected");
        }
        if let Some(code) = self.codes.iter().find(|c| !c.supports_correction()) {
            bail!("The {code} code has no correction procedure to verify");
        }
        if !(0.0..=1.0).contains(&self.threshold) {
            bail!("Threshold must lie in [0, 1], got {}", self.threshold);
        }
        self.density
            .validate()
            .context("Invalid density settings")?;
        Ok(())
    }
}
