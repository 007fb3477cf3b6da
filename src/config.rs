use serde::Deserialize;

/// Top-level splitwave configuration (`splitwave.toml`).
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct SplitwaveConfig {
    /// Grid search settings.
    #[serde(default)]
    pub search: SearchToml,

    /// Synthetic waveform settings.
    #[serde(default)]
    pub synth: SynthToml,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchToml {
    #[serde(default)]
    pub max_shift: Option<usize>,
    #[serde(default)]
    pub step_angle: Option<f64>,
    #[serde(default)]
    pub step_shift: Option<usize>,
    #[serde(default)]
    pub window: Option<WindowToml>,
    #[serde(default = "default_dof")]
    pub dof: String,
    #[serde(default = "default_units")]
    pub units: String,
    #[serde(default = "default_delta")]
    pub delta: f64,
}

impl Default for SearchToml {
    fn default() -> Self {
        Self {
            max_shift: None,
            step_angle: None,
            step_shift: None,
            window: None,
            dof: default_dof(),
            units: default_units(),
            delta: default_delta(),
        }
    }
}

/// Analysis window in samples of the input record, `[start, end)`.
#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(deny_unknown_fields)]
pub struct WindowToml {
    pub start: usize,
    pub end: usize,
}

fn default_dof() -> String {
    "half-window".to_string()
}
fn default_units() -> String {
    "s".to_string()
}
fn default_delta() -> f64 {
    1.0
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SynthToml {
    #[serde(default = "default_samples")]
    pub samples: usize,
    #[serde(default = "default_width")]
    pub width: f64,
    #[serde(default)]
    pub srcpol: f64,
    #[serde(default)]
    pub noise: f64,
    #[serde(default = "default_delta")]
    pub delta: f64,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for SynthToml {
    fn default() -> Self {
        Self {
            samples: default_samples(),
            width: default_width(),
            srcpol: 0.0,
            noise: 0.0,
            delta: default_delta(),
            seed: None,
        }
    }
}

fn default_samples() -> usize {
    1001
}
fn default_width() -> f64 {
    16.0
}
