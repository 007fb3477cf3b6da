//! # splitwave-eigen
//!
//! Shear-wave splitting measurement by the eigenvalue method of Silver &
//! Chan (1991).
//!
//! ## Measurement Pipeline
//!
//! ```mermaid
//! graph LR
//!     A["WaveformPair"] -->|"grideigcov(&pair, &config)?"| B["EigenvalueSurface"]
//!     A -->|"SplittingEstimate::new(pair, &config)?"| C["SplittingEstimate"]
//!     B -->|"from_surface(pair, surface)?"| C
//!     C --> D[".fast() / .lag()"]
//!     C --> E[".fdfast() / .fdlag()"]
//!     C --> F[".lam2_95()"]
//!     C -->|"SplittingSummary::from_estimate"| G["JSON"]
//! ```
//!
//! ## Search Defaults
//!
//! | Option | Default |
//! |--------|---------|
//! | step angle | 2 degrees |
//! | step shift | `2 * max(1, max_shift / 40)` samples |
//! | window | centred, `min(len / 2, 10 * max_shift)` samples |
//! | degrees of freedom | half the window length |
//!
//! ## Quick Start
//!
//! ```
//! use splitwave_eigen::{GridConfig, SplittingEstimate};
//! use splitwave_pair::{SynthConfig, synthetic_pair};
//!
//! let pair = synthetic_pair(&SynthConfig::new().with_fast(30.0).with_lag(12)).unwrap();
//! let est = SplittingEstimate::new(pair, &GridConfig::new(40)).unwrap();
//! assert_eq!(est.fast(), 30.0);
//! assert_eq!(est.lag_samples(), 12);
//! ```

mod config;
mod dof;
mod eigcov;
mod error;
mod estimate;
mod grid;
mod summary;
mod surface;

pub use config::{
    DEFAULT_STEP_ANGLE, DofMethod, GridConfig, MAX_ANGLES, MIN_WINDOW, SearchGrid, default_step_shift,
    default_window_width,
};
pub use dof::{K_PARAMS, half_window_ndf, lam2_threshold, spectral_ndf};
pub use eigcov::eigcov;
pub use error::EigenError;
pub use estimate::{DEFAULT_CONFIDENCE, SplittingEstimate};
pub use grid::grideigcov;
pub use summary::{SplittingSummary, SurfaceRecord};
pub use surface::{EigenvalueSurface, Grid};
