//! # splitwave-pair
//!
//! Two-component horizontal waveforms and the elementary operators the
//! splitting grid search is built from.
//!
//! ## Operators
//!
//! | Function | Effect | Length |
//! |----------|--------|--------|
//! | [`rotate`] | counter-clockwise rotation of every `(x, y)` sample | unchanged |
//! | [`lag`] | shifts `y` against `x` and trims to the overlap | `len - |shift|` |
//! | [`window()`] | restricts both components to `[start, end)` | `end - start` |
//! | [`split`] | forward splitting: rotate, lag, rotate back | `len - |shift|` |
//! | [`unsplit`] | inverse of [`split`] | `len - |shift|` |
//!
//! All operators borrow their input and return a new [`WaveformPair`].
//!
//! ## Quick Start
//!
//! ```
//! use splitwave_pair::{SynthConfig, Window, lag, rotate, synthetic_pair, window};
//!
//! let pair = synthetic_pair(&SynthConfig::new().with_fast(30.0).with_lag(10)).unwrap();
//! let corrected = lag(&rotate(&pair, 30.0), -10).unwrap();
//! let w = Window::centred(corrected.len(), 200).unwrap();
//! let analysed = window(&corrected, &w).unwrap();
//! assert_eq!(analysed.len(), 200);
//! ```

mod error;
mod ops;
mod pair;
mod synth;
mod window;

pub use error::{ErrorKind, PairError};
pub use ops::{lag, rotate, split, unsplit, window};
pub use pair::WaveformPair;
pub use synth::{SynthConfig, ricker, synthetic_pair};
pub use window::Window;
