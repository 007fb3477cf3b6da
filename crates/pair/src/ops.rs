//! Elementary operators on a [`WaveformPair`]: rotate, lag, window, and
//! the forward/inverse splitting operators built from them.

use crate::error::PairError;
use crate::pair::WaveformPair;
use crate::window::Window;

/// Rotates every sample vector `(x[i], y[i])` counter-clockwise by
/// `degrees`, using the matrix `[[cos, -sin], [sin, cos]]`.
///
/// Rotation by 0 is the identity and rotations compose additively. An
/// attached window is carried over unchanged.
pub fn rotate(pair: &WaveformPair, degrees: f64) -> WaveformPair {
    let (sin, cos) = degrees.to_radians().sin_cos();
    let (x, y): (Vec<f64>, Vec<f64>) = pair
        .x()
        .iter()
        .zip(pair.y().iter())
        .map(|(&xi, &yi)| (xi * cos - yi * sin, xi * sin + yi * cos))
        .unzip();
    // same length, so an attached window still fits
    WaveformPair::from_parts(x, y, pair.delta(), pair.window())
}

/// Shifts the components against each other by `shift` samples and trims
/// both to their overlap, so the result is `|shift|` samples shorter.
///
/// For `shift > 0` component 2 ends up lagging component 1:
/// `x' = x[shift..]`, `y' = y[..len - shift]`. A negative shift is the
/// inverse: `x' = x[..len - |shift|]`, `y' = y[|shift|..]`. Any attached
/// window is dropped because its indices no longer apply.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`PairError::LagTooLarge`] | `|shift| >= pair.len()` |
pub fn lag(pair: &WaveformPair, shift: isize) -> Result<WaveformPair, PairError> {
    let len = pair.len();
    let n = shift.unsigned_abs();
    if n >= len {
        return Err(PairError::LagTooLarge { shift, len });
    }
    let (x, y) = if shift >= 0 {
        (&pair.x()[n..], &pair.y()[..len - n])
    } else {
        (&pair.x()[..len - n], &pair.y()[n..])
    };
    Ok(WaveformPair::from_parts(
        x.to_vec(),
        y.to_vec(),
        pair.delta(),
        None,
    ))
}

/// Restricts both components to `[window.start(), window.end())`.
///
/// The source pair is left untouched; the returned pair has no window
/// attached.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`PairError::WindowOutOfRange`] | `window.end() > pair.len()` |
pub fn window(pair: &WaveformPair, window: &Window) -> Result<WaveformPair, PairError> {
    if window.end() > pair.len() {
        return Err(PairError::WindowOutOfRange {
            start: window.start(),
            end: window.end(),
            len: pair.len(),
        });
    }
    let range = window.start()..window.end();
    Ok(WaveformPair::from_parts(
        pair.x()[range.clone()].to_vec(),
        pair.y()[range].to_vec(),
        pair.delta(),
        None,
    ))
}

/// Applies shear-wave splitting with fast direction `fast` (degrees) and
/// delay `shift` (samples): rotate into the fast frame, delay the slow
/// component, rotate back.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`PairError::LagTooLarge`] | `|shift| >= pair.len()` |
pub fn split(pair: &WaveformPair, fast: f64, shift: isize) -> Result<WaveformPair, PairError> {
    let rotated = rotate(pair, fast);
    let lagged = lag(&rotated, shift)?;
    Ok(rotate(&lagged, -fast))
}

/// Removes splitting with fast direction `fast` and delay `shift`; the
/// inverse of [`split`].
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`PairError::LagTooLarge`] | `|shift| >= pair.len()` |
pub fn unsplit(pair: &WaveformPair, fast: f64, shift: isize) -> Result<WaveformPair, PairError> {
    split(pair, fast, -shift)
}
