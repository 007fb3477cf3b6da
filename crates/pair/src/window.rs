//! Analysis window: a contiguous sample range of a trace.

use crate::error::PairError;

/// A half-open sample range `[start, end)` into a trace.
///
/// Guarantees `start < end`. The upper bound is checked against the trace
/// length at construction; the window itself does not remember that length,
/// so applying it to a shorter trace is checked again by
/// [`window`](crate::window()).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Window {
    start: usize,
    end: usize,
}

impl Window {
    /// Creates a window over `[start, end)` of a trace with `len` samples.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`PairError::WindowOutOfRange`] | `start >= end` or `end > len` |
    pub fn new(start: usize, end: usize, len: usize) -> Result<Self, PairError> {
        if start >= end || end > len {
            return Err(PairError::WindowOutOfRange { start, end, len });
        }
        Ok(Self { start, end })
    }

    /// Creates a window of `width` samples centred on a trace of `len`
    /// samples.
    ///
    /// When `len - width` is odd the extra sample goes after the window.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`PairError::WindowOutOfRange`] | `width == 0` or `width > len` |
    pub fn centred(len: usize, width: usize) -> Result<Self, PairError> {
        if width == 0 || width > len {
            return Err(PairError::WindowOutOfRange {
                start: 0,
                end: width,
                len,
            });
        }
        let start = (len - width) / 2;
        Self::new(start, start + width, len)
    }

    /// Returns the first sample index (inclusive).
    pub fn start(&self) -> usize {
        self.start
    }

    /// Returns the end index (exclusive).
    pub fn end(&self) -> usize {
        self.end
    }

    /// Returns the number of samples covered.
    pub fn width(&self) -> usize {
        self.end - self.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_valid() {
        let w = Window::new(2, 8, 10).unwrap();
        assert_eq!(w.start(), 2);
        assert_eq!(w.end(), 8);
        assert_eq!(w.width(), 6);
    }

    #[test]
    fn new_full_trace() {
        let w = Window::new(0, 10, 10).unwrap();
        assert_eq!(w.width(), 10);
    }

    #[test]
    fn new_empty_rejected() {
        let err = Window::new(4, 4, 10).unwrap_err();
        assert!(matches!(
            err,
            PairError::WindowOutOfRange {
                start: 4,
                end: 4,
                len: 10
            }
        ));
    }

    #[test]
    fn new_reversed_rejected() {
        assert!(Window::new(6, 3, 10).is_err());
    }

    #[test]
    fn new_past_end_rejected() {
        let err = Window::new(0, 11, 10).unwrap_err();
        assert!(matches!(err, PairError::WindowOutOfRange { end: 11, .. }));
    }

    #[test]
    fn centred_even_margin() {
        let w = Window::centred(100, 40).unwrap();
        assert_eq!((w.start(), w.end()), (30, 70));
    }

    #[test]
    fn centred_odd_margin() {
        let w = Window::centred(11, 4).unwrap();
        assert_eq!((w.start(), w.end()), (3, 7));
    }

    #[test]
    fn centred_too_wide() {
        assert!(Window::centred(10, 11).is_err());
        assert!(Window::centred(10, 0).is_err());
    }

    #[test]
    fn window_is_copy() {
        fn assert_impl<T: Copy + Send + Sync>() {}
        assert_impl::<Window>();
    }
}
