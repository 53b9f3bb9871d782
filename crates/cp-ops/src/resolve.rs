//! Parameter inheritance.
//!
//! Overrides are listed most-specific first (operation, then leg).  The
//! first one that is set wins; the cruise default is used otherwise.

/// First non-`None` entry of `overrides`, else `default`.
///
/// ```
/// use cp_ops::resolve;
/// assert_eq!(resolve(&[None, Some(8.0)], 10.0), 8.0);
/// assert_eq!(resolve(&[Some(12.0), Some(8.0)], 10.0), 12.0);
/// assert_eq!(resolve::<f64>(&[None, None], 10.0), 10.0);
/// ```
#[inline]
pub fn resolve<T: Copy>(overrides: &[Option<T>], default: T) -> T {
    overrides.iter().flatten().copied().next().unwrap_or(default)
}
