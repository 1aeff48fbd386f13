use crate::CoreError;

/// Floating point type used throughout system
pub type Real = f64;

/// Pass `v` through when finite, otherwise report `what` as non-finite.
pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, CoreError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}

/// Value on the straight line through `(x0, y0)` and `(x1, y1)` at `x`.
///
/// ```text
/// y = y0 + (y1 - y0) * (x - x0) / (x1 - x0)
/// ```
///
/// Returns `y0` unchanged when `x == x0` so tabulated points come back exactly.
pub fn lerp(x: Real, x0: Real, x1: Real, y0: Real, y1: Real) -> Result<Real, CoreError> {
    if x == x0 {
        return Ok(y0);
    }
    if x == x1 {
        return Ok(y1);
    }
    if x1 == x0 {
        return Err(CoreError::DegenerateInterval {
            what: "interpolation bracket",
            lo: x0,
            hi: x1,
        });
    }
    Ok(y0 + (y1 - y0) * (x - x0) / (x1 - x0))
}

/// Evenly spaced points from `start` to `end`, both included.
///
/// `n == 0` gives an empty vector and `n == 1` gives `[start]`.
pub fn linspace(start: Real, end: Real, n: usize) -> Vec<Real> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let delta = (end - start) / (n - 1) as Real;
            let mut points: Vec<Real> = (0..n).map(|i| start + i as Real * delta).collect();
            // Ensure exact endpoint
            points[n - 1] = end;
            points
        }
    }
}
