use ndarray::Array1;

/// Relative tolerance used by [`is_close`].
pub const DEFAULT_RTOL: f64 = 1e-5;
/// Absolute tolerance used by [`is_close`].
pub const DEFAULT_ATOL: f64 = 1e-8;

/// `count` evenly spaced points over `[start, stop]`, both endpoints included.
///
/// The last point is pinned to `stop` so it never drifts by accumulated rounding.
pub fn linspace(start: f64, stop: f64, count: usize) -> Array1<f64> {
    match count {
        0 => Array1::zeros(0),
        1 => Array1::from_elem(1, start),
        _ => {
            let last = count - 1;
            let step = (stop - start) / last as f64;
            Array1::from_shape_fn(count, |i| {
                if i == last {
                    stop
                } else {
                    start + i as f64 * step
                }
            })
        }
    }
}

/// `|a - b| <= atol + rtol * |b|`, asymmetric in `b` like the usual numeric closeness test.
pub fn is_close_tol(a: f64, b: f64, rtol: f64, atol: f64) -> bool {
    (a - b).abs() <= atol + rtol * b.abs()
}

pub fn is_close(a: f64, b: f64) -> bool {
    is_close_tol(a, b, DEFAULT_RTOL, DEFAULT_ATOL)
}
