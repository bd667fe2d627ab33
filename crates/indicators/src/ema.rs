/// Exponential Moving Average over a full series.
///
/// Smoothing factor is 2 / (period + 1), seeded with the first value
/// and without bias correction, so the output has the same length as
/// the input.
pub fn ema_series(values: &[f64], period: usize) -> Vec<f64> {
    if values.is_empty() || period == 0 {
        return Vec::new();
    }

    let alpha = 2.0 / (period as f64 + 1.0);
    let mut out = Vec::with_capacity(values.len());
    let mut ema = values[0];
    out.push(ema);

    for &value in &values[1..] {
        ema = alpha * value + (1.0 - alpha) * ema;
        out.push(ema);
    }

    out
}
