use common::Candle;

/// Point of Control from a fixed-bin volume profile.
///
/// The observed close-price range is split into `bins` equal-width
/// buckets; each candle's volume accumulates into the bucket holding its
/// close. The POC is the lower-bound price of the highest-volume bucket.
/// A degenerate window (all closes equal) returns that price directly.
pub fn point_of_control(candles: &[Candle], bins: usize) -> Option<f64> {
    if candles.is_empty() || bins == 0 {
        return None;
    }

    let min_p = candles.iter().map(|c| c.close).fold(f64::INFINITY, f64::min);
    let max_p = candles.iter().map(|c| c.close).fold(f64::NEG_INFINITY, f64::max);

    if min_p == max_p {
        return Some(min_p);
    }

    let bin_size = (max_p - min_p) / bins as f64;
    let mut profile = vec![0.0f64; bins];

    for c in candles {
        // The top of the range belongs to the last bucket
        let idx = if c.close >= max_p {
            bins - 1
        } else {
            ((c.close - min_p) / bin_size) as usize
        };
        profile[idx] += c.volume;
    }

    let poc_idx = profile
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(i, _)| i)?;

    Some(min_p + poc_idx as f64 * bin_size)
}
