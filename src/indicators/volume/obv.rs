//! OBV (On-Balance Volume) indicator

/// Running volume flow starting at the first bar's volume.
///
/// Up-bars add their volume, down-bars subtract it, unchanged closes carry
/// the previous value.
pub fn obv_series(closes: &[f64], volumes: &[f64]) -> Vec<f64> {
    let len = closes.len().min(volumes.len());
    let mut out = Vec::with_capacity(len);
    if len == 0 {
        return out;
    }

    let mut running = volumes[0];
    out.push(running);
    for i in 1..len {
        if closes[i] > closes[i - 1] {
            running += volumes[i];
        } else if closes[i] < closes[i - 1] {
            running -= volumes[i];
        }
        out.push(running);
    }
    out
}

/// Difference between the last two OBV values; positive means rising
pub fn obv_delta(closes: &[f64], volumes: &[f64]) -> Option<f64> {
    let obv = obv_series(closes, volumes);
    match obv.as_slice() {
        [.., previous, current] => Some(current - previous),
        _ => None,
    }
}
