use crate::errors::NozzleError;

/// Piecewise-linear interpolation of `x` over the table (`xs`, `ys`).
///
/// Outside the table the nearest endpoint value is returned. `xs` must be
/// strictly increasing and as long as `ys`.
pub fn interpolate(xs: &[f64], ys: &[f64], x: f64) -> Result<f64, NozzleError> {
    if xs.is_empty() || xs.len() != ys.len() {
        return Err(NozzleError::Configuration(format!(
            "interpolation table needs matching non-empty columns (got {} x, {} y)",
            xs.len(),
            ys.len()
        )));
    }
    if let Some(pair) = xs.windows(2).find(|pair| pair[1] <= pair[0]) {
        return Err(NozzleError::Configuration(format!(
            "interpolation x values must be strictly increasing ({} followed by {})",
            pair[0], pair[1]
        )));
    }

    let last = xs.len() - 1;
    if x <= xs[0] {
        return Ok(ys[0]);
    }
    if x >= xs[last] {
        return Ok(ys[last]);
    }

    let i = xs.partition_point(|&value| value < x) - 1;
    let slope = (ys[i + 1] - ys[i]) / (xs[i + 1] - xs[i]);
    Ok(ys[i] + slope * (x - xs[i]))
}

/// Index of the entry closest to `value`; ties keep the first.
pub fn nearest_index(values: &[f64], value: f64) -> Option<usize> {
    values
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| (*a - value).abs().total_cmp(&(*b - value).abs()))
        .map(|(index, _)| index)
}

/// Evenly spaced samples over [start, end], both ends included.
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            (0..count)
                .map(|i| if i == count - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}
