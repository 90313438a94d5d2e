//! Axis scales and tick placement.

/// Linear map from data values to canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Canvas coordinate of `value`; a zero-width domain maps to the middle.
    pub fn map(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return (r0 + r1) / 2.0;
        }
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }
}

/// Data range widened by 5% on each side so points do not sit on the frame.
pub fn padded_domain(min: f64, max: f64) -> (f64, f64) {
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    if min == max {
        return (min - 0.5, max + 0.5);
    }
    let pad = (max - min) * 0.05;
    (min - pad, max + pad)
}

/// Min and max of finite values, or `None` if there are none.
pub fn extent<I: IntoIterator<Item = f64>>(values: I) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| {
            Some(acc.map_or((v, v), |(lo, hi): (f64, f64)| (lo.min(v), hi.max(v))))
        })
}

/// Step between ticks: 1, 2 or 5 times a power of ten.
fn nice_step(span: f64, target: usize) -> f64 {
    let raw = span / target.max(1) as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let factor = if normalized < 1.5 {
        1.0
    } else if normalized < 3.0 {
        2.0
    } else if normalized < 7.0 {
        5.0
    } else {
        10.0
    };
    factor * magnitude
}

/// Round tick positions covering `[min, max]`, about `target` of them.
pub fn nice_ticks(min: f64, max: f64, target: usize) -> Vec<f64> {
    if !min.is_finite() || !max.is_finite() || max <= min {
        return vec![min];
    }
    let step = nice_step(max - min, target);
    let first = (min / step).ceil();
    let last = (max / step).floor();
    let count = (last - first) as i64;
    (0..=count)
        .map(|i| {
            let tick = (first + i as f64) * step;
            if tick == 0.0 { 0.0 } else { tick }
        })
        .collect()
}

/// Tick label with as many decimals as the tick step needs.
pub fn format_tick(value: f64, ticks: &[f64]) -> String {
    let step = match ticks {
        [a, b, ..] => (b - a).abs(),
        _ => 1.0,
    };
    let decimals = if step > 0.0 && step < 1.0 {
        (-step.log10().floor()) as usize
    } else {
        0
    };
    format!("{value:.decimals$}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_maps_linearly() {
        let scale = LinearScale::new((0.0, 10.0), (100.0, 200.0));
        assert_eq!(scale.map(0.0), 100.0);
        assert_eq!(scale.map(5.0), 150.0);
        assert_eq!(scale.map(10.0), 200.0);
    }

    #[test]
    fn test_inverted_range_for_y_axis() {
        let scale = LinearScale::new((0.0, 4.0), (400.0, 0.0));
        assert_eq!(scale.map(1.0), 300.0);
    }

    #[test]
    fn test_nice_ticks() {
        assert_eq!(nice_ticks(0.0, 10.0, 5), vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
        assert_eq!(nice_ticks(3.2, 8.9, 5), vec![4.0, 5.0, 6.0, 7.0, 8.0]);
    }

    #[test]
    fn test_format_tick_decimals() {
        assert_eq!(format_tick(0.5, &[0.0, 0.5]), "0.5");
        assert_eq!(format_tick(4000.0, &[2000.0, 4000.0]), "4000");
    }

    #[test]
    fn test_extent_skips_nan() {
        assert_eq!(extent([3.0, f64::NAN, -1.0]), Some((-1.0, 3.0)));
        assert_eq!(extent(Vec::<f64>::new()), None);
    }
}
