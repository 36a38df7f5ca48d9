//! Band and linear scales for the bar chart.

/// Maps `n` categories onto evenly spaced bands over `[0, range]`.
/// Inner and outer padding are the same fraction of a step; bands are centred.
#[derive(Debug, Clone)]
pub struct BandScale {
    start: f64,
    step: f64,
    bandwidth: f64,
}

impl BandScale {
    pub fn new(n: usize, range: f64, padding: f64) -> Self {
        let n = n as f64;
        let step = range / (n - padding + 2.0 * padding).max(1.0);
        let start = (range - step * (n - padding)) * 0.5;
        Self { start, step, bandwidth: step * (1.0 - padding) }
    }

    /// Left edge of band `i`.
    pub fn x(&self, i: usize) -> f64 {
        self.start + self.step * i as f64
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }
}

/// Maps `[0, max]` onto `[height, 0]`, with `max` rounded up to a tick step.
#[derive(Debug, Clone)]
pub struct LinearScale {
    max: f64,
    step: f64,
    height: f64,
}

const TICK_COUNT: f64 = 10.0;

impl LinearScale {
    pub fn new(data_max: f64, height: f64) -> Self {
        let data_max = if data_max > 0.0 && data_max.is_finite() { data_max } else { 1.0 };
        let step = tick_step(data_max, TICK_COUNT);
        let max = (data_max / step).ceil() * step;
        Self { max, step, height }
    }

    pub fn y(&self, value: f64) -> f64 {
        self.height - (value / self.max) * self.height
    }

    pub fn ticks(&self) -> Vec<f64> {
        let count = (self.max / self.step).round() as usize;
        (0..=count).map(|i| i as f64 * self.step).collect()
    }
}

/// A 1, 2 or 5 × 10^k step giving roughly `count` ticks over `[0, max]`.
fn tick_step(max: f64, count: f64) -> f64 {
    let raw = max / count;
    let power = raw.log10().floor();
    let base = 10f64.powf(power);
    let error = raw / base;
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    factor * base
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_scale_rounds_up_to_tick() {
        let s = LinearScale::new(120.0, 360.0);
        assert_eq!(s.ticks().last(), Some(&120.0));
        assert_eq!(s.ticks().len(), 13);

        let s = LinearScale::new(113.0, 360.0);
        assert_eq!(s.ticks().last(), Some(&120.0));
        assert_eq!(s.y(0.0), 360.0);
        assert_eq!(s.y(120.0), 0.0);
    }

    #[test]
    fn test_small_values_use_fractional_steps() {
        let s = LinearScale::new(0.27, 100.0);
        assert!((s.ticks().last().unwrap() - 0.28).abs() < 1e-9);
    }

    #[test]
    fn test_band_scale_spacing() {
        let b = BandScale::new(4, 400.0, 0.2);
        // step = 400 / (4 - 0.2 + 0.4) = 95.238…
        let step = 400.0 / 4.2;
        assert!((b.x(1) - b.x(0) - step).abs() < 1e-9);
        assert!((b.bandwidth() - step * 0.8).abs() < 1e-9);
        // symmetric outer padding
        let right_gap = 400.0 - (b.x(3) + b.bandwidth());
        assert!((b.x(0) - right_gap).abs() < 1e-9);
    }
}
