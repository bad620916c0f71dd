//! Axis layout for the static chart: a numeric value axis with rounded
//! tick steps and an evenly spaced category axis for the year labels.

/// Upper bound on value-axis ticks, whatever the data range.
const MAX_TICKS: usize = 50;

/// Relative spread below which the data is drawn as a flat line.
const FLAT_TOLERANCE: f64 = 1e-9;

/// Linear value axis with "nice number" ticks.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueAxis {
    pub min: f64,
    pub max: f64,
    pub ticks: Vec<f64>,
    pub labels: Vec<String>,
}

impl ValueAxis {
    pub fn auto(data_min: f64, data_max: f64, target_ticks: usize) -> Self {
        let (min, max, step) = nice_range(data_min, data_max, target_ticks);
        let count = ((max - min) / step).round();
        let count = if count.is_finite() && count > 0.0 {
            (count as usize).min(MAX_TICKS)
        } else {
            0
        };

        let ticks: Vec<f64> = (0..=count).map(|i| min + i as f64 * step).collect();
        let labels = ticks.iter().map(|&v| format_tick(v, step)).collect();
        Self {
            min,
            max,
            ticks,
            labels,
        }
    }

    /// Pixel position of `value` between `px_min` (at `min`) and `px_max`.
    pub fn to_pixel(&self, value: f64, px_min: f64, px_max: f64) -> f64 {
        let frac = (value - self.min) / (self.max - self.min);
        px_min + frac * (px_max - px_min)
    }
}

/// Evenly spaced category positions with half a slot of padding each side.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryAxis {
    pub labels: Vec<String>,
}

impl CategoryAxis {
    pub fn new(labels: &[String]) -> Self {
        Self {
            labels: labels.to_vec(),
        }
    }

    pub fn to_pixel(&self, index: usize, px_min: f64, px_max: f64) -> f64 {
        let slots = self.labels.len().max(1) as f64;
        let slot = (px_max - px_min) / slots;
        px_min + slot * (index as f64 + 0.5)
    }
}

fn nice_range(data_min: f64, data_max: f64, target_ticks: usize) -> (f64, f64, f64) {
    // Spread too small to step through at this magnitude: pad relative to it.
    let magnitude = data_min.abs().max(data_max.abs()).max(1.0);
    let (lo, hi) = if (data_max - data_min).abs() <= magnitude * FLAT_TOLERANCE {
        let pad = magnitude * 0.05;
        (data_min - pad, data_max + pad)
    } else {
        (data_min, data_max)
    };

    let range = hi - lo;
    let rough_step = range / (target_ticks.max(2) - 1) as f64;
    let step = nice_step(rough_step);
    if !step.is_finite() || step <= 0.0 {
        return (lo, hi, range);
    }
    let nice_min = (lo / step).floor() * step;
    let nice_max = (hi / step).ceil() * step;
    (nice_min, nice_max, step)
}

fn nice_step(rough: f64) -> f64 {
    let exp = rough.abs().log10().floor();
    let frac = rough / 10.0_f64.powf(exp);
    let nice_frac = if frac <= 1.5 {
        1.0
    } else if frac <= 3.5 {
        2.0
    } else if frac <= 7.5 {
        5.0
    } else {
        10.0
    };
    nice_frac * 10.0_f64.powf(exp)
}

fn format_tick(value: f64, step: f64) -> String {
    let decimals = if step >= 1.0 {
        0
    } else {
        (-step.log10().floor()) as usize
    };
    // Avoid "-0"
    let value = if value.abs() < step * 0.01 { 0.0 } else { value };
    format!("{value:.decimals$}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_covers_data() {
        let ax = ValueAxis::auto(3.2, 27.9, 6);
        assert!(ax.min <= 3.2);
        assert!(ax.max >= 27.9);
        assert_eq!(ax.ticks.len(), ax.labels.len());
        assert_eq!(ax.labels.first().map(String::as_str), Some("0"));
    }

    #[test]
    fn test_flat_data_gets_a_range() {
        let ax = ValueAxis::auto(5.0, 5.0, 6);
        assert!(ax.min < 5.0 && ax.max > 5.0);
    }

    #[test]
    fn test_large_flat_data_terminates() {
        let ax = ValueAxis::auto(1e17, 1e17, 6);
        assert!(ax.min < 1e17 && ax.max > 1e17);
        assert!(ax.ticks.len() >= 2 && ax.ticks.len() <= MAX_TICKS + 1);
        assert_eq!(ax.ticks.len(), ax.labels.len());
        assert!(ax.ticks.windows(2).all(|w| w[0] < w[1]), "ticks must increase");
    }

    #[test]
    fn test_large_near_equal_data_terminates() {
        let ax = ValueAxis::auto(1e16, 1e16 + 2.0, 6);
        assert!(ax.min <= 1e16 && ax.max >= 1e16 + 2.0);
        assert!(ax.ticks.len() >= 2 && ax.ticks.len() <= MAX_TICKS + 1);
        assert!(ax.ticks.windows(2).all(|w| w[0] < w[1]), "ticks must increase");
    }

    #[test]
    fn test_tick_count_is_bounded() {
        let ax = ValueAxis::auto(-1e300, 1e300, 6);
        assert!(!ax.ticks.is_empty());
        assert!(ax.ticks.len() <= MAX_TICKS + 1);
    }

    #[test]
    fn test_fractional_labels() {
        let ax = ValueAxis::auto(0.1, 0.9, 5);
        assert!(ax.labels.iter().all(|l| l.contains('.')));
    }

    #[test]
    fn test_to_pixel() {
        let ax = ValueAxis::auto(0.0, 100.0, 5);
        let px = ax.to_pixel(50.0, 500.0, 0.0);
        assert!((px - 250.0).abs() < 1.0);
    }

    #[test]
    fn test_category_positions() {
        let years: Vec<String> = ["2000", "2005"].into_iter().map(str::to_owned).collect();
        let ax = CategoryAxis::new(&years);
        assert!((ax.to_pixel(0, 0.0, 100.0) - 25.0).abs() < 1e-9);
        assert!((ax.to_pixel(1, 0.0, 100.0) - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_nice_step_values() {
        assert!((nice_step(3.2) - 2.0).abs() < 1e-9);
        assert!((nice_step(0.7) - 0.5).abs() < 1e-9);
        assert!((nice_step(15.0) - 10.0).abs() < 1e-9);
    }
}
