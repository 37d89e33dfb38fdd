//! Linear and square-root scales between data space and pixel space.
//!
//! Nice rounding and tick generation use the 1-2-5 increment rule familiar
//! from d3: a candidate step of `span / count` is snapped to 1, 2, 5 or 10
//! times a power of ten. Fractional steps are carried as negative reciprocals
//! (`-10.0` means a step of `0.1`) so tick values stay exact multiples.

use super::config::ScaleConfig;
use super::value_objects::{Bounds, Domain, Extent, PixelPoint, Point};

/// Span used when a linear domain collapses to a single value.
pub const DEGENERATE_SPAN: f64 = 1.0;

const NICE_MAX_ITERATIONS: usize = 10;
const E10: f64 = 7.071_067_811_865_475; // sqrt(50)
const E5: f64 = 3.162_277_660_168_379_5; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

/// Linear map from a data extent onto a pixel interval (which may be inverted).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: Extent,
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: Extent, range: (f64, f64)) -> Self {
        let domain = if domain.is_degenerate() {
            domain.with_min_span(DEGENERATE_SPAN)
        } else {
            domain
        };
        Self { domain, range }
    }

    pub fn domain(&self) -> Extent {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    pub fn apply(&self, value: f64) -> f64 {
        let t = (value - self.domain.min) / self.domain.span();
        lerp(self.range.0, self.range.1, t)
    }

    pub fn invert(&self, pixel: f64) -> f64 {
        let (r0, r1) = self.range;
        if r1 == r0 {
            return self.domain.midpoint();
        }
        let t = (pixel - r0) / (r1 - r0);
        lerp(self.domain.min, self.domain.max, t)
    }

    /// Round the domain outward to multiples of the tick increment.
    pub fn nice(mut self, count: usize) -> Self {
        let (mut start, mut stop) = (self.domain.min, self.domain.max);
        let mut previous: Option<f64> = None;
        for _ in 0..NICE_MAX_ITERATIONS {
            let step = tick_increment(start, stop, count as f64);
            if previous == Some(step) {
                self.domain = Extent { min: start, max: stop };
                return self;
            }
            if step > 0.0 {
                start = (start / step).floor() * step;
                stop = (stop / step).ceil() * step;
            } else if step < 0.0 {
                start = (start * step).ceil() / step;
                stop = (stop * step).floor() / step;
            } else {
                break;
            }
            previous = Some(step);
        }
        self
    }

    pub fn ticks(&self, count: usize) -> Vec<f64> {
        ticks(self.domain.min, self.domain.max, count as f64)
    }

    /// Format a tick value with as many decimals as the tick step needs.
    pub fn tick_format(&self, count: usize, value: f64) -> String {
        let step = tick_increment(self.domain.min, self.domain.max, count as f64);
        let decimals = if step < 0.0 { (-step).log10().ceil().max(0.0) as usize } else { 0 };
        let formatted = format!("{:.*}", decimals, value);
        // "-0" reads oddly on an axis
        if formatted.trim_start_matches('-').chars().all(|c| c == '0' || c == '.') {
            formatted.trim_start_matches('-').to_string()
        } else {
            formatted
        }
    }
}

/// Square-root scale for area-proportional marker radii.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SqrtScale {
    domain: Extent,
    range: (f64, f64),
}

impl SqrtScale {
    pub fn new(domain: Extent, range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> Extent {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// A zero-width domain maps every input onto the middle of the output band.
    pub fn apply(&self, value: f64) -> f64 {
        let (s0, s1) = (signed_sqrt(self.domain.min), signed_sqrt(self.domain.max));
        if s1 == s0 {
            return (self.range.0 + self.range.1) * 0.5;
        }
        lerp(self.range.0, self.range.1, (signed_sqrt(value) - s0) / (s1 - s0))
    }
}

/// The three scales active for one frozen domain and one drawing rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scales {
    pub x: LinearScale,
    pub y: LinearScale,
    pub size: SqrtScale,
    pub bounds: Bounds,
}

impl Scales {
    pub fn build(domain: &Domain, bounds: Bounds, points: &[Point], config: &ScaleConfig) -> Self {
        let x = LinearScale::new(domain.x, (0.0, bounds.width)).nice(config.tick_count);
        let y = LinearScale::new(domain.y, (bounds.height, 0.0)).nice(config.tick_count);
        Self { x, y, size: size_scale(points, config), bounds }
    }

    /// Same x/y scales with a size scale over the current sizes.
    pub fn with_sizes(&self, points: &[Point], config: &ScaleConfig) -> Self {
        Self { size: size_scale(points, config), ..*self }
    }

    pub fn project(&self, point: &Point) -> PixelPoint {
        PixelPoint::new(self.x.apply(point.x), self.y.apply(point.y))
    }

    pub fn unproject(&self, pixel: PixelPoint) -> (f64, f64) {
        (self.x.invert(pixel.x), self.y.invert(pixel.y))
    }

    pub fn radius(&self, size: f64) -> f64 {
        self.size.apply(size)
    }
}

fn size_scale(points: &[Point], config: &ScaleConfig) -> SqrtScale {
    let extent = Extent::from_values(points.iter().map(|p| p.size)).unwrap_or(Extent { min: 1.0, max: 1.0 });
    SqrtScale::new(extent, config.radius_range)
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

fn signed_sqrt(v: f64) -> f64 {
    if v < 0.0 { -(-v).sqrt() } else { v.sqrt() }
}

/// Returns `(i1, i2, increment)`; tick `k` is `k * inc` or `k / -inc`.
fn tick_spec(start: f64, stop: f64, count: f64) -> (f64, f64, f64) {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };
    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let positive = 10f64.powf(-power) / factor;
        i1 = js_round(start * positive);
        i2 = js_round(stop * positive);
        if i1 / positive < start {
            i1 += 1.0;
        }
        if i2 / positive > stop {
            i2 -= 1.0;
        }
        inc = -positive;
    } else {
        inc = 10f64.powf(power) * factor;
        i1 = js_round(start / inc);
        i2 = js_round(stop / inc);
        if i1 * inc < start {
            i1 += 1.0;
        }
        if i2 * inc > stop {
            i2 -= 1.0;
        }
    }
    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    (i1, i2, inc)
}

pub fn tick_increment(start: f64, stop: f64, count: f64) -> f64 {
    tick_spec(start, stop, count).2
}

pub fn ticks(start: f64, stop: f64, count: f64) -> Vec<f64> {
    if !(count > 0.0) || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }
    let reverse = stop < start;
    let (lo, hi) = if reverse { (stop, start) } else { (start, stop) };
    let (i1, i2, inc) = tick_spec(lo, hi, count);
    if !(i2 >= i1) {
        return Vec::new();
    }
    let n = (i2 - i1 + 1.0) as usize;
    let mut values: Vec<f64> = (0..n)
        .map(|i| {
            let k = i1 + i as f64;
            if inc < 0.0 { k / -inc } else { k * inc }
        })
        .collect();
    if reverse {
        values.reverse();
    }
    values
}

/// Round half toward positive infinity, matching `Math.round`.
pub fn js_round(value: f64) -> f64 {
    (value + 0.5).floor()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nice_rounds_outward() {
        let scale = LinearScale::new(Extent::new(0.23, 9.7), (0.0, 100.0)).nice(10);
        assert_eq!(scale.domain(), Extent { min: 0.0, max: 10.0 });

        let scale = LinearScale::new(Extent::new(103.0, 587.0), (0.0, 100.0)).nice(10);
        assert_eq!(scale.domain(), Extent { min: 100.0, max: 600.0 });
    }

    #[test]
    fn nice_handles_fractional_steps() {
        let scale = LinearScale::new(Extent::new(0.123, 0.876), (0.0, 1.0)).nice(10);
        assert_eq!(scale.domain(), Extent { min: 0.1, max: 0.9 });
    }

    #[test]
    fn degenerate_domain_gets_unit_span() {
        let scale = LinearScale::new(Extent::new(200.0, 200.0), (390.0, 0.0)).nice(10);
        let domain = scale.domain();
        assert!(domain.contains(200.0));
        assert!(domain.span() > 0.0);
        assert_eq!(scale.apply(200.0), 195.0);
    }

    #[test]
    fn ticks_follow_increment() {
        assert_eq!(ticks(0.0, 10.0, 5.0), vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
        assert_eq!(ticks(0.0, 1.0, 5.0), vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
        assert_eq!(ticks(5.0, 5.0, 10.0), vec![5.0]);
        assert_eq!(ticks(10.0, 0.0, 5.0), vec![10.0, 8.0, 6.0, 4.0, 2.0, 0.0]);
    }

    #[test]
    fn tick_format_uses_step_precision() {
        let scale = LinearScale::new(Extent::new(0.0, 1.0), (0.0, 100.0));
        assert_eq!(scale.tick_format(10, 0.3), "0.3");
        let scale = LinearScale::new(Extent::new(0.0, 600.0), (0.0, 100.0));
        assert_eq!(scale.tick_format(10, 350.0), "350");
        assert_eq!(scale.tick_format(10, -0.0), "0");
    }

    #[test]
    fn sqrt_scale_degenerate_returns_midpoint() {
        let scale = SqrtScale::new(Extent::new(100.0, 100.0), (4.0, 40.0));
        assert_eq!(scale.apply(100.0), 22.0);
        assert_eq!(scale.apply(3.0), 22.0);
    }

    #[test]
    fn sqrt_scale_is_area_proportional() {
        let scale = SqrtScale::new(Extent::new(0.0, 100.0), (0.0, 10.0));
        assert_eq!(scale.apply(25.0), 5.0);
        assert_eq!(scale.apply(100.0), 10.0);
    }

    #[test]
    fn js_round_rounds_half_up() {
        assert_eq!(js_round(2.5), 3.0);
        assert_eq!(js_round(-2.5), -2.0);
        assert_eq!(js_round(199.49), 199.0);
    }
}
