//! Trend fitting and reference curves
//!
//! Least-squares fits on linear, semi-log and log-log axes, plus the closed
//! form reference curves the charts draw (exponential decay between two
//! anchors, fixed-period doubling, power laws).
//!
//! All logarithms are base 10 so that a fitted slope reads directly as
//! "orders of magnitude per unit" on a log axis.

/// Axis transform a fit was computed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitSpace {
    /// y = a + b·x
    Linear,
    /// log10(y) = a + b·x
    SemiLog,
    /// log10(y) = a + b·log10(x)
    LogLog,
}

/// Ordinary least-squares line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    /// Pearson correlation coefficient of the transformed data
    pub r: f64,
    pub space: FitSpace,
}

impl LinearFit {
    /// Fit y = intercept + slope·x.
    ///
    /// Returns `None` for fewer than two points, mismatched lengths, or
    /// zero variance in x.
    pub fn fit(xs: &[f64], ys: &[f64]) -> Option<Self> {
        fit_transformed(xs.iter().copied(), ys.iter().copied(), xs.len(), ys.len(), FitSpace::Linear)
    }

    /// Fit log10(y) against x. Non-positive y values are rejected.
    pub fn semi_log(xs: &[f64], ys: &[f64]) -> Option<Self> {
        if ys.iter().any(|y| *y <= 0.0) {
            return None;
        }
        fit_transformed(
            xs.iter().copied(),
            ys.iter().map(|y| y.log10()),
            xs.len(),
            ys.len(),
            FitSpace::SemiLog,
        )
    }

    /// Fit log10(y) against log10(x). Non-positive values are rejected.
    pub fn log_log(xs: &[f64], ys: &[f64]) -> Option<Self> {
        if xs.iter().chain(ys.iter()).any(|v| *v <= 0.0) {
            return None;
        }
        fit_transformed(
            xs.iter().map(|x| x.log10()),
            ys.iter().map(|y| y.log10()),
            xs.len(),
            ys.len(),
            FitSpace::LogLog,
        )
    }

    /// Evaluate the fitted curve in data space
    pub fn evaluate(&self, x: f64) -> f64 {
        match self.space {
            FitSpace::Linear => self.intercept + self.slope * x,
            FitSpace::SemiLog => 10f64.powf(self.intercept + self.slope * x),
            FitSpace::LogLog => 10f64.powf(self.intercept + self.slope * x.log10()),
        }
    }

    /// Evaluate at every x
    pub fn sample(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|x| self.evaluate(*x)).collect()
    }

    /// Multiplicative change in y per unit of x (semi-log fits)
    pub fn growth_factor(&self) -> f64 {
        10f64.powf(self.slope)
    }
}

fn fit_transformed(
    xs: impl Iterator<Item = f64>,
    ys: impl Iterator<Item = f64>,
    x_len: usize,
    y_len: usize,
    space: FitSpace,
) -> Option<LinearFit> {
    if x_len != y_len || x_len < 2 {
        return None;
    }
    let points: Vec<(f64, f64)> = xs.zip(ys).collect();
    let n = points.len() as f64;
    let mean_x = points.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = points.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut sxx = 0.0;
    let mut syy = 0.0;
    let mut sxy = 0.0;
    for (x, y) in &points {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }

    if sxx == 0.0 || !sxx.is_finite() {
        return None;
    }

    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;
    let r = if syy == 0.0 { 0.0 } else { sxy / (sxx * syy).sqrt() };

    Some(LinearFit {
        slope,
        intercept,
        r,
        space,
    })
}

/// `n` evenly spaced values from `start` to `end` inclusive
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// `n` values from 10^start_exp to 10^end_exp, evenly spaced in log10
pub fn logspace(start_exp: f64, end_exp: f64, n: usize) -> Vec<f64> {
    linspace(start_exp, end_exp, n)
        .into_iter()
        .map(|e| 10f64.powf(e))
        .collect()
}

/// Exponential curve through two anchor points: y = y0·exp(-k·(x - x0))
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExponentialTrend {
    pub x0: f64,
    pub y0: f64,
    /// Decay rate (negative for growth)
    pub k: f64,
}

impl ExponentialTrend {
    /// Curve passing through (x0, y0) and (x1, y1).
    ///
    /// Returns `None` when the anchors share an x or a y is not positive.
    pub fn through(x0: f64, y0: f64, x1: f64, y1: f64) -> Option<Self> {
        if x0 == x1 || y0 <= 0.0 || y1 <= 0.0 {
            return None;
        }
        let k = (y0 / y1).ln() / (x1 - x0);
        Some(Self { x0, y0, k })
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        self.y0 * (-self.k * (x - self.x0)).exp()
    }

    pub fn sample(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|x| self.evaluate(*x)).collect()
    }
}

/// Fixed-period doubling: y = start·2^((x - x0) / period)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoublingTrend {
    pub x0: f64,
    pub start: f64,
    pub period: f64,
}

impl DoublingTrend {
    /// Moore's law as drawn on the compute timeline: 1e6 in 1965, doubling every two years
    pub fn moores_law() -> Self {
        Self {
            x0: 1965.0,
            start: 1e6,
            period: 2.0,
        }
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        self.start * 2f64.powf((x - self.x0) / self.period)
    }

    pub fn sample(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|x| self.evaluate(*x)).collect()
    }
}

/// y = coefficient·x^exponent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerLaw {
    pub coefficient: f64,
    pub exponent: f64,
}

impl PowerLaw {
    pub fn evaluate(&self, x: f64) -> f64 {
        self.coefficient * x.powf(self.exponent)
    }

    pub fn sample(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|x| self.evaluate(*x)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol * b.abs().max(1.0)
    }

    #[test]
    fn test_linear_fit_exact_line() {
        let xs = [0.0, 1.0, 2.0, 3.0];
        let ys = [1.0, 3.0, 5.0, 7.0];
        let fit = LinearFit::fit(&xs, &ys).unwrap();
        assert!(close(fit.slope, 2.0, 1e-12));
        assert!(close(fit.intercept, 1.0, 1e-12));
        assert!(close(fit.r, 1.0, 1e-12));
        assert!(close(fit.evaluate(10.0), 21.0, 1e-12));
    }

    #[test]
    fn test_fit_rejects_degenerate_input() {
        assert!(LinearFit::fit(&[1.0], &[1.0]).is_none());
        assert!(LinearFit::fit(&[1.0, 2.0], &[1.0]).is_none());
        assert!(LinearFit::fit(&[2.0, 2.0, 2.0], &[1.0, 2.0, 3.0]).is_none());
        assert!(LinearFit::log_log(&[0.0, 1.0], &[1.0, 2.0]).is_none());
        assert!(LinearFit::semi_log(&[1.0, 2.0], &[-1.0, 2.0]).is_none());
    }

    #[test]
    fn test_log_log_recovers_power_law() {
        let law = PowerLaw {
            coefficient: 5e9,
            exponent: -0.3,
        };
        let xs = logspace(-2.0, 4.0, 7);
        let ys = law.sample(&xs);
        let fit = LinearFit::log_log(&xs, &ys).unwrap();
        assert!(close(fit.slope, -0.3, 1e-9));
        assert!(close(fit.evaluate(70.0), law.evaluate(70.0), 1e-9));
        assert!(close(fit.r, -1.0, 1e-9));
    }

    #[test]
    fn test_semi_log_growth_factor() {
        let xs = [2000.0, 2001.0, 2002.0, 2003.0];
        let ys = [1.0, 10.0, 100.0, 1000.0];
        let fit = LinearFit::semi_log(&xs, &ys).unwrap();
        assert!(close(fit.growth_factor(), 10.0, 1e-9));
        assert!(close(fit.evaluate(2004.0), 1e4, 1e-6));
    }

    #[test]
    fn test_linspace_endpoints() {
        let v = linspace(1957.0, 2030.0, 100);
        assert_eq!(v.len(), 100);
        assert_eq!(v[0], 1957.0);
        assert_eq!(v[99], 2030.0);
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(3.0, 9.0, 1), vec![3.0]);
    }

    #[test]
    fn test_logspace_decades() {
        let v = logspace(-2.0, 4.0, 7);
        assert_eq!(v.len(), 7);
        assert!(close(v[0], 0.01, 1e-12));
        assert!(close(v[6], 1e4, 1e-12));
    }

    #[test]
    fn test_exponential_trend_hits_anchors() {
        let trend = ExponentialTrend::through(1957.0, 3650.0, 2026.0, 14.0).unwrap();
        assert!(close(trend.evaluate(1957.0), 3650.0, 1e-12));
        assert!(close(trend.evaluate(2026.0), 14.0, 1e-9));
        assert!(trend.k > 0.0);
        assert!(ExponentialTrend::through(1.0, 1.0, 1.0, 2.0).is_none());
    }

    #[test]
    fn test_moores_law_doubles_every_two_years() {
        let moore = DoublingTrend::moores_law();
        assert!(close(moore.evaluate(1965.0), 1e6, 1e-12));
        assert!(close(moore.evaluate(1967.0), 2e6, 1e-12));
        assert!(close(moore.evaluate(2005.0), 1e6 * 2f64.powi(20), 1e-12));
    }
}
