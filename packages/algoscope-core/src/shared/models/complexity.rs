//! Closed complexity-expression vocabulary
//!
//! Every cost the analysis produces is one coefficient-free growth class.
//! Classes are totally ordered by their growth key
//! `(exponential base, polynomial degree, log power, log log)`, compared
//! lexicographically, so `dominant` is a plain `max` and the slower of two
//! classes is `Ord::min`.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

const SNAP_EPS: f64 = 1e-9;

/// Asymptotic growth class of a cost
///
/// Construct through the normalising constructors (`polynomial`, `poly_log`,
/// `exponential`) so that equal growth always has one representation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ComplexityExpr {
    /// 1
    Constant,
    /// log log n
    LogLog,
    /// log n
    Logarithmic,
    /// n
    Linear,
    /// n^degree
    Polynomial { degree: f64 },
    /// n^degree · log^log_power n
    PolyLog { degree: f64, log_power: u32 },
    /// n^degree · base^n
    Exponential { base: f64, degree: f64 },
}

/// Growth key; comparison is lexicographic over the fields in order
#[derive(Debug, Clone, Copy)]
struct GrowthKey {
    base: f64,
    degree: f64,
    log_power: u32,
    loglog: u32,
}

impl GrowthKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.base
            .total_cmp(&other.base)
            .then(self.degree.total_cmp(&other.degree))
            .then(self.log_power.cmp(&other.log_power))
            .then(self.loglog.cmp(&other.loglog))
    }
}

fn clean_degree(d: f64) -> f64 {
    if !d.is_finite() || d <= SNAP_EPS {
        return 0.0;
    }
    if (d - d.round()).abs() < SNAP_EPS {
        d.round()
    } else {
        d
    }
}

fn clean_base(b: f64) -> f64 {
    if b.is_finite() && b > 1.0 + SNAP_EPS {
        clean_degree(b)
    } else {
        1.0
    }
}

impl ComplexityExpr {
    pub fn polynomial(degree: f64) -> Self {
        Self::poly_log(degree, 0)
    }

    pub fn poly_log(degree: f64, log_power: u32) -> Self {
        Self::from_key(GrowthKey {
            base: 1.0,
            degree,
            log_power,
            loglog: 0,
        })
    }

    pub fn exponential(base: f64, degree: f64) -> Self {
        Self::from_key(GrowthKey {
            base,
            degree,
            log_power: 0,
            loglog: 0,
        })
    }

    /// n log n
    pub fn linearithmic() -> Self {
        Self::poly_log(1.0, 1)
    }

    fn key(&self) -> GrowthKey {
        let (base, degree, log_power, loglog) = match *self {
            Self::Constant => (1.0, 0.0, 0, 0),
            Self::LogLog => (1.0, 0.0, 0, 1),
            Self::Logarithmic => (1.0, 0.0, 1, 0),
            Self::Linear => (1.0, 1.0, 0, 0),
            Self::Polynomial { degree } => (1.0, degree, 0, 0),
            Self::PolyLog { degree, log_power } => (1.0, degree, log_power, 0),
            Self::Exponential { base, degree } => (base, degree, 0, 0),
        };
        GrowthKey {
            base: clean_base(base),
            degree: clean_degree(degree),
            log_power,
            loglog,
        }
    }

    fn from_key(key: GrowthKey) -> Self {
        let base = clean_base(key.base);
        let degree = clean_degree(key.degree);

        if base > 1.0 {
            // Logarithmic factors vanish next to an exponential term
            return Self::Exponential { base, degree };
        }

        match (degree == 0.0, key.log_power) {
            (true, 0) if key.loglog > 0 => Self::LogLog,
            (true, 0) => Self::Constant,
            (true, 1) => Self::Logarithmic,
            (false, 0) if degree == 1.0 => Self::Linear,
            (false, 0) => Self::Polynomial { degree },
            (_, log_power) => Self::PolyLog { degree, log_power },
        }
    }

    /// Product of two growth classes
    ///
    /// A log log n factor multiplied into any non-constant class is widened
    /// to log n.
    pub fn times(&self, other: &Self) -> Self {
        let (a, b) = (self.key(), other.key());
        let mut key = GrowthKey {
            base: a.base * b.base,
            degree: a.degree + b.degree,
            log_power: a.log_power + b.log_power,
            loglog: a.loglog + b.loglog,
        };

        let rest_is_constant = key.base <= 1.0 && key.degree == 0.0 && key.log_power == 0;
        if key.loglog > 1 || (key.loglog > 0 && !rest_is_constant) {
            key.log_power += 1;
            key.loglog = 0;
        }
        Self::from_key(key)
    }

    /// `self` raised to a constant power
    ///
    /// Computed on the growth key directly, so the exponent's size does not
    /// affect running time.
    pub fn pow(&self, exponent: u32) -> Self {
        if exponent == 0 {
            return Self::Constant;
        }
        let a = self.key();
        let k = f64::from(exponent);
        let mut key = GrowthKey {
            base: a.base.powf(k).min(f64::MAX),
            degree: a.degree * k,
            log_power: a.log_power.saturating_mul(exponent),
            loglog: a.loglog.saturating_mul(exponent),
        };

        let rest_is_constant = key.base <= 1.0 && key.degree == 0.0 && key.log_power == 0;
        if key.loglog > 1 || (key.loglog > 0 && !rest_is_constant) {
            key.log_power = key.log_power.saturating_add(1);
            key.loglog = 0;
        }
        Self::from_key(key)
    }

    /// The faster-growing of the two
    pub fn dominant(&self, other: &Self) -> Self {
        if self >= other {
            *self
        } else {
            *other
        }
    }

    /// Cost of running the given pieces one after another
    pub fn sum_sequential<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        items
            .into_iter()
            .fold(Self::Constant, |acc, item| acc.dominant(&item))
    }

    pub fn degree(&self) -> f64 {
        self.key().degree
    }

    pub fn log_power(&self) -> u32 {
        self.key().log_power
    }

    pub fn is_constant(&self) -> bool {
        matches!(self.normalized(), Self::Constant)
    }

    /// log n or a power of it, with no polynomial factor
    pub fn is_logarithmic(&self) -> bool {
        let k = self.key();
        k.base <= 1.0 && k.degree == 0.0 && k.log_power > 0
    }

    /// n log n
    pub fn is_linearithmic(&self) -> bool {
        let k = self.key();
        k.base <= 1.0 && k.degree == 1.0 && k.log_power == 1
    }

    pub fn is_exponential(&self) -> bool {
        self.key().base > 1.0
    }

    pub fn normalized(&self) -> Self {
        Self::from_key(self.key())
    }

    /// Display label without the bound symbol (`n log n`, `2^n`, ...)
    pub fn label(&self) -> String {
        match self.normalized() {
            Self::Constant => "1".to_string(),
            Self::LogLog => "log log n".to_string(),
            Self::Logarithmic => "log n".to_string(),
            Self::Linear => "n".to_string(),
            Self::Polynomial { degree } => power_of_n(degree),
            Self::PolyLog { degree, log_power } => {
                let logs = if log_power == 1 {
                    "log n".to_string()
                } else {
                    format!("log^{} n", log_power)
                };
                if degree == 0.0 {
                    logs
                } else {
                    format!("{} {}", power_of_n(degree), logs)
                }
            }
            Self::Exponential { base, degree } => {
                let exp = format!("{}^n", format_number(base));
                if degree == 0.0 {
                    exp
                } else {
                    format!("{} {}", power_of_n(degree), exp)
                }
            }
        }
    }

    pub fn big_o(&self) -> String {
        format!("O({})", self.label())
    }

    pub fn omega(&self) -> String {
        format!("Ω({})", self.label())
    }

    pub fn theta(&self) -> String {
        format!("Θ({})", self.label())
    }
}

fn format_number(x: f64) -> String {
    if x.fract() == 0.0 {
        format!("{}", x as i64)
    } else {
        let s = format!("{:.2}", x);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

fn power_of_n(degree: f64) -> String {
    if degree == 1.0 {
        "n".to_string()
    } else {
        format!("n^{}", format_number(degree))
    }
}

impl Default for ComplexityExpr {
    fn default() -> Self {
        Self::Constant
    }
}

impl PartialEq for ComplexityExpr {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ComplexityExpr {}

impl PartialOrd for ComplexityExpr {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ComplexityExpr {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl fmt::Display for ComplexityExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
