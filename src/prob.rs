///
/// probability calculation in log space
///
use approx::AbsDiffEq;
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::str::FromStr;

///
/// log representation of `p == 0`.
///
/// A finite sentinel instead of IEEE `-inf`, so that max/sum over a
/// Viterbi column stays NaN-free and totally ordered.
///
pub const LOG_ZERO: f64 = -1.0e9;

///
/// Wrapper of f64 that represents probability `0 <= p <= 1`
/// stored as its natural log
///
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, SerializeDisplay, DeserializeFromStr)]
pub struct Prob(f64);

///
/// short-hand of `Prob::from_prob`
///
pub fn p(p: f64) -> Prob {
    Prob::from_prob(p)
}

///
/// short-hand of `Prob::from_log_prob`
///
pub fn lp(lp: f64) -> Prob {
    Prob::from_log_prob(lp)
}

impl Prob {
    ///
    ///
    pub fn from_prob(value: f64) -> Prob {
        if value == 0.0 {
            Prob::zero()
        } else {
            Prob(value.ln())
        }
    }
    ///
    ///
    pub fn from_log_prob(log_value: f64) -> Prob {
        if log_value <= LOG_ZERO {
            Prob::zero()
        } else {
            Prob(log_value)
        }
    }
    ///
    /// Get the probability (in `[0, 1]`)
    pub fn to_value(self) -> f64 {
        if self.is_zero() {
            0.0
        } else {
            self.0.exp()
        }
    }
    ///
    /// Get the log probability
    pub fn to_log_value(self) -> f64 {
        self.0
    }
    ///
    /// Is `p == 0` or not? (log p at the sentinel)
    ///
    pub fn is_zero(self) -> bool {
        self.0 <= LOG_ZERO
    }
    ///
    /// Is `p == 1`? (log p = 0)
    ///
    pub fn is_one(self) -> bool {
        self.0 == 0.0
    }
    ///
    /// prob=0.0
    ///
    pub fn zero() -> Prob {
        Prob(LOG_ZERO)
    }
    ///
    /// prob=1.0
    ///
    pub fn one() -> Prob {
        Prob(0.0)
    }
}

/// p=0 (the log sentinel) as a default value
impl Default for Prob {
    fn default() -> Self {
        Prob::zero()
    }
}

// display
impl std::fmt::Display for Prob {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}({:.4})", self.0, self.to_value())
    }
}
impl FromStr for Prob {
    type Err = std::num::ParseFloatError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let front = match s.split_once('(') {
            Some((front, _)) => front,
            None => s,
        };
        front.parse::<f64>().map(Prob::from_log_prob)
    }
}

/// Multiplication of two probabilities `px * py` in log space
///
/// ```text
/// log(px * py) = log(px) + log(py)
/// ```
///
/// Saturates at the sentinel: anything times `p=0` is `p=0`, so the
/// accumulated log value never drifts below `LOG_ZERO`.
impl std::ops::Mul for Prob {
    type Output = Self;
    fn mul(self, other: Self) -> Self {
        if self.is_zero() || other.is_zero() {
            Prob::zero()
        } else {
            Prob(self.0 + other.0)
        }
    }
}

impl std::ops::MulAssign for Prob {
    fn mul_assign(&mut self, other: Self) {
        *self = *self * other;
    }
}

impl std::iter::Product for Prob {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Prob::one(), |a, b| a * b)
    }
}

impl<'a> std::iter::Product<&'a Self> for Prob {
    fn product<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.fold(Prob::one(), |a, b| a * *b)
    }
}

/// for approx `assert_abs_diff_eq`
impl AbsDiffEq for Prob {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        f64::abs_diff_eq(&self.0, &other.0, epsilon)
    }
}

impl Eq for Prob {}
impl Ord for Prob {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // log values are finite (the sentinel included), so no NaN
        self.partial_cmp(other).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prod() {
        let xs = vec![
            Prob::from_prob(0.1),
            Prob::from_prob(0.1),
            Prob::from_prob(0.1),
        ];
        let x: Prob = xs.iter().product();
        let y = Prob::from_prob(0.001);
        assert_relative_eq!(x.to_value(), y.to_value());
    }
    #[test]
    fn prob_mul() {
        assert_eq!(p(0.0) * p(1.0), p(0.0));
        assert_abs_diff_eq!((p(0.3) * p(0.3)).0, p(0.09).0);
        assert_abs_diff_eq!((p(0.5) * p(0.00001)).0, p(0.000005).0);
    }
    #[test]
    fn prob_prod_empty_and_zero() {
        // prod of zero element vec
        let xs: Vec<Prob> = vec![];
        let product: Prob = xs.iter().product();
        assert_eq!(product, p(1.0));

        // prod of vec of p=0
        let xs: Vec<Prob> = vec![p(0.0), p(0.0)];
        let product: Prob = xs.iter().product();
        assert_eq!(product, p(0.0));
    }
    #[test]
    fn test_zero() {
        let zero = Prob::from_prob(0.0);
        println!("{:?}", zero);
        assert!(zero.is_zero());
        let nonzero = Prob::from_prob(0.00001);
        assert!(!nonzero.is_zero());
    }
    #[test]
    fn zero_sentinel_is_finite() {
        let zero = Prob::zero();
        assert!(zero.to_log_value().is_finite());
        assert_eq!(zero.to_value(), 0.0);
        // multiplying zeros saturates instead of drifting further down
        let z2 = zero * zero;
        assert_eq!(z2.to_log_value(), LOG_ZERO);
        // and stays comparable with everything
        assert!(zero < p(1e-300));
    }
    #[test]
    fn test_prob_assign() {
        let mut x = p(0.4);
        let z = p(0.5);
        x *= z;
        assert_abs_diff_eq!(x, p(0.2));
        let o = p(1.0);
        x *= o;
        assert_abs_diff_eq!(x, p(0.2));
        let z = p(0.0);
        x *= z;
        assert!(x.is_zero());
    }
    #[test]
    fn prob_sort() {
        // Sort by Ord and Eq
        let mut ps = vec![p(0.9), p(0.2), p(0.5), p(0.1), p(1.0), p(0.0)];
        ps.sort();
        println!("{:?}", ps);
        assert_eq!(ps[0], p(0.0));
        assert_eq!(ps[1], p(0.1));
        assert_eq!(ps[2], p(0.2));
        assert_eq!(ps[3], p(0.5));
        assert_eq!(ps[4], p(0.9));
        assert_eq!(ps[5], p(1.0));
    }
    #[test]
    fn prob_max_min() {
        let ps = vec![p(0.9), p(0.2), p(0.5), p(0.1), p(1.0), p(0.0)];
        let max = ps.iter().max().unwrap();
        assert_eq!(*max, p(1.0));
        let min = ps.iter().min().unwrap();
        assert_eq!(*min, p(0.0));

        assert!(p(0.1) > p(0.09999));
        assert!(p(0.1) < p(0.100001));
        assert!(p(0.0) < p(0.01));
        assert!(p(1.0) > p(0.01));
    }
    #[test]
    fn prob_assert_eq() {
        assert!(abs_diff_eq!(p(0.1), p(0.1)));
        assert!(!abs_diff_eq!(p(0.1), p(0.2)));
        assert!(!abs_diff_eq!(p(0.1), p(0.11)));
        assert!(abs_diff_eq!(p(0.1), p(0.11), epsilon = 0.1));
        assert!(abs_diff_eq!(p(1.0), p(1.0)));
        assert!(abs_diff_eq!(p(0.0), p(0.0)));
    }
    #[test]
    fn prob_zero_one() {
        assert_eq!(Prob::one(), Prob::from_prob(1.0));
        assert_eq!(Prob::zero(), Prob::from_prob(0.0));
        assert!(Prob::zero().is_zero());
        assert!(Prob::one().is_one());
    }
    #[test]
    fn prob_serialize() {
        // Display and FromStr
        let p1 = Prob::one();
        let p05 = Prob::from_prob(0.5);
        let p0 = Prob::zero();
        println!("{} {} {}", p1, p05, p0);
        assert_eq!(Prob::from_str(&p1.to_string()).unwrap(), p1);
        assert_eq!(Prob::from_str(&p05.to_string()).unwrap(), p05);
        assert_eq!(Prob::from_str(&p0.to_string()).unwrap(), p0);

        let f = |p: Prob| {
            let json = &serde_json::to_string(&p).unwrap();
            println!("p={} json={}", p, json);
            serde_json::from_str(&json).unwrap()
        };
        assert_eq!(p1, f(p1));
        assert_eq!(p05, f(p05));
        assert_eq!(p0, f(p0));
    }
}
