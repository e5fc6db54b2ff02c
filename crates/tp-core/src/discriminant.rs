//! Log-likelihood-ratio discriminants from a [`TagTriple`].
//!
//! Degenerate probabilities are not guarded: a zero denominator gives an
//! infinity and a zero or negative ratio gives `-inf` or NaN. Histograms
//! decide what to do with non-finite values.

use crate::types::TagTriple;

/// b-tagging against light jets: `ln(pb / pu)`.
#[inline]
pub fn anti_light(t: &TagTriple) -> f64 {
    (t.pb / t.pu).ln()
}

/// b-tagging against charm jets: `ln(pb / pc)`.
#[inline]
pub fn anti_charm(t: &TagTriple) -> f64 {
    (t.pb / t.pc).ln()
}

/// c-tagging against bottom jets: `ln(pc / pb)`.
#[inline]
pub fn ctag_anti_bottom(t: &TagTriple) -> f64 {
    (t.pc / t.pb).ln()
}

/// c-tagging against light jets: `ln(pc / pu)`.
#[inline]
pub fn ctag_anti_light(t: &TagTriple) -> f64 {
    (t.pc / t.pu).ln()
}

/// b-tagging against the geometric mean of charm and light: `ln(pb / sqrt(pc * pu))`.
#[inline]
pub fn gr1(t: &TagTriple) -> f64 {
    (t.pb / (t.pc * t.pu).sqrt()).ln()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn equal_probabilities_give_zero() {
        let t = TagTriple::new(1.0, 1.0, 1.0);
        assert_eq!(anti_light(&t), 0.0);
        assert_eq!(anti_charm(&t), 0.0);
        assert_eq!(ctag_anti_bottom(&t), 0.0);
        assert_eq!(ctag_anti_light(&t), 0.0);
        assert_eq!(gr1(&t), 0.0);
    }

    #[test]
    fn zero_probabilities_give_infinities() {
        assert_eq!(anti_light(&TagTriple::new(0.0, 1.0, 1.0)), f64::INFINITY);
        assert_eq!(anti_light(&TagTriple::new(1.0, 1.0, 0.0)), f64::NEG_INFINITY);
        assert_eq!(ctag_anti_bottom(&TagTriple::new(1.0, 1.0, 0.0)), f64::INFINITY);
        assert_eq!(gr1(&TagTriple::new(1.0, 0.0, 1.0)), f64::INFINITY);
        assert!(anti_charm(&TagTriple::new(1.0, 0.0, 0.0)).is_nan());
    }

    #[test]
    fn sentinel_triple_ratios() {
        // -999 / -999 is a valid ratio of 1
        let t = TagTriple::default();
        assert_eq!(anti_light(&t), 0.0);
        assert!(gr1(&t).is_nan());
    }

    #[test]
    fn ratios() {
        let t = TagTriple::new(0.1, 0.1, 0.8);
        assert_relative_eq!(anti_light(&t), 8.0f64.ln(), epsilon = 1e-12);
        assert_relative_eq!(anti_charm(&t), 8.0f64.ln(), epsilon = 1e-12);
        assert_relative_eq!(ctag_anti_bottom(&t), -(8.0f64.ln()), epsilon = 1e-12);
        assert_relative_eq!(ctag_anti_light(&t), 0.0, epsilon = 1e-12);
        assert_relative_eq!(gr1(&t), 8.0f64.ln(), epsilon = 1e-12);
    }
}
