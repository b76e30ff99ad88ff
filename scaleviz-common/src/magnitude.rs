//! Compute-magnitude normalization
//!
//! Converts the free-form compute strings found in the curated datasets
//! ("4e25 (Llama 3)", "1e24-1e25", ">1e26", "~few e23", "Speculative 1e27",
//! "Proxy, low") into one representative value for a log axis.
//!
//! # Resolution order
//!
//! Rules are evaluated in a fixed sequence and the first rule that produces
//! an outcome wins. Several rules can match the same text, so the order in
//! [`RULES`] is part of the contract:
//!
//! | # | Rule | Result |
//! |---|------|--------|
//! | 1 | empty or `N/A` | unknown |
//! | 2 | contains `Speculative` | first `MeX`, else `1e27` |
//! | 3 | contains `High compute` (or is exactly `Speculative`) | `1e21` |
//! | 4 | contains `Proxy` | first `MeX`, else `1e6` if "low", else `1e3` |
//! | 5 | `AeX-BeY` / `AeX–BeY` | geometric mean |
//! | 6 | starts with `>` | first `MeX` (falls through when absent) |
//! | 7 | contains `few` | `3 * 10^X` from the first `eX` |
//! | 8 | leading `~MeX` | value |
//! | 9 | `MeX` / `ME+X` anywhere | value |
//! | 10 | `~MeX+` anywhere | value |
//!
//! Anything else is unknown. The normalizer never fails: a string with no
//! usable magnitude resolves to `None` and the caller applies its own
//! placeholder.
//!
//! # Examples
//!
//! ```
//! use scaleviz_common::magnitude::normalize;
//!
//! assert_eq!(normalize("6.00E+17"), Some(6.0e17));
//! assert_eq!(normalize(">1e26"), Some(1e26));
//! assert_eq!(normalize("Proxy, low estimate"), Some(1e6));
//! assert_eq!(normalize("N/A"), None);
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use tracing::debug;

/// Value for a `Speculative` entry without an explicit magnitude
pub const SPECULATIVE_FALLBACK: f64 = 1e27;

/// Value for vague `High compute` entries
pub const HIGH_COMPUTE_FALLBACK: f64 = 1e21;

/// Value for `Proxy` entries described as low
pub const PROXY_LOW_FALLBACK: f64 = 1e6;

/// Value for any other `Proxy` entry without an explicit magnitude
pub const PROXY_FALLBACK: f64 = 1e3;

/// Mantissa multiplier for "few eX" order-of-magnitude estimates
pub const FEW_MULTIPLIER: u32 = 3;

/// Sentinel written in datasets for "no value"
pub const NOT_AVAILABLE: &str = "N/A";

static MANTISSA_EXPONENT: Lazy<Regex> = Lazy::new(|| compile(r"(?i)([0-9]+\.?[0-9]*)e([0-9]+)"));
static RANGE: Lazy<Regex> =
    Lazy::new(|| compile(r"(?i)([0-9]+\.?[0-9]*)e([0-9]+)[-–]([0-9]+\.?[0-9]*)e([0-9]+)"));
static FEW_EXPONENT: Lazy<Regex> = Lazy::new(|| compile(r"(?i)e([0-9]+)"));
static LEADING: Lazy<Regex> = Lazy::new(|| compile(r"^~?([0-9]+\.?[0-9]*)[eE]([0-9]+)"));
static SIGNED_EXPONENT: Lazy<Regex> = Lazy::new(|| compile(r"([0-9]+\.?[0-9]*)[eE]\+?([0-9]+)"));
static TRAILING_PLUS: Lazy<Regex> = Lazy::new(|| compile(r"(?i)~?([0-9]+\.?[0-9]*)e([0-9]+)\+?"));

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("magnitude pattern must compile")
}

/// The rule that settled a compute string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MagnitudeRule {
    /// Empty input or the `N/A` sentinel
    NotAvailable,
    /// `Speculative` qualifier
    Speculative,
    /// `High compute` qualifier
    HighCompute,
    /// `Proxy` qualifier
    Proxy,
    /// `AeX-BeY` interval
    Range,
    /// `>AeX` lower bound
    LowerBound,
    /// `few eX` order-of-magnitude estimate
    Few,
    /// `~MeX` at the start of the string
    Leading,
    /// `MeX` or `ME+X` anywhere
    Scientific,
    /// `~MeX+` anywhere
    Approximate,
}

impl MagnitudeRule {
    /// Short name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            MagnitudeRule::NotAvailable => "not-available",
            MagnitudeRule::Speculative => "speculative",
            MagnitudeRule::HighCompute => "high-compute",
            MagnitudeRule::Proxy => "proxy",
            MagnitudeRule::Range => "range",
            MagnitudeRule::LowerBound => "lower-bound",
            MagnitudeRule::Few => "few",
            MagnitudeRule::Leading => "leading",
            MagnitudeRule::Scientific => "scientific",
            MagnitudeRule::Approximate => "approximate",
        }
    }
}

impl fmt::Display for MagnitudeRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of running the rule cascade on one string
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    /// Representative magnitude, `None` when unknown
    pub value: Option<f64>,
    /// Rule that settled the outcome, `None` when no rule matched
    pub rule: Option<MagnitudeRule>,
}

/// Input as seen by a rule: the raw cell and its trimmed text
struct Literal<'a> {
    raw: &'a str,
    text: &'a str,
}

/// What a single rule decided
enum Outcome {
    Value(f64),
    Unknown,
    Continue,
}

type Evaluator = fn(&Literal<'_>) -> Outcome;

/// Rule cascade in evaluation order
const RULES: [(MagnitudeRule, Evaluator); 10] = [
    (MagnitudeRule::NotAvailable, not_available),
    (MagnitudeRule::Speculative, speculative),
    (MagnitudeRule::HighCompute, high_compute),
    (MagnitudeRule::Proxy, proxy),
    (MagnitudeRule::Range, range),
    (MagnitudeRule::LowerBound, lower_bound),
    (MagnitudeRule::Few, few),
    (MagnitudeRule::Leading, leading),
    (MagnitudeRule::Scientific, scientific),
    (MagnitudeRule::Approximate, approximate),
];

/// Rules in the order they are evaluated
pub fn rule_order() -> impl Iterator<Item = MagnitudeRule> {
    RULES.iter().map(|(rule, _)| *rule)
}

/// Normalize a compute string to a representative magnitude.
///
/// Returns a finite, strictly positive value or `None` for unknown.
pub fn normalize(raw: &str) -> Option<f64> {
    resolve(raw).value
}

/// Run the rule cascade and report which rule produced the outcome.
pub fn resolve(raw: &str) -> Resolution {
    let literal = Literal {
        raw,
        text: raw.trim(),
    };

    for (rule, evaluate) in RULES.iter() {
        match evaluate(&literal) {
            Outcome::Value(value) => {
                debug!("Compute value {:?} resolved by {} rule: {:e}", raw, rule, value);
                return Resolution {
                    value: Some(value),
                    rule: Some(*rule),
                };
            }
            Outcome::Unknown => {
                return Resolution {
                    value: None,
                    rule: Some(*rule),
                };
            }
            Outcome::Continue => {}
        }
    }

    debug!("Compute value {:?} has no recognizable magnitude", raw);
    Resolution {
        value: None,
        rule: None,
    }
}

/// Build `<mantissa>e<exponent>`, accepting only finite positive values
fn magnitude_from_parts(mantissa: &str, exponent: &str) -> Option<f64> {
    format!("{}e{}", mantissa, exponent)
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value > 0.0)
}

fn first_match(pattern: &Regex, text: &str) -> Option<f64> {
    let caps = pattern.captures(text)?;
    magnitude_from_parts(&caps[1], &caps[2])
}

fn matched_or_continue(value: Option<f64>) -> Outcome {
    match value {
        Some(value) => Outcome::Value(value),
        None => Outcome::Continue,
    }
}

fn not_available(literal: &Literal<'_>) -> Outcome {
    if literal.raw.is_empty() || literal.raw == NOT_AVAILABLE {
        Outcome::Unknown
    } else {
        Outcome::Continue
    }
}

fn speculative(literal: &Literal<'_>) -> Outcome {
    if !literal.text.contains("Speculative") {
        return Outcome::Continue;
    }
    Outcome::Value(first_match(&MANTISSA_EXPONENT, literal.text).unwrap_or(SPECULATIVE_FALLBACK))
}

fn high_compute(literal: &Literal<'_>) -> Outcome {
    // Exact "Speculative" is already settled by the previous rule
    if literal.text.contains("High compute") || literal.text == "Speculative" {
        Outcome::Value(HIGH_COMPUTE_FALLBACK)
    } else {
        Outcome::Continue
    }
}

fn proxy(literal: &Literal<'_>) -> Outcome {
    if !literal.text.contains("Proxy") {
        return Outcome::Continue;
    }
    if let Some(value) = first_match(&MANTISSA_EXPONENT, literal.text) {
        return Outcome::Value(value);
    }
    if literal.text.to_lowercase().contains("low") {
        Outcome::Value(PROXY_LOW_FALLBACK)
    } else {
        Outcome::Value(PROXY_FALLBACK)
    }
}

fn range(literal: &Literal<'_>) -> Outcome {
    let Some(caps) = RANGE.captures(literal.text) else {
        return Outcome::Continue;
    };
    let low = magnitude_from_parts(&caps[1], &caps[2]);
    let high = magnitude_from_parts(&caps[3], &caps[4]);
    match (low, high) {
        (Some(low), Some(high)) => matched_or_continue(Some(geometric_mean(low, high))),
        _ => Outcome::Continue,
    }
}

/// Log-scale center of an interval
fn geometric_mean(low: f64, high: f64) -> f64 {
    let product = low * high;
    if product.is_finite() {
        product.sqrt()
    } else {
        low.sqrt() * high.sqrt()
    }
}

fn lower_bound(literal: &Literal<'_>) -> Outcome {
    if !literal.text.starts_with('>') {
        return Outcome::Continue;
    }
    // No fallback: without a magnitude the later rules still get a look
    matched_or_continue(first_match(&MANTISSA_EXPONENT, literal.text))
}

fn few(literal: &Literal<'_>) -> Outcome {
    if !literal.text.to_lowercase().contains("few") {
        return Outcome::Continue;
    }
    let value = FEW_EXPONENT
        .captures(literal.text)
        .and_then(|caps| magnitude_from_parts(&FEW_MULTIPLIER.to_string(), &caps[1]));
    matched_or_continue(value)
}

fn leading(literal: &Literal<'_>) -> Outcome {
    matched_or_continue(first_match(&LEADING, literal.text))
}

fn scientific(literal: &Literal<'_>) -> Outcome {
    matched_or_continue(first_match(&SIGNED_EXPONENT, literal.text))
}

fn approximate(literal: &Literal<'_>) -> Outcome {
    matched_or_continue(first_match(&TRAILING_PLUS, literal.text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn assert_close(actual: Option<f64>, expected: f64) {
        let actual = actual.unwrap_or_else(|| panic!("expected {:e}, got unknown", expected));
        let tolerance = expected.abs() * 1e-12;
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {:e}, got {:e}",
            expected,
            actual
        );
    }

    #[test]
    fn test_sentinels_are_unknown() {
        assert_eq!(normalize("N/A"), None);
        assert_eq!(normalize(""), None);
        assert_eq!(resolve("N/A").rule, Some(MagnitudeRule::NotAvailable));
    }

    #[test]
    fn test_whitespace_only_is_unknown() {
        let resolution = resolve("   ");
        assert_eq!(resolution.value, None);
        assert_eq!(resolution.rule, None);
    }

    #[test]
    fn test_bare_scientific() {
        assert_eq!(normalize("6.00E+17"), Some(6.0e17));
        assert_eq!(normalize("3.14E+23"), Some(3.14e23));
        assert_eq!(resolve("6.00E+17").rule, Some(MagnitudeRule::Scientific));
    }

    #[test]
    fn test_range_uses_geometric_mean() {
        assert_close(normalize("1e24-1e25"), (1e24_f64 * 1e25).sqrt());
        assert_close(normalize("1e24-1e25"), 3.1622776601683795e24);
        assert_close(normalize("~1e17–1e18"), (1e17_f64 * 1e18).sqrt());
        assert_eq!(resolve("2E20-8E20").rule, Some(MagnitudeRule::Range));
    }

    #[test]
    fn test_range_with_interior_spaces_is_not_a_range() {
        // Falls through to the first standalone magnitude
        let resolution = resolve("1e24 - 1e25");
        assert_eq!(resolution.rule, Some(MagnitudeRule::Leading));
        assert_eq!(resolution.value, Some(1e24));
    }

    #[test]
    fn test_range_overflow_stays_finite() {
        let value = normalize("1e200-1e300").expect("range resolves");
        assert!(value.is_finite());
        assert_close(Some(value), 1e250);
    }

    #[test]
    fn test_lower_bound() {
        assert_eq!(normalize(">1e26"), Some(1e26));
        assert_eq!(resolve(">1e26").rule, Some(MagnitudeRule::LowerBound));
    }

    #[test]
    fn test_lower_bound_falls_through_without_magnitude() {
        let resolution = resolve(">few e23");
        assert_eq!(resolution.rule, Some(MagnitudeRule::Few));
        assert_eq!(resolution.value, Some(3e23));

        assert_eq!(normalize(">unknown"), None);
        assert_eq!(normalize(">"), None);
    }

    #[test]
    fn test_few_estimate() {
        assert_eq!(normalize("~few e23"), Some(3e23));
        assert_eq!(normalize("A FEW E20"), Some(3e20));
        assert_eq!(normalize("few"), None);
    }

    #[test]
    fn test_speculative() {
        assert_eq!(normalize("Speculative"), Some(SPECULATIVE_FALLBACK));
        assert_eq!(normalize("Speculative, ~1e28"), Some(1e28));
        assert_eq!(normalize("Speculative 5E26"), Some(5e26));
        // Case-sensitive qualifier
        assert_eq!(normalize("speculative"), None);
    }

    #[test]
    fn test_high_compute() {
        assert_eq!(normalize("High compute"), Some(HIGH_COMPUTE_FALLBACK));
        assert_eq!(normalize("High compute (1e30)"), Some(HIGH_COMPUTE_FALLBACK));
    }

    #[test]
    fn test_speculative_outranks_high_compute() {
        let resolution = resolve("Speculative High compute");
        assert_eq!(resolution.rule, Some(MagnitudeRule::Speculative));
        assert_eq!(resolution.value, Some(SPECULATIVE_FALLBACK));
    }

    #[test]
    fn test_proxy() {
        assert_eq!(normalize("Proxy"), Some(PROXY_FALLBACK));
        assert_eq!(normalize("Proxy, low estimate"), Some(PROXY_LOW_FALLBACK));
        assert_eq!(normalize("Proxy (LOW)"), Some(PROXY_LOW_FALLBACK));
        assert_eq!(normalize("Proxy ~2e15 ops"), Some(2e15));
    }

    #[test]
    fn test_trailing_annotation_ignored() {
        assert_eq!(normalize("4e25 (Llama 3.1 est.)"), Some(4e25));
        assert_eq!(resolve("4e25 (Llama 3.1 est.)").rule, Some(MagnitudeRule::Leading));
        assert_eq!(normalize("~1e20+"), Some(1e20));
        assert_eq!(normalize("  2.1e25  "), Some(2.1e25));
    }

    #[test]
    fn test_embedded_magnitude() {
        assert_eq!(normalize("est. 1.2e24 FLOPs"), Some(1.2e24));
        assert_eq!(resolve("est. 1.2e24 FLOPs").rule, Some(MagnitudeRule::Scientific));
    }

    #[test]
    fn test_trailing_dot_mantissa() {
        assert_eq!(normalize("5.e10"), Some(5e10));
    }

    #[test]
    fn test_degenerate_magnitudes_rejected() {
        assert_eq!(normalize("0e5"), None);
        assert_eq!(normalize("1e400"), None);
        assert_eq!(normalize("Speculative 0e5"), Some(SPECULATIVE_FALLBACK));
        assert_eq!(normalize("few e999"), None);
    }

    #[test]
    fn test_non_ascii_digits_ignored() {
        assert_eq!(normalize("١e٥"), None);
    }

    #[test]
    fn test_rule_order() {
        let order: Vec<MagnitudeRule> = rule_order().collect();
        assert_eq!(
            order,
            vec![
                MagnitudeRule::NotAvailable,
                MagnitudeRule::Speculative,
                MagnitudeRule::HighCompute,
                MagnitudeRule::Proxy,
                MagnitudeRule::Range,
                MagnitudeRule::LowerBound,
                MagnitudeRule::Few,
                MagnitudeRule::Leading,
                MagnitudeRule::Scientific,
                MagnitudeRule::Approximate,
            ]
        );
    }

    #[test]
    fn test_repeated_calls_agree() {
        for input in ["1e24-1e25", "Proxy", "~few e23", "garbage", "N/A", ">1e26"] {
            assert_eq!(normalize(input), normalize(input), "drift for {:?}", input);
        }
    }

    #[test]
    fn test_adversarial_near_matches() {
        for input in [
            "eee", "1e", "-e5", "e5", "e", "~", "~e", ">", ">>1e", "1e-5", "--", "–", "1e5-", "-1e5",
            "1.2.3e4", "few", "Proxy", "Speculative", "1e5–", "...e...", "+e+", "1E", "E1",
        ] {
            if let Some(value) = normalize(input) {
                assert!(value.is_finite() && value > 0.0, "{:?} -> {}", input, value);
            }
        }
    }

    #[test]
    fn test_random_ascii_is_total() {
        const ALPHABET: &[u8] = b"0123456789eE.+-~> ,()NAPxyzfewlowSpeculativeHigh compute";
        let mut rng = StdRng::seed_from_u64(0x5ca1e);

        for _ in 0..1000 {
            let len = rng.gen_range(0..24);
            let input: String = (0..len)
                .map(|_| {
                    if rng.gen_bool(0.8) {
                        ALPHABET[rng.gen_range(0..ALPHABET.len())] as char
                    } else {
                        rng.gen_range(0x20u8..0x7f) as char
                    }
                })
                .collect();

            let first = normalize(&input);
            if let Some(value) = first {
                assert!(value.is_finite() && value > 0.0, "{:?} -> {}", input, value);
            }
            assert_eq!(first, normalize(&input), "drift for {:?}", input);
        }
    }
}
