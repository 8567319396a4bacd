//! Environment defaults for the pipeline configuration
//!
//! - `EDGE_OPERATOR`: sobel | prewitt | roberts (default sobel)
//! - `EDGE_THRESHOLD`: integer cutoff; unset or outside 0..=255 disables it
//! - `EDGE_PARALLEL`: 0 | 1 (default 0)

use std::sync::OnceLock;

use log::warn;

use crate::filters::Operator;
use crate::utils::binarization::Threshold;

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().map(|v| v.trim().to_string())
}

fn parse_operator(value: Option<&str>, default: Operator) -> Operator {
    match value {
        Some(v) => v.parse().unwrap_or_else(|err| {
            warn!("{err}, using {default}");
            default
        }),
        None => default,
    }
}

fn parse_threshold(value: Option<&str>) -> Threshold {
    value
        .and_then(|v| v.parse::<i32>().ok())
        .map(Threshold::from_raw)
        .unwrap_or_default()
}

fn parse_bool_u8(value: Option<&str>, default: bool) -> bool {
    value
        .and_then(|v| v.parse::<u8>().ok())
        .map(|v| v != 0)
        .unwrap_or(default)
}

static DEFAULT_OPERATOR: OnceLock<Operator> = OnceLock::new();

pub(crate) fn default_operator() -> Operator {
    *DEFAULT_OPERATOR
        .get_or_init(|| parse_operator(env_value("EDGE_OPERATOR").as_deref(), Operator::Sobel))
}

static DEFAULT_THRESHOLD: OnceLock<Threshold> = OnceLock::new();

pub(crate) fn default_threshold() -> Threshold {
    *DEFAULT_THRESHOLD.get_or_init(|| parse_threshold(env_value("EDGE_THRESHOLD").as_deref()))
}

static PARALLEL: OnceLock<bool> = OnceLock::new();

pub(crate) fn parallel_enabled() -> bool {
    *PARALLEL.get_or_init(|| parse_bool_u8(env_value("EDGE_PARALLEL").as_deref(), false))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_operator() {
        assert_eq!(parse_operator(None, Operator::Sobel), Operator::Sobel);
        assert_eq!(parse_operator(Some("roberts"), Operator::Sobel), Operator::Roberts);
        assert_eq!(parse_operator(Some("laplace"), Operator::Prewitt), Operator::Prewitt);
    }

    #[test]
    fn test_parse_threshold() {
        assert_eq!(parse_threshold(None), Threshold::unset());
        assert_eq!(parse_threshold(Some("120")), Threshold::new(120));
        assert_eq!(parse_threshold(Some("300")), Threshold::unset());
        assert_eq!(parse_threshold(Some("-4")), Threshold::unset());
        assert_eq!(parse_threshold(Some("abc")), Threshold::unset());
    }

    #[test]
    fn test_parse_bool() {
        assert!(!parse_bool_u8(None, false));
        assert!(parse_bool_u8(Some("1"), false));
        assert!(!parse_bool_u8(Some("0"), true));
        assert!(parse_bool_u8(Some("yes"), true));
    }
}
