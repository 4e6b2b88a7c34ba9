//! Property-test run profile.
//!
//! Suites read their case count and fork mode from the environment so CI can
//! run long soak jobs while local runs stay quick.

use std::env;

/// Environment variable overriding the number of cases per property.
pub const CASES_ENV_KEY: &str = "PERCOLATION_PBT_CASES";
/// Environment variable enabling forked proptest execution.
pub const FORK_ENV_KEY: &str = "PERCOLATION_PBT_FORK";

/// Runtime profile for property-test execution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProptestRunProfile {
    cases: u32,
    fork: bool,
}

impl ProptestRunProfile {
    /// Loads a profile, falling back to the given defaults when a variable is
    /// unset or malformed.
    ///
    /// # Examples
    ///
    /// ```
    /// use percolation_test_support::ci::property_test_profile::ProptestRunProfile;
    ///
    /// let profile = ProptestRunProfile::load(64, false);
    /// assert!(profile.cases() > 0);
    /// ```
    #[must_use]
    pub fn load(default_cases: u32, default_fork: bool) -> Self {
        Self {
            cases: from_env(CASES_ENV_KEY, default_cases, parse_cases),
            fork: from_env(FORK_ENV_KEY, default_fork, parse_flag),
        }
    }

    /// Number of cases to run per property.
    #[must_use]
    pub fn cases(&self) -> u32 {
        self.cases
    }

    /// Whether to run cases in forked subprocesses.
    #[must_use]
    pub fn fork(&self) -> bool {
        self.fork
    }
}

fn from_env<T: Copy>(key: &'static str, default: T, parse: fn(&str) -> Option<T>) -> T {
    let Ok(raw) = env::var(key) else {
        return default;
    };
    parse(&raw).unwrap_or_else(|| {
        ::tracing::warn!(env = key, raw = %raw, "ignoring invalid property-test override");
        default
    })
}

fn parse_cases(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok().filter(|cases| *cases > 0)
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    // Parsers are tested directly; mutating the process environment would
    // race with other tests in the same binary.

    #[rstest]
    #[case("1", Some(1))]
    #[case(" 250 ", Some(250))]
    #[case("25000", Some(25_000))]
    #[case("0", None)]
    #[case("-1", None)]
    #[case("abc", None)]
    fn parses_case_counts(#[case] raw: &str, #[case] expected: Option<u32>) {
        assert_eq!(parse_cases(raw), expected);
    }

    #[rstest]
    #[case("true", Some(true))]
    #[case("ON", Some(true))]
    #[case("1", Some(true))]
    #[case("no", Some(false))]
    #[case("FALSE", Some(false))]
    #[case("0", Some(false))]
    #[case("", None)]
    #[case("maybe", None)]
    fn parses_fork_flags(#[case] raw: &str, #[case] expected: Option<bool>) {
        assert_eq!(parse_flag(raw), expected);
    }

    #[test]
    fn unset_variables_fall_back_to_defaults() {
        assert_eq!(from_env("PERCOLATION_PBT_DEFINITELY_UNSET", 17, parse_cases), 17);
    }
}
