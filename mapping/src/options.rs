//! Option flags controlling which optional axiom families are emitted.
//!
//! The vocabulary is fixed:
//!
//! | Flag | Effect |
//! |------|--------|
//! | `owl2` | OWL 2 axioms: property chains, asymmetric and irreflexive relations |
//! | `relations` | Relational attribute axioms (symmetric, asymmetric, irreflexive) |
//! | `no-patches` | Suppress grid cells and all spatial assertions |
//! | `none` | Explicitly no options; may not be combined with any other flag |

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// The sentinel flag meaning "no options".
pub const NO_OPTIONS: &str = "none";

/// A single option flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OptionFlag {
    /// Include OWL 2 assertions such as property chains.
    Owl2,
    /// Include relational attribute assertions.
    Relations,
    /// Suppress spatial assertions and grid cells.
    NoPatches,
}

impl OptionFlag {
    /// Every non-sentinel flag, in vocabulary order.
    pub const ALL: [OptionFlag; 3] = [OptionFlag::Owl2, OptionFlag::Relations, OptionFlag::NoPatches];

    /// Returns the flag's name as written in session files and commands.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            OptionFlag::Owl2 => "owl2",
            OptionFlag::Relations => "relations",
            OptionFlag::NoPatches => "no-patches",
        }
    }
}

impl fmt::Display for OptionFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptionFlag {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OptionFlag::ALL
            .into_iter()
            .find(|flag| flag.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownOption {
                option: s.to_owned(),
                valid: valid_options(),
            })
    }
}

fn valid_options() -> String {
    OptionFlag::ALL
        .iter()
        .map(|flag| flag.as_str())
        .chain(std::iter::once(NO_OPTIONS))
        .collect::<Vec<_>>()
        .join(", ")
}

/// A validated set of option flags. The default is the empty set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionSet {
    flags: BTreeSet<OptionFlag>,
}

impl OptionSet {
    /// Parses a complete option configuration.
    ///
    /// An empty sequence and the single sentinel `none` both yield the empty
    /// set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownOption`] for a flag outside the
    /// vocabulary, [`ConfigError::DuplicateOption`] for a repeated flag, and
    /// [`ConfigError::NoneWithOthers`] when `none` is combined with any other
    /// flag.
    pub fn parse<I, S>(flags: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen: BTreeSet<String> = BTreeSet::new();
        let mut set = OptionSet::default();
        for raw in flags {
            let raw = raw.as_ref();
            let flag = if raw == NO_OPTIONS {
                None
            } else {
                Some(raw.parse::<OptionFlag>()?)
            };
            if !seen.insert(raw.to_owned()) {
                return Err(ConfigError::DuplicateOption(raw.to_owned()));
            }
            if let Some(flag) = flag {
                set.flags.insert(flag);
            }
        }
        if seen.contains(NO_OPTIONS) && seen.len() > 1 {
            return Err(ConfigError::NoneWithOthers);
        }
        Ok(set)
    }

    /// Returns true if `flag` is set.
    #[must_use]
    pub fn has(&self, flag: OptionFlag) -> bool {
        self.flags.contains(&flag)
    }

    /// Returns true if no options are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Iterates over the set flags in vocabulary order.
    pub fn iter(&self) -> impl Iterator<Item = OptionFlag> + '_ {
        self.flags.iter().copied()
    }
}

impl fmt::Display for OptionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.flags.is_empty() {
            return f.write_str(NO_OPTIONS);
        }
        let names: Vec<&str> = self.iter().map(OptionFlag::as_str).collect();
        f.write_str(&names.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_configuration_means_no_options() {
        let set = OptionSet::parse(Vec::<String>::new()).unwrap();
        assert!(set.is_empty());
        assert_eq!(set.to_string(), "none");
    }

    #[test]
    fn sentinel_alone_is_accepted() {
        let set = OptionSet::parse(["none"]).unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn sentinel_with_other_flag_is_rejected() {
        assert_eq!(
            OptionSet::parse(["owl2", "none"]),
            Err(ConfigError::NoneWithOthers)
        );
        assert_eq!(
            OptionSet::parse(["none", "relations"]),
            Err(ConfigError::NoneWithOthers)
        );
    }

    #[test]
    fn duplicate_flags_are_rejected() {
        assert_eq!(
            OptionSet::parse(["owl2", "relations", "owl2"]),
            Err(ConfigError::DuplicateOption("owl2".to_owned()))
        );
        assert_eq!(
            OptionSet::parse(["none", "none"]),
            Err(ConfigError::DuplicateOption("none".to_owned()))
        );
    }

    #[test]
    fn unknown_flag_lists_the_vocabulary() {
        let err = OptionSet::parse(["owl3"]).unwrap_err();
        match err {
            ConfigError::UnknownOption { option, valid } => {
                assert_eq!(option, "owl3");
                assert_eq!(valid, "owl2, relations, no-patches, none");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn has_reports_set_flags() {
        let set = OptionSet::parse(["relations", "no-patches"]).unwrap();
        assert!(set.has(OptionFlag::Relations));
        assert!(set.has(OptionFlag::NoPatches));
        assert!(!set.has(OptionFlag::Owl2));
        assert_eq!(set.to_string(), "relations no-patches");
    }
}
