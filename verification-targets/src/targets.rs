//! Verification target keywords and the `targets` setting parser.

use crate::errors::{SettingValueError, SettingValueResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use tracing::trace;

/// A category of property the verification engine can be asked to check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VerificationTarget {
    ConstantCondition,
    Underflow,
    Overflow,
    DivByZero,
    Balance,
    Assert,
    PopEmptyArray,
    OutOfBounds,
}

impl VerificationTarget {
    /// Every target, in declaration order.
    pub const ALL: [VerificationTarget; 8] = [
        VerificationTarget::ConstantCondition,
        VerificationTarget::Underflow,
        VerificationTarget::Overflow,
        VerificationTarget::DivByZero,
        VerificationTarget::Balance,
        VerificationTarget::Assert,
        VerificationTarget::PopEmptyArray,
        VerificationTarget::OutOfBounds,
    ];

    /// The keyword used for this target in settings.
    pub fn keyword(self) -> &'static str {
        match self {
            VerificationTarget::ConstantCondition => "constantCondition",
            VerificationTarget::Underflow => "underflow",
            VerificationTarget::Overflow => "overflow",
            VerificationTarget::DivByZero => "divByZero",
            VerificationTarget::Balance => "balance",
            VerificationTarget::Assert => "assert",
            VerificationTarget::PopEmptyArray => "popEmptyArray",
            VerificationTarget::OutOfBounds => "outOfBounds",
        }
    }

    /// Look up a target by its exact keyword.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.keyword() == keyword)
    }
}

impl fmt::Display for VerificationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A set of selected verification targets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetSet {
    targets: BTreeSet<VerificationTarget>,
}

impl TargetSet {
    /// The set holding every known target.
    pub fn all() -> Self {
        Self {
            targets: VerificationTarget::ALL.iter().copied().collect(),
        }
    }

    /// Parse a `targets` setting value.
    ///
    /// `default` selects every target. Anything else is a comma-separated
    /// list of keywords, matched exactly. A single unknown keyword rejects
    /// the whole value.
    pub fn from_setting(value: &str) -> SettingValueResult<Self> {
        if value == "default" {
            return Ok(Self::all());
        }

        let mut chosen = BTreeSet::new();
        for token in value.split(',') {
            let target = VerificationTarget::from_keyword(token).ok_or_else(|| {
                SettingValueError::Configuration {
                    keyword: token.to_string(),
                }
            })?;
            trace!(keyword = token, "selected verification target");
            chosen.insert(target);
        }

        Ok(Self { targets: chosen })
    }

    /// Add a single target by keyword. Returns `false` and leaves the set
    /// untouched if the keyword is unknown.
    pub fn insert_keyword(&mut self, keyword: &str) -> bool {
        match VerificationTarget::from_keyword(keyword) {
            Some(target) => {
                self.targets.insert(target);
                true
            }
            None => false,
        }
    }

    /// Whether `target` is selected.
    pub fn contains(&self, target: VerificationTarget) -> bool {
        self.targets.contains(&target)
    }

    /// Selected targets in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = VerificationTarget> + '_ {
        self.targets.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

impl FromStr for TargetSet {
    type Err = SettingValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_setting(s)
    }
}
