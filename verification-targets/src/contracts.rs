//! Grouped `source:contract` names and the `contracts` setting parser.

use crate::errors::{SettingValueError, SettingValueResult};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::iter::FromIterator;
use std::str::FromStr;

/// Mapping from a group name (typically a source unit) to member names
/// (typically contracts defined in it).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupedNameSet {
    groups: BTreeMap<String, BTreeSet<String>>,
}

impl GroupedNameSet {
    /// Parse a `contracts` setting value.
    ///
    /// `default` yields whatever `default` produces. Anything else is a
    /// comma-separated list of `group:member` tokens. Each token needs exactly
    /// one `:` with a non-empty name on either side; nothing is trimmed.
    /// Repeated groups merge their members.
    pub fn from_setting(
        value: &str,
        default: impl FnOnce() -> GroupedNameSet,
    ) -> SettingValueResult<Self> {
        if value == "default" {
            return Ok(default());
        }

        let mut chosen: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for token in value.split(',') {
            let (group, member) = split_token(value, token)?;
            chosen
                .entry(group.to_string())
                .or_default()
                .insert(member.to_string());
        }

        Ok(Self { groups: chosen })
    }

    /// Members registered under `group`, if any.
    pub fn members(&self, group: &str) -> Option<&BTreeSet<String>> {
        self.groups.get(group)
    }

    /// Whether `member` is registered under `group`.
    pub fn contains(&self, group: &str, member: &str) -> bool {
        self.groups
            .get(group)
            .map_or(false, |members| members.contains(member))
    }

    /// Groups with their members, sorted by group name.
    pub fn groups(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> + '_ {
        self.groups.iter().map(|(g, m)| (g.as_str(), m))
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl<G, M> FromIterator<(G, M)> for GroupedNameSet
where
    G: Into<String>,
    M: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (G, M)>>(iter: I) -> Self {
        let mut groups: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for (group, member) in iter {
            groups.entry(group.into()).or_default().insert(member.into());
        }
        Self { groups }
    }
}

impl FromStr for GroupedNameSet {
    type Err = SettingValueError;

    /// Parses with the empty mapping standing in for `default`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_setting(s, GroupedNameSet::default)
    }
}

fn split_token<'a>(value: &str, token: &'a str) -> SettingValueResult<(&'a str, &'a str)> {
    let malformed = |message: String| SettingValueError::Format {
        value: value.to_string(),
        message,
    };

    let (group, member) = match (token.find(':'), token.rfind(':')) {
        (Some(first), Some(last)) if first == last => (&token[..first], &token[first + 1..]),
        _ => {
            return Err(malformed(format!(
                "expected exactly one ':' in \"{}\"",
                token
            )))
        }
    };

    if group.is_empty() || member.is_empty() {
        return Err(malformed(format!(
            "empty name on either side of ':' in \"{}\"",
            token
        )));
    }

    Ok((group, member))
}
