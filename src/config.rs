//! Reader configuration loaded from TOML.

use crate::errors::{ReaderError, ReaderResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use verification_targets::GroupedNameSet;

/// Options shared by every test case a harness reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReaderConfig {
    /// Register the direct imports of external sources.
    #[serde(default = "default_follow_imports")]
    pub follow_imports: bool,
    /// What a `contracts: default` setting stands for, as group -> members.
    #[serde(default)]
    pub default_contracts: BTreeMap<String, Vec<String>>,
}

fn default_follow_imports() -> bool {
    true
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            follow_imports: default_follow_imports(),
            default_contracts: BTreeMap::new(),
        }
    }
}

impl ReaderConfig {
    /// Load from a TOML file. A missing file yields the defaults.
    pub fn load(path: &Path) -> ReaderResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ReaderError::io(path, e))?;
        toml::from_str(&content).map_err(|e| ReaderError::Config {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// The grouped name set standing in for `default`.
    pub fn contracts_default(&self) -> GroupedNameSet {
        self.default_contracts
            .iter()
            .flat_map(|(group, members)| members.iter().map(move |m| (group.clone(), m.clone())))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = ReaderConfig::default();
        assert!(config.follow_imports);
        assert!(config.contracts_default().is_empty());
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        let config = ReaderConfig::load(Path::new("/nonexistent/reader.toml")).unwrap();
        assert_eq!(config, ReaderConfig::default());
    }

    #[test]
    fn test_load_from_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
follow_imports = false

[default_contracts]
"a.sol" = ["A", "B"]
"lib.sol" = ["L"]
"#
        )
        .unwrap();

        let config = ReaderConfig::load(file.path()).unwrap();
        assert!(!config.follow_imports);

        let contracts = config.contracts_default();
        assert!(contracts.contains("a.sol", "A"));
        assert!(contracts.contains("a.sol", "B"));
        assert!(contracts.contains("lib.sol", "L"));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[default_contracts]").unwrap();

        let config = ReaderConfig::load(file.path()).unwrap();
        assert!(config.follow_imports);
    }

    #[test]
    fn test_invalid_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "follow_imports = \"sometimes\"").unwrap();

        let err = ReaderConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ReaderError::Config { .. }));
    }
}
