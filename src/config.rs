use std::{
    collections::HashMap,
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_inline_default::serde_inline_default;

use crate::constants::EXTERNAL_CONTRIBUTORS_FEATURE;

/// Bot configuration, read from a JSON5 file.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub(crate) struct OpsBotConfig {
    /// Feature flags used for every repository without an override
    pub features: Features,
    /// Per repository (`owner/name`) feature flags
    pub repos: HashMap<String, Features>,
}

#[serde_inline_default]
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub(crate) struct Features {
    /// Ask for approval on PRs from non-members and mirror approved ones.
    #[serde_inline_default(true)]
    pub external_contributors: bool,
}

impl Default for Features {
    fn default() -> Self {
        Features {
            external_contributors: true,
        }
    }
}

impl Features {
    /// Look up a feature by name. Unknown names are `None`.
    pub fn get(&self, name: &str) -> Option<bool> {
        match name {
            EXTERNAL_CONTRIBUTORS_FEATURE => Some(self.external_contributors),
            _ => None,
        }
    }
}

impl OpsBotConfig {
    pub fn from_path(path: &Path) -> Result<Self> {
        let mut file = BufReader::new(
            File::open(path).with_context(|| format!("failed to open {}", path.display()))?,
        );
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        serde_json5::from_str(&contents)
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    /// Load from `path` if given, otherwise use defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::from_path)
    }

    /// Feature flags for `repo` (`owner/name`).
    pub fn features_for(&self, repo: &str) -> &Features {
        self.repos.get(repo).unwrap_or(&self.features)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use test_temp_dir::test_temp_dir;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = OpsBotConfig::load(None).unwrap();
        assert!(config.features.external_contributors);
        assert!(config.repos.is_empty());
        assert_eq!(config.features.get(EXTERNAL_CONTRIBUTORS_FEATURE), Some(true));
        assert_eq!(config.features.get("release_drafter"), None);
    }

    #[test]
    fn test_from_path() {
        let temp_dir = test_temp_dir!();
        let config = temp_dir.used_by(|dir| {
            let path = dir.join("ops-bot.json5");
            fs::write(
                &path,
                r#"{
                    // comments are allowed
                    features: { external_contributors: false },
                    repos: {
                        "rapidsai/cudf": { external_contributors: true },
                        "rapidsai/rmm": {},
                    },
                }"#,
            )
            .unwrap();
            OpsBotConfig::from_path(&path).unwrap()
        });
        assert!(!config.features.external_contributors);
        assert!(config.features_for("rapidsai/cudf").external_contributors);
        // empty override falls back to field defaults, not to the global flags
        assert!(config.features_for("rapidsai/rmm").external_contributors);
        assert!(!config.features_for("rapidsai/cuml").external_contributors);
    }

    #[test]
    fn test_from_path_missing() {
        let temp_dir = test_temp_dir!();
        let err = temp_dir
            .used_by(|dir| OpsBotConfig::from_path(&dir.join("nope.json5")))
            .into_untracked()
            .unwrap_err();
        assert!(err.to_string().starts_with("failed to open"), "{err}");
    }
}
