//! Checker configuration loaded from `fplx.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use fplx_model::{DEFAULT_GENE_PLACEHOLDER, NamespacePolicy, TableKind};

use crate::dialect::LineTerminator;
use crate::error::ConfigError;

/// Config file looked up in the resources directory.
pub const CONFIG_FILE_NAME: &str = "fplx.toml";

/// Environment variable naming the resources directory.
pub const RESOURCES_ENV_VAR: &str = "FPLX_RESOURCES_DIR";

/// Resources directory from `FPLX_RESOURCES_DIR`, falling back to `.`.
pub fn default_resources_dir() -> PathBuf {
    std::env::var_os(RESOURCES_ENV_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CheckConfig {
    pub tables: TableFiles,
    pub namespaces: NamespacePolicy,
    pub dialect: DialectConfig,
    pub prefixes: PrefixConfig,
}

/// File names of the resource tables, relative to the resources directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TableFiles {
    pub entities: String,
    pub relations: String,
    pub grounding_map: String,
    pub gene_prefixes: String,
    pub equivalences: String,
    pub descriptions: String,
}

impl Default for TableFiles {
    fn default() -> Self {
        Self {
            entities: TableKind::Entities.default_file_name().to_string(),
            relations: TableKind::Relations.default_file_name().to_string(),
            grounding_map: TableKind::GroundingMap.default_file_name().to_string(),
            gene_prefixes: TableKind::GenePrefixes.default_file_name().to_string(),
            equivalences: TableKind::Equivalences.default_file_name().to_string(),
            descriptions: TableKind::Descriptions.default_file_name().to_string(),
        }
    }
}

impl TableFiles {
    pub fn file_name(&self, table: TableKind) -> &str {
        match table {
            TableKind::Entities => &self.entities,
            TableKind::Relations => &self.relations,
            TableKind::GroundingMap => &self.grounding_map,
            TableKind::GenePrefixes => &self.gene_prefixes,
            TableKind::Equivalences => &self.equivalences,
            TableKind::Descriptions => &self.descriptions,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DialectConfig {
    pub line_terminator: LineTerminator,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PrefixConfig {
    /// Token marking the gene-name position in a prefix pattern.
    pub placeholder: String,
}

impl Default for PrefixConfig {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_GENE_PLACEHOLDER.to_string(),
        }
    }
}

impl CheckConfig {
    /// Parse a config document and check it is usable.
    pub fn from_toml_str(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: CheckConfig = toml::from_str(contents).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.prefixes.placeholder.is_empty() {
            return Err(ConfigError::Invalid {
                message: "prefixes.placeholder must not be empty".to_string(),
            });
        }
        if self.namespaces.local.is_empty() {
            return Err(ConfigError::Invalid {
                message: "namespaces.local must name at least one namespace".to_string(),
            });
        }
        for table in TableKind::ALL {
            if self.tables.file_name(table).trim().is_empty() {
                return Err(ConfigError::Invalid {
                    message: format!("tables: empty file name for {table}"),
                });
            }
        }
        Ok(())
    }

    /// Full path of a table inside `resources_dir`.
    pub fn table_path(&self, resources_dir: &Path, table: TableKind) -> PathBuf {
        resources_dir.join(self.tables.file_name(table))
    }
}

/// Read the config at `path`.
pub fn load_config(path: &Path) -> Result<CheckConfig, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    CheckConfig::from_toml_str(&contents, path)
}

/// Config from `fplx.toml` in `resources_dir` when present, else defaults.
pub fn discover_config(resources_dir: &Path) -> Result<CheckConfig, ConfigError> {
    let candidate = resources_dir.join(CONFIG_FILE_NAME);
    if candidate.is_file() {
        load_config(&candidate)
    } else {
        Ok(CheckConfig::default())
    }
}
