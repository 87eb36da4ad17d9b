pub mod config;
pub mod dialect;
pub mod error;
pub mod records;
pub mod table;

pub use config::{
    CONFIG_FILE_NAME, CheckConfig, DialectConfig, PrefixConfig, RESOURCES_ENV_VAR, TableFiles,
    default_resources_dir, discover_config, load_config,
};
pub use dialect::{LineEnding, LineTerminator};
pub use error::{ConfigError, LoadError, Result};
pub use records::{
    Loaded, load_descriptions, load_entities, load_equivalences, load_gene_prefixes,
    load_grounding_map, load_relations,
};
pub use table::{RawRow, RawTable, TableSchema, WidthRule, read_table};
