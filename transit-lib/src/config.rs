use config::{Config as ConfigLoader, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

const CONFIG_NAME: &str = "transit";
const ENV_PREFIX: &str = "TRANSIT";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitConfig {
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color: bool,
    pub show_unparseable: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Table,
            color: true,
            show_unparseable: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl TransitConfig {
    /// Loads `transit.toml` from the working directory if present, then
    /// applies `TRANSIT_OUTPUT__FORMAT` style environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(CONFIG_NAME)
    }

    pub fn load_from(name: &str) -> Result<Self, ConfigError> {
        let builder = ConfigLoader::builder()
            .add_source(File::with_name(name).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );
        let config = builder.build()?.try_deserialize()?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        ConfigLoader::builder()
            .add_source(File::from_str(content, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(self)
    }
}
