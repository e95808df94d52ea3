use serde::Deserialize;

use super::read_config_file;
use crate::errors::ConfigResult;

/// Root structure for loading `[[bus]]` style TOML config
#[derive(Debug, Deserialize)]
pub struct BusConfig {
    #[serde(rename = "bus")]
    pub buses: Vec<BusEntry>,
}

/// One bus entry, e.g. `{ id = "i2c1", type = "i2c", path = "/dev/i2c-1" }`
#[derive(Debug, Clone, Deserialize)]
pub struct BusEntry {
    pub id: String,
    #[serde(rename = "type")]
    pub r#type: String, // 'type' is a reserved word in Rust, use raw identifier
    pub path: String,
}

impl BusConfig {
    pub fn parse(content: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn find(&self, id: &str) -> Option<&BusEntry> {
        self.buses.iter().find(|b| b.id == id)
    }
}

/// Load bus config file
pub fn load_bus_config(path: &str) -> ConfigResult<BusConfig> {
    BusConfig::parse(&read_config_file(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ConfigError;

    #[test]
    fn test_parse_buses() {
        let cfg = BusConfig::parse(
            r#"
            [[bus]]
            id = "i2c0"
            type = "i2c"
            path = "/dev/i2c-0"

            [[bus]]
            id = "i2c1"
            type = "i2c"
            path = "/dev/i2c-1"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.buses.len(), 2);
        assert_eq!(cfg.find("i2c1").unwrap().path, "/dev/i2c-1");
        assert!(cfg.find("spi0").is_none());
    }

    #[test]
    fn test_missing_path_is_format_error() {
        let err = BusConfig::parse("[[bus]]\nid = \"i2c0\"\ntype = \"i2c\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::FormatError(_)));
    }

    #[test]
    fn test_missing_file_is_load_error() {
        let err = load_bus_config("/nonexistent/buses.toml").unwrap_err();
        assert!(matches!(err, ConfigError::LoadError { .. }));
    }
}
