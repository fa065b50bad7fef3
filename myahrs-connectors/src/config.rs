//! Configuration loading
//!
//! Reads a [`DriverConfig`] from JSON. Missing sections and fields take
//! their defaults; the result is validated before it is returned.

use std::path::Path;

use myahrs_core::DriverConfig;

use crate::ConnectorError;

/// Parse and validate a JSON configuration
pub fn parse_config(text: &str) -> Result<DriverConfig, ConnectorError> {
    let config: DriverConfig = serde_json::from_str(text)?;
    config.validate()?;
    Ok(config)
}

/// Read, parse and validate a JSON configuration file
pub fn load_config(path: impl AsRef<Path>) -> Result<DriverConfig, ConnectorError> {
    let text = std::fs::read_to_string(path.as_ref())?;
    let config = parse_config(&text)?;
    log::info!(
        "loaded config from {}: port {}, divider {}, publish {:?}",
        path.as_ref().display(),
        config.device.port,
        config.device.divider,
        config.publish.mode
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use myahrs_core::{ConfigError, PublishMode};

    #[test]
    fn empty_object_gives_defaults() {
        assert_eq!(parse_config("{}").unwrap(), DriverConfig::default());
    }

    #[test]
    fn partial_config_overrides_named_fields() {
        let config = parse_config(
            r#"{
                "device": { "port": "/dev/ttyUSB0", "divider": 4 },
                "frames": { "parent": "base_link" },
                "publish": { "mode": "decoupled" }
            }"#,
        )
        .unwrap();

        assert_eq!(config.device.port, "/dev/ttyUSB0");
        assert_eq!(config.device.divider, 4);
        assert_eq!(config.device.baud_rate, 115_200);
        assert_eq!(config.frames.parent.as_str(), "base_link");
        assert_eq!(config.frames.child.as_str(), "imu");
        assert_eq!(config.publish.mode, PublishMode::Decoupled);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let err = parse_config(r#"{ "frames": { "parent": "imu", "child": "imu" } }"#).unwrap_err();
        assert!(matches!(err, ConnectorError::Config(ConfigError::SameFrames)));

        let err = parse_config(r#"{ "device": { "divider": "fast" } }"#).unwrap_err();
        assert!(matches!(err, ConnectorError::Serialization(_)));
    }
}
