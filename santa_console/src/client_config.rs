use anyhow::Context;
use secret_santa::config::ClientConfig;


pub fn read_config_file(filename: &str) -> anyhow::Result<ClientConfig> {
    let contents = std::fs::read_to_string(filename)
        .with_context(|| format!("Failed to read config file '{filename}'."))?;
    parse_config(&contents).with_context(|| format!("Failed to parse config file '{filename}'."))
}

pub fn parse_config(contents: &str) -> anyhow::Result<ClientConfig> {
    Ok(serde_yaml::from_str(contents)?)
}


#[cfg(test)]
mod tests {
    use std::time::Duration;

    use pretty_assertions::assert_eq;
    use secret_santa::config::{DEFAULT_NAME_CHECK_TIMEOUT, DEFAULT_SERVER_URL};

    use super::*;

    #[test]
    fn full_config() {
        let config = parse_config("server_url: https://santa.example.org\nname_check_timeout: 3s\n")
            .unwrap();
        assert_eq!(config.server_url, "https://santa.example.org");
        assert_eq!(config.name_check_timeout, Duration::from_secs(3));
    }

    #[test]
    fn missing_fields_use_defaults() {
        let config = parse_config("server_url: https://santa.example.org\n").unwrap();
        assert_eq!(config.name_check_timeout, DEFAULT_NAME_CHECK_TIMEOUT);
        let config = parse_config("name_check_timeout: 500ms\n").unwrap();
        assert_eq!(config.server_url, DEFAULT_SERVER_URL);
        assert_eq!(config.name_check_timeout, Duration::from_millis(500));
    }

    #[test]
    fn bad_duration() {
        assert!(parse_config("name_check_timeout: soon\n").is_err());
    }
}
