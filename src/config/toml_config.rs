use crate::config::ServerConfig;
use crate::utils::error::{Result, TranslateError};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional file-based settings. Only the decoder launch options live here;
/// the dataset and language pair always come from the command line.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub server: ServerConfig,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| TranslateError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the variable's value; unknown variables stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| TranslateError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.server.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_server_section() {
        let toml_content = r#"
[server]
binary = "/opt/marian/bin/marian-server"
beam_size = 4
normalize = 1.0
extra_args = ["--cpu-threads", "8"]
startup_timeout_seconds = 120
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.server.binary, "/opt/marian/bin/marian-server");
        assert_eq!(config.server.beam_size, 4);
        assert_eq!(config.server.extra_args, vec!["--cpu-threads", "8"]);
        // unspecified keys keep their defaults
        assert_eq!(config.server.mini_batch, 64);
        assert_eq!(config.server.maxi_batch_sort, "src");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config.server, ServerConfig::default());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("DT_TEST_MARIAN_LOG_DIR", "/var/log/marian");

        let toml_content = r#"
[server]
log_dir = "${DT_TEST_MARIAN_LOG_DIR}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.server.log_dir, PathBuf::from("/var/log/marian"));

        std::env::remove_var("DT_TEST_MARIAN_LOG_DIR");
    }

    #[test]
    fn test_invalid_toml() {
        let err = TomlConfig::from_toml_str("[server\nbeam_size = ").unwrap_err();
        assert!(matches!(err, TranslateError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_validation() {
        let config = TomlConfig::from_toml_str("[server]\nbeam_size = 0\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[server]\nhost = \"127.0.0.1\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
    }
}
