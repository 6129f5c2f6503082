use serde::de::DeserializeOwned;

use crate::app::TramsAppError;

/// reads a `.toml` or `.json` file into some deserializable type.
pub fn read_config_file<T: DeserializeOwned>(f: &str) -> Result<T, TramsAppError> {
    if f.ends_with(".toml") {
        let s = std::fs::read_to_string(f)
            .map_err(|e| TramsAppError::ConfigurationError(format!("failure reading {f}: {e}")))?;
        toml::from_str(&s)
            .map_err(|e| TramsAppError::ConfigurationError(format!("failure decoding {f}: {e}")))
    } else if f.ends_with(".json") {
        let s = std::fs::read_to_string(f)
            .map_err(|e| TramsAppError::ConfigurationError(format!("failure reading {f}: {e}")))?;
        serde_json::from_str(&s)
            .map_err(|e| TramsAppError::ConfigurationError(format!("failure decoding {f}: {e}")))
    } else {
        Err(TramsAppError::ConfigurationError(format!(
            "unsupported file type: {f}"
        )))
    }
}
