use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::FragmentError;

/// Process-wide constants: URI prefixes, service endpoints and the
/// catalysis predicate. Loaded once, immutable afterwards.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default = "default_eri_prefix")]
    pub eri_prefix: String,

    /// Prefix of Rhea's CML reaction document URIs; the native reaction id
    /// is whatever follows it.
    #[serde(default = "default_rhea_cml_prefix")]
    pub rhea_cml_prefix: String,

    /// Base URL of the Rhea search web service.
    #[serde(default = "default_rhea_ws_url")]
    pub rhea_ws_url: String,

    #[serde(default = "default_uniprot_prefix")]
    pub uniprot_prefix: String,

    /// Base URL of the xref database translating ERIs to native URIs.
    #[serde(default = "default_xrefdb_url")]
    pub xrefdb_url: String,

    #[serde(default = "default_catalysis_predicate")]
    pub catalysis_predicate: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            eri_prefix: default_eri_prefix(),
            rhea_cml_prefix: default_rhea_cml_prefix(),
            rhea_ws_url: default_rhea_ws_url(),
            uniprot_prefix: default_uniprot_prefix(),
            xrefdb_url: default_xrefdb_url(),
            catalysis_predicate: default_catalysis_predicate(),
        }
    }
}

fn default_eri_prefix() -> String {
    "http://example.org/eri/".to_string()
}

fn default_rhea_cml_prefix() -> String {
    "https://www.rhea-db.org/rhea/rest/1.0/ws/reaction/cmlreact/".to_string()
}

fn default_rhea_ws_url() -> String {
    "http://www.rhea-db.org/rest/1.0/ws".to_string()
}

fn default_uniprot_prefix() -> String {
    "http://www.uniprot.org/uniprot/".to_string()
}

fn default_xrefdb_url() -> String {
    "http://localhost:9876".to_string()
}

fn default_catalysis_predicate() -> String {
    "http://w3id.org/synbio/ont#isCatalyzedBy".to_string()
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads `rhea-fragments.json` from the working directory, or the given
    /// path. An absent default file is fine (built-in defaults apply); an
    /// absent explicit path is an error.
    pub fn resolve(path: Option<&str>) -> Result<Config, FragmentError> {
        let config_path = match path {
            Some(path) => PathBuf::from(path),
            None => PathBuf::from("rhea-fragments.json"),
        };

        if path.is_none() && !config_path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&config_path)
            .map_err(|_| FragmentError::ConfigRead(config_path.clone()))?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|err| FragmentError::ConfigParse(err.to_string()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_fields() {
        let config: Config = serde_json::from_str(r#"{"eri_prefix": "http://eri.example/"}"#).unwrap();
        assert_eq!(config.eri_prefix, "http://eri.example/");
        assert_eq!(
            config.rhea_cml_prefix,
            "https://www.rhea-db.org/rhea/rest/1.0/ws/reaction/cmlreact/"
        );
        assert_eq!(config.uniprot_prefix, "http://www.uniprot.org/uniprot/");
    }

    #[test]
    fn empty_object_is_all_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        let defaults = Config::default();
        assert_eq!(config.catalysis_predicate, defaults.catalysis_predicate);
        assert_eq!(config.rhea_ws_url, defaults.rhea_ws_url);
    }
}
