//! Domain sources - Implementations of DomainSource.
//!
//! `RemoteDomainSource` asks the running Rasa server (`GET /domain`),
//! `FileDomainSource` reads a `domain.yml` (or JSON) file from disk.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::path::PathBuf;

use super::config::RasaConfig;
use crate::adapters::upstream::{build_client, check_status, map_send_error};
use crate::domain::foundation::{UpstreamError, UpstreamService};
use crate::domain::nlg::{DomainDefinition, NlgError};
use crate::ports::DomainSource;

pub struct RemoteDomainSource {
    config: RasaConfig,
    client: Client,
}

impl RemoteDomainSource {
    pub fn new(config: RasaConfig) -> Result<Self, UpstreamError> {
        let client = build_client(UpstreamService::Rasa, config.timeout)?;
        Ok(Self { config, client })
    }

    fn domain_url(&self) -> String {
        format!("{}/domain", self.config.base_url)
    }

    async fn fetch_once(&self) -> Result<Value, UpstreamError> {
        let response = self
            .client
            .get(self.domain_url())
            .header("Accept", "application/json")
            .query(&self.config.token_query())
            .send()
            .await
            .map_err(|e| map_send_error(UpstreamService::Rasa, e))?;
        let response = check_status(UpstreamService::Rasa, response).await?;
        response.json::<Value>().await.map_err(|e| {
            UpstreamError::decode(UpstreamService::Rasa, format!("Failed to parse domain: {}", e))
        })
    }
}

#[async_trait]
impl DomainSource for RemoteDomainSource {
    async fn load_domain(&self) -> Result<DomainDefinition, NlgError> {
        let value = self.config.retry.run(|| self.fetch_once()).await?;
        DomainDefinition::from_json(value)
    }
}

pub struct FileDomainSource {
    path: PathBuf,
}

impl FileDomainSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DomainSource for FileDomainSource {
    async fn load_domain(&self) -> Result<DomainDefinition, NlgError> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            UpstreamError::network(
                UpstreamService::DomainFile,
                format!("Failed to read {}: {}", self.path.display(), e),
            )
        })?;

        let is_json = self
            .path
            .extension()
            .map_or(false, |ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            let value: Value = serde_json::from_str(&content)
                .map_err(|e| NlgError::invalid_domain(format!("{}: {}", self.path.display(), e)))?;
            DomainDefinition::from_json(value)
        } else {
            DomainDefinition::from_yaml(&content)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn domain_url_is_under_base() {
        let source = RemoteDomainSource::new(RasaConfig::new("http://rasa:5005")).unwrap();
        assert_eq!(source.domain_url(), "http://rasa:5005/domain");
    }

    #[tokio::test]
    async fn reads_yaml_domain_file() {
        let mut file = tempfile::Builder::new().suffix(".yml").tempfile().unwrap();
        writeln!(
            file,
            "responses:\n  utter_greet:\n    - text: \"Hello {{name}}\"\nslots:\n  name:\n    type: text\n    initial_value: friend"
        )
        .unwrap();

        let domain = FileDomainSource::new(file.path()).load_domain().await.unwrap();
        assert!(domain.responses.contains("utter_greet"));
        assert_eq!(
            domain.initial_slots().get("name"),
            Some(&serde_json::json!("friend"))
        );
    }

    #[tokio::test]
    async fn reads_json_domain_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"responses": {{"utter_bye": [{{"text": "Bye"}}]}}}}"#).unwrap();

        let domain = FileDomainSource::new(file.path()).load_domain().await.unwrap();
        assert!(domain.responses.contains("utter_bye"));
    }

    #[tokio::test]
    async fn missing_file_is_upstream_error() {
        let err = FileDomainSource::new("/nonexistent/domain.yml")
            .load_domain()
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            NlgError::Upstream(UpstreamError::Network {
                service: UpstreamService::DomainFile,
                ..
            })
        ));
    }
}
