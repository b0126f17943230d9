/// Request command handlers
use std::path::PathBuf;

use anyhow::{Context, Result};
use gitea_api::{GiteaApi, Integration, Paginated, Pagination, ReqwestTransport};
use serde_json::Value;

use super::helpers::{build_query, print_json};
use crate::config::Config;

/// Request body source for `post`
pub enum Body {
    Inline(String),
    File(PathBuf),
    Empty,
}

impl Body {
    fn read(self) -> Result<Value> {
        let raw = match self {
            Self::Inline(raw) => raw,
            Self::File(path) => std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read request body from {}", path.display()))?,
            Self::Empty => return Ok(Value::Object(serde_json::Map::new())),
        };
        serde_json::from_str(&raw).context("Request body is not valid JSON")
    }
}

fn connect(config: &Config) -> Result<(GiteaApi, Integration)> {
    let integration = config.integration()?;
    let transport = ReqwestTransport::with_config(&config.transport_config())
        .context("Failed to create HTTP client")?;
    Ok((GiteaApi::with_transport(transport), integration))
}

pub async fn handle_get(config: &Config, path: &str, query: &[String]) -> Result<()> {
    let query = build_query(query)?;
    let (api, integration) = connect(config)?;

    let value: Value = api
        .get(&integration, path, query.as_ref())
        .await
        .with_context(|| format!("GET {path} failed"))?;

    print_json(&value)
}

pub async fn handle_post(config: &Config, path: &str, body: Body) -> Result<()> {
    let body = body.read()?;
    let (api, integration) = connect(config)?;

    let value: Value = api
        .post(&integration, path, &body)
        .await
        .with_context(|| format!("POST {path} failed"))?;

    print_json(&value)
}

pub async fn handle_list(
    config: &Config,
    path: &str,
    query: &[String],
    pagination: Pagination,
) -> Result<()> {
    let query = build_query(query)?;
    let (api, integration) = connect(config)?;

    let result: Paginated<Value> = api
        .get_paginated(&integration, path, query.as_ref(), pagination)
        .await
        .with_context(|| format!("GET {path} (paginated) failed"))?;

    log::info!("Fetched {} of {} items from {path}", result.items.len(), result.total);
    print_json(&result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_inline() {
        let body = Body::Inline(r#"{"title":"x"}"#.to_string()).read().unwrap();
        assert_eq!(body["title"], "x");
    }

    #[test]
    fn test_body_empty_is_object() {
        assert_eq!(Body::Empty.read().unwrap(), serde_json::json!({}));
    }

    #[test]
    fn test_body_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("body.json");
        std::fs::write(&path, "[1, 2]").unwrap();
        assert_eq!(Body::File(path).read().unwrap(), serde_json::json!([1, 2]));
    }

    #[test]
    fn test_body_invalid_json() {
        assert!(Body::Inline("{".to_string()).read().is_err());
    }

    #[test]
    fn test_connect_requires_credentials() {
        let err = connect(&Config::default()).unwrap_err();
        assert!(err.to_string().contains("API URL not configured"));
    }
}
