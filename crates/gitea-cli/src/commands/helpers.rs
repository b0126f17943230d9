//! Helper utility functions for CLI commands

use anyhow::Result;
use gitea_api::Query;
use serde::Serialize;

/// Parse a `key=value` argument. Only the first `=` splits, so values may contain `=`.
pub fn parse_query_pair(s: &str) -> Result<(String, String)> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| anyhow::anyhow!("Invalid query parameter '{s}'. Use: key=value"))?;
    if key.is_empty() {
        anyhow::bail!("Invalid query parameter '{s}': empty key");
    }
    Ok((key.to_string(), value.to_string()))
}

/// Build a query from repeated `-q key=value` arguments, or `None` when there are none
pub fn build_query(pairs: &[String]) -> Result<Option<Query>> {
    if pairs.is_empty() {
        return Ok(None);
    }
    let parsed = pairs
        .iter()
        .map(|pair| parse_query_pair(pair))
        .collect::<Result<Vec<_>>>()?;
    Ok(Some(parsed.into_iter().collect()))
}

/// Print a value as pretty JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_query_pair() {
        assert_eq!(
            parse_query_pair("state=open").unwrap(),
            ("state".to_string(), "open".to_string())
        );
    }

    #[test]
    fn test_parse_query_pair_value_with_equals() {
        assert_eq!(
            parse_query_pair("q=a=b").unwrap(),
            ("q".to_string(), "a=b".to_string())
        );
    }

    #[test]
    fn test_parse_query_pair_empty_value() {
        assert_eq!(
            parse_query_pair("labels=").unwrap(),
            ("labels".to_string(), String::new())
        );
    }

    #[test]
    fn test_parse_query_pair_errors() {
        assert!(parse_query_pair("state").is_err());
        assert!(parse_query_pair("=open").is_err());
    }

    #[test]
    fn test_build_query() {
        assert!(build_query(&[]).unwrap().is_none());

        let args = vec!["state=open".to_string(), "q=hello world".to_string()];
        let query = build_query(&args).unwrap().unwrap();
        assert_eq!(query.encode(), "state=open&q=hello+world");

        let bad = vec!["state".to_string()];
        assert!(build_query(&bad).is_err());
    }
}
