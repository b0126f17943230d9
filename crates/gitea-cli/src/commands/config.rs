/// Configuration management command handlers
use std::path::Path;

use anyhow::Result;

use crate::config::Config;

pub fn handle_config_path(path: &Path) {
    println!("{}", path.display());
}

pub fn handle_config_show(path: &Path, config: &Config) {
    println!("Configuration ({}):", path.display());
    println!("{}", render(config));
}

pub fn handle_config_check(config: &Config) -> Result<()> {
    let integration = config.integration()?;
    println!("OK: {} (key {})", integration.api_url, integration.masked_key());
    Ok(())
}

fn render(config: &Config) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "  api_url = {}",
        config.api_url.as_deref().unwrap_or("(not set)")
    ));
    lines.push(format!(
        "  api_key = {}",
        config.api_key.as_ref().map_or_else(
            || "(not set)".to_string(),
            |key| format!("{}***", key.chars().take(4).collect::<String>())
        )
    ));
    let transport = config.transport_config();
    lines.push(format!("  http.timeout_secs = {}", transport.timeout_secs));
    lines.push(format!("  http.user_agent = {}", transport.user_agent));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_masks_key() {
        let config = Config {
            api_url: Some("https://git.example.com/api/v1".to_string()),
            api_key: Some("0123456789".to_string()),
            ..Config::default()
        };
        let rendered = render(&config);
        assert!(rendered.contains("api_url = https://git.example.com/api/v1"));
        assert!(rendered.contains("api_key = 0123***"));
        assert!(!rendered.contains("0123456789"));
    }

    #[test]
    fn test_render_unset_values() {
        let rendered = render(&Config::default());
        assert!(rendered.contains("api_url = (not set)"));
        assert!(rendered.contains("api_key = (not set)"));
        assert!(rendered.contains("http.timeout_secs = 30"));
    }
}
