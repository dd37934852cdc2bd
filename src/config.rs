// src/config.rs
use crate::error::AppError;
use crate::tools::ToolName;
use crate::types::{ApiKey, ResponseFormat};
use clap::Parser;

/// Environment variable holding the Notion integration token.
pub const API_KEY_VAR: &str = "NOTION_API_KEY";

/// Environment variable listing the tools to expose.
pub const ENABLED_TOOLS_VAR: &str = "NOTION_MCP_ENABLED_TOOLS";

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Comma-separated tool names to expose (e.g., "retrieve_page,search"). Defaults to every tool.
    #[arg(long, env = ENABLED_TOOLS_VAR)]
    pub enabled_tools: Option<String>,

    /// Default response format when a call does not pass one: markdown or json
    #[arg(long, default_value = "markdown")]
    pub format: String,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

/// Resolved server configuration, validated and ready to serve.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub api_key: ApiKey,
    pub enabled_tools: Vec<ToolName>,
    pub default_format: ResponseFormat,
    pub verbose: bool,
}

impl ServerConfig {
    /// Resolves the configuration from CLI input and the environment.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        let api_key = std::env::var(API_KEY_VAR).ok();
        Self::resolve_with(cli, api_key)
    }

    /// Resolves the configuration with an explicitly supplied API key.
    pub fn resolve_with(cli: CommandLineInput, api_key: Option<String>) -> Result<Self, AppError> {
        let api_key = api_key.filter(|key| !key.trim().is_empty()).ok_or_else(|| {
            AppError::MissingConfiguration(format!("{} environment variable not set", API_KEY_VAR))
        })?;
        let api_key = ApiKey::new(api_key.trim())?;

        let enabled_tools = match cli.enabled_tools.as_deref() {
            Some(list) => parse_tool_list(list)?,
            None => ToolName::ALL.to_vec(),
        };
        let default_format = cli.format.parse::<ResponseFormat>()?;

        Ok(ServerConfig {
            api_key,
            enabled_tools,
            default_format,
            verbose: cli.verbose,
        })
    }
}

/// Parses a comma-separated tool list. A list with no names enables every tool.
pub fn parse_tool_list(list: &str) -> Result<Vec<ToolName>, AppError> {
    let mut tools = Vec::new();
    for name in list.split(',').map(str::trim).filter(|name| !name.is_empty()) {
        let tool: ToolName = name.parse()?;
        if !tools.contains(&tool) {
            tools.push(tool);
        }
    }
    if tools.is_empty() {
        return Ok(ToolName::ALL.to_vec());
    }
    Ok(tools)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const KEY: &str = "secret_abcdefghijklmnopqrstuvwxyz";

    fn cli(args: &[&str]) -> CommandLineInput {
        let mut argv = vec!["notion-mcp"];
        argv.extend_from_slice(args);
        CommandLineInput::parse_from(argv)
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::resolve_with(cli(&["--enabled-tools", ""]), Some(KEY.to_string())).unwrap();
        assert_eq!(config.enabled_tools.len(), ToolName::ALL.len());
        assert_eq!(config.default_format, ResponseFormat::Markdown);
        assert!(!config.verbose);
    }

    #[test]
    fn test_enabled_tools_flag() {
        let config = ServerConfig::resolve_with(
            cli(&["--enabled-tools", "search, retrieve_page,search", "--format", "json", "-v"]),
            Some(KEY.to_string()),
        )
        .unwrap();
        assert_eq!(config.enabled_tools, vec![ToolName::Search, ToolName::RetrievePage]);
        assert_eq!(config.default_format, ResponseFormat::Json);
        assert!(config.verbose);
    }

    #[test]
    fn test_missing_or_invalid_key() {
        assert!(matches!(
            ServerConfig::resolve_with(cli(&["--enabled-tools", ""]), None),
            Err(AppError::MissingConfiguration(_))
        ));
        assert!(matches!(
            ServerConfig::resolve_with(cli(&["--enabled-tools", ""]), Some("token".to_string())),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_unknown_tool_name() {
        assert!(matches!(
            parse_tool_list("retrieve_page,teleport"),
            Err(AppError::UnknownTool(name)) if name == "teleport"
        ));
    }
}
