//! Shared helper functions for CLI commands
//!
//! Formatting helpers used by several command modules.

use console::{style, StyledObject};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::Config;
use crate::entities::item::InventoryItem;

/// Truncate a string to max_len characters, adding "..." if truncated
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Pick the output format: explicit flag, then config default, then `fallback`
pub fn resolve_format(global: &GlobalOpts, config: &Config, fallback: OutputFormat) -> OutputFormat {
    use clap::ValueEnum;

    match global.format {
        OutputFormat::Auto => config
            .default_format
            .as_deref()
            .and_then(|f| OutputFormat::from_str(f, true).ok())
            .filter(|f| *f != OutputFormat::Auto)
            .unwrap_or(fallback),
        f => f,
    }
}

/// Quantity colored by stock level: red when empty, yellow when low
pub fn styled_quantity(item: &InventoryItem) -> StyledObject<String> {
    let qty = item.quantity.to_string();
    if item.quantity == 0 {
        style(qty).red().bold()
    } else if item.is_low_stock() {
        style(qty).yellow()
    } else {
        style(qty).green()
    }
}

/// "LOW" marker for low-stock rows, blank otherwise
pub fn low_stock_flag(item: &InventoryItem) -> &'static str {
    if item.is_low_stock() {
        "LOW"
    } else {
        ""
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn global(format: OutputFormat) -> GlobalOpts {
        GlobalOpts {
            format,
            quiet: false,
            verbose: false,
            file: None,
        }
    }

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("hello", 10), "hello");
        assert_eq!(truncate_str("hello world", 8), "hello...");
        assert_eq!(truncate_str("hi", 2), "hi");
        assert_eq!(truncate_str("crème brûlée", 8), "crème...");
    }

    #[test]
    fn test_resolve_format_explicit_flag_wins() {
        let config = Config {
            default_format: Some("json".to_string()),
            ..Default::default()
        };
        assert_eq!(
            resolve_format(&global(OutputFormat::Csv), &config, OutputFormat::Tsv),
            OutputFormat::Csv
        );
    }

    #[test]
    fn test_resolve_format_uses_config_then_fallback() {
        let config = Config {
            default_format: Some("JSON".to_string()),
            ..Default::default()
        };
        assert_eq!(
            resolve_format(&global(OutputFormat::Auto), &config, OutputFormat::Tsv),
            OutputFormat::Json
        );

        let config = Config {
            default_format: Some("bogus".to_string()),
            ..Default::default()
        };
        assert_eq!(
            resolve_format(&global(OutputFormat::Auto), &config, OutputFormat::Tsv),
            OutputFormat::Tsv
        );
    }
}
