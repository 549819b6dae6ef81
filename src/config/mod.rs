pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::config::toml_config::SiteConfig;
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "service-pages")]
#[command(about = "Enumerate and describe the static service, area and blog pages of the site")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Content directory (services/*.json, blog/index.json)
    #[arg(long)]
    pub content_dir: Option<String>,

    /// Directory the page manifest is written to
    #[arg(long)]
    pub output_path: Option<String>,

    #[arg(long)]
    pub site_name: Option<String>,

    /// Prefix for absolute page URLs, e.g. https://example.com
    #[arg(long)]
    pub base_url: Option<String>,

    /// Comma-separated subset of json, csv, views
    #[arg(long, value_delimiter = ',')]
    pub output_formats: Vec<String>,

    /// Audit the content store and exit without writing anything
    #[arg(long)]
    pub check: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log as JSON lines")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 應用命令列覆蓋設定
    pub fn apply_overrides(&self, config: &mut SiteConfig) {
        if let Some(dir) = &self.content_dir {
            config.content.dir = dir.clone();
        }
        if let Some(path) = &self.output_path {
            config.output.path = path.clone();
        }
        if let Some(name) = &self.site_name {
            config.site.name = name.clone();
        }
        if let Some(base_url) = &self.base_url {
            config.site.base_url = Some(base_url.clone());
        }
        if !self.output_formats.is_empty() {
            config.output.formats = self.output_formats.clone();
        }
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use crate::core::ConfigProvider;

    #[test]
    fn test_flags_override_file_values() {
        let cli = CliConfig::parse_from([
            "service-pages",
            "--output-path",
            "./dist",
            "--base-url",
            "https://example.com",
            "--output-formats",
            "json",
        ]);
        let mut config = SiteConfig::default();
        cli.apply_overrides(&mut config);

        assert_eq!(config.output_path(), "./dist");
        assert_eq!(config.base_url(), Some("https://example.com"));
        assert_eq!(config.output_formats(), ["json".to_string()]);
        assert_eq!(config.content_dir(), "content");
    }

    #[test]
    fn test_no_flags_keep_defaults() {
        let cli = CliConfig::parse_from(["service-pages", "--check"]);
        let mut config = SiteConfig::default();
        cli.apply_overrides(&mut config);

        assert!(cli.check);
        assert_eq!(config.output_formats().len(), 3);
        assert_eq!(config.site_name(), "Building Health X");
    }
}
