use anyhow::Context;
use clap::Parser;
use service_pages::core::ConfigProvider;
use service_pages::core::site::check_content;
use service_pages::utils::{logger, validation::Validate};
use service_pages::{CliConfig, LocalStorage, SiteConfig, SiteEngine, SitePipeline};
use std::path::Path;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting service-pages");
    tracing::debug!("CLI args: {:?}", cli);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            SiteConfig::from_file(path)
                .with_context(|| format!("failed to load config file '{}'", path))?
        }
        None => SiteConfig::default(),
    };
    cli.apply_overrides(&mut config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    if cli.check {
        let report = check_content(Path::new(config.content_dir()))?;
        println!(
            "{} services, {} areas, {} posts",
            report.services, report.areas, report.posts
        );
        for problem in &report.catalog_problems {
            println!("❌ {}", problem);
        }
        for missing in &report.missing_posts {
            println!(
                "⚠️  post '{}' -> '{}' ({:?})",
                missing.slug, missing.file, missing.reason
            );
        }
        for slug in &report.duplicate_posts {
            println!("⚠️  post slug '{}' is listed more than once; the last entry is used", slug);
        }
        if !report.is_clean() {
            std::process::exit(1);
        }
        println!("✅ Content is consistent");
        return Ok(());
    }

    let storage = LocalStorage::new(config.output_path().to_string());
    let pipeline = SitePipeline::new(storage, config);
    let engine = SiteEngine::new(pipeline);

    match engine.run().await {
        Ok(output_path) => {
            println!("✅ Page manifest written to: {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Build failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            std::process::exit(e.exit_code());
        }
    }

    Ok(())
}
