use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct SiteEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> SiteEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting site build...");

        tracing::info!("Loading content...");
        let content = self.pipeline.extract().await?;
        tracing::info!(
            "Loaded {} services, {} areas, {} posts",
            content.services.len(),
            content.areas.len(),
            content.posts.len()
        );

        tracing::info!("Enumerating pages...");
        let result = self.pipeline.transform(content).await?;
        tracing::info!("Enumerated {} pages", result.pages.len());

        tracing::info!("Writing page manifest...");
        let output_path = self.pipeline.load(result).await?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(output_path)
    }
}
