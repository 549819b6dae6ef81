use crate::domain::model::{BuildResult, SiteContent};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Human-readable location of `path` inside this storage.
    fn location(&self, path: &str) -> String;
}

pub trait ConfigProvider: Send + Sync {
    fn content_dir(&self) -> &str;
    fn output_path(&self) -> &str;
    fn site_name(&self) -> &str;
    fn base_url(&self) -> Option<&str>;
    fn output_formats(&self) -> &[String];
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<SiteContent>;
    async fn transform(&self, content: SiteContent) -> Result<BuildResult>;
    async fn load(&self, result: BuildResult) -> Result<String>;
}
