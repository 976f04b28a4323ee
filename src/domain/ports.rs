use crate::domain::model::{AllocationInput, AllocationMode, AllocationReport};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn shelves_file(&self) -> &str;
    fn items_file(&self) -> &str;
    fn output_path(&self) -> &str;
    fn mode(&self) -> AllocationMode;
    fn hint_column(&self) -> &str;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<AllocationInput>;
    async fn transform(&self, input: AllocationInput) -> Result<AllocationReport>;
    async fn load(&self, report: AllocationReport) -> Result<String>;
}
