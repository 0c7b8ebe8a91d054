//! Inbound port. UI (adapter) calls into the application.

/// Input port: interactive front-end driving the API services.
#[async_trait::async_trait]
pub trait InputPort: Send + Sync {
    /// Run the main menu until the user quits.
    async fn run(&self) -> anyhow::Result<()>;
}
