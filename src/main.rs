//! Wiring & DI. Entry point: bootstrap the transport, inject into services, run UI.
//! No business logic here; every API call lives in a usecase service.

use classroom_client::adapters::http::ReqwestTransport;
use classroom_client::adapters::ui::tui::TuiInputPort;
use classroom_client::ports::{HttpTransport, InputPort};
use classroom_client::shared::config::AppConfig;
use classroom_client::usecases::{
    AnalysisService, ApiClient, AssignmentService, DashboardService, GradingService, LlmService,
    SubmissionService, TeacherService,
};
use dotenv::dotenv;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    let cfg = AppConfig::load().unwrap_or_default();
    let base_url = cfg.base_url_or_default();
    classroom_client::adapters::ui::init_ui(&base_url);
    info!(base_url = %base_url, "API root");

    let token = match cfg.token() {
        Some(token) => token,
        None => inquire::Password::new("API token:")
            .without_confirmation()
            .prompt()?,
    };
    if token.trim().is_empty() {
        anyhow::bail!("Set CLASSROOM_TOKEN (env or .env) or enter a token at the prompt");
    }

    let export_dir = PathBuf::from(cfg.export_dir_or_default());
    info!(path = %export_dir.display(), "grade exports directory");

    // --- Transport + shared request wrapper ---
    let transport: Arc<dyn HttpTransport> = Arc::new(ReqwestTransport::new());
    let api = Arc::new(ApiClient::new(transport, base_url));

    // --- Services ---
    let assignments = Arc::new(AssignmentService::new(Arc::clone(&api)));
    let submissions = Arc::new(SubmissionService::new(Arc::clone(&api)));
    let llm = Arc::new(LlmService::new(Arc::clone(&api)));
    let teacher = Arc::new(TeacherService::new(Arc::clone(&api)));
    let grading = Arc::new(GradingService::new(Arc::clone(&api)));
    let dashboard = Arc::new(DashboardService::new(Arc::clone(&api)));
    let analysis = Arc::new(AnalysisService::new(Arc::clone(&api)));

    let input_port: Arc<dyn InputPort> = Arc::new(TuiInputPort::new(
        token,
        export_dir,
        cfg.session_page_size_or_default(),
        assignments,
        submissions,
        llm,
        teacher,
        grading,
        dashboard,
        analysis,
    ));

    input_port.run().await
}
