//! Application use cases. One service per API area, all sharing one ApiClient.

pub mod analysis_service;
pub mod api_client;
pub mod assignment_service;
pub mod dashboard_service;
pub mod grading_service;
pub mod llm_service;
pub mod submission_service;
pub mod teacher_service;

pub use analysis_service::AnalysisService;
pub use api_client::{ApiClient, ApiRequest};
pub use assignment_service::AssignmentService;
pub use dashboard_service::DashboardService;
pub use grading_service::GradingService;
pub use llm_service::LlmService;
pub use submission_service::SubmissionService;
pub use teacher_service::TeacherService;
