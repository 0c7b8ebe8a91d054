//! Core domain layer. No I/O dependencies.
//!
//! Request/response shapes and the client error type. Dependencies flow inward.

pub mod analysis;
pub mod assignments;
pub mod dashboard;
pub mod entities;
pub mod errors;
pub mod grading;
pub mod llm;
pub mod submissions;
pub mod teacher;

pub use analysis::{
    LatestProfile, LongtermMemory, MemoryList, NightlyAnalysisRequest, ProfileAnalysisResult,
};
pub use assignments::{
    Assignment, AssignmentForm, AssignmentStatistics, AssignmentSummary, AssignmentUpdate,
    GradeDistribution, GradeExport, LetterGrade,
};
pub use dashboard::{
    AssignmentOverview, AssignmentsOverview, SchoolStatistics, StudentOverview, StudentsOverview,
    TeacherPerformance,
};
pub use entities::{UserSummary, epoch_to_utc, format_epoch};
pub use errors::ApiError;
pub use grading::{AiGradeResponse, GenerateRubricRequest, GenerateRubricResponse};
pub use llm::{
    ProxyMessageRequest, ProxyMessageResponse, SessionList, SessionMode, SessionModel,
    SessionTurns, TurnModel, TurnRole,
};
pub use submissions::{GradeForm, Submission, SubmissionForm, SubmissionUpdate};
pub use teacher::{DataSource, StudentInfo, TeacherAiRequest, TeacherAiResponse};
