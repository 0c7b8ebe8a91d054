//! Implements InputPort. Inquire-based interactive menu over the API services.

use crate::adapters::export::{parse_grade_export, save_grade_export};
use crate::domain::{AssignmentSummary, TeacherAiRequest, format_epoch};
use crate::ports::InputPort;
use crate::usecases::{
    AnalysisService, AssignmentService, DashboardService, GradingService, LlmService,
    SubmissionService, TeacherService,
};
use async_trait::async_trait;
use indicatif::ProgressBar;
use inquire::ui::{Color, RenderConfig, Styled};
use inquire::{InquireError, Select, Text};
use std::fmt;
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// Neon prompt styling shared by every inquire prompt.
pub fn apply_theme() {
    let config = RenderConfig::default()
        .with_prompt_prefix(Styled::new("›").with_fg(Color::LightMagenta))
        .with_highlighted_option_prefix(Styled::new("▸").with_fg(Color::LightCyan));
    inquire::set_global_render_config(config);
}

/// Runs `fut` behind a spinner; the spinner is cleared whatever the outcome.
async fn with_spinner<T>(message: &str, fut: impl Future<Output = T>) -> T {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    let out = fut.await;
    pb.finish_and_clear();
    out
}

fn is_cancel(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<InquireError>(),
        Some(InquireError::OperationCanceled | InquireError::OperationInterrupted)
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAction {
    Assignments,
    Statistics,
    ExportGrades,
    Submissions,
    AiGrade,
    Sessions,
    AskTeacherAi,
    Dashboard,
    Profile,
    Quit,
}

const MENU: [MenuAction; 10] = [
    MenuAction::Assignments,
    MenuAction::Statistics,
    MenuAction::ExportGrades,
    MenuAction::Submissions,
    MenuAction::AiGrade,
    MenuAction::Sessions,
    MenuAction::AskTeacherAi,
    MenuAction::Dashboard,
    MenuAction::Profile,
    MenuAction::Quit,
];

impl fmt::Display for MenuAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MenuAction::Assignments => "List assignments",
            MenuAction::Statistics => "Assignment statistics",
            MenuAction::ExportGrades => "Export grades (CSV)",
            MenuAction::Submissions => "Submissions for an assignment",
            MenuAction::AiGrade => "AI-grade a submission",
            MenuAction::Sessions => "My LLM sessions",
            MenuAction::AskTeacherAi => "Ask teacher AI about a student",
            MenuAction::Dashboard => "School dashboard",
            MenuAction::Profile => "Learner profile",
            MenuAction::Quit => "Quit",
        };
        f.write_str(label)
    }
}

fn assignment_label(a: &AssignmentSummary) -> String {
    format!("{}  (due {}, {})", a.title, a.due_date, a.status)
}

/// TUI adapter. Inquire prompts, one API call per step.
pub struct TuiInputPort {
    token: String,
    export_dir: PathBuf,
    session_page_size: u32,
    assignments: Arc<AssignmentService>,
    submissions: Arc<SubmissionService>,
    llm: Arc<LlmService>,
    teacher: Arc<TeacherService>,
    grading: Arc<GradingService>,
    dashboard: Arc<DashboardService>,
    analysis: Arc<AnalysisService>,
}

impl TuiInputPort {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        token: String,
        export_dir: PathBuf,
        session_page_size: u32,
        assignments: Arc<AssignmentService>,
        submissions: Arc<SubmissionService>,
        llm: Arc<LlmService>,
        teacher: Arc<TeacherService>,
        grading: Arc<GradingService>,
        dashboard: Arc<DashboardService>,
        analysis: Arc<AnalysisService>,
    ) -> Self {
        Self {
            token,
            export_dir,
            session_page_size,
            assignments,
            submissions,
            llm,
            teacher,
            grading,
            dashboard,
            analysis,
        }
    }

    /// Lets the user pick an assignment; `None` when there are none.
    async fn pick_assignment(&self) -> anyhow::Result<Option<AssignmentSummary>> {
        let mut list = with_spinner(
            "Loading assignments...",
            self.assignments.get_assignment_list(&self.token, None),
        )
        .await?;
        if list.is_empty() {
            println!("No assignments.");
            return Ok(None);
        }
        let labels: Vec<String> = list.iter().map(assignment_label).collect();
        let picked = Select::new("Assignment", labels).raw_prompt()?;
        Ok(Some(list.swap_remove(picked.index)))
    }

    async fn dispatch(&self, action: MenuAction) -> anyhow::Result<()> {
        match action {
            MenuAction::Assignments => self.list_assignments().await,
            MenuAction::Statistics => self.show_statistics().await,
            MenuAction::ExportGrades => self.export_grades().await,
            MenuAction::Submissions => self.list_submissions().await,
            MenuAction::AiGrade => self.ai_grade().await,
            MenuAction::Sessions => self.browse_sessions().await,
            MenuAction::AskTeacherAi => self.ask_teacher_ai().await,
            MenuAction::Dashboard => self.show_dashboard().await,
            MenuAction::Profile => self.show_profile().await,
            MenuAction::Quit => Ok(()),
        }
    }

    async fn list_assignments(&self) -> anyhow::Result<()> {
        let all = with_spinner(
            "Loading assignments...",
            self.assignments.get_assignments(&self.token),
        )
        .await?;
        if all.is_empty() {
            println!("No assignments.");
        }
        for a in &all {
            let owner = a
                .user
                .as_ref()
                .or(a.teacher.as_ref())
                .map(|u| u.name.as_str())
                .unwrap_or("-");
            println!(
                "{:<38} {:<30} due {:<12} {:<10} by {}",
                a.id, a.title, a.due_date, a.status, owner
            );
        }
        Ok(())
    }

    async fn show_statistics(&self) -> anyhow::Result<()> {
        let Some(assignment) = self.pick_assignment().await? else {
            return Ok(());
        };
        let stats = with_spinner(
            "Computing statistics...",
            self.assignments
                .get_assignment_statistics(&self.token, &assignment.id),
        )
        .await?;

        println!("{}", assignment.title);
        println!(
            "  submitted {}/{} ({:.1}%), graded {}",
            stats.submitted_count, stats.total_students, stats.submission_rate, stats.graded_count
        );
        println!(
            "  score avg {:.1}  max {}  min {}",
            stats.avg_score, stats.max_score, stats.min_score
        );
        for (grade, count) in stats.grade_distribution.iter() {
            println!("  {} {:>3} {}", grade, count, "#".repeat(count as usize));
        }
        Ok(())
    }

    async fn export_grades(&self) -> anyhow::Result<()> {
        let Some(assignment) = self.pick_assignment().await? else {
            return Ok(());
        };
        let export = with_spinner(
            "Downloading grade export...",
            self.assignments
                .export_assignment_grades(&self.token, &assignment.id),
        )
        .await?;
        let path = save_grade_export(&self.export_dir, &assignment.id, &export).await?;

        match parse_grade_export(&export) {
            Ok(rows) => {
                println!("Saved {} rows to {}", rows.len(), path.display());
                for row in rows {
                    println!(
                        "  {:<20} {:<28} {:<6} {:>6} {}",
                        row.student_name,
                        row.student_email,
                        row.status,
                        row.score.map(|s| format!("{:.1}", s)).unwrap_or_default(),
                        row.grade.unwrap_or_default()
                    );
                }
            }
            Err(e) => {
                warn!(error = %e, "export saved but could not be parsed as CSV");
                println!("Saved {} bytes to {}", export.len(), path.display());
            }
        }
        Ok(())
    }

    async fn list_submissions(&self) -> anyhow::Result<()> {
        let Some(assignment) = self.pick_assignment().await? else {
            return Ok(());
        };
        let subs = with_spinner(
            "Loading submissions...",
            self.submissions
                .get_submissions_by_assignment_id(&self.token, &assignment.id),
        )
        .await?;
        if subs.is_empty() {
            println!("No submissions yet.");
        }
        for s in &subs {
            let who = s
                .student
                .as_ref()
                .map(|u| u.name.clone())
                .unwrap_or_else(|| s.student_id.clone());
            let submitted = s.submitted_at.map(format_epoch).unwrap_or_default();
            println!(
                "{:<38} {:<20} {:<10} {:>6} {:<2} {}",
                s.id,
                who,
                s.status,
                s.score.map(|v| format!("{:.1}", v)).unwrap_or_default(),
                s.grade.as_deref().unwrap_or(""),
                submitted
            );
        }
        Ok(())
    }

    async fn ai_grade(&self) -> anyhow::Result<()> {
        let Some(assignment) = self.pick_assignment().await? else {
            return Ok(());
        };
        let mut subs = self
            .submissions
            .get_submissions_by_assignment_id(&self.token, &assignment.id)
            .await?;
        if subs.is_empty() {
            println!("No submissions to grade.");
            return Ok(());
        }
        let labels: Vec<String> = subs
            .iter()
            .map(|s| format!("{} [{}]", s.id, s.status))
            .collect();
        let picked = Select::new("Submission", labels).raw_prompt()?;
        let submission = subs.swap_remove(picked.index);

        let draft = with_spinner(
            "Asking the AI grader...",
            self.grading.request_ai_grading(&self.token, &submission.id),
        )
        .await?;
        for (criterion, score) in &draft.rubric_scores {
            println!("  {:<20} {:.1}/5", criterion, score);
        }
        if let Some(total) = draft.total_score {
            println!("  total {:.2}", total);
        }
        println!("\n{}", draft.feedback_draft);
        Ok(())
    }

    async fn browse_sessions(&self) -> anyhow::Result<()> {
        let mut list = with_spinner(
            "Loading sessions...",
            self.llm
                .get_user_sessions(&self.token, 0, self.session_page_size),
        )
        .await?;
        if list.sessions.is_empty() {
            println!("No sessions.");
            return Ok(());
        }
        let labels: Vec<String> = list
            .sessions
            .iter()
            .map(|s| format!("{} [{}] {}", format_epoch(s.started_at), s.mode, s.id))
            .collect();
        let picked = Select::new("Session", labels).raw_prompt()?;
        let session = list.sessions.swap_remove(picked.index);

        let detail = with_spinner(
            "Loading turns...",
            self.llm.get_session_turns(&self.token, &session.id),
        )
        .await?;
        for turn in &detail.turns {
            println!("[{:?}] {}", turn.role, turn.content);
        }
        println!(
            "-- {} turns, {} tokens, cost {}",
            detail.turns.len(),
            detail.total_tokens(),
            detail.total_cost()
        );
        Ok(())
    }

    async fn ask_teacher_ai(&self) -> anyhow::Result<()> {
        let mut students = with_spinner(
            "Loading students...",
            self.teacher.get_student_list(&self.token),
        )
        .await?;
        if students.is_empty() {
            println!("No students visible.");
            return Ok(());
        }
        let labels: Vec<String> = students
            .iter()
            .map(|s| format!("{} <{}>", s.name, s.email))
            .collect();
        let picked = Select::new("Student", labels).raw_prompt()?;
        let student = students.swap_remove(picked.index);

        let question = Text::new("Question:").prompt()?;
        let context = Text::new("Context (optional, e.g. assignment id):")
            .prompt_skippable()?
            .filter(|c| !c.trim().is_empty());

        let request = TeacherAiRequest {
            student_id: student.id,
            question,
            context,
        };
        let answer = with_spinner(
            "Thinking...",
            self.teacher.ask_teacher_ai(&self.token, &request),
        )
        .await?;
        println!("{}\n", answer.answer);
        println!(
            "Based on {} conversations and {} assignments ({}) for {}",
            answer.data_sources.conversation_count,
            answer.data_sources.assignment_count,
            answer.data_sources.date_range,
            answer.student_name
        );
        Ok(())
    }

    async fn show_dashboard(&self) -> anyhow::Result<()> {
        let (stats, performance) = with_spinner("Loading dashboard...", async {
            tokio::join!(
                self.dashboard.get_school_statistics(&self.token),
                self.dashboard.get_teachers_performance(&self.token),
            )
        })
        .await;
        let stats = stats?;
        println!(
            "students {}  teachers {}  assignments {}  submissions {}  completion {:.2}%",
            stats.total_students,
            stats.total_teachers,
            stats.total_assignments,
            stats.total_submissions,
            stats.average_completion_rate
        );
        for t in performance? {
            println!(
                "  {:<24} assignments {:>3}  avg score {:.2}",
                t.teacher_name, t.assignment_count, t.avg_student_score
            );
        }
        Ok(())
    }

    async fn show_profile(&self) -> anyhow::Result<()> {
        let user_id = Text::new("User id:").prompt()?;
        let profile = with_spinner(
            "Loading profile...",
            self.analysis.get_latest_profile(&self.token, user_id.trim()),
        )
        .await?;
        println!("Profile {} (updated {})", profile.memory_id, format_epoch(profile.updated_at));
        println!("{}", serde_json::to_string_pretty(&profile.profile)?);
        Ok(())
    }
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> anyhow::Result<()> {
        loop {
            let action = match Select::new("Main menu", MENU.to_vec()).prompt() {
                Ok(action) => action,
                Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
                Err(e) => return Err(e.into()),
            };
            if action == MenuAction::Quit {
                break;
            }
            if let Err(e) = self.dispatch(action).await {
                if is_cancel(&e) {
                    continue;
                }
                warn!(action = %action, error = %e, "action failed");
                eprintln!("✗ {}", e);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_ends_with_quit() {
        assert_eq!(MENU.last(), Some(&MenuAction::Quit));
        assert_eq!(MenuAction::ExportGrades.to_string(), "Export grades (CSV)");
    }

    #[test]
    fn test_cancel_detection() {
        assert!(is_cancel(&anyhow::Error::new(InquireError::OperationCanceled)));
        assert!(!is_cancel(&anyhow::anyhow!("Forbidden")));
    }

    #[test]
    fn test_assignment_label() {
        let a = AssignmentSummary {
            id: "a1".to_string(),
            title: "Essay".to_string(),
            due_date: "2025-01-31".to_string(),
            status: "pending".to_string(),
            updated_at: 0,
            created_at: 0,
        };
        assert_eq!(assignment_label(&a), "Essay  (due 2025-01-31, pending)");
    }
}
