//! Grade export CSV.
//!
//! The server writes one header row followed by one row per submission:
//! student name, student email, status label, score, grade, submitted at, graded at.
//! Header text is localized, so columns are read by position.

use crate::domain::GradeExport;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::info;

/// One exported submission row. Empty cells become `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct GradeExportRow {
    pub student_name: String,
    pub student_email: String,
    pub status: String,
    pub score: Option<f64>,
    pub grade: Option<String>,
    pub submitted_at: Option<String>,
    pub graded_at: Option<String>,
}

fn cell(record: &csv::StringRecord, idx: usize) -> Option<String> {
    record
        .get(idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Parse the export body. Short rows are tolerated (missing cells are `None`/empty).
pub fn parse_grade_export(export: &GradeExport) -> Result<Vec<GradeExportRow>, csv::Error> {
    let data = export
        .data
        .strip_prefix("\u{feff}".as_bytes())
        .unwrap_or(&export.data);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(data);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(GradeExportRow {
            student_name: cell(&record, 0).unwrap_or_default(),
            student_email: cell(&record, 1).unwrap_or_default(),
            status: cell(&record, 2).unwrap_or_default(),
            score: cell(&record, 3).and_then(|s| s.parse().ok()),
            grade: cell(&record, 4),
            submitted_at: cell(&record, 5),
            graded_at: cell(&record, 6),
        });
    }
    Ok(rows)
}

async fn write_and_replace(temp_path: &Path, target: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut f = fs::File::create(temp_path).await?;
    f.write_all(data).await?;
    f.sync_all().await?;
    drop(f);
    fs::rename(temp_path, target).await
}

/// Write the export into `dir` under its server-provided name.
///
/// Atomic save: write to a temp file, sync, then rename over the target.
pub async fn save_grade_export(
    dir: &Path,
    assignment_id: &str,
    export: &GradeExport,
) -> std::io::Result<PathBuf> {
    fs::create_dir_all(dir).await?;
    let target = dir.join(export.filename_or_default(assignment_id));
    let temp_path = target.with_extension("csv.tmp");

    if let Err(e) = write_and_replace(&temp_path, &target, &export.data).await {
        let _ = fs::remove_file(&temp_path).await;
        return Err(e);
    }
    info!(path = %target.display(), bytes = export.len(), "grade export saved");
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn export(body: &str) -> GradeExport {
        GradeExport {
            data: body.as_bytes().to_vec(),
            content_type: Some("text/csv".to_string()),
            filename: None,
        }
    }

    const SAMPLE: &str = "\u{feff}学生姓名,学生邮箱,提交状态,得分,等级,提交时间,批改时间\r\n\
        Ada,ada@example.com,已批改,91.5,A,2025-01-20 10:00,2025-01-22 09:30\r\n\
        Grace,grace@example.com,已提交,,,2025-01-21 11:00,\r\n";

    #[test]
    fn test_parse_rows() {
        let rows = parse_grade_export(&export(SAMPLE)).unwrap();
        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0].student_name, "Ada");
        assert_eq!(rows[0].score, Some(91.5));
        assert_eq!(rows[0].grade.as_deref(), Some("A"));
        assert_eq!(rows[0].graded_at.as_deref(), Some("2025-01-22 09:30"));

        assert_eq!(rows[1].status, "已提交");
        assert_eq!(rows[1].score, None);
        assert_eq!(rows[1].grade, None);
        assert_eq!(rows[1].graded_at, None);
    }

    #[test]
    fn test_header_only_export() {
        let rows = parse_grade_export(&export("name,email,status,score,grade,submitted,graded\n"))
            .unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_save_uses_server_filename() {
        let dir = std::env::temp_dir().join(format!("classroom-export-{}", std::process::id()));
        let mut e = export(SAMPLE);
        e.filename = Some("assignment_a9_grades.csv".to_string());

        let path = save_grade_export(&dir, "a9", &e).await.unwrap();
        assert_eq!(path.file_name().unwrap(), "assignment_a9_grades.csv");
        assert_eq!(tokio::fs::read(&path).await.unwrap(), SAMPLE.as_bytes());

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn test_failed_save_leaves_no_temp_file() {
        let dir = std::env::temp_dir().join(format!("classroom-export-fail-{}", std::process::id()));
        // A directory at the target path makes the final rename fail.
        let target = dir.join("assignment_a3_grades.csv");
        tokio::fs::create_dir_all(target.join("occupied")).await.unwrap();

        let result = save_grade_export(&dir, "a3", &export(SAMPLE)).await;
        assert!(result.is_err());
        assert!(!tokio::fs::try_exists(target.with_extension("csv.tmp")).await.unwrap());

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }
}
