//! Grade export handling. Parses and persists the CSV returned by the export endpoint.

pub mod grades_csv;

pub use grades_csv::{GradeExportRow, parse_grade_export, save_grade_export};
