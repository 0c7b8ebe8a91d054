//! School leader dashboard shapes.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchoolStatistics {
    pub total_students: u32,
    pub total_teachers: u32,
    pub total_assignments: u32,
    pub total_submissions: u32,
    pub average_completion_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeacherPerformance {
    pub teacher_id: String,
    pub teacher_name: String,
    pub student_count: u32,
    pub assignment_count: u32,
    pub avg_student_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentOverview {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    pub submissions_count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudentsOverview {
    #[serde(default)]
    pub students: Vec<StudentOverview>,
    pub total: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentOverview {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub teacher_id: Option<String>,
    pub due_date: String,
    pub submissions_count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssignmentsOverview {
    #[serde(default)]
    pub assignments: Vec<AssignmentOverview>,
    pub total: u32,
}
