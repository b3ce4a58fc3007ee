// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::memory_database;
use resultrs::domain::models::transcript::{
    NormalizedResult, ResultVariant, SemesterResult, SubjectRecord,
};
use resultrs::domain::repositories::transcript_repository::TranscriptRepository;
use resultrs::infrastructure::repositories::transcript_repo_impl::TranscriptRepositoryImpl;

fn result(name: &str, grade: &str) -> NormalizedResult {
    NormalizedResult {
        hall_ticket: "20J41A0501".to_string(),
        name: name.to_string(),
        father_name: "A FATHER".to_string(),
        college: None,
        college_code: "J4".to_string(),
        branch: Some("Computer Science and Engineering".to_string()),
        semesters: vec![SemesterResult {
            semester: "1-1".to_string(),
            subjects: vec![SubjectRecord {
                subject_code: "CS301".to_string(),
                subject_name: "Data Structures".to_string(),
                exam_code: "1391".to_string(),
                grade: grade.to_string(),
                credits: "3".to_string(),
                semester: "1-1".to_string(),
                attempt: ResultVariant::Recorrection,
                internal: None,
                external: None,
                total: None,
            }],
        }],
    }
}

#[tokio::test]
async fn test_missing_row_returns_none() {
    let repo = TranscriptRepositoryImpl::new(memory_database().await);
    assert!(repo.get("20J41A0501").await.unwrap().is_none());
}

#[tokio::test]
async fn test_put_upserts_by_hall_ticket() {
    let repo = TranscriptRepositoryImpl::new(memory_database().await);

    repo.put("20J41A0501", &result("A STUDENT", "B")).await.unwrap();
    let stored = repo.get("20J41A0501").await.unwrap().unwrap();
    assert_eq!(stored, result("A STUDENT", "B"));

    // A second write for the same hall ticket replaces the row
    repo.put("20J41A0501", &result("A STUDENT", "A+")).await.unwrap();
    let stored = repo.get("20J41A0501").await.unwrap().unwrap();
    assert_eq!(stored.semesters[0].subjects[0].grade, "A+");
    assert_eq!(stored.semesters[0].subjects[0].attempt, ResultVariant::Recorrection);
}
