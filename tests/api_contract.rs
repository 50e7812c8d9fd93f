//! ApiClient against the stub backend

mod common;

use common::{spawn_backend, PASSWORD};
use skillmatrix::api::models::{Difficulty, ExperienceLevel, GenerateRequest, ProfileUpdate, QuestionTypes, Role};
use skillmatrix::input::upload::{validate_analysis_upload, validate_resume_upload, UploadFile};
use skillmatrix::{ApiClient, SkillMatrixError};
use std::time::Duration;

fn client(base_url: &str) -> ApiClient {
    ApiClient::new(base_url, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn login_token_is_accepted_by_authenticated_calls() {
    let server = spawn_backend().await;
    let anonymous = client(&server.base_url);

    let login = anonymous.login("ada@example.com", PASSWORD).await.unwrap();
    let authed = anonymous.clone().with_token(login.access_token);

    let profile = authed.dashboard().await.unwrap();
    assert_eq!(profile.email, "ada@example.com");
    assert_eq!(profile.role, Role::User);
    assert_eq!(profile.skills, vec!["Rust", "SQL"]);
}

#[tokio::test]
async fn bad_credentials_surface_backend_message() {
    let server = spawn_backend().await;
    let err = client(&server.base_url)
        .login("ada@example.com", "wrong")
        .await
        .unwrap_err();

    assert!(matches!(err, SkillMatrixError::Unauthorized(_)));
    assert_eq!(err.user_message(), "Invalid credentials");
}

#[tokio::test]
async fn signup_reports_message_or_conflict() {
    let server = spawn_backend().await;
    let api = client(&server.base_url);

    let ok = api.signup("Ada", "ada@example.com", PASSWORD).await.unwrap();
    assert_eq!(ok.message, "User created successfully");

    let err = api.signup("Ada", "taken@example.com", PASSWORD).await.unwrap_err();
    assert!(matches!(err, SkillMatrixError::Api { status: 400, .. }));
    assert_eq!(err.user_message(), "Email already registered");
}

#[tokio::test]
async fn malformed_token_is_unauthorized() {
    let server = spawn_backend().await;
    let err = client(&server.base_url)
        .with_token("garbage")
        .dashboard()
        .await
        .unwrap_err();
    assert!(err.is_auth_failure());
    assert_eq!(err.user_message(), "Not enough segments");
}

#[tokio::test]
async fn admin_listing_requires_admin_role() {
    let server = spawn_backend().await;

    let users = client(&server.base_url)
        .with_token("token-admin@example.com")
        .admin_users()
        .await
        .unwrap();
    assert_eq!(users.len(), 2);

    let err = client(&server.base_url)
        .with_token("token-ada@example.com")
        .admin_users()
        .await
        .unwrap_err();
    assert!(matches!(err, SkillMatrixError::Forbidden(_)));
}

#[tokio::test]
async fn update_profile_returns_user() {
    let server = spawn_backend().await;
    let update = ProfileUpdate::new(Some("Ada King".into()), None, None);
    let response = client(&server.base_url)
        .with_token("token-ada@example.com")
        .update_profile(&update)
        .await
        .unwrap();
    assert_eq!(response.user.name, "Ada King");
    assert_eq!(response.message, "Profile updated successfully");
}

#[tokio::test]
async fn resume_upload_sends_pdf_multipart() {
    let server = spawn_backend().await;
    let file = UploadFile::from_bytes("cv.pdf", b"%PDF-1.4 test".to_vec());
    let upload = validate_resume_upload(file, 2 * 1024 * 1024).unwrap();

    let skills = client(&server.base_url)
        .with_token("token-ada@example.com")
        .upload_resume(&upload)
        .await
        .unwrap();
    assert_eq!(skills, vec!["Rust", "PostgreSQL", "Docker"]);

    let recorded = server.backend.recorded.lock().unwrap();
    assert_eq!(
        recorded.uploads,
        vec![("cv.pdf".to_string(), Some("application/pdf".to_string()), 13)]
    );
}

#[tokio::test]
async fn generate_sends_camel_case_body() {
    let server = spawn_backend().await;
    let request = GenerateRequest {
        skills: vec!["Rust".into(), "SQL".into()],
        job_description: "Platform engineer".into(),
        experience_level: ExperienceLevel::Senior,
        question_types: QuestionTypes::default(),
        difficulty: Difficulty::Hard,
    };

    let questions = client(&server.base_url)
        .with_token("token-ada@example.com")
        .generate_questions(&request)
        .await
        .unwrap();
    assert_eq!(questions.len(), 2);
    assert_eq!(questions[0].difficulty, "hard");

    let body = server.backend.recorded.lock().unwrap().last_generate.clone().unwrap();
    assert_eq!(body["experienceLevel"], "senior");
    assert_eq!(body["jobDescription"], "Platform engineer");
    assert_eq!(body["questionTypes"]["situational"], true);
}

#[tokio::test]
async fn grading_answer_and_model_answer() {
    let server = spawn_backend().await;
    let api = client(&server.base_url).with_token("token-ada@example.com");

    let grade = api.grade_answer("What is ownership?", "Single owner", "Rust").await.unwrap();
    assert_eq!(grade.grade, "Good");
    assert_eq!(grade.suggestions, vec!["Quantify the outcome"]);
    assert!(grade.correct_answer.is_some());

    let answer = api.get_answer("What is ownership?", "Rust", "medium").await.unwrap();
    assert!(answer.starts_with("Introduction:"));
    assert!(answer.contains("• First point"));
}

#[tokio::test]
async fn saved_questions_round_trip_through_backend() {
    let server = spawn_backend().await;
    let api = client(&server.base_url).with_token("token-ada@example.com");

    let request = skillmatrix::api::models::SaveQuestionRequest {
        question: "Describe a deadlock.".into(),
        skill: "Concurrency".into(),
        question_type: "technical".into(),
        difficulty: "hard".into(),
    };
    api.save_question(&request).await.unwrap();

    let saved = api.saved_questions().await.unwrap();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].question_type, "technical");
    assert!(saved[0].saved_at.is_some());
}

#[tokio::test]
async fn analysis_sends_resume_and_job_description() {
    let server = spawn_backend().await;
    let file = UploadFile::from_bytes("cv.docx", b"PK docx".to_vec());
    let upload = validate_analysis_upload(file, "Staff engineer, Rust").unwrap();

    let analysis = client(&server.base_url)
        .with_token("token-ada@example.com")
        .analyze_resume(&upload)
        .await
        .unwrap();
    assert_eq!(analysis.ats_score, 78);
    assert_eq!(analysis.missing_skills, vec!["Kubernetes"]);
    assert_eq!(analysis.score_breakdown.unwrap().skills_match, 70);

    let job = server.backend.recorded.lock().unwrap().last_analysis_job.clone();
    assert_eq!(job.as_deref(), Some("Staff engineer, Rust"));
}

#[tokio::test]
async fn unreachable_backend_is_http_error() {
    let api = ApiClient::new("http://127.0.0.1:9", Duration::from_secs(2))
        .unwrap()
        .with_token("token-ada@example.com");
    let err = api.dashboard().await.unwrap_err();
    assert!(matches!(err, SkillMatrixError::Http(_)));
}
