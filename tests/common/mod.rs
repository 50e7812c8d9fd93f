//! In-process stand-in for the SkillMatrix backend

#![allow(dead_code)]

use axum::extract::{Multipart, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};
use skillmatrix::config::{Config, OutputFormat};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

pub const PASSWORD: &str = "correct horse";

#[derive(Default)]
pub struct Recorded {
    pub calls: HashMap<&'static str, usize>,
    pub saved: Vec<Value>,
    pub uploads: Vec<(String, Option<String>, usize)>,
    pub last_generate: Option<Value>,
    pub last_analysis_job: Option<String>,
}

#[derive(Clone, Default)]
pub struct StubBackend {
    pub recorded: Arc<Mutex<Recorded>>,
}

impl StubBackend {
    pub fn calls(&self, endpoint: &str) -> usize {
        self.recorded.lock().unwrap().calls.get(endpoint).copied().unwrap_or(0)
    }

    fn hit(&self, endpoint: &'static str) {
        *self.recorded.lock().unwrap().calls.entry(endpoint).or_insert(0) += 1;
    }
}

pub struct Server {
    pub base_url: String,
    pub backend: StubBackend,
}

pub async fn spawn_backend() -> Server {
    let backend = StubBackend::default();
    let app = Router::new()
        .route("/login", post(login))
        .route("/signup", post(signup))
        .route("/dashboard", get(dashboard))
        .route("/update-profile", put(update_profile))
        .route("/admin/users", get(admin_users))
        .route("/upload", post(upload))
        .route("/generate", post(generate))
        .route("/grade-answer", post(grade_answer))
        .route("/get-answer", post(get_answer))
        .route("/save-question", post(save_question))
        .route("/get-saved-questions", get(saved_questions))
        .route("/analyze-resume", post(analyze_resume))
        .with_state(backend.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    Server {
        base_url: format!("http://{}", addr),
        backend,
    }
}

/// Client configuration pointing at the stub, with state kept under `dir`.
pub fn test_config(base_url: &str, dir: &Path) -> Config {
    let mut config = Config::default();
    config.backend.base_url = base_url.to_string();
    config.backend.timeout_secs = 5;
    config.session.token_file = dir.join("session.json");
    config.output.format = OutputFormat::Console;
    config.output.color_output = false;
    config
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

/// Tokens are `token-<email>`; the stub trusts whatever email is embedded.
fn authorize(headers: &HeaderMap) -> Result<String, Response> {
    let header = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| (StatusCode::UNAUTHORIZED, Json(json!({ "msg": "Missing Authorization Header" }))).into_response())?;
    header
        .strip_prefix("Bearer token-")
        .map(str::to_string)
        .ok_or_else(|| (StatusCode::UNPROCESSABLE_ENTITY, Json(json!({ "msg": "Not enough segments" }))).into_response())
}

fn profile(email: &str) -> Value {
    let role = if email.starts_with("admin") { "admin" } else { "user" };
    json!({
        "_id": "65f1a2b3c4d5e6f7a8b9c0d1",
        "name": "Ada Lovelace",
        "email": email,
        "role": role,
        "skills": ["Rust", "SQL"],
        "saved_questions": []
    })
}

async fn login(State(backend): State<StubBackend>, Json(body): Json<Value>) -> Response {
    backend.hit("login");
    let email = body["email"].as_str().unwrap_or_default();
    if body["password"] == PASSWORD {
        Json(json!({ "access_token": format!("token-{}", email) })).into_response()
    } else {
        error(StatusCode::UNAUTHORIZED, "Invalid credentials")
    }
}

async fn signup(State(backend): State<StubBackend>, Json(body): Json<Value>) -> Response {
    backend.hit("signup");
    if body["email"] == "taken@example.com" {
        return error(StatusCode::BAD_REQUEST, "Email already registered");
    }
    (StatusCode::CREATED, Json(json!({ "message": "User created successfully" }))).into_response()
}

async fn dashboard(State(backend): State<StubBackend>, headers: HeaderMap) -> Response {
    backend.hit("dashboard");
    match authorize(&headers) {
        Ok(email) => Json(profile(&email)).into_response(),
        Err(resp) => resp,
    }
}

async fn update_profile(State(backend): State<StubBackend>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    backend.hit("update-profile");
    let email = match authorize(&headers) {
        Ok(email) => email,
        Err(resp) => return resp,
    };
    let mut user = profile(&email);
    if let Some(name) = body.get("name") {
        user["name"] = name.clone();
    }
    if let Some(new_email) = body.get("email") {
        user["email"] = new_email.clone();
    }
    Json(json!({ "message": "Profile updated successfully", "user": user })).into_response()
}

async fn admin_users(State(backend): State<StubBackend>, headers: HeaderMap) -> Response {
    backend.hit("admin/users");
    match authorize(&headers) {
        Ok(email) if email.starts_with("admin") => Json(json!({
            "users": [profile("ada@example.com"), profile("grace@example.com")]
        }))
        .into_response(),
        Ok(_) => error(StatusCode::FORBIDDEN, "Unauthorized access"),
        Err(resp) => resp,
    }
}

async fn upload(State(backend): State<StubBackend>, headers: HeaderMap, mut multipart: Multipart) -> Response {
    backend.hit("upload");
    if let Err(resp) = authorize(&headers) {
        return resp;
    }
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await.unwrap();
        if name == "file" {
            backend
                .recorded
                .lock()
                .unwrap()
                .uploads
                .push((file_name.unwrap_or_default(), content_type, data.len()));
            return Json(json!({ "skills": ["Rust", "PostgreSQL", "Docker"] })).into_response();
        }
    }
    error(StatusCode::BAD_REQUEST, "No file uploaded")
}

async fn generate(State(backend): State<StubBackend>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    backend.hit("generate");
    if let Err(resp) = authorize(&headers) {
        return resp;
    }
    backend.recorded.lock().unwrap().last_generate = Some(body.clone());

    let skills: Vec<String> = body["skills"]
        .as_array()
        .map(|a| a.iter().filter_map(|s| s.as_str().map(str::to_string)).collect())
        .unwrap_or_default();
    let job = body["jobDescription"].as_str().unwrap_or_default();
    if skills.is_empty() && job.is_empty() {
        return error(StatusCode::BAD_REQUEST, "Either skills or job description must be provided");
    }

    let difficulty = body["difficulty"].as_str().unwrap_or("medium");
    let topics = if skills.is_empty() { vec!["General".to_string()] } else { skills };
    let questions: Vec<Value> = topics
        .iter()
        .map(|skill| {
            json!({
                "skill": skill,
                "type": "technical",
                "difficulty": difficulty,
                "question": format!("Explain a hard problem you solved with {}.", skill)
            })
        })
        .collect();
    Json(json!({ "questions": questions })).into_response()
}

async fn grade_answer(State(backend): State<StubBackend>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    backend.hit("grade-answer");
    if let Err(resp) = authorize(&headers) {
        return resp;
    }
    if body["userAnswer"].as_str().unwrap_or_default().is_empty() {
        return error(StatusCode::BAD_REQUEST, "Missing required fields");
    }
    Json(json!({
        "success": true,
        "grade": "Good",
        "strengths": ["Clear structure"],
        "weaknesses": ["No metrics"],
        "suggestions": ["Quantify the outcome"],
        "correctAnswer": "Describe the situation, the action and the measurable result."
    }))
    .into_response()
}

async fn get_answer(State(backend): State<StubBackend>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    backend.hit("get-answer");
    if let Err(resp) = authorize(&headers) {
        return resp;
    }
    let skill = body["skill"].as_str().unwrap_or_default();
    if skill == "Revoked" {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "msg": "Token has been revoked" }))).into_response();
    }
    Json(json!({
        "success": true,
        "answer": format!("Introduction:\n{} matters.\n\nKey Points:\n• First point\n• Second point\n\nConclusion:\nWrap up.", skill)
    }))
    .into_response()
}

async fn save_question(State(backend): State<StubBackend>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    backend.hit("save-question");
    if let Err(resp) = authorize(&headers) {
        return resp;
    }
    for key in ["question", "skill", "type", "difficulty"] {
        if body.get(key).is_none() {
            return error(StatusCode::BAD_REQUEST, "Missing required fields");
        }
    }
    backend.recorded.lock().unwrap().saved.push(body);
    Json(json!({ "message": "Question saved successfully" })).into_response()
}

async fn saved_questions(State(backend): State<StubBackend>, headers: HeaderMap) -> Response {
    backend.hit("get-saved-questions");
    if let Err(resp) = authorize(&headers) {
        return resp;
    }
    let saved: Vec<Value> = backend
        .recorded
        .lock()
        .unwrap()
        .saved
        .iter()
        .cloned()
        .map(|mut q| {
            q["saved_at"] = json!("Sat, 17 Oct 2026 09:30:00 GMT");
            q
        })
        .collect();
    Json(json!({ "saved_questions": saved })).into_response()
}

async fn analyze_resume(State(backend): State<StubBackend>, headers: HeaderMap, mut multipart: Multipart) -> Response {
    backend.hit("analyze-resume");
    if let Err(resp) = authorize(&headers) {
        return resp;
    }

    let mut has_resume = false;
    let mut job = String::new();
    while let Some(field) = multipart.next_field().await.unwrap() {
        match field.name().unwrap_or_default() {
            "resume" => {
                let _ = field.bytes().await.unwrap();
                has_resume = true;
            }
            "jobDescription" => job = field.text().await.unwrap(),
            _ => {}
        }
    }
    if !has_resume {
        return error(StatusCode::BAD_REQUEST, "No resume file uploaded");
    }
    backend.recorded.lock().unwrap().last_analysis_job = Some(job);

    Json(json!({
        "atsScore": 78,
        "jobMatchScore": 64,
        "scoreBreakdown": { "skillsMatch": 70, "experienceMatch": 60, "educationMatch": 55 },
        "matchingSkills": ["Rust"],
        "missingSkills": ["Kubernetes"],
        "atsIssues": ["Header uses a table"],
        "suggestions": [
            { "category": "skills", "suggestion": "Mention Kubernetes experience", "priority": "high" }
        ]
    }))
    .into_response()
}
