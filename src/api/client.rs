//! HTTP client for the SkillMatrix backend.
//!
//! Every backend call goes through [`ApiClient`]. Authenticated endpoints
//! attach the stored bearer token; a missing token fails before any request
//! is made. Failures are never retried.

use crate::api::models::*;
use crate::config::Config;
use crate::error::{Result, SkillMatrixError};
use crate::input::upload::{AnalysisUpload, ResumeUpload};
use log::{debug, warn};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.backend.base_url.clone(),
            Duration::from_secs(config.backend.timeout_secs),
        )
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, builder: RequestBuilder) -> Result<RequestBuilder> {
        let token = self.token.as_deref().ok_or(SkillMatrixError::NotAuthenticated)?;
        Ok(builder.bearer_auth(token))
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        let request = self
            .client
            .post(self.url("/login"))
            .json(&LoginRequest { email, password });
        self.send(request, "Login failed. Please try again.").await
    }

    pub async fn signup(&self, name: &str, email: &str, password: &str) -> Result<MessageResponse> {
        let request = self
            .client
            .post(self.url("/signup"))
            .json(&SignupRequest { name, email, password });
        self.send(request, "Signup failed. Please try again.").await
    }

    /// Bootstrap route for operators creating the first admin account.
    pub async fn create_admin(&self, name: &str, email: &str, password: &str) -> Result<MessageResponse> {
        let request = self
            .client
            .post(self.url("/create-admin"))
            .json(&SignupRequest { name, email, password });
        self.send(request, "Failed to create admin user").await
    }

    pub async fn dashboard(&self) -> Result<UserProfile> {
        let request = self.authorized(self.client.get(self.url("/dashboard")))?;
        self.send(request, "Failed to fetch user data").await
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<UpdateProfileResponse> {
        let request = self.authorized(self.client.put(self.url("/update-profile")))?.json(update);
        self.send(request, "Failed to update profile").await
    }

    pub async fn admin_users(&self) -> Result<Vec<UserProfile>> {
        let request = self.authorized(self.client.get(self.url("/admin/users")))?;
        let body: UsersResponse = self.send(request, "Failed to fetch users").await?;
        Ok(body.users)
    }

    /// Upload a résumé and return the skills the backend extracted from it.
    pub async fn upload_resume(&self, upload: &ResumeUpload) -> Result<Vec<String>> {
        let file = upload.file();
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(file.file_type.mime_type())?;
        let form = Form::new().part("file", part);

        let request = self.authorized(self.client.post(self.url("/upload")))?.multipart(form);
        let body: SkillsResponse = self
            .send(request, "Failed to upload file. Please try again.")
            .await?;
        Ok(body.skills)
    }

    pub async fn generate_questions(&self, request: &GenerateRequest) -> Result<Vec<GeneratedQuestion>> {
        let builder = self.authorized(self.client.post(self.url("/generate")))?.json(request);
        let body: QuestionsResponse = self
            .send(builder, "Failed to generate questions. Please try again.")
            .await?;
        Ok(body.questions)
    }

    pub async fn grade_answer(&self, question: &str, user_answer: &str, skill: &str) -> Result<GradeResult> {
        let request = self
            .authorized(self.client.post(self.url("/grade-answer")))?
            .json(&GradeRequest {
                question,
                user_answer,
                skill,
            });
        self.send(request, "Failed to grade answer").await
    }

    pub async fn get_answer(&self, question: &str, skill: &str, difficulty: &str) -> Result<String> {
        let request = self
            .authorized(self.client.post(self.url("/get-answer")))?
            .json(&AnswerRequest {
                question,
                skill,
                difficulty,
            });
        let body: AnswerResponse = self
            .send(request, "Failed to fetch model answer. Please try again.")
            .await?;
        Ok(body.answer)
    }

    pub async fn save_question(&self, question: &SaveQuestionRequest) -> Result<()> {
        let request = self
            .authorized(self.client.post(self.url("/save-question")))?
            .json(question);
        let _: MessageResponse = self.send(request, "Failed to save question").await?;
        Ok(())
    }

    pub async fn saved_questions(&self) -> Result<Vec<SavedQuestion>> {
        let request = self.authorized(self.client.get(self.url("/get-saved-questions")))?;
        let body: SavedQuestionsResponse = self
            .send(request, "Failed to fetch saved questions")
            .await?;
        Ok(body.saved_questions)
    }

    pub async fn analyze_resume(&self, upload: &AnalysisUpload) -> Result<ResumeAnalysis> {
        let file = upload.file();
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(file.file_type.mime_type())?;
        let form = Form::new()
            .part("resume", part)
            .text("jobDescription", upload.job_description().to_string());

        let request = self
            .authorized(self.client.post(self.url("/analyze-resume")))?
            .multipart(form);
        self.send(request, "Failed to analyze resume. Please try again.").await
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder, fallback: &str) -> Result<T> {
        let request = request.build()?;
        debug!("{} {}", request.method(), request.url().path());

        let response = self.client.execute(request).await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if status.is_success() {
            // Some endpoints answer 200 with an empty body.
            if bytes.iter().all(u8::is_ascii_whitespace) {
                return Ok(serde_json::from_str("{}")?);
            }
            return Ok(serde_json::from_slice(&bytes)?);
        }

        let message = serde_json::from_slice::<ErrorBody>(&bytes)
            .ok()
            .and_then(ErrorBody::into_message)
            .unwrap_or_else(|| fallback.to_string());
        warn!("Backend returned {}: {}", status.as_u16(), message);

        Err(classify_failure(status, message))
    }
}

fn classify_failure(status: StatusCode, message: String) -> SkillMatrixError {
    match status {
        // flask-jwt-extended answers malformed tokens with 422
        StatusCode::UNAUTHORIZED | StatusCode::UNPROCESSABLE_ENTITY => SkillMatrixError::Unauthorized(message),
        StatusCode::FORBIDDEN => SkillMatrixError::Forbidden(message),
        _ => SkillMatrixError::Api {
            status: status.as_u16(),
            message,
        },
    }
}
