//! Command handlers shared by the binary and the integration tests

use crate::api::models::{ProfileUpdate, SaveQuestionRequest};
use crate::api::ApiClient;
use crate::cli::{AdminAction, ConfigAction, GenerateArgs, JobArgs, ProfileAction};
use crate::config::Config;
use crate::error::{Result, SkillMatrixError};
use crate::input::job_description::{JobDescriptionLoader, JobDescriptionSource};
use crate::input::upload::{load_resume_upload, validate_analysis_upload, UploadFile};
use crate::output::{formatter_for, save_output_to_file, OutputFormatter};
use crate::session::{GeneratorForm, QuestionBoard, Route, RouteGuard, StoredSession, TokenStore};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

pub struct App {
    config: Config,
    config_path: PathBuf,
    tokens: TokenStore,
    formatter: Box<dyn OutputFormatter>,
    save_to: Option<PathBuf>,
}

impl App {
    pub fn new(config: Config, config_path: PathBuf, save_to: Option<PathBuf>) -> Self {
        let tokens = TokenStore::new(config.session.token_file.clone());
        let formatter = formatter_for(config.output.format, config.output.color_output);
        Self {
            config,
            config_path,
            tokens,
            formatter,
            save_to,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    /// Client for a public endpoint.
    fn public_client(&self) -> Result<ApiClient> {
        ApiClient::from_config(&self.config)
    }

    /// Client for a protected view; unauthenticated callers are sent to login.
    fn client_for(&self, route: Route) -> Result<ApiClient> {
        let token = self.tokens.token()?;
        if RouteGuard::resolve(route, token.as_deref(), None) == Route::Login {
            return Err(SkillMatrixError::NotAuthenticated);
        }
        let client = self.public_client()?;
        Ok(match token {
            Some(token) => client.with_token(token),
            None => client,
        })
    }

    /// Drop the stored token when the backend rejects it.
    fn check_auth<T>(&self, result: Result<T>) -> Result<T> {
        if let Err(e) = &result {
            if e.is_auth_failure() {
                warn!("Session rejected by backend; clearing stored token");
                self.tokens.clear()?;
            }
        }
        result
    }

    fn emit(&self, content: &str) -> Result<()> {
        println!("{}", content);
        if let Some(path) = &self.save_to {
            save_output_to_file(content, path)?;
            info!("Output saved to {}", path.display());
        }
        Ok(())
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<Route> {
        let client = self.public_client()?;
        let response = with_spinner("Logging in...", client.login(email, password)).await?;
        self.tokens
            .save(&StoredSession::new(response.access_token.clone(), email))?;

        let profile = client.with_token(response.access_token).dashboard().await;
        let role = profile.as_ref().ok().map(|p| p.role);
        let route = RouteGuard::resolve(Route::Dashboard, self.tokens.token()?.as_deref(), role);

        println!("✅ Login successful! Redirecting to {}", route);
        Ok(route)
    }

    pub async fn signup(&self, name: &str, email: &str, password: &str) -> Result<()> {
        let client = self.public_client()?;
        let response = with_spinner("Creating account...", client.signup(name, email, password)).await?;
        println!("✅ {}", response.message);
        println!("💡 Log in with: skillmatrix login --email {} --password <password>", email);
        Ok(())
    }

    pub fn logout(&self) -> Result<()> {
        if self.tokens.clear()? {
            println!("👋 Logged out");
        } else {
            println!("⚠️  No active session");
        }
        Ok(())
    }

    pub async fn whoami(&self) -> Result<Route> {
        let client = self.client_for(Route::Dashboard)?;
        let profile = self.check_auth(with_spinner("Loading profile...", client.dashboard()).await)?;
        self.emit(&self.formatter.format_profile(&profile)?)?;

        let route = RouteGuard::resolve(Route::Dashboard, client.token(), Some(profile.role));
        if route == Route::AdminDashboard {
            println!("🛡️  Administrator account: see `skillmatrix admin users`");
        }
        Ok(route)
    }

    pub async fn profile(&self, action: ProfileAction) -> Result<()> {
        match action {
            ProfileAction::Update { name, email, password } => {
                let update = ProfileUpdate::new(name, email, password);
                if update.is_empty() {
                    return Err(SkillMatrixError::InvalidInput("No fields to update".to_string()));
                }
                let client = self.client_for(Route::Dashboard)?;
                let response = self.check_auth(
                    with_spinner("Updating profile...", client.update_profile(&update)).await,
                )?;
                let message = if response.message.is_empty() {
                    "Profile updated successfully"
                } else {
                    response.message.as_str()
                };
                println!("✅ {}", message);
                self.emit(&self.formatter.format_profile(&response.user)?)?;
            }
        }
        Ok(())
    }

    pub async fn admin(&self, action: AdminAction) -> Result<()> {
        match action {
            AdminAction::Users => {
                let client = self.client_for(Route::AdminDashboard)?;
                let profile = self.check_auth(with_spinner("Checking access...", client.dashboard()).await)?;
                let route = RouteGuard::resolve(Route::AdminDashboard, client.token(), Some(profile.role));
                if route != Route::AdminDashboard {
                    return Err(SkillMatrixError::Forbidden(format!(
                        "Admin access required. Redirecting to {}",
                        route
                    )));
                }
                let users = self.check_auth(with_spinner("Loading users...", client.admin_users()).await)?;
                self.emit(&self.formatter.format_users(&users)?)?;
            }
            AdminAction::Create { name, email, password } => {
                let client = self.public_client()?;
                let response = with_spinner("Creating admin...", client.create_admin(&name, &email, &password)).await?;
                println!("✅ {}", response.message);
            }
        }
        Ok(())
    }

    pub async fn upload(&self, path: &Path) -> Result<Vec<String>> {
        let upload = load_resume_upload(path, self.config.upload.max_resume_bytes).await?;

        let client = self.client_for(Route::Dashboard)?;
        let skills = self.check_auth(with_spinner("Uploading...", client.upload_resume(&upload)).await)?;
        self.emit(&self.formatter.format_skills(&skills)?)?;
        Ok(skills)
    }

    /// Fill the generator form from CLI flags and, if asked, the profile's skills.
    async fn build_form(&self, client: &ApiClient, args: &GenerateArgs) -> Result<GeneratorForm> {
        let experience = args
            .experience_level(self.config.generator.experience_level)
            .map_err(SkillMatrixError::InvalidInput)?;
        let difficulty = args
            .difficulty(self.config.generator.difficulty)
            .map_err(SkillMatrixError::InvalidInput)?;

        let mut form = GeneratorForm::new(experience, difficulty);
        form.question_types = args.question_types();

        if args.from_profile {
            let profile = self.check_auth(client.dashboard().await)?;
            for skill in &profile.skills {
                form.skills.add_custom(skill);
            }
        }
        for skill in &args.skills {
            form.skills.add_custom(skill);
        }

        form.job_description = load_job_description(&args.job).await?;
        Ok(form)
    }

    pub async fn generate(&self, args: &GenerateArgs) -> Result<QuestionBoard> {
        let client = self.client_for(Route::Dashboard)?;
        let form = self.build_form(&client, args).await?;
        let request = form.to_request()?;

        let questions = self.check_auth(
            with_spinner("Generating questions...", client.generate_questions(&request)).await,
        )?;
        self.emit(&self.formatter.format_questions(&questions)?)?;

        let mut board = QuestionBoard::new();
        board.replace(questions);

        if args.save_all {
            let ids: Vec<String> = board.questions().iter().map(|q| q.id.clone()).collect();
            let mut saved = 0;
            for id in ids {
                if save_on_board(&client, &mut board, &id).await? {
                    saved += 1;
                }
            }
            println!("💾 Saved {} of {} questions", saved, board.len());
        }
        Ok(board)
    }

    pub async fn grade(&self, question: &str, answer: &str, skill: &str) -> Result<()> {
        if answer.trim().is_empty() {
            return Err(SkillMatrixError::InvalidInput("Answer must not be empty".to_string()));
        }
        let client = self.client_for(Route::Dashboard)?;
        let grade = self.check_auth(
            with_spinner("Grading answer...", client.grade_answer(question, answer, skill)).await,
        )?;
        self.emit(&self.formatter.format_grade(&grade)?)
    }

    pub async fn answer(&self, question: &str, skill: &str, difficulty: &str) -> Result<()> {
        let client = self.client_for(Route::Dashboard)?;
        let answer = self.check_auth(
            with_spinner("Fetching model answer...", client.get_answer(question, skill, difficulty)).await,
        )?;
        self.emit(&self.formatter.format_model_answer(&answer)?)
    }

    pub async fn save(&self, request: &SaveQuestionRequest) -> Result<()> {
        let client = self.client_for(Route::Dashboard)?;
        self.check_auth(with_spinner("Saving question...", client.save_question(request)).await)?;
        println!("💾 Question saved");
        Ok(())
    }

    pub async fn saved(&self) -> Result<()> {
        let client = self.client_for(Route::Dashboard)?;
        let saved = self.check_auth(with_spinner("Loading history...", client.saved_questions()).await)?;
        self.emit(&self.formatter.format_saved_questions(&saved)?)
    }

    pub async fn analyze(&self, path: &Path, job: &JobArgs) -> Result<()> {
        let job_description = load_job_description(job).await?;
        let file = UploadFile::load(path).await?;
        let upload = validate_analysis_upload(file, &job_description)?;

        let client = self.client_for(Route::Dashboard)?;
        let analysis = self.check_auth(
            with_spinner("Analyzing resume...", client.analyze_resume(&upload)).await,
        )?;
        self.emit(&self.formatter.format_analysis(&analysis)?)
    }

    /// Interactive loop over stdin/stdout.
    pub async fn practice(&self, args: &GenerateArgs) -> Result<()> {
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();
        self.practice_with(args, stdin, stdout).await
    }

    pub async fn practice_with<R, W>(&self, args: &GenerateArgs, input: R, mut out: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let client = self.client_for(Route::Dashboard)?;
        let form = self.build_form(&client, args).await?;
        let request = form.to_request()?;
        let questions = self.check_auth(client.generate_questions(&request).await)?;

        let mut board = QuestionBoard::new();
        board.replace(questions);
        let mut lines = input.lines();

        let ids: Vec<String> = board.questions().iter().map(|q| q.id.clone()).collect();
        for (n, id) in ids.iter().enumerate() {
            let Some(question) = board.get(id).cloned() else { continue };
            out.write_all(
                format!(
                    "\nQuestion {}/{} [{} | {} | {}]\n{}\nYour answer (blank to skip, :q to quit): ",
                    n + 1,
                    ids.len(),
                    question.question.skill,
                    question.question.question_type,
                    question.question.difficulty,
                    question.question.question
                )
                .as_bytes(),
            )
            .await?;
            out.flush().await?;

            let Some(answer) = lines.next_line().await? else { break };
            let answer = answer.trim();
            if answer == ":q" {
                break;
            }

            board.toggle_answer_box(id);
            board.set_answer(id, answer);
            if board.can_submit(id) {
                let grade = self.check_auth(
                    client
                        .grade_answer(&question.question.question, answer, &question.question.skill)
                        .await,
                )?;
                board.record_grade(id, grade.clone());
                out.write_all(self.formatter.format_grade(&grade)?.as_bytes()).await?;
            }

            if confirm(&mut lines, &mut out, "Show model answer? [y/N] ").await? && board.begin_model_answer(id) {
                let fetched = client
                    .get_answer(&question.question.question, &question.question.skill, &question.question.difficulty)
                    .await;
                match fetched {
                    Ok(answer) => {
                        out.write_all(self.formatter.format_model_answer(&answer)?.as_bytes()).await?;
                        board.finish_model_answer(id, Some(answer));
                    }
                    Err(e) if e.is_auth_failure() => {
                        board.finish_model_answer(id, None);
                        return self.check_auth(Err(e));
                    }
                    Err(e) => {
                        board.finish_model_answer(id, None);
                        out.write_all(format!("❌ {}\n", e.user_message()).as_bytes()).await?;
                    }
                }
            }

            if board.can_save(id) && confirm(&mut lines, &mut out, "Save this question? [y/N] ").await? {
                if save_on_board(&client, &mut board, id).await? {
                    out.write_all("💾 Saved\n".as_bytes()).await?;
                } else {
                    out.write_all("❌ Failed to save question\n".as_bytes()).await?;
                }
            }
        }

        let graded = ids
            .iter()
            .filter(|id| board.state(id).map(|s| s.submitted).unwrap_or(false))
            .count();
        out.write_all(format!("\nPractice finished: {} of {} answered\n", graded, ids.len()).as_bytes())
            .await?;
        out.flush().await?;
        Ok(())
    }

    pub fn config_command(&mut self, action: Option<ConfigAction>) -> Result<()> {
        match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration ({})\n", self.config_path.display());
                let text = toml::to_string_pretty(&self.config)
                    .map_err(|e| SkillMatrixError::Configuration(e.to_string()))?;
                println!("{}", text);
            }
            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                self.config = Config::default();
                self.config.save_to(&self.config_path)?;
                println!("✅ Configuration reset successfully!");
            }
            Some(ConfigAction::Set { key, value }) => {
                self.config.set(&key, &value)?;
                self.config.save_to(&self.config_path)?;
                println!("🔧 {} = {}", key, value);
            }
        }
        Ok(())
    }
}

/// Save one board question; a question already saving or saved is never sent twice.
pub async fn save_on_board(client: &ApiClient, board: &mut QuestionBoard, id: &str) -> Result<bool> {
    let Some(request) = board.begin_save(id) else {
        return Ok(false);
    };
    let result = client.save_question(&request).await;
    board.finish_save(id, result.is_ok());
    match result {
        Ok(()) => Ok(true),
        Err(e) if e.is_auth_failure() => Err(e),
        Err(e) => {
            warn!("Failed to save question {}: {}", id, e);
            Ok(false)
        }
    }
}

async fn load_job_description(job: &JobArgs) -> Result<String> {
    let source = JobDescriptionSource::from_args(job.job.clone(), job.job_file.clone())?;
    JobDescriptionLoader::load(&source).await
}

async fn confirm<R, W>(lines: &mut tokio::io::Lines<R>, out: &mut W, prompt: &str) -> Result<bool>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    out.write_all(prompt.as_bytes()).await?;
    out.flush().await?;
    let reply = lines.next_line().await?.unwrap_or_default();
    Ok(matches!(reply.trim().to_lowercase().as_str(), "y" | "yes"))
}

async fn with_spinner<F, T>(message: &str, future: F) -> T
where
    F: Future<Output = T>,
{
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.magenta} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    let result = future.await;
    spinner.finish_and_clear();
    result
}
