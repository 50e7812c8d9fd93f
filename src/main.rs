//! SkillMatrix: interview preparation from the terminal

use clap::Parser;
use log::{error, info};
use skillmatrix::api::models::SaveQuestionRequest;
use skillmatrix::app::App;
use skillmatrix::cli::{self, Cli, Commands};
use skillmatrix::config::Config;
use skillmatrix::error::{Result, SkillMatrixError};
use std::process;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let mut config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };
    config.apply_server_override(cli.server.as_deref());

    if let Some(format) = &cli.output {
        match cli::parse_output_format(format) {
            Ok(format) => config.output.format = format,
            Err(e) => {
                error!("{}", e);
                process::exit(1);
            }
        }
    }

    let mut app = App::new(config, config_path, cli.save.clone());

    if let Err(e) = run_command(&mut app, cli.command).await {
        if matches!(e, SkillMatrixError::Unauthorized(_) | SkillMatrixError::NotAuthenticated) {
            error!("{}", e.user_message());
            eprintln!("💡 Run `skillmatrix login --email <email> --password <password>`");
        } else {
            error!("Command failed: {}", e.user_message());
        }
        process::exit(1);
    }
}

async fn run_command(app: &mut App, command: Commands) -> Result<()> {
    info!("Backend: {}", app.config().backend.base_url);

    match command {
        Commands::Login { email, password } => {
            app.login(&email, &password).await?;
        }
        Commands::Signup { name, email, password } => app.signup(&name, &email, &password).await?,
        Commands::Logout => app.logout()?,
        Commands::Whoami => {
            app.whoami().await?;
        }
        Commands::Profile { action } => app.profile(action).await?,
        Commands::Admin { action } => app.admin(action).await?,
        Commands::Upload { file } => {
            app.upload(&file).await?;
        }
        Commands::Generate(args) => {
            app.generate(&args).await?;
        }
        Commands::Grade { question, answer, skill } => app.grade(&question, &answer, &skill).await?,
        Commands::Answer {
            question,
            skill,
            difficulty,
        } => app.answer(&question, &skill, &difficulty).await?,
        Commands::Save {
            question,
            skill,
            question_type,
            difficulty,
        } => {
            let request = SaveQuestionRequest {
                question,
                skill,
                question_type,
                difficulty,
            };
            app.save(&request).await?
        }
        Commands::Saved => app.saved().await?,
        Commands::Analyze { file, job } => app.analyze(&file, &job).await?,
        Commands::Practice(args) => app.practice(&args).await?,
        Commands::Config { action } => app.config_command(action)?,
    }

    Ok(())
}
