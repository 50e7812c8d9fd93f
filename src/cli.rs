//! CLI interface for the SkillMatrix client

use crate::api::models::{Difficulty, ExperienceLevel, QuestionTypes};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "skillmatrix")]
#[command(about = "Interview preparation from the terminal")]
#[command(long_about = "Generate tailored interview questions, grade your answers, and check how your resume matches a job description using the SkillMatrix backend")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend base URL (overrides the configuration file)
    #[arg(long, global = true, env = "SKILLMATRIX_SERVER")]
    pub server: Option<String>,

    /// Output format: console, json, markdown
    #[arg(short, long, global = true)]
    pub output: Option<String>,

    /// Save output to file
    #[arg(long, global = true)]
    pub save: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and store the access token
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },

    /// Create a new account
    Signup {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },

    /// Forget the stored access token
    Logout,

    /// Show the logged-in user's dashboard profile
    Whoami,

    /// Profile management
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },

    /// Administrator views
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },

    /// Upload a PDF resume and extract skills
    Upload {
        /// Path to resume file (PDF, max 2MB)
        file: PathBuf,
    },

    /// Generate interview questions
    Generate(GenerateArgs),

    /// Grade an answer to a question
    Grade {
        #[arg(short, long)]
        question: String,

        #[arg(short, long)]
        answer: String,

        #[arg(short, long)]
        skill: String,
    },

    /// Fetch a model answer for a question
    Answer {
        #[arg(short, long)]
        question: String,

        #[arg(short, long)]
        skill: String,

        #[arg(short, long, default_value = "medium")]
        difficulty: String,
    },

    /// Save a question to your history
    Save {
        #[arg(short, long)]
        question: String,

        #[arg(short, long)]
        skill: String,

        /// Question type: technical, behavioral, situational
        #[arg(short = 't', long = "type")]
        question_type: String,

        #[arg(short, long)]
        difficulty: String,
    },

    /// List saved questions
    Saved,

    /// Analyze a resume against a job description
    Analyze {
        /// Path to resume file (PDF, DOC, DOCX)
        file: PathBuf,

        #[command(flatten)]
        job: JobArgs,
    },

    /// Generate questions, then answer and grade them one by one
    Practice(GenerateArgs),

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct JobArgs {
    /// Job description text
    #[arg(short, long)]
    pub job: Option<String>,

    /// Path to job description file (TXT, MD)
    #[arg(long)]
    pub job_file: Option<PathBuf>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct GenerateArgs {
    /// Skill to include (repeatable)
    #[arg(short, long = "skill")]
    pub skills: Vec<String>,

    /// Also include the skills extracted from your uploaded resume
    #[arg(long)]
    pub from_profile: bool,

    #[command(flatten)]
    pub job: JobArgs,

    /// Experience level: entry, mid, senior, executive
    #[arg(short, long)]
    pub experience: Option<String>,

    /// Difficulty: easy, medium, hard
    #[arg(short, long)]
    pub difficulty: Option<String>,

    /// Skip technical questions
    #[arg(long)]
    pub no_technical: bool,

    /// Skip behavioral questions
    #[arg(long)]
    pub no_behavioral: bool,

    /// Skip situational questions
    #[arg(long)]
    pub no_situational: bool,

    /// Save every generated question
    #[arg(long)]
    pub save_all: bool,
}

impl GenerateArgs {
    pub fn question_types(&self) -> QuestionTypes {
        QuestionTypes {
            technical: !self.no_technical,
            behavioral: !self.no_behavioral,
            situational: !self.no_situational,
        }
    }

    pub fn experience_level(&self, default: ExperienceLevel) -> Result<ExperienceLevel, String> {
        self.experience.as_deref().map(str::parse).unwrap_or(Ok(default))
    }

    pub fn difficulty(&self, default: Difficulty) -> Result<Difficulty, String> {
        self.difficulty.as_deref().map(str::parse).unwrap_or(Ok(default))
    }
}

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Update name, email, or password
    Update {
        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        email: Option<String>,

        #[arg(short, long)]
        password: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum AdminAction {
    /// List every other registered user
    Users,

    /// Create an administrator account
    Create {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "backend.base_url")
        key: String,

        /// Configuration value
        value: String,
    },
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        "markdown" | "md" => Ok(crate::config::OutputFormat::Markdown),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, markdown", format)),
    }
}
