//! Output formatters: colored console, JSON, and Markdown

use crate::api::models::{GeneratedQuestion, GradeResult, ResumeAnalysis, SavedQuestion, UserProfile};
use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::report::*;
use colored::{Color, Colorize};
use serde_json::json;

/// Renders every backend response the CLI can display.
pub trait OutputFormatter {
    fn format_profile(&self, profile: &UserProfile) -> Result<String>;
    fn format_users(&self, users: &[UserProfile]) -> Result<String>;
    fn format_skills(&self, skills: &[String]) -> Result<String>;
    fn format_questions(&self, questions: &[GeneratedQuestion]) -> Result<String>;
    fn format_grade(&self, grade: &GradeResult) -> Result<String>;
    fn format_model_answer(&self, answer: &str) -> Result<String>;
    fn format_analysis(&self, analysis: &ResumeAnalysis) -> Result<String>;
    fn format_saved_questions(&self, saved: &[SavedQuestion]) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
}

/// JSON formatter for scripting
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown formatter for saving reports
pub struct MarkdownFormatter;

pub fn formatter_for(format: OutputFormat, use_colors: bool) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Console => Box::new(ConsoleFormatter::new(use_colors)),
        OutputFormat::Json => Box::new(JsonFormatter::new(true)),
        OutputFormat::Markdown => Box::new(MarkdownFormatter),
    }
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Magenta,
            2 => Color::Blue,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn band_color(band: ScoreBand) -> Color {
        match band {
            ScoreBand::Excellent => Color::Green,
            ScoreBand::Good => Color::BrightGreen,
            ScoreBand::Fair => Color::Yellow,
            ScoreBand::Poor => Color::Red,
        }
    }

    fn format_score_badge(&self, score: u32) -> String {
        let band = ScoreBand::from_score(score);
        if self.use_colors {
            format!("[{}]", band.label().color(Self::band_color(band)).bold())
        } else {
            format!("[{}]", band.label())
        }
    }

    fn format_priority(&self, priority: &str) -> String {
        let (text, color) = match Priority::parse(priority) {
            Priority::High => ("HIGH", Color::Red),
            Priority::Medium => ("MEDIUM", Color::Yellow),
            Priority::Low => ("LOW", Color::Green),
        };
        format!("[{}]", self.colorize(text, color))
    }

    fn push_list(&self, output: &mut String, title: &str, items: &[String], color: Color) {
        if items.is_empty() {
            return;
        }
        output.push_str(&self.format_header(title, 3));
        for item in items {
            output.push_str(&format!("  • {}\n", self.colorize(item, color)));
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_profile(&self, profile: &UserProfile) -> Result<String> {
        let mut output = self.format_header("Profile", 1);
        output.push_str(&format!("Name:  {}\n", profile.name));
        output.push_str(&format!("Email: {}\n", profile.email));
        output.push_str(&format!(
            "Role:  {}\n",
            if profile.is_admin() { self.colorize("admin", Color::Cyan) } else { "user".to_string() }
        ));

        output.push_str(&self.format_header("Skills", 2));
        if profile.skills.is_empty() {
            output.push_str("No skills found. Upload a resume to extract skills.\n");
        } else {
            output.push_str(&format!("{}\n", profile.skills.join(", ")));
        }

        output.push_str(&format!("\nSaved questions: {}\n", profile.saved_questions.len()));
        Ok(output)
    }

    fn format_users(&self, users: &[UserProfile]) -> Result<String> {
        let mut output = self.format_header(&format!("Users ({})", users.len()), 1);
        if users.is_empty() {
            output.push_str("No other users registered.\n");
            return Ok(output);
        }

        output.push_str(&format!("{:<24} {:<32} {:<6} {:>6} {:>6}\n", "NAME", "EMAIL", "ROLE", "SKILLS", "SAVED"));
        for user in users {
            let role = if user.is_admin() { "admin" } else { "user" };
            output.push_str(&format!(
                "{:<24} {:<32} {:<6} {:>6} {:>6}\n",
                truncate_text(&user.name, 24),
                truncate_text(&user.email, 32),
                role,
                user.skills.len(),
                user.saved_questions.len()
            ));
        }
        Ok(output)
    }

    fn format_skills(&self, skills: &[String]) -> Result<String> {
        let mut output = self.format_header(&format!("Extracted Skills ({})", skills.len()), 1);
        if skills.is_empty() {
            output.push_str("No skills were found in the resume.\n");
        }
        for skill in skills {
            output.push_str(&format!("  • {}\n", self.colorize(skill, Color::Cyan)));
        }
        Ok(output)
    }

    fn format_questions(&self, questions: &[GeneratedQuestion]) -> Result<String> {
        let mut output = self.format_header(&format!("Interview Questions ({})", questions.len()), 1);
        if questions.is_empty() {
            output.push_str("No questions generated.\n");
        }
        for (i, q) in questions.iter().enumerate() {
            output.push_str(&format!(
                "\n{}. {} {}\n",
                i + 1,
                self.colorize(&format!("[{} | {} | {}]", q.skill, q.question_type, q.difficulty), Color::Magenta),
                q.question
            ));
        }
        Ok(output)
    }

    fn format_grade(&self, grade: &GradeResult) -> Result<String> {
        let band = grade_band(&grade.grade);
        let mut output = self.format_header("Feedback", 1);
        output.push_str(&format!(
            "Grade: {}\n",
            if self.use_colors {
                grade.grade.color(Self::band_color(band)).bold().to_string()
            } else {
                grade.grade.clone()
            }
        ));

        self.push_list(&mut output, "Strengths", &grade.strengths, Color::Green);
        self.push_list(&mut output, "Weaknesses", &grade.weaknesses, Color::Red);
        self.push_list(&mut output, "Suggestions", &grade.suggestions, Color::Yellow);

        if let Some(answer) = &grade.correct_answer {
            output.push_str(&self.format_header("Model Answer", 2));
            output.push_str(&format!("{}\n", answer));
        }
        Ok(output)
    }

    fn format_model_answer(&self, answer: &str) -> Result<String> {
        let mut output = self.format_header("Model Answer", 1);
        for block in parse_model_answer(answer) {
            match block {
                AnswerBlock::Heading(text) => {
                    output.push('\n');
                    output.push_str(&self.colorize(&text, Color::Blue));
                    output.push('\n');
                }
                AnswerBlock::Bullet(text) => output.push_str(&format!("  • {}\n", text)),
                AnswerBlock::Paragraph(text) => output.push_str(&format!("{}\n", text)),
            }
        }
        Ok(output)
    }

    fn format_analysis(&self, analysis: &ResumeAnalysis) -> Result<String> {
        let mut output = self.format_header("Resume Analysis", 1);
        output.push_str(&format!(
            "ATS Score:       {}% {}\n",
            analysis.ats_score,
            self.format_score_badge(analysis.ats_score)
        ));
        output.push_str(&format!(
            "Job Match Score: {}% {}\n",
            analysis.job_match_score,
            self.format_score_badge(analysis.job_match_score)
        ));

        if let Some(breakdown) = &analysis.score_breakdown {
            output.push_str(&self.format_header("Score Breakdown", 2));
            output.push_str(&format!("Skills:     {}%\n", breakdown.skills_match));
            output.push_str(&format!("Experience: {}%\n", breakdown.experience_match));
            output.push_str(&format!("Education:  {}%\n", breakdown.education_match));
        }

        self.push_list(&mut output, "ATS Issues", &analysis.ats_issues, Color::Red);
        self.push_list(&mut output, "Matching Skills", &analysis.matching_skills, Color::Green);
        self.push_list(&mut output, "Missing Skills", &analysis.missing_skills, Color::Yellow);

        if !analysis.suggestions.is_empty() {
            output.push_str(&self.format_header("Suggestions", 2));
            for (i, s) in analysis.suggestions.iter().enumerate() {
                output.push_str(&format!(
                    "{}. {} {} {}\n",
                    i + 1,
                    self.format_priority(&s.priority),
                    self.colorize(&format!("({})", s.category), Color::BrightBlack),
                    s.suggestion
                ));
            }
        }
        Ok(output)
    }

    fn format_saved_questions(&self, saved: &[SavedQuestion]) -> Result<String> {
        let mut output = self.format_header(&format!("Saved Questions ({})", saved.len()), 1);
        if saved.is_empty() {
            output.push_str("No saved questions yet.\n");
        }
        for (i, q) in saved.iter().enumerate() {
            output.push_str(&format!(
                "\n{}. {} {}\n",
                i + 1,
                self.colorize(&format!("[{} | {} | {}]", q.skill, q.question_type, q.difficulty), Color::Magenta),
                q.question
            ));
            if let Some(saved_at) = &q.saved_at {
                output.push_str(&format!("   saved {}\n", self.colorize(saved_at, Color::BrightBlack)));
            }
        }
        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn render<T: serde::Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        let text = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(text)
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_profile(&self, profile: &UserProfile) -> Result<String> {
        self.render(profile)
    }

    fn format_users(&self, users: &[UserProfile]) -> Result<String> {
        self.render(&json!({ "users": users }))
    }

    fn format_skills(&self, skills: &[String]) -> Result<String> {
        self.render(&json!({ "skills": skills }))
    }

    fn format_questions(&self, questions: &[GeneratedQuestion]) -> Result<String> {
        self.render(&json!({ "questions": questions }))
    }

    fn format_grade(&self, grade: &GradeResult) -> Result<String> {
        self.render(grade)
    }

    fn format_model_answer(&self, answer: &str) -> Result<String> {
        self.render(&json!({ "answer": answer, "blocks": parse_model_answer(answer) }))
    }

    fn format_analysis(&self, analysis: &ResumeAnalysis) -> Result<String> {
        self.render(analysis)
    }

    fn format_saved_questions(&self, saved: &[SavedQuestion]) -> Result<String> {
        self.render(&json!({ "saved_questions": saved }))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    fn bullet_section(output: &mut String, title: &str, items: &[String]) {
        if items.is_empty() {
            return;
        }
        output.push_str(&format!("\n### {}\n\n", title));
        for item in items {
            output.push_str(&format!("- {}\n", item));
        }
    }

    fn question_line(index: usize, skill: &str, question_type: &str, difficulty: &str, text: &str) -> String {
        format!("{}. **{}** · _{}_ · _{}_  \n   {}\n", index + 1, skill, question_type, difficulty, text)
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_profile(&self, profile: &UserProfile) -> Result<String> {
        let mut output = format!("# {}\n\n", profile.name);
        output.push_str(&format!("- **Email:** {}\n", profile.email));
        output.push_str(&format!("- **Role:** {}\n", if profile.is_admin() { "admin" } else { "user" }));
        output.push_str(&format!("- **Saved questions:** {}\n", profile.saved_questions.len()));
        Self::bullet_section(&mut output, "Skills", &profile.skills);
        Ok(output)
    }

    fn format_users(&self, users: &[UserProfile]) -> Result<String> {
        let mut output = String::from("# Users\n\n| Name | Email | Role | Skills | Saved |\n|---|---|---|---:|---:|\n");
        for user in users {
            output.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                user.name,
                user.email,
                if user.is_admin() { "admin" } else { "user" },
                user.skills.len(),
                user.saved_questions.len()
            ));
        }
        Ok(output)
    }

    fn format_skills(&self, skills: &[String]) -> Result<String> {
        let mut output = String::from("# Extracted Skills\n");
        Self::bullet_section(&mut output, "Skills", skills);
        Ok(output)
    }

    fn format_questions(&self, questions: &[GeneratedQuestion]) -> Result<String> {
        let mut output = String::from("# Interview Questions\n\n");
        for (i, q) in questions.iter().enumerate() {
            output.push_str(&Self::question_line(i, &q.skill, &q.question_type, &q.difficulty, &q.question));
        }
        Ok(output)
    }

    fn format_grade(&self, grade: &GradeResult) -> Result<String> {
        let mut output = format!("# Feedback\n\n**Grade:** {}\n", grade.grade);
        Self::bullet_section(&mut output, "Strengths", &grade.strengths);
        Self::bullet_section(&mut output, "Weaknesses", &grade.weaknesses);
        Self::bullet_section(&mut output, "Suggestions", &grade.suggestions);
        if let Some(answer) = &grade.correct_answer {
            output.push_str(&format!("\n### Model Answer\n\n{}\n", answer));
        }
        Ok(output)
    }

    fn format_model_answer(&self, answer: &str) -> Result<String> {
        let mut output = String::from("# Model Answer\n");
        for block in parse_model_answer(answer) {
            match block {
                AnswerBlock::Heading(text) => {
                    output.push_str(&format!("\n### {}\n\n", text.trim_end_matches(':')));
                }
                AnswerBlock::Bullet(text) => output.push_str(&format!("- {}\n", text)),
                AnswerBlock::Paragraph(text) => output.push_str(&format!("{}\n", text)),
            }
        }
        Ok(output)
    }

    fn format_analysis(&self, analysis: &ResumeAnalysis) -> Result<String> {
        let mut output = String::from("# Resume Analysis\n\n");
        output.push_str("| Metric | Score | Rating |\n|---|---:|---|\n");
        output.push_str(&format!(
            "| ATS compatibility | {}% | {} |\n",
            analysis.ats_score,
            ScoreBand::from_score(analysis.ats_score).label()
        ));
        output.push_str(&format!(
            "| Job match | {}% | {} |\n",
            analysis.job_match_score,
            ScoreBand::from_score(analysis.job_match_score).label()
        ));
        if let Some(b) = &analysis.score_breakdown {
            output.push_str(&format!("| Skills match | {}% | |\n", b.skills_match));
            output.push_str(&format!("| Experience match | {}% | |\n", b.experience_match));
            output.push_str(&format!("| Education match | {}% | |\n", b.education_match));
        }

        Self::bullet_section(&mut output, "ATS Issues", &analysis.ats_issues);
        Self::bullet_section(&mut output, "Matching Skills", &analysis.matching_skills);
        Self::bullet_section(&mut output, "Missing Skills", &analysis.missing_skills);

        if !analysis.suggestions.is_empty() {
            output.push_str("\n### Suggestions\n\n");
            for s in &analysis.suggestions {
                output.push_str(&format!("- **{}** ({}) {}\n", s.priority, s.category, s.suggestion));
            }
        }
        Ok(output)
    }

    fn format_saved_questions(&self, saved: &[SavedQuestion]) -> Result<String> {
        let mut output = String::from("# Saved Questions\n\n");
        for (i, q) in saved.iter().enumerate() {
            output.push_str(&Self::question_line(i, &q.skill, &q.question_type, &q.difficulty, &q.question));
        }
        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}
