//! Presentation-level helpers shared by every output format

use serde::Serialize;
use unicode_segmentation::UnicodeSegmentation;

/// One rendered line of a model answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "lowercase")]
pub enum AnswerBlock {
    Heading(String),
    Bullet(String),
    Paragraph(String),
}

/// Split a model answer into headings (`Intro:`), bullets (`• point`) and paragraphs.
pub fn parse_model_answer(answer: &str) -> Vec<AnswerBlock> {
    answer
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            if line.ends_with(':') && line.chars().count() > 1 {
                AnswerBlock::Heading(line.to_string())
            } else if let Some(rest) = line.strip_prefix('•') {
                AnswerBlock::Bullet(rest.trim().to_string())
            } else {
                AnswerBlock::Paragraph(line.to_string())
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl ScoreBand {
    pub fn from_score(score: u32) -> Self {
        match score {
            80..=u32::MAX => ScoreBand::Excellent,
            60..=79 => ScoreBand::Good,
            40..=59 => ScoreBand::Fair,
            _ => ScoreBand::Poor,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => "EXCELLENT",
            ScoreBand::Good => "GOOD",
            ScoreBand::Fair => "FAIR",
            ScoreBand::Poor => "POOR",
        }
    }
}

/// Grades come back as free text; anything unrecognised is treated as fair.
pub fn grade_band(grade: &str) -> ScoreBand {
    match grade.trim().to_lowercase().as_str() {
        "excellent" => ScoreBand::Excellent,
        "good" => ScoreBand::Good,
        "poor" => ScoreBand::Poor,
        _ => ScoreBand::Fair,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn parse(priority: &str) -> Self {
        match priority.trim().to_lowercase().as_str() {
            "high" => Priority::High,
            "low" => Priority::Low,
            _ => Priority::Medium,
        }
    }
}

/// Truncate on grapheme boundaries, appending an ellipsis when shortened.
pub fn truncate_text(text: &str, max_graphemes: usize) -> String {
    let graphemes: Vec<&str> = text.graphemes(true).collect();
    if graphemes.len() <= max_graphemes {
        return text.to_string();
    }
    let keep = max_graphemes.saturating_sub(3);
    format!("{}...", graphemes[..keep].concat().trim_end())
}
