//! Question generator form

use crate::api::models::{Difficulty, ExperienceLevel, GenerateRequest, QuestionTypes};
use crate::error::{Result, SkillMatrixError};
use crate::session::skills::SkillSelection;

#[derive(Debug, Clone, Default)]
pub struct GeneratorForm {
    pub skills: SkillSelection,
    pub job_description: String,
    pub experience_level: ExperienceLevel,
    pub question_types: QuestionTypes,
    pub difficulty: Difficulty,
}

impl GeneratorForm {
    pub fn new(experience_level: ExperienceLevel, difficulty: Difficulty) -> Self {
        Self {
            experience_level,
            difficulty,
            ..Self::default()
        }
    }

    /// Generation needs at least one skill or a job description.
    pub fn can_generate(&self) -> bool {
        !self.skills.is_empty() || !self.job_description.trim().is_empty()
    }

    pub fn to_request(&self) -> Result<GenerateRequest> {
        if !self.can_generate() {
            return Err(SkillMatrixError::InvalidInput(
                "Either skills or job description must be provided".to_string(),
            ));
        }

        Ok(GenerateRequest {
            skills: self.skills.selected().to_vec(),
            job_description: self.job_description.trim().to_string(),
            experience_level: self.experience_level,
            question_types: self.question_types,
            difficulty: self.difficulty,
        })
    }
}
