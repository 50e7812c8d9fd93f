//! Per-question view state for a batch of generated questions.
//!
//! Each question gets an id of the form `{skill}-{index}-{suffix}`; all UI
//! flags are keyed by that id and reset whenever a new batch replaces the old one.

use crate::api::models::{GeneratedQuestion, GradeResult, SaveQuestionRequest};
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct BoardQuestion {
    pub id: String,
    pub question: GeneratedQuestion,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuestionState {
    pub user_answer: String,
    pub answer_box_shown: bool,
    pub feedback_expanded: bool,
    pub submitted: bool,
    pub grade: Option<GradeResult>,
    pub model_answer: Option<String>,
    pub model_answer_shown: bool,
    pub loading_model_answer: bool,
    pub saving: bool,
    pub saved: bool,
}

#[derive(Debug, Clone, Default)]
pub struct QuestionBoard {
    questions: Vec<BoardQuestion>,
    states: HashMap<String, QuestionState>,
}

impl QuestionBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a fresh batch, dropping every flag from the previous one.
    pub fn replace(&mut self, questions: Vec<GeneratedQuestion>) {
        self.states.clear();
        self.questions = questions
            .into_iter()
            .enumerate()
            .map(|(index, question)| {
                let suffix = Uuid::new_v4().simple().to_string();
                let id = format!("{}-{}-{}", question.skill, index, &suffix[..10]);
                BoardQuestion { id, question }
            })
            .collect();

        for q in &self.questions {
            self.states.insert(q.id.clone(), QuestionState::default());
        }
    }

    pub fn questions(&self) -> &[BoardQuestion] {
        &self.questions
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn get(&self, id: &str) -> Option<&BoardQuestion> {
        self.questions.iter().find(|q| q.id == id)
    }

    pub fn state(&self, id: &str) -> Option<&QuestionState> {
        self.states.get(id)
    }

    pub fn set_answer(&mut self, id: &str, answer: &str) {
        if let Some(state) = self.states.get_mut(id) {
            state.user_answer = answer.to_string();
        }
    }

    pub fn toggle_answer_box(&mut self, id: &str) -> bool {
        self.states
            .get_mut(id)
            .map(|state| {
                state.answer_box_shown = !state.answer_box_shown;
                state.answer_box_shown
            })
            .unwrap_or(false)
    }

    pub fn toggle_feedback(&mut self, id: &str) -> bool {
        self.states
            .get_mut(id)
            .map(|state| {
                state.feedback_expanded = !state.feedback_expanded;
                state.feedback_expanded
            })
            .unwrap_or(false)
    }

    /// An answer can be graded once, and only when it is not blank.
    pub fn can_submit(&self, id: &str) -> bool {
        self.states
            .get(id)
            .map(|state| !state.submitted && !state.user_answer.trim().is_empty())
            .unwrap_or(false)
    }

    pub fn record_grade(&mut self, id: &str, grade: GradeResult) {
        if let Some(state) = self.states.get_mut(id) {
            state.submitted = true;
            if grade.correct_answer.is_some() && state.model_answer.is_none() {
                state.model_answer = grade.correct_answer.clone();
            }
            state.grade = Some(grade);
        }
    }

    /// Mark a model-answer fetch as in flight. Returns false if one already is.
    pub fn begin_model_answer(&mut self, id: &str) -> bool {
        match self.states.get_mut(id) {
            Some(state) if !state.loading_model_answer => {
                state.loading_model_answer = true;
                true
            }
            _ => false,
        }
    }

    /// A fetched answer is shown and the answer box collapses; a failed fetch only clears the spinner.
    pub fn finish_model_answer(&mut self, id: &str, answer: Option<String>) {
        if let Some(state) = self.states.get_mut(id) {
            state.loading_model_answer = false;
            if let Some(answer) = answer {
                state.model_answer = Some(answer);
                state.model_answer_shown = true;
                state.answer_box_shown = false;
            }
        }
    }

    pub fn toggle_model_answer(&mut self, id: &str) -> bool {
        self.states
            .get_mut(id)
            .map(|state| {
                state.model_answer_shown = !state.model_answer_shown;
                state.model_answer_shown
            })
            .unwrap_or(false)
    }

    pub fn can_save(&self, id: &str) -> bool {
        self.states
            .get(id)
            .map(|state| !state.saving && !state.saved)
            .unwrap_or(false)
    }

    /// Claim the save slot for `id`. Returns the request to send, or `None`
    /// when a save is already running or has succeeded.
    pub fn begin_save(&mut self, id: &str) -> Option<SaveQuestionRequest> {
        if !self.can_save(id) {
            return None;
        }
        let request = self.get(id).map(|q| SaveQuestionRequest::from(&q.question))?;
        if let Some(state) = self.states.get_mut(id) {
            state.saving = true;
        }
        Some(request)
    }

    pub fn finish_save(&mut self, id: &str, succeeded: bool) {
        if let Some(state) = self.states.get_mut(id) {
            state.saving = false;
            if succeeded {
                state.saved = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(skill: &str, text: &str) -> GeneratedQuestion {
        GeneratedQuestion {
            skill: skill.to_string(),
            question_type: "technical".to_string(),
            difficulty: "medium".to_string(),
            question: text.to_string(),
        }
    }

    fn board() -> QuestionBoard {
        let mut board = QuestionBoard::new();
        board.replace(vec![
            question("Rust", "What is ownership?"),
            question("SQL", "Explain an index."),
        ]);
        board
    }

    #[test]
    fn ids_carry_skill_and_position_and_are_unique() {
        let board = board();
        let ids: Vec<&str> = board.questions().iter().map(|q| q.id.as_str()).collect();
        assert!(ids[0].starts_with("Rust-0-"));
        assert!(ids[1].starts_with("SQL-1-"));
        assert_ne!(ids[0], ids[1]);
    }

    #[test]
    fn second_save_is_refused_after_success() {
        let mut board = board();
        let id = board.questions()[0].id.clone();

        let request = board.begin_save(&id).unwrap();
        assert_eq!(request.question, "What is ownership?");
        assert!(board.begin_save(&id).is_none(), "save already in flight");

        board.finish_save(&id, true);
        assert!(board.state(&id).unwrap().saved);
        assert!(board.begin_save(&id).is_none());
    }

    #[test]
    fn failed_save_can_be_retried() {
        let mut board = board();
        let id = board.questions()[1].id.clone();

        assert!(board.begin_save(&id).is_some());
        board.finish_save(&id, false);
        assert!(!board.state(&id).unwrap().saved);
        assert!(board.begin_save(&id).is_some());
    }

    #[test]
    fn submit_requires_text_and_happens_once() {
        let mut board = board();
        let id = board.questions()[0].id.clone();
        assert!(!board.can_submit(&id));

        board.set_answer(&id, "Each value has a single owner.");
        assert!(board.can_submit(&id));

        board.record_grade(
            &id,
            GradeResult {
                grade: "Good".into(),
                strengths: vec!["Concise".into()],
                weaknesses: vec![],
                suggestions: vec![],
                correct_answer: Some("Ownership rules...".into()),
            },
        );
        assert!(!board.can_submit(&id));
        assert_eq!(
            board.state(&id).unwrap().model_answer.as_deref(),
            Some("Ownership rules...")
        );
    }

    #[test]
    fn model_answer_fetch_collapses_answer_box() {
        let mut board = board();
        let id = board.questions()[0].id.clone();
        assert!(board.toggle_answer_box(&id));

        assert!(board.begin_model_answer(&id));
        assert!(!board.begin_model_answer(&id));
        board.finish_model_answer(&id, Some("Introduction:\n• point".into()));

        let state = board.state(&id).unwrap();
        assert!(!state.loading_model_answer);
        assert!(state.model_answer_shown);
        assert!(!state.answer_box_shown);
        assert!(!board.toggle_model_answer(&id));
    }

    #[test]
    fn replacing_questions_resets_flags() {
        let mut board = board();
        let id = board.questions()[0].id.clone();
        board.toggle_feedback(&id);
        board.begin_save(&id);

        board.replace(vec![question("Go", "What is a goroutine?")]);
        assert_eq!(board.len(), 1);
        assert!(board.state(&id).is_none());
        let new_id = board.questions()[0].id.clone();
        assert_eq!(board.state(&new_id), Some(&QuestionState::default()));
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let mut board = board();
        assert!(!board.toggle_answer_box("missing"));
        assert!(board.begin_save("missing").is_none());
        assert!(!board.can_submit("missing"));
    }
}
