//! Selected-skill set for question generation

/// Ordered, duplicate-free list of the skills the user picked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillSelection {
    selected: Vec<String>,
}

impl SkillSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_skills<I, S>(skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut selection = Self::new();
        for skill in skills {
            selection.add_custom(skill.as_ref());
        }
        selection
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.selected.iter().any(|s| s == skill)
    }

    /// Select if absent, deselect if present. Returns whether it is now selected;
    /// blank input changes nothing.
    pub fn toggle(&mut self, skill: &str) -> bool {
        let skill = skill.trim();
        if skill.is_empty() {
            return false;
        }
        if let Some(pos) = self.selected.iter().position(|s| s == skill) {
            self.selected.remove(pos);
            false
        } else {
            self.selected.push(skill.to_string());
            true
        }
    }

    /// Select every available skill, or clear the selection when all are already selected.
    pub fn toggle_all(&mut self, available: &[String]) {
        if self.selected.len() == available.len() {
            self.selected.clear();
        } else {
            self.selected = Vec::new();
            for skill in available {
                if !self.contains(skill) {
                    self.selected.push(skill.clone());
                }
            }
        }
    }

    /// Add a free-text skill. Blank and duplicate entries are ignored.
    pub fn add_custom(&mut self, skill: &str) -> bool {
        let skill = skill.trim();
        if skill.is_empty() || self.contains(skill) {
            return false;
        }
        self.selected.push(skill.to_string());
        true
    }

}
