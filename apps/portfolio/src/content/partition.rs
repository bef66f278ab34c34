use serde::Serialize;

use crate::models::cv::{Skill, SkillCategory};

/// Skills of one category, in the order they were authored.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SkillGroup<'a> {
    pub category: SkillCategory,
    pub skills: Vec<&'a Skill>,
}

impl SkillGroup<'_> {
    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

/// Groups skills by `SkillCategory::ALL`.
///
/// Always yields one group per category, in fixed order, including empty ones.
/// Skills with an unrecognized category land in no group.
pub fn partition_skills(skills: &[Skill]) -> Vec<SkillGroup<'_>> {
    SkillCategory::ALL
        .iter()
        .map(|&category| SkillGroup {
            category,
            skills: skills
                .iter()
                .filter(|s| s.category() == Some(category))
                .collect(),
        })
        .collect()
}
