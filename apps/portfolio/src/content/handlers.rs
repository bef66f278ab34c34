use axum::{extract::State, Json};
use serde::Serialize;

use crate::content::partition::partition_skills;
use crate::models::cv::{CvData, SkillCategory};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SkillGroupResponse {
    pub category: SkillCategory,
    pub skills: Vec<String>,
}

/// GET /api/v1/cv
pub async fn handle_get_cv(State(state): State<AppState>) -> Json<CvData> {
    Json(state.cv.as_ref().clone())
}

/// GET /api/v1/cv/skills
///
/// Always four groups in fixed category order; empty groups are included.
pub async fn handle_get_skill_groups(
    State(state): State<AppState>,
) -> Json<Vec<SkillGroupResponse>> {
    let groups = partition_skills(&state.cv.skills)
        .into_iter()
        .map(|g| SkillGroupResponse {
            category: g.category,
            skills: g.skills.iter().map(|s| s.name.clone()).collect(),
        })
        .collect();
    Json(groups)
}
