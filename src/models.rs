use chrono::NaiveDateTime;
use serde::Serialize;

#[derive(Debug, Serialize, Clone, sqlx::FromRow)]
pub struct UserProgress {
    pub id: i64,
    pub user_id: i64,
    pub path_id: String,
    pub topic_id: String,
    pub completed: bool,
    pub completed_at: Option<NaiveDateTime>,
}

#[derive(Debug, Serialize, Clone, sqlx::FromRow)]
pub struct UserProject {
    pub id: i64,
    pub user_id: i64,
    pub project_id: String,
    pub github_url: Option<String>,
    pub completed_at: Option<NaiveDateTime>,
}

#[derive(Debug, Serialize, Clone, sqlx::FromRow)]
pub struct UserNote {
    pub id: i64,
    pub user_id: i64,
    pub content_type: String,
    pub content_id: String,
    pub notes: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Serialize, Clone, sqlx::FromRow)]
pub struct JobSkill {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub description: Option<String>,
    pub importance_level: i64,
}

#[derive(Debug, Serialize, Clone, sqlx::FromRow)]
pub struct ResourceCategory {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Clone, sqlx::FromRow)]
pub struct Resource {
    pub id: i64,
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub resource_type: String,
    pub category_id: i64,
    pub is_free: bool,
    pub added_at: NaiveDateTime,
}

/// What a visitor sees for a single resource link.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct ResourceEntry {
    pub title: String,
    pub url: String,
    pub description: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    pub is_free: bool,
}

impl From<Resource> for ResourceEntry {
    fn from(resource: Resource) -> Self {
        Self {
            title: resource.title,
            url: resource.url,
            description: resource.description.unwrap_or_default(),
            resource_type: resource.resource_type,
            is_free: resource.is_free,
        }
    }
}

#[derive(Debug, Serialize, Clone)]
pub struct ResourceGroup {
    pub category: String,
    pub description: String,
    pub resources: Vec<ResourceEntry>,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct SkillEntry {
    pub name: String,
    pub description: String,
    pub importance: i64,
}

impl From<JobSkill> for SkillEntry {
    fn from(skill: JobSkill) -> Self {
        Self {
            name: skill.name,
            description: skill.description.unwrap_or_default(),
            importance: skill.importance_level,
        }
    }
}

#[derive(Debug, Serialize, Clone)]
pub struct SkillGroup {
    pub category: String,
    pub skills: Vec<SkillEntry>,
}
