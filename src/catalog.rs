use sqlx::{Pool, Sqlite};
use tracing::{info, instrument};

use crate::error::AppError;
use crate::models::{
    JobSkill, Resource, ResourceCategory, ResourceEntry, ResourceGroup, SkillEntry, SkillGroup,
};
use crate::seed;

/// Source of the resource and job-skill listings.
#[rocket::async_trait]
pub trait CatalogRepository: Send + Sync {
    fn name(&self) -> &'static str;

    /// Every category in storage order, each holding its own resources.
    async fn resources_by_category(&self) -> Result<Vec<ResourceGroup>, AppError>;

    /// Skills keyed by skill category, in first-seen order.
    async fn skills_by_category(&self) -> Result<Vec<SkillGroup>, AppError>;
}

pub type Catalog = Box<dyn CatalogRepository>;

pub struct SqliteCatalog {
    pool: Pool<Sqlite>,
}

impl SqliteCatalog {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }
}

#[rocket::async_trait]
impl CatalogRepository for SqliteCatalog {
    fn name(&self) -> &'static str {
        "database"
    }

    #[instrument(skip(self))]
    async fn resources_by_category(&self) -> Result<Vec<ResourceGroup>, AppError> {
        info!("Grouping resources by category");
        let categories = sqlx::query_as::<_, ResourceCategory>(
            "SELECT id, name, description FROM resource_categories ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        let resources = sqlx::query_as::<_, Resource>(
            "SELECT id, title, url, description, resource_type, category_id, is_free, added_at
             FROM resources ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        group_resources(categories, resources)
    }

    #[instrument(skip(self))]
    async fn skills_by_category(&self) -> Result<Vec<SkillGroup>, AppError> {
        info!("Grouping job skills by category");
        let skills = sqlx::query_as::<_, JobSkill>(
            "SELECT id, name, category, description, importance_level FROM job_skills ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(group_skills(
            skills
                .into_iter()
                .map(|skill| (skill.category.clone(), SkillEntry::from(skill))),
        ))
    }
}

/// The fixed seed tables, served when the database holds no catalog yet.
pub struct StaticCatalog;

#[rocket::async_trait]
impl CatalogRepository for StaticCatalog {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn resources_by_category(&self) -> Result<Vec<ResourceGroup>, AppError> {
        Ok(seed::RESOURCE_CATEGORIES
            .iter()
            .map(|category| ResourceGroup {
                category: category.name.to_string(),
                description: category.description.to_string(),
                resources: seed::RESOURCES
                    .iter()
                    .filter(|resource| resource.category == category.name)
                    .map(|resource| ResourceEntry {
                        title: resource.title.to_string(),
                        url: resource.url.to_string(),
                        description: resource.description.to_string(),
                        resource_type: resource.resource_type.to_string(),
                        is_free: resource.is_free,
                    })
                    .collect(),
            })
            .collect())
    }

    async fn skills_by_category(&self) -> Result<Vec<SkillGroup>, AppError> {
        Ok(group_skills(seed::JOB_SKILLS.iter().map(|skill| {
            (
                skill.category.to_string(),
                SkillEntry {
                    name: skill.name.to_string(),
                    description: skill.description.to_string(),
                    importance: skill.importance_level,
                },
            )
        })))
    }
}

fn group_resources(
    categories: Vec<ResourceCategory>,
    resources: Vec<Resource>,
) -> Result<Vec<ResourceGroup>, AppError> {
    let mut groups: Vec<(i64, ResourceGroup)> = categories
        .into_iter()
        .map(|category| {
            (
                category.id,
                ResourceGroup {
                    category: category.name,
                    description: category.description.unwrap_or_default(),
                    resources: Vec::new(),
                },
            )
        })
        .collect();

    for resource in resources {
        let Some((_, group)) = groups.iter_mut().find(|(id, _)| *id == resource.category_id)
        else {
            return Err(AppError::Internal(format!(
                "Resource {} references missing category {}",
                resource.id, resource.category_id
            )));
        };
        group.resources.push(ResourceEntry::from(resource));
    }

    Ok(groups.into_iter().map(|(_, group)| group).collect())
}

fn group_skills(skills: impl Iterator<Item = (String, SkillEntry)>) -> Vec<SkillGroup> {
    let mut groups: Vec<SkillGroup> = Vec::new();

    for (category, skill) in skills {
        match groups.iter_mut().find(|group| group.category == category) {
            Some(group) => group.skills.push(skill),
            None => groups.push(SkillGroup {
                category,
                skills: vec![skill],
            }),
        }
    }

    groups
}

/// Picks the database catalog once it has been seeded, the static tables
/// otherwise.
#[instrument(skip(pool))]
pub async fn select_catalog(pool: &Pool<Sqlite>) -> Result<Catalog, AppError> {
    let (categories,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM resource_categories")
        .fetch_one(pool)
        .await?;

    let catalog: Catalog = if categories > 0 {
        Box::new(SqliteCatalog::new(pool.clone()))
    } else {
        Box::new(StaticCatalog)
    };

    info!(catalog = catalog.name(), "Selected resource catalog");
    Ok(catalog)
}
