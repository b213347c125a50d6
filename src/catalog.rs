//! Static project catalog
//!
//! The portfolio's project list and skill levels, embedded at compile time.
//! Project titles are the default candidate list for project recommendations.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

const PROJECTS_JSON: &str = include_str!("../data/projects.json");
const SKILLS_JSON: &str = include_str!("../data/skills.json");

pub const MIN_SKILL_LEVEL: u8 = 1;
pub const MAX_SKILL_LEVEL: u8 = 5;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub summary: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_link: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Skill {
    pub name: String,
    /// Proficiency from 1 to 5.
    pub level: u8,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    projects: Vec<Project>,
    skills: Vec<Skill>,
}

impl Catalog {
    pub fn new(projects: Vec<Project>, skills: Vec<Skill>) -> Self {
        Self { projects, skills }
    }

    pub fn embedded() -> Result<Self> {
        Self::from_json(PROJECTS_JSON, SKILLS_JSON)
    }

    pub fn from_json(projects_json: &str, skills_json: &str) -> Result<Self> {
        let projects: Vec<Project> = serde_json::from_str(projects_json)?;
        let skills: Vec<Skill> = serde_json::from_str(skills_json)?;

        if let Some(skill) = skills
            .iter()
            .find(|s| !(MIN_SKILL_LEVEL..=MAX_SKILL_LEVEL).contains(&s.level))
        {
            return Err(Error::Catalog(format!(
                "skill '{}' has level {}, expected {}-{}",
                skill.name, skill.level, MIN_SKILL_LEVEL, MAX_SKILL_LEVEL
            )));
        }

        tracing::debug!(
            projects = projects.len(),
            skills = skills.len(),
            "Loaded portfolio catalog"
        );
        Ok(Self::new(projects, skills))
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn find_by_slug(&self, slug: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.slug == slug)
    }

    /// Project titles in catalog order.
    pub fn project_names(&self) -> Vec<String> {
        self.projects.iter().map(|p| p.title.clone()).collect()
    }

    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    /// Skills ordered by level, highest first. Equal levels keep catalog order.
    pub fn skills_by_level(&self) -> Vec<&Skill> {
        let mut skills: Vec<&Skill> = self.skills.iter().collect();
        skills.sort_by(|a, b| b.level.cmp(&a.level));
        skills
    }
}
