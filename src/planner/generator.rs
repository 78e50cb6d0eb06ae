//! Learning Path Generator
//!
//! Drives one path generation: aggregate the curriculum for the student's
//! track, apply the resume cursor, pack the remainder into weeks and attach
//! completion advice.
//!
//! Generation is read-only. It consumes the catalog and the request and
//! builds a fresh result; nothing is persisted.

use super::advisor::advise;
use super::aggregator::{aggregate, CoursePlan};
use super::catalog::{CatalogError, CurriculumCatalog};
use super::packer::{WeekPacker, DEFAULT_PORTAL_BASE_URL};
use super::tracks::Track;
use super::types::{PathRequest, PathResult};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PathError {
    #[error("No curriculum found for the selected path.")]
    NotFound,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Configuration for the generator
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Base of the learning portal deep links attached to sessions
    pub portal_base_url: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            portal_base_url: DEFAULT_PORTAL_BASE_URL.to_string(),
        }
    }
}

/// The learning path generator
#[derive(Debug, Clone, Default)]
pub struct PathGenerator {
    config: GeneratorConfig,
}

impl PathGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Generate a weekly learning path
    pub fn generate<C>(&self, catalog: &C, request: &PathRequest) -> Result<PathResult, PathError>
    where
        C: CurriculumCatalog + ?Sized,
    {
        request.validate().map_err(PathError::InvalidRequest)?;

        let program = request.program();
        let requested_track = request.goals.target_stack.as_deref().and_then(Track::from_key);
        let track = requested_track.unwrap_or(Track::Fullstack);
        let course = request.goals.single_course();
        let availability = &request.availability;
        let weekly_hours = availability.weekly_hours();

        log::info!(
            "Generating path: track={} course={} program={:?} weekly_hours={} plan={}",
            track.as_str(),
            course.unwrap_or("all"),
            program,
            weekly_hours,
            availability.plan_duration
        );

        // Step 1: Collect the ordered, deduplicated curriculum
        let plan = CoursePlan {
            track,
            course,
            program,
            budget_minutes: availability.total_minutes(),
        };
        let aggregation = aggregate(catalog, &plan)?;
        if aggregation.is_empty() {
            log::warn!("No curriculum items for track {}", track.as_str());
            return Err(PathError::NotFound);
        }

        // Step 2: Skip what the student already finished
        let remaining = aggregation.remaining_after(request.goals.resume_cursor());
        if remaining.is_empty() {
            log::info!("Resume cursor consumed all {} items", aggregation.items.len());
            return Ok(PathResult {
                student: request.clone(),
                program,
                modules: Vec::new(),
                total_weeks: 0,
                weekly_hours,
                suggestion: None,
                track_completion: None,
            });
        }

        // Step 3: Pack into weeks
        let packer = WeekPacker::new(availability.weekly_minutes(), availability.max_weeks(), program)
            .with_portal_base_url(&self.config.portal_base_url);
        let modules = packer.pack(remaining);

        // Step 4: Advice, judged on everything aggregated before the resume cut
        let mut advice = advise(track, &aggregation.covered_courses(), course);
        if requested_track.is_none() {
            // fullstack stands in for planning only; an unknown track has no completion table
            advice.track_completion = None;
        }

        log::info!(
            "Generated {} weeks from {} of {} items",
            modules.len(),
            remaining.len(),
            aggregation.items.len()
        );

        Ok(PathResult {
            student: request.clone(),
            program,
            total_weeks: modules.len(),
            modules,
            weekly_hours,
            suggestion: advice.suggestion,
            track_completion: advice.track_completion,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::catalog::SqliteCatalog;
    use crate::planner::types::{Availability, CurriculumItem, Program, StudentGoals};

    fn catalog_with(course: &str, count: usize) -> SqliteCatalog {
        let catalog = SqliteCatalog::in_memory().unwrap();
        let items: Vec<CurriculumItem> = (0..count)
            .map(|i| {
                CurriculumItem::new(&format!("item-{}", i), course, i as i64)
                    .with_topic("Basics")
                    .with_duration("30")
            })
            .collect();
        catalog.insert_items(&items).unwrap();
        catalog
    }

    #[test]
    fn test_generator_builds_weeks() {
        let catalog = catalog_with("Programming Foundations", 4);
        let request = PathRequest::new(StudentGoals::new(3, "python"), Availability::new(0.2, 0.0, "2-week"));

        let result = PathGenerator::default().generate(&catalog, &request).unwrap();
        assert_eq!(result.program, Program::Academy);
        assert_eq!(result.weekly_hours, 1.0);
        assert_eq!(result.total_weeks, 2);
        assert_eq!(result.modules[0].sessions.len(), 2);
        assert_eq!(result.modules[1].sessions.len(), 2);
        assert_eq!(result.student, request);
    }

    #[test]
    fn test_empty_catalog_is_not_found() {
        let catalog = SqliteCatalog::in_memory().unwrap();
        let request = PathRequest::new(StudentGoals::new(3, "sql"), Availability::new(1.0, 1.0, "1-week"));
        assert!(matches!(
            PathGenerator::default().generate(&catalog, &request),
            Err(PathError::NotFound)
        ));
    }

    #[test]
    fn test_invalid_request_rejected() {
        let catalog = catalog_with("Programming Foundations", 1);
        let request = PathRequest::new(StudentGoals::new(0, "sql"), Availability::new(1.0, 1.0, "1-week"));
        assert!(matches!(
            PathGenerator::default().generate(&catalog, &request),
            Err(PathError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_custom_portal_base_url() {
        let catalog = SqliteCatalog::in_memory().unwrap();
        catalog
            .insert_items(&[CurriculumItem::new("a", "Programming Foundations", 1)
                .with_topic("Basics")
                .with_portal_ids("c", "t", "u")])
            .unwrap();
        let generator = PathGenerator::new(GeneratorConfig {
            portal_base_url: "https://portal.example/learn".to_string(),
        });
        let request = PathRequest::new(StudentGoals::new(3, "sql"), Availability::new(1.0, 1.0, "1-week"));
        let result = generator.generate(&catalog, &request).unwrap();
        assert_eq!(
            result.modules[0].sessions[0].portal_url.as_deref(),
            Some("https://portal.example/learn?c_id=c&t_id=t&s_id=u")
        );
    }
}
