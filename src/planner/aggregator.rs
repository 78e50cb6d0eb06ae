//! Course Aggregator
//!
//! Resolves which courses a plan draws from and collects their items into a
//! single ordered, deduplicated list. Courses are fetched one at a time in
//! plan order: whether the next course is needed at all depends on the
//! minutes already collected.

use super::catalog::{CatalogResult, CurriculumCatalog};
use super::tracks::Track;
use super::types::{CurriculumItem, Program};
use std::collections::HashSet;

/// Minutes assumed for an item without a usable duration while filling the budget
pub const BUDGET_DEFAULT_MINUTES: u32 = 45;

/// A curriculum item tagged with the course it was collected for
#[derive(Debug, Clone, PartialEq)]
pub struct SourcedItem {
    pub item: CurriculumItem,
    pub course_name: String,
}

/// Ordered, deduplicated items for one plan
#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    pub items: Vec<SourcedItem>,
    /// Multiplier-adjusted minutes represented by `items`
    pub filled_minutes: u32,
}

impl Aggregation {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Courses that contributed at least one item
    pub fn covered_courses(&self) -> HashSet<&str> {
        self.items.iter().map(|s| s.course_name.as_str()).collect()
    }

    /// Items after the last completed session.
    ///
    /// An unknown cursor keeps everything.
    pub fn remaining_after(&self, cursor: Option<&str>) -> &[SourcedItem] {
        let Some(cursor) = cursor else {
            return &self.items;
        };
        match self.items.iter().position(|s| s.item.id == cursor) {
            Some(index) => &self.items[index + 1..],
            None => &self.items,
        }
    }
}

/// Which courses to pull, and how far
#[derive(Debug, Clone)]
pub struct CoursePlan<'a> {
    pub track: Track,
    /// Starting course in single-course mode
    pub course: Option<&'a str>,
    pub program: Program,
    /// Minutes available over the whole plan
    pub budget_minutes: u32,
}

impl CoursePlan<'_> {
    /// Stack courses to visit after the starting course
    fn following_courses(&self) -> Vec<&'static str> {
        let stack = self.track.stack_courses();
        match self.course {
            None => stack.to_vec(),
            Some(selected) => match stack.iter().position(|c| *c == selected) {
                Some(index) => stack[index + 1..].to_vec(),
                None => stack.iter().copied().filter(|c| *c != selected).collect(),
            },
        }
    }
}

/// Collects items course by course, skipping anything already seen.
/// Lives for exactly one aggregation.
struct Collector<'c, C: ?Sized> {
    catalog: &'c C,
    program: Program,
    seen: HashSet<String>,
    aggregation: Aggregation,
}

impl<'c, C> Collector<'c, C>
where
    C: CurriculumCatalog + ?Sized,
{
    fn new(catalog: &'c C, program: Program) -> Self {
        Self {
            catalog,
            program,
            seen: HashSet::new(),
            aggregation: Aggregation::default(),
        }
    }

    fn append_course(&mut self, course_name: &str) -> CatalogResult<()> {
        let items = self.catalog.fetch_course_items(course_name)?;
        let mut added = 0usize;
        for item in items {
            if !self.seen.insert(item.id.clone()) {
                continue;
            }
            let minutes = item.duration_minutes().unwrap_or(BUDGET_DEFAULT_MINUTES);
            self.aggregation.filled_minutes = self
                .aggregation
                .filled_minutes
                .saturating_add(self.program.adjust(minutes));
            self.aggregation.items.push(SourcedItem {
                item,
                course_name: course_name.to_string(),
            });
            added += 1;
        }
        log::debug!("Collected {} items from course '{}'", added, course_name);
        Ok(())
    }

    fn below(&self, budget: u32) -> bool {
        self.aggregation.filled_minutes < budget
    }

    /// Append courses in order until the budget is met
    fn fill_until(&mut self, courses: &[&str], budget: u32) -> CatalogResult<()> {
        for course in courses {
            if !self.below(budget) {
                break;
            }
            self.append_course(course)?;
        }
        Ok(())
    }
}

/// Collect the ordered item list for a plan.
///
/// Single-course mode starts with the chosen course and continues through
/// the rest of the stack while time remains. Multi-course mode always takes
/// the whole stack. Either way, continuation courses are appended when the
/// budget is still not met. A course that has started is always taken whole.
pub fn aggregate<C>(catalog: &C, plan: &CoursePlan<'_>) -> CatalogResult<Aggregation>
where
    C: CurriculumCatalog + ?Sized,
{
    let mut collector = Collector::new(catalog, plan.program);
    let budget = plan.budget_minutes;

    match plan.course {
        Some(selected) => {
            collector.append_course(selected)?;
            collector.fill_until(&plan.following_courses(), budget)?;
        }
        None => {
            for course in plan.track.stack_courses() {
                collector.append_course(course)?;
            }
        }
    }

    collector.fill_until(plan.track.continuation_courses(), budget)?;

    Ok(collector.aggregation)
}
