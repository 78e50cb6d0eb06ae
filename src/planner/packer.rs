//! Week Packer
//!
//! Greedy first-fit packing of the aggregated item list into weekly
//! modules. Items are never split or reordered: an item that would overflow
//! a week that already has sessions opens the next week instead.

use super::aggregator::SourcedItem;
use super::themes::{week_description, week_title};
use super::types::{CourseTransition, CurriculumItem, ModuleStatus, Program, Session, WeekModule};

/// Default portal used for session deep links
pub const DEFAULT_PORTAL_BASE_URL: &str = "https://learning.ccbp.in/course";

const CODING_DEFAULT_MINUTES: u32 = 45;
const QUIZ_DEFAULT_MINUTES: u32 = 15;
const FALLBACK_DEFAULT_MINUTES: u32 = 45;

/// Unadjusted minutes for an item, guessing from its name and type when the
/// recorded duration is unusable
pub fn base_minutes(item: &CurriculumItem) -> u32 {
    if let Some(minutes) = item.duration_minutes() {
        return minutes;
    }
    let name = item.session_name.as_deref().unwrap_or("").to_lowercase();
    let kind = item.set_type.as_deref().unwrap_or("").to_lowercase();
    if name.contains("coding practice") || kind.contains("coding") {
        CODING_DEFAULT_MINUTES
    } else if name.contains("mcq") || kind.contains("quiz") || name.contains("quiz") {
        QUIZ_DEFAULT_MINUTES
    } else {
        FALLBACK_DEFAULT_MINUTES
    }
}

/// Portal link for an item; needs course, topic and unit ids
pub fn portal_url(base_url: &str, item: &CurriculumItem) -> Option<String> {
    let present = |value: &Option<String>| value.as_deref().filter(|v| !v.is_empty()).map(str::to_owned);
    let course_id = present(&item.course_id)?;
    let topic_id = present(&item.topic_id)?;
    let unit_id = present(&item.unit_id)?;
    Some(format!(
        "{}?c_id={}&t_id={}&s_id={}",
        base_url, course_id, topic_id, unit_id
    ))
}

/// Packing limits for one plan
#[derive(Debug, Clone)]
pub struct WeekPacker {
    pub weekly_minutes: u32,
    pub max_weeks: u32,
    pub program: Program,
    pub portal_base_url: String,
}

/// Sessions accumulated for the week being filled
#[derive(Debug, Default)]
struct WeekBucket {
    minutes: u32,
    sessions: Vec<(Session, String)>,
    topics: Vec<String>,
    courses: Vec<String>,
}

impl WeekBucket {
    fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    fn push(&mut self, session: Session, course: &str) {
        self.minutes += session.duration_mins;
        if !self.topics.contains(&session.topic) {
            self.topics.push(session.topic.clone());
        }
        if !self.courses.iter().any(|c| c == course) {
            self.courses.push(course.to_string());
        }
        self.sessions.push((session, course.to_string()));
    }

    /// Every point inside the week where the source course changes
    fn transitions(&self) -> Vec<CourseTransition> {
        let mut transitions = Vec::new();
        let mut last: Option<&str> = None;
        for (_, course) in &self.sessions {
            if course.is_empty() {
                continue;
            }
            if let Some(previous) = last {
                if previous != course {
                    transitions.push(CourseTransition {
                        completed: previous.to_string(),
                        next: course.clone(),
                        message: format!("🎉 You completed {}! Next up: {}", previous, course),
                    });
                }
            }
            last = Some(course);
        }
        transitions
    }

    fn into_module(self, week: u32) -> WeekModule {
        let course_transitions = self.transitions();
        let title = week_title(&self.topics, week);
        let description = week_description(self.sessions.len(), &self.topics);
        let hours_required = (f64::from(self.minutes) / 60.0 * 10.0).round() / 10.0;

        WeekModule {
            id: format!("mod-week-{}", week),
            name: format!("Week {} Plan", week),
            topic: title,
            topics_list: self.topics,
            courses_in_week: self.courses,
            hours_required,
            weeks_allocated: 1,
            description,
            status: if week == 1 {
                ModuleStatus::Current
            } else {
                ModuleStatus::Upcoming
            },
            sessions: self.sessions.into_iter().map(|(session, _)| session).collect(),
            course_transitions,
        }
    }
}

impl WeekPacker {
    pub fn new(weekly_minutes: u32, max_weeks: u32, program: Program) -> Self {
        Self {
            weekly_minutes,
            max_weeks,
            program,
            portal_base_url: DEFAULT_PORTAL_BASE_URL.to_string(),
        }
    }

    pub fn with_portal_base_url(mut self, base_url: &str) -> Self {
        self.portal_base_url = base_url.to_string();
        self
    }

    /// Multiplier-adjusted minutes for an item; always at least one
    pub fn session_minutes(&self, item: &CurriculumItem) -> u32 {
        self.program.adjust(base_minutes(item)).max(1)
    }

    fn session_for(&self, item: &CurriculumItem) -> Session {
        let topic = item
            .topic
            .clone()
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| "General".to_string());
        Session {
            id: item.id.clone(),
            session_name: item
                .session_name
                .clone()
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| topic.clone()),
            topic,
            duration_mins: self.session_minutes(item),
            set_type: item.set_type.clone().unwrap_or_default(),
            portal_url: portal_url(&self.portal_base_url, item),
        }
    }

    /// Pack items into at most `max_weeks` modules.
    ///
    /// Items that do not fit before the cap is reached are dropped from
    /// this plan.
    pub fn pack(&self, items: &[SourcedItem]) -> Vec<WeekModule> {
        let mut modules = Vec::new();
        let mut week = 1u32;
        let mut bucket = WeekBucket::default();

        for sourced in items {
            if week > self.max_weeks {
                break;
            }

            let session = self.session_for(&sourced.item);
            let overflows =
                u64::from(bucket.minutes) + u64::from(session.duration_mins) > u64::from(self.weekly_minutes);

            if overflows && !bucket.is_empty() {
                modules.push(std::mem::take(&mut bucket).into_module(week));
                week += 1;
                if week > self.max_weeks {
                    break;
                }
            }

            bucket.push(session, &sourced.course_name);
        }

        if week <= self.max_weeks && !bucket.is_empty() {
            modules.push(bucket.into_module(week));
        }

        log::debug!(
            "Packed {} items into {} weeks (limit {} min/week, cap {})",
            items.len(),
            modules.len(),
            self.weekly_minutes,
            self.max_weeks
        );
        modules
    }
}
