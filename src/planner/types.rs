//! Learning Path Types
//!
//! Core data structures for path generation: the curriculum item owned by
//! the catalog, the student request (profile / goals / availability) and
//! the weekly plan returned to the client.

use serde::{Deserialize, Deserializer, Serialize};

use super::tracks;

// ============================================================
// CURRICULUM ITEM
// ============================================================

/// A single curriculum session as stored in the catalog.
///
/// Field names follow the catalog's JSON shape (`courseName`, `setType`, ...)
/// so seed files and API output share one representation.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CurriculumItem {
    #[serde(default, alias = "_id")]
    pub id: String,
    pub course_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_name: Option<String>,
    /// Raw set type: "LEARNING_SET", "PRACTICE", "QUIZ", ...
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_id: Option<String>,
    /// Duration in minutes as imported. May be empty, zero or free text.
    #[serde(
        default,
        deserialize_with = "duration_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub languages: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcomes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prerequisites: Option<String>,
    /// Canonical within-course ordering key
    #[serde(default)]
    pub sequence_number: i64,
}

impl CurriculumItem {
    pub fn new(id: &str, course_name: &str, sequence_number: i64) -> Self {
        Self {
            id: id.to_string(),
            course_name: course_name.to_string(),
            sequence_number,
            ..Default::default()
        }
    }

    pub fn with_topic(mut self, topic: &str) -> Self {
        self.topic = Some(topic.to_string());
        self
    }

    pub fn with_session(mut self, session_name: &str, set_type: &str) -> Self {
        self.session_name = Some(session_name.to_string());
        self.set_type = Some(set_type.to_string());
        self
    }

    pub fn with_duration(mut self, duration: &str) -> Self {
        self.duration = Some(duration.to_string());
        self
    }

    pub fn with_portal_ids(mut self, course_id: &str, topic_id: &str, unit_id: &str) -> Self {
        self.course_id = Some(course_id.to_string());
        self.topic_id = Some(topic_id.to_string());
        self.unit_id = Some(unit_id.to_string());
        self
    }

    /// Recorded duration, if it parses to a positive whole number of minutes.
    ///
    /// Parsing reads the leading integer ("45", " 30 mins") and ignores the
    /// rest; anything else, zero and negatives count as absent.
    pub fn duration_minutes(&self) -> Option<u32> {
        let raw = self.duration.as_deref()?.trim_start();
        let (negative, digits) = match raw.as_bytes().first() {
            Some(b'-') => (true, &raw[1..]),
            Some(b'+') => (false, &raw[1..]),
            _ => (false, raw),
        };
        let end = digits
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(digits.len());
        let value: u64 = digits[..end].parse().ok()?;
        if negative || value == 0 {
            return None;
        }
        u32::try_from(value).ok()
    }

    /// Parsed set type, when it is one of the known catalog kinds
    pub fn kind(&self) -> Option<SetType> {
        self.set_type.as_deref().and_then(SetType::from_key)
    }
}

/// Accept both `"45"` and `45` for the duration column.
fn duration_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    }))
}

/// Kind of curriculum session
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SetType {
    LearningSet,
    Practice,
    QuestionSet,
    Quiz,
    Exam,
    Assessment,
    Project,
}

impl SetType {
    pub fn from_key(s: &str) -> Option<Self> {
        match s.trim() {
            "LEARNING_SET" => Some(SetType::LearningSet),
            "PRACTICE" => Some(SetType::Practice),
            "QUESTION_SET" => Some(SetType::QuestionSet),
            "QUIZ" => Some(SetType::Quiz),
            "EXAM" => Some(SetType::Exam),
            "ASSESSMENT" => Some(SetType::Assessment),
            "PROJECT" => Some(SetType::Project),
            _ => None,
        }
    }

    /// Minutes shown in the catalog listing when an item has no duration
    pub fn display_minutes(&self) -> u32 {
        match self {
            SetType::LearningSet => 18,
            SetType::Practice => 60,
            SetType::QuestionSet => 60,
            SetType::Quiz => 12,
            SetType::Exam => 15,
            SetType::Assessment => 30,
            SetType::Project => 120,
        }
    }
}

// ============================================================
// PROGRAM
// ============================================================

/// Pacing program derived from skill level and backlogs
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Program {
    Basic,
    Academy,
    Intensive,
}

impl Program {
    pub fn determine(skill_level: u8, has_backlogs: bool) -> Self {
        if skill_level <= 2 || has_backlogs {
            Program::Basic
        } else if skill_level >= 4 {
            Program::Intensive
        } else {
            Program::Academy
        }
    }

    /// Duration multiplier in percent (1.3 / 1.0 / 0.7)
    pub fn multiplier_percent(&self) -> u32 {
        match self {
            Program::Basic => 130,
            Program::Academy => 100,
            Program::Intensive => 70,
        }
    }

    /// Apply the multiplier and round up to a whole minute
    pub fn adjust(&self, minutes: u32) -> u32 {
        let scaled = u64::from(minutes) * u64::from(self.multiplier_percent());
        u32::try_from(scaled.div_ceil(100)).unwrap_or(u32::MAX)
    }
}

// ============================================================
// STUDENT REQUEST
// ============================================================

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    #[serde(default)]
    pub has_backlogs: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// "1st" .. "4th"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_comfort: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StudentGoals {
    /// 1 (beginner) to 5 (advanced)
    pub current_skill_level: u8,
    /// Track key; unknown or missing tracks resolve to fullstack
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_stack: Option<String>,
    /// Single starting course, or "all" for the whole track
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_completed_session_id: Option<String>,
    /// "placement", "internship", "skill-upgrade"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_goal: Option<String>,
}

impl StudentGoals {
    pub fn new(current_skill_level: u8, target_stack: &str) -> Self {
        Self {
            current_skill_level,
            target_stack: Some(target_stack.to_string()),
            course_name: None,
            last_completed_session_id: None,
            primary_goal: None,
        }
    }

    /// The selected starting course, if the student is in single-course mode
    pub fn single_course(&self) -> Option<&str> {
        self.course_name
            .as_deref()
            .filter(|name| !name.is_empty() && *name != "all")
    }

    /// Resume cursor; "none" and empty ids mean "start from the beginning"
    pub fn resume_cursor(&self) -> Option<&str> {
        self.last_completed_session_id
            .as_deref()
            .filter(|id| !id.is_empty() && *id != "none")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    pub weekday_hours: f64,
    pub weekend_hours: f64,
    /// "1-week", "2-week", "3-week", "4-week", "1-month", "2-month"
    #[serde(default)]
    pub plan_duration: String,
    /// "morning", "afternoon", "late-night"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_window: Option<String>,
}

impl Availability {
    pub fn new(weekday_hours: f64, weekend_hours: f64, plan_duration: &str) -> Self {
        Self {
            weekday_hours,
            weekend_hours,
            plan_duration: plan_duration.to_string(),
            preferred_window: None,
        }
    }

    /// Five weekdays plus two weekend days
    pub fn weekly_hours(&self) -> f64 {
        self.weekday_hours * 5.0 + self.weekend_hours * 2.0
    }

    /// Weekly budget in whole minutes.
    ///
    /// Flooring is exact here: session durations are integers, so
    /// `sum > 19.8` holds exactly when `sum > 19`.
    pub fn weekly_minutes(&self) -> u32 {
        to_minutes((self.weekly_hours() * 60.0).floor())
    }

    pub fn max_weeks(&self) -> u32 {
        tracks::max_weeks(&self.plan_duration)
    }

    /// Minutes available over the whole plan, rounded up
    pub fn total_minutes(&self) -> u32 {
        to_minutes((self.weekly_hours() * 60.0 * f64::from(self.max_weeks())).ceil())
    }
}

fn to_minutes(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        value.min(f64::from(u32::MAX)) as u32
    } else {
        0
    }
}

/// Input to path generation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PathRequest {
    #[serde(default)]
    pub profile: StudentProfile,
    pub goals: StudentGoals,
    pub availability: Availability,
}

impl PathRequest {
    pub fn new(goals: StudentGoals, availability: Availability) -> Self {
        Self {
            profile: StudentProfile::default(),
            goals,
            availability,
        }
    }

    pub fn program(&self) -> Program {
        Program::determine(self.goals.current_skill_level, self.profile.has_backlogs)
    }

    /// Reject inputs the planner cannot interpret
    pub fn validate(&self) -> Result<(), String> {
        if !(1..=5).contains(&self.goals.current_skill_level) {
            return Err(format!(
                "currentSkillLevel must be between 1 and 5, got {}",
                self.goals.current_skill_level
            ));
        }
        for (field, hours) in [
            ("weekdayHours", self.availability.weekday_hours),
            ("weekendHours", self.availability.weekend_hours),
        ] {
            if !hours.is_finite() || hours < 0.0 {
                return Err(format!("{} must be a non-negative number", field));
            }
        }
        Ok(())
    }
}

// ============================================================
// PATH OUTPUT
// ============================================================

/// One scheduled session inside a week
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub topic: String,
    pub session_name: String,
    /// Multiplier-adjusted, always positive
    pub duration_mins: u32,
    pub set_type: String,
    /// Learning portal deep link, when the item carries all portal ids
    #[serde(rename = "ccbpUrl")]
    pub portal_url: Option<String>,
}

/// Marks the point inside a week where one course ends and the next begins
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CourseTransition {
    pub completed: String,
    pub next: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ModuleStatus {
    Current,
    Upcoming,
}

/// A single week of the plan
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeekModule {
    pub id: String,
    pub name: String,
    /// Generated week title
    pub topic: String,
    pub topics_list: Vec<String>,
    pub courses_in_week: Vec<String>,
    pub hours_required: f64,
    pub weeks_allocated: u32,
    pub description: String,
    pub status: ModuleStatus,
    pub sessions: Vec<Session>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub course_transitions: Vec<CourseTransition>,
}

impl WeekModule {
    pub fn total_minutes(&self) -> u32 {
        self.sessions.iter().map(|s| s.duration_mins).sum()
    }
}

/// Points the student at the next course to pick up
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub message: String,
    pub next_course: String,
}

/// Emitted once every stack course of the track has been planned
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrackCompletion {
    pub completed: bool,
    pub track_name: String,
    pub message: String,
    pub next_track: Option<String>,
    pub next_track_name: Option<String>,
    pub suggested_courses: Vec<String>,
}

/// The complete generated learning path
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PathResult {
    /// Echo of the request the plan was built from
    pub student: PathRequest,
    pub program: Program,
    pub modules: Vec<WeekModule>,
    pub total_weeks: usize,
    pub weekly_hours: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<Suggestion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_completion: Option<TrackCompletion>,
}
