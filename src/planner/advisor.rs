//! Completion Advisor
//!
//! Decides what to tell the student after the plan: which course to pick up
//! next, or that the whole track has been planned and which track to move
//! on to. Purely descriptive; nothing is stored.

use super::tracks::Track;
use super::types::{Suggestion, TrackCompletion};
use std::collections::HashSet;

/// Advice attached to a generated path
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Advice {
    pub suggestion: Option<Suggestion>,
    pub track_completion: Option<TrackCompletion>,
}

/// Stack courses not yet covered, in the order they should be suggested.
///
/// The search starts right after `start_course` when it sits in the stack and
/// wraps around to the earlier courses, so a student who began mid-track is
/// pointed forward first. Without a starting course this is plain stack order.
fn uncovered_stack(
    track: Track,
    covered: &HashSet<&str>,
    start_course: Option<&str>,
) -> Vec<&'static str> {
    let stack = track.stack_courses();
    let pivot = start_course
        .and_then(|course| stack.iter().position(|c| *c == course))
        .map(|index| index + 1)
        .unwrap_or(0);

    stack[pivot..]
        .iter()
        .chain(stack[..pivot].iter())
        .copied()
        .filter(|course| !covered.contains(course))
        .collect()
}

/// Build the suggestion / completion advice for a plan
pub fn advise(track: Track, covered: &HashSet<&str>, start_course: Option<&str>) -> Advice {
    let remaining_stack = uncovered_stack(track, covered, start_course);
    let remaining_continuation: Vec<&str> = track
        .continuation_courses()
        .iter()
        .copied()
        .filter(|course| !covered.contains(course))
        .collect();

    if let Some(course) = remaining_stack.first() {
        let suggestion = Some(Suggestion {
            message: format!(
                "🚀 Great progress! After completing your current plan, you can continue with \"{}\" to keep leveling up!",
                course
            ),
            next_course: course.to_string(),
        });
        return Advice {
            suggestion,
            track_completion: None,
        };
    }

    let next = track.next_track();
    let next_track_name = next.next_track.map(|t| t.display_name().to_string());
    let track_completion = TrackCompletion {
        completed: true,
        track_name: track.display_name().to_string(),
        message: next.message.to_string(),
        next_track: next.next_track.map(|t| t.as_str().to_string()),
        next_track_name: next_track_name.clone(),
        suggested_courses: next.courses.iter().map(|c| c.to_string()).collect(),
    };

    let suggestion = remaining_continuation.first().map(|course| Suggestion {
        message: format!(
            "💡 Want to continue learning? You can start with \"{}\" from {}!",
            course,
            next_track_name.as_deref().unwrap_or("the next track")
        ),
        next_course: course.to_string(),
    });

    Advice {
        suggestion,
        track_completion: Some(track_completion),
    }
}
