//! Track Tables
//!
//! Static curriculum configuration: the canonical course order for every
//! track, the continuation courses pulled in once a track runs out, and the
//! completion messaging shown when a track has been fully planned.
//! Everything here is immutable data.

use serde::{Deserialize, Serialize};

/// A named learning track
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Track {
    Frontend,
    Backend,
    Fullstack,
    AiMl,
    Dsa,
    Sql,
    Python,
}

/// What to recommend once a track is complete
#[derive(Debug, Clone, Copy)]
pub struct NextTrack {
    pub next_track: Option<Track>,
    pub message: &'static str,
    pub courses: &'static [&'static str],
}

impl Track {
    pub const ALL: [Track; 7] = [
        Track::Frontend,
        Track::Backend,
        Track::Fullstack,
        Track::AiMl,
        Track::Dsa,
        Track::Sql,
        Track::Python,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Track::Frontend => "frontend",
            Track::Backend => "backend",
            Track::Fullstack => "fullstack",
            Track::AiMl => "ai-ml",
            Track::Dsa => "dsa",
            Track::Sql => "sql",
            Track::Python => "python",
        }
    }

    pub fn from_key(s: &str) -> Option<Self> {
        Track::ALL.into_iter().find(|track| track.as_str() == s)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Track::Backend => "Backend Development",
            Track::Frontend => "Frontend Development",
            Track::Fullstack => "Full Stack Development",
            Track::AiMl => "AI/ML Engineering",
            Track::Dsa => "Data Structures & Algorithms",
            Track::Sql => "SQL & Databases",
            Track::Python => "Python Programming",
        }
    }

    /// Canonical course order for the track
    pub fn stack_courses(&self) -> &'static [&'static str] {
        match self {
            Track::Frontend => &[
                "Build Your Own Static Website",
                "Build Your Own Responsive Website",
                "Modern Responsive Web Design",
                "JS Essentials",
                "Build Your Own Dynamic Web Application",
                "Introduction to React JS",
            ],
            Track::Backend => &[
                "Programming Foundations",
                "JS Essentials",
                "Introduction to Databases",
                "Node JS",
                "MongoDB",
            ],
            Track::Fullstack => &[
                "Build Your Own Static Website",
                "Build Your Own Responsive Website",
                "Modern Responsive Web Design",
                "Programming Foundations",
                "Python for DSML",
                "JS Essentials",
                "Build Your Own Dynamic Web Application",
                "Introduction to Databases",
                "Node JS",
                "Introduction to React JS",
                "MongoDB",
            ],
            Track::AiMl => &[
                "Programming Foundations",
                "Python for DSML",
                "Linux and Git Essentials",
                "Data Analytics Foundations",
                "Introduction to ML and Classification Algorithms",
                "Supervised Learning: Regression",
                "Generative AI",
                "Building LLM Applications",
            ],
            Track::Dsa => &[
                "Programming Foundations",
                "JS Essentials",
                "DSA Foundation",
                "Phase 1 : Data Structures and Algorithms",
                "Phase 2 : Advanced DSA",
            ],
            Track::Sql => &[
                "Programming Foundations",
                "Introduction to Databases",
                "Data Analytics Foundations",
            ],
            Track::Python => &[
                "Programming Foundations",
                "Python for DSML",
                "Data Analytics Foundations",
            ],
        }
    }

    /// Courses appended after the stack when time remains.
    /// Fullstack already covers everything.
    pub fn continuation_courses(&self) -> &'static [&'static str] {
        match self {
            Track::Python => &[
                "JS Essentials",
                "Introduction to Databases",
                "Data Analytics Foundations",
            ],
            Track::Sql => &[
                "Python for DSML",
                "Data Analytics Foundations",
                "JS Essentials",
            ],
            Track::Frontend => &[
                "Programming Foundations",
                "Introduction to Databases",
                "Node JS",
                "MongoDB",
            ],
            Track::Backend => &[
                "Build Your Own Static Website",
                "Build Your Own Responsive Website",
                "Introduction to React JS",
            ],
            Track::Dsa => &["Python for DSML", "Introduction to Databases", "Node JS"],
            Track::AiMl => &["Introduction to Databases", "JS Essentials", "Node JS"],
            Track::Fullstack => &[],
        }
    }

    pub fn next_track(&self) -> NextTrack {
        match self {
            Track::Backend => NextTrack {
                next_track: Some(Track::Frontend),
                message: "🎉 Congratulations! You've completed all Backend technologies! You can now move to Frontend Development to become a Full Stack Developer.",
                courses: &[
                    "Build Your Own Static Website",
                    "Build Your Own Responsive Website",
                    "Introduction to React JS",
                ],
            },
            Track::Frontend => NextTrack {
                next_track: Some(Track::Backend),
                message: "🎉 Congratulations! You've mastered Frontend Development! Consider moving to Backend Development to become a Full Stack Developer.",
                courses: &[
                    "Programming Foundations",
                    "Introduction to Databases",
                    "Node JS",
                    "MongoDB",
                ],
            },
            Track::Sql => NextTrack {
                next_track: Some(Track::Backend),
                message: "🎉 Congratulations! You've completed SQL & Databases! You can now explore Backend Development or Data Analytics.",
                courses: &["Node JS", "MongoDB", "Data Analytics Foundations"],
            },
            Track::Python => NextTrack {
                next_track: Some(Track::AiMl),
                message: "🎉 Congratulations! You've completed Python Programming! Consider exploring AI/ML or Data Science next.",
                courses: &[
                    "Data Analytics Foundations",
                    "Introduction to ML and Classification Algorithms",
                ],
            },
            Track::Dsa => NextTrack {
                next_track: Some(Track::Fullstack),
                message: "🎉 Congratulations! You've mastered DSA! You're now ready to build complete applications. Consider Full Stack Development.",
                courses: &["Introduction to React JS", "Node JS", "MongoDB"],
            },
            Track::AiMl => NextTrack {
                next_track: Some(Track::Fullstack),
                message: "🎉 Congratulations! You've completed AI/ML track! Consider learning Full Stack to build end-to-end ML applications.",
                courses: &[
                    "Build Your Own Dynamic Web Application",
                    "Node JS",
                    "Introduction to React JS",
                ],
            },
            Track::Fullstack => NextTrack {
                next_track: None,
                message: "🏆 Amazing! You've completed the entire Full Stack track! You're now a well-rounded developer ready for any challenge!",
                courses: &[],
            },
        }
    }
}

/// Number of weeks a plan-duration key spans; unknown keys plan one week
pub fn max_weeks(plan_duration: &str) -> u32 {
    match plan_duration {
        "1-week" => 1,
        "2-week" => 2,
        "3-week" => 3,
        "4-week" | "1-month" => 4,
        "2-month" => 8,
        _ => 1,
    }
}
