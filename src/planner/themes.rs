//! Week Titles
//!
//! Turns the set of topics a week touches into a short heading. Themes are
//! detected with an ordered keyword table; the first two matches name the
//! week.

/// A theme label and the lower-case keywords that signal it
#[derive(Debug, Clone, Copy)]
pub struct ThemeRule {
    pub label: &'static str,
    pub keywords: &'static [&'static str],
}

/// Evaluated in order; earlier rules win the title
pub const THEME_RULES: &[ThemeRule] = &[
    ThemeRule { label: "Foundations", keywords: &["introduction", "intro"] },
    ThemeRule {
        label: "OOP Concepts",
        keywords: &["oop", "object oriented", "abstraction", "polymorphism", "inheritance"],
    },
    ThemeRule {
        label: "Functions & Logic",
        keywords: &["function", "recursion", "scope", "built-in"],
    },
    ThemeRule {
        label: "Data Structures",
        keywords: &["list", "matri", "nested", "data structure"],
    },
    ThemeRule { label: "Control Flow", keywords: &["loop", "conditional", "control"] },
    ThemeRule {
        label: "Core Syntax",
        keywords: &["string", "variable", "type", "conversion"],
    },
    ThemeRule { label: "Libraries", keywords: &["library", "module", "package"] },
    ThemeRule {
        label: "Problem Solving",
        keywords: &["problem solving", "practice", "coding"],
    },
    ThemeRule {
        label: "Web Fundamentals",
        keywords: &["html", "css", "web", "responsive"],
    },
    ThemeRule { label: "JavaScript", keywords: &["javascript", "js", "dom", "event"] },
    ThemeRule { label: "React", keywords: &["react", "component", "hook", "state"] },
    ThemeRule {
        label: "APIs & Networking",
        keywords: &["api", "http", "fetch", "rest"],
    },
    ThemeRule {
        label: "Databases & SQL",
        keywords: &["sql", "database", "query", "table"],
    },
    ThemeRule {
        label: "Backend & Node.js",
        keywords: &["node", "express", "server", "middleware"],
    },
    ThemeRule { label: "MongoDB", keywords: &["mongo", "crud", "aggregat"] },
    ThemeRule {
        label: "Dev Tools & Git",
        keywords: &["git", "linux", "terminal", "cli"],
    },
    ThemeRule {
        label: "AI & ML",
        keywords: &["ai", "ml", "model", "genai", "llm"],
    },
    ThemeRule {
        label: "Data Analytics",
        keywords: &["analytics", "pandas", "numpy", "visualization"],
    },
    ThemeRule {
        label: "CSS Frameworks & Layouts",
        keywords: &["bootstrap", "tailwind", "flex", "grid"],
    },
    ThemeRule {
        label: "DSA",
        keywords: &["dsa", "sorting", "search", "tree", "graph"],
    },
];

/// Theme labels matched by the given topics, in rule order
pub fn detect_themes(topics: &[String]) -> Vec<&'static str> {
    let joined = topics.join(" ").to_lowercase();
    THEME_RULES
        .iter()
        .filter(|rule| rule.keywords.iter().any(|keyword| joined.contains(keyword)))
        .map(|rule| rule.label)
        .collect()
}

/// Short heading for a week
pub fn week_title(topics: &[String], week: u32) -> String {
    match topics {
        [] => return format!("Week {} Sprint", week),
        [only] => return only.clone(),
        [first, second] => return format!("{} & {}", first, second),
        _ => {}
    }

    match detect_themes(topics).as_slice() {
        [first, second, ..] => format!("{}, {} & More", first, second),
        [only] => format!("{} & {} Topics", only, topics.len()),
        [] => format!("{} & {} More Topics", topics[0], topics.len() - 1),
    }
}

/// One-line summary of a week's contents
pub fn week_description(session_count: usize, topics: &[String]) -> String {
    let sample = topics.iter().take(3).cloned().collect::<Vec<_>>().join(", ");
    let extra = if topics.len() > 3 {
        format!(" and {} more", topics.len() - 3)
    } else {
        String::new()
    };
    format!(
        "Covers {} sessions across {} topics including {}{}.",
        session_count,
        topics.len(),
        sample,
        extra
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topics(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_short_topic_lists_are_named_directly() {
        assert_eq!(week_title(&[], 3), "Week 3 Sprint");
        assert_eq!(week_title(&topics(&["Loops"]), 1), "Loops");
        assert_eq!(week_title(&topics(&["Loops", "Strings"]), 1), "Loops & Strings");
    }

    #[test]
    fn test_two_themes_name_the_week() {
        let week = topics(&["SQL Basics", "Database Design", "Express Server"]);
        assert_eq!(week_title(&week, 1), "Databases & SQL, Backend & Node.js & More");
    }

    #[test]
    fn test_single_theme_counts_topics() {
        let week = topics(&["SQL Basics", "Joins", "Subqueries"]);
        assert_eq!(week_title(&week, 2), "Databases & SQL & 3 Topics");
    }

    #[test]
    fn test_keywords_match_inside_words() {
        // "loops" contains "oop", so loop-heavy weeks also pick up the OOP theme
        let week = topics(&["While Loops", "For Loops", "Nested Loops"]);
        assert_eq!(
            detect_themes(&week),
            vec!["OOP Concepts", "Data Structures", "Control Flow"]
        );
    }

    #[test]
    fn test_no_theme_falls_back_to_first_topic() {
        let week = topics(&["Aptitude", "Reasoning", "Verbal"]);
        assert_eq!(week_title(&week, 1), "Aptitude & 2 More Topics");
    }

    #[test]
    fn test_description_truncates_samples() {
        let week = topics(&["A", "B", "C", "D", "E"]);
        assert_eq!(
            week_description(9, &week),
            "Covers 9 sessions across 5 topics including A, B, C and 2 more."
        );
        assert_eq!(
            week_description(2, &topics(&["A", "B"])),
            "Covers 2 sessions across 2 topics including A, B."
        );
    }
}
