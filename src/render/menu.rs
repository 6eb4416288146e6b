//! Plugin menu generation.
//!
//! Each output line is either plain text or `text | key=value key=value`,
//! and a line that is exactly `---` is a separator. The first line is the
//! badge shown in the menu bar; everything after the first separator is
//! the dropdown.

use crate::analysis::total_issue_count;
use crate::models::{AggregatedInstance, Issue, ProjectGroup};
use reqwest::Url;
use std::fmt;

const BADGE_GLYPH: &str = "✦";
const TRACKER_GLYPH: &str = "➠";
const BRANCH_GLYPH: &str = "├";
const LAST_BRANCH_GLYPH: &str = "└";
const SEPARATOR: &str = "---";

const ZERO_COLOR: &str = "#7d7d7d";
const TRACKER_COLOR: &str = "#33BFDB";
const STATUS_COLOR: &str = "#58BE89";
const WARNING_COLOR: &str = "#ECB935";

/// Font size for everything below the instance header.
const DETAIL_SIZE: u32 = 11;

/// Counts above this are shown as `99+`.
const BADGE_CAP: usize = 99;

/// Menu-bar appearance, which decides the base text color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    #[default]
    Dark,
    Light,
}

impl DisplayMode {
    /// Color for instance headers and issue lines.
    pub fn base_color(self) -> &'static str {
        match self {
            DisplayMode::Dark => "white",
            DisplayMode::Light => "black",
        }
    }
}

/// A single output line with optional plugin attributes.
#[derive(Debug, Clone)]
struct MenuLine {
    text: String,
    attrs: Vec<(&'static str, String)>,
}

impl MenuLine {
    fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            attrs: Vec::new(),
        }
    }

    fn attr(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((key, value.into()));
        self
    }

    fn color(self, color: &str) -> Self {
        self.attr("color", color)
    }

    fn href(self, href: &str) -> Self {
        self.attr("href", href)
    }

    fn size(self, size: u32) -> Self {
        self.attr("size", size.to_string())
    }
}

impl fmt::Display for MenuLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)?;
        for (i, (key, value)) in self.attrs.iter().enumerate() {
            let lead = if i == 0 { " | " } else { " " };
            write!(f, "{}{}={}", lead, key, value)?;
        }
        Ok(())
    }
}

/// Render the full success menu for every instance, in order.
pub fn render_menu(instances: &[AggregatedInstance], display: DisplayMode) -> Vec<String> {
    let mut lines = vec![render_badge(total_issue_count(instances))];

    for instance in instances {
        render_instance(instance, display, &mut lines);
    }

    lines
}

/// Render the fixed failure menu.
pub fn render_abort(error: &dyn fmt::Display) -> Vec<String> {
    vec![
        MenuLine::new(format!("{} !", BADGE_GLYPH))
            .color(WARNING_COLOR)
            .to_string(),
        SEPARATOR.to_string(),
        format!("Error: {}", error),
    ]
}

/// Menu-bar badge: dimmed glyph at zero, capped at `99+`.
fn render_badge(total: usize) -> String {
    match total {
        0 => MenuLine::new(BADGE_GLYPH).color(ZERO_COLOR).to_string(),
        n if n > BADGE_CAP => format!("{} {}+", BADGE_GLYPH, BADGE_CAP),
        n => format!("{} {}", BADGE_GLYPH, n),
    }
}

fn render_instance(instance: &AggregatedInstance, display: DisplayMode, lines: &mut Vec<String>) {
    lines.push(SEPARATOR.to_string());
    lines.push(
        MenuLine::new(instance.url.as_str())
            .color(display.base_color())
            .href(&instance.url)
            .to_string(),
    );
    lines.push(SEPARATOR.to_string());

    for project in instance.projects.values() {
        render_project(&instance.url, project, display, lines);
        lines.push(SEPARATOR.to_string());
    }
}

fn render_project(
    base_url: &str,
    project: &ProjectGroup,
    display: DisplayMode,
    lines: &mut Vec<String>,
) {
    lines.push(
        MenuLine::new(format!("{}: {}", project.name, project.issue_count))
            .size(DETAIL_SIZE)
            .to_string(),
    );

    for tracker in project.trackers.values() {
        lines.push(
            MenuLine::new(format!("{} {}", TRACKER_GLYPH, tracker.name))
                .color(TRACKER_COLOR)
                .size(DETAIL_SIZE)
                .to_string(),
        );

        for bucket in tracker.issues_by_status.values() {
            render_status_bucket(base_url, bucket, display, lines);
        }
    }
}

fn render_status_bucket(
    base_url: &str,
    bucket: &[Issue],
    display: DisplayMode,
    lines: &mut Vec<String>,
) {
    let Some(first) = bucket.first() else {
        return;
    };

    lines.push(
        MenuLine::new(format!("[{}]", first.status.name))
            .color(STATUS_COLOR)
            .size(DETAIL_SIZE)
            .to_string(),
    );

    for (i, issue) in bucket.iter().enumerate() {
        let prefix = tree_glyph(i + 1 == bucket.len());
        lines.push(
            MenuLine::new(format!("{} #{} {}", prefix, issue.id, issue.subject))
                .color(display.base_color())
                .href(&issue_link(base_url, issue.id))
                .size(DETAIL_SIZE)
                .to_string(),
        );
    }
}

fn tree_glyph(is_last: bool) -> &'static str {
    if is_last {
        LAST_BRANCH_GLYPH
    } else {
        BRANCH_GLYPH
    }
}

/// Resolve `/issues/{id}` against the instance URL.
///
/// The path is absolute, so it replaces any path on the base. Bases that do
/// not parse fall back to plain concatenation.
fn issue_link(base_url: &str, id: u64) -> String {
    let path = format!("/issues/{}", id);
    Url::parse(base_url)
        .and_then(|base| base.join(&path))
        .map(String::from)
        .unwrap_or_else(|_| format!("{}{}", base_url.trim_end_matches('/'), path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::aggregate;
    use crate::models::Reference;

    fn create_test_issue(
        id: u64,
        subject: &str,
        project: (u64, &str),
        status: (u64, &str),
    ) -> Issue {
        Issue {
            id,
            subject: subject.to_string(),
            project: Reference::new(project.0, project.1),
            tracker: Reference::new(1, "Bug"),
            status: Reference::new(status.0, status.1),
        }
    }

    fn instance_with(count: usize) -> AggregatedInstance {
        let issues = (0..count)
            .map(|i| create_test_issue(i as u64, "x", (1, "Core"), (1, "New")))
            .collect();
        aggregate("http://t.example/", issues)
    }

    #[test]
    fn test_badge_zero_is_dimmed() {
        let lines = render_menu(&[instance_with(0)], DisplayMode::Dark);
        assert_eq!(lines[0], "✦ | color=#7d7d7d");
    }

    #[test]
    fn test_badge_exact_count() {
        let lines = render_menu(&[instance_with(42)], DisplayMode::Dark);
        assert_eq!(lines[0], "✦ 42");
    }

    #[test]
    fn test_badge_boundaries() {
        assert_eq!(render_badge(99), "✦ 99");
        assert_eq!(render_badge(100), "✦ 99+");
    }

    #[test]
    fn test_badge_sums_instances() {
        let lines = render_menu(&[instance_with(100), instance_with(50)], DisplayMode::Dark);
        assert_eq!(lines[0], "✦ 99+");
    }

    #[test]
    fn test_no_instances_renders_badge_only() {
        let lines = render_menu(&[], DisplayMode::Dark);
        assert_eq!(lines, vec!["✦ | color=#7d7d7d".to_string()]);
    }

    #[test]
    fn test_two_issue_scenario() {
        let issues = vec![
            create_test_issue(101, "Fix bug", (1, "Core"), (1, "New")),
            create_test_issue(102, "Add test", (1, "Core"), (1, "New")),
        ];
        let instance = aggregate("http://t.example/", issues);

        let lines = render_menu(&[instance], DisplayMode::Dark);

        assert_eq!(
            lines,
            vec![
                "✦ 2",
                "---",
                "http://t.example/ | color=white href=http://t.example/",
                "---",
                "Core: 2 | size=11",
                "➠ Bug | color=#33BFDB size=11",
                "[New] | color=#58BE89 size=11",
                "├ #101 Fix bug | color=white href=http://t.example/issues/101 size=11",
                "└ #102 Add test | color=white href=http://t.example/issues/102 size=11",
                "---",
            ]
        );
    }

    #[test]
    fn test_tree_glyphs_in_three_issue_bucket() {
        let lines = render_menu(&[instance_with(3)], DisplayMode::Dark);
        let issue_lines: Vec<_> = lines.iter().filter(|l| l.contains(" #")).collect();

        assert_eq!(issue_lines.len(), 3);
        assert!(issue_lines[0].starts_with("├ "));
        assert!(issue_lines[1].starts_with("├ "));
        assert!(issue_lines[2].starts_with("└ "));
    }

    #[test]
    fn test_duplicate_issue_only_last_position_is_terminal() {
        let issue = create_test_issue(7, "Same", (1, "Core"), (1, "New"));
        let instance = aggregate("http://t.example/", vec![issue.clone(), issue]);

        let lines = render_menu(&[instance], DisplayMode::Dark);
        let issue_lines: Vec<_> = lines.iter().filter(|l| l.contains(" #7 ")).collect();

        assert!(issue_lines[0].starts_with("├ "));
        assert!(issue_lines[1].starts_with("└ "));
    }

    #[test]
    fn test_projects_render_in_first_seen_order() {
        let issues = vec![
            create_test_issue(1, "a", (5, "Five"), (1, "New")),
            create_test_issue(2, "b", (2, "Two"), (1, "New")),
            create_test_issue(3, "c", (5, "Five"), (1, "New")),
        ];
        let instance = aggregate("http://t.example/", issues);

        let lines = render_menu(&[instance], DisplayMode::Dark);
        let five = lines.iter().position(|l| l.starts_with("Five: 2")).unwrap();
        let two = lines.iter().position(|l| l.starts_with("Two: 1")).unwrap();

        assert!(five < two);
    }

    #[test]
    fn test_status_header_and_separator_per_project() {
        let issues = vec![
            create_test_issue(1, "a", (1, "Core"), (2, "In Progress")),
            create_test_issue(2, "b", (1, "Core"), (1, "New")),
            create_test_issue(3, "c", (9, "Docs"), (1, "New")),
        ];
        let instance = aggregate("http://t.example/", issues);

        let lines = render_menu(&[instance], DisplayMode::Dark);

        assert_eq!(lines[6], "[In Progress] | color=#58BE89 size=11");
        assert_eq!(lines[8], "[New] | color=#58BE89 size=11");
        assert_eq!(lines[10], "---");
        assert_eq!(lines[11], "Docs: 1 | size=11");
        assert_eq!(lines.last().map(String::as_str), Some("---"));
    }

    #[test]
    fn test_light_mode_uses_black() {
        let lines = render_menu(&[instance_with(1)], DisplayMode::Light);

        assert_eq!(lines[2], "http://t.example/ | color=black href=http://t.example/");
        assert!(lines.iter().any(|l| l.starts_with("└ #0 x | color=black")));
    }

    #[test]
    fn test_issue_link_replaces_base_path() {
        assert_eq!(
            issue_link("http://host:3000/redmine/", 5),
            "http://host:3000/issues/5"
        );
        assert_eq!(issue_link("https://r.example", 9), "https://r.example/issues/9");
        assert_eq!(issue_link("not a url/", 1), "not a url/issues/1");
    }

    #[test]
    fn test_render_abort() {
        let lines = render_abort(&"error 500 Internal Server Error");

        assert_eq!(
            lines,
            vec![
                "✦ ! | color=#ECB935",
                "---",
                "Error: error 500 Internal Server Error",
            ]
        );
    }

    #[test]
    fn test_menu_line_format() {
        assert_eq!(MenuLine::new("plain").to_string(), "plain");
        assert_eq!(
            MenuLine::new("x").color("red").size(11).to_string(),
            "x | color=red size=11"
        );
    }
}
