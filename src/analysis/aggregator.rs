//! Issue aggregation.
//!
//! Groups one instance's issues into projects, trackers and status buckets,
//! keeping running counts along the way.

use crate::models::{AggregatedInstance, Issue, ProjectGroup, TrackerGroup};
use tracing::debug;

/// Build the project → tracker → status tree for one instance.
///
/// Issues are scanned once, in order. Buckets are created the first time
/// their id is seen, so iteration order follows first appearance in
/// `issues` rather than id order. Project and tracker names are refreshed
/// on every visit; duplicate issue ids are kept as separate entries.
pub fn aggregate(url: &str, issues: Vec<Issue>) -> AggregatedInstance {
    let mut instance = AggregatedInstance::new(url);

    for issue in issues {
        instance.issue_count += 1;

        let project = instance
            .projects
            .get_or_insert_with(issue.project.id, || ProjectGroup::new(issue.project.id));
        project.name.clone_from(&issue.project.name);
        project.issue_count += 1;

        let tracker = project
            .trackers
            .get_or_insert_with(issue.tracker.id, || TrackerGroup::new(issue.tracker.id));
        tracker.name.clone_from(&issue.tracker.name);

        tracker
            .issues_by_status
            .get_or_insert_with(issue.status.id, Vec::new)
            .push(issue);
    }

    debug!(
        "Aggregated {} issues from {} into {} projects",
        instance.issue_count,
        instance.url,
        instance.projects.len()
    );
    for project in instance.projects.values() {
        for tracker in project.trackers.values() {
            debug!("  {} / {}: {}", project.name, tracker.name, tracker.issue_count());
        }
    }

    instance
}

/// Total issue count across all instances, as shown on the badge.
pub fn total_issue_count(instances: &[AggregatedInstance]) -> usize {
    instances.iter().map(|i| i.issue_count).sum()
}
