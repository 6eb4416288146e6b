//! Redmine instance client.
//!
//! Fetches the open issues assigned to the current user from one instance.

pub mod redmine;

pub use redmine::{IssueSource, RedmineClient};
