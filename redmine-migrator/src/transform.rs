//! Content rewriting for migrated bodies and comments.
//!
//! All functions here are pure: the output depends only on the text, the
//! [`IdMap`] and the link prefixes passed in.

use crate::session::IdMap;
use chrono::{DateTime, Utc};
use regex::{Captures, Regex};
use std::sync::OnceLock;

/// Timestamp layout used in reporter and comment headers.
pub const TIMESTAMP_FORMAT: &str = "%d %B %Y %H:%M UTC";

static REFERENCE_REGEX: OnceLock<Regex> = OnceLock::new();

fn reference_regex() -> &'static Regex {
    REFERENCE_REGEX.get_or_init(|| Regex::new(r"#(\w+)").expect("Reference regex should compile"))
}

/// Rewrites `#<id>` references to links to the mapped destination issues.
///
/// Only purely numeric references whose id is present in `id_map` are
/// rewritten, to `<a href="{prefix}/issues/{n}">#{n}</a>`. Anything else,
/// such as `#9999` for an unknown id or `#12abc`, is left untouched.
#[must_use]
pub fn replace_issue_references(text: &str, id_map: &IdMap, prefix: &str) -> String {
    let prefix = prefix.trim_end_matches('/');

    reference_regex()
        .replace_all(text, |caps: &Captures<'_>| {
            let token = &caps[1];
            let number = token
                .chars()
                .all(|c| c.is_ascii_digit())
                .then(|| token.parse::<u64>().ok())
                .flatten()
                .and_then(|source_id| id_map.get(source_id));

            match number {
                Some(number) => format!(r#"<a href="{prefix}/issues/{number}">#{number}</a>"#),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Builds the link to a file stored inside the destination repository.
///
/// `repository_path` is relative to the repository root, with `/`
/// separators: `attachments/download/5/7/a.png` becomes
/// `{prefix}/tree/{branch}/attachments/download/5/7/a.png`.
#[must_use]
pub fn repository_file_url(prefix: &str, branch: &str, repository_path: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    format!("{prefix}/tree/{branch}/{}", repository_path.trim_start_matches('/'))
}

/// Formats a timestamp for reporter and comment headers.
#[must_use]
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}
