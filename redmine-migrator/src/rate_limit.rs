//! Pacing of destination writes.
//!
//! Issue creation is followed by a fixed pause so GitHub's abuse detection
//! does not trigger. Optionally the core rate limit is checked before each
//! write and the run waits for the reset when it is nearly exhausted.

use octocrab::Octocrab;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Maximum time to wait for rate limit reset (1 hour).
const MAX_WAIT_SECS: u64 = 3600;

/// Minimum remaining requests before proactively waiting.
const MIN_REMAINING_THRESHOLD: u32 = 5;

/// Rate limit information for a specific resource.
#[derive(Debug, Clone)]
pub struct RateLimitInfo {
    /// Requests remaining in the current window.
    pub remaining: u32,
    /// Unix timestamp when the rate limit resets.
    pub reset: u64,
    /// Total requests allowed per window.
    pub limit: u32,
}

/// Sleeps for the fixed delay that follows every issue creation.
pub async fn pause_after_creation(delay: Duration) {
    if delay.is_zero() {
        return;
    }
    debug!(delay_ms = delay.as_millis() as u64, "Pausing after issue creation");
    tokio::time::sleep(delay).await;
}

/// Checks the current rate limit status for the core API (issues, comments, milestones).
///
/// # Errors
///
/// Returns an error if the rate limit API call fails.
pub async fn check_core_rate_limit(octocrab: &Octocrab) -> Result<RateLimitInfo, octocrab::Error> {
    let rate_limit = octocrab.ratelimit().get().await?;
    let core = &rate_limit.resources.core;

    Ok(RateLimitInfo {
        remaining: core.remaining as u32,
        reset: core.reset,
        limit: core.limit as u32,
    })
}

/// Waits if the rate limit is low, returning true if we waited.
///
/// Waits when remaining requests fall below `MIN_REMAINING_THRESHOLD`,
/// capped at `MAX_WAIT_SECS`.
pub async fn wait_if_needed(info: &RateLimitInfo) -> bool {
    if info.remaining >= MIN_REMAINING_THRESHOLD {
        return false;
    }

    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();

    if info.reset <= now {
        return false;
    }

    let wait_secs = info.reset - now;
    if wait_secs > MAX_WAIT_SECS {
        warn!(
            wait_secs,
            max_wait = MAX_WAIT_SECS,
            "Rate limit reset too far in future, capping wait time"
        );
    }

    let actual_wait = wait_secs.min(MAX_WAIT_SECS);
    info!(
        remaining = info.remaining,
        limit = info.limit,
        wait_secs = actual_wait,
        "Rate limit low, waiting for reset"
    );

    tokio::time::sleep(Duration::from_secs(actual_wait)).await;
    true
}

/// Ensures sufficient rate limit before making core API calls.
///
/// # Errors
///
/// Returns an error if the rate limit check fails.
pub async fn ensure_core_rate_limit(octocrab: &Octocrab) -> Result<(), octocrab::Error> {
    let info = check_core_rate_limit(octocrab).await?;
    wait_if_needed(&info).await;
    Ok(())
}
