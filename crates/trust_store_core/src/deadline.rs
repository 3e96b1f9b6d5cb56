use std::time::Duration;

/// Time kept back from the caller's budget for delivering the notification.
pub const DEFAULT_SAFETY_MARGIN: Duration = Duration::from_millis(1_000);

/// Budget left for dispatch once the safety margin is reserved.
///
/// Returns `None` when nothing is left, in which case dispatch must not start.
pub fn dispatch_budget(remaining_millis: i64, safety_margin: Duration) -> Option<Duration> {
    let margin_millis = i64::try_from(safety_margin.as_millis()).unwrap_or(i64::MAX);
    let budget_millis = remaining_millis.saturating_sub(margin_millis);
    if budget_millis <= 0 {
        return None;
    }
    u64::try_from(budget_millis).ok().map(Duration::from_millis)
}

/// Milliseconds from `now_epoch_millis` until `deadline_epoch_millis`, negative once passed.
pub fn remaining_millis(deadline_epoch_millis: u64, now_epoch_millis: i64) -> i64 {
    i64::try_from(deadline_epoch_millis)
        .unwrap_or(i64::MAX)
        .saturating_sub(now_epoch_millis)
}
