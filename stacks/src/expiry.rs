use crate::types::StackSummary;
use chrono::{DateTime, Duration, Utc};
use tracing::{debug, trace};

/// Whole days between `reference` and `now`.
///
/// The signed difference is floored to days before taking its magnitude, so a
/// timestamp in the future ages just like one in the past.
pub fn age_in_days(reference: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    let delta = now.signed_duration_since(reference);
    let mut days = delta.num_days();
    if delta < Duration::days(days) {
        days -= 1;
    }
    days.unsigned_abs()
}

/// Whether `stack` is older than `expiry_days` whole days at `now`.
///
/// Stacks without any timestamp never expire. A negative threshold expires
/// every stack that has one.
pub fn is_expired(stack: &StackSummary, expiry_days: i64, now: DateTime<Utc>) -> bool {
    let Some(reference) = stack.reference_time() else {
        trace!(stack = %stack.stack_name, "Skipping stack without timestamps");
        return false;
    };

    let age = age_in_days(reference, now);
    let expired = i128::from(age) > i128::from(expiry_days);
    debug!(
        stack = %stack.stack_name,
        status = %stack.stack_status,
        age_days = age,
        expired,
        "Evaluated stack"
    );
    expired
}

pub fn find_expired(stacks: &[StackSummary], expiry_days: i64) -> Vec<StackSummary> {
    find_expired_at(stacks, expiry_days, Utc::now())
}

/// Keeps the stacks that are expired at `now`, in input order.
pub fn find_expired_at(
    stacks: &[StackSummary],
    expiry_days: i64,
    now: DateTime<Utc>,
) -> Vec<StackSummary> {
    stacks
        .iter()
        .filter(|stack| is_expired(stack, expiry_days, now))
        .cloned()
        .collect()
}
