// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Response-time metrics derived from a ticket's reply history.

use chrono::{DateTime, TimeDelta, Utc};
use tix_core::{Reply, Ticket};

const SECONDS_PER_DAY: i64 = 86_400;

/// How a duration between two instants is turned into whole minutes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DurationMode {
    /// Total elapsed seconds, floor divided by 60.
    #[default]
    Elapsed,
    /// Elapsed seconds with whole days dropped (always `0..86400`), floor
    /// divided by 60. Matches reports produced by older tooling.
    Legacy,
}

impl DurationMode {
    pub fn from_legacy_flag(legacy: bool) -> Self {
        if legacy {
            DurationMode::Legacy
        } else {
            DurationMode::Elapsed
        }
    }

    /// Minutes from `from` to `to` under this mode.
    pub fn minutes(self, from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
        let secs = floor_seconds(to - from);
        match self {
            DurationMode::Elapsed => secs.div_euclid(60),
            DurationMode::Legacy => secs.rem_euclid(SECONDS_PER_DAY) / 60,
        }
    }
}

/// Whole seconds of `delta`, rounded toward negative infinity.
fn floor_seconds(delta: TimeDelta) -> i64 {
    let secs = delta.num_seconds();
    if delta.subsec_nanos() < 0 {
        secs - 1
    } else {
        secs
    }
}

/// First/last response instants and the FRT/CT minutes of one ticket.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseMetrics {
    pub first_response: Option<DateTime<Utc>>,
    pub last_response: Option<DateTime<Utc>>,
    /// Minutes from creation to the first response.
    pub frt: Option<i64>,
    /// Minutes from creation to the last response; closed tickets only.
    pub ct: Option<i64>,
}

impl ResponseMetrics {
    /// Compute metrics for `ticket` from its replies, in any order.
    pub fn compute(ticket: &Ticket, replies: &[Reply], mode: DurationMode) -> Self {
        let mut instants: Vec<DateTime<Utc>> = replies.iter().map(|r| r.created_at).collect();
        instants.sort_unstable_by(|a, b| b.cmp(a));

        // Latest first: the last element is the earliest reply.
        match (instants.last(), instants.first()) {
            (Some(&first), Some(&last)) => {
                Self::from_instants(ticket.created_at, ticket.closed, first, last, mode)
            }
            _ => ResponseMetrics::default(),
        }
    }

    /// Metrics from known first and last response instants.
    ///
    /// CT never falls below FRT, even when the two instants are out of order
    /// or the legacy arithmetic wraps a day.
    pub fn from_instants(
        created_at: DateTime<Utc>,
        closed: bool,
        first_response: DateTime<Utc>,
        last_response: DateTime<Utc>,
        mode: DurationMode,
    ) -> Self {
        let frt = mode.minutes(created_at, first_response);
        let ct = closed.then(|| mode.minutes(created_at, last_response).max(frt));
        ResponseMetrics {
            first_response: Some(first_response),
            last_response: Some(last_response),
            frt: Some(frt),
            ct,
        }
    }
}

#[cfg(test)]
#[path = "metrics_tests.rs"]
mod tests;
