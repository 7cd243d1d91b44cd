// SPDX-FileCopyrightText: 2025-2026 Cana Church Communications <wire@canachurch.com>
//
// SPDX-License-Identifier: Apache-2.0

//! Weekly recurrence expansion.
//!
//! Given a seed's normalized start and end, an optional weekly rule and the
//! EXDATE/RDATE sets, [`expand`] produces the concrete occurrences that fall
//! inside a [`Window`]. Every occurrence keeps the seed's exact duration.
//!
//! For each weekday the rule fires on, candidates start at the first matching
//! day on or after the window's first day (never before the seed's own day),
//! are aligned to the `INTERVAL` cadence counted in whole weeks from the
//! Monday of the seed's week, and then advance `INTERVAL` weeks at a time up
//! to the earlier of the window end and `UNTIL`.

use std::collections::{BTreeSet, HashSet};

use jiff::civil::Date;
use jiff::tz::TimeZone;
use jiff::{SignedDuration, Timestamp, ToSpan, Zoned};

use crate::rrule::{RRuleSpec, WeekDay};

/// An inclusive range of instants.
#[derive(Debug, Clone, PartialEq)]
pub struct Window {
    /// First instant of the window
    pub start: Zoned,
    /// Last instant of the window
    pub end: Zoned,
}

impl Window {
    /// Creates a window from its bounds.
    #[must_use]
    pub const fn new(start: Zoned, end: Zoned) -> Self {
        Self { start, end }
    }

    /// A window reaching `lookback_days` calendar days before `now` and
    /// `lookahead_days` calendar days after it.
    ///
    /// # Errors
    ///
    /// Returns an error if either bound overflows the supported range.
    pub fn around(now: &Zoned, lookback_days: i64, lookahead_days: i64) -> Result<Self, jiff::Error> {
        Ok(Self {
            start: now.checked_sub(lookback_days.days())?,
            end: now.checked_add(lookahead_days.days())?,
        })
    }

    /// Whether `instant` lies inside the window, both bounds included.
    #[must_use]
    pub fn contains(&self, instant: Timestamp) -> bool {
        self.start.timestamp() <= instant && instant <= self.end.timestamp()
    }
}

/// Where an occurrence came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OccurrenceSource {
    /// The seed's own DTSTART, for a non-recurring block
    Seed,
    /// Generated by the weekly rule
    Rule,
    /// Listed explicitly in an RDATE
    Extra,
}

/// One concrete occurrence.
#[derive(Debug, Clone, PartialEq)]
pub struct Occurrence {
    /// Start of the occurrence
    pub start: Zoned,
    /// End of the occurrence, never before `start`
    pub end: Zoned,
    /// Where the occurrence came from
    pub source: OccurrenceSource,
}

impl Occurrence {
    fn spanning(start: Zoned, duration: SignedDuration, source: OccurrenceSource) -> Option<Self> {
        let end = start.checked_add(duration).ok()?;
        Some(Self { start, end, source })
    }
}

/// How `COUNT` limits a rule that fires on several weekdays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CountScope {
    /// Each weekday's stream is capped at `COUNT` on its own, so a rule with
    /// `k` weekdays yields up to `k * COUNT` instances.
    #[default]
    PerWeekday,

    /// One cap shared by all weekdays, consumed in chronological order.
    Shared,
}

/// Knobs for [`expand`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExpandOptions {
    /// How `COUNT` is applied across weekdays.
    pub count_scope: CountScope,
}

/// The recurrence description of a seed.
#[derive(Debug, Clone, Copy)]
pub struct Recurrence<'a> {
    /// The rule, if any; only weekly rules generate instances
    pub rule: Option<&'a RRuleSpec>,
    /// EXDATE instants
    pub exception_dates: &'a BTreeSet<Timestamp>,
    /// RDATE instants
    pub extra_dates: &'a BTreeSet<Timestamp>,
}

/// Expands a seed into the occurrences inside `window`, sorted by start with
/// duplicate starts removed (the first producer wins, rule before RDATE).
///
/// Instants are produced in the time zone of `start`. A rule that is not
/// weekly contributes nothing; RDATEs are honored either way.
///
/// Candidates that precede the window start or are excluded by EXDATE are
/// dropped after `COUNT` has been applied, so they still use up a slot.
#[must_use]
pub fn expand(
    start: &Zoned,
    end: &Zoned,
    recurrence: &Recurrence<'_>,
    window: &Window,
    options: ExpandOptions,
) -> Vec<Occurrence> {
    let duration = end.duration_since(start).max(SignedDuration::ZERO);
    let tz = start.time_zone().clone();
    let mut out = Vec::new();

    if let Some(rule) = recurrence.rule.filter(|rule| rule.is_weekly()) {
        out.extend(
            rule_starts(start, rule, window, options)
                .into_iter()
                .filter(|s| s.timestamp() >= window.start.timestamp())
                .filter(|s| !recurrence.exception_dates.contains(&s.timestamp()))
                .filter_map(|s| Occurrence::spanning(s, duration, OccurrenceSource::Rule)),
        );
    }

    out.extend(
        recurrence
            .extra_dates
            .iter()
            .filter(|ts| window.contains(**ts))
            .filter(|ts| !recurrence.exception_dates.contains(ts))
            .filter_map(|ts| {
                Occurrence::spanning(ts.to_zoned(tz.clone()), duration, OccurrenceSource::Extra)
            }),
    );

    let mut seen = HashSet::new();
    out.retain(|o| seen.insert(o.start.timestamp()));
    out.sort_by_key(|o| o.start.timestamp());
    out
}

/// All rule candidates up to the upper bound, with `COUNT` applied but
/// before the window-start and EXDATE filters.
fn rule_starts(seed: &Zoned, rule: &RRuleSpec, window: &Window, options: ExpandOptions) -> Vec<Zoned> {
    if rule.count == Some(0) {
        return Vec::new();
    }

    let upper = match &rule.until {
        Some(until) if until.timestamp() < window.end.timestamp() => until.timestamp(),
        _ => window.end.timestamp(),
    };
    let weekdays = if rule.by_day.is_empty() {
        vec![WeekDay::from(seed.weekday())]
    } else {
        rule.by_day.clone()
    };
    let anchor = window.start.date().max(seed.date());
    let interval = i64::from(rule.interval.max(1));

    let streams = weekdays
        .into_iter()
        .map(|day| weekday_stream(seed, day, interval, anchor, upper));

    match (rule.count, options.count_scope) {
        (None, _) => streams.flatten().collect(),
        (Some(count), CountScope::PerWeekday) => {
            let count = usize::try_from(count).unwrap_or(usize::MAX);
            streams.flat_map(|s| s.into_iter().take(count)).collect()
        }
        (Some(count), CountScope::Shared) => {
            let mut all: Vec<Zoned> = streams.flatten().collect();
            all.sort_by_key(Zoned::timestamp);
            all.dedup_by_key(|s| s.timestamp());
            all.truncate(usize::try_from(count).unwrap_or(usize::MAX));
            all
        }
    }
}

/// Candidates for a single weekday, in ascending order.
fn weekday_stream(seed: &Zoned, day: WeekDay, interval: i64, anchor: Date, upper: Timestamp) -> Vec<Zoned> {
    let tz: &TimeZone = seed.time_zone();
    let delta = (i64::from(day.number()) - i64::from(anchor.weekday().to_monday_one_offset()))
        .rem_euclid(7);
    let Ok(first) = anchor.checked_add(delta.days()) else {
        return Vec::new();
    };

    let Some(weeks) = weeks_since_seed_week(seed, first) else {
        return Vec::new();
    };
    let skip = (interval - weeks.rem_euclid(interval)) % interval;
    let Ok(mut date) = first.checked_add(skip.weeks()) else {
        return Vec::new();
    };

    let time = seed.time();
    let step = interval.weeks();
    let mut out = Vec::new();
    while let Ok(candidate) = date.to_datetime(time).to_zoned(tz.clone()) {
        if candidate.timestamp() > upper {
            break;
        }
        out.push(candidate);
        match date.checked_add(step) {
            Ok(next) => date = next,
            Err(_) => break,
        }
    }
    out
}

/// Whole weeks between the Monday of the seed's week and `date`, floored.
fn weeks_since_seed_week(seed: &Zoned, date: Date) -> Option<i64> {
    let monday_offset = i64::from(seed.weekday().to_monday_zero_offset());
    let week_start = seed.date().checked_sub(monday_offset.days()).ok()?;
    let days = date.since(week_start).ok()?.get_days();
    Some(i64::from(days).div_euclid(7))
}

#[cfg(test)]
mod tests {
    use jiff::civil;

    use super::*;
    use crate::rrule::Frequency;

    fn tz() -> TimeZone {
        TimeZone::get("America/Chicago").unwrap()
    }

    fn at(y: i16, m: i8, d: i8, h: i8, mi: i8) -> Zoned {
        civil::date(y, m, d).at(h, mi, 0, 0).to_zoned(tz()).unwrap()
    }

    fn weekly(f: impl FnOnce(&mut RRuleSpec)) -> RRuleSpec {
        let mut rule = RRuleSpec::new(Frequency::Weekly);
        f(&mut rule);
        rule
    }

    fn run(
        seed: &Zoned,
        rule: Option<&RRuleSpec>,
        exdates: &[Zoned],
        rdates: &[Zoned],
        window: &Window,
        options: ExpandOptions,
    ) -> Vec<Occurrence> {
        let exception_dates = exdates.iter().map(Zoned::timestamp).collect();
        let extra_dates = rdates.iter().map(Zoned::timestamp).collect();
        let end = seed.checked_add(90.minutes()).unwrap();
        expand(
            seed,
            &end,
            &Recurrence {
                rule,
                exception_dates: &exception_dates,
                extra_dates: &extra_dates,
            },
            window,
            options,
        )
    }

    fn starts(occurrences: &[Occurrence]) -> Vec<String> {
        occurrences
            .iter()
            .map(|o| o.start.strftime("%a %Y-%m-%d %H:%M").to_string())
            .collect()
    }

    #[test]
    fn weekly_without_byday_uses_seed_weekday() {
        // Wednesday 2025-01-01 19:00, window Thu 2025-01-09 .. Thu 2025-01-23
        let seed = at(2025, 1, 1, 19, 0);
        let window = Window::new(at(2025, 1, 9, 0, 0), at(2025, 1, 23, 0, 0));
        let rule = weekly(|_| {});
        let got = run(&seed, Some(&rule), &[], &[], &window, ExpandOptions::default());
        assert_eq!(starts(&got), ["Wed 2025-01-15 19:00", "Wed 2025-01-22 19:00"]);
        assert_eq!(got[0].end.duration_since(&got[0].start), SignedDuration::from_mins(90));
        assert!(got.iter().all(|o| o.source == OccurrenceSource::Rule));
    }

    #[test]
    fn interval_alignment_counts_from_seed_week() {
        // Seed Monday 2025-01-06; every other week → 01-20, 02-03 inside window
        let seed = at(2025, 1, 6, 9, 30);
        let window = Window::new(at(2025, 1, 14, 0, 0), at(2025, 2, 10, 0, 0));
        let rule = weekly(|r| r.interval = 2);
        let got = run(&seed, Some(&rule), &[], &[], &window, ExpandOptions::default());
        assert_eq!(starts(&got), ["Mon 2025-01-20 09:30", "Mon 2025-02-03 09:30"]);
    }

    #[test]
    fn until_bounds_the_rule_inclusively() {
        let seed = at(2025, 1, 1, 19, 0);
        let window = Window::new(at(2025, 1, 1, 0, 0), at(2025, 2, 1, 0, 0));
        let rule = weekly(|r| r.until = Some(at(2025, 1, 15, 19, 0)));
        let got = run(&seed, Some(&rule), &[], &[], &window, ExpandOptions::default());
        assert_eq!(
            starts(&got),
            ["Wed 2025-01-01 19:00", "Wed 2025-01-08 19:00", "Wed 2025-01-15 19:00"]
        );
    }

    #[test]
    fn count_is_per_weekday_by_default() {
        let seed = at(2025, 1, 6, 18, 0);
        let window = Window::new(at(2025, 1, 6, 0, 0), at(2025, 2, 6, 0, 0));
        let rule = weekly(|r| {
            r.by_day = vec![WeekDay::Monday, WeekDay::Thursday];
            r.count = Some(2);
        });
        let got = run(&seed, Some(&rule), &[], &[], &window, ExpandOptions::default());
        assert_eq!(
            starts(&got),
            [
                "Mon 2025-01-06 18:00",
                "Thu 2025-01-09 18:00",
                "Mon 2025-01-13 18:00",
                "Thu 2025-01-16 18:00",
            ]
        );
    }

    #[test]
    fn shared_count_is_consumed_chronologically() {
        let seed = at(2025, 1, 6, 18, 0);
        let window = Window::new(at(2025, 1, 6, 0, 0), at(2025, 2, 6, 0, 0));
        let rule = weekly(|r| {
            r.by_day = vec![WeekDay::Thursday, WeekDay::Monday];
            r.count = Some(3);
        });
        let options = ExpandOptions {
            count_scope: CountScope::Shared,
        };
        let got = run(&seed, Some(&rule), &[], &[], &window, options);
        assert_eq!(
            starts(&got),
            ["Mon 2025-01-06 18:00", "Thu 2025-01-09 18:00", "Mon 2025-01-13 18:00"]
        );
    }

    #[test]
    fn skipped_candidates_still_consume_count() {
        // The Monday 08:00 candidate precedes the window start (noon) and the
        // next one is excluded, so COUNT=2 leaves nothing.
        let seed = at(2025, 1, 6, 8, 0);
        let window = Window::new(at(2025, 1, 6, 12, 0), at(2025, 2, 6, 0, 0));
        let rule = weekly(|r| r.count = Some(2));
        let got = run(
            &seed,
            Some(&rule),
            &[at(2025, 1, 13, 8, 0)],
            &[],
            &window,
            ExpandOptions::default(),
        );
        assert!(got.is_empty());
    }

    #[test]
    fn zero_count_emits_only_extra_dates() {
        let seed = at(2025, 1, 6, 8, 0);
        let window = Window::new(at(2025, 1, 6, 0, 0), at(2025, 2, 6, 0, 0));
        let rule = weekly(|r| r.count = Some(0));
        let got = run(
            &seed,
            Some(&rule),
            &[],
            &[at(2025, 1, 10, 8, 0)],
            &window,
            ExpandOptions::default(),
        );
        assert_eq!(starts(&got), ["Fri 2025-01-10 08:00"]);
        assert_eq!(got[0].source, OccurrenceSource::Extra);
    }

    #[test]
    fn rule_candidates_never_precede_the_seed() {
        let seed = at(2025, 1, 22, 19, 0);
        let window = Window::new(at(2025, 1, 13, 0, 0), at(2025, 1, 27, 0, 0));
        let rule = weekly(|_| {});
        let got = run(&seed, Some(&rule), &[], &[], &window, ExpandOptions::default());
        assert_eq!(starts(&got), ["Wed 2025-01-22 19:00"]);
    }

    #[test]
    fn rdate_duplicating_a_rule_instance_is_dropped() {
        let seed = at(2025, 1, 1, 19, 0);
        let window = Window::new(at(2025, 1, 1, 0, 0), at(2025, 1, 10, 0, 0));
        let rule = weekly(|_| {});
        let got = run(
            &seed,
            Some(&rule),
            &[],
            &[at(2025, 1, 8, 19, 0), at(2025, 1, 3, 7, 0)],
            &window,
            ExpandOptions::default(),
        );
        assert_eq!(
            starts(&got),
            ["Wed 2025-01-01 19:00", "Fri 2025-01-03 07:00", "Wed 2025-01-08 19:00"]
        );
        assert_eq!(got[2].source, OccurrenceSource::Rule);
    }

    #[test]
    fn negative_duration_is_clamped() {
        let seed = at(2025, 1, 1, 19, 0);
        let end = at(2025, 1, 1, 18, 0);
        let window = Window::new(at(2025, 1, 1, 0, 0), at(2025, 1, 2, 0, 0));
        let rule = weekly(|_| {});
        let empty = BTreeSet::new();
        let got = expand(
            &seed,
            &end,
            &Recurrence {
                rule: Some(&rule),
                exception_dates: &empty,
                extra_dates: &empty,
            },
            &window,
            ExpandOptions::default(),
        );
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].start.timestamp(), got[0].end.timestamp());
    }

    #[test]
    fn keeps_wall_clock_across_dst_change() {
        // DST starts 2025-03-09 in Chicago
        let seed = at(2025, 3, 2, 10, 0);
        let window = Window::new(at(2025, 3, 1, 0, 0), at(2025, 3, 17, 0, 0));
        let rule = weekly(|_| {});
        let got = run(&seed, Some(&rule), &[], &[], &window, ExpandOptions::default());
        assert_eq!(
            starts(&got),
            ["Sun 2025-03-02 10:00", "Sun 2025-03-09 10:00", "Sun 2025-03-16 10:00"]
        );
    }

    #[test]
    fn window_around_now() {
        let now = at(2025, 1, 15, 12, 0);
        let window = Window::around(&now, 1, 14).unwrap();
        assert_eq!(window.start.day(), 14);
        assert_eq!(window.end.day(), 29);
        assert!(window.contains(now.timestamp()));
        assert!(window.contains(window.end.timestamp()));
    }
}
