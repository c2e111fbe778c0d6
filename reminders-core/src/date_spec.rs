//! Compact due-date grammar.
//!
//! A date spec is one of:
//! - `H`: the next time the clock reads `H:00`
//! - `H:M`: the next time the clock reads `H:M`
//! - `Nd` followed by an optional `H` or `H:M` (or another `Nd...`): `N` days
//!   from the starting point, keeping its time of day unless a time follows
//!
//! Forms are tried in that order and the first match wins. "Next time" rolls
//! over to tomorrow only at the top level; once a day offset has shifted the
//! date, a following time is taken as given.

use chrono::{Days, NaiveDateTime, NaiveTime, Timelike};

use crate::error::{RemindersError, RemindersResult};

/// Outcome of matching one date spec against the grammar.
#[derive(Debug, PartialEq, Eq)]
enum SpecMatch<'a> {
    HourOnly(u32),
    HourMinute(u32, u32),
    /// Day count and whatever follows the `d`
    DayOffset(u64, &'a str),
    NoMatch,
}

/// Parse `input` into a concrete date-time.
///
/// `seed` is the starting point for a continuation after a day offset; when
/// it is `None` the parse starts from `now` and bare times roll over to the
/// next day if they have already passed.
pub fn parse_date_spec(
    input: &str,
    now: NaiveDateTime,
    seed: Option<NaiveDateTime>,
) -> RemindersResult<NaiveDateTime> {
    let (start, seeded) = match seed {
        Some(seed) => (seed, true),
        None => (now, false),
    };

    resolve(input, start, seeded)
        .ok_or_else(|| RemindersError::InvalidDateFormat(input.to_string()))
}

/// Parse a top-level date spec relative to `now`.
pub fn parse(input: &str, now: NaiveDateTime) -> RemindersResult<NaiveDateTime> {
    parse_date_spec(input, now, None)
}

fn resolve(input: &str, start: NaiveDateTime, seeded: bool) -> Option<NaiveDateTime> {
    match match_spec(input) {
        SpecMatch::HourOnly(hour) => {
            let passed = !seeded && hour < start.hour();
            at_time(start, hour, 0, passed)
        }
        SpecMatch::HourMinute(hour, minute) => {
            let passed = !seeded && hour * 60 + minute < start.hour() * 60 + start.minute();
            at_time(start, hour, minute, passed)
        }
        SpecMatch::DayOffset(days, rest) => {
            let shifted = start.checked_add_days(Days::new(days))?;
            if rest.is_empty() {
                Some(shifted)
            } else {
                resolve(rest, shifted, true)
            }
        }
        SpecMatch::NoMatch => None,
    }
}

/// `start`'s date (plus one day if `roll_over`) at `hour:minute:00`.
fn at_time(start: NaiveDateTime, hour: u32, minute: u32, roll_over: bool) -> Option<NaiveDateTime> {
    let time = NaiveTime::from_hms_opt(hour, minute, 0)?;
    let date = if roll_over {
        start.date().succ_opt()?
    } else {
        start.date()
    };
    Some(date.and_time(time))
}

fn match_spec(input: &str) -> SpecMatch<'_> {
    if let Some(hour) = short_number(input) {
        return SpecMatch::HourOnly(hour);
    }

    if let Some((hour, minute)) = input.split_once(':')
        && let (Some(hour), Some(minute)) = (short_number(hour), short_number(minute))
    {
        return SpecMatch::HourMinute(hour, minute);
    }

    let digits = input.bytes().take_while(u8::is_ascii_digit).count();
    if digits > 0
        && let Some(rest) = input[digits..].strip_prefix('d')
        && let Ok(days) = input[..digits].parse::<u64>()
    {
        return SpecMatch::DayOffset(days, rest);
    }

    SpecMatch::NoMatch
}

/// One or two ASCII digits and nothing else.
fn short_number(s: &str) -> Option<u32> {
    if s.is_empty() || s.len() > 2 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    // --- match_spec ---

    #[test]
    fn match_bare_hour() {
        assert_eq!(match_spec("9"), SpecMatch::HourOnly(9));
        assert_eq!(match_spec("23"), SpecMatch::HourOnly(23));
        assert_eq!(match_spec("07"), SpecMatch::HourOnly(7));
    }

    #[test]
    fn match_hour_minute() {
        assert_eq!(match_spec("11:15"), SpecMatch::HourMinute(11, 15));
        assert_eq!(match_spec("1:5"), SpecMatch::HourMinute(1, 5));
    }

    #[test]
    fn match_day_offset_captures_remainder() {
        assert_eq!(match_spec("3d"), SpecMatch::DayOffset(3, ""));
        assert_eq!(match_spec("3d11:15"), SpecMatch::DayOffset(3, "11:15"));
        assert_eq!(match_spec("12d2d"), SpecMatch::DayOffset(12, "2d"));
    }

    #[test]
    fn match_rejects_other_shapes() {
        assert_eq!(match_spec(""), SpecMatch::NoMatch);
        assert_eq!(match_spec("123"), SpecMatch::NoMatch);
        assert_eq!(match_spec("1:234"), SpecMatch::NoMatch);
        assert_eq!(match_spec("d3"), SpecMatch::NoMatch);
        assert_eq!(match_spec("tomorrow"), SpecMatch::NoMatch);
        assert_eq!(match_spec(" 9"), SpecMatch::NoMatch);
    }

    // --- bare hour ---

    #[test]
    fn hour_later_today_stays_today() {
        let now = at(2016, 3, 1, 22, 0, 0);
        assert_eq!(parse("23", now).unwrap(), at(2016, 3, 1, 23, 0, 0));
    }

    #[test]
    fn hour_equal_to_current_does_not_roll_over() {
        let now = at(2016, 3, 1, 23, 30, 0);
        assert_eq!(parse("23", now).unwrap(), at(2016, 3, 1, 23, 0, 0));
    }

    #[test]
    fn hour_already_passed_rolls_to_tomorrow() {
        let now = at(2016, 3, 1, 23, 30, 0);
        assert_eq!(parse("9", now).unwrap(), at(2016, 3, 2, 9, 0, 0));
    }

    #[test]
    fn every_hour_rolls_over_only_when_earlier() {
        let now = at(2016, 3, 1, 12, 45, 10);
        for hour in 0..24 {
            let result = parse(&hour.to_string(), now).unwrap();
            let expected_day = if hour < 12 { 2 } else { 1 };
            assert_eq!(result, at(2016, 3, expected_day, hour, 0, 0), "hour {hour}");
        }
    }

    #[test]
    fn rollover_crosses_month_end() {
        let now = at(2016, 2, 29, 18, 0, 0);
        assert_eq!(parse("8", now).unwrap(), at(2016, 3, 1, 8, 0, 0));
    }

    // --- hour:minute ---

    #[test]
    fn hour_minute_compares_total_minutes() {
        let now = at(2016, 3, 1, 11, 20, 0);
        assert_eq!(parse("11:15", now).unwrap(), at(2016, 3, 2, 11, 15, 0));
        assert_eq!(parse("11:20", now).unwrap(), at(2016, 3, 1, 11, 20, 0));
        assert_eq!(parse("11:25", now).unwrap(), at(2016, 3, 1, 11, 25, 0));
    }

    #[test]
    fn out_of_range_time_is_invalid() {
        let now = at(2016, 3, 1, 9, 0, 0);
        assert!(matches!(parse("24", now), Err(RemindersError::InvalidDateFormat(_))));
        assert!(matches!(parse("10:60", now), Err(RemindersError::InvalidDateFormat(_))));
    }

    // --- day offset ---

    #[test]
    fn day_offset_keeps_time_of_day() {
        let now = at(2016, 3, 1, 22, 7, 42);
        assert_eq!(parse("3d", now).unwrap(), at(2016, 3, 4, 22, 7, 42));
        assert_eq!(parse("0d", now).unwrap(), now);
    }

    #[test]
    fn day_offset_then_time_skips_rollover() {
        let now = at(2016, 3, 1, 22, 0, 0);
        assert_eq!(parse("3d11:15", now).unwrap(), at(2016, 3, 4, 11, 15, 0));
        assert_eq!(parse("1d9", now).unwrap(), at(2016, 3, 2, 9, 0, 0));
    }

    #[test]
    fn day_offsets_compose() {
        let now = at(2016, 3, 1, 8, 0, 0);
        assert_eq!(parse("1d2d", now).unwrap(), at(2016, 3, 4, 8, 0, 0));
    }

    #[test]
    fn explicit_seed_suppresses_rollover() {
        let now = at(2016, 3, 1, 23, 30, 0);
        let seed = at(2016, 3, 5, 23, 30, 0);
        assert_eq!(
            parse_date_spec("9", now, Some(seed)).unwrap(),
            at(2016, 3, 5, 9, 0, 0)
        );
    }

    #[test]
    fn bad_remainder_reports_whole_input() {
        let now = at(2016, 3, 1, 8, 0, 0);
        match parse("3dfoo", now) {
            Err(RemindersError::InvalidDateFormat(input)) => assert_eq!(input, "3dfoo"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn empty_and_garbage_are_invalid() {
        let now = at(2016, 3, 1, 8, 0, 0);
        for input in ["", "d", "tomorrow", "9am", "3 d", "99999999999999999999d"] {
            assert!(
                matches!(parse(input, now), Err(RemindersError::InvalidDateFormat(_))),
                "{input:?} should be rejected"
            );
        }
    }
}
