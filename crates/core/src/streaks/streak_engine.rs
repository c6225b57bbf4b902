use chrono::{DateTime, Duration, TimeZone, Utc};
use log::debug;

use super::milestones::milestone_for_streak;
use super::streaks_model::CheckInResult;
use crate::errors::{CheckInError, Result};
use crate::goals::Goal;
use crate::utils::time_utils::{days_between, local_date};
use crate::window::{CheckInWindow, WindowState};

/// Applies one accepted check-in to `goal` at `now`.
///
/// Calendar days are taken in `now`'s timezone. The returned goal has the
/// streak incremented (or restarted at 1 after a missed day), `checked_today`
/// set and `last_check_in_at` moved to `now`. On error the input goal is the
/// only state there is, so nothing is partially applied.
pub fn apply_check_in<Tz: TimeZone>(
    goal: &Goal,
    now: &DateTime<Tz>,
) -> Result<(Goal, CheckInResult)> {
    let previous_streak = validated_streak(goal)?;
    let tz = now.timezone();
    let today = now.date_naive();
    let attempted_at = now.with_timezone(&Utc);

    let (streak, streak_reset) = match goal.last_check_in_at {
        None => (previous_streak.saturating_add(1), false),
        Some(last_check_in_at) => {
            let gap = days_between(local_date(last_check_in_at, &tz), today);
            match gap {
                0 => {
                    return Err(CheckInError::AlreadyCheckedInToday {
                        goal_id: goal.id.clone(),
                        date: today,
                    }
                    .into())
                }
                1 => (previous_streak.saturating_add(1), false),
                gap if gap > 1 => (1, previous_streak > 0),
                _ => {
                    return Err(CheckInError::OutOfOrder {
                        goal_id: goal.id.clone(),
                        last_check_in_at,
                        attempted_at,
                    }
                    .into())
                }
            }
        }
    };

    let stored_streak = i32::try_from(streak).map_err(|_| CheckInError::CorruptStreak {
        goal_id: goal.id.clone(),
        value: goal.current_streak,
    })?;
    let mut updated = goal.clone();
    updated.current_streak = stored_streak;
    updated.longest_streak = updated.longest_streak.max(stored_streak);
    updated.checked_today = true;
    updated.last_check_in_at = Some(attempted_at);

    let milestone = milestone_for_streak(streak);
    debug!(
        "Goal {} streak {} -> {} (reset: {}, milestone: {:?})",
        goal.id,
        previous_streak,
        streak,
        streak_reset,
        milestone.as_ref().map(|m| m.tier)
    );

    Ok((
        updated,
        CheckInResult {
            previous_streak,
            streak,
            streak_reset,
            milestone,
        },
    ))
}

/// Re-derives the day-dependent fields of a stored goal for display at `now`.
///
/// `checked_today` is true only when the last check-in is on today's date,
/// and a streak whose last check-in is older than yesterday reads as 0.
/// With an enforced `window`, a streak last extended yesterday also reads as
/// 0 once today's window has closed.
pub fn reconcile_goal<Tz: TimeZone>(
    goal: &Goal,
    now: &DateTime<Tz>,
    window: Option<&CheckInWindow>,
) -> Result<Goal> {
    validated_streak(goal)?;
    let tz = now.timezone();
    let today = now.date_naive();
    let window_closed = window.is_some_and(|window| now.time() >= window.end());

    let mut reconciled = goal.clone();
    match goal.last_check_in_at {
        None => reconciled.checked_today = false,
        Some(last_check_in_at) => {
            let gap = days_between(local_date(last_check_in_at, &tz), today);
            reconciled.checked_today = gap == 0;
            if gap > 1 || (gap == 1 && window_closed) {
                reconciled.current_streak = 0;
            }
        }
    }
    Ok(reconciled)
}

/// A running streak that will lapse unless the goal is checked in before the
/// window closes, which happens in less than `threshold`.
pub fn is_streak_at_risk(goal: &Goal, window: &WindowState, threshold: Duration) -> bool {
    goal.current_streak > 0 && !goal.checked_today && window.closes_within(threshold)
}

fn validated_streak(goal: &Goal) -> Result<u32> {
    u32::try_from(goal.current_streak).map_err(|_| {
        CheckInError::CorruptStreak {
            goal_id: goal.id.clone(),
            value: goal.current_streak,
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use crate::goals::Frequency;
    use chrono_tz::Asia::Tokyo;

    fn at(day: u32, h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 4, day, h, m, 0).unwrap()
    }

    fn goal_with(streak: i32, last_check_in_at: Option<DateTime<Utc>>) -> Goal {
        Goal {
            id: "goal-1".to_string(),
            user_id: "demo-user".to_string(),
            title: "Meditate".to_string(),
            description: None,
            category: "mindfulness".to_string(),
            frequency: Frequency::Daily,
            current_streak: streak,
            longest_streak: streak,
            checked_today: false,
            last_check_in_at,
            created_at: at(1, 0, 0),
        }
    }

    #[test]
    fn first_check_in_starts_streak() {
        let goal = goal_with(0, None);
        let (updated, result) = apply_check_in(&goal, &at(10, 9, 0)).unwrap();
        assert_eq!(updated.current_streak, 1);
        assert!(updated.checked_today);
        assert_eq!(updated.last_check_in_at, Some(at(10, 9, 0)));
        assert_eq!(result.previous_streak, 0);
        assert!(!result.streak_reset);
        assert!(result.milestone.is_none());
    }

    #[test]
    fn consecutive_day_increments() {
        let goal = goal_with(3, Some(at(9, 21, 0)));
        let (updated, result) = apply_check_in(&goal, &at(10, 8, 0)).unwrap();
        assert_eq!(updated.current_streak, 4);
        assert_eq!(result.streak, 4);
    }

    #[test]
    fn second_check_in_same_day_is_rejected() {
        let goal = goal_with(4, Some(at(9, 9, 0)));
        let (updated, _) = apply_check_in(&goal, &at(10, 9, 0)).unwrap();

        let err = apply_check_in(&updated, &at(10, 20, 0)).unwrap_err();
        match err {
            Error::CheckIn(CheckInError::AlreadyCheckedInToday { goal_id, date }) => {
                assert_eq!(goal_id, "goal-1");
                assert_eq!(date, at(10, 0, 0).date_naive());
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(updated.current_streak, 5);
    }

    #[test]
    fn sixth_to_seventh_day_celebrates_week() {
        let goal = goal_with(6, Some(at(9, 12, 0)));
        let (updated, result) = apply_check_in(&goal, &at(10, 12, 0)).unwrap();
        assert_eq!(updated.current_streak, 7);
        let milestone = result.milestone.expect("milestone at 7");
        assert_eq!(milestone.tier, 7);
        assert_eq!(milestone.title, "Week Warrior");
    }

    #[test]
    fn twenty_first_day_celebrates_and_twenty_third_does_not() {
        let goal = goal_with(20, Some(at(9, 12, 0)));
        let (_, result) = apply_check_in(&goal, &at(10, 12, 0)).unwrap();
        assert_eq!(result.streak, 21);
        assert_eq!(result.milestone.map(|m| m.tier), Some(21));

        for streak in 22..29 {
            let goal = goal_with(streak, Some(at(9, 12, 0)));
            let (_, result) = apply_check_in(&goal, &at(10, 12, 0)).unwrap();
            assert!(result.milestone.is_none(), "no milestone at {}", streak + 1);
        }

        let goal = goal_with(29, Some(at(9, 12, 0)));
        let (_, result) = apply_check_in(&goal, &at(10, 12, 0)).unwrap();
        assert_eq!(result.milestone.map(|m| m.tier), Some(30));
    }

    #[test]
    fn skipped_tier_is_not_celebrated() {
        // An imported streak of 7 with no check-in history lands on 8.
        let goal = goal_with(7, None);
        let (_, result) = apply_check_in(&goal, &at(10, 12, 0)).unwrap();
        assert_eq!(result.streak, 8);
        assert!(result.milestone.is_none());
    }

    #[test]
    fn missed_day_restarts_at_one() {
        let mut goal = goal_with(12, Some(at(7, 12, 0)));
        goal.longest_streak = 12;
        let (updated, result) = apply_check_in(&goal, &at(9, 12, 0)).unwrap();
        assert_eq!(updated.current_streak, 1);
        assert_eq!(updated.longest_streak, 12);
        assert!(result.streak_reset);
        assert_eq!(result.previous_streak, 12);
    }

    #[test]
    fn longest_streak_follows_new_record() {
        let mut goal = goal_with(9, Some(at(9, 12, 0)));
        goal.longest_streak = 9;
        let (updated, _) = apply_check_in(&goal, &at(10, 12, 0)).unwrap();
        assert_eq!(updated.longest_streak, 10);
    }

    #[test]
    fn negative_streak_is_rejected_not_clamped() {
        let goal = goal_with(-3, Some(at(9, 12, 0)));
        let err = apply_check_in(&goal, &at(10, 12, 0)).unwrap_err();
        assert!(matches!(
            err,
            Error::CheckIn(CheckInError::CorruptStreak { value: -3, .. })
        ));
        assert!(reconcile_goal(&goal, &at(10, 12, 0), None).is_err());
    }

    #[test]
    fn check_in_dated_before_last_is_out_of_order() {
        let goal = goal_with(2, Some(at(12, 12, 0)));
        let err = apply_check_in(&goal, &at(10, 12, 0)).unwrap_err();
        assert!(matches!(err, Error::CheckIn(CheckInError::OutOfOrder { .. })));
    }

    #[test]
    fn calendar_day_is_taken_in_local_timezone() {
        // 23:00 UTC on the 9th is 08:00 on the 10th in Tokyo, and 01:00 UTC on
        // the 10th is 10:00 the same Tokyo day.
        let goal = goal_with(1, Some(at(8, 23, 0)));
        let first = at(9, 23, 0).with_timezone(&Tokyo);
        let (updated, _) = apply_check_in(&goal, &first).unwrap();
        assert_eq!(updated.current_streak, 2);

        let second = at(10, 1, 0).with_timezone(&Tokyo);
        assert!(apply_check_in(&updated, &second).is_err());
    }

    #[test]
    fn reconcile_resets_day_flags_and_lapsed_streaks() {
        let mut goal = goal_with(5, Some(at(9, 12, 0)));
        goal.checked_today = true;

        let same_day = reconcile_goal(&goal, &at(9, 20, 0), None).unwrap();
        assert!(same_day.checked_today);
        assert_eq!(same_day.current_streak, 5);

        let next_day = reconcile_goal(&goal, &at(10, 7, 0), None).unwrap();
        assert!(!next_day.checked_today);
        assert_eq!(next_day.current_streak, 5);

        let lapsed = reconcile_goal(&goal, &at(11, 7, 0), None).unwrap();
        assert!(!lapsed.checked_today);
        assert_eq!(lapsed.current_streak, 0);
        assert_eq!(lapsed.longest_streak, 5);
    }

    #[test]
    fn yesterdays_streak_lapses_when_todays_window_closes() {
        let goal = goal_with(5, Some(at(9, 12, 0)));
        let window = CheckInWindow::default();

        let last_second = at(10, 21, 59) + Duration::seconds(59);
        let closing = reconcile_goal(&goal, &last_second, Some(&window)).unwrap();
        assert_eq!(closing.current_streak, 5);

        let closed = reconcile_goal(&goal, &at(10, 22, 0), Some(&window)).unwrap();
        assert_eq!(closed.current_streak, 0);
        assert_eq!(closed.longest_streak, 5);

        let late = reconcile_goal(&goal, &at(10, 23, 0), Some(&window)).unwrap();
        assert_eq!(late.current_streak, 0);

        // Without enforcement a check-in is still possible until midnight.
        let unenforced = reconcile_goal(&goal, &at(10, 23, 0), None).unwrap();
        assert_eq!(unenforced.current_streak, 5);
    }

    #[test]
    fn todays_streak_survives_window_close() {
        let mut goal = goal_with(5, Some(at(10, 12, 0)));
        goal.checked_today = true;
        let reconciled =
            reconcile_goal(&goal, &at(10, 23, 0), Some(&CheckInWindow::default())).unwrap();
        assert_eq!(reconciled.current_streak, 5);
        assert!(reconciled.checked_today);
    }

    #[test]
    fn streak_past_storage_range_is_rejected() {
        let goal = goal_with(i32::MAX, Some(at(9, 12, 0)));
        let err = apply_check_in(&goal, &at(10, 12, 0)).unwrap_err();
        assert!(matches!(
            err,
            Error::CheckIn(CheckInError::CorruptStreak { value: i32::MAX, .. })
        ));
    }

    #[test]
    fn streak_is_at_risk_near_window_close() {
        let goal = goal_with(5, Some(at(9, 12, 0)));
        let closing = WindowState {
            is_open: true,
            time_remaining: Duration::minutes(45),
        };
        let plenty = WindowState {
            is_open: true,
            time_remaining: Duration::hours(6),
        };
        assert!(is_streak_at_risk(&goal, &closing, Duration::hours(2)));
        assert!(!is_streak_at_risk(&goal, &plenty, Duration::hours(2)));

        let mut done = goal.clone();
        done.checked_today = true;
        assert!(!is_streak_at_risk(&done, &closing, Duration::hours(2)));
        assert!(!is_streak_at_risk(&goal_with(0, None), &closing, Duration::hours(2)));
    }
}
