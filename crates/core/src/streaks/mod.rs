//! Streaks module - streak updates on check-in and milestone progress.

mod milestones;
mod streak_engine;
mod streaks_model;

pub use milestones::{
    milestone_for_streak, milestones, progress_to_next_milestone, MAX_MILESTONE_TIER,
    MILESTONE_TIERS,
};
pub use streak_engine::{apply_check_in, is_streak_at_risk, reconcile_goal};
pub use streaks_model::{CheckInResult, Milestone, MilestoneProgress, MilestoneReached};
