use super::streaks_model::{Milestone, MilestoneProgress, MilestoneReached};

/// Canonical ascending tier list, shared by celebrations and progress display.
pub const MILESTONE_TIERS: [u32; 5] = [7, 21, 30, 50, 100];

/// Highest tier; progress saturates here.
pub const MAX_MILESTONE_TIER: u32 = 100;

static MILESTONES: [Milestone; 5] = [
    Milestone {
        tier: 7,
        emoji: "🔥",
        title: "Week Warrior",
        message: "Seven days straight. The habit is taking root.",
    },
    Milestone {
        tier: 21,
        emoji: "💎",
        title: "Habit Former",
        message: "21 days in a row. This is part of who you are now.",
    },
    Milestone {
        tier: 30,
        emoji: "👑",
        title: "Monthly Master",
        message: "A full month of showing up every single day.",
    },
    Milestone {
        tier: 50,
        emoji: "🚀",
        title: "Unstoppable",
        message: "50 days without missing once.",
    },
    Milestone {
        tier: 100,
        emoji: "💯",
        title: "Century Club",
        message: "100 days of consistency. Legendary.",
    },
];

/// The full milestone catalogue, ascending by tier.
pub fn milestones() -> &'static [Milestone] {
    &MILESTONES
}

/// The milestone celebrated when a streak becomes exactly `streak`.
///
/// Only exact matches fire: a streak that jumps past a tier never
/// retroactively celebrates it.
pub fn milestone_for_streak(streak: u32) -> Option<MilestoneReached> {
    MILESTONES
        .iter()
        .find(|milestone| milestone.tier == streak)
        .map(MilestoneReached::from)
}

/// Progress from the last reached tier toward the next one.
///
/// Total for every streak: 0 maps to `{0, 7, 0%}`, anything at or beyond the
/// top tier maps to `{100, 100, 100%}`.
pub fn progress_to_next_milestone(streak: u32) -> MilestoneProgress {
    if streak >= MAX_MILESTONE_TIER {
        return MilestoneProgress {
            prev_tier: MAX_MILESTONE_TIER,
            next_tier: MAX_MILESTONE_TIER,
            percent: 100,
            days_to_next: 0,
        };
    }

    let prev_tier = MILESTONE_TIERS
        .iter()
        .copied()
        .rev()
        .find(|tier| *tier <= streak)
        .unwrap_or(0);
    let next_tier = MILESTONE_TIERS
        .iter()
        .copied()
        .find(|tier| *tier > streak)
        .unwrap_or(MAX_MILESTONE_TIER);

    let span = u64::from(next_tier - prev_tier);
    let done = u64::from(streak - prev_tier);
    // round half up
    let percent = ((200 * done + span) / (2 * span)).min(100) as u8;

    MilestoneProgress {
        prev_tier,
        next_tier,
        percent,
        days_to_next: next_tier - streak,
    }
}
