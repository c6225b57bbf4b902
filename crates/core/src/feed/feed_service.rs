use chrono::{DateTime, Duration, NaiveTime, TimeZone, Utc};
use log::{debug, warn};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use super::feed_model::{FeedEntry, FeedQuery, IntegrityScore};
use super::feed_traits::FeedServiceTrait;
use super::integrity_scorer::{rank_feed, IntegrityScorer};
use crate::checkins::{CheckIn, CheckInRepositoryTrait};
use crate::errors::Result;
use crate::friends::FriendServiceTrait;
use crate::goals::{Goal, GoalRepositoryTrait};
use crate::settings::CheckInSettings;
use crate::streaks::reconcile_goal;
use crate::utils::time_utils::trailing_window;

/// Assembles the social feed: one entry per goal (its latest check-in inside
/// the scoring window), scored per user and ranked.
pub struct FeedService {
    goal_repository: Arc<dyn GoalRepositoryTrait>,
    check_in_repository: Arc<dyn CheckInRepositoryTrait>,
    friend_service: Arc<dyn FriendServiceTrait>,
    settings: Arc<CheckInSettings>,
}

impl FeedService {
    pub fn new(
        goal_repository: Arc<dyn GoalRepositoryTrait>,
        check_in_repository: Arc<dyn CheckInRepositoryTrait>,
        friend_service: Arc<dyn FriendServiceTrait>,
        settings: Arc<CheckInSettings>,
    ) -> Self {
        Self {
            goal_repository,
            check_in_repository,
            friend_service,
            settings,
        }
    }

    /// UTC instant of local midnight starting the scoring window.
    fn window_start(&self, scorer: &IntegrityScorer, now: DateTime<Utc>) -> DateTime<Utc> {
        let tz = self.settings.timezone;
        let today = now.with_timezone(&tz).date_naive();
        trailing_window(today, scorer.window_days())
            .and_then(|(first_day, _)| {
                tz.from_local_datetime(&first_day.and_time(NaiveTime::MIN))
                    .earliest()
            })
            .map(|start| start.with_timezone(&Utc))
            .unwrap_or_else(|| now - Duration::days(i64::from(scorer.window_days())))
    }
}

impl FeedServiceTrait for FeedService {
    fn get_feed(
        &self,
        viewer_id: &str,
        query: &FeedQuery,
        now: DateTime<Utc>,
    ) -> Result<Vec<FeedEntry>> {
        let scorer = IntegrityScorer::new(
            self.settings.consistency_window_days,
            self.settings.badge_thresholds,
        )?;
        let tz = self.settings.timezone;
        let local_now = now.with_timezone(&tz);
        let today = local_now.date_naive();

        let visible_users: Option<HashSet<String>> = if query.friends_only {
            Some(self.friend_service.friend_ids(viewer_id)?)
        } else {
            None
        };

        let check_ins: Vec<CheckIn> = self
            .check_in_repository
            .list_check_ins_since(self.window_start(&scorer, now))?
            .into_iter()
            .filter(|c| c.created_at <= now)
            .filter(|c| {
                visible_users
                    .as_ref()
                    .map_or(true, |users| users.contains(&c.user_id))
            })
            .collect();

        let mut times_by_user: HashMap<&str, Vec<DateTime<Utc>>> = HashMap::new();
        let mut latest_by_goal: HashMap<&str, &CheckIn> = HashMap::new();
        for check_in in &check_ins {
            times_by_user
                .entry(check_in.user_id.as_str())
                .or_default()
                .push(check_in.created_at);
            latest_by_goal
                .entry(check_in.goal_id.as_str())
                .and_modify(|latest| {
                    if check_in.created_at > latest.created_at {
                        *latest = check_in;
                    }
                })
                .or_insert(check_in);
        }

        let scores: HashMap<&str, IntegrityScore> = times_by_user
            .into_iter()
            .map(|(user_id, times)| (user_id, scorer.score(times, today, &tz)))
            .collect();

        let goal_ids: Vec<String> = latest_by_goal.keys().map(|id| id.to_string()).collect();
        let goals: HashMap<String, Goal> = self
            .goal_repository
            .load_goals_by_ids(&goal_ids)?
            .into_iter()
            .map(|goal| (goal.id.clone(), goal))
            .collect();

        let window = self.settings.enforced_window();
        let mut entries = Vec::with_capacity(latest_by_goal.len());
        for (goal_id, check_in) in latest_by_goal {
            let Some(goal) = goals.get(goal_id) else {
                continue;
            };
            let goal = match reconcile_goal(goal, &local_now, window) {
                Ok(goal) => goal,
                Err(err) => {
                    warn!("Leaving goal {} out of the feed: {}", goal_id, err);
                    continue;
                }
            };
            let score = scores
                .get(check_in.user_id.as_str())
                .copied()
                .unwrap_or_else(|| scorer.score(Vec::new(), today, &tz));

            entries.push(FeedEntry {
                check_in_id: check_in.id.clone(),
                user_id: check_in.user_id.clone(),
                goal_id: goal.id.clone(),
                goal_title: goal.title.clone(),
                caption: check_in.caption.clone(),
                photo_reference: check_in.photo_reference.clone(),
                current_streak: goal.current_streak.max(0) as u32,
                consistency_rate: score.consistency_rate,
                integrity_badge: score.badge,
                like_count: check_in.like_count,
                created_at: check_in.created_at,
            });
        }

        rank_feed(&mut entries);
        entries.truncate(self.settings.feed_limit_for(query.limit));
        debug!(
            "Feed for {} (friends only: {}): {} entries",
            viewer_id,
            query.friends_only,
            entries.len()
        );
        Ok(entries)
    }
}
