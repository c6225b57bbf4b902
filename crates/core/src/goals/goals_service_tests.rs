#[cfg(test)]
mod tests {
    use crate::errors::{DatabaseError, Error, Result, ValidationError};
    use crate::events::{DomainEvent, MockDomainEventSink};
    use crate::goals::{
        Frequency, Goal, GoalRepositoryTrait, GoalService, GoalServiceTrait, NewGoal,
    };
    use crate::settings::CheckInSettings;
    use async_trait::async_trait;
    use chrono::{DateTime, TimeZone, Utc};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct MockGoalRepository {
        goals: Arc<Mutex<Vec<Goal>>>,
    }

    impl MockGoalRepository {
        fn with_goals(goals: Vec<Goal>) -> Self {
            Self {
                goals: Arc::new(Mutex::new(goals)),
            }
        }
    }

    #[async_trait]
    impl GoalRepositoryTrait for MockGoalRepository {
        fn load_goals(&self, user_id: &str) -> Result<Vec<Goal>> {
            Ok(self
                .goals
                .lock()
                .unwrap()
                .iter()
                .filter(|g| g.user_id == user_id)
                .cloned()
                .collect())
        }

        fn load_goals_by_ids(&self, goal_ids: &[String]) -> Result<Vec<Goal>> {
            Ok(self
                .goals
                .lock()
                .unwrap()
                .iter()
                .filter(|g| goal_ids.contains(&g.id))
                .cloned()
                .collect())
        }

        fn get_goal(&self, goal_id: &str) -> Result<Goal> {
            self.goals
                .lock()
                .unwrap()
                .iter()
                .find(|g| g.id == goal_id)
                .cloned()
                .ok_or_else(|| DatabaseError::NotFound(goal_id.to_string()).into())
        }

        async fn insert_new_goal(&self, new_goal: NewGoal) -> Result<Goal> {
            let mut goals = self.goals.lock().unwrap();
            let goal = Goal {
                id: new_goal
                    .id
                    .unwrap_or_else(|| format!("goal-{}", goals.len() + 1)),
                user_id: new_goal.user_id,
                title: new_goal.title,
                description: new_goal.description,
                category: new_goal.category.unwrap_or_default(),
                frequency: new_goal.frequency,
                current_streak: 0,
                longest_streak: 0,
                checked_today: false,
                last_check_in_at: None,
                created_at: Utc::now(),
            };
            goals.push(goal.clone());
            Ok(goal)
        }

        async fn delete_goal(&self, goal_id_to_delete: String) -> Result<usize> {
            let mut goals = self.goals.lock().unwrap();
            let before = goals.len();
            goals.retain(|g| g.id != goal_id_to_delete);
            Ok(before - goals.len())
        }
    }

    fn at(day: u32, h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, day, h, m, 0).unwrap()
    }

    fn goal(id: &str, user_id: &str, streak: i32, last: Option<DateTime<Utc>>) -> Goal {
        Goal {
            id: id.to_string(),
            user_id: user_id.to_string(),
            title: format!("Goal {}", id),
            description: None,
            category: "general".to_string(),
            frequency: Frequency::Daily,
            current_streak: streak,
            longest_streak: streak,
            checked_today: last.is_some(),
            last_check_in_at: last,
            created_at: at(1, 0, 0),
        }
    }

    fn new_goal(title: &str) -> NewGoal {
        NewGoal {
            id: None,
            user_id: "demo-user".to_string(),
            title: title.to_string(),
            description: Some("   ".to_string()),
            category: None,
            frequency: Frequency::Weekdays,
        }
    }

    fn service(repo: MockGoalRepository) -> (GoalService, MockDomainEventSink) {
        let sink = MockDomainEventSink::new();
        let service = GoalService::new(Arc::new(repo), Arc::new(CheckInSettings::default()))
            .with_event_sink(Arc::new(sink.clone()));
        (service, sink)
    }

    #[tokio::test]
    async fn create_goal_normalizes_input_and_emits_event() {
        let repo = MockGoalRepository::default();
        let (service, sink) = service(repo.clone());

        let created = service.create_goal(new_goal("  Drink water ")).await.unwrap();
        assert_eq!(created.title, "Drink water");
        assert_eq!(created.category, "general");
        assert_eq!(created.description, None);
        assert_eq!(created.frequency, Frequency::Weekdays);
        assert_eq!(created.current_streak, 0);

        let events = sink.events();
        assert_eq!(events.len(), 1);
        assert!(matches!(
            &events[0],
            DomainEvent::GoalsChanged { goal_ids, .. } if goal_ids == &vec![created.id.clone()]
        ));
    }

    #[tokio::test]
    async fn create_goal_rejects_blank_title() {
        let (service, sink) = service(MockGoalRepository::default());

        let err = service.create_goal(new_goal("   ")).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::MissingField(ref field)) if field == "title"
        ));
        assert!(sink.is_empty());
    }

    #[test]
    fn get_goals_reconciles_day_flags() {
        let repo = MockGoalRepository::with_goals(vec![
            goal("today", "demo-user", 3, Some(at(10, 9, 0))),
            goal("yesterday", "demo-user", 4, Some(at(9, 9, 0))),
            goal("lapsed", "demo-user", 8, Some(at(7, 9, 0))),
            goal("other", "someone-else", 2, Some(at(10, 9, 0))),
        ]);
        let (service, _) = service(repo);

        let goals = service.get_goals("demo-user", at(10, 18, 0)).unwrap();
        assert_eq!(goals.len(), 3);

        let by_id = |id: &str| goals.iter().find(|g| g.id == id).unwrap().clone();
        assert!(by_id("today").checked_today);
        assert_eq!(by_id("today").current_streak, 3);
        assert!(!by_id("yesterday").checked_today);
        assert_eq!(by_id("yesterday").current_streak, 4);
        assert_eq!(by_id("lapsed").current_streak, 0);
        assert_eq!(by_id("lapsed").longest_streak, 8);
    }

    #[test]
    fn other_users_goals_are_not_found() {
        let repo =
            MockGoalRepository::with_goals(vec![goal("g1", "someone-else", 2, Some(at(10, 9, 0)))]);
        let (service, _) = service(repo);

        let err = service.get_goal("demo-user", "g1", at(10, 12, 0)).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn progress_flags_streak_at_risk_late_in_the_day() {
        let repo =
            MockGoalRepository::with_goals(vec![goal("g1", "demo-user", 20, Some(at(9, 9, 0)))]);
        let (service, _) = service(repo);

        // 21:00 UTC with the default 08:00-22:00 window: one hour left.
        let progress = service.get_goal_progress("demo-user", "g1", at(10, 21, 0)).unwrap();
        assert!(progress.window_open);
        assert_eq!(progress.window_seconds_remaining, 3600);
        assert!(progress.at_risk);
        assert_eq!(progress.milestone.prev_tier, 7);
        assert_eq!(progress.milestone.next_tier, 21);
        assert_eq!(progress.milestone.days_to_next, 1);

        let morning = service.get_goal_progress("demo-user", "g1", at(10, 9, 0)).unwrap();
        assert!(!morning.at_risk);
    }

    #[test]
    fn yesterdays_streak_reads_as_lapsed_after_window_closes() {
        let repo =
            MockGoalRepository::with_goals(vec![goal("g1", "demo-user", 6, Some(at(9, 9, 0)))]);
        let (service, _) = service(repo.clone());

        let before_close = service.get_goal("demo-user", "g1", at(10, 21, 30)).unwrap();
        assert_eq!(before_close.current_streak, 6);

        let progress = service.get_goal_progress("demo-user", "g1", at(10, 22, 0)).unwrap();
        assert_eq!(progress.goal.current_streak, 0);
        assert!(!progress.at_risk);
        assert_eq!(progress.milestone.next_tier, 7);

        let relaxed = GoalService::new(
            Arc::new(repo),
            Arc::new(CheckInSettings {
                enforce_window: false,
                ..CheckInSettings::default()
            }),
        );
        let late = relaxed.get_goal("demo-user", "g1", at(10, 23, 0)).unwrap();
        assert_eq!(late.current_streak, 6);
    }

    #[tokio::test]
    async fn delete_goal_checks_ownership() {
        let repo = MockGoalRepository::with_goals(vec![
            goal("mine", "demo-user", 1, None),
            goal("theirs", "someone-else", 1, None),
        ]);
        let (service, sink) = service(repo.clone());

        assert!(service.delete_goal("demo-user", "theirs").await.is_err());
        assert_eq!(service.delete_goal("demo-user", "mine").await.unwrap(), 1);
        assert_eq!(repo.goals.lock().unwrap().len(), 1);
        assert_eq!(sink.len(), 1);
    }
}
