#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate, NaiveDateTime};
    use workcheck::libs::clock::ManualClock;
    use workcheck::libs::engine::{ActivityEngine, Mode, ThresholdOverrides, Thresholds};
    use workcheck::libs::notification::{Notification, NotificationKind};

    fn at(hour: u32, minute: u32, second: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap().and_hms_opt(hour, minute, second).unwrap()
    }

    /// Engine starting at 10:00 with default thresholds, a fixed quote and
    /// an alert window that is either always open or always closed.
    fn engine(window_open: bool) -> (ActivityEngine, ManualClock) {
        engine_with(Thresholds::default(), window_open)
    }

    fn engine_with(thresholds: Thresholds, window_open: bool) -> (ActivityEngine, ManualClock) {
        let clock = ManualClock::new(at(10, 0, 0));
        let engine = ActivityEngine::with_clock(thresholds, clock.clone())
            .with_alert_window(move |_: NaiveDateTime| window_open)
            .with_quotes(|| Some("Keep going.".to_string()));
        (engine, clock)
    }

    fn kinds(events: &[Notification]) -> Vec<NotificationKind> {
        events.iter().map(|e| e.kind).collect()
    }

    /// Signals and evaluates once per minute from 10:01 through 10:`last`.
    fn work_minutes(engine: &mut ActivityEngine, clock: &ManualClock, last: u32) -> Vec<Notification> {
        let mut events = Vec::new();
        for minute in 1..=last {
            let now = at(10, minute, 0);
            clock.set(now);
            engine.signal_activity();
            events.extend(engine.evaluate(now));
        }
        events
    }

    #[test]
    fn test_fresh_engine_is_active_and_empty() {
        let (engine, _clock) = engine(true);
        assert_eq!(engine.mode(), Mode::Active);
        assert_eq!(engine.display_worked_total(), Duration::zero());
        assert_eq!(engine.display_away_total(), Duration::zero());
        assert_eq!(engine.current_session_duration(), Duration::zero());
        assert!(!engine.soft_fired());
        assert!(!engine.hard_fired());
    }

    #[test]
    fn test_idle_26_minutes_fires_soft_short_break_and_inactivity() {
        let (mut engine, _clock) = engine(true);

        let events = engine.evaluate(at(10, 26, 0));

        assert_eq!(
            kinds(&events),
            vec![
                NotificationKind::SoftReminder,
                NotificationKind::ShortBreak,
                NotificationKind::InactivityAlert
            ]
        );
        assert_eq!(engine.mode(), Mode::Inactive);

        let alert = &events[2];
        assert!(alert.send_outbound);
        assert!(!alert.outbound_silent);
        assert_eq!(alert.quote.as_deref(), Some("Keep going."));
        assert_eq!(alert.primary_message, "15 minutes have passed");
        assert_eq!(
            alert.outbound_text.as_deref(),
            Some("Get back to work! 15 minutes have passed\nKeep going.")
        );
    }

    #[test]
    fn test_idle_outside_alert_window_is_silent() {
        let (mut engine, _clock) = engine(false);

        let events = engine.evaluate(at(10, 26, 0));

        assert_eq!(kinds(&events), vec![NotificationKind::SoftReminder, NotificationKind::ShortBreak]);
        assert_eq!(engine.mode(), Mode::Inactive);
    }

    #[test]
    fn test_crossing_inactivity_outside_window_yields_no_events() {
        let (mut engine, _clock) = engine(false);

        // Into the short break first, then past the inactivity threshold.
        assert_eq!(kinds(&engine.evaluate(at(10, 6, 0))), vec![NotificationKind::ShortBreak]);
        let events = engine.evaluate(at(10, 16, 0));

        assert!(events.is_empty());
        assert_eq!(engine.mode(), Mode::Inactive);
    }

    #[test]
    fn test_soft_then_hard_reminder_while_working() {
        let (mut engine, clock) = engine(true);

        let events = work_minutes(&mut engine, &clock, 26);
        assert_eq!(kinds(&events), vec![NotificationKind::SoftReminder]);
        assert!(!events[0].send_outbound);
        assert_eq!(events[0].primary_message, "You have been working for 26 minutes");
        assert!(engine.soft_fired());

        let mut later = Vec::new();
        for minute in 27..=41 {
            let now = at(10, minute, 0);
            clock.set(now);
            engine.signal_activity();
            later.extend(engine.evaluate(now));
        }
        assert_eq!(kinds(&later), vec![NotificationKind::HardReminder]);
        assert!(later[0].send_outbound);
        assert!(!later[0].outbound_silent);
        assert_eq!(later[0].outbound_text.as_deref(), Some("Take a break!"));
        assert!(engine.hard_fired());
    }

    #[test]
    fn test_both_reminders_in_one_lagged_evaluation() {
        let (mut engine, clock) = engine(true);
        clock.set(at(10, 45, 0));
        engine.signal_activity();

        let events = engine.evaluate(at(10, 45, 0));

        assert_eq!(kinds(&events), vec![NotificationKind::SoftReminder, NotificationKind::HardReminder]);
    }

    #[test]
    fn test_second_evaluate_with_same_now_is_empty() {
        let (mut engine, clock) = engine(true);
        clock.set(at(10, 45, 0));
        engine.signal_activity();

        assert_eq!(engine.evaluate(at(10, 45, 0)).len(), 2);
        assert!(engine.evaluate(at(10, 45, 0)).is_empty());

        // Same for the idle transitions.
        assert_eq!(kinds(&engine.evaluate(at(10, 51, 0))), vec![NotificationKind::ShortBreak]);
        assert!(engine.evaluate(at(10, 51, 0)).is_empty());
        assert_eq!(kinds(&engine.evaluate(at(11, 1, 0))), vec![NotificationKind::InactivityAlert]);
        assert!(engine.evaluate(at(11, 1, 0)).is_empty());
    }

    #[test]
    fn test_return_from_short_break_banks_work_and_away() {
        let thresholds = Thresholds {
            inactivity_idle: Duration::minutes(30),
            ..Thresholds::default()
        };
        let (mut engine, clock) = engine_with(thresholds, true);

        work_minutes(&mut engine, &clock, 10);
        assert_eq!(engine.display_worked_total(), Duration::minutes(10));

        let events = engine.evaluate(at(10, 16, 0));
        assert_eq!(kinds(&events), vec![NotificationKind::ShortBreak]);
        assert_eq!(engine.mode(), Mode::ShortBreak);
        assert_eq!(engine.accumulated_worked(), Duration::minutes(10));
        assert_eq!(events[0].primary_message, "You worked 10 minutes.");
        assert_eq!(events[0].secondary_message.as_deref(), Some("Total worked: 10 minutes"));
        assert!(events[0].send_outbound);
        assert!(events[0].outbound_silent);

        clock.set(at(10, 30, 0));
        engine.signal_activity();
        assert_eq!(engine.mode(), Mode::Active);
        assert!(!engine.soft_fired());
        assert!(!engine.hard_fired());

        let events = engine.evaluate(at(10, 30, 0));
        assert_eq!(kinds(&events), vec![NotificationKind::WelcomeBack]);
        assert_eq!(events[0].primary_message, "You were away for 20 minutes");
        assert_eq!(events[0].secondary_message.as_deref(), Some("Total time away: 20 minutes"));
        assert_eq!(events[0].quote.as_deref(), Some("Keep going."));
        assert!(!events[0].send_outbound);

        assert_eq!(engine.accumulated_away(), Duration::minutes(20));
        assert_eq!(engine.accumulated_worked(), Duration::minutes(10));
        assert_eq!(engine.current_session_duration_at(at(10, 32, 0)), Duration::minutes(2));
    }

    #[test]
    fn test_return_from_inactivity_resets_stretch() {
        let (mut engine, clock) = engine(true);
        work_minutes(&mut engine, &clock, 30);
        engine.evaluate(at(10, 50, 0));
        assert_eq!(engine.mode(), Mode::Inactive);

        clock.set(at(11, 30, 0));
        engine.signal_activity();
        let events = engine.evaluate(at(11, 30, 0));

        assert_eq!(kinds(&events), vec![NotificationKind::WelcomeBack]);
        assert_eq!(events[0].primary_message, "You were away for 1 hour");
        assert_eq!(engine.accumulated_worked(), Duration::minutes(30));

        // Reminders are measured from the return, not from 10:00.
        assert!(engine.evaluate(at(11, 50, 0)).iter().all(|e| e.kind != NotificationKind::SoftReminder));
    }

    #[test]
    fn test_inactivity_before_short_break_banks_work() {
        let thresholds = Thresholds {
            short_break_idle: Duration::minutes(30),
            inactivity_idle: Duration::minutes(15),
            ..Thresholds::default()
        };
        let (mut engine, clock) = engine_with(thresholds, true);

        work_minutes(&mut engine, &clock, 10);
        assert_eq!(engine.display_worked_total(), Duration::minutes(10));

        let events = engine.evaluate(at(10, 26, 0));
        assert_eq!(kinds(&events), vec![NotificationKind::SoftReminder, NotificationKind::InactivityAlert]);
        assert_eq!(engine.mode(), Mode::Inactive);
        assert_eq!(engine.accumulated_worked(), Duration::minutes(10));
        assert_eq!(engine.display_worked_total(), Duration::minutes(10));

        clock.set(at(10, 40, 0));
        engine.signal_activity();
        assert_eq!(engine.accumulated_worked(), Duration::minutes(10));
        assert_eq!(engine.display_worked_total(), Duration::minutes(10));
        assert_eq!(engine.accumulated_away(), Duration::minutes(30));

        // The next stretch is banked on its own.
        clock.set(at(10, 45, 0));
        engine.signal_activity();
        engine.evaluate(at(11, 1, 0));
        assert_eq!(engine.mode(), Mode::Inactive);
        assert_eq!(engine.accumulated_worked(), Duration::minutes(15));
    }

    #[test]
    fn test_inactive_stops_threshold_checks() {
        let (mut engine, _clock) = engine(true);
        engine.evaluate(at(10, 20, 0));
        assert_eq!(engine.mode(), Mode::Inactive);

        assert!(engine.evaluate(at(12, 0, 0)).is_empty());
        assert!(engine.evaluate(at(18, 0, 0)).is_empty());
        assert_eq!(engine.mode(), Mode::Inactive);
    }

    #[test]
    fn test_no_soft_reminder_during_short_break() {
        let (mut engine, clock) = engine(true);
        work_minutes(&mut engine, &clock, 18);

        // Short break starts at 10:24, just before the soft limit.
        let events = engine.evaluate(at(10, 24, 0));
        assert_eq!(kinds(&events), vec![NotificationKind::ShortBreak]);
        assert!(engine.soft_fired());
        assert!(engine.evaluate(at(10, 26, 0)).is_empty());
    }

    #[test]
    fn test_welcome_back_is_reported_before_new_reminders() {
        let thresholds = Thresholds {
            soft_limit: Duration::zero(),
            ..Thresholds::default()
        };
        let (mut engine, clock) = engine_with(thresholds, true);
        engine.evaluate(at(10, 6, 0));
        assert_eq!(engine.mode(), Mode::ShortBreak);

        clock.set(at(10, 8, 0));
        engine.signal_activity();
        let events = engine.evaluate(at(10, 8, 1));

        assert_eq!(kinds(&events), vec![NotificationKind::WelcomeBack, NotificationKind::SoftReminder]);
    }

    #[test]
    fn test_display_totals_include_open_stretches() {
        let (mut engine, clock) = engine(true);
        work_minutes(&mut engine, &clock, 10);

        // Worked total counts up to the last input, not up to now.
        assert_eq!(engine.display_worked_total(), Duration::minutes(10));
        assert_eq!(engine.current_session_duration_at(at(10, 12, 0)), Duration::minutes(12));
        assert_eq!(engine.display_away_total_at(at(10, 12, 0)), Duration::zero());

        engine.evaluate(at(10, 16, 0));
        assert_eq!(engine.mode(), Mode::ShortBreak);
        assert_eq!(engine.current_session_duration_at(at(10, 18, 0)), Duration::zero());
        assert_eq!(engine.display_worked_total(), Duration::minutes(10));
        assert_eq!(engine.display_away_total_at(at(10, 18, 0)), Duration::minutes(8));
    }

    #[test]
    fn test_queries_do_not_mutate() {
        let (mut engine, clock) = engine(true);
        work_minutes(&mut engine, &clock, 5);
        clock.set(at(10, 7, 0));

        let before = format!("{:?}", engine);
        let _ = engine.current_session_duration();
        let _ = engine.display_worked_total();
        let _ = engine.display_away_total();
        let _ = engine.summary();
        assert_eq!(before, format!("{:?}", engine));
    }

    #[test]
    fn test_totals_are_monotonic() {
        let (mut engine, clock) = engine(true);
        let mut last_worked = Duration::zero();
        let mut last_away = Duration::zero();

        // Work 7 min, idle 9 min, repeated; evaluate every minute.
        for minute in 0..180u32 {
            let now = at(10, 0, 0) + Duration::minutes(i64::from(minute));
            clock.set(now);
            if minute % 16 < 7 {
                engine.signal_activity();
            }
            engine.evaluate(now);

            assert!(engine.accumulated_worked() >= last_worked);
            assert!(engine.accumulated_away() >= last_away);
            last_worked = engine.accumulated_worked();
            last_away = engine.accumulated_away();
        }
        assert!(last_worked > Duration::zero());
        assert!(last_away > Duration::zero());
    }

    #[test]
    fn test_apply_thresholds_keeps_progress() {
        let (mut engine, clock) = engine(true);
        assert!(work_minutes(&mut engine, &clock, 20).is_empty());

        engine.apply_thresholds(ThresholdOverrides {
            soft_limit: Some(Duration::minutes(15)),
            ..Default::default()
        });
        assert_eq!(engine.thresholds().soft_limit, Duration::minutes(15));
        assert_eq!(engine.thresholds().hard_limit, Duration::minutes(40));

        let events = engine.evaluate(at(10, 20, 0));
        assert_eq!(kinds(&events), vec![NotificationKind::SoftReminder]);
        assert_eq!(events[0].primary_message, "You have been working for 20 minutes");
    }

    #[test]
    fn test_apply_full_thresholds() {
        let (mut engine, _clock) = engine(true);
        engine.apply_thresholds(Thresholds::debug());
        assert_eq!(engine.thresholds(), Thresholds::debug());

        let events = engine.evaluate(at(10, 0, 6));
        assert_eq!(kinds(&events), vec![NotificationKind::ShortBreak]);
    }

    #[test]
    fn test_reset_restores_fresh_state() {
        let (mut engine, clock) = engine(true);
        work_minutes(&mut engine, &clock, 30);
        engine.evaluate(at(10, 50, 0));
        clock.set(at(11, 0, 0));
        engine.signal_activity();
        assert!(engine.display_worked_total() > Duration::zero());
        assert!(engine.display_away_total() > Duration::zero());

        engine.reset();

        assert_eq!(engine.mode(), Mode::Active);
        assert_eq!(engine.display_worked_total(), Duration::zero());
        assert_eq!(engine.display_away_total(), Duration::zero());
        assert!(!engine.soft_fired());
        assert!(!engine.hard_fired());
        // The queued welcome-back is dropped too.
        assert!(engine.evaluate(at(11, 0, 0)).is_empty());
    }

    #[test]
    fn test_reset_from_inactive() {
        let (mut engine, clock) = engine(true);
        engine.evaluate(at(10, 20, 0));
        assert_eq!(engine.mode(), Mode::Inactive);

        clock.set(at(10, 21, 0));
        engine.reset();
        assert_eq!(engine.mode(), Mode::Active);
        assert_eq!(engine.current_session_duration_at(at(10, 22, 0)), Duration::minutes(1));
    }

    #[test]
    fn test_clock_going_backwards_is_clamped() {
        let (mut engine, clock) = engine(true);
        work_minutes(&mut engine, &clock, 10);

        assert!(engine.evaluate(at(9, 0, 0)).is_empty());
        assert_eq!(engine.mode(), Mode::Active);
        assert_eq!(engine.current_session_duration_at(at(9, 0, 0)), Duration::zero());

        engine.evaluate(at(10, 16, 0));
        assert_eq!(engine.mode(), Mode::ShortBreak);
        assert_eq!(engine.display_away_total_at(at(9, 0, 0)), Duration::minutes(0));

        // Returning "before" the last input adds no away time.
        clock.set(at(9, 30, 0));
        engine.signal_activity();
        assert_eq!(engine.accumulated_away(), Duration::zero());
        let events = engine.evaluate(at(9, 30, 0));
        assert_eq!(events[0].primary_message, "You were away for 0 seconds");
    }

    #[test]
    fn test_signal_while_active_does_not_queue() {
        let (mut engine, clock) = engine(true);
        clock.set(at(10, 1, 0));
        engine.signal_activity();
        clock.set(at(10, 1, 1));
        engine.signal_activity();
        assert!(engine.evaluate(at(10, 1, 1)).is_empty());
    }

    #[test]
    fn test_multiple_returns_accumulate_away() {
        let thresholds = Thresholds {
            inactivity_idle: Duration::hours(2),
            ..Thresholds::default()
        };
        let (mut engine, clock) = engine_with(thresholds, true);

        assert_eq!(kinds(&engine.evaluate(at(10, 6, 0))), vec![NotificationKind::ShortBreak]);
        clock.set(at(10, 10, 0));
        engine.signal_activity();

        let events = engine.evaluate(at(10, 16, 0));
        assert_eq!(kinds(&events), vec![NotificationKind::WelcomeBack, NotificationKind::ShortBreak]);
        assert_eq!(events[0].primary_message, "You were away for 10 minutes");

        clock.set(at(10, 31, 0));
        engine.signal_activity();
        let events = engine.evaluate(at(10, 31, 0));
        assert_eq!(kinds(&events), vec![NotificationKind::WelcomeBack]);
        assert_eq!(events[0].primary_message, "You were away for 21 minutes");
        assert_eq!(events[0].secondary_message.as_deref(), Some("Total time away: 31 minutes"));
        assert_eq!(engine.accumulated_away(), Duration::minutes(31));
    }

    #[test]
    fn test_summary_mentions_totals() {
        let (mut engine, clock) = engine(true);
        work_minutes(&mut engine, &clock, 10);
        engine.evaluate(at(10, 16, 0));

        assert_eq!(
            engine.summary_at(at(10, 20, 0)),
            "Shutting down. Total worked: 10 minutes; away: 10 minutes"
        );
    }
}
