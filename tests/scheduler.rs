mod tests {
    use marquee_lights::scheduler::{MAX_CATCH_UP_TICKS, TickScheduler};
    use marquee_lights::{Duration, Instant};

    const TICK: Duration = Duration::from_millis(10);

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    #[test]
    fn test_first_poll_anchors() {
        let mut scheduler = TickScheduler::new(TICK);
        let result = scheduler.poll(at(0));
        assert_eq!(result.elapsed_ticks, 0);
        assert_eq!(result.sleep_duration, TICK);
    }

    #[test]
    fn test_waits_until_deadline() {
        let mut scheduler = TickScheduler::new(TICK);
        scheduler.poll(at(0));
        let result = scheduler.poll(at(4));
        assert_eq!(result.elapsed_ticks, 0);
        assert_eq!(result.sleep_duration, Duration::from_millis(6));
    }

    #[test]
    fn test_counts_due_ticks_and_carries_remainder() {
        let mut scheduler = TickScheduler::new(TICK);
        scheduler.poll(at(0));

        let result = scheduler.poll(at(10));
        assert_eq!(result.elapsed_ticks, 1);
        assert_eq!(result.sleep_duration, TICK);

        let result = scheduler.poll(at(45));
        assert_eq!(result.elapsed_ticks, 3);
        assert_eq!(result.sleep_duration, Duration::from_millis(5));

        let result = scheduler.poll(at(50));
        assert_eq!(result.elapsed_ticks, 1);
    }

    #[test]
    fn test_total_ticks_follow_wall_clock() {
        let mut scheduler = TickScheduler::new(TICK);
        scheduler.poll(at(0));
        let mut total = 0;
        for ms in [3, 17, 18, 29, 64, 65, 99, 100] {
            total += scheduler.poll(at(ms)).elapsed_ticks;
        }
        assert_eq!(total, 10);
    }

    #[test]
    fn test_skips_backlog_after_stall() {
        let mut scheduler = TickScheduler::new(TICK);
        scheduler.poll(at(0));
        let stall = u64::from(MAX_CATCH_UP_TICKS + 10) * 10;
        let result = scheduler.poll(at(stall));
        assert_eq!(result.elapsed_ticks, 1);
        assert_eq!(result.sleep_duration, TICK);

        let result = scheduler.poll(at(stall + 10));
        assert_eq!(result.elapsed_ticks, 1);
    }

    #[test]
    fn test_small_backlog_is_replayed() {
        let mut scheduler = TickScheduler::new(TICK);
        scheduler.poll(at(0));
        let result = scheduler.poll(at(u64::from(MAX_CATCH_UP_TICKS) * 10));
        assert_eq!(result.elapsed_ticks, MAX_CATCH_UP_TICKS);
    }

    #[test]
    fn test_sleep_never_exceeds_tick() {
        let mut scheduler = TickScheduler::new(TICK);
        for ms in [0, 1, 9, 10, 11, 500, 501, 502] {
            assert!(scheduler.poll(at(ms)).sleep_duration <= TICK);
        }
    }
}
