use super::*;
use std::time::Instant;

/// A tick long enough that workers never fire during a test.
const FROZEN: Duration = Duration::from_secs(3600);

fn wait_until(timeout: Duration, mut done: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if done() {
            return true;
        }
        thread::sleep(Duration::from_millis(2));
    }
    done()
}

#[test]
fn test_format_clock() {
    assert_eq!(format_clock(180), "3:00");
    assert_eq!(format_clock(59), "0:59");
    assert_eq!(format_clock(0), "0:00");
    assert_eq!(format_clock(3605), "60:05");
}

#[test]
fn test_new_clock_is_paused() {
    let clock = Clock::new(FROZEN).unwrap();
    assert_eq!(clock.running_side(), None);
    assert!(!clock.is_expired());
    assert!(clock.worker_alive(Side::First));
    assert!(clock.worker_alive(Side::Second));
}

#[test]
fn test_start_runs_exactly_one_side() {
    let clock = Clock::new(FROZEN).unwrap();
    clock.reset(180);
    clock.start(Side::First);
    assert_eq!(
        clock.state(Side::First),
        ClockState {
            remaining_seconds: 180,
            running: true
        }
    );
    assert!(!clock.is_running(Side::Second));
}

#[test]
fn test_update_time_alternates_and_credits_mover() {
    let clock = Clock::new(FROZEN).unwrap();
    clock.set_increment(2);
    clock.reset(180);
    clock.start(Side::First);

    let mut mover = Side::First;
    for n in 1..=6u32 {
        clock.update_time(mover);
        assert_eq!(clock.running_side(), Some(mover.other()));
        mover = mover.other();
        let credited = clock.remaining(Side::First) + clock.remaining(Side::Second) - 360;
        assert_eq!(credited, 2 * n);
    }
    assert_eq!(clock.remaining(Side::First), 186);
    assert_eq!(clock.remaining(Side::Second), 186);
}

#[test]
fn test_tick_only_affects_running_side() {
    let clock = Clock::new(FROZEN).unwrap();
    clock.reset(10);
    clock.start(Side::Second);
    clock.tick_once(Side::First);
    clock.tick_once(Side::Second);
    assert_eq!(clock.remaining(Side::First), 10);
    assert_eq!(clock.remaining(Side::Second), 9);

    clock.pause();
    clock.tick_once(Side::Second);
    assert_eq!(clock.remaining(Side::Second), 9);
}

#[test]
fn test_countdown_stops_at_zero() {
    let clock = Clock::new(FROZEN).unwrap();
    clock.reset(1);
    clock.start(Side::First);
    clock.tick_once(Side::First);
    assert!(clock.is_expired());
    assert_eq!(clock.expired_side(), Some(Side::First));

    clock.tick_once(Side::First);
    assert_eq!(clock.remaining(Side::First), 0);
}

#[test]
fn test_expired_clock_gets_no_increment() {
    let clock = Clock::new(FROZEN).unwrap();
    clock.set_increment(2);
    clock.reset(1);
    clock.start(Side::First);
    clock.tick_once(Side::First);

    clock.update_time(Side::First);
    assert_eq!(clock.remaining(Side::First), 0);
    assert_eq!(clock.expired_side(), Some(Side::First));
}

#[test]
fn test_reset_clears_expiry() {
    let clock = Clock::new(FROZEN).unwrap();
    clock.reset(1);
    clock.start(Side::Second);
    clock.tick_once(Side::Second);
    assert!(clock.is_expired());

    clock.reset(60);
    assert!(!clock.is_expired());
    assert_eq!(clock.expired_side(), None);
    assert_eq!(clock.running_side(), None);
}

#[test]
fn test_workers_count_down_in_real_time() {
    let clock = Clock::new(Duration::from_millis(5)).unwrap();
    clock.reset(3);
    clock.start(Side::First);
    assert!(wait_until(Duration::from_secs(5), || clock.is_expired()));
    assert_eq!(clock.expired_side(), Some(Side::First));
    assert_eq!(clock.remaining(Side::Second), 3);
}

#[test]
fn test_pause_holds_remaining_time() {
    let clock = Clock::new(Duration::from_millis(2)).unwrap();
    clock.reset(10_000);
    clock.start(Side::First);
    assert!(wait_until(Duration::from_secs(5), || clock.remaining(Side::First) < 10_000));
    clock.pause();
    let held = clock.remaining(Side::First);
    thread::sleep(Duration::from_millis(30));
    // A tick already in flight when pausing may still land
    assert!(held - clock.remaining(Side::First) <= 1);
}

#[test]
fn test_stalled_worker_is_restarted() {
    let mut clock = Clock::new(Duration::from_millis(5)).unwrap();
    clock.stop_worker(Side::First);
    assert!(!clock.worker_alive(Side::First));

    assert_eq!(clock.ensure_running().unwrap(), 1);
    assert!(clock.worker_alive(Side::First));
    assert_eq!(clock.ensure_running().unwrap(), 0);

    clock.reset(2);
    clock.start(Side::First);
    assert!(wait_until(Duration::from_secs(5), || clock.is_expired()));
}

#[test]
fn test_shutdown_joins_workers() {
    let mut clock = Clock::new(Duration::from_millis(5)).unwrap();
    clock.reset(100);
    clock.start(Side::First);
    clock.shutdown();
    assert!(!clock.worker_alive(Side::First));
    assert!(!clock.worker_alive(Side::Second));
    assert_eq!(clock.running_side(), None);
    assert_eq!(clock.ensure_running().unwrap(), 0);
    clock.shutdown();
}
