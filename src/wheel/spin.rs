//! Spin state machine
//!
//! `Idle -> Spinning -> Settling -> Idle`. Everything here is a pure function
//! of caller-supplied timestamps (ms), so the frame loop only has to call
//! [`advance`] until the wheel is idle again.

use rand::Rng;

use super::state::WheelInstance;
use crate::consts::POINTER_OFFSET_DEG;
use crate::normalize_degrees;
use crate::settings::SpinTuning;

/// Quartic ease-out: fast start, smooth stop
#[inline]
pub fn ease_out_quartic(progress: f64) -> f64 {
    let p = progress.clamp(0.0, 1.0);
    1.0 - (1.0 - p).powi(4)
}

/// Angular width of one wedge (degrees)
#[inline]
pub fn arc_size(item_count: usize) -> f64 {
    360.0 / item_count as f64
}

/// Index of the wedge under the pointer for a given wheel rotation
///
/// Wedge `i` is drawn over `[i * arc, (i + 1) * arc)` from angle zero, and the
/// canvas is rotated clockwise by `rotation`. `None` when there are no wedges.
pub fn winner_index(rotation: f64, item_count: usize) -> Option<usize> {
    if item_count == 0 {
        return None;
    }
    let net = normalize_degrees(rotation);
    let under_pointer = normalize_degrees(360.0 - net + POINTER_OFFSET_DEG);
    let index = (under_pointer / arc_size(item_count)).floor() as usize;
    Some(index.min(item_count - 1))
}

/// Everything fixed at spin start
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinPlan {
    /// Timestamp of the spin request (ms)
    pub started_at: f64,
    /// Wheel rotation when the spin began (degrees)
    pub start_rotation: f64,
    /// Total distance this spin covers (degrees)
    pub travel: f64,
    pub duration_ms: f64,
    pub settle_delay_ms: f64,
    /// Wedge count at spin start
    pub item_count: usize,
}

impl SpinPlan {
    /// Animation progress in [0, 1]
    pub fn progress(&self, now: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        ((now - self.started_at) / self.duration_ms).clamp(0.0, 1.0)
    }

    /// Degrees travelled since spin start
    pub fn traveled_at(&self, now: f64) -> f64 {
        self.travel * ease_out_quartic(self.progress(now))
    }

    /// Absolute wheel rotation at `now`
    pub fn rotation_at(&self, now: f64) -> f64 {
        self.start_rotation + self.traveled_at(now)
    }

    /// Whole wedge widths covered by `traveled` degrees
    pub fn boundaries_crossed(&self, traveled: f64) -> u64 {
        (traveled / arc_size(self.item_count)).floor() as u64
    }
}

/// Where a wheel is in its spin cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpinPhase {
    Idle,
    /// Animating; `last_traveled` is the distance seen on the previous frame
    Spinning { plan: SpinPlan, last_traveled: f64 },
    /// Landed, winner on display until `settle_until`
    Settling {
        winner_index: Option<usize>,
        settle_until: f64,
    },
}

/// Outcome of a spin request
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpinRequest {
    Started { travel: f64 },
    /// A spin is already in flight; nothing changed
    Busy,
    /// No items left; nothing changed
    Empty,
}

/// Phase transitions reported by [`advance`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpinEvent {
    /// Animation finished on this wedge
    Landed { index: usize, winner: String },
    /// Winner taken off the wheel, back to idle
    Settled {
        removed: Option<String>,
        remaining: usize,
    },
}

/// Result of one animation frame
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Rotation to show (degrees)
    pub rotation: f64,
    /// A wedge boundary passed the pointer since the last frame
    pub tick: bool,
    pub event: Option<SpinEvent>,
}

impl Frame {
    fn still(rotation: f64) -> Self {
        Self {
            rotation,
            tick: false,
            event: None,
        }
    }
}

/// Start a spin if the wheel is idle and has items
pub fn request_spin<R: Rng + ?Sized>(
    wheel: &mut WheelInstance,
    now: f64,
    tuning: &SpinTuning,
    rng: &mut R,
) -> SpinRequest {
    if wheel.is_spinning() {
        log::debug!("{}: spin ignored, already spinning", wheel.id);
        return SpinRequest::Busy;
    }
    if wheel.active_items().is_empty() {
        return SpinRequest::Empty;
    }

    let travel = rng.random_range(tuning.travel_range());
    let plan = SpinPlan {
        started_at: now,
        start_rotation: wheel.current_rotation,
        travel,
        duration_ms: tuning.duration(),
        settle_delay_ms: tuning.settle_delay(),
        item_count: wheel.active_items().len(),
    };
    wheel.phase = SpinPhase::Spinning {
        plan,
        last_traveled: 0.0,
    };

    log::info!(
        "{}: spinning {:.0} degrees over {} items",
        wheel.id,
        travel,
        plan.item_count
    );
    SpinRequest::Started { travel }
}

/// Advance the wheel's spin to timestamp `now`
pub fn advance(wheel: &mut WheelInstance, now: f64) -> Frame {
    match wheel.phase {
        SpinPhase::Idle => Frame::still(wheel.current_rotation),

        SpinPhase::Spinning {
            plan,
            last_traveled,
        } => {
            let traveled = plan.traveled_at(now);
            let tick = plan.boundaries_crossed(traveled) > plan.boundaries_crossed(last_traveled);
            let rotation = plan.start_rotation + traveled;

            if plan.progress(now) < 1.0 {
                wheel.phase = SpinPhase::Spinning {
                    plan,
                    last_traveled: traveled,
                };
                return Frame {
                    rotation,
                    tick,
                    event: None,
                };
            }

            wheel.current_rotation = rotation;
            let index = winner_index(rotation, plan.item_count);
            wheel.phase = SpinPhase::Settling {
                winner_index: index,
                settle_until: now + plan.settle_delay_ms,
            };

            let event = index.and_then(|index| {
                let winner = wheel.active_items().get(index)?.clone();
                log::info!("{}: landed on #{} '{}'", wheel.id, index, winner);
                Some(SpinEvent::Landed { index, winner })
            });
            Frame {
                rotation,
                tick,
                event,
            }
        }

        SpinPhase::Settling {
            winner_index,
            settle_until,
        } => {
            if now < settle_until {
                return Frame::still(wheel.current_rotation);
            }

            let removed = winner_index.and_then(|i| wheel.remove_winner(i));
            wheel.phase = SpinPhase::Idle;
            let remaining = wheel.active_items().len();
            log::info!("{}: settled, {} items left", wheel.id, remaining);

            Frame {
                rotation: wheel.current_rotation,
                tick: false,
                event: Some(SpinEvent::Settled { removed, remaining }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::ItemSeparators;
    use crate::wheel::state::WheelId;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn wheel_with(raw: &str) -> WheelInstance {
        let mut wheel = WheelInstance::new(WheelId(1), "test");
        wheel.load(raw, ItemSeparators::Lines);
        wheel
    }

    /// Run frames every 16ms until the wheel goes idle, counting ticks
    fn run_to_idle(wheel: &mut WheelInstance, start: f64) -> (Vec<SpinEvent>, u32) {
        let mut events = Vec::new();
        let mut ticks = 0;
        let mut now = start;
        while wheel.is_spinning() {
            now += 16.0;
            let frame = advance(wheel, now);
            if frame.tick {
                ticks += 1;
            }
            events.extend(frame.event);
        }
        (events, ticks)
    }

    #[test]
    fn test_ease_out_endpoints() {
        assert_eq!(ease_out_quartic(0.0), 0.0);
        assert_eq!(ease_out_quartic(1.0), 1.0);
        assert_eq!(ease_out_quartic(-3.0), 0.0);
        assert_eq!(ease_out_quartic(7.0), 1.0);
        assert!((ease_out_quartic(0.5) - 0.9375).abs() < 1e-12);
    }

    #[test]
    fn test_winner_index_pointer_at_top() {
        // 4 wedges, rotated 270: wedge 0 sits under the pointer
        assert_eq!(winner_index(270.0, 4), Some(0));
        // No rotation: top of the wheel is 270, inside wedge 3
        assert_eq!(winner_index(0.0, 4), Some(3));
        assert_eq!(winner_index(180.0, 4), Some(1));
        // Full turns don't matter
        assert_eq!(winner_index(270.0 + 3600.0, 4), Some(0));
        assert_eq!(winner_index(123.0, 0), None);
        assert_eq!(winner_index(42.0, 1), Some(0));
    }

    #[test]
    fn test_rotation_is_pure_in_time() {
        let plan = SpinPlan {
            started_at: 1000.0,
            start_rotation: 90.0,
            travel: 2000.0,
            duration_ms: 5000.0,
            settle_delay_ms: 1200.0,
            item_count: 5,
        };
        assert_eq!(plan.rotation_at(1000.0), 90.0);
        assert_eq!(plan.rotation_at(500.0), 90.0);
        assert_eq!(plan.rotation_at(6000.0), 2090.0);
        assert_eq!(plan.rotation_at(60_000.0), 2090.0);
        assert!(plan.rotation_at(3500.0) > plan.rotation_at(2000.0));
    }

    #[test]
    fn test_full_spin_lands_then_removes_winner() {
        let mut wheel = wheel_with("A\nB\nC");
        let mut rng = Pcg32::seed_from_u64(7);
        let tuning = SpinTuning::default();

        let request = request_spin(&mut wheel, 0.0, &tuning, &mut rng);
        let SpinRequest::Started { travel } = request else {
            panic!("spin should start");
        };
        assert!((1800.0..=3600.0).contains(&travel));
        assert!(wheel.is_spinning());

        let (events, ticks) = run_to_idle(&mut wheel, 0.0);
        assert_eq!(events.len(), 2);
        let SpinEvent::Landed { index, winner } = &events[0] else {
            panic!("expected landing first, got {:?}", events[0]);
        };
        assert_eq!(
            events[1],
            SpinEvent::Settled {
                removed: Some(winner.clone()),
                remaining: 2
            }
        );
        assert_eq!(["A", "B", "C"][*index], winner.as_str());
        assert_eq!(wheel.active_items().len(), 2);
        assert!(!wheel.active_items().contains(winner));
        assert_eq!(wheel.master_items().len(), 3);
        assert_eq!(wheel.current_rotation(), travel);
        // At 120 degree wedges at least 15 boundaries are crossed; most frames see one
        assert!(ticks >= 10, "only {} ticks", ticks);
    }

    #[test]
    fn test_tick_count_matches_boundaries_crossed() {
        // 1ms frames never cross two wedges at once, so every boundary ticks
        for (count, seed) in [(2, 1), (3, 2), (7, 3), (12, 4), (40, 5)] {
            let raw: Vec<String> = (0..count).map(|i| format!("item {}", i)).collect();
            let mut wheel = wheel_with(&raw.join("\n"));
            let mut rng = Pcg32::seed_from_u64(seed);

            let SpinRequest::Started { travel } =
                request_spin(&mut wheel, 0.0, &SpinTuning::default(), &mut rng)
            else {
                panic!("spin should start with {} items", count);
            };

            let mut ticks = 0;
            let mut now = 0.0;
            while wheel.is_spinning() {
                now += 1.0;
                if advance(&mut wheel, now).tick {
                    ticks += 1;
                }
            }

            let expected = (travel / arc_size(count)).floor() as u32;
            assert_eq!(ticks, expected, "{} items, travel {}", count, travel);
        }
    }

    #[test]
    fn test_rotation_accumulates_across_spins() {
        let mut wheel = wheel_with("A\nB\nC");
        let mut rng = Pcg32::seed_from_u64(99);
        let tuning = SpinTuning::default();

        let SpinRequest::Started { travel: first } =
            request_spin(&mut wheel, 0.0, &tuning, &mut rng)
        else {
            panic!("first spin");
        };
        run_to_idle(&mut wheel, 0.0);

        let SpinRequest::Started { travel: second } =
            request_spin(&mut wheel, 10_000.0, &tuning, &mut rng)
        else {
            panic!("second spin");
        };
        run_to_idle(&mut wheel, 10_000.0);

        assert!((wheel.current_rotation() - (first + second)).abs() < 1e-9);
        assert_eq!(wheel.active_items().len(), 1);
    }

    #[test]
    fn test_busy_request_changes_nothing() {
        let mut wheel = wheel_with("A\nB");
        let mut rng = Pcg32::seed_from_u64(1);
        let tuning = SpinTuning::default();

        request_spin(&mut wheel, 0.0, &tuning, &mut rng);
        advance(&mut wheel, 100.0);
        let phase = *wheel.phase();

        assert_eq!(
            request_spin(&mut wheel, 200.0, &tuning, &mut rng),
            SpinRequest::Busy
        );
        assert_eq!(*wheel.phase(), phase);
        assert_eq!(wheel.current_rotation(), 0.0);
        assert_eq!(wheel.active_items().len(), 2);
    }

    #[test]
    fn test_empty_wheel_does_not_spin() {
        let mut wheel = wheel_with("");
        let mut rng = Pcg32::seed_from_u64(1);
        assert_eq!(
            request_spin(&mut wheel, 0.0, &SpinTuning::default(), &mut rng),
            SpinRequest::Empty
        );
        assert!(!wheel.is_spinning());
    }

    #[test]
    fn test_settle_waits_for_delay() {
        let mut wheel = wheel_with("A\nB");
        let mut rng = Pcg32::seed_from_u64(3);
        let tuning = SpinTuning::default();
        request_spin(&mut wheel, 0.0, &tuning, &mut rng);

        let landed = advance(&mut wheel, 5000.0);
        assert!(matches!(landed.event, Some(SpinEvent::Landed { .. })));
        assert!(matches!(wheel.phase(), SpinPhase::Settling { .. }));

        assert_eq!(advance(&mut wheel, 6100.0).event, None);
        assert_eq!(wheel.active_items().len(), 2);
        assert!(wheel.is_spinning());

        let settled = advance(&mut wheel, 6200.0);
        assert!(matches!(
            settled.event,
            Some(SpinEvent::Settled { remaining: 1, .. })
        ));
        assert!(!wheel.is_spinning());
    }

    #[test]
    fn test_list_cleared_while_settling_is_safe() {
        let mut wheel = wheel_with("A\nB\nC\nD");
        let mut rng = Pcg32::seed_from_u64(11);
        request_spin(&mut wheel, 0.0, &SpinTuning::default(), &mut rng);
        advance(&mut wheel, 5000.0);

        wheel.clear_active();
        let frame = advance(&mut wheel, 7000.0);
        assert_eq!(
            frame.event,
            Some(SpinEvent::Settled {
                removed: None,
                remaining: 0
            })
        );
        assert!(!wheel.is_spinning());
    }

    #[test]
    fn test_zero_duration_lands_on_first_frame() {
        let mut wheel = wheel_with("A\nB");
        let mut rng = Pcg32::seed_from_u64(5);
        let tuning = SpinTuning {
            duration_ms: 0.0,
            settle_delay_ms: 0.0,
            ..Default::default()
        };
        request_spin(&mut wheel, 0.0, &tuning, &mut rng);
        let frame = advance(&mut wheel, 0.0);
        assert!(matches!(frame.event, Some(SpinEvent::Landed { .. })));
        assert!(matches!(
            advance(&mut wheel, 0.0).event,
            Some(SpinEvent::Settled { remaining: 1, .. })
        ));
    }

    #[test]
    fn test_idle_frame_is_still() {
        let mut wheel = wheel_with("A");
        wheel.current_rotation = 42.0;
        assert_eq!(
            advance(&mut wheel, 1.0),
            Frame {
                rotation: 42.0,
                tick: false,
                event: None
            }
        );
    }
}
