#[cfg(test)]
mod tests {
    use std::time::Duration;

    use myrtio_lamp::random::{RandomSource, XorShiftRandom};
    use myrtio_lamp::{Instant, LampConfig, LampMode, LampOutput, LampScheduler, Timestamp};

    struct NullOutput;

    impl LampOutput for NullOutput {
        fn set_level(&mut self, _on: bool) {}
        fn switch_pin(&mut self, _pin: u8, _on: bool) {}
    }

    fn first_values(random: &mut XorShiftRandom) -> [u64; 4] {
        core::array::from_fn(|_| random.next_u64())
    }

    /// Steady and flicker intervals of the first bursts, with power switched
    /// on at `start`
    fn bzzz_intervals(seed: u64, start: u32) -> Vec<u32> {
        let mut lamp = LampScheduler::new(LampConfig::default(), NullOutput, XorShiftRandom::new(seed));
        lamp.set_mode(LampMode::Bzzz);
        lamp.set_power(true);

        let mut intervals = Vec::new();
        let mut deadline = None;
        for t in start..start + 60_000 {
            lamp.advance(Timestamp::from_millis(t));
            let next = lamp.state().next_deadline();
            if next != deadline {
                intervals.extend(next.map(|d| d.as_millis() - t));
                deadline = next;
            }
        }
        intervals
    }

    #[test]
    fn test_random_stays_in_range() {
        let mut random = XorShiftRandom::new(42);
        let mut seen = [false; 4];
        for _ in 0..1_000 {
            let value = random.next_in_range(3, 6);
            assert!((3..=6).contains(&value));
            seen[(value - 3) as usize] = true;
        }
        assert!(seen.iter().all(|&hit| hit));
    }

    #[test]
    fn test_random_degenerate_range() {
        let mut random = XorShiftRandom::new(0);
        assert_eq!(random.next_in_range(7, 7), 7);
        assert_eq!(random.next_in_range(9, 2), 9);
    }

    #[test]
    fn test_random_is_seeded() {
        let mut a = XorShiftRandom::new(1);
        let mut b = XorShiftRandom::new(1);
        let mut c = XorShiftRandom::new(2);
        assert_eq!(first_values(&mut a), first_values(&mut b));
        assert_ne!(first_values(&mut a), first_values(&mut c));
    }

    #[test]
    fn test_mixed_entropy_changes_sequence() {
        let mut a = XorShiftRandom::new(7);
        let mut b = XorShiftRandom::new(7);
        a.mix_entropy(1_000);
        b.mix_entropy(1_001);
        assert_ne!(first_values(&mut a), first_values(&mut b));

        // Zero entropy still moves the generator on
        let mut c = XorShiftRandom::new(7);
        let mut d = XorShiftRandom::new(7);
        c.mix_entropy(0);
        assert_ne!(first_values(&mut c), first_values(&mut d));
    }

    #[test]
    fn test_clock_readings_diverge() {
        let first_ticks = Instant::now().as_ticks();
        let mut early = XorShiftRandom::with_clock(5);
        std::thread::sleep(Duration::from_millis(5));
        let mut late = XorShiftRandom::with_clock(5);
        assert!(Instant::now().as_ticks() > first_ticks);
        assert_ne!(first_values(&mut early), first_values(&mut late));
    }

    #[test]
    fn test_platform_seed_is_used() {
        let mut a = XorShiftRandom::with_clock(0x1234_5678_9ABC_DEF0);
        let mut b = XorShiftRandom::with_clock(0x0FED_CBA9_8765_4321);
        assert_ne!(first_values(&mut a), first_values(&mut b));
    }

    #[test]
    fn test_bzzz_schedule_depends_on_start_time() {
        let at_boot = bzzz_intervals(99, 0);
        let later = bzzz_intervals(99, 1_234);
        assert!(at_boot.len() > 5);
        assert_ne!(at_boot, later);

        // Same seed and start time replay the same schedule
        assert_eq!(at_boot, bzzz_intervals(99, 0));
    }
}
