mod tests {
    use ws2812_bitbang::chip::{CycleCalibration, Esp32, Esp32S3, Esp32S3FixedLoop, Esp8266};
    use ws2812_bitbang::timing::{MIN_TICKS, TOLERANCE_NS, nanos_to_cycles};
    use ws2812_bitbang::{Cycles, Phase, TimingProfile, TimingStrategy};

    /// Pulse widths scoped on hardware for a given set of cycle counts
    struct Bench {
        frequency_mhz: u32,
        ticks: TimingProfile<Cycles>,
        nanos: [u32; 4],
    }

    const fn bench(frequency_mhz: u32, ticks: [u32; 4], nanos: [u32; 4]) -> Bench {
        Bench {
            frequency_mhz,
            ticks: TimingProfile::new(ticks[0], ticks[1], ticks[2], ticks[3]),
            nanos,
        }
    }

    // one high, one low, zero high, zero low
    const ESP32_BENCH: [Bench; 3] = [
        bench(240, [177, 83, 81, 176], [800, 426, 400, 838]),
        bench(160, [113, 47, 49, 108], [774, 464, 424, 812]),
        bench(80, [49, 11, 15, 44], [836, 402, 312, 920]),
    ];

    const ESP32S3_BENCH: [Bench; 3] = [
        bench(240, [181, 93, 81, 180], [812, 450, 400, 814]),
        bench(160, [117, 57, 49, 112], [824, 438, 412, 838]),
        bench(80, [53, 21, 17, 44], [774, 450, 400, 788]),
    ];

    const ESP8266_BENCH: [Bench; 2] = [
        bench(160, [115, 51, 49, 115], [824, 438, 374, 830]),
        bench(80, [51, 15, 17, 47], [850, 424, 350, 876]),
    ];

    /// First phase whose calibrated count differs from a scoped one
    fn bench_mismatch(
        calibrate: impl Fn(u32) -> TimingProfile<Cycles>,
        rows: &[Bench],
    ) -> Option<(u32, Phase)> {
        rows.iter().find_map(|row| {
            let profile = calibrate(row.frequency_mhz);
            Phase::ALL
                .into_iter()
                .find(|&phase| profile.get(phase) != row.ticks.get(phase))
                .map(|phase| (row.frequency_mhz, phase))
        })
    }

    fn assert_matches_bench<S: TimingStrategy<Unit = Cycles>>(rows: &[Bench]) {
        for &frequency_mhz in S::SUPPORTED_MHZ {
            assert!(
                rows.iter().any(|row| row.frequency_mhz == frequency_mhz),
                "{} @ {} MHz has no bench data",
                S::NAME,
                frequency_mhz
            );
        }
        for row in rows {
            for (phase, nanos) in Phase::ALL.into_iter().zip(row.nanos) {
                assert!(
                    phase.within_tolerance(nanos),
                    "{} @ {} MHz: {:?} scoped at {} ns",
                    S::NAME,
                    row.frequency_mhz,
                    phase,
                    nanos
                );
            }
        }
        assert_eq!(bench_mismatch(S::calibrate, rows), None, "{}", S::NAME);
    }

    fn assert_never_underflows<S: TimingStrategy>(max_ticks: impl Fn(Phase, u32) -> u32) {
        for frequency_mhz in 0..=40 {
            let profile = S::calibrate(frequency_mhz);
            for phase in Phase::ALL {
                let ticks = profile.get(phase);
                assert!(ticks >= MIN_TICKS, "{} @ {} MHz", S::NAME, frequency_mhz);
                assert!(
                    ticks <= max_ticks(phase, frequency_mhz).max(MIN_TICKS),
                    "{} @ {} MHz: {:?} wrapped to {}",
                    S::NAME,
                    frequency_mhz,
                    phase,
                    ticks
                );
            }
        }
    }

    fn nominal_cycles(phase: Phase, frequency_mhz: u32) -> u32 {
        nanos_to_cycles(phase.target_ns(), frequency_mhz)
    }

    #[test]
    fn test_calibration_reproduces_scoped_counts() {
        assert_matches_bench::<Esp32>(&ESP32_BENCH);
        assert_matches_bench::<Esp32S3>(&ESP32S3_BENCH);
        assert_matches_bench::<Esp8266>(&ESP8266_BENCH);
    }

    #[test]
    fn test_wrong_overhead_misses_scoped_counts() {
        let wrong = CycleCalibration {
            overhead: TimingProfile::new(60, 60, 60, 60),
            low_clock: None,
        };
        assert_eq!(
            bench_mismatch(|frequency_mhz| wrong.calibrate(frequency_mhz), &ESP32_BENCH),
            Some((240, Phase::OneHigh))
        );

        // the ESP32 table without its 80 MHz correction
        let uncorrected = CycleCalibration {
            overhead: TimingProfile::new(15, 25, 15, 28),
            low_clock: None,
        };
        assert_eq!(
            bench_mismatch(|frequency_mhz| uncorrected.calibrate(frequency_mhz), &ESP32_BENCH),
            Some((80, Phase::ZeroHigh))
        );
    }

    #[test]
    fn test_estimate_tracks_scoped_widths() {
        for row in &ESP32_BENCH {
            for (phase, nanos) in Phase::ALL.into_iter().zip(row.nanos) {
                let estimate = Esp32::to_nanos(phase, row.ticks.get(phase), row.frequency_mhz);
                assert!(estimate.abs_diff(nanos) <= TOLERANCE_NS, "{:?} @ {}", phase, row.frequency_mhz);
            }
        }
    }

    #[test]
    fn test_fixed_loop_estimate_within_tolerance() {
        for &frequency_mhz in Esp32S3FixedLoop::SUPPORTED_MHZ {
            let profile = Esp32S3FixedLoop::calibrate(frequency_mhz);
            for phase in Phase::ALL {
                let nanos = Esp32S3FixedLoop::to_nanos(phase, profile.get(phase), frequency_mhz);
                assert!(phase.within_tolerance(nanos), "{:?} @ {} MHz lasts {} ns", phase, frequency_mhz, nanos);
            }
        }
    }

    #[test]
    fn test_low_frequency_never_underflows() {
        assert_never_underflows::<Esp32>(nominal_cycles);
        assert_never_underflows::<Esp32S3>(nominal_cycles);
        assert_never_underflows::<Esp8266>(nominal_cycles);
        assert_never_underflows::<Esp32S3FixedLoop>(|phase, _| {
            Esp32S3FixedLoop::calibrate(80).get(phase)
        });
    }

    #[test]
    fn test_zero_frequency_clamps_to_minimum() {
        let profile = Esp32::calibrate(0);
        assert_eq!(profile, TimingProfile::<Cycles>::new(MIN_TICKS, MIN_TICKS, MIN_TICKS, MIN_TICKS));
    }

    #[test]
    fn test_cycle_formula() {
        assert_eq!(Esp32S3::calibrate(240), TimingProfile::new(181, 93, 81, 180));
        assert_eq!(Esp32S3::calibrate(80), TimingProfile::new(53, 21, 17, 44));
        assert_eq!(Esp8266::calibrate(80), TimingProfile::new(51, 15, 17, 47));
        assert_eq!(Esp32::calibrate(240), TimingProfile::new(177, 83, 81, 176));
    }

    #[test]
    fn test_esp32_low_clock_correction() {
        let profile = Esp32::calibrate(80);
        // one pulses follow the plain formula
        assert_eq!(profile.one_high, 64 - 15);
        assert_eq!(profile.one_low, 36 - 25);
        // zero pulses are corrected
        assert_eq!(profile.zero_high, 32 - 15 - 2);
        assert_eq!(profile.zero_low, 68 - 28 + 4);

        let profile = Esp32::calibrate(160);
        assert_eq!(profile.zero_high, 64 - 15);
        assert_eq!(profile.zero_low, 136 - 28);
    }

    #[test]
    fn test_unsupported_frequency_is_best_effort() {
        assert!(Esp32S3::is_supported(160));
        assert!(!Esp32S3::is_supported(200));
        assert!(!Esp8266::is_supported(240));

        let profile = Esp32S3::calibrate(200);
        assert!(profile.one_high > profile.zero_high);
        assert!(profile.zero_low > profile.one_low);
    }

    #[test]
    fn test_fixed_loop_table() {
        assert_eq!(Esp32S3FixedLoop::calibrate(240), TimingProfile::new(13, 7, 6, 14));
        assert_eq!(Esp32S3FixedLoop::calibrate(160), TimingProfile::new(12, 7, 6, 13));
        // 120 MHz is scaled from the 160 MHz row
        assert_eq!(Esp32S3FixedLoop::calibrate(120), TimingProfile::new(9, 5, 5, 10));
    }

    #[test]
    fn test_profile_select() {
        let profile = TimingProfile::<Cycles>::new(4, 3, 2, 1);
        assert_eq!((profile.high(true), profile.low(true)), (4, 3));
        assert_eq!((profile.high(false), profile.low(false)), (2, 1));
    }

    #[test]
    fn test_tolerance_window() {
        assert!(Phase::ZeroHigh.within_tolerance(400 - TOLERANCE_NS));
        assert!(Phase::ZeroHigh.within_tolerance(400 + TOLERANCE_NS));
        assert!(!Phase::ZeroHigh.within_tolerance(400 + TOLERANCE_NS + 1));
        assert!(!Phase::OneLow.within_tolerance(0));
    }
}
