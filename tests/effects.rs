mod tests {
    use myrtio_light_fx::color::{BLACK, BLUE, GREEN, RED};
    use myrtio_light_fx::gamma::gamma32;
    use myrtio_light_fx::registry::BUILTIN_MODE_COUNT;
    use myrtio_light_fx::{
        Engine, EngineConfig, FadeRate, Instant, ModeId, OutputDriver, PixelBuffer, Rgb, Segment,
        SegmentOptions, SegmentSize,
    };

    const STRIP: u16 = 24;

    struct NullDriver;

    impl OutputDriver for NullDriver {
        fn write(&mut self, _colors: &[Rgb], _brightness: u8) {}
    }

    type TestEngine = Engine<'static, NullDriver, 24>;

    fn engine_with(segment: Segment) -> TestEngine {
        let mut engine = Engine::new(
            NullDriver,
            &EngineConfig {
                length: STRIP,
                seed: 11,
                ..EngineConfig::default()
            },
        );
        engine.set_segment(0, segment);
        engine.start();
        engine
    }

    fn count(engine: &TestEngine, color: u32) -> usize {
        let buffer = engine.buffer();
        (0..buffer.len())
            .filter(|&index| buffer.pixel(index) == color)
            .count()
    }

    fn variants() -> [(u16, u16, u16, SegmentOptions, [u32; 3]); 4] {
        [
            (4, 15, 1000, SegmentOptions::default(), [RED, BLUE, GREEN]),
            (
                2,
                20,
                60,
                SegmentOptions {
                    reverse: true,
                    fade_rate: FadeRate::Glacial,
                    gamma: true,
                    size: SegmentSize::XLarge,
                },
                [RED, BLACK, BLUE],
            ),
            (
                7,
                7,
                2,
                SegmentOptions {
                    size: SegmentSize::Medium,
                    ..SegmentOptions::default()
                },
                [GREEN, RED, BLUE],
            ),
            (
                0,
                STRIP - 1,
                2,
                SegmentOptions {
                    fade_rate: FadeRate::XFast,
                    size: SegmentSize::Large,
                    ..SegmentOptions::default()
                },
                [BLACK, BLACK, BLACK],
            ),
        ]
    }

    #[test]
    fn test_every_builtin_stays_inside_its_segment() {
        for raw in 0..BUILTIN_MODE_COUNT as u8 {
            let mode = ModeId::from_raw(raw).unwrap();
            for (start, stop, speed, options, colors) in variants() {
                let mut engine = engine_with(Segment {
                    start,
                    stop,
                    mode,
                    speed,
                    options,
                    colors,
                });

                for call in 0..150u64 {
                    if call % 17 == 0 {
                        engine.trigger();
                    }
                    engine.set_level((call * 37 % 256) as u8);
                    engine.service(Instant::from_millis(call * 5));
                }

                let buffer = engine.buffer();
                for index in (0..start).chain(stop + 1..STRIP) {
                    assert_eq!(
                        buffer.pixel(index),
                        BLACK,
                        "mode {} wrote pixel {index} outside {start}..={stop}",
                        engine.mode_name(mode)
                    );
                }
            }
        }
    }

    #[test]
    fn test_same_seed_same_animation() {
        let segment = Segment {
            start: 0,
            stop: 23,
            mode: ModeId::TWINKLE_RANDOM,
            speed: 200,
            ..Segment::default()
        };
        let mut first = engine_with(segment);
        let mut second = engine_with(segment);
        for call in 0..40 {
            first.service(Instant::from_millis(call * 10));
            second.service(Instant::from_millis(call * 10));
            assert_eq!(first.buffer().as_rgb(), second.buffer().as_rgb());
        }
    }

    #[test]
    fn test_reverse_wipe_starts_at_stop() {
        let mut engine = engine_with(Segment {
            start: 0,
            stop: 9,
            mode: ModeId::COLOR_WIPE,
            options: SegmentOptions {
                reverse: true,
                ..SegmentOptions::default()
            },
            ..Segment::default()
        });
        engine.service(Instant::from_millis(0));
        assert_eq!(engine.buffer().pixel(9), RED);
        assert_eq!(engine.buffer().pixel(0), BLACK);
    }

    #[test]
    fn test_gamma_option_corrects_pixels() {
        let color = 0x0080_4020;
        let mut engine = engine_with(Segment {
            start: 0,
            stop: 3,
            options: SegmentOptions {
                gamma: true,
                ..SegmentOptions::default()
            },
            colors: [color, 0, 0],
            ..Segment::default()
        });
        engine.service(Instant::from_millis(0));
        assert_eq!(engine.buffer().pixel(2), gamma32(color));
    }

    #[test]
    fn test_white_channel_folds_into_rgb() {
        let mut engine = engine_with(Segment {
            start: 0,
            stop: 3,
            colors: [0x4000_8000, 0, 0],
            ..Segment::default()
        });
        engine.service(Instant::from_millis(0));
        assert_eq!(engine.buffer().pixel(0), 0x0040_C040);
    }

    #[test]
    fn test_fireworks_burst_on_trigger() {
        let mut engine = engine_with(Segment {
            start: 0,
            stop: 23,
            mode: ModeId::FIREWORKS,
            ..Segment::default()
        });
        engine.trigger();
        engine.service(Instant::from_millis(0));
        assert!(count(&engine, RED) >= 1);
    }

    #[test]
    fn test_vu_meter_follows_level() {
        let mut engine = engine_with(Segment {
            start: 0,
            stop: 9,
            mode: ModeId::VU_METER,
            colors: [BLUE, 0, 0],
            ..Segment::default()
        });
        engine.service(Instant::from_millis(0));
        assert_eq!(engine.intensity_sum(), 0);

        engine.set_level(255);
        engine.service(Instant::from_millis(100));
        assert_eq!(engine.buffer().pixel(0), GREEN);
        assert_eq!(engine.buffer().pixel(9), BLUE);
        assert_eq!(count(&engine, BLACK), 14);
    }

    #[test]
    fn test_block_dissolve_changes_one_pixel_per_call() {
        let mut engine = engine_with(Segment {
            start: 0,
            stop: 9,
            mode: ModeId::BLOCK_DISSOLVE,
            ..Segment::default()
        });
        engine.service(Instant::from_millis(0));
        assert_eq!(count(&engine, RED), 1);
    }

    #[test]
    fn test_filler_up_first_drop_lands_at_bottom() {
        let mut engine = engine_with(Segment {
            start: 0,
            stop: 9,
            mode: ModeId::FILLERUP,
            ..Segment::default()
        });
        engine.service(Instant::from_millis(0));
        assert_eq!(engine.buffer().pixel(9), RED);

        for call in 1..10 {
            engine.service(Instant::from_millis(call * 100));
        }
        assert_eq!(engine.buffer().pixel(0), RED);
        assert_eq!(count(&engine, RED), 1);
    }

    #[test]
    fn test_heartbeat_starts_on_the_beat() {
        let mut engine = engine_with(Segment {
            start: 0,
            stop: 9,
            mode: ModeId::HEARTBEAT,
            ..Segment::default()
        });
        engine.service(Instant::from_millis(0));
        assert_eq!(count(&engine, RED), 10);
    }

    #[test]
    fn test_bouncing_balls_start_on_the_ground() {
        let mut engine = engine_with(Segment {
            start: 0,
            stop: 23,
            mode: ModeId::BOUNCING_BALLS,
            ..Segment::default()
        });
        engine.service(Instant::from_millis(0));
        assert_eq!(engine.buffer().pixel(0), RED);
    }

    fn random_chase_pixels(gamma: bool) -> Vec<u32> {
        let mut engine = engine_with(Segment {
            start: 0,
            stop: 9,
            options: SegmentOptions {
                gamma,
                ..SegmentOptions::default()
            },
            colors: [0x00C0_C0C0, 0, 0],
            ..Segment::default()
        });
        engine.service(Instant::from_millis(0));
        engine.set_mode(ModeId::RANDOM_CHASE);
        for call in 1..=12 {
            engine.service(Instant::from_millis(call * 1000));
        }
        let buffer = engine.buffer();
        (0..10).map(|index| buffer.pixel(index)).collect()
    }

    #[test]
    fn test_random_chase_corrects_gamma_once() {
        let plain = random_chase_pixels(false);
        let corrected = random_chase_pixels(true);
        let expected: Vec<u32> = plain.iter().map(|&color| gamma32(color)).collect();
        assert_eq!(corrected, expected);
    }

    #[test]
    fn test_fade_settles_on_corrected_background() {
        let background = 0x0000_0040;
        let mut engine = engine_with(Segment {
            start: 0,
            stop: 9,
            mode: ModeId::COMET,
            options: SegmentOptions {
                gamma: true,
                fade_rate: FadeRate::XFast,
                ..SegmentOptions::default()
            },
            colors: [RED, background, 0],
            ..Segment::default()
        });
        for call in 0..200 {
            engine.service(Instant::from_millis(call * 100));
        }
        assert_ne!(gamma32(background), background);
        assert!(count(&engine, gamma32(background)) >= 4);
        assert_eq!(count(&engine, background), 0);
    }
}
