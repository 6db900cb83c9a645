mod tests {
    use myrtio_light_fx::color::{BLACK, BLUE, GREEN, RED};
    use myrtio_light_fx::{
        ConfigStatus, Duration, EffectContext, Engine, EngineConfig, EngineState, Instant,
        ModeId, OutputDriver, PixelBuffer, Rgb, Segment,
    };

    #[derive(Default)]
    struct Recorder {
        frames: Vec<Vec<Rgb>>,
        brightness: u8,
    }

    impl Recorder {
        fn flushes(&self) -> usize {
            self.frames.len()
        }
    }

    impl OutputDriver for Recorder {
        fn write(&mut self, colors: &[Rgb], brightness: u8) {
            self.frames.push(colors.to_vec());
            self.brightness = brightness;
        }
    }

    type TestEngine = Engine<'static, Recorder, 16>;

    fn engine(length: u16, mode: ModeId) -> TestEngine {
        Engine::new(
            Recorder::default(),
            &EngineConfig {
                length,
                mode,
                ..EngineConfig::default()
            },
        )
    }

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    fn pixels(engine: &TestEngine) -> Vec<u32> {
        let buffer = engine.buffer();
        (0..buffer.len()).map(|index| buffer.pixel(index)).collect()
    }

    fn green_effect(ctx: &mut EffectContext<'_>) -> Duration {
        ctx.fill(GREEN);
        Duration::from_millis(100)
    }

    #[test]
    fn test_new_engine_is_stopped_with_one_segment() {
        let engine = engine(10, ModeId::STATIC);
        assert_eq!(engine.state(), EngineState::Stopped);
        assert_eq!(engine.num_segments(), 1);
        assert_eq!(engine.length(), 10);
        let segment = engine.segment(0).unwrap();
        assert_eq!((segment.start, segment.stop), (0, 9));
        assert_eq!(engine.brightness(), 50);
    }

    #[test]
    fn test_stopped_engine_does_not_render() {
        let mut engine = engine(10, ModeId::STATIC);
        let report = engine.service(at(0));
        assert!(!report.flushed);
        assert_eq!(report.executed, 0);
        assert_eq!(engine.output().flushes(), 0);
    }

    #[test]
    fn test_static_fills_segment_and_flushes_once() {
        let mut engine = engine(10, ModeId::STATIC);
        engine.start();
        let report = engine.service(at(0));
        assert!(report.flushed);
        assert_eq!(report.executed, 1);
        assert_eq!(engine.output().flushes(), 1);
        assert!(pixels(&engine).iter().all(|&color| color == RED));
        assert!(engine.is_frame(0));
        assert_eq!(report.sleep_duration, Duration::from_millis(1000));
    }

    #[test]
    fn test_overlap_highest_segment_wins() {
        let mut engine = engine(15, ModeId::STATIC);
        engine.set_segment(
            0,
            Segment {
                start: 0,
                stop: 9,
                colors: [RED, 0, 0],
                ..Segment::default()
            },
        );
        engine.set_segment(
            1,
            Segment {
                start: 5,
                stop: 14,
                colors: [BLUE, 0, 0],
                ..Segment::default()
            },
        );
        engine.start();
        let report = engine.service(at(0));
        assert_eq!(report.executed, 2);
        assert_eq!(engine.output().flushes(), 1);
        assert_eq!(engine.buffer().pixel(4), RED);
        assert_eq!(engine.buffer().pixel(7), BLUE);
    }

    #[test]
    fn test_service_without_due_segment_is_idempotent() {
        let mut engine = engine(10, ModeId::STATIC);
        engine.start();
        engine.service(at(0));
        let before = pixels(&engine);

        let report = engine.service(at(10));
        assert!(!report.flushed);
        assert_eq!(report.executed, 0);
        assert_eq!(engine.output().flushes(), 1);
        assert_eq!(pixels(&engine), before);
        assert!(!engine.is_frame(0));
        assert_eq!(report.sleep_duration, Duration::from_millis(990));
    }

    #[test]
    fn test_color_wipe_lights_one_pixel_per_call() {
        let mut engine = engine(10, ModeId::COLOR_WIPE);
        engine.start();

        for call in 0..10u16 {
            let report = engine.service(at(u64::from(call) * 50));
            assert_eq!(report.executed, 1, "call {call}");
            assert_eq!(report.sleep_duration, Duration::from_millis(50));
            for index in 0..10 {
                let expected = if index <= call { RED } else { BLACK };
                assert_eq!(engine.buffer().pixel(index), expected, "call {call} pixel {index}");
            }
        }
        assert_eq!(engine.output().flushes(), 10);
    }

    #[test]
    fn test_pause_resume_matches_not_servicing() {
        let mut steady = engine(10, ModeId::SINGLE_DYNAMIC);
        let mut paused = engine(10, ModeId::SINGLE_DYNAMIC);
        steady.start();
        paused.start();

        steady.service(at(0));
        paused.service(at(0));

        assert_eq!(paused.pause(), ConfigStatus::Applied);
        assert!(!paused.service(at(500)).flushed);
        assert!(!paused.service(at(1500)).flushed);
        assert_eq!(paused.resume(), ConfigStatus::Applied);

        steady.service(at(2000));
        paused.service(at(2000));

        assert_eq!(pixels(&steady), pixels(&paused));
        assert_eq!(steady.runtime(0), paused.runtime(0));
        assert_eq!(paused.runtime(0).unwrap().counter_mode_call, 2);
    }

    #[test]
    fn test_pause_and_resume_reject_wrong_state() {
        let mut engine = engine(10, ModeId::STATIC);
        assert_eq!(engine.pause(), ConfigStatus::Rejected);
        assert_eq!(engine.resume(), ConfigStatus::Rejected);
        assert_eq!(engine.last_status(), ConfigStatus::Rejected);
        engine.start();
        assert_eq!(engine.resume(), ConfigStatus::Rejected);
        assert_eq!(engine.state(), EngineState::Running);
    }

    #[test]
    fn test_trigger_forces_immediate_run() {
        let mut engine = engine(10, ModeId::STATIC);
        engine.start();
        engine.service(at(0));
        assert_eq!(engine.service(at(10)).executed, 0);

        engine.trigger();
        assert_eq!(engine.service(at(20)).executed, 1);
        assert_eq!(engine.service(at(30)).executed, 0);
    }

    #[test]
    fn test_trigger_waits_while_paused() {
        let mut engine = engine(10, ModeId::STATIC);
        engine.start();
        engine.service(at(0));
        engine.pause();
        engine.trigger();
        assert_eq!(engine.service(at(10)).executed, 0);
        engine.resume();
        assert_eq!(engine.service(at(20)).executed, 1);
    }

    #[test]
    fn test_set_mode_resets_runtime() {
        let mut engine = engine(10, ModeId::COLOR_WIPE);
        engine.start();
        for call in 0..4 {
            engine.service(at(call * 50));
        }
        assert_eq!(engine.runtime(0).unwrap().counter_mode_call, 4);

        assert_eq!(engine.set_mode(ModeId::BLINK), ConfigStatus::Applied);
        let runtime = engine.runtime(0).unwrap();
        assert_eq!(runtime.counter_mode_call, 0);
        assert_eq!(runtime.counter_mode_step, 0);
        assert_eq!(engine.mode(), ModeId::BLINK);
        assert_eq!(engine.mode_name(engine.mode()), "Blink");
    }

    #[test]
    fn test_set_segment_orders_and_clamps_range() {
        let mut engine = engine(10, ModeId::STATIC);
        let status = engine.set_segment(
            0,
            Segment {
                start: 12,
                stop: 3,
                ..Segment::default()
            },
        );
        assert_eq!(status, ConfigStatus::Clamped);
        let segment = engine.segment(0).unwrap();
        assert!(segment.stop >= segment.start);
        assert_eq!((segment.start, segment.stop), (3, 9));
    }

    #[test]
    fn test_set_segment_rejects_bad_index() {
        let mut engine = engine(10, ModeId::STATIC);
        assert_eq!(engine.set_segment(30, Segment::default()), ConfigStatus::Rejected);
        assert_eq!(engine.set_segment_speed(40, 100), ConfigStatus::Rejected);
        assert_eq!(engine.last_status(), ConfigStatus::Rejected);
        assert_eq!(engine.num_segments(), 1);
    }

    #[test]
    fn test_speed_is_clamped() {
        let mut engine = engine(10, ModeId::STATIC);
        assert_eq!(engine.set_speed(0), ConfigStatus::Clamped);
        assert_eq!(engine.speed(), 2);
        assert_eq!(engine.increase_speed(98), ConfigStatus::Applied);
        assert_eq!(engine.speed(), 100);
        assert_eq!(engine.decrease_speed(500), ConfigStatus::Clamped);
        assert_eq!(engine.speed(), 2);
        engine.set_speed(u16::MAX - 10);
        assert_eq!(engine.increase_speed(50), ConfigStatus::Applied);
        assert_eq!(engine.speed(), u16::MAX);
    }

    #[test]
    fn test_brightness_is_passed_to_driver() {
        let mut engine = engine(10, ModeId::STATIC);
        engine.set_brightness(77);
        engine.start();
        engine.service(at(0));
        assert_eq!(engine.output().brightness, 77);

        engine.increase_brightness(250);
        assert_eq!(engine.brightness(), 255);
        engine.decrease_brightness(5);
        assert_eq!(engine.brightness(), 250);
    }

    #[test]
    fn test_stop_clears_and_flushes() {
        let mut engine = engine(10, ModeId::STATIC);
        engine.start();
        engine.service(at(0));
        engine.stop();

        assert_eq!(engine.state(), EngineState::Stopped);
        assert_eq!(engine.output().flushes(), 2);
        let last = engine.output().frames.last().unwrap();
        assert!(last.iter().all(|pixel| *pixel == Rgb::default()));
        assert!(!engine.service(at(2000)).flushed);
    }

    #[test]
    fn test_strip_off_keeps_running() {
        let mut engine = engine(10, ModeId::STATIC);
        engine.start();
        engine.service(at(0));
        engine.strip_off();
        assert_eq!(engine.intensity_sum(), 0);
        assert!(engine.is_running());
        engine.service(at(1000));
        assert_eq!(engine.intensity_sum(), 255 * 10);
    }

    #[test]
    fn test_set_length_clamps_and_shrinks_segments() {
        let mut engine = engine(10, ModeId::STATIC);
        assert_eq!(engine.set_length(100), ConfigStatus::Clamped);
        assert_eq!(engine.length(), 16);

        assert_eq!(engine.set_length(8), ConfigStatus::Applied);
        assert_eq!(engine.segment(0).unwrap().stop, 7);
        engine.decrease_length(20);
        assert_eq!(engine.length(), 1);
        engine.increase_length(3);
        assert_eq!(engine.length(), 4);
    }

    #[test]
    fn test_num_segments_limits_evaluation() {
        let mut engine = engine(10, ModeId::STATIC);
        engine.set_segment(
            1,
            Segment {
                start: 5,
                stop: 9,
                colors: [BLUE, 0, 0],
                ..Segment::default()
            },
        );
        assert_eq!(engine.num_segments(), 2);
        engine.set_num_segments(1);
        engine.start();
        engine.service(at(0));
        assert_eq!(engine.buffer().pixel(7), RED);
        assert_eq!(engine.set_num_segments(0), ConfigStatus::Clamped);
        assert_eq!(engine.num_segments(), 1);
    }

    #[test]
    fn test_reset_segments_restores_default() {
        let mut engine = engine(10, ModeId::BLINK);
        engine.set_segment(2, Segment::default());
        engine.reset_segments();
        assert_eq!(engine.num_segments(), 1);
        let segment = engine.segment(0).unwrap();
        assert_eq!(segment.mode, ModeId::STATIC);
        assert_eq!((segment.start, segment.stop), (0, 9));
    }

    #[test]
    fn test_unregistered_custom_slot_idles() {
        let mut engine = engine(10, ModeId::custom(3));
        engine.start();
        let report = engine.service(at(0));
        assert_eq!(report.executed, 1);
        assert_eq!(report.sleep_duration, Duration::from_millis(1000));
        assert_eq!(engine.intensity_sum(), 0);
    }

    #[test]
    fn test_registered_custom_mode_runs() {
        let mut engine = engine(10, ModeId::STATIC);
        let id = engine.register_custom_mode("Green", green_effect);
        assert_eq!(engine.parse_mode("Green"), Some(id));
        engine.set_mode(id);
        engine.start();
        let report = engine.service(at(0));
        assert_eq!(report.sleep_duration, Duration::from_millis(100));
        assert_eq!(engine.buffer().pixel(3), GREEN);
    }

    #[test]
    fn test_cycle_flag_reported() {
        let mut engine = engine(4, ModeId::COLOR_WIPE);
        engine.set_speed(80);
        engine.start();
        let mut cycles = 0;
        for call in 0..8 {
            engine.service(at(call * 10));
            if engine.is_cycle(0) {
                cycles += 1;
            }
        }
        assert_eq!(cycles, 1);
        assert!(engine.is_cycle(0));
    }

    #[test]
    fn test_clock_wraparound() {
        let mut engine = engine(10, ModeId::STATIC);
        engine.start();
        let before_wrap = u64::from(u32::MAX) - 100;
        assert_eq!(engine.service(at(before_wrap)).executed, 1);
        assert_eq!(engine.service(at(before_wrap + 500)).executed, 0);
        assert_eq!(engine.service(at(before_wrap + 1000)).executed, 1);
    }

    #[test]
    fn test_minimum_delay_applied() {
        let mut engine = engine(10, ModeId::STATIC);
        engine.set_speed(2);
        engine.start();
        engine.service(at(0));
        assert_eq!(engine.service(at(1)).executed, 0);
        assert_eq!(engine.service(at(2)).executed, 1);
    }

    #[test]
    fn test_set_color_keeps_other_colors() {
        let mut engine = engine(10, ModeId::STATIC);
        assert_eq!(engine.set_color(BLUE), ConfigStatus::Applied);
        assert_eq!(engine.color(), BLUE);
        let colors = engine.segment(0).unwrap().colors;
        assert_eq!(colors[0], BLUE);
        assert_eq!(colors[1], BLACK);
    }

    #[test]
    fn test_set_custom_mode_slot() {
        let mut engine = engine(10, ModeId::STATIC);
        assert_eq!(engine.mode_count(), 122);
        assert_eq!(engine.set_custom_mode(2, "Green", green_effect), ConfigStatus::Applied);
        assert_eq!(engine.mode_name(ModeId::custom(2)), "Green");
        assert_eq!(engine.set_custom_mode(40, "Last", green_effect), ConfigStatus::Clamped);
        assert_eq!(engine.mode_name(ModeId::custom(15)), "Last");

        engine.set_mode(ModeId::custom(2));
        engine.start();
        engine.service(at(0));
        assert_eq!(engine.buffer().pixel(9), GREEN);
    }

    #[test]
    fn test_reset_segment_runtime() {
        let mut engine = engine(10, ModeId::COLOR_WIPE);
        engine.start();
        engine.service(at(0));
        assert!(engine.runtime(0).unwrap().counter_mode_call > 0);
        assert_eq!(engine.reset_segment_runtime(0), ConfigStatus::Applied);
        assert_eq!(engine.runtime(0).unwrap().counter_mode_call, 0);
        assert_eq!(engine.reset_segment_runtime(30), ConfigStatus::Rejected);
    }

    #[test]
    fn test_register_custom_mode_reports_full_table() {
        let mut engine = engine(10, ModeId::STATIC);
        for index in 0..16 {
            assert_eq!(engine.register_custom_mode("Green", green_effect), ModeId::custom(index));
            assert_eq!(engine.last_status(), ConfigStatus::Applied);
        }
        assert_eq!(engine.register_custom_mode("Extra", green_effect), ModeId::LAST);
        assert_eq!(engine.last_status(), ConfigStatus::Clamped);
        assert_eq!(engine.mode_name(ModeId::LAST), "Extra");
    }
}
