mod tests {
    use myrtio_light_fx::segment::{MAX_NUM_SEGMENTS, SPEED_MIN, SegmentStore};
    use myrtio_light_fx::{
        ConfigStatus, FadeRate, ModeId, Segment, SegmentOptions, SegmentRuntime, SegmentSize,
    };

    fn segment(start: u16, stop: u16) -> Segment {
        Segment {
            start,
            stop,
            ..Segment::default()
        }
    }

    #[test]
    fn test_options_bit_layout() {
        let options = SegmentOptions {
            reverse: true,
            fade_rate: FadeRate::Medium,
            gamma: true,
            size: SegmentSize::Large,
        };
        assert_eq!(options.to_bits(), 0x80 | 0x30 | 0x08 | 0x04);
        assert_eq!(SegmentOptions::from_bits(0xBC), options);
    }

    #[test]
    fn test_options_ignore_reserved_bit() {
        assert_eq!(SegmentOptions::from_bits(0x01), SegmentOptions::default());
        assert_eq!(SegmentOptions::default().to_bits(), 0);
    }

    #[test]
    fn test_size_pixels() {
        assert_eq!(SegmentSize::Small.pixels(), 1);
        assert_eq!(SegmentSize::Medium.pixels(), 2);
        assert_eq!(SegmentSize::Large.pixels(), 4);
        assert_eq!(SegmentSize::XLarge.pixels(), 8);
    }

    #[test]
    fn test_normalize_swaps_inverted_range() {
        let mut inverted = segment(8, 2);
        assert!(inverted.normalize(10));
        assert_eq!((inverted.start, inverted.stop), (2, 8));
        assert_eq!(inverted.len(), 7);
    }

    #[test]
    fn test_normalize_clamps_into_strip() {
        let mut outside = segment(20, 40);
        assert!(outside.normalize(10));
        assert_eq!((outside.start, outside.stop), (9, 9));

        let mut fitting = segment(0, 9);
        assert!(!fitting.normalize(10));
    }

    #[test]
    fn test_normalize_clamps_speed() {
        let mut slow = Segment {
            speed: 0,
            ..segment(0, 4)
        };
        assert!(slow.normalize(10));
        assert_eq!(slow.speed, SPEED_MIN);
    }

    #[test]
    fn test_store_rejects_bad_index() {
        let mut store = SegmentStore::new();
        let status = store.set(MAX_NUM_SEGMENTS, segment(0, 1), 10);
        assert_eq!(status, ConfigStatus::Rejected);
        assert_eq!(store.active(), 1);
        assert!(store.get(MAX_NUM_SEGMENTS).is_none());
    }

    #[test]
    fn test_store_set_grows_active_count() {
        let mut store = SegmentStore::new();
        assert_eq!(store.set(3, segment(0, 1), 10), ConfigStatus::Applied);
        assert_eq!(store.active(), 4);
        assert_eq!(store.set(1, segment(5, 2), 10), ConfigStatus::Clamped);
        assert_eq!(store.active(), 4);
    }

    #[test]
    fn test_store_active_count_clamped() {
        let mut store = SegmentStore::new();
        assert_eq!(store.set_active(0), ConfigStatus::Clamped);
        assert_eq!(store.active(), 1);
        assert_eq!(store.set_active(99), ConfigStatus::Clamped);
        assert_eq!(store.active(), MAX_NUM_SEGMENTS);
        assert_eq!(store.set_active(5), ConfigStatus::Applied);
    }

    #[test]
    fn test_runtime_reset_zeroes_everything() {
        let mut store = SegmentStore::new();
        let runtime = store.runtime_mut(0).unwrap();
        runtime.counter_mode_call = 12;
        runtime.counter_mode_step = 7;
        runtime.aux_param3 = 99;
        runtime.set_frame();
        runtime.set_cycle();

        assert_eq!(store.reset_runtime(0, 500), ConfigStatus::Applied);
        assert_eq!(
            *store.runtime(0).unwrap(),
            SegmentRuntime {
                next_time: 500,
                ..SegmentRuntime::default()
            }
        );
        assert_eq!(store.reset_runtime(MAX_NUM_SEGMENTS, 0), ConfigStatus::Rejected);
    }

    #[test]
    fn test_runtime_flags() {
        let mut runtime = SegmentRuntime::default();
        runtime.aux_param2 = 0x01;
        runtime.set_cycle();
        assert!(runtime.is_cycle());
        assert!(!runtime.is_frame());
        assert_eq!(runtime.aux_param2, SegmentRuntime::CYCLE | 0x01);
    }

    #[test]
    fn test_default_segment_is_static() {
        let default = Segment::default();
        assert_eq!(default.mode, ModeId::STATIC);
        assert_eq!(default.colors[0], 0xFF0000);
    }
}
