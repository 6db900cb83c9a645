mod tests {
    use myrtio_light_fx::Prng;
    use myrtio_light_fx::color::{
        BLACK, BLUE, ColorScheme, GREEN, RED, Rgb, WHITE, blend_colors, color_blend, color_wheel,
        random_wheel_index, wheel_distance,
    };
    use myrtio_light_fx::gamma::{gamma8, gamma32};

    const RED_RGB: Rgb = Rgb { r: 255, g: 0, b: 0 };
    const BLUE_RGB: Rgb = Rgb { r: 0, g: 0, b: 255 };
    const BLACK_RGB: Rgb = Rgb { r: 0, g: 0, b: 0 };
    const WHITE_RGB: Rgb = Rgb {
        r: 255,
        g: 255,
        b: 255,
    };

    #[test]
    fn test_blend_colors() {
        assert_eq!(blend_colors(RED_RGB, BLUE_RGB, 0), RED_RGB);
        assert_eq!(blend_colors(RED_RGB, BLUE_RGB, 255), BLUE_RGB);
        assert_eq!(
            blend_colors(RED_RGB, BLUE_RGB, 128),
            Rgb {
                r: 127,
                g: 0,
                b: 128
            }
        );
        assert_eq!(blend_colors(WHITE_RGB, BLACK_RGB, 255), BLACK_RGB);
        assert_eq!(blend_colors(WHITE_RGB, BLACK_RGB, 0), WHITE_RGB);
    }

    #[test]
    fn test_color_blend_packed() {
        assert_eq!(color_blend(RED, BLUE, 0), RED);
        assert_eq!(color_blend(RED, BLUE, 255), BLUE);
        assert_eq!(color_blend(RED, BLUE, 128), 0x007F_0080);
        // white channel is blended too
        assert_eq!(color_blend(0xFF00_0000, BLACK, 255), BLACK);
        assert_eq!(color_blend(BLACK, 0xFF00_0000, 255), 0xFF00_0000);
    }

    #[test]
    fn test_color_wheel_primaries() {
        assert_eq!(color_wheel(0), RED);
        assert_eq!(color_wheel(85), GREEN);
        assert_eq!(color_wheel(170), BLUE);
    }

    #[test]
    fn test_color_wheel_wraps_back_to_red() {
        assert_eq!(color_wheel(255), color_wheel(0));
        assert_eq!(color_wheel(0u8.wrapping_sub(1)), RED);
    }

    #[test]
    fn test_color_wheel_channels_sum_to_full() {
        for pos in 0..=255u8 {
            let color = color_wheel(pos);
            let sum = (color >> 16 & 0xFF) + (color >> 8 & 0xFF) + (color & 0xFF);
            assert_eq!(sum, 255, "pos {pos}");
        }
    }

    #[test]
    fn test_gamma8_endpoints() {
        assert_eq!(gamma8(0), 0);
        assert_eq!(gamma8(255), 255);
    }

    #[test]
    fn test_gamma8_monotone() {
        for value in 0..255u8 {
            assert!(gamma8(value) <= gamma8(value + 1), "value {value}");
        }
    }

    #[test]
    fn test_gamma32_per_channel() {
        assert_eq!(gamma32(WHITE), WHITE);
        assert_eq!(gamma32(0xFFFF_FFFF), 0xFFFF_FFFF);
        assert_eq!(gamma32(BLACK), BLACK);
        let half = gamma8(128);
        assert_eq!(gamma32(0x0080_0000), u32::from(half) << 16);
    }

    #[test]
    fn test_wheel_distance_is_circular() {
        assert_eq!(wheel_distance(0, 0), 0);
        assert_eq!(wheel_distance(10, 52), 42);
        assert_eq!(wheel_distance(250, 5), 10);
        assert_eq!(wheel_distance(5, 250), 10);
    }

    #[test]
    fn test_random_wheel_index_moves_away() {
        let mut rng = Prng::new(7);
        let mut previous = 0;
        for _ in 0..200 {
            let next = random_wheel_index(&mut rng, previous);
            assert!(wheel_distance(previous, next) >= 42);
            previous = next;
        }
    }

    #[test]
    fn test_prng_is_reproducible() {
        let mut a = Prng::new(42);
        let mut b = Prng::new(42);
        for _ in 0..32 {
            assert_eq!(a.random16(), b.random16());
        }

        a.reseed(1);
        b.reseed(1);
        assert_eq!(a.random8(), b.random8());
    }

    #[test]
    fn test_prng_bounds() {
        let mut rng = Prng::new(3);
        for _ in 0..500 {
            assert!(rng.random8_below(6) < 6);
            assert!(rng.random16_below(300) < 300);
            let value = rng.random16_between(10, 20);
            assert!((10..20).contains(&value));
        }
        assert_eq!(rng.random8_below(0), 0);
        assert_eq!(rng.random16_between(5, 5), 5);
    }

    #[test]
    fn test_scheme_modulation() {
        assert_eq!(ColorScheme::Warm.modulation(), 150);
        assert_eq!(ColorScheme::Cool.modulation(), 60);
        assert_eq!(ColorScheme::Nature.modulation(), 50);
        assert_eq!(ColorScheme::Candy.modulation(), 40);
        assert!(ColorScheme::Christmas.modulation() < 0);
    }

    #[test]
    fn test_christmas_scheme_uses_palette() {
        assert_eq!(ColorScheme::Christmas.color(0), RED);
        assert_eq!(ColorScheme::from_raw(4), Some(ColorScheme::Christmas));
        assert_eq!(ColorScheme::from_raw(5), None);
    }

    #[test]
    fn test_hue_schemes_are_periodic() {
        for scheme in [
            ColorScheme::Warm,
            ColorScheme::Cool,
            ColorScheme::Nature,
            ColorScheme::Candy,
        ] {
            assert_eq!(scheme.color(0), scheme.color(255));
            assert_ne!(scheme.color(0), BLACK);
        }
    }
}
