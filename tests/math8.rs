mod tests {
    use myrtio_light_fx::math8::{blend8, scale8, sin8, triangle8};

    #[test]
    fn test_scale8() {
        assert_eq!(scale8(255, 128), 128);
        assert_eq!(scale8(0, 128), 0);
        assert_eq!(scale8(128, 128), 64);
        assert_eq!(scale8(128, 255), 128);
        assert_eq!(scale8(128, 0), 0);
    }

    #[test]
    fn test_blend8() {
        assert_eq!(blend8(255, 128, 128), 191);
        assert_eq!(blend8(0, 128, 255), 128);
        assert_eq!(blend8(255, 0, 128), 127);
        assert_eq!(blend8(255, 128, 0), 255);
    }

    #[test]
    fn test_triangle8() {
        assert_eq!(triangle8(0), 0);
        assert_eq!(triangle8(64), 128);
        assert_eq!(triangle8(127), 254);
        assert_eq!(triangle8(128), 254);
        assert_eq!(triangle8(255), 0);
    }

    #[test]
    fn test_sin8_quarters() {
        assert_eq!(sin8(0), 128);
        assert_eq!(sin8(64), 255);
        assert_eq!(sin8(128), 128);
        assert_eq!(sin8(192), 1);
    }

    #[test]
    fn test_sin8_rises_through_first_quarter() {
        for theta in 0..64u8 {
            assert!(sin8(theta) <= sin8(theta + 1), "theta {theta}");
        }
    }
}
