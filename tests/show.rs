mod tests {
    use marquee_lights::color::Rgb;
    use marquee_lights::show::{Show, ShowSlot, ShowSpec, show_seconds, speed_permille};
    use marquee_lights::{Duration, Error, ShowKind};

    const TICK: Duration = Duration::from_millis(10);

    #[test]
    fn test_speed_range() {
        assert_eq!(speed_permille(1.0), Ok(1000));
        assert_eq!(speed_permille(0.2), Ok(200));
        assert_eq!(speed_permille(3.0), Ok(3000));
        for bad in [0.1, 3.5, -1.0, f32::NAN, f32::INFINITY] {
            assert!(matches!(speed_permille(bad), Err(Error::InvalidParameter(_))));
        }
    }

    #[test]
    fn test_seconds_range() {
        assert_eq!(show_seconds(1), Ok(1));
        assert_eq!(show_seconds(60), Ok(60));
        for bad in [0, -5, 61] {
            assert!(matches!(show_seconds(bad), Err(Error::InvalidParameter(_))));
        }
    }

    #[test]
    fn test_validate_accepts_aliases_and_colors() {
        let colors = [Rgb { r: 1, g: 2, b: 3 }];
        let spec = ShowSpec {
            kind: "fade",
            colors: &colors,
            speed: Some(2.0),
            seconds: Some(5),
            progress: None,
        };
        let change = spec.validate().unwrap();
        assert_eq!(change.show.kind(), ShowKind::Breath);
        assert_eq!(change.show.palette().as_slice(), &colors);
        assert_eq!(change.show.speed(), 2.0);
        assert_eq!(change.seconds, Some(5));
    }

    #[test]
    fn test_validate_progress_value() {
        let spec = ShowSpec {
            kind: "progress",
            progress: Some(1.4),
            ..ShowSpec::default()
        };
        assert_eq!(spec.validate().unwrap().progress, Some(1.0));
    }

    #[test]
    fn test_step_follows_speed() {
        // Breath steps every 20 ms
        let mut slot = ShowSlot::new(Show::new(ShowKind::Breath));
        slot.advance(10, TICK, 1000);
        assert_eq!(slot.step(), 5);

        let mut fast = ShowSlot::new(Show::new(ShowKind::Breath));
        fast.advance(10, TICK, 2000);
        assert_eq!(fast.step(), 10);

        let spec = ShowSpec {
            kind: "breath",
            speed: Some(0.5),
            ..ShowSpec::default()
        };
        let mut slow = ShowSlot::new(spec.validate().unwrap().show);
        slow.advance(10, TICK, 1000);
        assert_eq!(slow.step(), 2);
    }

    #[test]
    fn test_speed_change_does_not_jump() {
        let mut slot = ShowSlot::new(Show::new(ShowKind::Marquee));
        slot.advance(110, TICK, 1000);
        assert_eq!(slot.step(), 10);
        slot.advance(11, TICK, 3000);
        assert_eq!(slot.step(), 13);
    }
}
