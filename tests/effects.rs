mod tests {
    use marquee_lights::color::{BLACK, Palette, Rgb, WARM, scale_color};
    use marquee_lights::effect::{
        BreathEffect, DoubleChaseEffect, Effect, FrameContext, IDLE_SHOW_NAMES, MarqueeEffect,
        ProgressBarEffect, ShowKind, SolidEffect, TIMED_SHOW_NAMES, TwinkleEffect, WipeEffect,
        WipeStage,
    };
    use marquee_lights::math8::unit_to_u8;
    use marquee_lights::progress::{PlaybackState, ProgressView};

    const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };
    const BLUE: Rgb = Rgb { r: 0, g: 0, b: 255 };

    fn frame(step: u32) -> FrameContext {
        FrameContext {
            step,
            progress: ProgressView::default(),
        }
    }

    fn progress_frame(fraction: f32, state: PlaybackState) -> FrameContext {
        FrameContext {
            step: 0,
            progress: ProgressView {
                fraction,
                state,
                head_visible: true,
            },
        }
    }

    #[test]
    fn test_show_kind_names() {
        let names = IDLE_SHOW_NAMES.iter().chain(TIMED_SHOW_NAMES).chain(&["progress"]);
        for name in names {
            let kind = ShowKind::parse_from_str(name).unwrap();
            assert_eq!(kind.as_str(), *name);
        }
        assert_eq!(ShowKind::parse_from_str("fade"), Some(ShowKind::Breath));
        assert_eq!(ShowKind::parse_from_str("chase"), Some(ShowKind::Marquee));
        assert_eq!(ShowKind::parse_from_str("bogus"), None);
        assert_eq!(ShowKind::parse_from_str(""), None);
    }

    #[test]
    fn test_solid_uses_first_color() {
        let mut leds = [BLACK; 8];
        SolidEffect::new(&Palette::new()).render(&frame(0), &mut leds);
        assert!(leds.iter().all(|c| *c == WARM));

        let palette = Palette::from_slice(&[RED, BLUE]).unwrap();
        SolidEffect::new(&palette).render(&frame(99), &mut leds);
        assert!(leds.iter().all(|c| *c == RED));
    }

    #[test]
    fn test_breath_stays_within_levels() {
        let min = unit_to_u8(0.06);
        let max = unit_to_u8(0.70);
        let mut seen_low = false;
        let mut seen_high = false;
        for step in 0..500 {
            let level = BreathEffect::level_at(step);
            assert!(level >= min && level <= max, "step {step}: {level}");
            seen_low |= level < 40;
            seen_high |= level > 150;
        }
        assert!(seen_low && seen_high);
    }

    #[test]
    fn test_breath_fills_whole_strip() {
        let mut leds = [BLACK; 10];
        BreathEffect::new(&Palette::new()).render(&frame(17), &mut leds);
        let expected = scale_color(WARM, BreathEffect::level_at(17));
        assert!(leds.iter().all(|c| *c == expected));
    }

    #[test]
    fn test_marquee_lights_every_third_bulb() {
        let effect = MarqueeEffect::new(&Palette::new());
        let on = scale_color(WARM, 230);
        let off = scale_color(WARM, 8);
        let mut leds = [BLACK; 9];

        effect.render(&frame(0), &mut leds);
        for (i, led) in leds.iter().enumerate() {
            assert_eq!(*led, if i % 3 == 0 { on } else { off }, "bulb {i}");
        }

        effect.render(&frame(1), &mut leds);
        for (i, led) in leds.iter().enumerate() {
            assert_eq!(*led, if (i + 1) % 3 == 0 { on } else { off }, "bulb {i}");
        }
    }

    #[test]
    fn test_marquee_cycles_palette() {
        let palette = Palette::from_slice(&[RED, BLUE]).unwrap();
        let mut leds = [BLACK; 6];
        MarqueeEffect::new(&palette).render(&frame(0), &mut leds);
        assert_eq!(leds[0], scale_color(RED, 230));
        assert_eq!(leds[3], scale_color(BLUE, 230));
    }

    #[test]
    fn test_double_chase_heads_at_both_ends() {
        let palette = Palette::from_slice(&[RED, BLUE]).unwrap();
        let mut leds = [BLACK; 20];
        DoubleChaseEffect::new(&palette).render(&frame(0), &mut leds);
        assert_eq!(leds[0], scale_color(RED, 242));
        assert_eq!(leds[19], scale_color(BLUE, 242));
        assert_eq!(leds[10], scale_color(RED, 8));
    }

    #[test]
    fn test_double_chase_moves_one_bulb_per_step() {
        let palette = Palette::from_slice(&[RED, BLUE]).unwrap();
        let mut leds = [BLACK; 20];
        DoubleChaseEffect::new(&palette).render(&frame(3), &mut leds);
        assert_eq!(leds[3], scale_color(RED, 242));
        assert_eq!(leds[16], scale_color(BLUE, 242));
    }

    #[test]
    fn test_double_chase_tiny_strip() {
        let mut leds = [BLACK; 2];
        DoubleChaseEffect::new(&Palette::new()).render(&frame(5), &mut leds);
        assert!(leds.iter().all(|c| *c != BLACK));
    }

    #[test]
    fn test_wipe_stages() {
        assert_eq!(WipeEffect::stage_at(0, 20), WipeStage::On(1));
        assert_eq!(WipeEffect::stage_at(19, 20), WipeStage::On(20));
        assert_eq!(WipeEffect::stage_at(20, 20), WipeStage::Hold);
        assert_eq!(WipeEffect::stage_at(64, 20), WipeStage::Hold);
        assert_eq!(WipeEffect::stage_at(65, 20), WipeStage::Off(1));
        assert_eq!(WipeEffect::stage_at(84, 20), WipeStage::Off(20));
        assert_eq!(WipeEffect::stage_at(85, 20), WipeStage::On(1));
    }

    #[test]
    fn test_wipe_fills_from_start() {
        let mut leds = [WARM; 20];
        WipeEffect::new(&Palette::new()).render(&frame(4), &mut leds);
        let main = scale_color(WARM, 217);
        assert!(leds[..5].iter().all(|c| *c == main));
        assert!(leds[5..].iter().all(|c| *c == BLACK));
    }

    #[test]
    fn test_wipe_hold_is_lit() {
        let mut leds = [BLACK; 20];
        WipeEffect::new(&Palette::new()).render(&frame(30), &mut leds);
        assert!(leds.iter().all(|c| *c != BLACK));
    }

    #[test]
    fn test_twinkle_is_deterministic() {
        let effect = TwinkleEffect::new(&Palette::new());
        let mut first = [BLACK; 20];
        let mut second = [BLACK; 20];
        for step in [0, 1, 15, 16, 1000, u32::MAX] {
            effect.render(&frame(step), &mut first);
            effect.render(&frame(step), &mut second);
            assert_eq!(first, second);
            assert!(first.iter().all(|c| c.r > 0), "step {step}");
        }
    }

    #[test]
    fn test_twinkle_changes_over_time() {
        let effect = TwinkleEffect::new(&Palette::new());
        let mut a = [BLACK; 20];
        let mut b = [BLACK; 20];
        effect.render(&frame(0), &mut a);
        effect.render(&frame(40), &mut b);
        assert_ne!(a, b);
    }

    #[test]
    fn test_progress_filled_count() {
        assert_eq!(ProgressBarEffect::filled_count(0.0, 20), 0);
        assert_eq!(ProgressBarEffect::filled_count(0.5, 20), 10);
        assert_eq!(ProgressBarEffect::filled_count(1.0, 20), 20);
        assert_eq!(ProgressBarEffect::filled_count(-1.0, 20), 0);
        assert_eq!(ProgressBarEffect::filled_count(2.0, 20), 20);
    }

    #[test]
    fn test_progress_bar_head() {
        let effect = ProgressBarEffect::new(&Palette::new());
        let head = scale_color(WARM, unit_to_u8(0.95));
        let empty = scale_color(WARM, unit_to_u8(0.04));
        let mut leds = [BLACK; 20];

        effect.render(&progress_frame(0.5, PlaybackState::Playing), &mut leds);
        assert_eq!(leds[10], head);
        assert_eq!(leds[15], empty);
        assert!(leds[..10].iter().all(|c| *c != empty && *c != BLACK));

        effect.render(&progress_frame(0.5, PlaybackState::Stopped), &mut leds);
        assert_eq!(leds[10], empty);
    }

    #[test]
    fn test_progress_bar_full_keeps_head_on_strip() {
        let effect = ProgressBarEffect::new(&Palette::new());
        let mut leds = [BLACK; 20];
        effect.render(&progress_frame(1.0, PlaybackState::Playing), &mut leds);
        assert_eq!(leds[19], scale_color(WARM, unit_to_u8(0.95)));
    }
}
