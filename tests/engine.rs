mod tests {
    use firelamp_core::command;
    use firelamp_core::{
        AnimationEngine, AnimationMode, AnimationParameters, BLEND_STEPS, OutputDevice, Rgb,
    };
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    const NUM_LEDS: usize = 3;

    /// Records every committed frame so tests can inspect the output.
    struct RecordingDevice {
        staged: Vec<Rgb>,
        frames: Vec<Vec<Rgb>>,
    }

    impl RecordingDevice {
        fn new(len: usize) -> Self {
            Self {
                staged: vec![Rgb { r: 0, g: 0, b: 0 }; len],
                frames: Vec::new(),
            }
        }
    }

    impl OutputDevice for RecordingDevice {
        fn set_all(&mut self, color: Rgb) {
            self.staged.fill(color);
        }

        fn set_element(&mut self, index: usize, color: Rgb) {
            self.staged[index] = color;
        }

        fn commit(&mut self) {
            self.frames.push(self.staged.clone());
        }
    }

    fn flame_setup() -> (AnimationEngine<NUM_LEDS>, AnimationParameters, SmallRng) {
        let params = AnimationParameters::default();
        let mut rng = SmallRng::seed_from_u64(0xF1A3);
        let mut engine = AnimationEngine::<NUM_LEDS>::new();
        engine.initialize(params.base_color, &mut rng);
        (engine, params, rng)
    }

    #[test]
    fn test_one_commit_per_tick() {
        let (mut engine, params, mut rng) = flame_setup();
        let mut device = RecordingDevice::new(NUM_LEDS);

        for _ in 0..20 {
            engine.tick(&params, &mut device, &mut rng);
        }
        assert_eq!(device.frames.len(), 20);
    }

    #[test]
    fn test_full_blend_cycle_lands_on_target() {
        let (mut engine, params, mut rng) = flame_setup();
        let mut device = RecordingDevice::new(NUM_LEDS);

        // BLEND_STEPS + 1 ticks complete one cycle; one more renders the
        // start of the next.
        for _ in 0..(BLEND_STEPS as usize + 2) {
            engine.tick(&params, &mut device, &mut rng);
        }

        // The last frame of the cycle renders t = 1 (the old target); the
        // first frame of the next renders t = 0 (the promoted current).
        // They must be identical: the target was promoted, not skipped.
        let cycle_end = &device.frames[BLEND_STEPS as usize];
        let next_start = &device.frames[BLEND_STEPS as usize + 1];
        assert_eq!(cycle_end, next_start);

        // And the counter wrapped back past the boundary.
        assert_eq!(engine.blend_step(), 1);
    }

    #[test]
    fn test_blend_step_resets_at_cycle_boundary() {
        let (mut engine, params, mut rng) = flame_setup();
        let mut device = RecordingDevice::new(NUM_LEDS);

        for expected in 1..=BLEND_STEPS {
            engine.tick(&params, &mut device, &mut rng);
            assert_eq!(engine.blend_step(), expected);
        }
        engine.tick(&params, &mut device, &mut rng);
        assert_eq!(engine.blend_step(), 0);
    }

    #[test]
    fn test_static_mode_renders_base_color_exactly() {
        let (mut engine, mut params, mut rng) = flame_setup();
        params.mode = AnimationMode::Static;
        params.base_color = Rgb { r: 0, g: 255, b: 0 };
        let mut device = RecordingDevice::new(NUM_LEDS);

        engine.tick(&params, &mut device, &mut rng);

        assert_eq!(device.frames.len(), 1);
        for led in &device.frames[0] {
            assert_eq!(*led, Rgb { r: 0, g: 255, b: 0 });
        }
    }

    #[test]
    fn test_static_mode_reflects_base_change_immediately() {
        let (mut engine, mut params, mut rng) = flame_setup();
        params.mode = AnimationMode::Static;
        let mut device = RecordingDevice::new(NUM_LEDS);

        engine.tick(&params, &mut device, &mut rng);
        params.base_color = Rgb { r: 1, g: 2, b: 3 };
        engine.tick(&params, &mut device, &mut rng);

        assert_eq!(device.frames[1][0], Rgb { r: 1, g: 2, b: 3 });
    }

    #[test]
    fn test_static_mode_leaves_blend_counter_untouched() {
        let (mut engine, mut params, mut rng) = flame_setup();
        let mut device = RecordingDevice::new(NUM_LEDS);

        for _ in 0..3 {
            engine.tick(&params, &mut device, &mut rng);
        }
        assert_eq!(engine.blend_step(), 3);

        params.mode = AnimationMode::Static;
        for _ in 0..5 {
            engine.tick(&params, &mut device, &mut rng);
        }
        // Switching back to flame resumes mid-cycle.
        assert_eq!(engine.blend_step(), 3);
    }

    #[test]
    fn test_flame_base_change_waits_for_cycle_boundary() {
        // Two identical engines in lockstep; one gets a base color change
        // mid-blend. Their output must stay identical until the cycle
        // boundary where new targets are drawn.
        let params_a = AnimationParameters::default();
        let mut params_b = AnimationParameters::default();

        let mut rng_a = SmallRng::seed_from_u64(99);
        let mut rng_b = SmallRng::seed_from_u64(99);
        let mut engine_a = AnimationEngine::<NUM_LEDS>::new();
        let mut engine_b = AnimationEngine::<NUM_LEDS>::new();
        engine_a.initialize(params_a.base_color, &mut rng_a);
        engine_b.initialize(params_b.base_color, &mut rng_b);

        let mut device_a = RecordingDevice::new(NUM_LEDS);
        let mut device_b = RecordingDevice::new(NUM_LEDS);

        // Advance both to blend step 5, then change B's base color.
        for _ in 0..5 {
            engine_a.tick(&params_a, &mut device_a, &mut rng_a);
            engine_b.tick(&params_b, &mut device_b, &mut rng_b);
        }
        params_b.base_color = Rgb { r: 0, g: 0, b: 255 };

        // Remaining ticks of the cycle still blend toward the old target,
        // plus the t = 0 render of the promoted current.
        for _ in 0..5 {
            engine_a.tick(&params_a, &mut device_a, &mut rng_a);
            engine_b.tick(&params_b, &mut device_b, &mut rng_b);
        }
        assert_eq!(device_a.frames[..10], device_b.frames[..10]);

        // Once blending toward targets drawn from the new base begins,
        // the outputs diverge.
        engine_a.tick(&params_a, &mut device_a, &mut rng_a);
        engine_b.tick(&params_b, &mut device_b, &mut rng_b);
        assert_ne!(device_a.frames[10], device_b.frames[10]);
    }

    #[test]
    fn test_command_then_tick_renders_static_green() {
        // End-to-end scenario: flame in progress, a command switches to
        // static green, and the very next tick bypasses the blend.
        let (mut engine, mut params, mut rng) = flame_setup();
        let mut device = RecordingDevice::new(NUM_LEDS);

        for _ in 0..4 {
            engine.tick(&params, &mut device, &mut rng);
        }

        command::process(
            br#"{"mode":"static","color":{"r":0,"g":255,"b":0}}"#,
            &mut params,
        )
        .unwrap();

        engine.tick(&params, &mut device, &mut rng);
        for led in device.frames.last().unwrap() {
            assert_eq!(*led, Rgb { r: 0, g: 255, b: 0 });
        }
    }

    #[test]
    fn test_initialize_resets_blend_step() {
        let (mut engine, params, mut rng) = flame_setup();
        let mut device = RecordingDevice::new(NUM_LEDS);

        for _ in 0..5 {
            engine.tick(&params, &mut device, &mut rng);
        }
        assert_eq!(engine.blend_step(), 5);

        engine.initialize(params.base_color, &mut rng);
        assert_eq!(engine.blend_step(), 0);
    }
}
