// tests/generator.rs
use garden_robot::generator::{
    self, GeneratorConfig, MAX_SIDE, MIN_SIDE, generate, generate_garden, max_area_count,
    random_area_count,
};
use garden_robot::{ConfigError, Slot, execute, format, parse};
use rand::SeedableRng;
use rand::rngs::StdRng;

#[test]
fn test_generated_gardens_parse() {
    let cases = [
        (4, 4, 2, 0),
        (4, 4, 15, 1),
        (5, 9, 7, 2),
        (16, 8, 26, 3),
        (64, 32, 12, 4),
        (128, 128, 26, 5),
    ];
    for (width, height, count, seed) in cases {
        let text = generate(width, height, count, seed).unwrap();
        let garden = parse(&text)
            .unwrap_or_else(|e| panic!("{width}x{height}/{count} seed {seed}: {e}\n{text}"));

        assert_eq!(garden.width(), width);
        assert_eq!(garden.height(), height);
        assert_eq!(garden.area_count(), count as usize);

        let expected: Vec<char> = (0..count).map(|i| (b'A' + i as u8) as char).collect();
        assert_eq!(garden.labels(), expected, "Labels are contiguous from A");

        let robot = garden.robot().position;
        assert!(garden.contains(robot));
        assert_eq!(garden.area_at(robot), None, "Robot starts on grass");
        assert!(!garden.robot().is_carrying());
        for area in garden.areas() {
            assert!(garden.contains(area.position));
            assert_ne!(area.position, robot);
        }
    }
}

#[test]
fn test_same_seed_same_garden() {
    for seed in [0, 7, 42, u64::MAX] {
        assert_eq!(
            generate(20, 10, 8, seed).unwrap(),
            generate(20, 10, 8, seed).unwrap()
        );
    }
    assert_ne!(
        generate(32, 32, 20, 1).unwrap(),
        generate(32, 32, 20, 2).unwrap(),
        "Different seeds should give different gardens"
    );
}

#[test]
fn test_masses_and_empty_areas() {
    for seed in 0..50 {
        let count = 2 + (seed as u32 % 25);
        let text = generate(12, 12, count, seed).unwrap();
        let garden = parse(&text).unwrap();

        let mut empty = 0;
        for area in garden.areas() {
            match area.slot {
                Slot::Empty => empty += 1,
                Slot::Mass(m) => {
                    assert_eq!(m % 10, 0, "mass {m} is a multiple of ten");
                    assert!(m < count * 30, "mass {m} below {}", count * 30);
                }
            }
        }
        let max_empty = (count / 2).max(1);
        assert!(
            (1..=max_empty).contains(&empty),
            "{empty} empty areas for {count} areas (seed {seed})"
        );
    }
}

#[test]
fn test_generator_uses_given_rng() {
    let config = GeneratorConfig::new(10, 6, 5).unwrap();
    let a = generate_garden(&config, &mut StdRng::seed_from_u64(9)).unwrap();
    let b = generate_garden(&config, &mut StdRng::seed_from_u64(9)).unwrap();
    assert_eq!(a, b);
    assert_eq!(
        format::write(&a).unwrap(),
        generate(10, 6, 5, 9).unwrap(),
        "generate() is generate_garden() seeded with the same seed"
    );
}

#[test]
fn test_generated_garden_runs() {
    let text = generate(8, 8, 6, 11).unwrap();
    let mut garden = parse(&text).unwrap();
    let sorted = garden.is_sorted();
    let outcome = execute(&mut garden, "".as_bytes()).unwrap();
    assert_eq!(outcome.sorted, sorted);
    assert_eq!(outcome.commands, 0);
}

#[test]
fn test_invalid_config_is_rejected() {
    assert_eq!(GeneratorConfig::new(3, 10, 2), Err(ConfigError::Width(3)));
    assert_eq!(GeneratorConfig::new(129, 10, 2), Err(ConfigError::Width(129)));
    assert_eq!(GeneratorConfig::new(10, 0, 2), Err(ConfigError::Height(0)));
    assert_eq!(
        GeneratorConfig::new(10, 129, 2),
        Err(ConfigError::Height(129))
    );
    assert_eq!(
        GeneratorConfig::new(10, 10, 1),
        Err(ConfigError::AreaCount { count: 1, max: 26 })
    );
    assert_eq!(
        GeneratorConfig::new(10, 10, 27),
        Err(ConfigError::AreaCount { count: 27, max: 26 })
    );
    assert_eq!(
        GeneratorConfig::new(4, 4, 16),
        Err(ConfigError::AreaCount { count: 16, max: 15 }),
        "A 4x4 grid leaves room for 15 areas and the robot"
    );
    assert_eq!(generate(2, 2, 2, 0), Err(ConfigError::Width(2)));
    assert_eq!(ConfigError::Width(2).exit_code(), 1);
}

#[test]
fn test_max_area_count() {
    assert_eq!(max_area_count(4, 4), 15);
    assert_eq!(max_area_count(4, 6), 23);
    assert_eq!(max_area_count(4, 7), 26);
    assert_eq!(max_area_count(128, 128), 26);
    assert_eq!(max_area_count(70_000, 70_000), 26, "Huge grids saturate");
    assert_eq!(max_area_count(1, 1), 0);
    assert_eq!(max_area_count(0, 5), 0);
}

#[test]
fn test_random_area_count_needs_room() {
    let mut rng = StdRng::seed_from_u64(5);
    assert_eq!(
        random_area_count(1, 1, &mut rng),
        Err(ConfigError::AreaCount { count: 2, max: 0 })
    );
    assert_eq!(
        random_area_count(1, 2, &mut rng),
        Err(ConfigError::AreaCount { count: 2, max: 1 })
    );
    assert_eq!(random_area_count(1, 3, &mut rng), Ok(2));
    for _ in 0..50 {
        let count = random_area_count(4, 4, &mut rng).unwrap();
        assert!((2..=15).contains(&count));
    }
}

#[test]
fn test_default_config_is_valid() {
    let config = GeneratorConfig::default();
    assert_eq!(
        GeneratorConfig::new(config.width(), config.height(), config.area_count()),
        Ok(config)
    );
    assert_eq!((config.width(), config.height()), (16, 16));
    assert_eq!(config.area_count(), 8);
    assert!(generate_garden(&config, &mut StdRng::seed_from_u64(0)).is_ok());
}

#[test]
fn test_random_config_is_valid() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..100 {
        let config = GeneratorConfig::random(&mut rng);
        assert_eq!(
            GeneratorConfig::new(config.width(), config.height(), config.area_count()),
            Ok(config)
        );

        let (width, height) = generator::random_size(&mut rng);
        assert!((MIN_SIDE..=MAX_SIDE).contains(&width));
        assert!((MIN_SIDE..=MAX_SIDE).contains(&height));
    }
}
