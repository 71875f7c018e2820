//! Integration tests for Moving

mod common;
use common::*;

use staircase_sequencer::{
    BinaryLight, ClippedSquaredCalculator, Direction, DurationCalculator, FastRiseCalculator,
    Moving, MovingConfig, StepDuration,
};

fn lights() -> [BinaryLight<MockOutput>; LIGHTS] {
    mock_lights()
}

fn lit(lights: &[BinaryLight<MockOutput>]) -> usize {
    lights.iter().filter(|light| light.is_on()).count()
}

#[test]
fn leaves_near_begin_after_threshold() {
    let mut lights = lights();
    let mut moving = Moving::new(Direction::Up, 12000, &MovingConfig::default(), &mut lights);

    assert!(lights[0].is_on());
    assert_eq!(lit(&lights), 1);
    assert!(moving.is_near_begin());

    moving.update(2200, &mut lights);

    assert!(!moving.is_near_begin());
    // Three fast steps of 500 ms, then 1500 ms per step
    assert_eq!(moving.current_index(), 3);
    assert_eq!(lit(&lights), 4);
}

#[test]
fn near_end_window_is_symmetric_and_strict() {
    let mut lights = lights();
    let mut moving = Moving::new(Direction::Down, 12100, &MovingConfig::default(), &mut lights);

    moving.update(10100, &mut lights);
    // Exactly one threshold away is outside the window
    assert!(!moving.is_near_end());

    moving.update(1, &mut lights);
    assert!(moving.is_near_end());
    assert!(!moving.is_too_old());

    moving.update(4000, &mut lights);
    assert_eq!(moving.time_passed(), 14101);
    assert!(!moving.is_near_end());
    assert!(moving.is_too_old());

    moving.update(300, &mut lights);
    assert!(!moving.is_near_end());
}

#[test]
fn completes_after_sum_of_step_intervals() {
    let mut lights = lights();
    let mut moving = Moving::new(Direction::Up, 12000, &MovingConfig::default(), &mut lights);

    // 3 * 500 + 5 * 1500
    moving.update(8999, &mut lights);
    assert!(!moving.is_completed());
    assert_eq!(moving.current_index(), LIGHTS - 1);

    moving.update(1, &mut lights);
    assert!(moving.is_completed());
    assert_eq!(moving.current_index(), LIGHTS);
    assert_eq!(lit(&lights), LIGHTS);
}

#[test]
fn down_moving_starts_at_the_top() {
    let mut lights = lights();
    let mut moving = Moving::new(Direction::Down, 12000, &MovingConfig::default(), &mut lights);

    assert!(lights[LIGHTS - 1].is_on());
    assert_eq!(lit(&lights), 1);

    moving.update(500, &mut lights);
    assert!(lights[LIGHTS - 2].is_on());
    assert!(lights[0].is_off());
}

#[test]
fn step_lights_use_fixed_on_period() {
    let mut lights = lights();
    let config = MovingConfig::default();
    let mut moving = Moving::new(Direction::Up, 12000, &config, &mut lights);

    assert_eq!(lights[0].time_left(), config.light_on_period);

    // Step 3 has a 1500 ms interval, its light still gets the same period
    moving.update(1500, &mut lights);
    assert_eq!(moving.current_index(), 3);
    assert_eq!(lights[3].time_left(), config.light_on_period);
}

#[test]
fn completion_matches_interval_sum_for_any_shape() {
    let calculators: [DurationCalculator; 2] = [
        FastRiseCalculator::default().into(),
        ClippedSquaredCalculator.into(),
    ];
    let shapes: [(i32, usize); 5] = [(12000, 8), (12000, 1), (5000, 3), (20000, 12), (700, 5)];
    let mut storage: [BinaryLight<MockOutput>; 12] = mock_lights();

    for calculator in calculators {
        let config = MovingConfig {
            calculator,
            ..MovingConfig::default()
        };

        for (duration, light_count) in shapes {
            let lights = &mut storage[..light_count];
            let sum: i32 = (0..light_count)
                .map(|index| calculator.step_duration(index, duration, light_count))
                .sum();

            let mut moving = Moving::new(Direction::Up, duration, &config, lights);
            moving.update(sum - 1, lights);
            assert!(!moving.is_completed(), "{calculator:?} D={duration} L={light_count}");
            assert_eq!(moving.current_index(), light_count - 1);

            moving.update(1, lights);
            assert!(moving.is_completed(), "{calculator:?} D={duration} L={light_count}");
            assert_eq!(moving.current_index(), light_count);
        }
    }
}

#[test]
fn clipped_squared_first_steps() {
    let mut lights = lights();
    let config = MovingConfig {
        calculator: ClippedSquaredCalculator.into(),
        ..MovingConfig::default()
    };
    let mut moving = Moving::new(Direction::Up, 12000, &config, &mut lights);

    moving.update(2449, &mut lights);
    assert_eq!(moving.current_index(), 2);

    moving.update(1, &mut lights);
    assert_eq!(moving.current_index(), 3);
    assert!(lights[3].is_on());
}

#[test]
fn complete_stops_lighting() {
    let mut lights = lights();
    let mut moving = Moving::new(Direction::Up, 12000, &MovingConfig::default(), &mut lights);

    moving.complete();
    moving.update(5000, &mut lights);

    assert!(moving.is_completed());
    assert_eq!(moving.current_index(), 0);
    assert_eq!(moving.time_passed(), 5000);
    assert_eq!(lit(&lights), 1);
}
