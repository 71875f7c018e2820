//! Tick logic of the staircase: lights, sensors, movings and learned times.
//!
//! [`Staircase`] is the unlocked core. It owns every piece of mutable state
//! and advances all of it in [`Staircase::update`]. Wrap it in a
//! [`StaircaseLooper`](crate::StaircaseLooper) to share it between tasks.

use crate::config::StaircaseConfig;
use crate::deque::StaticDeque;
use crate::filter::MovingTimeFilter;
use crate::hal::{BinaryInput, BinaryOutput, Persistence};
use crate::light::BinaryLight;
use crate::moving::{Moving, MovingConfig};
use crate::pool::{MovingId, MovingPool, PoolError};
use crate::sensor::ProximitySensor;
use crate::types::{Direction, Milliseconds};

/// Persistence key for the learned top-to-bottom traversal time.
pub const DOWN_MOVING_KEY: &str = "dmv";

/// Persistence key for the learned bottom-to-top traversal time.
pub const UP_MOVING_KEY: &str = "umv";

/// Default number of simultaneous movings tracked per direction.
pub const DEFAULT_MAX_MOVINGS: usize = 3;

/// Everything belonging to one direction of travel.
struct Lane<const K: usize> {
    direction: Direction,
    pool: MovingPool<K>,
    queue: StaticDeque<MovingId, K>,
    filter: MovingTimeFilter,
}

impl<const K: usize> Lane<K> {
    fn new(direction: Direction, seed: Milliseconds) -> Self {
        Self {
            direction,
            pool: MovingPool::new(),
            queue: StaticDeque::new(),
            filter: MovingTimeFilter::new(seed),
        }
    }

    fn update<W: BinaryOutput>(&mut self, delta: Milliseconds, lights: &mut [BinaryLight<W>]) {
        for &id in self.queue.iter() {
            if let Some(moving) = self.pool.get_mut(id) {
                moving.update(delta, lights);
            }
        }
    }

    /// Retires stale movings from the front, stopping at the first live one.
    fn remove_stale(&mut self) {
        while let Some(&id) = self.queue.front() {
            if !self.pool.get(id).is_none_or(Moving::is_too_old) {
                break;
            }

            #[cfg(feature = "defmt")]
            defmt::debug!("evicting stale {} moving", self.direction);

            self.queue.pop_front();
            self.pool.destroy(id);
        }
    }

    fn front(&self) -> Option<&Moving> {
        self.pool.get(*self.queue.front()?)
    }

    fn back(&self) -> Option<&Moving> {
        self.pool.get(*self.queue.back()?)
    }

    fn is_first_finishing(&self) -> bool {
        self.front().is_some_and(Moving::is_near_end)
    }

    fn has_new_just_started(&self) -> bool {
        self.back().is_some_and(Moving::is_near_begin)
    }

    fn has_room(&self) -> bool {
        !self.queue.is_full()
    }

    /// Pops the front moving and feeds its elapsed time into the filter.
    fn finish_first(&mut self) -> Option<Milliseconds> {
        let id = self.queue.pop_front()?;
        let time_passed = self.pool.get(id).map(Moving::time_passed);
        self.pool.destroy(id);

        if let Some(time) = time_passed {
            self.filter.process_new_moving_time(time);

            #[cfg(feature = "defmt")]
            defmt::debug!(
                "{} moving finished after {} ms, estimate now {} ms",
                self.direction,
                time,
                self.filter.current_moving_time()
            );
        }

        time_passed
    }

    fn start<W: BinaryOutput>(
        &mut self,
        config: &MovingConfig,
        lights: &mut [BinaryLight<W>],
    ) -> Result<MovingId, PoolError> {
        let expected = self.filter.current_moving_time();
        let id = self.pool.create(self.direction, expected, config, lights)?;

        if let Err(id) = self.queue.push_back(id) {
            self.pool.destroy(id);
            return Err(PoolError::Exhausted { capacity: K });
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("{} moving started, expected {} ms", self.direction, expected);

        Ok(id)
    }

    fn movings(&self) -> impl Iterator<Item = &Moving> + '_ {
        self.queue.iter().filter_map(|&id| self.pool.get(id))
    }
}

fn restore_filter<P: Persistence>(persistence: &P, key: &str, filter: &mut MovingTimeFilter) {
    if !persistence.key_exists(key) {
        return;
    }

    match persistence.get_value(key) {
        Some(value) if value > 0 => {
            #[cfg(feature = "defmt")]
            defmt::info!("restored {=str} = {} ms", key, value);
            filter.reset(value);
        }
        Some(_value) => {
            #[cfg(feature = "defmt")]
            defmt::warn!("ignoring implausible {=str} = {}", key, _value);
        }
        None => {
            #[cfg(feature = "defmt")]
            defmt::warn!("failed to read {=str}, keeping seed", key);
        }
    }
}

/// Staircase controller state, advanced one tick at a time.
///
/// # Type Parameters
/// * `W` - Light output type
/// * `S` - Sensor input type
/// * `P` - Persistence store
/// * `L` - Number of step lights
/// * `K` - Maximum simultaneous movings per direction
pub struct Staircase<W, S, P, const L: usize, const K: usize = DEFAULT_MAX_MOVINGS>
where
    W: BinaryOutput,
    S: BinaryInput,
    P: Persistence,
{
    lights: [BinaryLight<W>; L],
    down_sensor: ProximitySensor<S>,
    up_sensor: ProximitySensor<S>,
    persistence: P,
    config: StaircaseConfig,
    down: Lane<K>,
    up: Lane<K>,
    save_accumulated: Milliseconds,
}

impl<W, S, P, const L: usize, const K: usize> Staircase<W, S, P, L, K>
where
    W: BinaryOutput,
    S: BinaryInput,
    P: Persistence,
{
    /// Builds the staircase and restores learned durations.
    ///
    /// `down_input` is the sensor at the bottom of the stairs, `up_input` the
    /// one at the top. Stored values that are missing, unreadable or not
    /// positive leave the filter at `config.default_moving_time`.
    pub fn new(
        lights: [BinaryLight<W>; L],
        down_input: S,
        up_input: S,
        persistence: P,
        config: StaircaseConfig,
    ) -> Self {
        let mut down = Lane::new(Direction::Down, config.default_moving_time);
        let mut up = Lane::new(Direction::Up, config.default_moving_time);

        restore_filter(&persistence, DOWN_MOVING_KEY, &mut down.filter);
        restore_filter(&persistence, UP_MOVING_KEY, &mut up.filter);

        Self {
            lights,
            down_sensor: ProximitySensor::new(down_input, config.debounce_period),
            up_sensor: ProximitySensor::new(up_input, config.debounce_period),
            persistence,
            config,
            down,
            up,
            save_accumulated: 0,
        }
    }

    /// Advances the whole staircase by `delta`.
    pub fn update(&mut self, delta: Milliseconds) {
        self.save_accumulated = self.save_accumulated.saturating_add(delta);
        if self.save_accumulated > self.config.save_period {
            self.save_accumulated = 0;
            self.persist();
        }

        for light in &mut self.lights {
            light.update(delta);
        }

        self.down_sensor.update(delta);
        self.up_sensor.update(delta);

        self.down.update(delta, &mut self.lights);
        self.up.update(delta, &mut self.lights);

        self.down.remove_stale();
        self.up.remove_stale();

        // Bottom sensor: a downward wave arrives, or an upward one begins.
        if self.down_sensor.has_state_changed() && self.down_sensor.is_close() {
            Self::handle_sensor_closed(
                &mut self.down,
                &mut self.up,
                &self.config.moving,
                &mut self.lights,
            );
        }

        if self.up_sensor.has_state_changed() && self.up_sensor.is_close() {
            Self::handle_sensor_closed(
                &mut self.up,
                &mut self.down,
                &self.config.moving,
                &mut self.lights,
            );
        }
    }

    /// Writes both learned durations to persistence right away.
    pub fn persist(&mut self) {
        let down = self.down.filter.current_moving_time();
        let up = self.up.filter.current_moving_time();

        self.persistence.set_value(DOWN_MOVING_KEY, down);
        self.persistence.set_value(UP_MOVING_KEY, up);

        #[cfg(feature = "defmt")]
        defmt::info!("persisted moving times: down {} ms, up {} ms", down, up);
    }

    fn handle_sensor_closed(
        arriving: &mut Lane<K>,
        departing: &mut Lane<K>,
        config: &MovingConfig,
        lights: &mut [BinaryLight<W>],
    ) {
        if arriving.is_first_finishing() {
            arriving.finish_first();
            return;
        }

        if departing.has_new_just_started() {
            return;
        }

        if !departing.has_room() {
            #[cfg(feature = "defmt")]
            defmt::debug!("{} lane full, edge ignored", departing.direction);
            return;
        }

        if let Err(_err) = departing.start(config, lights) {
            #[cfg(feature = "defmt")]
            defmt::warn!("{} moving dropped: {}", departing.direction, _err);
        }
    }

    pub fn lights(&self) -> &[BinaryLight<W>; L] {
        &self.lights
    }

    pub fn lights_mut(&mut self) -> &mut [BinaryLight<W>; L] {
        &mut self.lights
    }

    /// Sensor at the bottom of the staircase.
    pub fn down_sensor(&self) -> &ProximitySensor<S> {
        &self.down_sensor
    }

    /// Sensor at the top of the staircase.
    pub fn up_sensor(&self) -> &ProximitySensor<S> {
        &self.up_sensor
    }

    pub fn down_sensor_mut(&mut self) -> &mut ProximitySensor<S> {
        &mut self.down_sensor
    }

    pub fn up_sensor_mut(&mut self) -> &mut ProximitySensor<S> {
        &mut self.up_sensor
    }

    /// Learned duration filter for movings in `direction`.
    pub fn filter(&self, direction: Direction) -> &MovingTimeFilter {
        &self.lane(direction).filter
    }

    pub fn filter_mut(&mut self, direction: Direction) -> &mut MovingTimeFilter {
        match direction {
            Direction::Down => &mut self.down.filter,
            Direction::Up => &mut self.up.filter,
        }
    }

    /// Number of movings currently tracked for `direction`.
    pub fn active_movings(&self, direction: Direction) -> usize {
        self.lane(direction).queue.len()
    }

    /// Oldest tracked moving for `direction`.
    pub fn front_moving(&self, direction: Direction) -> Option<&Moving> {
        self.lane(direction).front()
    }

    /// Tracked movings for `direction`, oldest first.
    pub fn movings(&self, direction: Direction) -> impl Iterator<Item = &Moving> + '_ {
        self.lane(direction).movings()
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    pub fn persistence_mut(&mut self) -> &mut P {
        &mut self.persistence
    }

    pub fn config(&self) -> &StaircaseConfig {
        &self.config
    }

    fn lane(&self, direction: Direction) -> &Lane<K> {
        match direction {
            Direction::Down => &self.down,
            Direction::Up => &self.up,
        }
    }
}
