// Emulates a phone's motion sensors for tests and demos.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::NormalError;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use common::types::{Channel, RawEvent};

use super::gaussian::GaussianNoise;

const GRAVITY: f64 = 9.81;
const NOISE_MEAN: f64 = 0.0;

/// Produces readings of a device lying still: gravity on the accelerometer z
/// axis, zero angular rate, both with gaussian noise.
pub struct SimulatedSensor {
    rng: StdRng,
    noise: GaussianNoise,
}

impl SimulatedSensor {
    /// Seeded generator, so runs are reproducible.
    pub fn new(seed: u64, noise_stdev: f64) -> Result<Self, NormalError> {
        Ok(Self {
            rng: StdRng::seed_from_u64(seed),
            noise: GaussianNoise::new(NOISE_MEAN, noise_stdev)?,
        })
    }

    pub fn next_event(&mut self, channel: Channel) -> RawEvent {
        let [x, y, z] = self.noise.add_noise(&mut self.rng, baseline(channel));
        RawEvent::new(channel, x, y, z)
    }

    /// `n` readings per channel, interleaved accel then gyro.
    pub fn events(&mut self, n: usize) -> Vec<RawEvent> {
        (0..n)
            .flat_map(|_| Channel::ALL)
            .map(|channel| self.next_event(channel))
            .collect()
    }

    /// Feeds `n` readings per channel to `on_event` from a dedicated thread,
    /// one pair every `period`, the way a platform sensor callback would.
    pub fn spawn<F>(mut self, period: Duration, n: usize, on_event: F) -> JoinHandle<()>
    where
        F: Fn(RawEvent) + Send + 'static,
    {
        thread::spawn(move || {
            for _ in 0..n {
                for channel in Channel::ALL {
                    on_event(self.next_event(channel));
                }
                thread::sleep(period);
            }
        })
    }
}

fn baseline(channel: Channel) -> [f64; 3] {
    match channel {
        Channel::Accel => [0.0, 0.0, GRAVITY],
        Channel::Gyro => [0.0, 0.0, 0.0],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let a = SimulatedSensor::new(42, 0.05).unwrap().events(10);
        let b = SimulatedSensor::new(42, 0.05).unwrap().events(10);
        assert_eq!(a, b);
        assert_eq!(a.len(), 20);
        assert_eq!(a[0].channel, Channel::Accel);
        assert_eq!(a[1].channel, Channel::Gyro);
    }

    #[test]
    fn test_accel_around_gravity() {
        let mut sensor = SimulatedSensor::new(1, 0.01).unwrap();
        let event = sensor.next_event(Channel::Accel);
        assert!((event.measurement.z() - GRAVITY).abs() < 0.1);
    }

    #[test]
    fn test_spawn_feeds_callback() {
        let received = Arc::new(Mutex::new(Vec::new()));
        let handle = SimulatedSensor::new(3, 0.01).unwrap().spawn(
            Duration::from_millis(1),
            5,
            {
                let received = received.clone();
                move |event| received.lock().unwrap().push(event)
            },
        );
        handle.join().unwrap();
        assert_eq!(received.lock().unwrap().len(), 10);
    }
}
