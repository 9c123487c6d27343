//! Time-ordered keyframes for a single property.

use super::interpolant::{Interpolate, InterpolationMode};
use serde::{Deserialize, Serialize};

/// A keyframe with time and value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe<T> {
    /// Time in ticks.
    pub time: f64,
    /// Value at this keyframe.
    pub value: T,
}

impl<T> Keyframe<T> {
    /// Create a new keyframe.
    pub fn new(time: f64, value: T) -> Self {
        Self { time, value }
    }
}

/// Keyframes sorted by time, at most one per time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyframeTrack<T> {
    keyframes: Vec<Keyframe<T>>,
    /// Interpolation mode.
    pub interpolation: InterpolationMode,
}

impl<T> Default for KeyframeTrack<T> {
    fn default() -> Self {
        Self {
            keyframes: Vec::new(),
            interpolation: InterpolationMode::Linear,
        }
    }
}

impl<T: Interpolate> KeyframeTrack<T> {
    /// Create an empty track.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from parallel arrays of times and values.
    pub fn from_arrays(times: &[f64], values: &[T]) -> Self {
        debug_assert_eq!(times.len(), values.len(), "times and values differ in length");
        let mut track = Self::new();
        for (&time, &value) in times.iter().zip(values) {
            track.insert(time, value);
        }
        track
    }

    /// Insert a keyframe, replacing any existing one at the same time.
    pub fn insert(&mut self, time: f64, value: T) {
        let idx = self.keyframes.partition_point(|k| k.time < time);
        match self.keyframes.get_mut(idx) {
            Some(k) if k.time == time => k.value = value,
            _ => self.keyframes.insert(idx, Keyframe::new(time, value)),
        }
    }

    /// Keyframes in time order.
    #[inline]
    pub fn keyframes(&self) -> &[Keyframe<T>] {
        &self.keyframes
    }

    /// Number of keyframes.
    #[inline]
    pub fn len(&self) -> usize {
        self.keyframes.len()
    }

    /// True when the track has no keyframes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }

    /// Time of the last keyframe.
    pub fn end_time(&self) -> f64 {
        self.keyframes.last().map_or(0.0, |k| k.time)
    }

    /// Value at `time`, or `None` for an empty track.
    ///
    /// Before the first keyframe the first value holds; after the last
    /// the last value holds.
    pub fn sample(&self, time: f64) -> Option<T> {
        let first = self.keyframes.first()?;
        // First keyframe strictly after `time`
        let upper = self.keyframes.partition_point(|k| k.time <= time);
        if upper == 0 {
            return Some(first.value);
        }
        if upper == self.keyframes.len() {
            return self.keyframes.last().map(|k| k.value);
        }

        let (k0, k1) = (&self.keyframes[upper - 1], &self.keyframes[upper]);
        let value = match self.interpolation {
            InterpolationMode::Step => k0.value,
            InterpolationMode::Linear => {
                let t = (time - k0.time) / (k1.time - k0.time);
                k0.value.interpolate(&k1.value, t)
            }
        };
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vector3;

    #[test]
    fn test_insert_keeps_order_and_replaces() {
        let mut track = KeyframeTrack::new();
        track.insert(2.0, 20.0);
        track.insert(0.0, 0.0);
        track.insert(1.0, 10.0);
        track.insert(1.0, 11.0);
        let times: Vec<f64> = track.keyframes().iter().map(|k| k.time).collect();
        assert_eq!(times, vec![0.0, 1.0, 2.0]);
        assert_eq!(track.keyframes()[1].value, 11.0);
    }

    #[test]
    fn test_sample_clamps_and_interpolates() {
        let track = KeyframeTrack::from_arrays(&[1.0, 3.0], &[Vector3::ZERO, Vector3::new(4.0, 0.0, 0.0)]);
        assert_eq!(track.sample(0.0), Some(Vector3::ZERO));
        assert_eq!(track.sample(5.0), Some(Vector3::new(4.0, 0.0, 0.0)));
        assert_eq!(track.sample(2.0), Some(Vector3::new(2.0, 0.0, 0.0)));
        assert_eq!(track.sample(3.0), Some(Vector3::new(4.0, 0.0, 0.0)));
    }

    #[test]
    fn test_step_mode() {
        let mut track = KeyframeTrack::from_arrays(&[0.0, 1.0], &[1.0, 5.0]);
        track.interpolation = InterpolationMode::Step;
        assert_eq!(track.sample(0.9), Some(1.0));
        assert_eq!(KeyframeTrack::<f64>::new().sample(0.0), None);
    }
}
