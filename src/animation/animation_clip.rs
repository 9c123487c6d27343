//! Animation clips: per-node translation, rotation and scale channels.

use super::KeyframeTrack;
use crate::math::{Matrix4, Quaternion, Vector3};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Playback rate used when a clip does not specify one.
pub const DEFAULT_TICKS_PER_SECOND: f64 = 25.0;

/// Keyframed transform of one node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimationChannel {
    /// Name of the animated node.
    pub node_name: String,
    /// Translation keys.
    pub translation: KeyframeTrack<Vector3>,
    /// Rotation keys.
    pub rotation: KeyframeTrack<Quaternion>,
    /// Scale keys.
    pub scale: KeyframeTrack<Vector3>,
}

impl AnimationChannel {
    /// Create an empty channel for a node.
    pub fn new(node_name: impl Into<String>) -> Self {
        Self { node_name: node_name.into(), ..Self::default() }
    }

    /// Add a translation key.
    pub fn add_translation(&mut self, tick: f64, value: Vector3) -> &mut Self {
        self.translation.insert(tick, value);
        self
    }

    /// Add a rotation key.
    pub fn add_rotation(&mut self, tick: f64, value: Quaternion) -> &mut Self {
        self.rotation.insert(tick, value);
        self
    }

    /// Add a scale key.
    pub fn add_scale(&mut self, tick: f64, value: Vector3) -> &mut Self {
        self.scale.insert(tick, value);
        self
    }

    /// Translation, rotation and scale at `tick`. Empty tracks yield the identity.
    pub fn sample(&self, tick: f64) -> (Vector3, Quaternion, Vector3) {
        (
            self.translation.sample(tick).unwrap_or(Vector3::ZERO),
            self.rotation.sample(tick).unwrap_or(Quaternion::IDENTITY),
            self.scale.sample(tick).unwrap_or(Vector3::ONE),
        )
    }

    /// `T · R · S` at `tick`.
    pub fn local_matrix(&self, tick: f64) -> Matrix4 {
        let (t, r, s) = self.sample(tick);
        Matrix4::compose(&t, &r, &s)
    }

    /// Time of the latest key on any track.
    pub fn end_time(&self) -> f64 {
        self.translation
            .end_time()
            .max(self.rotation.end_time())
            .max(self.scale.end_time())
    }
}

/// A clip animating any number of nodes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Animation {
    /// Name of the animation.
    pub name: String,
    /// Length in ticks.
    pub duration_ticks: f64,
    /// Playback rate; zero means [`DEFAULT_TICKS_PER_SECOND`].
    pub ticks_per_second: f64,
    channels: HashMap<String, AnimationChannel>,
}

impl Animation {
    /// Create an empty clip.
    pub fn new(name: impl Into<String>, duration_ticks: f64, ticks_per_second: f64) -> Self {
        Self {
            name: name.into(),
            duration_ticks,
            ticks_per_second,
            channels: HashMap::new(),
        }
    }

    /// Add a channel, replacing any channel for the same node.
    pub fn add_channel(&mut self, channel: AnimationChannel) {
        self.channels.insert(channel.node_name.clone(), channel);
    }

    /// Channel for a node, created if missing.
    pub fn channel_mut(&mut self, node_name: &str) -> &mut AnimationChannel {
        self.channels
            .entry(node_name.to_string())
            .or_insert_with(|| AnimationChannel::new(node_name))
    }

    /// Channel for a node.
    pub fn channel(&self, node_name: &str) -> Option<&AnimationChannel> {
        self.channels.get(node_name)
    }

    /// All channels, in no particular order.
    pub fn channels(&self) -> impl Iterator<Item = &AnimationChannel> + '_ {
        self.channels.values()
    }

    /// Number of channels.
    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    /// Playback rate with the default substituted for zero.
    pub fn effective_ticks_per_second(&self) -> f64 {
        if self.ticks_per_second > 0.0 {
            self.ticks_per_second
        } else {
            DEFAULT_TICKS_PER_SECOND
        }
    }

    /// Length in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.duration_ticks / self.effective_ticks_per_second()
    }

    /// Looping tick for a time in seconds. A zero-length clip stays at tick 0.
    pub fn ticks_at(&self, seconds: f64) -> f64 {
        if self.duration_ticks <= 0.0 {
            return 0.0;
        }
        let ticks = (seconds * self.effective_ticks_per_second()) % self.duration_ticks;
        if ticks < 0.0 {
            ticks + self.duration_ticks
        } else {
            ticks
        }
    }

    /// Set the duration to the last key of any channel.
    pub fn update_duration(&mut self) {
        self.duration_ticks = self.channels.values().map(AnimationChannel::end_time).fold(0.0, f64::max);
    }
}
