//! Single-value keyframe tracks
//!
//! A track maps normalized progress (0.0 to 1.0) to a value through a list of
//! keyframes. Tracks hold no playback state; the loop animator samples them
//! with progress derived from elapsed time.

use crate::easing::Easing;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A single keyframe in a track
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    /// Time position (0.0 to 1.0)
    pub time: f32,
    /// Value at this keyframe
    pub value: f32,
    /// Easing used when transitioning TO this keyframe
    #[serde(default)]
    pub easing: Easing,
}

impl Keyframe {
    pub fn new(time: f32, value: f32, easing: Easing) -> Self {
        Self {
            time,
            value,
            easing,
        }
    }
}

/// Keyframes sorted by time
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Keyframe>", into = "Vec<Keyframe>")]
pub struct KeyframeTrack {
    keyframes: SmallVec<[Keyframe; 4]>,
}

impl KeyframeTrack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Two-point track from `from` to `to`
    pub fn between(from: f32, to: f32, easing: Easing) -> Self {
        Self::new()
            .at(0.0, from, Easing::Linear)
            .at(1.0, to, easing)
    }

    /// Evenly spaced values, e.g. `[0, 10, 0]` for a bob
    pub fn evenly(values: &[f32], easing: Easing) -> Self {
        let last = values.len().saturating_sub(1).max(1) as f32;
        values
            .iter()
            .enumerate()
            .fold(Self::new(), |track, (i, v)| {
                track.at(i as f32 / last, *v, easing)
            })
    }

    /// Add a keyframe (builder pattern)
    pub fn at(mut self, time: f32, value: f32, easing: Easing) -> Self {
        self.insert(Keyframe::new(time, value, easing));
        self
    }

    fn insert(&mut self, keyframe: Keyframe) {
        let time = if keyframe.time.is_finite() {
            keyframe.time.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let idx = self.keyframes.partition_point(|k| k.time <= time);
        self.keyframes.insert(idx, Keyframe { time, ..keyframe });
    }

    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }

    /// Value at a progress (0.0 to 1.0); an empty track samples as 0.0
    pub fn sample(&self, progress: f32) -> f32 {
        let Some(first) = self.keyframes.first() else {
            return 0.0;
        };
        let progress = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };

        let mut prev = first;
        let mut next = first;
        for kf in &self.keyframes {
            if kf.time <= progress {
                prev = kf;
            }
            if kf.time >= progress {
                next = kf;
                break;
            }
            next = kf;
        }

        if (next.time - prev.time).abs() < f32::EPSILON {
            return prev.value;
        }

        let local = (progress - prev.time) / (next.time - prev.time);
        prev.value + (next.value - prev.value) * next.easing.apply(local)
    }
}

impl From<Vec<Keyframe>> for KeyframeTrack {
    fn from(keyframes: Vec<Keyframe>) -> Self {
        keyframes.into_iter().fold(Self::new(), |mut track, kf| {
            track.insert(kf);
            track
        })
    }
}

impl From<KeyframeTrack> for Vec<Keyframe> {
    fn from(track: KeyframeTrack) -> Self {
        track.keyframes.into_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_between_interpolates() {
        let track = KeyframeTrack::between(0.0, -50.0, Easing::Linear);
        assert_eq!(track.sample(0.0), 0.0);
        assert_eq!(track.sample(0.5), -25.0);
        assert_eq!(track.sample(1.0), -50.0);
    }

    #[test]
    fn test_evenly_spaced_bob() {
        let track = KeyframeTrack::evenly(&[0.0, 10.0, 0.0], Easing::Linear);
        assert_eq!(track.keyframes().len(), 3);
        assert_eq!(track.sample(0.5), 10.0);
        assert_eq!(track.sample(0.25), 5.0);
        assert_eq!(track.sample(0.0), track.sample(1.0));
    }

    #[test]
    fn test_keyframes_stay_sorted() {
        let track = KeyframeTrack::new()
            .at(1.0, 3.0, Easing::Linear)
            .at(0.0, 1.0, Easing::Linear)
            .at(0.5, 2.0, Easing::Linear);
        let times: Vec<f32> = track.keyframes().iter().map(|k| k.time).collect();
        assert_eq!(times, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_empty_and_out_of_range() {
        assert_eq!(KeyframeTrack::new().sample(0.3), 0.0);

        let track = KeyframeTrack::between(2.0, 4.0, Easing::Linear);
        assert_eq!(track.sample(-1.0), 2.0);
        assert_eq!(track.sample(5.0), 4.0);
    }

    #[test]
    fn test_deserialize_from_list() {
        let track: KeyframeTrack = serde_json::from_str(
            r#"[{"time": 1.0, "value": 360.0}, {"time": 0.0, "value": 0.0}]"#,
        )
        .unwrap();
        assert_eq!(track.sample(0.5), 180.0);
    }
}
