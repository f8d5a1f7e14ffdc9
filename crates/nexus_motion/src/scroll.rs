//! Scroll Transform Pipeline
//!
//! Maps the page scroll offset onto per-layer transform properties. Each
//! mapping is a clamped linear interpolation from an input domain (scroll
//! pixels) to an output range (property units). The pipeline holds no state
//! between frames: the same offset always produces the same transforms.

use nexus_animation::MotionProperties;
use nexus_core::{MotionError, Result};
use serde::{Deserialize, Serialize};

/// A clamped linear map from a scroll domain to a property range
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScrollMapping {
    pub input: [f32; 2],
    pub output: [f32; 2],
}

impl ScrollMapping {
    pub fn new(input: [f32; 2], output: [f32; 2]) -> Self {
        Self { input, output }
    }

    /// Position of `offset` within the input domain, clamped to `[0, 1]`
    ///
    /// A zero-width domain behaves as a step at its start. NaN offsets map to
    /// the start of the domain.
    pub fn progress(&self, offset: f32) -> f32 {
        let [start, end] = self.input;
        if offset.is_nan() {
            return 0.0;
        }
        let span = end - start;
        if span == 0.0 || !span.is_finite() {
            return if offset < start { 0.0 } else { 1.0 };
        }
        ((offset - start) / span).clamp(0.0, 1.0)
    }

    /// Property value for a scroll offset
    pub fn map(&self, offset: f32) -> f32 {
        let [from, to] = self.output;
        let t = self.progress(offset);
        from + (to - from) * t
    }

    pub fn validate(&self, layer: &str) -> Result<()> {
        let finite = self
            .input
            .iter()
            .chain(self.output.iter())
            .all(|v| v.is_finite());
        if !finite {
            return Err(MotionError::InvalidMapping {
                layer: layer.to_string(),
                reason: "domain and range must be finite".to_string(),
            });
        }
        if self.input[0] == self.input[1] {
            return Err(MotionError::InvalidMapping {
                layer: layer.to_string(),
                reason: format!("empty input domain at {}", self.input[0]),
            });
        }
        Ok(())
    }
}

/// Which property of a layer a mapping drives
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerProperty {
    TranslateX,
    TranslateY,
    Rotate,
    Scale,
    Opacity,
}

impl LayerProperty {
    fn apply(self, props: MotionProperties, value: f32) -> MotionProperties {
        match self {
            LayerProperty::TranslateX => props.with_translate_x(value),
            LayerProperty::TranslateY => props.with_translate_y(value),
            LayerProperty::Rotate => props.with_rotate(value),
            LayerProperty::Scale => props.with_scale(value),
            LayerProperty::Opacity => props.with_opacity(value),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScrollBinding {
    pub property: LayerProperty,
    #[serde(flatten)]
    pub mapping: ScrollMapping,
}

/// A named decorative layer and the properties scroll drives on it
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParallaxLayer {
    pub name: String,
    #[serde(default)]
    pub bindings: Vec<ScrollBinding>,
}

impl ParallaxLayer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bindings: Vec::new(),
        }
    }

    pub fn bind(mut self, property: LayerProperty, input: [f32; 2], output: [f32; 2]) -> Self {
        self.bindings.push(ScrollBinding {
            property,
            mapping: ScrollMapping::new(input, output),
        });
        self
    }

    /// Transform of this layer at a scroll offset
    pub fn evaluate(&self, offset: f32) -> MotionProperties {
        self.bindings
            .iter()
            .fold(MotionProperties::default(), |props, binding| {
                binding
                    .property
                    .apply(props, binding.mapping.map(offset))
            })
    }

    /// The hero's lime blob: sinks and turns while the page scrolls
    pub fn hero_lime() -> Self {
        Self::new("blob-lime")
            .bind(LayerProperty::TranslateY, [0.0, 500.0], [0.0, 200.0])
            .bind(LayerProperty::Rotate, [0.0, 500.0], [0.0, 45.0])
    }

    /// The hero's purple blob: drifts up against the scroll
    pub fn hero_purple() -> Self {
        Self::new("blob-purple").bind(LayerProperty::TranslateY, [0.0, 500.0], [0.0, -150.0])
    }
}

/// Transform output for one layer in one frame
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LayerTransform {
    pub name: String,
    pub properties: MotionProperties,
}

/// Stateless evaluation of every parallax layer
#[derive(Clone, Debug, Default)]
pub struct ScrollTransformPipeline {
    layers: Vec<ParallaxLayer>,
}

impl ScrollTransformPipeline {
    pub fn new(layers: Vec<ParallaxLayer>) -> Self {
        Self { layers }
    }

    /// The two blobs behind the hero title
    pub fn hero() -> Self {
        Self::new(default_layers())
    }

    pub fn layers(&self) -> &[ParallaxLayer] {
        &self.layers
    }

    pub fn evaluate(&self, offset: f32) -> Vec<LayerTransform> {
        self.layers
            .iter()
            .map(|layer| LayerTransform {
                name: layer.name.clone(),
                properties: layer.evaluate(offset),
            })
            .collect()
    }

    pub fn evaluate_layer(&self, name: &str, offset: f32) -> Option<MotionProperties> {
        self.layers
            .iter()
            .find(|layer| layer.name == name)
            .map(|layer| layer.evaluate(offset))
    }

    pub fn validate(&self) -> Result<()> {
        for layer in &self.layers {
            for binding in &layer.bindings {
                binding.mapping.validate(&layer.name)?;
            }
        }
        Ok(())
    }
}

pub fn default_layers() -> Vec<ParallaxLayer> {
    vec![ParallaxLayer::hero_lime(), ParallaxLayer::hero_purple()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_clamps_outside_domain() {
        let mapping = ScrollMapping::new([0.0, 500.0], [0.0, 200.0]);
        assert_eq!(mapping.map(-300.0), 0.0);
        assert_eq!(mapping.map(0.0), 0.0);
        assert_eq!(mapping.map(500.0), 200.0);
        assert_eq!(mapping.map(10_000.0), 200.0);
    }

    #[test]
    fn test_map_midpoint() {
        let mapping = ScrollMapping::new([0.0, 500.0], [0.0, 200.0]);
        assert_eq!(mapping.map(250.0), 100.0);

        let inverted = ScrollMapping::new([0.0, 500.0], [0.0, -150.0]);
        assert_eq!(inverted.map(250.0), -75.0);
    }

    #[test]
    fn test_degenerate_inputs_do_not_produce_nan() {
        let empty = ScrollMapping::new([100.0, 100.0], [0.0, 10.0]);
        assert_eq!(empty.map(50.0), 0.0);
        assert_eq!(empty.map(150.0), 10.0);

        let mapping = ScrollMapping::new([0.0, 500.0], [0.0, 45.0]);
        assert_eq!(mapping.map(f32::NAN), 0.0);
        assert_eq!(mapping.map(f32::INFINITY), 45.0);
        assert_eq!(mapping.map(f32::NEG_INFINITY), 0.0);
    }

    #[test]
    fn test_validate_rejects_empty_domain() {
        let empty = ScrollMapping::new([100.0, 100.0], [0.0, 10.0]);
        assert!(matches!(
            empty.validate("blob"),
            Err(MotionError::InvalidMapping { .. })
        ));
        assert!(ScrollMapping::new([0.0, f32::NAN], [0.0, 1.0])
            .validate("blob")
            .is_err());
    }

    #[test]
    fn test_hero_layers() {
        let pipeline = ScrollTransformPipeline::hero();
        let frame = pipeline.evaluate(500.0);
        assert_eq!(frame.len(), 2);

        let lime = &frame[0].properties;
        assert_eq!(frame[0].name, "blob-lime");
        assert_eq!(lime.translate_y, Some(200.0));
        assert_eq!(lime.rotate, Some(45.0));

        let purple = pipeline.evaluate_layer("blob-purple", 500.0).unwrap();
        assert_eq!(purple.translate_y, Some(-150.0));
        assert_eq!(purple.rotate, None);
    }

    #[test]
    fn test_evaluation_is_stateless() {
        let pipeline = ScrollTransformPipeline::hero();
        let first = pipeline.evaluate(120.0);
        pipeline.evaluate(480.0);
        assert_eq!(pipeline.evaluate(120.0), first);
    }
}
