//! Headless motion scenarios
//!
//! A scenario is a JSON list of host inputs and frame advances played against
//! a mounted `PageSession`. Targets are referenced by name and resolved
//! through the session.

use anyhow::{anyhow, bail, Context, Result};
use nexus_core::{Event, TargetId};
use nexus_motion::{Frame, PageSession};
use serde::Deserialize;
use std::path::Path;

/// Sequence of scenario steps
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    /// Host frame interval
    #[serde(default = "default_frame_ms")]
    pub frame_ms: f64,
    pub steps: Vec<ScenarioStep>,
}

fn default_frame_ms() -> f64 {
    1000.0 / 60.0
}

impl Scenario {
    pub fn from_json(input: &str) -> Result<Self> {
        let scenario: Scenario = serde_json::from_str(input)?;
        if !(scenario.frame_ms.is_finite() && scenario.frame_ms > 0.0) {
            bail!("frame_ms must be finite and positive, got {}", scenario.frame_ms);
        }
        Ok(scenario)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("Invalid scenario {}", path.display()))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioStep {
    PointerMove { x: f32, y: f32 },
    Scroll { offset_y: f32 },
    Resize { width: f32, height: f32 },
    Enter { target: String },
    Leave { target: String },
    Click { target: String },
    Layout { target: String, top: f32, height: f32 },
    Visibility { target: String, fraction: f32 },
    /// Render frames covering `ms` of host time
    Advance { ms: f64 },
    /// Render `count` frames
    Frames { count: u32 },
    /// Record the most recent frame
    Snapshot,
}

/// Plays scenarios and collects frames
pub struct ScenarioRunner {
    now_ms: f64,
    every: Option<u32>,
    rendered: u32,
    last: Option<Frame>,
    recorded: Vec<Frame>,
}

impl ScenarioRunner {
    /// `every` records each n-th rendered frame in addition to snapshots
    pub fn new(every: Option<u32>) -> Self {
        Self {
            now_ms: 0.0,
            every: every.filter(|n| *n > 0),
            rendered: 0,
            last: None,
            recorded: Vec::new(),
        }
    }

    /// Play every step; returns the recorded frames, or the final frame when
    /// nothing was recorded
    pub fn run(mut self, session: &mut PageSession, scenario: &Scenario) -> Result<Vec<Frame>> {
        self.render(session)?;
        for (index, step) in scenario.steps.iter().enumerate() {
            self.step(session, scenario.frame_ms, step)
                .with_context(|| format!("Step {index} ({step:?}) failed"))?;
        }
        if self.recorded.is_empty() {
            self.recorded.extend(self.last.take());
        }
        Ok(self.recorded)
    }

    fn step(&mut self, session: &mut PageSession, frame_ms: f64, step: &ScenarioStep) -> Result<()> {
        match step {
            ScenarioStep::PointerMove { x, y } => {
                session.handle_event(Event::pointer_move(*x, *y).at(self.now_ms));
            }
            ScenarioStep::Scroll { offset_y } => {
                session.handle_event(Event::scroll(*offset_y).at(self.now_ms));
            }
            ScenarioStep::Resize { width, height } => {
                session.handle_event(Event::resize(*width, *height).at(self.now_ms));
            }
            ScenarioStep::Enter { target } => {
                let id = resolve(session, target)?;
                session.handle_event(Event::pointer_enter(id).at(self.now_ms));
            }
            ScenarioStep::Leave { target } => {
                let id = resolve(session, target)?;
                session.handle_event(Event::pointer_leave(id).at(self.now_ms));
            }
            ScenarioStep::Click { target } => {
                let id = resolve(session, target)?;
                session.handle_event(Event::click(id).at(self.now_ms));
            }
            ScenarioStep::Layout {
                target,
                top,
                height,
            } => {
                let id = resolve(session, target)?;
                session.handle_event(Event::layout(id, *top, *height).at(self.now_ms));
            }
            ScenarioStep::Visibility { target, fraction } => {
                let id = resolve(session, target)?;
                session.handle_event(Event::intersection(id, *fraction).at(self.now_ms));
            }
            ScenarioStep::Advance { ms } => {
                let frames = (ms / frame_ms).ceil().max(0.0) as u32;
                self.advance(session, frame_ms, frames)?;
            }
            ScenarioStep::Frames { count } => {
                self.advance(session, frame_ms, *count)?;
            }
            ScenarioStep::Snapshot => {
                if let Some(frame) = self.last.clone() {
                    self.recorded.push(frame);
                }
            }
        }
        Ok(())
    }

    fn advance(&mut self, session: &mut PageSession, frame_ms: f64, frames: u32) -> Result<()> {
        for _ in 0..frames {
            self.now_ms += frame_ms;
            self.render(session)?;
        }
        Ok(())
    }

    fn render(&mut self, session: &mut PageSession) -> Result<()> {
        let frame = session
            .frame(self.now_ms)
            .ok_or_else(|| anyhow!("session is unmounted"))?;
        self.rendered += 1;
        if let Some(n) = self.every {
            if self.rendered % n == 0 {
                self.recorded.push(frame.clone());
            }
        }
        self.last = Some(frame);
        Ok(())
    }
}

fn resolve(session: &PageSession, name: &str) -> Result<TargetId> {
    session
        .target(name)
        .ok_or_else(|| anyhow!("Unknown target `{name}`"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use nexus_motion::{ContentTable, MotionConfig, OverlayPhase};

    fn session() -> PageSession {
        PageSession::mount(MotionConfig::default(), ContentTable::default()).unwrap()
    }

    #[test]
    fn test_parse_steps() {
        let scenario = Scenario::from_json(
            r#"{
                "steps": [
                    { "type": "pointer_move", "x": 10, "y": 20 },
                    { "type": "click", "target": "menu-button" },
                    { "type": "advance", "ms": 100 },
                    { "type": "snapshot" }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(scenario.steps.len(), 4);
        assert!((scenario.frame_ms - 16.666).abs() < 0.01);
        assert!(matches!(scenario.steps[1], ScenarioStep::Click { .. }));
    }

    #[test]
    fn test_open_menu_scenario() {
        let scenario = Scenario::from_json(
            r#"{
                "steps": [
                    { "type": "resize", "width": 1280, "height": 800 },
                    { "type": "click", "target": "menu-button" },
                    { "type": "frames", "count": 1 },
                    { "type": "snapshot" },
                    { "type": "advance", "ms": 2000 },
                    { "type": "snapshot" }
                ]
            }"#,
        )
        .unwrap();
        let mut session = session();
        let frames = ScenarioRunner::new(None).run(&mut session, &scenario).unwrap();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].overlay.phase, OverlayPhase::Opening);
        assert_eq!(frames[1].overlay.phase, OverlayPhase::Open);
    }

    #[test]
    fn test_unknown_target_fails() {
        let scenario = Scenario::from_json(
            r#"{ "steps": [{ "type": "enter", "target": "nope" }] }"#,
        )
        .unwrap();
        let mut session = session();
        let err = ScenarioRunner::new(None)
            .run(&mut session, &scenario)
            .unwrap_err();
        assert!(format!("{err:#}").contains("Unknown target `nope`"));
    }

    #[test]
    fn test_rejects_non_positive_frame_interval() {
        for frame_ms in ["0", "-16.0"] {
            let input = format!(r#"{{ "frame_ms": {frame_ms}, "steps": [] }}"#);
            let err = Scenario::from_json(&input).unwrap_err();
            assert!(err.to_string().contains("frame_ms must be finite and positive"));
        }
        assert!(Scenario::from_json(r#"{ "frame_ms": 8.0, "steps": [] }"#).is_ok());
    }

    #[test]
    fn test_every_nth_frame() {
        let scenario = Scenario::from_json(r#"{ "steps": [{ "type": "frames", "count": 9 }] }"#)
            .unwrap();
        let mut session = session();
        let frames = ScenarioRunner::new(Some(5)).run(&mut session, &scenario).unwrap();
        // frames 5 and 10 of 10 rendered
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[1].frame, 10);
    }

    #[test]
    fn test_final_frame_without_snapshots() {
        let scenario = Scenario::from_json(r#"{ "steps": [{ "type": "frames", "count": 3 }] }"#)
            .unwrap();
        let mut session = session();
        let frames = ScenarioRunner::new(None).run(&mut session, &scenario).unwrap();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].frame, 4);
    }
}
