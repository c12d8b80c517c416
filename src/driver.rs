//! Hover progress state machine.
//!
//! `progress` walks toward 1 while the pointer is over the wrapper and toward
//! 0 otherwise. The distortion fed to the renderer is `sin(progress * PI)`, so
//! the image bulges on the way in and settles flat at either end. Reversing
//! mid-flight only changes the direction of the next step.

use std::f64::consts::PI;

use crate::config::WarpConfig;
use crate::error::WarpResult;
use crate::mesh::MeshRenderer;
use crate::surface::Surface;

/// Outcome of one animation step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Step {
    pub progress: f64,
    pub distortion: f64,
    /// `progress` reached its target; the caller should stop scheduling steps.
    pub settled: bool,
}

#[derive(Clone, Debug)]
pub struct HoverDriver {
    hovering: bool,
    progress: f64,
    running: bool,
    speed: f64,
    duration_ms: f64,
}

impl HoverDriver {
    pub fn new(config: &WarpConfig) -> Self {
        Self {
            hovering: false,
            progress: 0.0,
            running: false,
            speed: config.speed(),
            duration_ms: config.duration_ms,
        }
    }

    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Returns `true` if the caller must start the frame loop.
    pub fn pointer_enter(&mut self) -> bool {
        self.hovering = true;
        self.start()
    }

    /// Returns `true` if the caller must start the frame loop.
    pub fn pointer_leave(&mut self) -> bool {
        self.hovering = false;
        self.start()
    }

    fn start(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        true
    }

    fn target(&self) -> f64 {
        if self.hovering { 1.0 } else { 0.0 }
    }

    /// Fixed-timestep step of one nominal frame.
    pub fn step(&mut self) -> Step {
        self.advance(self.speed)
    }

    /// Delta-time step: advance by `dt_ms` worth of the transition.
    pub fn step_by(&mut self, dt_ms: f64) -> Step {
        self.advance(dt_ms.max(0.0) / self.duration_ms)
    }

    fn advance(&mut self, delta: f64) -> Step {
        let target = self.target();
        self.progress = if target > self.progress {
            (self.progress + delta).min(target)
        } else {
            (self.progress - delta).max(target)
        };

        let settled = self.progress == target;
        if settled {
            self.running = false;
        }
        Step {
            progress: self.progress,
            distortion: distortion_for(self.progress),
            settled,
        }
    }

    /// Step once and draw the resulting frame.
    ///
    /// Progress advances even when the renderer has no image yet, so the
    /// first frame after loading shows the then-current state.
    pub fn tick<S: Surface>(&mut self, renderer: &mut MeshRenderer<S>) -> WarpResult<Step> {
        let step = self.step();
        renderer.render(step.distortion)?;
        Ok(step)
    }
}

/// Bell curve over progress: 0 at both ends, 1 at the midpoint.
pub fn distortion_for(progress: f64) -> f64 {
    (progress * PI).sin()
}
