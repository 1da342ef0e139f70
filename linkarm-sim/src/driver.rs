use linkarm_core::nalgebra::{self as na, Point2};
use linkarm_core::robot::Chain;

use crate::program::Program;
use crate::viewport::Viewport;

/// Maximum distance between both tool position paths before we complain.
const TOOL_TOLERANCE: f32 = 1.0;

/// Snapshot of the chain after a tick.
#[derive(Debug)]
pub struct Frame {
    /// Iteration count.
    pub iteration: u64,
    /// Joint endpoints, root first, in surface coordinates.
    pub joints: Vec<(Point2<f32>, Point2<f32>)>,
    /// Tool position from the closed-form formula.
    pub tool: Point2<f32>,
    /// Tool position from the last joint.
    pub effector: Point2<f32>,
}

impl Frame {
    /// Whether both tool position paths agree.
    pub fn is_consistent(&self) -> bool {
        (self.tool.x - self.effector.x).abs() <= TOOL_TOLERANCE
            && (self.tool.y - self.effector.y).abs() <= TOOL_TOLERANCE
    }
}

/// Drives the chain one tick at a time.
///
/// Each tick applies the next setpoint from the program, runs the update pass
/// and reads back the geometry. Nothing else touches the chain in between.
pub struct Driver {
    chain: Chain,
    program: Program,
    viewport: Viewport,
    iteration: u64,
}

impl Driver {
    pub fn new(chain: Chain, program: Program, viewport: Viewport) -> Self {
        Self {
            chain,
            program,
            viewport,
            iteration: 0,
        }
    }

    #[inline]
    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    #[inline]
    pub fn iteration(&self) -> u64 {
        self.iteration
    }

    /// Whether the tick limit, if any, has been reached.
    pub fn is_exhausted(&self, ticks: Option<u64>) -> bool {
        ticks.is_some_and(|ticks| self.iteration >= ticks)
    }

    /// Whether the program has setpoints left.
    pub fn is_running(&self) -> bool {
        !self.program.is_empty()
    }

    pub fn tick(&mut self) -> Frame {
        if let Some(setpoint) = self.program.next() {
            log::debug!("Setpoint {}", setpoint);
            self.chain.set_joint_angles_degrees(setpoint.angles());
        }

        self.chain.update_all();

        let frame = Frame {
            iteration: self.iteration,
            joints: self
                .chain
                .iter()
                .map(|joint| (joint.start(), joint.end()))
                .collect(),
            tool: self.chain.tool_position(),
            effector: self.chain.end_effector(),
        };

        self.iteration += 1;

        frame
    }

    /// Log a frame in display coordinates.
    pub fn report(&self, frame: &Frame) {
        for (idx, ((start, end), joint)) in
            frame.joints.iter().zip(&self.chain).enumerate()
        {
            let start = self.viewport.to_display(start);
            let end = self.viewport.to_display(end);

            log::debug!(
                "Joint {} [{:.2}, {:.2}] -> [{:.2}, {:.2}] {}°",
                idx + 1,
                start.x,
                start.y,
                end.x,
                end.y,
                joint.angle_degrees()
            );
        }

        if !frame.is_consistent() {
            log::warn!(
                "Tool position diverges from effector by {:.2}",
                na::distance(&frame.tool, &frame.effector)
            );
        }

        if !self.viewport.contains(&frame.tool) {
            log::trace!("Tool is outside of the viewport");
        }

        let tool = self.viewport.to_display(&frame.tool);

        log::info!(
            "Tick {:5} Tool ({}, {})",
            frame.iteration,
            tool.x,
            tool.y
        );
    }
}
