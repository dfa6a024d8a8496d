// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Control Logic
//!
//! Pure decision logic for the operator-control task. Everything here talks to hardware only
//! through the seams in [`crate::io`], so it runs unchanged on the host under test.
//!
//! ## Modules
//!
//! - [`drive`] - Arcade mapping from sticks to the differential drivetrain.
//! - [`arm`] - Position-seeking arm controller with button-driven target.
//! - [`tray`] - Tray lift pulse pattern and intake rollers.
//! - [`dropoff`] - Timed macro sequencer and the cube dropoff choreography.
//! - [`opcontrol`] - The 20 ms loop tying all of the above together.

pub mod arm;
pub mod drive;
pub mod dropoff;
pub mod opcontrol;
pub mod tray;

pub use arm::{ArmController, ArmEvent, GainSchedule};
pub use drive::DriveCommand;
pub use dropoff::{Action, Sequencer, Status, Step};
pub use opcontrol::{ControlCycleState, OpControl};
pub use tray::{Rollers, Tray};
