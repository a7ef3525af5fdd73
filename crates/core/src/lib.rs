//! Core traits and lazy iterators for driving discrete-time dynamical systems.
//!
//! This crate defines the contracts a simulator or environment implements and
//! the pull-based pipeline that drives it through time:
//!
//! - [`System`] / [`TransparentSystem`]: a mutable state machine that can be
//!   reset, observed, stepped, and queried for liveness
//! - [`Controller`]: a policy mapping an observation to a command
//! - [`pulse`], [`controller`]: command sources fed into an orbit
//! - [`Orbit`]: the lazy trajectory of a system driven by a command source
//! - [`Transitions`]: consecutive orbit points paired into [`Transition`]s
//! - [`adapters`]: views of a transparent system through its true state
//!
//! Everything is synchronous and strictly lazy: no system is stepped and no
//! command is produced until a consumer asks for the next value.
//!
//! ```
//! use skein_core::{OrbitExt, System, TransitionsExt, pulse};
//!
//! /// A fuse that burns one unit per step and is spent at zero.
//! struct Fuse(u32);
//!
//! impl System for Fuse {
//!     type State = u32;
//!     type Observation = u32;
//!     type Command = ();
//!     type Report = bool;
//!
//!     fn assign(&mut self, state: u32) { self.0 = state; }
//!     fn observe(&self) -> u32 { self.0 }
//!     fn step(&mut self, _: ()) -> bool {
//!         if self.0 == 0 {
//!             return false;
//!         }
//!         self.0 -= 1;
//!         true
//!     }
//!     fn is_alive(&self) -> bool { self.0 > 0 }
//! }
//!
//! let mut fuse = Fuse(3);
//! let transitions: Vec<_> = pulse(|| ()).orbit(&mut fuse).transitions().collect();
//!
//! assert_eq!(transitions.len(), 3);
//! assert!(transitions[2].is_terminal());
//! ```

pub mod adapters;
mod controller;
mod episode;
mod orbit;
mod source;
mod system;
mod transition;

#[cfg(test)]
mod test_utils;

pub use adapters::{Detailed, Exposed, detailed, exposed};
pub use controller::Controller;
pub use episode::{collect_transitions, episode};
pub use orbit::{Orbit, OrbitExt, OrbitPoint, PointOf};
pub use source::{CommandSource, Controlled, Pulse, controller, pulse};
pub use system::{System, TransparentSystem};
pub use transition::{Transition, TransitionOf, Transitions, TransitionsExt};
