//! Adapters that change what a transparent system shows as its observation.
//!
//! - [`Exposed`] observes the true state instead of the observation.
//! - [`Detailed`] observes the true state and the observation together.
//!
//! Stepping and liveness are forwarded unchanged, so an adapted system drives
//! exactly like the system it wraps.

mod detailed;
mod exposed;

pub use detailed::{Detailed, detailed};
pub use exposed::{Exposed, exposed};
