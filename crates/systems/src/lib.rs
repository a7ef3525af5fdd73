//! Reference dynamical systems for the Skein framework.
//!
//! Each module provides a concrete [`System`] that can be driven by the
//! command sources and orbits of [`skein_core`]:
//!
//! - [`cart_pole`]: balance a pole on a cart pushed left or right
//! - [`mountain_car`]: drive an under-powered car out of a valley
//! - [`grid_world`]: walk a rectangular grid towards a goal cell
//! - [`rocket`]: a vertical rocket between a floor and a ceiling
//! - [`word`]: push letters into a six-letter word
//! - [`cheese_maze`]: a partially observable maze with slippery moves
//! - [`circle`]: a point turning on a circle, seen only by its heading
//!
//! Commands implement [`Distribution`] for [`StandardUniform`], so a random
//! driver is a one-liner:
//!
//! ```
//! use rand::Rng;
//! use skein_core::{OrbitExt, pulse};
//! use skein_systems::cart_pole::{CartPole, Push};
//!
//! let mut rng = rand::rng();
//! let mut cart_pole = CartPole::default();
//!
//! let points = pulse(|| rng.random::<Push>()).orbit(&mut cart_pole).take(500).count();
//!
//! assert!(points >= 1);
//! ```
//!
//! [`System`]: skein_core::System
//! [`Distribution`]: rand::distr::Distribution
//! [`StandardUniform`]: rand::distr::StandardUniform

pub mod cart_pole;
pub mod cheese_maze;
pub mod circle;
pub mod grid_world;
pub mod mountain_car;
pub mod rocket;
pub mod word;
