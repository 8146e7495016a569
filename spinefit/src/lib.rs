//! Camera auto-fit, grid layout and render-backend fallback for posed Spine skeletons.
//!
//! This crate is runtime-agnostic: it consumes world-space vertices produced by a skeletal
//! animation runtime and never draws anything itself.

#![forbid(unsafe_code)]

mod bounds;
mod camera;
mod config;
mod error;
mod fallback;
mod grid;
mod shape;
mod stage;

#[cfg(feature = "json")]
pub mod catalog;

pub use bounds::*;
pub use camera::*;
pub use config::*;
pub use error::*;
pub use fallback::*;
pub use grid::*;
pub use shape::*;
pub use stage::*;


#[cfg(test)]
mod shape_tests;

#[cfg(test)]
mod camera_tests;




#[cfg(all(test, feature = "json"))]
mod catalog_tests;


#[cfg(all(test, feature = "glam"))]
mod glam_tests;
