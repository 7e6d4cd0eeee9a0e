//! Contourfield library - animated noise contour backgrounds

pub mod animation;
pub mod backdrop;
pub mod cli;
pub mod contour;
pub mod error;
pub mod field;
pub mod headless;
pub mod noise;
pub mod params;
pub mod rendering;
pub mod surface;

pub use error::{Error, Result};
