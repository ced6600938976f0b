//! Spoonsmith Core Library
//!
//! Data model and the parametric outline composer for Spoonsmith. Everything
//! here is pure: no I/O, no rendering.

pub mod composer;
pub mod config;
pub mod limits;
pub mod shapes;
pub mod spec;

pub use composer::{Composition, Layout, PresentationMode, ShapeComposer, compose};
pub use config::ComposerConfig;
pub use limits::{FormLimits, Slider, SliderRange};
pub use shapes::Primitive;
pub use spec::{BowlShape, HandleShape, SpecError, SpoonSpec};
