//! Display module
//!
//! Pure mappings from timer progress to what a presentation layer draws.

pub mod growth;
pub mod view;

pub use growth::GrowthVisual;
pub use view::FocusView;
