//! Search page: price slider, filter controller and results rendering

pub mod controller;
pub mod range;
pub mod render;

pub use controller::{
    parse_numeric, FilterForm, FilterStateController, NumericField, PageLayout, PageLoadReport,
};
pub use range::{Handle, PriceRangeControl, SliderId};
pub use render::{ImageSlot, ResultCard, ResultsRenderer, ResultsView};
