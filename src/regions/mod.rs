//! Regions of interest and the interval index built from them.

mod index;
mod reader;

pub use index::{Interval, IntervalIndex};
pub use reader::{load_regions, load_regions_from_path, RegionError};
