pub mod series_store;
pub mod source;

pub use series_store::SeriesStore;
pub use source::{ensure_min_bars, PriceSource};
