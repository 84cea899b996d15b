mod height_map_filter;
mod kernel;

pub use height_map_filter::HeightMapFilter;
pub use kernel::Kernel;
