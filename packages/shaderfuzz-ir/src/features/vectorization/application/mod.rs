mod analysis;
mod apply;
mod finder;

pub use finder::VectorizationFinder;
