mod builder;
mod types;

pub use builder::Arranger;
pub use types::{Admission, Arrangement};
