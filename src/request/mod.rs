mod loader;
mod types;

pub use loader::{LoadedRequest, load_requests};
pub use types::{ContainerSpec, ItemSpec, LayoutRequest, Unit};
