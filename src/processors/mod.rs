pub mod importer;
pub mod region_registry;

pub use importer::{BatchOutcome, ImportReport, ImportRequest, Importer};
pub use region_registry::RegionRegistry;
