//! Input loading: turning data files into in-memory records.

mod loader;
mod source;

pub use loader::{Loader, LoaderConfig};
pub use source::SourceMetadata;
