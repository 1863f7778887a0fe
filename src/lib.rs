pub mod api;
pub mod utils;

pub use api::aggregation::AggregationClient;
pub use api::mirror::MirrorClient;
pub use api::search::{MetaSearch, SortMethod};
pub use api::transport::{HttpTransport, Transport};
pub use api::{AddonFileRecord, AddonRecord, MetadataClient};
pub use utils::errors::CurseMetaError;
