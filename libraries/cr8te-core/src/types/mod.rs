mod ids;
mod track;

pub use ids::TrackId;
pub use track::{
    ArtistRef, ChainAttribute, ChainMetadata, ChainTrack, CollectionRef, DatabaseTrack,
    TrackRecord,
};
