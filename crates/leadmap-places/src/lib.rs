pub mod client;
pub mod error;
pub mod normalize;
pub mod types;

pub use client::{PlacesClient, SearchRequest};
pub use error::PlacesError;
pub use normalize::normalize_place;
pub use types::{Place, SearchTextResponse};
