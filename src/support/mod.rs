pub mod params;
pub mod response;
pub mod schema;
pub mod serialization;
