pub mod hotel;
pub mod location;
pub mod plan;
pub mod trip;
