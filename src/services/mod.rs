pub mod generation_service;
pub mod geocoding_service;
pub mod image_service;
pub mod itinerary_service;
pub mod map_service;
pub mod response_extractor;
