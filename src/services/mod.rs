pub mod catalog_service;
pub mod roster_api_service;
