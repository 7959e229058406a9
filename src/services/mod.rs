pub mod cart_service;
pub mod image_service;
pub mod totals;
