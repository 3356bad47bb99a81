pub mod earnings_builder;
pub mod earnings_sorter;
pub mod earnings_service;
pub mod video_service;
pub mod weather_service;
