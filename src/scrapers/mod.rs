pub mod base;
pub mod openweather;
pub mod transcript;
pub mod youtube;
pub mod yahoo;
