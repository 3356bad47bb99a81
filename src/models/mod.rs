pub mod earnings;
pub mod video;
pub mod weather;
