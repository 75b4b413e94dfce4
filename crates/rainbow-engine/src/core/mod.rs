pub mod geometry;
pub mod location;
pub mod scene;
pub mod time;
