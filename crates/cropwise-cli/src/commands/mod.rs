pub mod color;
pub mod config;
pub mod crop;
pub mod features;
pub mod info;
