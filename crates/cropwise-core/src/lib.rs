pub mod buffer;
pub mod color;
pub mod config;
pub mod consts;
pub mod error;
pub mod features;
pub mod io;
pub mod ratio;
pub mod search;
