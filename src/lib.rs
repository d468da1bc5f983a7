pub mod animation;
pub mod config;
pub mod console_interface;
pub mod core;
pub mod engine;
pub mod level;
pub mod models;

#[cfg(test)]
mod test;
