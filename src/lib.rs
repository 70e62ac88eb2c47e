pub mod app;
pub mod cli;
pub mod headless;
pub mod recorder;
