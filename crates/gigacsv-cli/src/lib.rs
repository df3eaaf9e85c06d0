pub mod files;
pub mod logging;
pub mod render;
pub mod settings;
pub mod shell;
