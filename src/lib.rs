pub mod canvas;
pub mod gui;
pub mod logging;
pub mod overlay;
pub mod recognize;
pub mod session;
pub mod settings;
pub mod toast_log;
