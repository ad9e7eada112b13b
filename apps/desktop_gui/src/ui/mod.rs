//! UI layer for the desktop app: the application shell.

pub mod app;

pub use app::DesktopGuiApp;
