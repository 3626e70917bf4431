/// Panel layouts for the main window.
pub mod details_panel;
pub mod settings_panel;
pub mod tree_panel;
