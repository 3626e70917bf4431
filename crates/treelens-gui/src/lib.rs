/// TreeLens GUI — egui-based desktop frontend.
///
/// This crate contains all UI code. Layout, navigation and selection logic
/// live in `treelens-core`.
pub mod app;
pub mod icon;
pub mod panels;
pub mod state;
pub mod theme;
pub mod widgets;

pub use app::{StartupOptions, TreeLensApp, TreeLensState};
