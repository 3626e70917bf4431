/// UI widgets for TreeLens.

pub mod notifications;
pub mod size_bar;
pub mod status_bar;
pub mod toolbar;
pub mod tree_view;
pub mod treemap;
