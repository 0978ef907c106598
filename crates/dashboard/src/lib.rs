pub mod actions;
pub mod app;
pub mod cache;
pub mod graph_view;
pub mod layout_radial;
pub mod mock;
pub mod node_shapes;
pub mod popover;
pub mod sidebar;
pub mod state;
pub mod store;
pub mod versioned;

pub mod native;
pub mod web;

pub use app::{DashboardApp, create_app};
