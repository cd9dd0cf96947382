pub mod back_to_top;
pub mod menu;
pub mod reconcile;
