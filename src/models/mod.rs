pub mod item;
pub mod widget_state;
