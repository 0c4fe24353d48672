pub mod bindings;
pub mod coordinator;
