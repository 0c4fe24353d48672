pub mod feed;
pub mod repository;
pub mod viewmodel;
pub mod window;
