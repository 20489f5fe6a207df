pub mod health;
pub mod menu;
pub mod pages;
pub mod render;
pub mod server;
