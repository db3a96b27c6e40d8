pub mod app;
pub mod config;
pub mod genre_icon;
pub mod models;
pub mod omdb;
pub mod presenter;
pub mod render;
pub mod session;
pub mod tmdb;
pub mod view;
