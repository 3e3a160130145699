//! 页面视图

pub mod admin;
pub mod commands;
pub mod confirm;
pub mod detail;
pub mod editor;
pub mod home;
pub mod listing;
