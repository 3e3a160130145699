//! 通用组件

pub mod dialog;
pub mod menubar;
pub mod statusbar;
