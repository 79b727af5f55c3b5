pub mod ai;
pub mod navigation;
pub mod question;
