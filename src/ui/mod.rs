/// Screens of the catalog browser and their shared widgets

pub mod detail;
pub mod home;
pub mod list;
pub mod widgets;
