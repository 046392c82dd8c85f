pub mod charts;
pub mod countries;
pub mod form;
pub mod hero;
pub mod map;
pub mod popup;
pub mod showcase;
