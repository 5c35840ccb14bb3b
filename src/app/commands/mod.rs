pub mod apply;
pub mod bucket;
pub mod remove;
pub mod upload;
