pub mod config;
pub mod demo;
pub mod edit;
pub mod records;
pub mod view;
