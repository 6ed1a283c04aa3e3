pub mod catalog;
pub mod demo;
pub mod geocode;
pub mod init;
pub mod quote;
