pub mod elpriset;
pub mod foxess;
