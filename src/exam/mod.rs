// src/exam/mod.rs

pub mod scorer;
pub mod selector;
pub mod session;
pub mod window;
