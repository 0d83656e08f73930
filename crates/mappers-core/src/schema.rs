pub mod entity;

pub mod source;
