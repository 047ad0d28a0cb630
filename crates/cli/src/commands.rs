pub mod debug;
pub mod describe;
pub mod detect;
pub mod plan;
pub mod repos;
