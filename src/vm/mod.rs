pub mod assembler;
pub mod constants;
mod disks;
mod guest;
mod network;
pub mod render;

pub use assembler::SpecAssembler;
pub use render::{OutputFormat, render};
