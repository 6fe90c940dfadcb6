pub mod schedule;
pub mod synth;
pub mod validate;
