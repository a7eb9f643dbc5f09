pub mod principles;
pub mod suggest;
