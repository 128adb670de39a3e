pub mod runtime;
pub mod wake;
