pub mod distance;
pub mod nearby;
