pub mod average;
pub mod split;
