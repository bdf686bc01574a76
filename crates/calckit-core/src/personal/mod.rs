pub mod age;
pub mod bmi;
