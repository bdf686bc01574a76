pub mod catalogue;
pub mod investments;
pub mod loans;
pub mod personal;
pub mod stocks;
pub mod travel;

pub type CommandResult = Result<serde_json::Value, Box<dyn std::error::Error>>;
