pub mod future_value;
pub mod sip;
