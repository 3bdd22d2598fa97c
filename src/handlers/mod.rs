pub mod advocates;
pub mod system;
