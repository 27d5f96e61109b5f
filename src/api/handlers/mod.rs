pub mod health;
pub mod metrics;
pub mod pincode;
pub mod wrapped;
