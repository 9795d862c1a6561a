//! Vendor login with OTP verification

pub mod countdown;
pub mod wizard;

pub use countdown::Countdown;
pub use wizard::{LoginWizard, Step};
