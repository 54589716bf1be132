//! Helpers shared by rule engines.

pub mod allowance;

#[doc(inline)]
pub use allowance::{check_allow, AllowCheck};
