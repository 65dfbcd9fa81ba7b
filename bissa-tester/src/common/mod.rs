pub mod failure;
pub mod scenario;

pub use failure::FailureCapture;
