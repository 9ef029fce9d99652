pub mod analytic;
pub mod traits;
pub mod types;

pub use analytic::AnalyticKernel;
pub use traits::*;
pub use types::*;
