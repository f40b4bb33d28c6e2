pub mod advisory;
pub mod observation;

pub use advisory::*;
pub use observation::*;
