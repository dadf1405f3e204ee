pub mod serde;
pub mod telemetry;

pub use self::serde::*;
pub use self::telemetry::*;
