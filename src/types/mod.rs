//! Type definitions

pub mod coordinates;
pub mod job;
pub mod messages;
pub mod record;
pub mod suggestion;
pub mod vehicle;

pub use coordinates::*;
pub use job::*;
pub use messages::*;
pub use record::*;
pub use suggestion::*;
pub use vehicle::*;
