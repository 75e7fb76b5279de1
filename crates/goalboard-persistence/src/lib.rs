pub mod session;
pub mod store;
pub mod sync;
pub mod traits;

pub use session::{BoardSession, SessionConfig};
pub use store::*;
pub use sync::*;
pub use traits::*;
