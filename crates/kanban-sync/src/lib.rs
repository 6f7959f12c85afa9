pub mod http;
pub mod reconciler;
pub mod session;
pub mod traits;

pub use http::HttpTaskService;
pub use reconciler::{ReconcileHandle, ReconcileStatus, Reconciler};
pub use session::BoardSession;
pub use traits::*;
