mod alert;
mod header;
mod loading;

pub use alert::{Alert, AlertKind};
pub use header::Header;
pub use loading::{FullPageSpinner, Spinner};
