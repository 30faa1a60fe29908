mod error;
mod record;

pub use record::{AtomRecord, BondRecord, InputFrame, read_frame};

pub use error::Error;
