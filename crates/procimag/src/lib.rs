#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]
#![deny(missing_docs)]

#[doc(inline)]
pub use procimag_image as image;

#[doc(inline)]
pub use procimag_imgproc as imgproc;

/// Closed set of engine operations with their parameters.
pub mod operation;

/// Current, secondary and edited image bookkeeping.
pub mod session;

pub use crate::operation::Operation;
pub use crate::session::{Session, SessionError};
