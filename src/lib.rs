pub mod core;

pub use crate::core::error::{FingerprintError, FontError, LayoutError};
pub use crate::core::hash::{Txid, compute_txid};
pub use crate::core::layout::RenderConfig;
pub use crate::core::render::{RenderSummary, render_fingerprint, render_to_file};
