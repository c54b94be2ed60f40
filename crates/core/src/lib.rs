//! Document model for the order submission service: the order-type
//! vocabulary, order and template documents, and the clock-offset
//! utilities used when rendering time fields.

pub mod orders;
pub mod template;
pub mod time;
pub mod types;
pub mod voice;

pub use orders::{DocumentError, Order};
pub use template::Template;
pub use types::{OrderType, ReportReturnType};
pub use voice::{HotKey, VoiceDocument, VoiceOrder};
