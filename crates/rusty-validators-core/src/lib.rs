//! Rusty-Validators Core
//!
//! Pure predicates shared by the form validator plugins. Nothing in here knows
//! about elements, forms or the plugin registry: inputs are plain strings and
//! sets, outputs are booleans or parsed values.

pub mod collection;
pub mod date;
pub mod mandatory;
pub mod mime;

// Re-export all predicates
pub use collection::*;
pub use date::*;
pub use mandatory::*;
pub use mime::*;
