#![warn(clippy::pedantic)]
#![warn(missing_docs)]
#![warn(unreachable_pub)]
#![doc = include_str!("../README.md")]
//!
//! # Threading Notes
//!
//! All registry operations synchronize on one mutex per [`Signal`].
//! Slots are invoked *with that mutex held*, so a slot **must not** call
//! back into the signal it is registered with.

mod connection;
pub use connection::Connection;

mod connector;
pub use connector::Connector;

mod signal;
pub use signal::Signal;

pub mod slot;
pub use slot::Slot;

#[doc = include_str!("../README.md")]
mod readme {}
