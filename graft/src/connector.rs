//! [`Connector`] abstracts over "something slots can be connected to".

use crate::{Connection, Slot};

/// Object-safe subscription surface implemented by every
/// [`Signal`](`crate::Signal`), regardless of its lock parameter.
///
/// Use this where calling code must hold *some* broadcaster for a given
/// signature without naming the concrete type, e.g. as
/// `&dyn Connector<A, R>`.
pub trait Connector<A, R = ()> {
	/// Registers `slot` at the tail of the notification order.
	///
	/// Never fails. Registering the same callable twice creates two
	/// independent subscriptions with two independent handles.
	fn connect(&self, slot: Slot<A, R>) -> Connection;

	/// Cancels the subscription `connection` refers to.
	///
	/// No-op if the handle was issued by a different broadcaster, was
	/// already disconnected, or is detached because its broadcaster is
	/// gone.
	fn disconnect(&self, connection: &Connection);
}
