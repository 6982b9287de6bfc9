//! [`Signal`] is the broadcaster: an ordered slot registry plus a
//! lock-free enablement flag.

use core::{
	fmt::{self, Debug, Formatter},
	ops::AddAssign,
	sync::atomic::{AtomicBool, Ordering},
};
use std::{
	collections::VecDeque,
	sync::{Arc, Weak},
};

use lock_api::{Mutex, RawMutex};

use crate::{
	connection::{SlotRegistry, Token},
	Connection, Connector, Slot,
};

/// A thread-safe broadcaster for the callable signature `FnMut(A) -> R`.
///
/// Slots are invoked in registration order by [`notify`](`Signal::notify`).
/// Each registration yields a [`Connection`] that cancels exactly that
/// subscription, from any thread, even after the signal has been dropped.
///
/// The registry lock is pluggable through the `M` parameter and defaults
/// to [`parking_lot::RawMutex`]. `M` **must not** be reentrant: the
/// aliasing guarantees of [`lock_api::Mutex`] depend on exclusion.
///
/// Dropping a `Signal` detaches all outstanding handles without notifying
/// any subscriber. `Signal` is intentionally not [`Clone`]; a clone would
/// make "dropping the signal detaches everything" ambiguous.
pub struct Signal<A, R = (), M: RawMutex = parking_lot::RawMutex> {
	core: Arc<Core<A, R, M>>,
}

struct Core<A, R, M: RawMutex> {
	entries: Mutex<M, VecDeque<Entry<A, R>>>,
	enabled: AtomicBool,
}

struct Entry<A, R> {
	token: Token,
	slot: Slot<A, R>,
}

impl<A, R, M: RawMutex> Core<A, R, M> {
	fn notify(&self, args: A)
	where
		A: Clone,
	{
		if !self.enabled.load(Ordering::Acquire) {
			return;
		}
		let mut entries = self.entries.lock();
		for entry in entries.iter_mut() {
			(entry.slot)(args.clone());
		}
	}
}

impl<A: 'static, R: 'static, M: 'static + RawMutex + Send + Sync> SlotRegistry
	for Core<A, R, M>
{
	fn remove(&self, token: Token) -> bool {
		let mut entries = self.entries.lock();
		if let Some(index) = entries.iter().position(|entry| entry.token == token) {
			drop(entries.remove(index));
			true
		} else {
			false
		}
	}
}

impl<A: 'static, R: 'static, M: 'static + RawMutex + Send + Sync> Signal<A, R, M> {
	/// Creates an empty, enabled signal.
	#[must_use]
	pub fn new() -> Self {
		Self {
			core: Arc::new(Core {
				entries: Mutex::new(VecDeque::new()),
				enabled: AtomicBool::new(true),
			}),
		}
	}

	/// Registers `slot` at the tail of the notification order and returns
	/// its cancellation handle.
	///
	/// Never fails. Registering the same callable twice creates two
	/// independent subscriptions; they are told apart by their handles,
	/// not by callable equality.
	///
	/// Discarding the [`Connection`] leaves the subscription in place for
	/// the lifetime of the signal.
	pub fn connect(&self, slot: impl 'static + Send + FnMut(A) -> R) -> Connection {
		self.connect_boxed(Box::new(slot))
	}

	fn connect_boxed(&self, slot: Slot<A, R>) -> Connection {
		let token = Token::fresh();
		let registry = Arc::downgrade(&self.core);
		let registry: Weak<dyn SlotRegistry> = registry;
		let connection = Connection::new(registry, token);
		self.core.entries.lock().push_back(Entry { token, slot });
		connection
	}

	/// Cancels the subscription `connection` refers to.
	///
	/// Equivalent to [`Connection::disconnect`], except that a handle
	/// issued by a *different* signal is ignored here (checked before the
	/// registry lock is taken). Idempotent; total.
	pub fn disconnect(&self, connection: &Connection) {
		if let Some(registry) = connection.registry() {
			if Arc::as_ptr(&registry).cast::<()>() == Arc::as_ptr(&self.core).cast::<()>() {
				registry.remove(connection.token());
			}
		}
	}

	/// Invokes every currently registered slot, in registration order,
	/// cloning `args` per invocation. Slot return values are discarded.
	///
	/// Returns immediately, without touching the registry, while the
	/// signal is [disabled](`Signal::set_enabled`).
	///
	/// # Panics
	///
	/// A panicking slot propagates out of this call. Slots later in the
	/// order are not invoked for this broadcast; no entry is removed and
	/// the registry remains consistent.
	///
	/// # Deadlocks
	///
	/// The registry lock is held for the entire iteration. A slot that
	/// calls `connect`, `disconnect`, `notify` or [`len`](`Signal::len`)
	/// on the *same* signal deadlocks. This is a caller obligation.
	pub fn notify(&self, args: A)
	where
		A: Clone,
	{
		self.core.notify(args);
	}

	/// The number of registered slots. Lock-guarded snapshot.
	#[must_use]
	pub fn len(&self) -> usize {
		self.core.entries.lock().len()
	}

	/// Whether no slots are registered. Lock-guarded snapshot.
	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Atomically replaces the enablement flag, **returning the prior
	/// value** so nested scopes can save and restore it.
	///
	/// Registry contents are unaffected; a disabled signal keeps its
	/// subscriptions and hands out handles as usual.
	pub fn set_enabled(&self, enabled: bool) -> bool {
		self.core.enabled.swap(enabled, Ordering::AcqRel)
	}

	/// Whether [`notify`](`Signal::notify`) currently broadcasts.
	#[must_use]
	pub fn is_enabled(&self) -> bool {
		self.core.enabled.load(Ordering::Acquire)
	}
}

impl<A: Clone + 'static, M: 'static + RawMutex + Send + Sync> Signal<A, (), M> {
	/// A slot that re-broadcasts received arguments through this signal,
	/// for chaining signals together.
	///
	/// The returned callable holds this signal weakly: once the signal is
	/// dropped, invocations become no-ops instead of dangling.
	#[must_use]
	pub fn forwarder(&self) -> impl 'static + Send + FnMut(A) {
		let core = Arc::downgrade(&self.core);
		move |args| {
			if let Some(core) = core.upgrade() {
				core.notify(args);
			}
		}
	}
}

impl<A: 'static, R: 'static, M: 'static + RawMutex + Send + Sync> Default for Signal<A, R, M> {
	fn default() -> Self {
		Self::new()
	}
}

impl<A: 'static, R: 'static, M: 'static + RawMutex + Send + Sync> Connector<A, R>
	for Signal<A, R, M>
{
	fn connect(&self, slot: Slot<A, R>) -> Connection {
		self.connect_boxed(slot)
	}

	fn disconnect(&self, connection: &Connection) {
		Signal::disconnect(self, connection);
	}
}

/// `signal += slot` connects `slot` and discards the handle, leaving the
/// subscription in place for the lifetime of the signal.
impl<F, A: 'static, R: 'static, M: 'static + RawMutex + Send + Sync> AddAssign<F>
	for Signal<A, R, M>
where
	F: 'static + Send + FnMut(A) -> R,
{
	fn add_assign(&mut self, slot: F) {
		drop(self.connect(slot));
	}
}

impl<A, R, M: RawMutex> Debug for Signal<A, R, M> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("Signal")
			.field("len", &self.core.entries.lock().len())
			.field("enabled", &self.core.enabled.load(Ordering::Acquire))
			.finish_non_exhaustive()
	}
}
