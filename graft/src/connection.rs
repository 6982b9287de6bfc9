//! [`Connection`] is the cancellation handle issued by [`Signal::connect`](`crate::Signal::connect`).

use core::{
	fmt::{self, Debug, Formatter},
	num::NonZeroU64,
	sync::atomic::{AtomicU64, Ordering},
};
use std::sync::{Arc, Weak};

use tap::Pipe;

/// Process-wide subscription identity. Never reused.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) struct Token(NonZeroU64);

static TOKEN_COUNTER: AtomicU64 = AtomicU64::new(0);

impl Token {
	pub(crate) fn fresh() -> Self {
		//TODO: Relax ordering?
		NonZeroU64::try_from(TOKEN_COUNTER.fetch_add(1, Ordering::SeqCst) + 1)
			.expect("infallible within reasonable time")
			.pipe(Self)
	}
}

/// Internal view of a signal core: removal of one entry by [`Token`].
pub(crate) trait SlotRegistry: Send + Sync {
	/// **Must** remove at most the one entry whose token matches.
	/// **Returns** whether an entry was removed.
	fn remove(&self, token: Token) -> bool;
}

/// A shareable handle for one subscription on a [`Signal`](`crate::Signal`).
///
/// Returned by [`Signal::connect`](`crate::Signal::connect`). Clones share
/// the same underlying handle. Discarding every clone does *not* end the
/// subscription; it merely forfeits the ability to cancel it early.
///
/// The handle refers to its signal weakly, so it never keeps the signal
/// alive and remains valid (as an inert token) after the signal is gone.
#[derive(Clone)]
pub struct Connection {
	inner: Arc<ConnectionInner>,
}

struct ConnectionInner {
	registry: Weak<dyn SlotRegistry>,
	token: Token,
}

impl Connection {
	pub(crate) fn new(registry: Weak<dyn SlotRegistry>, token: Token) -> Self {
		Self {
			inner: Arc::new(ConnectionInner { registry, token }),
		}
	}

	/// Cancels the associated subscription.
	///
	/// Idempotent and total: if the subscription was already cancelled, or
	/// the owning [`Signal`](`crate::Signal`) has been dropped, this does
	/// nothing.
	///
	/// # Logic
	///
	/// This **may** be called from any thread at any time, including
	/// concurrently with the owning signal's drop and with any combination
	/// of `connect`/`disconnect`/`notify` calls on that signal. A signal
	/// observed alive here is kept alive until the removal completes.
	///
	/// # Deadlocks
	///
	/// Calling this from inside a slot invoked by the *same* signal
	/// deadlocks, as the registry lock is still held there.
	pub fn disconnect(&self) {
		if let Some(registry) = self.registry() {
			registry.remove(self.inner.token);
		}
	}

	pub(crate) fn registry(&self) -> Option<Arc<dyn SlotRegistry>> {
		self.inner.registry.upgrade()
	}

	pub(crate) fn token(&self) -> Token {
		self.inner.token
	}
}

impl Debug for Connection {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Connection").field(&self.inner.token).finish()
	}
}
