//! The type-erased [`Slot`] callable and adapters that build one from an
//! instance/method pair.

use std::sync::{Arc, Weak};

use parking_lot::Mutex;

/// The type-erased callable a [`Signal`](`crate::Signal`) broadcasts to.
///
/// Multiple arguments are expressed by making `A` a tuple.
pub type Slot<A, R = ()> = Box<dyn 'static + Send + FnMut(A) -> R>;

/// Adapts a shared instance and a method on it into a slot-compatible
/// callable.
///
/// The callable holds the instance strongly, keeping it alive for as long
/// as the subscription (or the callable itself) exists, and locks it for
/// the duration of each invocation.
///
/// ```
/// use graft::{slot, Signal};
/// use parking_lot::Mutex;
/// use std::sync::Arc;
///
/// struct Counter(usize);
///
/// impl Counter {
/// 	fn add(&mut self, n: usize) {
/// 		self.0 += n;
/// 	}
/// }
///
/// let counter = Arc::new(Mutex::new(Counter(0)));
/// let signal = Signal::<usize>::new();
/// let _connection = signal.connect(slot::bind(&counter, Counter::add));
///
/// signal.notify(3);
/// assert_eq!(counter.lock().0, 3);
/// ```
pub fn bind<T, A, R>(
	instance: &Arc<Mutex<T>>,
	method: fn(&mut T, A) -> R,
) -> impl 'static + Send + FnMut(A) -> R
where
	T: 'static + Send,
	A: 'static,
	R: 'static,
{
	let instance = Arc::clone(instance);
	move |args| method(&mut instance.lock(), args)
}

/// Adapts a *non-owning* instance reference and a method on it into a
/// slot-compatible callable.
///
/// Unlike [`bind`], this does not keep the instance alive. Invocations
/// after the instance is dropped return `R::default()` without any other
/// effect.
pub fn bind_weak<T, A, R>(
	instance: &Weak<Mutex<T>>,
	method: fn(&mut T, A) -> R,
) -> impl 'static + Send + FnMut(A) -> R
where
	T: 'static + Send,
	A: 'static,
	R: 'static + Default,
{
	let instance = Weak::clone(instance);
	move |args| match instance.upgrade() {
		Some(instance) => method(&mut instance.lock(), args),
		None => R::default(),
	}
}
