use std::{
	panic::{catch_unwind, AssertUnwindSafe},
	sync::Arc,
};

use graft::Signal;

use _validator::Validator;

#[test]
fn a_panicking_slot_aborts_the_remaining_broadcast() {
	let v = Arc::new(Validator::new());
	let signal = Signal::<i32>::new();

	let _a = signal.connect({
		let v = Arc::clone(&v);
		move |n| v.push(("a", n))
	});
	let faulty = signal.connect(|_| panic!("subscriber failure"));
	let _c = signal.connect({
		let v = Arc::clone(&v);
		move |n| v.push(("c", n))
	});

	let unwound = catch_unwind(AssertUnwindSafe(|| signal.notify(1)));
	assert!(unwound.is_err());

	// Slots before the failure ran; slots after it did not.
	v.expect([("a", 1)]);

	// No containment and no cleanup either: the failing entry stays.
	assert_eq!(signal.len(), 3);

	// The registry is still consistent and usable.
	faulty.disconnect();
	signal.notify(2);
	v.expect([("a", 2), ("c", 2)]);
}

#[test]
fn panics_propagate_on_every_broadcast() {
	let signal = Signal::<()>::new();
	let _faulty = signal.connect(|()| panic!("subscriber failure"));

	for _ in 0..3 {
		assert!(catch_unwind(AssertUnwindSafe(|| signal.notify(()))).is_err());
	}
	assert_eq!(signal.len(), 1);
}
