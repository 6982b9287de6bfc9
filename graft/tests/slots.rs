use std::sync::Arc;

use graft::{slot, Signal};
use parking_lot::Mutex;

use _validator::Validator;

struct Tally {
	total: i64,
	invocations: usize,
}

impl Tally {
	fn record(&mut self, (amount, weight): (i64, i64)) {
		self.total += amount * weight;
		self.invocations += 1;
	}

	fn total_after_record(&mut self, amount: i64) -> i64 {
		self.total += amount;
		self.total
	}
}

#[test]
fn bind_forwards_and_keeps_the_instance_alive() {
	let tally = Arc::new(Mutex::new(Tally {
		total: 0,
		invocations: 0,
	}));
	let signal = Signal::<(i64, i64)>::new();
	let _handle = signal.connect(slot::bind(&tally, Tally::record));

	signal.notify((2, 10));
	signal.notify((3, 1));

	// The subscription holds its own strong reference.
	let weak = Arc::downgrade(&tally);
	drop(tally);
	let tally = weak.upgrade().expect("instance kept alive by the slot");
	assert_eq!(tally.lock().total, 23);
	assert_eq!(tally.lock().invocations, 2);
}

#[test]
fn bind_weak_goes_inert_with_its_instance() {
	let tally = Arc::new(Mutex::new(Tally {
		total: 40,
		invocations: 0,
	}));
	let mut adapted = slot::bind_weak(&Arc::downgrade(&tally), Tally::total_after_record);

	assert_eq!(adapted(2), 42);

	drop(tally);
	// The instance is gone; invocations fall back to the default value.
	assert_eq!(adapted(7), 0);
}

#[test]
fn bind_weak_subscriptions_survive_the_instance() {
	let tally = Arc::new(Mutex::new(Tally {
		total: 0,
		invocations: 0,
	}));
	let signal = Signal::<(i64, i64)>::new();
	let _handle = signal.connect(slot::bind_weak(&Arc::downgrade(&tally), Tally::record));

	signal.notify((5, 1));
	assert_eq!(tally.lock().total, 5);

	drop(tally);
	signal.notify((5, 1));
	assert_eq!(signal.len(), 1);
}

#[test]
fn adapters_erase_into_boxed_slots() {
	let tally = Arc::new(Mutex::new(Tally {
		total: 0,
		invocations: 0,
	}));

	// `Slot` demands `'static`; both adapters must satisfy it for any
	// argument and return types.
	let mut strong: graft::Slot<(i64, i64)> = Box::new(slot::bind(&tally, Tally::record));
	let mut weak: graft::Slot<i64, i64> =
		Box::new(slot::bind_weak(&Arc::downgrade(&tally), Tally::total_after_record));

	strong((4, 1));
	assert_eq!(weak(6), 10);
	assert_eq!(tally.lock().invocations, 1);
}

#[test]
fn forwarder_chains_signals() {
	let v = Arc::new(Validator::new());

	let downstream = Signal::<i32>::new();
	let _sink = downstream.connect({
		let v = Arc::clone(&v);
		move |n| v.push(n)
	});

	let upstream = Signal::<i32>::new();
	let _link = upstream.connect(downstream.forwarder());

	upstream.notify(6);
	v.expect([6]);

	// A forwarder holds its target weakly; a dropped target means silence,
	// not a dangling call.
	drop(downstream);
	upstream.notify(7);
	v.expect([]);
}

#[test]
fn add_assign_connects_without_a_handle() {
	let v = Arc::new(Validator::new());
	let mut signal = Signal::<i32>::new();

	signal += {
		let v = Arc::clone(&v);
		move |n| v.push(n)
	};
	assert_eq!(signal.len(), 1);

	signal.notify(11);
	v.expect([11]);
}
