//! The observable binding as a host framework would drive it.

#![allow(clippy::unwrap_used)]

use std::cell::RefCell;
use std::rc::Rc;

use amount_field_core::{AmountBinding, Decimal, FieldState, TextRange};
use amount_field_integration_tests::{BACKSPACE, editing_field};

/// Host-side state: holds the last published amount and writes it back
/// into the binding, the way declarative UI frameworks echo state.
struct HostState {
    value: Rc<RefCell<Decimal>>,
    publishes: Rc<RefCell<usize>>,
}

fn bind(tag: &str) -> (AmountBinding, HostState) {
    let mut binding = AmountBinding::new(editing_field(tag, None));
    let value = Rc::new(RefCell::new(Decimal::ZERO));
    let publishes = Rc::new(RefCell::new(0));
    let (v, p) = (Rc::clone(&value), Rc::clone(&publishes));
    binding.subscribe(move |amount| {
        *v.borrow_mut() = amount;
        *p.borrow_mut() += 1;
    });
    (binding, HostState { value, publishes })
}

fn press(binding: &mut AmountBinding, host: &HostState, key: char) {
    let caret = binding.field().caret();
    let (range, text) = if key == BACKSPACE {
        (TextRange::new(caret.saturating_sub(1), caret), String::new())
    } else {
        (TextRange::caret(caret), key.to_string())
    };
    binding.edit(range, &text);

    // Echo the published value back like a state-driven re-render.
    let echoed = *host.value.borrow();
    binding.set_amount(echoed);
}

#[test]
fn test_echo_loop_never_resets_edit() {
    let (mut binding, host) = bind("en_US");
    for key in "12.0".chars() {
        press(&mut binding, &host, key);
    }
    assert_eq!(binding.display(), "$12.0");
    assert_eq!(binding.field().state(), FieldState::Editing);
    assert_eq!(*host.value.borrow(), Decimal::new(12, 0));
    assert_eq!(*host.publishes.borrow(), 4);
}

#[test]
fn test_rejected_keys_do_not_publish() {
    let (mut binding, host) = bind("de_DE");
    for key in "1.2,345".chars() {
        press(&mut binding, &host, key);
    }
    assert_eq!(binding.display(), "12,34\u{a0}€");
    assert_eq!(*host.publishes.borrow(), 5);
}

#[test]
fn test_backspace_publishes_new_amount() {
    let (mut binding, host) = bind("en_US");
    for key in "250<".chars() {
        press(&mut binding, &host, key);
    }
    assert_eq!(*host.value.borrow(), Decimal::new(25, 0));
    assert_eq!(binding.display(), "$25");
}

#[test]
fn test_external_change_reaches_field() {
    let (mut binding, host) = bind("en_US");
    press(&mut binding, &host, '9');

    assert!(binding.set_amount(Decimal::new(100, 0)));
    assert_eq!(binding.display(), "$100");
    assert_eq!(binding.field().state(), FieldState::Idle);
    // External writes are inbound only.
    assert_eq!(*host.publishes.borrow(), 1);
}

#[test]
fn test_locale_switch_keeps_amount() {
    let (mut binding, host) = bind("en_US");
    for key in "1234.5".chars() {
        press(&mut binding, &host, key);
    }
    binding.set_locale(amount_field_integration_tests::locale("fr_FR"));
    assert_eq!(binding.display(), "1\u{202f}234,5\u{a0}€");
    assert_eq!(binding.amount(), *host.value.borrow());
}
