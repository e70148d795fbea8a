//! Observable amount binding.
//!
//! Host UI frameworks usually hold the amount in their own state and
//! subscribe to changes. [`AmountBinding`] sits between that state and an
//! [`AmountField`]:
//!
//! - every committed edit publishes the new amount exactly once
//! - rejected edits publish nothing
//! - an external write equal to the current amount is ignored, so a host
//!   that writes published values back does not reset the field mid-edit

use std::fmt;

use rust_decimal::Decimal;

use crate::interpreter::{AmountField, EditOutcome, Reformat};
use crate::types::{CurrencyCode, Locale, TextRange};

type Subscriber = Box<dyn FnMut(Decimal)>;

/// An [`AmountField`] whose amount can be observed.
pub struct AmountBinding {
    field: AmountField,
    subscribers: Vec<Subscriber>,
}

impl fmt::Debug for AmountBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AmountBinding")
            .field("field", &self.field)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl From<AmountField> for AmountBinding {
    fn from(field: AmountField) -> Self {
        Self::new(field)
    }
}

impl AmountBinding {
    #[must_use]
    pub const fn new(field: AmountField) -> Self {
        Self {
            field,
            subscribers: Vec::new(),
        }
    }

    /// Call `subscriber` with the amount after every committed edit.
    pub fn subscribe(&mut self, subscriber: impl FnMut(Decimal) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.field.amount()
    }

    #[must_use]
    pub fn display(&self) -> &str {
        self.field.display()
    }

    #[must_use]
    pub const fn field(&self) -> &AmountField {
        &self.field
    }

    /// External write from the host's state.
    ///
    /// Returns `false` and leaves the field alone when `amount` is
    /// numerically equal to the current amount.
    pub fn set_amount(&mut self, amount: Decimal) -> bool {
        if amount == self.field.amount() {
            tracing::trace!(%amount, "Binding write matches current amount, skipped");
            return false;
        }
        self.field.set_amount(amount);
        true
    }

    /// Validate and apply an edit, publishing the amount if it commits.
    pub fn edit(&mut self, range: TextRange, replacement: &str) -> EditOutcome {
        let outcome = self.field.edit(range, replacement);
        if let Some(reformat) = outcome.reformat() {
            self.publish(reformat.amount);
        }
        outcome
    }

    /// Host hook forwarded to [`AmountField::on_text_will_change`].
    #[must_use]
    pub fn text_will_change(&self, range: TextRange, replacement: &str) -> bool {
        self.field.on_text_will_change(range, replacement)
    }

    /// Host hook forwarded to [`AmountField::on_text_did_change`]; publishes
    /// the new amount.
    pub fn text_did_change(&mut self, text: &str, caret: usize) -> Reformat {
        let reformat = self.field.on_text_did_change(text, caret);
        self.publish(reformat.amount);
        reformat
    }

    pub fn begin_editing(&mut self) {
        self.field.begin_editing();
    }

    pub fn end_editing(&mut self) {
        self.field.end_editing();
    }

    pub fn set_locale(&mut self, locale: Locale) {
        self.field.set_locale(locale);
    }

    pub fn set_currency_code(&mut self, currency_code: Option<CurrencyCode>) {
        self.field.set_currency_code(currency_code);
    }

    #[must_use]
    pub fn into_inner(self) -> AmountField {
        self.field
    }

    fn publish(&mut self, amount: Decimal) {
        tracing::trace!(%amount, subscribers = self.subscribers.len(), "Publishing amount");
        for subscriber in &mut self.subscribers {
            subscriber(amount);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::provider::BuiltinLocaleProvider;
    use crate::types::FieldState;

    fn binding() -> (AmountBinding, Rc<RefCell<Vec<Decimal>>>) {
        let field = AmountField::new(BuiltinLocaleProvider::new(), Locale::en_us(), None);
        let mut binding = AmountBinding::new(field);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        binding.subscribe(move |amount| sink.borrow_mut().push(amount));
        binding.begin_editing();
        (binding, seen)
    }

    #[test]
    fn test_commit_publishes_once() {
        let (mut binding, seen) = binding();
        binding.edit(TextRange::caret(2), "12");
        binding.edit(TextRange::caret(4), "3");
        assert_eq!(*seen.borrow(), vec![Decimal::new(12, 0), Decimal::new(123, 0)]);
    }

    #[test]
    fn test_rejection_publishes_nothing() {
        let (mut binding, seen) = binding();
        let outcome = binding.edit(TextRange::caret(2), "x");
        assert!(!outcome.is_committed());
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_echoed_write_does_not_reset_edit() {
        let (mut binding, seen) = binding();
        binding.edit(TextRange::caret(2), "12.");
        let published = *seen.borrow().last().unwrap();

        assert!(!binding.set_amount(published));
        assert_eq!(binding.display(), "$12.");
        assert_eq!(binding.field().state(), FieldState::Editing);
    }

    #[test]
    fn test_equal_value_with_other_scale_is_skipped() {
        let (mut binding, _) = binding();
        binding.edit(TextRange::caret(2), "5");
        assert!(!binding.set_amount(Decimal::new(500, 2)));
    }

    #[test]
    fn test_external_write_rerenders() {
        let (mut binding, seen) = binding();
        assert!(binding.set_amount(Decimal::new(98_765, 1)));
        assert_eq!(binding.display(), "$9,876.5");
        assert_eq!(binding.field().state(), FieldState::Idle);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_host_hooks_publish() {
        let (mut binding, seen) = binding();
        assert!(binding.text_will_change(TextRange::caret(2), "7"));
        let reformat = binding.text_did_change("$07", 3);
        assert_eq!(reformat.display, "$7");
        assert_eq!(*seen.borrow(), vec![Decimal::new(7, 0)]);
    }
}
