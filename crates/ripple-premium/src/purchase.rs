//! Purchase flow state.
//!
//! A thin state object between the screen and the platform purchase service:
//! `idle -> purchasing -> {completed, failed}`. A purchase is started only
//! when an offering has loaded and nothing is already in flight; a concurrent
//! attempt is rejected outright rather than superseding the running one. On a
//! purchased status the transaction is confirmed server-side before the
//! completion callback fires.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use ripple_flow::{Disposable, DisposableSlot};
use ripple_store::StoreView;

/// A purchasable product as reported by the platform purchase service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Offering {
    pub id: String,
    /// Localized price string, e.g. `$4.99`.
    pub price: String,
}

impl Offering {
    pub fn new(id: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            price: price.into(),
        }
    }
}

/// Terminal status of a store-level purchase call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PurchaseStatus {
    Purchased { transaction_id: String },
    /// Awaiting external approval; the flow stays in progress.
    Deferred,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PurchaseError {
    Cancelled,
    NotAllowed,
    Network,
    Generic,
}

impl fmt::Display for PurchaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cancelled => write!(f, "purchase cancelled"),
            Self::NotAllowed => write!(f, "purchases not allowed on this account"),
            Self::Network => write!(f, "network failure during purchase"),
            Self::Generic => write!(f, "purchase failed"),
        }
    }
}

impl std::error::Error for PurchaseError {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfirmError {
    Network,
    InvalidReceipt,
    Generic,
}

impl fmt::Display for ConfirmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network => write!(f, "network failure during confirmation"),
            Self::InvalidReceipt => write!(f, "receipt rejected"),
            Self::Generic => write!(f, "confirmation failed"),
        }
    }
}

impl std::error::Error for ConfirmError {}

pub type PurchaseCompletion = Box<dyn FnOnce(Result<PurchaseStatus, PurchaseError>)>;
pub type ConfirmCompletion = Box<dyn FnOnce(Result<(), ConfirmError>)>;

/// Platform in-app-purchase service.
pub trait PurchaseManager {
    /// Live view of the purchasable offerings.
    fn available_offerings(&self) -> StoreView<Vec<Offering>>;

    /// Starts a purchase; the completion is delivered on the UI queue. The
    /// returned handle cancels interest in the result.
    fn buy(&self, offering_id: &str, completion: PurchaseCompletion) -> Disposable;
}

/// Server-side confirmation of a purchased transaction.
pub trait ConfirmationApi {
    fn confirm_transaction(&self, transaction_id: &str, completion: ConfirmCompletion)
        -> Disposable;
}

struct StateInner {
    manager: Rc<dyn PurchaseManager>,
    confirmation: Rc<dyn ConfirmationApi>,
    offering: RefCell<Option<Offering>>,
    in_progress: Cell<bool>,
    completed: Cell<bool>,
    offerings: DisposableSlot,
    payment: DisposableSlot,
    activation: DisposableSlot,
    /// Owner hook raised while a purchase is in flight; used to disable
    /// navigation dismissal for the duration.
    on_progress: Rc<dyn Fn(bool)>,
    on_completed: Rc<dyn Fn()>,
}

impl StateInner {
    fn confirm(inner: &Rc<StateInner>, transaction_id: &str) {
        let weak = Rc::downgrade(inner);
        let handle = inner.confirmation.confirm_transaction(
            transaction_id,
            Box::new(move |result| {
                let Some(inner) = weak.upgrade() else {
                    return;
                };
                match result {
                    Ok(()) => {
                        inner.completed.set(true);
                        (inner.on_completed)();
                    }
                    Err(error) => {
                        // The flow never reaches completion and the progress
                        // flag stays raised; errors here are surfaced nowhere
                        // else.
                        log::warn!("transaction confirmation failed: {error}");
                    }
                }
            }),
        );
        inner.activation.set(handle);
    }
}

/// The purchase flow of one screen instance. Created with the screen, torn
/// down with it; dropping the state cancels the offering subscription and any
/// in-flight purchase or confirmation call.
#[derive(Clone)]
pub struct PurchaseState {
    inner: Rc<StateInner>,
}

impl PurchaseState {
    pub fn new(
        manager: Rc<dyn PurchaseManager>,
        confirmation: Rc<dyn ConfirmationApi>,
        on_progress: impl Fn(bool) + 'static,
        on_completed: impl Fn() + 'static,
    ) -> Self {
        let inner = Rc::new(StateInner {
            manager,
            confirmation,
            offering: RefCell::new(None),
            in_progress: Cell::new(false),
            completed: Cell::new(false),
            offerings: DisposableSlot::new(),
            payment: DisposableSlot::new(),
            activation: DisposableSlot::new(),
            on_progress: Rc::new(on_progress),
            on_completed: Rc::new(on_completed),
        });

        let subscription = {
            let weak = Rc::downgrade(&inner);
            inner
                .manager
                .available_offerings()
                .observe(move |offerings: &Vec<Offering>| {
                    if let Some(inner) = weak.upgrade() {
                        *inner.offering.borrow_mut() = offerings.first().cloned();
                    }
                })
        };
        inner.offerings.set(subscription);

        Self { inner }
    }

    /// The currently loaded offering, if any.
    pub fn offering(&self) -> Option<Offering> {
        self.inner.offering.borrow().clone()
    }

    pub fn is_in_progress(&self) -> bool {
        self.inner.in_progress.get()
    }

    pub fn is_completed(&self) -> bool {
        self.inner.completed.get()
    }

    /// Starts a purchase of the loaded offering. Returns `false` without side
    /// effects when no offering has loaded yet or a purchase is already in
    /// flight.
    pub fn buy(&self) -> bool {
        let offering = match self.inner.offering.borrow().clone() {
            Some(offering) => offering,
            None => return false,
        };
        if self.inner.in_progress.get() {
            return false;
        }
        self.inner.in_progress.set(true);
        (self.inner.on_progress)(true);

        let weak = Rc::downgrade(&self.inner);
        let handle = self.inner.manager.buy(
            &offering.id,
            Box::new(move |result| {
                let Some(inner) = weak.upgrade() else {
                    return;
                };
                match result {
                    Ok(PurchaseStatus::Purchased { transaction_id }) => {
                        StateInner::confirm(&inner, &transaction_id);
                    }
                    Ok(PurchaseStatus::Deferred) => {}
                    Err(error) => {
                        log::error!("purchase failed: {error}");
                        inner.in_progress.set(false);
                        (inner.on_progress)(false);
                    }
                }
            }),
        );
        self.inner.payment.set(handle);
        true
    }
}

impl fmt::Debug for PurchaseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PurchaseState")
            .field("offering", &self.offering())
            .field("in_progress", &self.is_in_progress())
            .field("completed", &self.is_completed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    // The `ripple-testing` doubles are built against the externally compiled
    // instance of this crate, so the tests must use that instance's types.
    use ripple_premium::{
        ConfirmError, ConfirmationApi, Offering, PurchaseError, PurchaseManager, PurchaseState,
        PurchaseStatus,
    };
    use ripple_testing::{TestConfirmationApi, TestPurchaseManager};

    fn state(
        manager: &Rc<TestPurchaseManager>,
        confirmation: &Rc<TestConfirmationApi>,
    ) -> (PurchaseState, Rc<RefCell<Vec<bool>>>, Rc<Cell<usize>>) {
        let progress = Rc::new(RefCell::new(Vec::new()));
        let completed = Rc::new(Cell::new(0));
        let state = {
            let progress = Rc::clone(&progress);
            let completed = Rc::clone(&completed);
            PurchaseState::new(
                Rc::clone(manager) as Rc<dyn PurchaseManager>,
                Rc::clone(confirmation) as Rc<dyn ConfirmationApi>,
                move |flag| progress.borrow_mut().push(flag),
                move || completed.set(completed.get() + 1),
            )
        };
        (state, progress, completed)
    }

    #[test]
    fn buy_without_an_offering_is_rejected() {
        let manager = TestPurchaseManager::new();
        let confirmation = TestConfirmationApi::new();
        let (state, progress, _) = state(&manager, &confirmation);
        assert!(!state.buy());
        assert_eq!(manager.buy_calls(), 0);
        assert!(progress.borrow().is_empty());
    }

    #[test]
    fn buy_while_purchasing_is_a_no_op() {
        let manager = TestPurchaseManager::with_offering(Offering::new("premium.monthly", "$4.99"));
        let confirmation = TestConfirmationApi::new();
        let (state, progress, _) = state(&manager, &confirmation);

        // No scripted result, so the first purchase stays in flight.
        assert!(state.buy());
        assert!(state.is_in_progress());
        assert!(!state.buy());
        assert_eq!(manager.buy_calls(), 1);
        assert_eq!(*progress.borrow(), vec![true]);
    }

    #[test]
    fn purchased_status_confirms_and_completes() {
        let manager = TestPurchaseManager::with_offering(Offering::new("premium.monthly", "$4.99"));
        manager.push_result(Ok(PurchaseStatus::Purchased {
            transaction_id: "txn-1".to_string(),
        }));
        let confirmation = TestConfirmationApi::new();
        confirmation.push_result(Ok(()));
        let (state, progress, completed) = state(&manager, &confirmation);

        assert!(state.buy());
        assert_eq!(confirmation.confirmed_transactions(), vec!["txn-1"]);
        assert!(state.is_completed());
        assert_eq!(completed.get(), 1);
        // Completion never clears the progress flag; the screen dismisses.
        assert_eq!(*progress.borrow(), vec![true]);
    }

    #[test]
    fn purchase_error_resets_progress_without_completion() {
        let manager = TestPurchaseManager::with_offering(Offering::new("premium.monthly", "$4.99"));
        manager.push_result(Err(PurchaseError::Cancelled));
        let confirmation = TestConfirmationApi::new();
        let (state, progress, completed) = state(&manager, &confirmation);

        assert!(state.buy());
        assert!(!state.is_in_progress());
        assert_eq!(completed.get(), 0);
        assert_eq!(*progress.borrow(), vec![true, false]);

        // The flow is idle again, so a retry starts a fresh purchase.
        assert!(state.buy());
        assert_eq!(manager.buy_calls(), 2);
    }

    #[test]
    fn confirmation_failure_leaves_progress_raised() {
        let manager = TestPurchaseManager::with_offering(Offering::new("premium.monthly", "$4.99"));
        manager.push_result(Ok(PurchaseStatus::Purchased {
            transaction_id: "txn-2".to_string(),
        }));
        let confirmation = TestConfirmationApi::new();
        confirmation.push_result(Err(ConfirmError::Network));
        let (state, _, completed) = state(&manager, &confirmation);

        assert!(state.buy());
        assert!(state.is_in_progress());
        assert!(!state.is_completed());
        assert_eq!(completed.get(), 0);
    }

    #[test]
    fn offering_updates_flow_into_the_state() {
        let manager = TestPurchaseManager::new();
        let confirmation = TestConfirmationApi::new();
        let (state, _, _) = state(&manager, &confirmation);
        assert_eq!(state.offering(), None);

        manager.set_offerings(vec![Offering::new("premium.annual", "$39.99")]);
        assert_eq!(
            state.offering(),
            Some(Offering::new("premium.annual", "$39.99"))
        );
    }
}
