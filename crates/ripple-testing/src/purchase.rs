//! Scripted purchase-service doubles.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use ripple_flow::Disposable;
use ripple_premium::{
    ConfirmCompletion, ConfirmError, ConfirmationApi, Offering, PurchaseCompletion, PurchaseError,
    PurchaseManager, PurchaseStatus,
};
use ripple_store::StoreView;

/// A purchase manager that delivers scripted results synchronously. A `buy`
/// call with no scripted result stays pending until resolved explicitly.
#[derive(Default)]
pub struct TestPurchaseManager {
    offerings: StoreView<Vec<Offering>>,
    results: RefCell<VecDeque<Result<PurchaseStatus, PurchaseError>>>,
    pending: RefCell<Vec<PurchaseCompletion>>,
    buy_calls: Cell<usize>,
}

impl TestPurchaseManager {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn with_offering(offering: Offering) -> Rc<Self> {
        let manager = Self::new();
        manager.set_offerings(vec![offering]);
        manager
    }

    pub fn set_offerings(&self, offerings: Vec<Offering>) {
        self.offerings.set(offerings);
    }

    pub fn push_result(&self, result: Result<PurchaseStatus, PurchaseError>) {
        self.results.borrow_mut().push_back(result);
    }

    pub fn buy_calls(&self) -> usize {
        self.buy_calls.get()
    }

    /// Resolves the oldest pending `buy` call. Returns whether one existed.
    pub fn resolve_pending(&self, result: Result<PurchaseStatus, PurchaseError>) -> bool {
        let completion = {
            let mut pending = self.pending.borrow_mut();
            if pending.is_empty() {
                return false;
            }
            pending.remove(0)
        };
        completion(result);
        true
    }
}

impl PurchaseManager for TestPurchaseManager {
    fn available_offerings(&self) -> StoreView<Vec<Offering>> {
        self.offerings.clone()
    }

    fn buy(&self, _offering_id: &str, completion: PurchaseCompletion) -> Disposable {
        self.buy_calls.set(self.buy_calls.get() + 1);
        match self.results.borrow_mut().pop_front() {
            Some(result) => completion(result),
            None => self.pending.borrow_mut().push(completion),
        }
        Disposable::empty()
    }
}

/// A confirmation endpoint recording every confirmed transaction id.
#[derive(Default)]
pub struct TestConfirmationApi {
    results: RefCell<VecDeque<Result<(), ConfirmError>>>,
    pending: RefCell<Vec<ConfirmCompletion>>,
    confirmed: RefCell<Vec<String>>,
}

impl TestConfirmationApi {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn push_result(&self, result: Result<(), ConfirmError>) {
        self.results.borrow_mut().push_back(result);
    }

    pub fn confirmed_transactions(&self) -> Vec<String> {
        self.confirmed.borrow().clone()
    }

    pub fn resolve_pending(&self, result: Result<(), ConfirmError>) -> bool {
        let completion = {
            let mut pending = self.pending.borrow_mut();
            if pending.is_empty() {
                return false;
            }
            pending.remove(0)
        };
        completion(result);
        true
    }
}

impl ConfirmationApi for TestConfirmationApi {
    fn confirm_transaction(
        &self,
        transaction_id: &str,
        completion: ConfirmCompletion,
    ) -> Disposable {
        self.confirmed.borrow_mut().push(transaction_id.to_string());
        match self.results.borrow_mut().pop_front() {
            Some(result) => completion(result),
            None => self.pending.borrow_mut().push(completion),
        }
        Disposable::empty()
    }
}
