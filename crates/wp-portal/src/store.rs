//! View state store.
//!
//! Single-threaded, shared through `Rc`. Listeners run after every visible
//! change and must not mutate the store themselves.

use std::cell::RefCell;
use std::rc::Rc;
use wp_types::{WalletAddress, Wave};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewState {
    pub current_account: Option<WalletAddress>,
    pub draft: String,
    /// Arrival order: bulk load first, then live events.
    pub waves: Vec<Wave>,
}

type Listener = Box<dyn Fn(&ViewState)>;

#[derive(Default)]
pub struct ViewStore {
    state: RefCell<ViewState>,
    listeners: RefCell<Vec<Listener>>,
}

impl ViewStore {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Run a closure with shared read access to the state.
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&ViewState) -> R,
    {
        f(&self.state.borrow())
    }

    pub fn subscribe(&self, listener: impl Fn(&ViewState) + 'static) {
        self.listeners.borrow_mut().push(Box::new(listener));
    }

    fn update<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut ViewState) -> R,
    {
        let out = f(&mut self.state.borrow_mut());
        let state = self.state.borrow();
        for listener in self.listeners.borrow().iter() {
            listener(&state);
        }
        out
    }

    // ── Session ──

    pub fn current_account(&self) -> Option<WalletAddress> {
        self.with(|s| s.current_account.clone())
    }

    pub fn set_account(&self, account: WalletAddress) {
        self.update(|s| s.current_account = Some(account));
    }

    // ── Draft ──

    pub fn draft(&self) -> String {
        self.with(|s| s.draft.clone())
    }

    /// The input element already shows the draft, so listeners are not run.
    pub fn set_draft(&self, message: impl Into<String>) {
        self.state.borrow_mut().draft = message.into();
    }

    // ── Waves ──

    pub fn waves(&self) -> Vec<Wave> {
        self.with(|s| s.waves.clone())
    }

    pub fn wave_count(&self) -> usize {
        self.with(|s| s.waves.len())
    }

    /// Bulk load result. Becomes the whole list.
    pub fn replace_waves(&self, waves: Vec<Wave>) {
        self.update(|s| s.waves = waves);
    }

    pub fn push_wave(&self, wave: Wave) {
        self.update(|s| s.waves.push(wave));
    }
}
