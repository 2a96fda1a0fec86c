use std::{cell::Cell, rc::Rc};

/// Page scroll-lock flag. Only the holder of the (non-`Clone`) `ScrollLock`
/// can change it; everyone else gets a [`ScrollLockReader`].
#[derive(Debug, Default)]
pub struct ScrollLock {
    flag: Rc<Cell<bool>>,
}

impl ScrollLock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn engage(&mut self) {
        self.flag.set(true);
    }

    pub fn release(&mut self) {
        self.flag.set(false);
    }

    pub fn is_engaged(&self) -> bool {
        self.flag.get()
    }

    pub fn reader(&self) -> ScrollLockReader {
        ScrollLockReader {
            flag: Rc::clone(&self.flag),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ScrollLockReader {
    flag: Rc<Cell<bool>>,
}

impl ScrollLockReader {
    pub fn is_locked(&self) -> bool {
        self.flag.get()
    }
}
