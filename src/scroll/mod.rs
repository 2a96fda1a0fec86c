pub(crate) mod lock;
pub(crate) mod progress;
pub(crate) mod smooth;
pub(crate) mod state;
