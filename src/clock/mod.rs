pub(crate) mod frame_clock;
pub(crate) mod subscribers;
