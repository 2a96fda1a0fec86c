pub(crate) mod throttle;
pub(crate) mod tracker;
