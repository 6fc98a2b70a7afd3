pub(crate) mod descriptor;
pub(crate) mod phase;
pub(crate) mod timer;
