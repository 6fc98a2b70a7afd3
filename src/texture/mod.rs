pub(crate) mod baked;
pub(crate) mod compositor;
pub(crate) mod cycle;
