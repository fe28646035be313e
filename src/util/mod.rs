pub(crate) mod cache;
pub(crate) mod escape;
pub(crate) mod itime;
