pub(crate) mod meta;
pub(crate) mod migrate;
pub(crate) mod show;
pub(crate) mod sync;
