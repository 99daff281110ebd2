mod arena;
mod handle;
mod node;
mod raw_bset;

pub(crate) use raw_bset::RawBSet;
