mod arena;
mod handle;
mod raw_sorted_list;

pub(crate) use arena::Arena;
pub(crate) use handle::Handle;
pub(crate) use raw_sorted_list::{RawSortedList, is_admissible};
