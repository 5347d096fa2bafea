//! Unit tests for the segmented stack

mod test_ret;
