//! # Vocabulary Asset IO
//!
//! Readers for the two vocabulary assets:
//!
//! * the merge list ("vocab.bpe"): a version line, then one
//!   `"<first> <second>"` pair per line, in priority order.
//! * the token mapping ("encoder.json"): a flat JSON object of
//!   `subword -> id`.
//!
//! Both are read from caller-supplied readers; opening files or fetching
//! assets is left to the caller.

pub mod merge_list;
pub mod token_mapping_json;

#[doc(inline)]
pub use merge_list::read_merge_list;
#[doc(inline)]
pub use token_mapping_json::{minify_json, read_token_mapping};
