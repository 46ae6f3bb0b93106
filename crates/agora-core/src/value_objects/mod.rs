//! Value objects - immutable types with no identity

mod delete_outcome;
mod masking;
mod page;

pub use delete_outcome::DeleteOutcome;
pub use masking::{mask_email, mask_phone};
pub use page::{Page, PageRequest, SortDirection, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
