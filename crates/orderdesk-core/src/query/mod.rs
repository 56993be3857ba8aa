//! The tabular query engine: predicate, comparator, paginator, and their
//! composition into [`evaluate`].

pub mod engine;
pub mod filter;
pub mod page;
pub mod request;
pub mod sort;
pub mod state;

pub use engine::{DerivedView, SortIndicator, evaluate};
pub use filter::Predicate;
pub use request::{AppendRequest, QueryRequest, QueryResponse};
pub use state::{DEFAULT_PAGE_SIZE, QueryState, SortDir, SortKey, StatusFilter};
