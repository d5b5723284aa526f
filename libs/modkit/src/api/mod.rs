//! REST helpers shared by module handlers: the JSON envelopes, the failure
//! type every handler returns, extractors with 400 rejections, and list
//! normalisation.

pub mod extract;
pub mod failure;
pub mod pagination;
pub mod response;

pub use extract::{JsonBody, PathParam, QueryParams};
pub use failure::ApiFailure;
pub use pagination::{Page, PageLimits, PageRequest, SortOrder};
pub use response::{ApiResponse, ListResponse};

/// Handler result: either a response or a failure envelope.
pub type ApiResult<T> = Result<T, ApiFailure>;
