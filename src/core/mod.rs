pub mod dispatcher;
pub mod query;
pub mod request;

pub use dispatcher::QueryDispatcher;
pub use query::{Player, QueryParams, QueryResponse, QueryResult};
pub use request::{FieldIssue, QueryRequestValidator, RequestValidationError};
