//! Response envelopes shared by the directory handlers.

use serde::Serialize;

/// `{ "data": T }` wrapper used by every JSON body that is not an error.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// A page of results plus the size of the whole collection.
///
/// `limit` and `offset` echo what the repository actually applied after
/// clamping, not what the client asked for.
#[derive(Debug, Serialize)]
pub struct PageResponse<T: Serialize> {
    pub data: Vec<T>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}
