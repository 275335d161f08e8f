//! JSON request entry points.
//!
//! The query service hands results over as one JSON document per query:
//!
//! ```json
//! {
//!   "aliasToMemberNameMap": {"orders__count": "Orders.count"},
//!   "annotation": {"Orders.count": {"type": "number"}},
//!   "data": [{"orders__count": 5}],
//!   "query": {"measures": ["Orders.count"]},
//!   "queryType": "regularQuery",
//!   "resType": "compact"
//! }
//! ```

use serde::{Deserialize, Serialize};

use super::error::TransformResult;
use super::row::DbRow;
use super::{TransformedData, Transformer};
use crate::model::{AliasToMemberMap, Annotation, NormalizedQuery, QueryType, ResultType};

/// Everything needed to transform one query result.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformRequest {
    #[serde(rename = "aliasToMemberNameMap")]
    pub alias_to_member: AliasToMemberMap,

    pub annotation: Annotation,

    #[serde(default)]
    pub data: Vec<DbRow>,

    pub query: NormalizedQuery,

    #[serde(default)]
    pub query_type: QueryType,

    #[serde(default, rename = "resType")]
    pub result_type: Option<ResultType>,
}

/// A single request or a batch.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TransformInput {
    One(Box<TransformRequest>),
    Many(Vec<TransformRequest>),
}

/// Output matching the shape of a [`TransformInput`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TransformOutput {
    One(TransformedData),
    Many(Vec<TransformedData>),
}

impl Transformer {
    pub fn transform_input(&self, input: &TransformInput) -> TransformResult<TransformOutput> {
        match input {
            TransformInput::One(request) => self.transform(request).map(TransformOutput::One),
            TransformInput::Many(requests) => {
                self.transform_all(requests).map(TransformOutput::Many)
            }
        }
    }
}

pub fn transform_request(request: &TransformRequest) -> TransformResult<TransformedData> {
    Transformer::default().transform(request)
}

/// Transform a batch; the first failure fails the batch.
pub fn transform_requests(requests: &[TransformRequest]) -> TransformResult<Vec<TransformedData>> {
    Transformer::default().transform_all(requests)
}

/// Decode a request (or an array of requests), transform it, and encode the result.
pub fn transform_json(json: &str) -> TransformResult<String> {
    let input: TransformInput = serde_json::from_str(json)?;
    let output = Transformer::default().transform_input(&input)?;
    Ok(serde_json::to_string(&output)?)
}
