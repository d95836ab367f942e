use serde_json::Value;

use crate::models::ResponseShape;

// A shape matcher: pure predicate+extractor over the raw body
type Extractor = fn(&Value) -> Option<&Vec<Value>>;

fn data_result(value: &Value) -> Option<&Vec<Value>> {
    value.get("data")?.get("result")?.as_array()
}

fn result_list(value: &Value) -> Option<&Vec<Value>> {
    value.get("result")?.as_array()
}

fn data_list(value: &Value) -> Option<&Vec<Value>> {
    value.get("data")?.as_array()
}

fn bare_array(value: &Value) -> Option<&Vec<Value>> {
    value.as_array()
}

impl ResponseShape {
    // Accepted nestings for this shape, tried in priority order
    fn extractors(self) -> &'static [Extractor] {
        match self {
            ResponseShape::DataResult => &[data_result, result_list],
            ResponseShape::ResultList => &[result_list, data_list],
            ResponseShape::BareArray => &[bare_array, data_list],
        }
    }
}

// Map a source-specific body to the common record list. First matching
// shape wins; an unrecognized body is just an empty result.
pub fn normalize(value: &Value, shape: ResponseShape) -> Vec<Value> {
    shape
        .extractors()
        .iter()
        .find_map(|extract| extract(value))
        .cloned()
        .unwrap_or_default()
}
