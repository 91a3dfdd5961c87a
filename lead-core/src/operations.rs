use crate::error::ApiError;
use crate::lead::{Lead, RegisterLeadInput};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::marker::PhantomData;

/// Invalidation namespace. Every read registers under a tag; a successful
/// mutation evicts the whole namespace, never a single entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CacheTag {
    Lead,
}

/// Content address of a read: operation name plus canonical argument JSON.
/// Identical reads map to the same key and share one request.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub operation: &'static str,
    pub args: String,
}

/// A named, parameterized request against the remote endpoint, typed by its
/// decoded output.
pub struct Operation<T> {
    pub name: &'static str,
    pub document: &'static str,
    pub variables: Value,
    pub field: &'static str,
    pub tag: CacheTag,
    output: PhantomData<T>,
}

impl<T: DeserializeOwned> Operation<T> {
    fn new(
        name: &'static str,
        document: &'static str,
        variables: Value,
        field: &'static str,
        tag: CacheTag,
    ) -> Self {
        Self {
            name,
            document,
            variables,
            field,
            tag,
            output: PhantomData,
        }
    }

    pub fn cache_key(&self) -> CacheKey {
        CacheKey {
            operation: self.name,
            args: self.variables.to_string(),
        }
    }

    /// Unwrap the GraphQL envelope and project this operation's root field.
    /// The projected value is what the cache stores.
    pub fn project(&self, body: Value) -> Result<Value, ApiError> {
        let data = decode_envelope(body)?;
        Ok(data.get(self.field).cloned().unwrap_or(Value::Null))
    }

    pub fn typed(&self, value: Value) -> Result<T, ApiError> {
        serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub fn decode(&self, body: Value) -> Result<T, ApiError> {
        self.typed(self.project(body)?)
    }
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphqlError>,
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
    message: String,
}

fn decode_envelope(body: Value) -> Result<Value, ApiError> {
    let envelope: Envelope =
        serde_json::from_value(body).map_err(|e| ApiError::Decode(e.to_string()))?;

    if !envelope.errors.is_empty() {
        let joined = envelope
            .errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        return Err(ApiError::Graphql(joined));
    }

    envelope
        .data
        .ok_or_else(|| ApiError::Graphql("response carried no data".into()))
}

const GET_LEADS: &str = "\
query GetLeads {
  leads {
    id
    name
    email
    mobile
    postcode
    services
    createdAt
    updatedAt
  }
}";

const GET_LEAD: &str = "\
query GetLead($id: Int!) {
  lead(id: $id) {
    id
    name
    email
    mobile
    postcode
    services
    createdAt
    updatedAt
  }
}";

const REGISTER: &str = "\
mutation Register($input: RegisterLeadInput!) {
  register(input: $input) {
    id
    name
    email
    mobile
    postcode
    services
    createdAt
    updatedAt
  }
}";

pub fn leads() -> Operation<Vec<Lead>> {
    Operation::new(
        "GetLeads",
        GET_LEADS,
        serde_json::json!({}),
        "leads",
        CacheTag::Lead,
    )
}

pub fn lead(id: i64) -> Operation<Option<Lead>> {
    Operation::new(
        "GetLead",
        GET_LEAD,
        serde_json::json!({ "id": id }),
        "lead",
        CacheTag::Lead,
    )
}

pub fn register(input: &RegisterLeadInput) -> Operation<Lead> {
    Operation::new(
        "Register",
        REGISTER,
        serde_json::json!({ "input": input }),
        "register",
        CacheTag::Lead,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lead::ServiceTag;

    #[test]
    fn identical_reads_share_a_cache_key() {
        assert_eq!(lead(3).cache_key(), lead(3).cache_key());
        assert_eq!(leads().cache_key(), leads().cache_key());
    }

    #[test]
    fn different_arguments_produce_different_keys() {
        assert_ne!(lead(3).cache_key(), lead(4).cache_key());
        assert_ne!(leads().cache_key().operation, lead(3).cache_key().operation);
    }

    #[test]
    fn lead_variables_carry_the_id() {
        let op = lead(42);
        assert_eq!(op.variables, serde_json::json!({ "id": 42 }));
    }

    #[test]
    fn register_variables_nest_the_input_object() {
        let input = RegisterLeadInput {
            name: "Jane Doe".into(),
            email: "jane@x.com".into(),
            mobile: "0400000000".into(),
            postcode: "2000".into(),
            services: vec![ServiceTag::Delivery, ServiceTag::Payment],
        };

        let op = register(&input);
        assert_eq!(
            op.variables,
            serde_json::json!({
                "input": {
                    "name": "Jane Doe",
                    "email": "jane@x.com",
                    "mobile": "0400000000",
                    "postcode": "2000",
                    "services": ["DELIVERY", "PAYMENT"]
                }
            })
        );
    }

    #[test]
    fn project_unwraps_data_and_field() {
        let body = serde_json::json!({ "data": { "leads": [] } });
        let projected = leads().project(body).expect("project");
        assert_eq!(projected, serde_json::json!([]));
    }

    #[test]
    fn graphql_errors_surface_joined_messages() {
        let body = serde_json::json!({
            "errors": [
                { "message": "boom" },
                { "message": "bust" }
            ]
        });

        let err = leads().decode(body).expect_err("must fail");
        assert_eq!(err, ApiError::Graphql("boom; bust".into()));
    }

    #[test]
    fn missing_data_is_an_error() {
        let err = leads().decode(serde_json::json!({})).expect_err("must fail");
        assert!(matches!(err, ApiError::Graphql(_)));
    }

    #[test]
    fn null_lead_decodes_to_none() {
        let body = serde_json::json!({ "data": { "lead": null } });
        let decoded = lead(999_999).decode(body).expect("decode");
        assert_eq!(decoded, None);
    }

    #[test]
    fn malformed_field_shape_is_a_decode_error() {
        let body = serde_json::json!({ "data": { "leads": "nope" } });
        let err = leads().decode(body).expect_err("must fail");
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
