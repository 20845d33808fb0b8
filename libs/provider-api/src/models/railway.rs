//! Railway GraphQL models (`/graphql/v2`)

use serde::{Deserialize, Serialize};

/// Creates a project and returns its id
pub const PROJECT_CREATE_MUTATION: &str =
    "mutation projectCreate($input: ProjectCreateInput!) { projectCreate(input: $input) { id name } }";

/// GraphQL request envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphqlRequest<V> {
    pub query: String,
    pub variables: V,
}

/// GraphQL response envelope
///
/// Railway reports failures in `errors` and usually still answers HTTP 200.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphqlResponse<T> {
    pub data: Option<T>,

    #[serde(default)]
    pub errors: Vec<GraphqlError>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphqlError {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectCreateVariables {
    pub input: ProjectCreateInput,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectCreateInput {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectCreateData {
    pub project_create: Option<Project>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: String,

    #[serde(default)]
    pub name: Option<String>,
}
