use schemars::schema::RootSchema;
use schemars::schema_for;

use crate::model::ModelMetadata;

/// Emit the JSON Schema for model-description documents.
pub fn metadata_json_schema() -> RootSchema {
    schema_for!(ModelMetadata)
}
