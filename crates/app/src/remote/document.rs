//! JSON-API document model.

use std::{collections::BTreeMap, slice};

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

use crate::{remote::RemoteError, uuids::TypedUuid};

/// A top-level JSON-API response document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub data: PrimaryData,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub included: Vec<Resource>,

    #[serde(default)]
    pub meta: Meta,
}

/// Primary data: nothing, a single resource, or a collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrimaryData {
    #[default]
    None,
    One(Box<Resource>),
    Many(Vec<Resource>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    /// Total number of records matching the query, ignoring pagination.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_count: Option<u64>,
}

/// A resource object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: String,

    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default)]
    pub attributes: Map<String, Value>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub relationships: BTreeMap<String, Relationship>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    #[serde(default)]
    pub data: Option<Linkage>,
}

/// Resource linkage of a relationship: to-one or to-many.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Linkage {
    One(Identifier),
    Many(Vec<Identifier>),
}

/// A resource identifier object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identifier {
    #[serde(rename = "type")]
    pub kind: String,

    pub id: String,
}

/// Decode a domain record from a resource and the document it came from.
///
/// The document gives access to `included` resources for relationships.
pub trait FromResource: Sized {
    fn from_resource(resource: &Resource, document: &Document) -> Result<Self, RemoteError>;
}

impl Resource {
    /// Deserialize the attribute object into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::Decode`] when the attributes don't match `T`.
    pub fn attributes<T: DeserializeOwned>(&self) -> Result<T, RemoteError> {
        Ok(serde_json::from_value(Value::Object(self.attributes.clone()))?)
    }

    /// Parse the resource id as a typed UUID.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::InvalidIdentifier`] when the id isn't a UUID.
    pub fn uuid<T>(&self) -> Result<TypedUuid<T>, RemoteError> {
        parse_id(&self.id)
    }

    /// Identifiers linked through the named relationship, in order.
    pub fn related_identifiers(&self, name: &str) -> Vec<&Identifier> {
        match self.relationships.get(name).and_then(|r| r.data.as_ref()) {
            Some(Linkage::One(identifier)) => vec![identifier],
            Some(Linkage::Many(identifiers)) => identifiers.iter().collect(),
            None => Vec::new(),
        }
    }
}

impl Identifier {
    /// # Errors
    ///
    /// Returns [`RemoteError::InvalidIdentifier`] when the id isn't a UUID.
    pub fn uuid<T>(&self) -> Result<TypedUuid<T>, RemoteError> {
        parse_id(&self.id)
    }
}

fn parse_id<T>(id: &str) -> Result<TypedUuid<T>, RemoteError> {
    id.parse()
        .map_err(|_err| RemoteError::InvalidIdentifier(id.to_owned()))
}

impl Document {
    /// Primary resources as a slice, whatever the shape of `data`.
    pub fn resources(&self) -> &[Resource] {
        match &self.data {
            PrimaryData::None => &[],
            PrimaryData::One(resource) => slice::from_ref(resource.as_ref()),
            PrimaryData::Many(resources) => resources,
        }
    }

    /// The first primary resource.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::NotFound`] when the document holds no data.
    pub fn single(&self) -> Result<&Resource, RemoteError> {
        self.resources().first().ok_or(RemoteError::NotFound)
    }

    pub fn record_count(&self) -> Option<u64> {
        self.meta.record_count
    }

    /// Look up a resource by identifier in `included`, then in primary data.
    pub fn find(&self, identifier: &Identifier) -> Option<&Resource> {
        self.included
            .iter()
            .chain(self.resources())
            .find(|r| r.kind == identifier.kind && r.id == identifier.id)
    }

    /// Resources reachable from `resource` through the named relationship.
    ///
    /// Identifiers whose resource wasn't included are skipped.
    pub fn related<'a>(&'a self, resource: &Resource, name: &str) -> Vec<&'a Resource> {
        resource
            .related_identifiers(name)
            .into_iter()
            .filter_map(|identifier| self.find(identifier))
            .collect()
    }

    pub fn related_one<'a>(&'a self, resource: &Resource, name: &str) -> Option<&'a Resource> {
        self.related(resource, name).into_iter().next()
    }

    /// Decode every primary resource.
    ///
    /// # Errors
    ///
    /// Returns the first decoding error encountered.
    pub fn decode_all<T: FromResource>(&self) -> Result<Vec<T>, RemoteError> {
        self.resources()
            .iter()
            .map(|resource| T::from_resource(resource, self))
            .collect()
    }

    /// Decode the first primary resource.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::NotFound`] on an empty document or a decoding
    /// error.
    pub fn decode_one<T: FromResource>(&self) -> Result<T, RemoteError> {
        T::from_resource(self.single()?, self)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    fn compound() -> Result<Document, serde_json::Error> {
        serde_json::from_value(json!({
            "data": [{
                "id": "0190b5c4-4c4b-7c1a-9a2e-6a2b8f4e1c01",
                "type": "organizations",
                "attributes": { "name": "Acme" },
                "relationships": {
                    "users": { "data": [
                        { "type": "users", "id": "u-1" },
                        { "type": "users", "id": "u-missing" }
                    ] },
                    "main_address": { "data": null }
                }
            }],
            "included": [
                { "id": "u-1", "type": "users", "attributes": { "email": "a@b.co" } }
            ],
            "meta": { "record_count": 42 }
        }))
    }

    #[test]
    fn resolves_included_relationships() -> TestResult {
        let document = compound()?;
        let organization = document.single()?;

        let users = document.related(organization, "users");

        assert_eq!(users.len(), 1);
        assert_eq!(users.first().map(|u| u.id.as_str()), Some("u-1"));
        assert!(document.related_one(organization, "main_address").is_none());
        assert_eq!(document.record_count(), Some(42));

        Ok(())
    }

    #[test]
    fn missing_or_null_data_is_empty() -> TestResult {
        let missing: Document = serde_json::from_value(json!({ "meta": {} }))?;
        let null: Document = serde_json::from_value(json!({ "data": null }))?;

        assert!(missing.resources().is_empty());
        assert!(matches!(null.single(), Err(RemoteError::NotFound)));

        Ok(())
    }

    #[test]
    fn single_resource_data_is_exposed_as_slice() -> TestResult {
        let document: Document = serde_json::from_value(json!({
            "data": { "id": "1", "type": "users", "attributes": {} }
        }))?;

        assert_eq!(document.resources().len(), 1);

        Ok(())
    }

    #[test]
    fn non_uuid_ids_are_rejected() -> TestResult {
        struct Marker;

        let document = compound()?;
        let user = document.included.first().ok_or("no included user")?;

        assert!(matches!(
            user.uuid::<Marker>(),
            Err(RemoteError::InvalidIdentifier(id)) if id == "u-1"
        ));
        assert!(document.single()?.uuid::<Marker>().is_ok());

        Ok(())
    }
}
