//! Organization request bodies and query parameters.

use std::collections::HashSet;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use uuid::Uuid;

use backoffice_app::{
    domain::{
        members::{
            data::{MemberRef, NewMember},
            role::{MemberRole, UnknownRole},
        },
        organizations::{
            data::{ListScope, NewOrganization, OrganizationListRequest, OrganizationUpdate},
            records::Address,
        },
    },
    remote::ListParams,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum RequestError {
    #[error("{0} can't be blank")]
    Blank(&'static str),

    #[error("invalid `{0}` parameter")]
    InvalidParam(String),

    #[error("`{0}` parameter given more than once")]
    Repeated(String),

    #[error("`terms` must be a JSON object")]
    InvalidTerms,

    #[error(transparent)]
    Role(#[from] UnknownRole),
}

/// Organization Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrganizationRequest {
    pub organization: OrganizationAttributes,
}

/// Application nids as accepted from clients: one nid or a list of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub(crate) enum AppNids {
    One(String),
    Many(Vec<String>),
}

/// Writable organization attributes.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrganizationAttributes {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub billing_currency: Option<String>,

    #[serde(default)]
    pub main_address_attributes: Option<AddressRequest>,

    /// Desired applications. Absent leaves instances alone while `null`
    /// terminates all of them.
    #[serde(default, deserialize_with = "nullable")]
    pub app_nids: Option<Option<AppNids>>,
}

/// Keeps `null` apart from an absent key.
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl OrganizationAttributes {
    fn desired_nids(app_nids: Option<Option<AppNids>>) -> Option<Vec<String>> {
        app_nids.map(|nids| match nids {
            None => Vec::new(),
            Some(AppNids::One(nid)) => vec![nid],
            Some(AppNids::Many(nids)) => nids,
        })
    }
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddressRequest {
    pub street: Option<String>,
    pub city: Option<String>,
    pub state_code: Option<String>,
    pub postal_code: Option<String>,
    pub country_code: Option<String>,
}

impl From<AddressRequest> for Address {
    fn from(request: AddressRequest) -> Self {
        Address {
            street: request.street,
            city: request.city,
            state_code: request.state_code,
            postal_code: request.postal_code,
            country_code: request.country_code,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

impl TryFrom<OrganizationAttributes> for NewOrganization {
    type Error = RequestError;

    fn try_from(attributes: OrganizationAttributes) -> Result<Self, Self::Error> {
        Ok(NewOrganization {
            name: non_blank(attributes.name).ok_or(RequestError::Blank("name"))?,
            billing_currency: non_blank(attributes.billing_currency),
            external_id: None,
            main_address: attributes.main_address_attributes.map(Into::into),
            app_nids: OrganizationAttributes::desired_nids(attributes.app_nids),
        })
    }
}

impl TryFrom<OrganizationAttributes> for OrganizationUpdate {
    type Error = RequestError;

    fn try_from(attributes: OrganizationAttributes) -> Result<Self, Self::Error> {
        let name = match attributes.name {
            Some(name) => Some(non_blank(Some(name)).ok_or(RequestError::Blank("name"))?),
            None => None,
        };

        Ok(OrganizationUpdate {
            name,
            billing_currency: non_blank(attributes.billing_currency),
            main_address: attributes.main_address_attributes.map(Into::into),
            app_nids: OrganizationAttributes::desired_nids(attributes.app_nids),
        })
    }
}

/// Invite Member Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct InviteMemberRequest {
    pub user: InviteeAttributes,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct InviteeAttributes {
    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub surname: Option<String>,

    #[serde(default)]
    pub phone: Option<String>,

    /// Defaults to `Member`.
    #[serde(default)]
    pub role: Option<String>,
}

fn parse_role(role: Option<String>) -> Result<Option<MemberRole>, RequestError> {
    Ok(non_blank(role)
        .map(|role| role.parse::<MemberRole>())
        .transpose()?)
}

impl TryFrom<InviteeAttributes> for NewMember {
    type Error = RequestError;

    fn try_from(attributes: InviteeAttributes) -> Result<Self, Self::Error> {
        Ok(NewMember {
            email: non_blank(Some(attributes.email)).ok_or(RequestError::Blank("email"))?,
            name: non_blank(attributes.name),
            surname: non_blank(attributes.surname),
            phone: non_blank(attributes.phone),
            role: parse_role(attributes.role)?.unwrap_or_default(),
        })
    }
}

/// Member Request
///
/// Designates a member by user id, falling back to the email of a pending
/// invite.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct MemberRequest {
    pub member: MemberAttributes,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct MemberAttributes {
    #[serde(default)]
    pub id: Option<Uuid>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub role: Option<String>,
}

impl MemberAttributes {
    pub(crate) fn member_ref(&self) -> MemberRef {
        MemberRef {
            user: self.id.map(Into::into),
            email: non_blank(self.email.clone()),
        }
    }

    pub(crate) fn required_role(&self) -> Result<MemberRole, RequestError> {
        parse_role(self.role.clone())?.ok_or(RequestError::Blank("role"))
    }
}

fn parse_number(key: &str, value: &str) -> Result<u32, RequestError> {
    value
        .trim()
        .parse()
        .map_err(|_ignored| RequestError::InvalidParam(key.to_owned()))
}

fn term_value(value: Value) -> String {
    match value {
        Value::String(value) => value,
        other => other.to_string(),
    }
}

/// Build the organization index request from query parameters.
///
/// `organization_external_id` selects the support lookup, `terms` (a JSON
/// object) selects the search and anything else lists a page. Each key may
/// appear once.
pub(crate) fn list_request<'a, I>(queries: I) -> Result<OrganizationListRequest, RequestError>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut params = ListParams::default();
    let mut scope = ListScope::default();
    let mut terms = None;
    let mut external_id = None;
    let mut seen = HashSet::new();

    for (key, value) in queries {
        if !seen.insert(key) {
            return Err(RequestError::Repeated(key.to_owned()));
        }

        match key {
            "limit" => params.limit = Some(parse_number(key, value)?),
            "offset" => params.offset = Some(parse_number(key, value)?),
            "order_by" => params.order_by = Some(value.to_owned()),
            "terms" => terms = Some(value.to_owned()),
            "organization_external_id" => external_id = Some(value.to_owned()),
            "sub_tenant_id" => scope.sub_tenant_id = Some(value.to_owned()),
            "account_manager_id" => scope.account_manager_id = Some(value.to_owned()),
            _ => {
                if let Some(field) = key
                    .strip_prefix("where[")
                    .and_then(|rest| rest.strip_suffix(']'))
                    .filter(|field| !field.is_empty())
                {
                    params.filters.insert(field.to_owned(), value.to_owned());
                }
            }
        }
    }

    if let Some(external_id) = external_id {
        return Ok(OrganizationListRequest::SupportLookup { external_id });
    }

    if let Some(terms) = terms {
        let terms: Map<String, Value> =
            serde_json::from_str(&terms).map_err(|_ignored| RequestError::InvalidTerms)?;

        return Ok(OrganizationListRequest::Search {
            terms: terms
                .into_iter()
                .map(|(key, value)| (key, term_value(value)))
                .collect(),
            params,
            scope,
        });
    }

    Ok(OrganizationListRequest::Index { params, scope })
}
