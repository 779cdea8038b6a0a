//! Organizations Repository

use jiff::Timestamp;
use reqwest::Method;
use serde::Deserialize;
use serde_json::{Map, Value, json};

use crate::{
    domain::{
        invites::records::OrgaInviteRecord,
        members::role::MemberRole,
        organizations::{
            data::{NewOrganization, OrganizationUpdate},
            records::{
                Address, AppInstanceRecord, ArrearsRecord, GeoMetadata, OrganizationMember,
                OrganizationRecord, OrganizationUuid,
            },
        },
        users::records::{UserRecord, UserUuid},
    },
    remote::{Document, FromResource, Page, Query, RemoteClient, RemoteError, Resource},
};

/// Relationships loaded for the detailed organization view.
pub(crate) const DEPENDENCIES: [&str; 7] = [
    "app_instances",
    "app_instances.app",
    "users",
    "orga_relations",
    "orga_invites",
    "orga_invites.user",
    "main_address",
];

/// Attributes selected for the organization index.
pub(crate) const INDEX_FIELDS: [&str; 16] = [
    "uid",
    "name",
    "account_frozen",
    "soa_enabled",
    "geo_country_code",
    "geo_state_code",
    "geo_city",
    "geo_tz",
    "geo_currency",
    "industry",
    "size",
    "financial_year_end_month",
    "created_at",
    "external_id",
    "demo_account",
    "billing_currency",
];

#[derive(Debug, Clone)]
pub(crate) struct RemoteOrganizationsRepository {
    client: RemoteClient,
}

impl RemoteOrganizationsRepository {
    #[must_use]
    pub(crate) fn new(client: RemoteClient) -> Self {
        Self { client }
    }

    /// List organizations with index fields. Returns the page and the
    /// remote's total record count.
    pub(crate) async fn list(
        &self,
        query: Query,
    ) -> Result<(Vec<OrganizationRecord>, Option<u64>), RemoteError> {
        let query = query.fields("organizations", INDEX_FIELDS);

        let document = self.client.fetch("/organizations", &query).await?;

        Ok((document.decode_all()?, document.record_count()))
    }

    /// Load an organization with every dependency.
    pub(crate) async fn find(
        &self,
        organization: OrganizationUuid,
        query: Query,
    ) -> Result<OrganizationRecord, RemoteError> {
        let query = query.include(DEPENDENCIES);

        self.client
            .fetch(&format!("/organizations/{organization}"), &query)
            .await?
            .decode_one()
    }

    pub(crate) async fn find_by_external_id(
        &self,
        external_id: &str,
        query: Query,
    ) -> Result<Option<OrganizationRecord>, RemoteError> {
        let query = query.filter("external_id", external_id).page(Page::SINGLE);

        let (organizations, _) = self.list(query).await?;

        Ok(organizations.into_iter().next())
    }

    pub(crate) async fn create(
        &self,
        organization: &NewOrganization,
    ) -> Result<OrganizationRecord, RemoteError> {
        let mut attributes = Map::new();

        attributes.insert("name".to_owned(), json!(organization.name));
        insert_some(
            &mut attributes,
            "billing_currency",
            organization.billing_currency.as_deref(),
        );
        insert_some(&mut attributes, "external_id", organization.external_id.as_deref());

        if let Some(address) = &organization.main_address {
            attributes.insert("main_address_attributes".to_owned(), json!(address));
        }

        self.client
            .create("/organizations", "organizations", Value::Object(attributes))
            .await?
            .decode_one()
    }

    pub(crate) async fn update(
        &self,
        organization: OrganizationUuid,
        update: &OrganizationUpdate,
    ) -> Result<(), RemoteError> {
        let mut attributes = Map::new();

        insert_some(&mut attributes, "name", update.name.as_deref());
        insert_some(&mut attributes, "billing_currency", update.billing_currency.as_deref());

        if let Some(address) = &update.main_address {
            attributes.insert("main_address_attributes".to_owned(), json!(address));
        }

        let id = organization.to_string();

        self.client
            .update(
                &format!("/organizations/{id}"),
                "organizations",
                &id,
                Value::Object(attributes),
            )
            .await?;

        Ok(())
    }

    pub(crate) async fn freeze(&self, organization: OrganizationUuid) -> Result<(), RemoteError> {
        self.member_action(organization, "freeze", None).await
    }

    pub(crate) async fn unfreeze(&self, organization: OrganizationUuid) -> Result<(), RemoteError> {
        self.member_action(organization, "unfreeze", None).await
    }

    pub(crate) async fn remove_user(
        &self,
        organization: OrganizationUuid,
        user: UserUuid,
    ) -> Result<(), RemoteError> {
        let body = json!({ "data": { "attributes": { "user_id": user.to_string() } } });

        self.member_action(organization, "remove_user", Some(body)).await
    }

    pub(crate) async fn update_user_role(
        &self,
        organization: OrganizationUuid,
        user: UserUuid,
        role: MemberRole,
    ) -> Result<(), RemoteError> {
        let body = json!({
            "data": { "attributes": { "user_id": user.to_string(), "role": role.as_str() } }
        });

        self.member_action(organization, "update_user_role", Some(body))
            .await
    }

    /// Organization count from tenant reporting.
    pub(crate) async fn organizations_count(&self, query: Query) -> Result<u64, RemoteError> {
        #[derive(Deserialize)]
        struct TenantReporting {
            #[serde(default)]
            organizations_count: u64,
        }

        let document = self.client.fetch("/tenant_reporting", &query).await?;
        let reporting: TenantReporting = document.single()?.attributes()?;

        Ok(reporting.organizations_count)
    }

    pub(crate) async fn arrears(&self) -> Result<Vec<ArrearsRecord>, RemoteError> {
        self.client
            .fetch("/arrears_situations", &Query::new())
            .await?
            .decode_all()
    }

    async fn member_action(
        &self,
        organization: OrganizationUuid,
        action: &str,
        body: Option<Value>,
    ) -> Result<(), RemoteError> {
        self.client
            .action(
                Method::PATCH,
                &format!("/organizations/{organization}/{action}"),
                body,
            )
            .await?;

        Ok(())
    }
}

fn insert_some(attributes: &mut Map<String, Value>, key: &str, value: Option<&str>) {
    if let Some(value) = value {
        attributes.insert(key.to_owned(), json!(value));
    }
}

#[derive(Debug, Deserialize)]
struct OrganizationAttributes {
    name: String,

    #[serde(default)]
    uid: Option<String>,

    #[serde(default)]
    external_id: Option<String>,

    #[serde(default)]
    billing_currency: Option<String>,

    #[serde(default)]
    account_frozen: bool,

    #[serde(default)]
    soa_enabled: bool,

    #[serde(default)]
    demo_account: bool,

    #[serde(default)]
    industry: Option<String>,

    #[serde(default)]
    size: Option<String>,

    #[serde(default)]
    financial_year_end_month: Option<u8>,

    #[serde(flatten)]
    geo: GeoMetadata,

    #[serde(default)]
    created_at: Option<Timestamp>,
}

#[derive(Debug, Deserialize)]
struct OrgaRelationAttributes {
    user_id: String,
    role: MemberRole,
}

impl FromResource for OrganizationRecord {
    fn from_resource(resource: &Resource, document: &Document) -> Result<Self, RemoteError> {
        let attributes: OrganizationAttributes = resource.attributes()?;

        let main_address = document
            .related_one(resource, "main_address")
            .map(Resource::attributes::<Address>)
            .transpose()?;

        let app_instances = document
            .related(resource, "app_instances")
            .into_iter()
            .map(|instance| AppInstanceRecord::from_resource(instance, document))
            .collect::<Result<Vec<_>, _>>()?;

        let invites = document
            .related(resource, "orga_invites")
            .into_iter()
            .map(|invite| OrgaInviteRecord::from_resource(invite, document))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            uuid: resource.uuid()?,
            uid: attributes.uid,
            name: attributes.name,
            external_id: attributes.external_id,
            billing_currency: attributes.billing_currency,
            account_frozen: attributes.account_frozen,
            soa_enabled: attributes.soa_enabled,
            demo_account: attributes.demo_account,
            industry: attributes.industry,
            size: attributes.size,
            financial_year_end_month: attributes.financial_year_end_month,
            geo: attributes.geo,
            main_address,
            app_instances,
            members: members(resource, document)?,
            invites,
            created_at: attributes.created_at,
        })
    }
}

/// Users of the organization paired with their role from `orga_relations`.
fn members(
    resource: &Resource,
    document: &Document,
) -> Result<Vec<OrganizationMember>, RemoteError> {
    let relations = document
        .related(resource, "orga_relations")
        .into_iter()
        .map(Resource::attributes::<OrgaRelationAttributes>)
        .collect::<Result<Vec<_>, _>>()?;

    document
        .related(resource, "users")
        .into_iter()
        .map(|user| {
            let role = relations
                .iter()
                .find(|relation| relation.user_id == user.id)
                .map_or(MemberRole::Member, |relation| relation.role);

            Ok(OrganizationMember {
                user: UserRecord::from_resource(user, document)?,
                role,
            })
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct Money {
    cents: i64,
    currency: String,
}

#[derive(Debug, Deserialize)]
struct ArrearsAttributes {
    name: String,
    payment: Money,

    #[serde(default)]
    category: Option<String>,

    #[serde(default)]
    status: Option<String>,
}

impl FromResource for ArrearsRecord {
    fn from_resource(resource: &Resource, _document: &Document) -> Result<Self, RemoteError> {
        let attributes: ArrearsAttributes = resource.attributes()?;

        Ok(Self {
            id: resource.id.clone(),
            name: attributes.name,
            amount_cents: attributes.payment.cents,
            currency: attributes.payment.currency,
            category: attributes.category,
            status: attributes.status,
        })
    }
}
