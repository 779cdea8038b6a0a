//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};

use backoffice_app::{
    auth::{Actor, AdminRole, MockAuthService, RequestContext, SupportOrganization},
    context::AppContext,
    domain::{
        imports::MockImportService,
        invites::records::{InviteStatus, OrgaInviteRecord, OrgaInviteUuid},
        members::{MockMembersService, role::MemberRole},
        organizations::{
            MockOrganizationsService,
            records::{
                AppInstanceRecord, AppInstanceStatus, AppInstanceUuid, GeoMetadata,
                OrganizationRecord, OrganizationUuid,
            },
        },
        subscription_events::{
            MockSubscriptionEventsService,
            records::{
                SubscriptionEventRecord, SubscriptionEventStatus, SubscriptionEventType,
                SubscriptionEventUuid,
            },
        },
        users::records::{UserRecord, UserUuid},
    },
};

use crate::state::State;

/// Service mocks backing a test [`AppContext`].
///
/// Mocks without expectations fail on any call.
#[derive(Default)]
pub(crate) struct Mocks {
    pub(crate) organizations: MockOrganizationsService,
    pub(crate) members: MockMembersService,
    pub(crate) subscription_events: MockSubscriptionEventsService,
    pub(crate) imports: MockImportService,
    pub(crate) auth: MockAuthService,
}

impl Mocks {
    fn into_app_context(self) -> AppContext {
        AppContext {
            organizations: Arc::new(self.organizations),
            members: Arc::new(self.members),
            subscription_events: Arc::new(self.subscription_events),
            imports: Arc::new(self.imports),
            auth: Arc::new(self.auth),
        }
    }
}

pub(crate) fn admin_actor() -> Actor {
    Actor {
        uuid: UserUuid::new(),
        email: "admin@backoffice.test".to_owned(),
        admin_role: AdminRole::Admin,
        support_organization: None,
    }
}

pub(crate) fn admin_context() -> RequestContext {
    RequestContext::new(admin_actor(), true)
}

pub(crate) fn support_context(organization: OrganizationUuid, external_id: &str) -> RequestContext {
    RequestContext::new(
        Actor {
            uuid: UserUuid::new(),
            email: "support@backoffice.test".to_owned(),
            admin_role: AdminRole::Support,
            support_organization: Some(SupportOrganization {
                uuid: Some(organization),
                external_id: Some(external_id.to_owned()),
            }),
        },
        true,
    )
}

/// State with support access enabled.
pub(crate) fn state_with(mocks: Mocks) -> Arc<State> {
    State::from_app_context(mocks.into_app_context(), true)
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    state_with(Mocks {
        auth,
        ..Mocks::default()
    })
}

/// Serve `route` with `mocks` as the app and `ctx` as the authenticated caller.
pub(crate) fn service_as(ctx: RequestContext, mocks: Mocks, route: Router) -> Service {
    let state = State::from_app_context(mocks.into_app_context(), ctx.support_enabled);

    Service::new(
        Router::new()
            .hoop(inject(state))
            .hoop(inject(ctx))
            .push(route),
    )
}

/// Serve `route` as an administrator.
pub(crate) fn admin_service(mocks: Mocks, route: Router) -> Service {
    service_as(admin_context(), mocks, route)
}

pub(crate) fn make_organization(uuid: OrganizationUuid, name: &str) -> OrganizationRecord {
    OrganizationRecord {
        uuid,
        uid: Some("org-fbba".to_owned()),
        name: name.to_owned(),
        external_id: Some("EXT-1".to_owned()),
        billing_currency: Some("USD".to_owned()),
        account_frozen: false,
        soa_enabled: true,
        demo_account: false,
        industry: None,
        size: None,
        financial_year_end_month: None,
        geo: GeoMetadata::default(),
        main_address: None,
        app_instances: Vec::new(),
        members: Vec::new(),
        invites: Vec::new(),
        created_at: Some(Timestamp::UNIX_EPOCH),
    }
}

pub(crate) fn make_instance(nid: &str, status: AppInstanceStatus) -> AppInstanceRecord {
    AppInstanceRecord {
        uuid: AppInstanceUuid::new(),
        nid: nid.to_owned(),
        name: Some(nid.to_uppercase()),
        status,
        created_at: None,
    }
}

pub(crate) fn make_user(email: &str, confirmed: bool) -> UserRecord {
    UserRecord {
        uuid: UserUuid::new(),
        email: email.to_owned(),
        name: Some("Jane".to_owned()),
        surname: Some("Doe".to_owned()),
        phone: None,
        confirmed_at: confirmed.then_some(Timestamp::UNIX_EPOCH),
        confirmation_sent_at: None,
        created_at: Some(Timestamp::UNIX_EPOCH),
    }
}

pub(crate) fn make_invite(
    organization: OrganizationUuid,
    email: &str,
    status: InviteStatus,
) -> OrgaInviteRecord {
    OrgaInviteRecord {
        uuid: OrgaInviteUuid::new(),
        organization_uuid: Some(organization),
        user_email: email.to_owned(),
        role: MemberRole::Admin,
        status,
        created_at: None,
    }
}

pub(crate) fn make_event(uuid: SubscriptionEventUuid) -> SubscriptionEventRecord {
    SubscriptionEventRecord {
        uuid,
        event_type: SubscriptionEventType::Provision,
        status: SubscriptionEventStatus::Requested,
        message: None,
        created_at: Some(Timestamp::UNIX_EPOCH),
        subscription: None,
        product_pricing: None,
    }
}
