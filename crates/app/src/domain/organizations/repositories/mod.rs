//! Organization Repositories

mod app_instances;
mod organizations;

pub(crate) use app_instances::RemoteAppInstancesRepository;
pub(crate) use organizations::RemoteOrganizationsRepository;
