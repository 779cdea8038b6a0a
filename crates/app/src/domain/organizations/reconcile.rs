//! Application list reconciliation.

use rustc_hash::FxHashSet;

use crate::domain::organizations::records::{AppInstanceRecord, AppInstanceUuid};

/// Changes needed to make an organization's active instances match a desired
/// nid list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppListPlan {
    /// Active instances whose nid is still wanted.
    pub keep: Vec<AppInstanceUuid>,

    /// Active instances to terminate, in existing order.
    pub terminate: Vec<AppInstanceUuid>,

    /// Nids to provision a new instance for, in desired order.
    pub provision: Vec<String>,
}

impl AppListPlan {
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.terminate.is_empty() && self.provision.is_empty()
    }
}

/// Plan the reconciliation of `existing` instances against `desired` nids.
///
/// Inactive instances are ignored. Each desired nid is claimed by at most one
/// active instance: later instances sharing the nid are terminated. Duplicate
/// and blank nids in `desired` are dropped.
#[must_use]
pub fn plan_app_list(desired: &[String], existing: &[AppInstanceRecord]) -> AppListPlan {
    let mut seen = FxHashSet::default();

    let ordered: Vec<&str> = desired
        .iter()
        .map(|nid| nid.trim())
        .filter(|nid| !nid.is_empty() && seen.insert(*nid))
        .collect();

    let mut unclaimed: FxHashSet<&str> = ordered.iter().copied().collect();
    let mut plan = AppListPlan::default();

    for instance in existing.iter().filter(|instance| instance.is_active()) {
        if unclaimed.remove(instance.nid.as_str()) {
            plan.keep.push(instance.uuid);
        } else {
            plan.terminate.push(instance.uuid);
        }
    }

    plan.provision = ordered
        .into_iter()
        .filter(|nid| unclaimed.contains(nid))
        .map(str::to_owned)
        .collect();

    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::organizations::records::AppInstanceStatus;

    fn instance(nid: &str, status: AppInstanceStatus) -> AppInstanceRecord {
        AppInstanceRecord {
            uuid: AppInstanceUuid::new(),
            nid: nid.to_owned(),
            name: None,
            status,
            created_at: None,
        }
    }

    fn nids(values: &[&str]) -> Vec<String> {
        values.iter().map(|&nid| nid.to_owned()).collect()
    }

    #[test]
    fn keeps_terminates_and_provisions() {
        let xero = instance("xero", AppInstanceStatus::Active);
        let slack = instance("slack", AppInstanceStatus::Provisioning);

        let plan = plan_app_list(&nids(&["xero", "hubspot"]), &[xero.clone(), slack.clone()]);

        assert_eq!(plan.keep, vec![xero.uuid]);
        assert_eq!(plan.terminate, vec![slack.uuid]);
        assert_eq!(plan.provision, nids(&["hubspot"]));
    }

    #[test]
    fn empty_desired_list_terminates_every_active_instance() {
        let active = instance("xero", AppInstanceStatus::Active);
        let provisioning = instance("slack", AppInstanceStatus::Provisioning);
        let terminated = instance("asana", AppInstanceStatus::Terminated);

        let plan = plan_app_list(&[], &[active.clone(), provisioning.clone(), terminated]);

        assert_eq!(plan.terminate, vec![active.uuid, provisioning.uuid]);
        assert!(plan.keep.is_empty());
        assert!(plan.provision.is_empty());
    }

    #[test]
    fn terminated_instances_do_not_satisfy_desired_nids() {
        let terminated = instance("xero", AppInstanceStatus::Terminated);

        let plan = plan_app_list(&nids(&["xero"]), &[terminated]);

        assert!(plan.terminate.is_empty());
        assert_eq!(plan.provision, nids(&["xero"]));
    }

    #[test]
    fn duplicate_desired_nids_are_provisioned_once() {
        let plan = plan_app_list(&nids(&["xero", "xero", " ", "slack", "xero"]), &[]);

        assert_eq!(plan.provision, nids(&["xero", "slack"]));
    }

    #[test]
    fn second_instance_of_same_nid_is_terminated() {
        let first = instance("xero", AppInstanceStatus::Active);
        let second = instance("xero", AppInstanceStatus::Active);

        let plan = plan_app_list(&nids(&["xero"]), &[first.clone(), second.clone()]);

        assert_eq!(plan.keep, vec![first.uuid]);
        assert_eq!(plan.terminate, vec![second.uuid]);
        assert!(plan.provision.is_empty());
    }

    #[test]
    fn matching_lists_are_a_noop() {
        let xero = instance("xero", AppInstanceStatus::Active);

        assert!(plan_app_list(&nids(&["xero"]), &[xero]).is_noop());
    }

    #[test]
    fn resulting_active_set_equals_desired_set() {
        let existing = vec![
            instance("a", AppInstanceStatus::Active),
            instance("b", AppInstanceStatus::Active),
            instance("c", AppInstanceStatus::Provisioning),
            instance("d", AppInstanceStatus::Terminated),
        ];
        let desired = nids(&["b", "d", "e"]);

        let plan = plan_app_list(&desired, &existing);

        let mut active: Vec<String> = existing
            .iter()
            .filter(|i| i.is_active() && !plan.terminate.contains(&i.uuid))
            .map(|i| i.nid.clone())
            .chain(plan.provision.iter().cloned())
            .collect();
        active.sort();

        assert_eq!(active, nids(&["b", "d", "e"]));
    }
}
