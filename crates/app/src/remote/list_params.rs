//! Admin list parameters and their translation into remote queries.

use std::collections::BTreeMap;

use crate::remote::{Page, Query};

/// Default page size when only an offset is given.
const DEFAULT_LIMIT: u32 = 30;

/// Pagination, ordering and filtering as passed by admin clients.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    pub limit: Option<u32>,
    pub offset: Option<u32>,

    /// `"field"`, `"field.asc"` or `"field.desc"`.
    pub order_by: Option<String>,

    /// Equality filters, forwarded as `filter[key]`.
    pub filters: BTreeMap<String, String>,
}

impl ListParams {
    /// Apply the parameters to `query`.
    ///
    /// `limit` becomes the page size and `offset` selects the page that holds
    /// it: `page[number] = offset / limit + 1`.
    #[must_use]
    pub fn apply(&self, mut query: Query) -> Query {
        if self.limit.is_some() || self.offset.is_some() {
            let size = self.limit.unwrap_or(DEFAULT_LIMIT);
            let number = self
                .offset
                .and_then(|offset| offset.checked_div(size))
                .map_or(1, |page| page.saturating_add(1));

            query = query.page(Page { number, size });
        }

        if let Some(sort) = self.order_by.as_deref().and_then(sort_key) {
            query = query.sort(sort);
        }

        for (key, value) in &self.filters {
            query = query.filter(key, value);
        }

        query
    }
}

fn sort_key(order_by: &str) -> Option<String> {
    let order_by = order_by.trim();

    let key = if let Some(field) = order_by.strip_suffix(".desc") {
        format!("-{field}")
    } else {
        order_by.strip_suffix(".asc").unwrap_or(order_by).to_owned()
    };

    (!key.is_empty() && key != "-").then_some(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_selects_page_containing_it() {
        let params = ListParams {
            limit: Some(25),
            offset: Some(50),
            ..ListParams::default()
        };

        let query = params.apply(Query::new());

        assert_eq!(query.current_page(), Some(Page { number: 3, size: 25 }));
    }

    #[test]
    fn zero_limit_falls_back_to_first_page() {
        let params = ListParams {
            limit: Some(0),
            offset: Some(10),
            ..ListParams::default()
        };

        assert_eq!(
            params.apply(Query::new()).current_page(),
            Some(Page { number: 1, size: 0 })
        );
    }

    #[test]
    fn translates_order_and_filters() {
        let params = ListParams {
            order_by: Some("created_at.desc".to_owned()),
            filters: BTreeMap::from([("account_frozen".to_owned(), "true".to_owned())]),
            ..ListParams::default()
        };

        let query = params.apply(Query::new());

        assert_eq!(query.sort_keys(), ["-created_at".to_owned()]);
        assert_eq!(
            query.filters(),
            [("account_frozen".to_owned(), "true".to_owned())]
        );
        assert_eq!(query.current_page(), None);
    }

    #[test]
    fn ascending_suffix_is_dropped() {
        assert_eq!(sort_key("name.asc").as_deref(), Some("name"));
        assert_eq!(sort_key("name").as_deref(), Some("name"));
        assert_eq!(sort_key(""), None);
    }
}
