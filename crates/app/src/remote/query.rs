//! JSON-API query construction.

/// Page selection (`page[number]`, `page[size]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// 1-based page number.
    pub number: u32,

    /// Number of records per page.
    pub size: u32,
}

impl Page {
    /// First page holding a single record, used for "find one" lookups.
    pub const SINGLE: Self = Self { number: 1, size: 1 };
}

/// Query sent to the remote resource service.
///
/// Built fluently and flattened into query-string pairs by [`Query::to_pairs`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    filters: Vec<(String, String)>,
    includes: Vec<String>,
    fields: Vec<(String, Vec<String>)>,
    sort: Vec<String>,
    page: Option<Page>,
    metadata: Vec<(String, String)>,
    params: Vec<(String, String)>,
}

impl Query {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a `filter[key]=value` pair.
    #[must_use]
    pub fn filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((key.into(), value.into()));
        self
    }

    /// Include related resources (compound document).
    #[must_use]
    pub fn include<I, S>(mut self, relations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.includes.extend(relations.into_iter().map(Into::into));
        self
    }

    /// Restrict the attributes returned for a resource type (sparse fieldsets).
    #[must_use]
    pub fn fields<I, S>(mut self, resource_type: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields.push((
            resource_type.into(),
            fields.into_iter().map(Into::into).collect(),
        ));
        self
    }

    /// Append a sort key; prefix with `-` for descending order.
    #[must_use]
    pub fn sort(mut self, field: impl Into<String>) -> Self {
        self.sort.push(field.into());
        self
    }

    #[must_use]
    pub fn page(mut self, page: Page) -> Self {
        self.page = Some(page);
        self
    }

    /// Add a `_metadata[key]=value` pair.
    #[must_use]
    pub fn metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.push((key.into(), value.into()));
        self
    }

    /// Add a free-form top level parameter.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Filters currently set on the query.
    pub fn filters(&self) -> &[(String, String)] {
        &self.filters
    }

    /// Metadata currently set on the query.
    pub fn metadata_pairs(&self) -> &[(String, String)] {
        &self.metadata
    }

    /// Includes currently set on the query.
    pub fn includes(&self) -> &[String] {
        &self.includes
    }

    pub fn current_page(&self) -> Option<Page> {
        self.page
    }

    pub fn sort_keys(&self) -> &[String] {
        &self.sort
    }

    /// Flatten into query-string pairs.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();

        for (key, value) in &self.filters {
            pairs.push((format!("filter[{key}]"), value.clone()));
        }

        if !self.includes.is_empty() {
            pairs.push(("include".to_owned(), self.includes.join(",")));
        }

        for (resource_type, fields) in &self.fields {
            pairs.push((format!("fields[{resource_type}]"), fields.join(",")));
        }

        if !self.sort.is_empty() {
            pairs.push(("sort".to_owned(), self.sort.join(",")));
        }

        if let Some(page) = self.page {
            pairs.push(("page[number]".to_owned(), page.number.to_string()));
            pairs.push(("page[size]".to_owned(), page.size.to_string()));
        }

        for (key, value) in &self.metadata {
            pairs.push((format!("_metadata[{key}]"), value.clone()));
        }

        pairs.extend(self.params.iter().cloned());

        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(key: &str, value: &str) -> (String, String) {
        (key.to_owned(), value.to_owned())
    }

    #[test]
    fn empty_query_has_no_pairs() {
        assert!(Query::new().to_pairs().is_empty());
    }

    #[test]
    fn flattens_every_section() {
        let query = Query::new()
            .filter("subscription.id", "abc")
            .include(["subscription", "subscription.product"])
            .fields("organizations", ["uid", "name"])
            .sort("-created_at")
            .page(Page::SINGLE)
            .metadata("act_as_manager", "u-1")
            .param("fulfilled_only", "true");

        assert_eq!(
            query.to_pairs(),
            vec![
                pair("filter[subscription.id]", "abc"),
                pair("include", "subscription,subscription.product"),
                pair("fields[organizations]", "uid,name"),
                pair("sort", "-created_at"),
                pair("page[number]", "1"),
                pair("page[size]", "1"),
                pair("_metadata[act_as_manager]", "u-1"),
                pair("fulfilled_only", "true"),
            ]
        );
    }
}
