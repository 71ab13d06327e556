// Query-string grammar for the santaba list endpoints.
//
// A filter is comma-separated `field:value` (equality) and `field!:value`
// (inequality) clauses combined with implicit AND; alternatives are joined
// with `||` (used for id OR-groups). Field projection goes in `fields`,
// result count in `size` (1 = search-for-one, -1 = unbounded), and PATCH
// requests restrict which body keys apply via `patchFields`.

use std::fmt;

/// Builder for a filter expression.
///
/// Clauses added with [`Filter::eq`] / [`Filter::ne`] AND together;
/// [`Filter::or`] starts a new `||` alternative.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    // Outer vec: ||-joined alternatives. Inner vec: comma-joined clauses.
    groups: Vec<Vec<String>>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an equality clause (`field:value`) to the current alternative.
    pub fn eq(mut self, field: &str, value: impl fmt::Display) -> Self {
        self.push(format!("{field}:{value}"));
        self
    }

    /// Add an inequality clause (`field!:value`) to the current alternative.
    pub fn ne(mut self, field: &str, value: impl fmt::Display) -> Self {
        self.push(format!("{field}!:{value}"));
        self
    }

    /// Start a new `||`-joined alternative.
    pub fn or(mut self) -> Self {
        self.groups.push(Vec::new());
        self
    }

    /// One equality alternative per value: `id:1||id:2||id:3`.
    pub fn any<I, V>(field: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: fmt::Display,
    {
        let mut filter = Self::new();
        for (i, value) in values.into_iter().enumerate() {
            if i > 0 {
                filter = filter.or();
            }
            filter = filter.eq(field, value);
        }
        filter
    }

    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(Vec::is_empty)
    }

    fn push(&mut self, clause: String) {
        if self.groups.is_empty() {
            self.groups.push(Vec::new());
        }
        if let Some(last) = self.groups.last_mut() {
            last.push(clause);
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self
            .groups
            .iter()
            .filter(|g| !g.is_empty())
            .map(|g| g.join(","))
            .collect();
        write!(f, "{}", rendered.join("||"))
    }
}

/// Query parameters for one request: filter, field projection, result
/// size, and (PATCH only) the applied-fields directive.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub filter: Option<Filter>,
    pub fields: Option<String>,
    pub size: Option<i64>,
    pub patch_fields: Option<Vec<String>>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Comma-separated attribute projection, e.g. `"id,displayName"`.
    pub fn fields(mut self, fields: impl Into<String>) -> Self {
        self.fields = Some(fields.into());
        self
    }

    pub fn size(mut self, size: i64) -> Self {
        self.size = Some(size);
        self
    }

    /// Restrict which top-level body keys a PATCH applies.
    pub fn patch_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.patch_fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Render to query pairs in a stable order.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(ref filter) = self.filter {
            if !filter.is_empty() {
                pairs.push(("filter", filter.to_string()));
            }
        }
        if let Some(ref fields) = self.fields {
            pairs.push(("fields", fields.clone()));
        }
        if let Some(size) = self.size {
            pairs.push(("size", size.to_string()));
        }
        if let Some(ref patch_fields) = self.patch_fields {
            pairs.push(("patchFields", patch_fields.join(",")));
        }
        pairs
    }
}
