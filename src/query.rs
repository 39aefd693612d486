use serde::Deserialize;

/// SQL query builder for constructing parameterized list queries
/// Builds a single SQL query with filters, sorting, and pagination.
/// Every resource list endpoint goes through this builder so pagination,
/// filtering and sorting behave the same across the API.
pub struct SqlQueryBuilder {
    base_query: String,
    where_clauses: Vec<String>,
    params: Vec<String>,
    order_clause: Option<String>,
    limit: u32,
    offset: u64,
}

impl SqlQueryBuilder {
    /// Creates a new builder for the given table with default pagination
    pub fn new(table: &str) -> Self {
        Self {
            base_query: format!("SELECT * FROM {}", table),
            where_clauses: Vec::new(),
            params: Vec::new(),
            order_clause: None,
            limit: 10,
            offset: 0,
        }
    }

    /// Adds a search filter for partial matching on a column (case-insensitive)
    /// Uses ILIKE for PostgreSQL case-insensitive pattern matching
    pub fn add_search_filter(&mut self, column: &str, search: &str) {
        let param_index = self.params.len() + 1;
        self.where_clauses
            .push(format!("{} ILIKE ${}", column, param_index));
        self.params.push(format!("%{}%", search));
    }

    /// Adds an exact-match filter on a text column (case-insensitive)
    pub fn add_text_filter(&mut self, column: &str, value: &str) {
        let param_index = self.params.len() + 1;
        self.where_clauses
            .push(format!("{} ILIKE ${}", column, param_index));
        self.params.push(value.to_string());
    }

    /// Adds a boolean equality filter
    /// The value is rendered inline; it never comes from raw request text.
    pub fn add_bool_filter(&mut self, column: &str, value: bool) {
        self.where_clauses
            .push(format!("{} = {}", column, if value { "TRUE" } else { "FALSE" }));
    }

    /// Adds numeric range filters (min and/or max), both bounds inclusive
    /// Bounds are bound as positional parameters; the cast resolves the
    /// text-encoded parameter against the numeric column.
    pub fn add_numeric_range(&mut self, column: &str, min: Option<f64>, max: Option<f64>) {
        if let Some(min_value) = min {
            let param_index = self.params.len() + 1;
            self.where_clauses
                .push(format!("{} >= ${}::numeric", column, param_index));
            self.params.push(min_value.to_string());
        }
        if let Some(max_value) = max {
            let param_index = self.params.len() + 1;
            self.where_clauses
                .push(format!("{} <= ${}::numeric", column, param_index));
            self.params.push(max_value.to_string());
        }
    }

    /// Adds a raw WHERE clause with no parameters
    /// Used for fixed predicates like active time windows.
    pub fn add_raw_clause(&mut self, clause: &str) {
        self.where_clauses.push(clause.to_string());
    }

    /// Sets the sort order for the query
    /// The column must come from a resource-side whitelist, never from
    /// raw request text.
    pub fn set_sort(&mut self, column: &'static str, order: SortOrder) {
        let order_str = match order {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        };
        self.order_clause = Some(format!("{} {}", column, order_str));
    }

    /// Sets pagination parameters
    /// Calculates LIMIT and OFFSET from a 1-indexed page number. The offset
    /// is computed in u64 so no page/limit combination can overflow.
    pub fn set_pagination(&mut self, page: u32, limit: u32) {
        self.limit = limit;
        self.offset = (u64::from(page) - 1) * u64::from(limit);
    }

    /// Builds the final SQL query string with all parameters
    /// Returns a tuple of (query_string, parameters)
    pub fn build(&self) -> (String, Vec<String>) {
        let mut query = self.base_query.clone();

        if !self.where_clauses.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&self.where_clauses.join(" AND "));
        }

        if let Some(ref order) = self.order_clause {
            query.push_str(" ORDER BY ");
            query.push_str(order);
        }

        // LIMIT and OFFSET are integers computed server-side, rendered inline
        query.push_str(&format!(" LIMIT {}", self.limit));
        query.push_str(&format!(" OFFSET {}", self.offset));

        (query, self.params.clone())
    }
}

/// Pagination parameters shared by every list endpoint
/// 1-indexed page, items per page
#[derive(Debug, Deserialize)]
pub struct PageParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// Sort order options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Validation error for query parameters
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct QueryError {
    pub message: String,
}

impl QueryError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Query parameter validator with shared normalization rules
pub struct QueryValidator;

impl QueryValidator {
    /// Normalizes string parameters by trimming whitespace
    /// Returns None if the string is empty or whitespace-only
    pub fn normalize_string(s: Option<String>) -> Option<String> {
        s.and_then(|s| {
            let trimmed = s.trim().to_string();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed)
            }
        })
    }

    /// Validates that a price bound is positive and finite
    pub fn validate_price(price: f64, param_name: &str) -> Result<(), QueryError> {
        if price <= 0.0 {
            return Err(QueryError::new(format!(
                "{} must be a positive number",
                param_name
            )));
        }
        if price.is_nan() || price.is_infinite() {
            return Err(QueryError::new(format!(
                "{} must be a valid number",
                param_name
            )));
        }
        Ok(())
    }

    /// Validates an optional min/max pair, requiring min <= max when both set
    pub fn validate_range(
        min: Option<f64>,
        max: Option<f64>,
        min_name: &str,
        max_name: &str,
    ) -> Result<(), QueryError> {
        if let Some(value) = min {
            Self::validate_price(value, min_name)?;
        }
        if let Some(value) = max {
            Self::validate_price(value, max_name)?;
        }
        if let (Some(lo), Some(hi)) = (min, max) {
            if lo > hi {
                return Err(QueryError::new(format!(
                    "{} cannot be greater than {}",
                    min_name, max_name
                )));
            }
        }
        Ok(())
    }

    /// Parses sort order string, defaulting when absent
    pub fn parse_sort_order(s: Option<String>, default: SortOrder) -> Result<SortOrder, QueryError> {
        match s {
            None => Ok(default),
            Some(s) => match s.to_lowercase().as_str() {
                "asc" => Ok(SortOrder::Asc),
                "desc" => Ok(SortOrder::Desc),
                _ => Err(QueryError::new(format!(
                    "Invalid sort order '{}'. Must be 'asc' or 'desc'",
                    s
                ))),
            },
        }
    }

    /// Validates and defaults pagination parameters
    /// Returns (page, limit) with page defaulting to 1 and limit to 10
    pub fn validate_pagination(params: &PageParams) -> Result<(u32, u32), QueryError> {
        let page = params.page.unwrap_or(1);
        let limit = params.limit.unwrap_or(10);

        if page == 0 {
            return Err(QueryError::new("page must be a positive number (greater than 0)"));
        }
        if limit == 0 {
            return Err(QueryError::new("limit must be a positive number (greater than 0)"));
        }
        if limit > 100 {
            return Err(QueryError::new("limit cannot exceed 100"));
        }

        Ok((page, limit))
    }
}
