//! Tool catalog - the closed set of endpoint tools this adapter exposes
//!
//! Each tool is pure configuration: a name (the dispatch discriminator), a
//! description for the outer protocol layer, a path template, and the shapes
//! of its parameters. The dispatch service validates argument bags against
//! these records and the generic endpoint handler turns them into requests,
//! so adding an endpoint is a data-only change here.
//!
//! The remote API spans roughly a hundred endpoints; this catalog carries one
//! representative tool per endpoint family.

use serde::Serialize;

/// Where a parameter travels in the outbound request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamLocation {
    /// Substituted into the path template.
    Path,
    /// Appended to the query string.
    Query,
}

/// Wire type of a parameter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamType {
    /// JSON string.
    Text,
    /// JSON number (integer or float).
    Number,
    /// JSON boolean. Serialized per the flag convention: `true` is emitted,
    /// `false` is dropped.
    Flag,
    /// JSON array of strings, serialized as repeated `name=element` pairs.
    TextList,
}

impl ParamType {
    /// Human-readable name used in validation complaints.
    pub fn expected(&self) -> &'static str {
        match self {
            Self::Text => "a string",
            Self::Number => "a number",
            Self::Flag => "a boolean",
            Self::TextList => "an array of strings",
        }
    }
}

/// Shape of a single tool parameter.
#[derive(Debug, Clone, Serialize)]
pub struct ParamSpec {
    pub name: String,
    pub location: ParamLocation,
    pub ty: ParamType,
    pub required: bool,
    /// Closed value set for `Text` parameters, when the endpoint restricts
    /// one (e.g. reporting periods).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed: Option<Vec<String>>,
}

impl ParamSpec {
    /// Required text parameter substituted into the path template.
    pub fn path(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: ParamLocation::Path,
            ty: ParamType::Text,
            required: true,
            allowed: None,
        }
    }

    /// Optional query parameter.
    pub fn query(name: impl Into<String>, ty: ParamType) -> Self {
        Self { name: name.into(), location: ParamLocation::Query, ty, required: false, allowed: None }
    }

    /// Required query parameter.
    pub fn required_query(name: impl Into<String>, ty: ParamType) -> Self {
        Self { name: name.into(), location: ParamLocation::Query, ty, required: true, allowed: None }
    }

    /// Restrict a text parameter to a closed value set.
    pub fn with_allowed(mut self, values: &[&str]) -> Self {
        self.allowed = Some(values.iter().map(|v| (*v).to_string()).collect());
        self
    }
}

/// One schema-described tool mapping to exactly one remote endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ToolSpec {
    /// Dispatch discriminator; unique across the catalog.
    pub name: String,
    /// Description advertised to the outer protocol layer.
    pub description: String,
    /// Endpoint path with `{param}` placeholders for path parameters.
    pub path_template: String,
    pub params: Vec<ParamSpec>,
}

impl ToolSpec {
    /// Create a tool spec.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        path_template: impl Into<String>,
        params: Vec<ParamSpec>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            path_template: path_template.into(),
            params,
        }
    }

    /// Parameters substituted into the path template.
    pub fn path_params(&self) -> impl Iterator<Item = &ParamSpec> {
        self.params.iter().filter(|p| p.location == ParamLocation::Path)
    }

    /// Parameters appended to the query string.
    pub fn query_params(&self) -> impl Iterator<Item = &ParamSpec> {
        self.params.iter().filter(|p| p.location == ParamLocation::Query)
    }

    /// Look up a parameter shape by name.
    pub fn param(&self, name: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|p| p.name == name)
    }
}

/// The built-in tool catalog, one representative tool per endpoint family.
pub fn builtin_catalog() -> Vec<ToolSpec> {
    vec![
        ToolSpec::new(
            "get_quote",
            "Real-time price quote for a stock symbol",
            "/quote/{symbol}",
            vec![ParamSpec::path("symbol")],
        ),
        ToolSpec::new(
            "get_company_profile",
            "Company profile and key metadata for a stock symbol",
            "/company/{symbol}",
            vec![ParamSpec::path("symbol")],
        ),
        ToolSpec::new(
            "search_symbols",
            "Search listed symbols by free-text query",
            "/search",
            vec![
                ParamSpec::required_query("query", ParamType::Text),
                ParamSpec::query("limit", ParamType::Number),
                ParamSpec::query("exchange", ParamType::Text),
            ],
        ),
        ToolSpec::new(
            "get_price_history",
            "Historical prices for a symbol over an optional date range",
            "/history/{symbol}",
            vec![
                ParamSpec::path("symbol"),
                ParamSpec::query("from", ParamType::Text),
                ParamSpec::query("to", ParamType::Text),
                ParamSpec::query("interval", ParamType::Text)
                    .with_allowed(&["1d", "1wk", "1mo"]),
                ParamSpec::query("adjusted", ParamType::Flag),
            ],
        ),
        ToolSpec::new(
            "get_income_statement",
            "Income statements for a symbol",
            "/financials/income/{symbol}",
            vec![
                ParamSpec::path("symbol"),
                ParamSpec::query("period", ParamType::Text).with_allowed(&["annual", "quarter"]),
                ParamSpec::query("limit", ParamType::Number),
            ],
        ),
        ToolSpec::new(
            "get_balance_sheet",
            "Balance sheet statements for a symbol",
            "/financials/balance/{symbol}",
            vec![
                ParamSpec::path("symbol"),
                ParamSpec::query("period", ParamType::Text).with_allowed(&["annual", "quarter"]),
                ParamSpec::query("limit", ParamType::Number),
            ],
        ),
        ToolSpec::new(
            "get_cash_flow_statement",
            "Cash flow statements for a symbol",
            "/financials/cash-flow/{symbol}",
            vec![
                ParamSpec::path("symbol"),
                ParamSpec::query("period", ParamType::Text).with_allowed(&["annual", "quarter"]),
                ParamSpec::query("limit", ParamType::Number),
            ],
        ),
        ToolSpec::new(
            "get_dividend_history",
            "Dividend payment history for a symbol",
            "/dividends/{symbol}",
            vec![ParamSpec::path("symbol"), ParamSpec::query("limit", ParamType::Number)],
        ),
        ToolSpec::new(
            "get_earnings_calendar",
            "Upcoming earnings announcements within an optional date range",
            "/calendar/earnings",
            vec![
                ParamSpec::query("from", ParamType::Text),
                ParamSpec::query("to", ParamType::Text),
            ],
        ),
        ToolSpec::new(
            "get_market_gainers",
            "Top gaining stocks in the current session",
            "/market/gainers",
            vec![ParamSpec::query("limit", ParamType::Number)],
        ),
        ToolSpec::new(
            "get_market_losers",
            "Top losing stocks in the current session",
            "/market/losers",
            vec![ParamSpec::query("limit", ParamType::Number)],
        ),
        ToolSpec::new(
            "get_market_news",
            "Market news, optionally filtered to a list of symbols",
            "/news",
            vec![
                ParamSpec::query("symbols[]", ParamType::TextList),
                ParamSpec::query("limit", ParamType::Number),
            ],
        ),
        ToolSpec::new(
            "get_forex_rate",
            "Exchange rate quote for a currency pair such as EURUSD",
            "/forex/{pair}",
            vec![ParamSpec::path("pair")],
        ),
        ToolSpec::new(
            "get_crypto_quote",
            "Price quote for a cryptocurrency symbol such as BTCUSD",
            "/crypto/{symbol}",
            vec![ParamSpec::path("symbol")],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn tool_names_are_unique() {
        let catalog = builtin_catalog();
        let names: HashSet<&str> = catalog.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names.len(), catalog.len());
    }

    #[test]
    fn path_templates_reference_every_path_param() {
        for tool in builtin_catalog() {
            for param in tool.path_params() {
                let placeholder = format!("{{{}}}", param.name);
                assert!(
                    tool.path_template.contains(&placeholder),
                    "{} missing placeholder for {}",
                    tool.name,
                    param.name
                );
            }
        }
    }

    #[test]
    fn path_params_are_always_required() {
        for tool in builtin_catalog() {
            for param in tool.path_params() {
                assert!(param.required, "{}.{} must be required", tool.name, param.name);
            }
        }
    }

    #[test]
    fn list_params_keep_their_bracket_suffix() {
        let catalog = builtin_catalog();
        let news = catalog.iter().find(|t| t.name == "get_market_news").unwrap();
        assert!(news.param("symbols[]").is_some());
    }
}
