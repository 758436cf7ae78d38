use std::fmt;

use serde::{Deserialize, Serialize};

use crate::parser::{
    ast::{contains_aggregate_call, ClauseExtractor, Condition, FieldListParser, GroupBy, JoinSpec, LimitParser, ListContext, OrderSpec, SelectCore, WhereParser},
    parse_select, ClauseText, ParseError,
};

/// A parsed `SELECT`. Fields are raw expressions; nothing is resolved against
/// a schema here.
///
/// `has_aggregate_without_group_by` is derived from `fields` and
/// `group_by_fields` and cannot be set on its own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "SelectQueryParts")]
pub struct SelectQuery {
    pub fields: Vec<String>,
    pub table: String,
    pub join: Option<JoinSpec>,
    pub where_clauses: Vec<Condition>,
    pub group_by_fields: Option<Vec<String>>,
    has_aggregate_without_group_by: bool,
    pub order_by: Option<Vec<OrderSpec>>,
    pub limit: Option<u64>,
    pub distinct: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SelectQueryParts {
    fields: Vec<String>,
    table: String,
    #[serde(default)]
    join: Option<JoinSpec>,
    #[serde(default)]
    where_clauses: Vec<Condition>,
    #[serde(default)]
    group_by_fields: Option<Vec<String>>,
    #[serde(default)]
    order_by: Option<Vec<OrderSpec>>,
    #[serde(default)]
    limit: Option<u64>,
    #[serde(default)]
    distinct: bool,
}

impl From<SelectQueryParts> for SelectQuery {
    fn from(parts: SelectQueryParts) -> Self {
        let has_aggregate_without_group_by = Self::aggregate_without_group_by(&parts.fields, &parts.group_by_fields);
        Self {
            fields: parts.fields,
            table: parts.table,
            join: parts.join,
            where_clauses: parts.where_clauses,
            group_by_fields: parts.group_by_fields,
            has_aggregate_without_group_by,
            order_by: parts.order_by,
            limit: parts.limit,
            distinct: parts.distinct,
        }
    }
}

impl SelectQuery {
    /// Parses a statement that has already been trimmed and length-checked.
    pub fn parse(statement: &ClauseText) -> Result<Self, ParseError> {
        let mut parser = statement.parser();
        let clauses = ClauseExtractor::extract(&mut parser)?;

        let core = SelectCore::parse(&clauses.core)?;
        let fields = FieldListParser::parse(&core.fields, ListContext::Projection)?;

        let join = clauses.join
            .as_ref()
            .map(|join| JoinSpec::parse(join.kind, &join.body))
            .transpose()?;

        let where_clauses = match &clauses.r#where {
            Some(body) => WhereParser::parse(body)?,
            None => vec![],
        };

        let group_by_fields = clauses.group_by.as_ref().map(GroupBy::parse).transpose()?;
        let order_by = clauses.order_by.as_ref().map(OrderSpec::parse).transpose()?;
        let limit = clauses.limit.as_ref().map(LimitParser::parse).transpose()?;

        Ok(SelectQueryParts {
            fields,
            table: core.table,
            join,
            where_clauses,
            group_by_fields,
            order_by,
            limit,
            distinct: core.distinct,
        }.into())
    }

    pub fn has_aggregate_without_group_by(&self) -> bool {
        self.has_aggregate_without_group_by
    }

    fn aggregate_without_group_by(fields: &[String], group_by_fields: &Option<Vec<String>>) -> bool {
        group_by_fields.is_none() && contains_aggregate_call(fields)
    }
}

impl TryFrom<&str> for SelectQuery {
    type Error = ParseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        parse_select(value)
    }
}

impl fmt::Display for SelectQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SELECT ")?;
        if self.distinct {
            write!(f, "DISTINCT ")?;
        }
        write!(f, "{} FROM {}", self.fields.join(", "), self.table)?;

        if let Some(join) = &self.join {
            write!(f, " {}", join)?;
        }

        if !self.where_clauses.is_empty() {
            let conditions = self.where_clauses.iter().map(|c| c.to_string()).collect::<Vec<_>>().join(" AND ");
            write!(f, " WHERE {}", conditions)?;
        }

        if let Some(group_by) = &self.group_by_fields {
            write!(f, " GROUP BY {}", group_by.join(", "))?;
        }

        if let Some(order_by) = &self.order_by {
            let order = order_by.iter().map(|o| o.to_string()).collect::<Vec<_>>().join(", ");
            write!(f, " ORDER BY {}", order)?;
        }

        if let Some(limit) = self.limit {
            write!(f, " LIMIT {}", limit)?;
        }

        Ok(())
    }
}
