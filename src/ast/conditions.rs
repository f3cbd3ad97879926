use serde::{Deserialize, Deserializer, Serialize};

use crate::ast::Operator;

/// Column targeted by DELETE, UPDATE and EXISTS when no filter is given.
pub const DEFAULT_FILTER_COLUMN: &str = "id";

/// A node of a WHERE predicate tree.
///
/// Every node is a comparison `column <op> ?`. Nodes in `and` are conjoined
/// with this leaf first; nodes in `or` are then disjoined with that group:
///
/// ```text
/// x { and: [y], or: [z] }  =>  ((x=? AND y=?) OR z=?)
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Predicate {
    #[serde(alias = "column_name")]
    pub column: String,
    #[serde(default, alias = "table_name", skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
    #[serde(default, alias = "operation")]
    pub op: Operator,
    /// Wrap the column in `lower(...)`.
    #[serde(default)]
    pub lower: bool,
    /// Wrap the (possibly lowered) column in `upper(...)`.
    #[serde(default)]
    pub upper: bool,
    #[serde(
        default,
        deserialize_with = "one_or_many",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub and: Vec<Predicate>,
    #[serde(
        default,
        deserialize_with = "one_or_many",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub or: Vec<Predicate>,
}

impl Predicate {
    /// Equality comparison on `column`.
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            table: None,
            op: Operator::Eq,
            lower: false,
            upper: false,
            and: Vec::new(),
            or: Vec::new(),
        }
    }

    /// The `id=?` predicate used when a statement gets no explicit filter.
    pub fn default_filter() -> Self {
        Self::new(DEFAULT_FILTER_COLUMN)
    }

    /// Qualify the column with a table name.
    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    pub fn op(mut self, op: Operator) -> Self {
        self.op = op;
        self
    }

    /// Compare on `lower(column)`.
    pub fn lowercase(mut self) -> Self {
        self.lower = true;
        self
    }

    /// Compare on `upper(column)`.
    pub fn uppercase(mut self) -> Self {
        self.upper = true;
        self
    }

    pub fn and(mut self, other: Predicate) -> Self {
        self.and.push(other);
        self
    }

    pub fn and_all(mut self, others: impl IntoIterator<Item = Predicate>) -> Self {
        self.and.extend(others);
        self
    }

    pub fn or(mut self, other: Predicate) -> Self {
        self.or.push(other);
        self
    }

    pub fn or_all(mut self, others: impl IntoIterator<Item = Predicate>) -> Self {
        self.or.extend(others);
        self
    }

    /// Number of `?` placeholders the rendered tree contains.
    pub fn placeholder_count(&self) -> usize {
        1 + self
            .and
            .iter()
            .chain(&self.or)
            .map(Predicate::placeholder_count)
            .sum::<usize>()
    }

    /// Column names in the order their placeholders are emitted.
    ///
    /// Parameters must be bound in exactly this order.
    pub fn placeholder_columns(&self) -> Vec<&str> {
        let mut out = Vec::with_capacity(self.placeholder_count());
        self.collect_columns(&mut out);
        out
    }

    fn collect_columns<'a>(&'a self, out: &mut Vec<&'a str>) {
        out.push(&self.column);
        for node in self.and.iter().chain(&self.or) {
            node.collect_columns(out);
        }
    }
}

impl Default for Predicate {
    fn default() -> Self {
        Self::default_filter()
    }
}

impl From<&str> for Predicate {
    fn from(column: &str) -> Self {
        Predicate::new(column)
    }
}

/// Accept either a single nested node or a list of nodes.
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<Predicate>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(Box<Predicate>),
        Many(Vec<Predicate>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(node) => vec![*node],
        OneOrMany::Many(nodes) => nodes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_order() {
        let p = Predicate::new("a")
            .and(Predicate::new("b").or(Predicate::new("c")))
            .or(Predicate::new("d"));
        assert_eq!(p.placeholder_columns(), vec!["a", "b", "c", "d"]);
        assert_eq!(p.placeholder_count(), 4);
    }

    #[test]
    fn test_deserialize_one_or_many() {
        let single: Predicate =
            serde_json::from_str(r#"{"column":"x","or":{"column":"y"}}"#).unwrap();
        assert_eq!(single.or, vec![Predicate::new("y")]);

        let many: Predicate = serde_json::from_str(
            r#"{"column_name":"x","and":[{"column":"y"},{"column":"z","operation":">="}]}"#,
        )
        .unwrap();
        assert_eq!(many.and.len(), 2);
        assert_eq!(many.and[1].op, Operator::Gte);
    }

    #[test]
    fn test_default_filter_targets_id() {
        assert_eq!(Predicate::default().column, "id");
    }
}
