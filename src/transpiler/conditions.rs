//! Predicate tree rendering.

use crate::ast::Predicate;
use crate::transpiler::clauses::qualified;

impl Predicate {
    /// Render the leaf comparison: `[upper(][lower(][table.]column[)][)]<op>?`.
    fn leaf_sql(&self) -> String {
        let mut column = qualified(self.table.as_deref(), &self.column);
        if self.lower {
            column = format!("lower({})", column);
        }
        if self.upper {
            column = format!("upper({})", column);
        }
        format!("{}{}?", column, self.op.symbol())
    }

    /// Render the boolean expression without the `WHERE` keyword.
    ///
    /// `and` nodes are grouped with the leaf first; `or` nodes are then
    /// grouped with that result, so OR always wraps the AND group.
    pub fn to_condition_sql(&self) -> String {
        let mut sql = self.leaf_sql();

        if !self.and.is_empty() {
            let parts: Vec<String> = std::iter::once(sql)
                .chain(self.and.iter().map(Predicate::to_condition_sql))
                .collect();
            sql = format!("({})", parts.join(" AND "));
        }

        if !self.or.is_empty() {
            let parts: Vec<String> = std::iter::once(sql)
                .chain(self.or.iter().map(Predicate::to_condition_sql))
                .collect();
            sql = format!("({})", parts.join(" OR "));
        }

        sql
    }
}

/// `WHERE <expr>` for a predicate tree.
pub fn where_clause(predicate: &Predicate) -> String {
    format!("WHERE {}", predicate.to_condition_sql())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Operator;
    use crate::ast::builders::*;

    #[test]
    fn test_bare_leaf() {
        assert_eq!(where_clause(&Predicate::new("id")), "WHERE id=?");
        assert_eq!(where_clause(&gte("age")), "WHERE age>=?");
    }

    #[test]
    fn test_qualified_leaf() {
        let p = Predicate::new("id").table("test");
        assert_eq!(where_clause(&p), "WHERE test.id=?");
    }

    #[test]
    fn test_case_folding() {
        assert_eq!(where_clause(&eq_ignore_case("name")), "WHERE lower(name)=?");
        assert_eq!(
            where_clause(&Predicate::new("name").table("u").uppercase()),
            "WHERE upper(u.name)=?"
        );
        assert_eq!(
            where_clause(&Predicate::new("name").lowercase().uppercase().op(Operator::Ne)),
            "WHERE upper(lower(name))!=?"
        );
    }

    #[test]
    fn test_and_group() {
        let p = eq("a").and(eq("b")).and(lt("c"));
        assert_eq!(where_clause(&p), "WHERE (a=? AND b=? AND c<?)");
    }

    #[test]
    fn test_or_wraps_and_group() {
        let p = eq("a").and(eq("b")).or(eq("c"));
        assert_eq!(where_clause(&p), "WHERE ((a=? AND b=?) OR c=?)");
    }

    #[test]
    fn test_nested_or_and() {
        let p = eq("x").or(eq("y").and(eq("z")));
        assert_eq!(where_clause(&p), "WHERE (x=? OR (y=? AND z=?))");
    }

    #[test]
    fn test_empty_groups_are_absent() {
        let p = eq("x").and_all(Vec::new()).or_all(Vec::new());
        assert_eq!(where_clause(&p), "WHERE x=?");
    }
}
