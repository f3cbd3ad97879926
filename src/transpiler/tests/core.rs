//! Core SQL transpiler tests (SELECT, INSERT, UPDATE, DELETE, EXISTS).

use pretty_assertions::assert_eq;

use crate::ast::builders::*;
use crate::ast::*;
use crate::transpiler::*;

fn cols(names: &[&str]) -> Vec<SelectColumn> {
    names.iter().map(|n| SelectColumn::from(*n)).collect()
}

#[test]
fn test_simple_select() {
    assert_eq!(select("t", &cols(&["a", "b", "c"]), None), "SELECT a,b,c FROM t;");
}

#[test]
fn test_select_with_where() {
    let opts = SelectOptions::new().filter(Predicate::new("id"));
    assert_eq!(
        select("test", &cols(&["a", "b", "c"]), Some(&opts)),
        "SELECT a,b,c FROM test WHERE id=?;"
    );
}

#[test]
fn test_select_with_join_and_qualified_where() {
    let opts = SelectOptions::new()
        .join(InnerJoin::new("id", "other_test", "other_id"))
        .filter(Predicate::new("id").table("test"));
    assert_eq!(
        select("test", &cols(&["a", "b", "c"]), Some(&opts)),
        "SELECT a,b,c FROM test INNER JOIN other_test ON other_test.other_id=id WHERE test.id=?;"
    );
}

#[test]
fn test_select_with_limit_offset() {
    let opts = SelectOptions::new()
        .join(InnerJoin::new("id", "other_test", "other_id"))
        .filter(Predicate::new("id").table("test"))
        .limit(10)
        .offset(2);
    assert_eq!(
        select("test", &cols(&["a", "b", "c"]), Some(&opts)),
        "SELECT a,b,c FROM test INNER JOIN other_test ON other_test.other_id=id \
         WHERE test.id=? LIMIT 10 OFFSET 2;"
    );
}

#[test]
fn test_select_full_clause_order() {
    let opts = SelectOptions::new()
        .distinct()
        .order_by(OrderBy::desc("count").table("c"))
        .order_by(OrderBy::asc("name"))
        .limit(5)
        .filter(gt("count").and(eq_ignore_case("name")))
        .join(InnerJoin::new("user_id", "users", "id"));
    let columns: Vec<SelectColumn> = vec![
        ColumnRef::new("name").table("users").alias("user").into(),
        SelectColumn::from("c.count"),
    ];
    assert_eq!(
        select("c", &columns, Some(&opts)),
        "SELECT DISTINCT users.name AS user,c.count FROM c \
         INNER JOIN users ON users.id=user_id \
         WHERE (count>? AND lower(name)=?) \
         ORDER BY c.count DESC,name ASC LIMIT 5;"
    );
}

#[test]
fn test_select_limit_zero_is_rendered() {
    let opts = SelectOptions::new().limit(0).offset(0);
    assert_eq!(
        select("t", &cols(&["a"]), Some(&opts)),
        "SELECT a FROM t LIMIT 0 OFFSET 0;"
    );
}

#[test]
fn test_select_offset_without_limit_is_dropped() {
    let opts = SelectOptions::new().offset(20);
    assert_eq!(select("t", &cols(&["a"]), Some(&opts)), "SELECT a FROM t;");
}

#[test]
fn test_select_empty_options_add_nothing() {
    let opts = SelectOptions::default();
    assert_eq!(select("t", &cols(&["a"]), Some(&opts)), "SELECT a FROM t;");
}

#[test]
fn test_select_window_column() {
    let rank = format!(
        "{} AS rank",
        row_number_over(&[OrderBy::desc("element_count"), OrderBy::asc("user_name")])
    );
    assert_eq!(
        select("element_counter", &cols(&["user_name", rank.as_str()]), None),
        "SELECT user_name,ROW_NUMBER () OVER (ORDER BY element_count DESC,user_name ASC) AS rank \
         FROM element_counter;"
    );
}

#[test]
fn test_select_or_wraps_and() {
    let filter = Predicate::new("x").or(Predicate::new("y").and(Predicate::new("z")));
    let opts = SelectOptions::new().filter(filter);
    assert_eq!(
        select("t", &cols(&["a"]), Some(&opts)),
        "SELECT a FROM t WHERE (x=? OR (y=? AND z=?));"
    );
}

#[test]
fn test_insert() {
    assert_eq!(
        insert("test", &["column1", "column2"]),
        "INSERT INTO test(column1,column2) VALUES(?,?);"
    );
    assert_eq!(insert("t", &["a", "b"]), "INSERT INTO t(a,b) VALUES(?,?);");
}

#[test]
fn test_remove() {
    assert_eq!(remove("t", None), "DELETE FROM t WHERE id=?;");
    assert_eq!(
        remove("test", Some(&Predicate::new("columnWhere"))),
        "DELETE FROM test WHERE columnWhere=?;"
    );
}

#[test]
fn test_exists() {
    assert_eq!(
        exists("test", None),
        "SELECT EXISTS(SELECT 1 FROM test WHERE id=?) AS exists_value;"
    );
    assert_eq!(
        exists("test", Some(&Predicate::new("column"))),
        "SELECT EXISTS(SELECT 1 FROM test WHERE column=?) AS exists_value;"
    );
}

#[test]
fn test_update() {
    let columns: Vec<UpdateColumn> = vec!["a".into(), "b".into(), "c".into()];
    assert_eq!(
        update("test", &columns, None),
        "UPDATE test SET a=?,b=?,c=? WHERE id=?;"
    );
    assert_eq!(
        update("test", &columns, Some(&Predicate::new("whereColumn"))),
        "UPDATE test SET a=?,b=?,c=? WHERE whereColumn=?;"
    );
}

#[test]
fn test_update_operators() {
    let columns = vec![
        UpdateColumn::increment("count"),
        UpdateColumn::decrement("stock"),
        UpdateColumn::Op {
            column: "name".into(),
            op: None,
        },
    ];
    assert_eq!(
        update("items", &columns, Some(&Predicate::new("sku").lowercase())),
        "UPDATE items SET count=count+?,stock=stock-?,name=? WHERE lower(sku)=?;"
    );
}

#[test]
fn test_statement_dispatch() {
    let stmt = Statement::Delete {
        table: "sessions".into(),
        filter: Some(lt("expires_at")),
    };
    assert_eq!(stmt.to_sql(), "DELETE FROM sessions WHERE expires_at<?;");

    let stmt = Statement::Insert {
        table: "t".into(),
        columns: vec!["a".into()],
    };
    assert_eq!(stmt.to_sql(), "INSERT INTO t(a) VALUES(?);");
}

#[test]
fn test_predicate_to_sql() {
    assert_eq!(ne("state").to_sql(), "WHERE state!=?");
}
