#[cfg(test)]
mod tests {
    use hull::{
        Aggregate, BinaryOpType, Entity, Expression, ExpressionExt, GenericSqlWriter, Operand,
        Order, PredicateState, QueryError, Related, SelectKind, SqlWriter, Status, Value, col,
        col_of, raw,
        writer::{Context, Fragment},
    };
    use indoc::indoc;
    use time::macros::{date, datetime, time};

    const WRITER: GenericSqlWriter = GenericSqlWriter;

    #[derive(Entity)]
    #[hull(name = "customers")]
    struct Customer {
        id: u32,
        name: String,
        balance: Option<f64>,
        status: Status,
        orders: Related<Purchase>,
    }

    #[derive(Entity)]
    #[hull(name = "orders")]
    struct Purchase {
        id: u32,
        #[hull(references = Customer)]
        customer: u32,
        total: f64,
        status: Status,
    }

    #[derive(Entity)]
    struct Warehouse {
        id: u32,
        status: Status,
    }

    fn expression(value: impl Expression) -> String {
        let mut out = String::new();
        value.write_query(&WRITER, &mut Context::default(), &mut out);
        out
    }

    fn select(kind: SelectKind, state: &PredicateState, joined: bool) -> String {
        let mut out = String::new();
        WRITER
            .write_select(
                &mut out,
                &kind,
                state,
                Customer::table(),
                joined.then(Purchase::table),
            )
            .expect("Could not write the select");
        out
    }

    #[test]
    fn values() {
        let value = |v: Value| {
            let mut out = String::new();
            WRITER.write_value(&mut Context::default(), &mut out, &v);
            out
        };
        assert_eq!(value(Value::Null), "NULL");
        assert_eq!(value(Value::Int32(None)), "NULL");
        assert_eq!(value(Value::Boolean(Some(true))), "true");
        assert_eq!(value(Value::Int8(Some(-12))), "-12");
        assert_eq!(value(Value::UInt64(Some(u64::MAX))), "18446744073709551615");
        assert_eq!(value(Value::Float64(Some(0.25))), "0.25");
        assert_eq!(
            value(Value::Float64(Some(f64::NEG_INFINITY))),
            "CAST('-Infinity' AS DOUBLE)"
        );
        assert_eq!(value("Rock 'n' roll".into()), "'Rock ''n'' roll'");
        assert_eq!(value(vec![0x01u8, 0xAB].into()), r"'\x01\xAB'");
        assert_eq!(value(date!(2024 - 02 - 29).into()), "'2024-02-29'");
        assert_eq!(value(time!(08:05:00.25).into()), "'08:05:00.25'");
        assert_eq!(
            value(datetime!(1999-12-31 23:59:59).into()),
            "'1999-12-31T23:59:59'"
        );
    }

    #[test]
    fn expressions() {
        assert_eq!(
            expression(col("a").equal(1).and(col("b").equal(2).or(col("c").equal(3)))),
            r#""a" = 1 AND ("b" = 2 OR "c" = 3)"#
        );
        assert_eq!(
            expression(col("a").equal(1).or(col("b").equal(2)).and(col("c").is_null())),
            r#"("a" = 1 OR "b" = 2) AND "c" IS NULL"#
        );
        assert_eq!(
            expression(col("x").binary(
                BinaryOpType::Subtraction,
                col("y").binary(BinaryOpType::Subtraction, col("z"))
            )),
            r#""x" - ("y" - "z")"#
        );
        assert_eq!(
            expression(col("name").like("J%").and(col("name").is_not_null()).not()),
            r#"NOT ("name" LIKE 'J%' AND "name" IS NOT NULL)"#
        );
        assert_eq!(
            expression(col_of("orders", "total").greater_equal(raw("2 * 50"))),
            r#""total" >= 2 * 50"#
        );
        assert_eq!(expression(col("total").desc()), r#""total""#);
        let mut out = String::new();
        col("total").desc().write_query(
            &WRITER,
            &mut Context::new(Fragment::SqlSelectOrderBy, true, "orders"),
            &mut out,
        );
        assert_eq!(out, r#""orders"."total" DESC"#);
    }

    #[test]
    fn select_all() {
        let mut state = PredicateState::new();
        assert_eq!(
            select(SelectKind::All, &state, false),
            indoc! {r#"
                SELECT "id", "name", "balance"
                FROM "customers";
            "#}
            .trim()
        );
        state.filters.push(Box::new(col("balance").greater(100)));
        state
            .filters
            .push(Box::new(col("name").equal("Bob").or(col("name").equal("Eve"))));
        state.orders.push(("name".into(), Order::ASC));
        state.orders.push(("balance".into(), Order::DESC));
        state
            .order_expressions
            .push(Box::new(col("id")
                .binary(BinaryOpType::Remainder, Operand::from(7))
                .asc()));
        assert_eq!(
            select(SelectKind::All, &state, false),
            indoc! {r#"
                SELECT "id", "name", "balance"
                FROM "customers"
                WHERE "balance" > 100 AND ("name" = 'Bob' OR "name" = 'Eve')
                ORDER BY "name" ASC, "balance" DESC, "id" % 7 ASC;
            "#}
            .trim()
        );
    }

    #[test]
    fn select_joined() {
        let mut state = PredicateState::new();
        state.filters.push(Box::new(col_of("orders", "total").greater(9.5)));
        state.orders.push(("name".into(), Order::DESC));
        assert_eq!(
            select(SelectKind::All, &state, true),
            indoc! {r#"
                SELECT "customers"."id", "customers"."name", "customers"."balance", "orders"."id", "orders"."customer", "orders"."total"
                FROM "customers"
                LEFT JOIN "orders" ON "orders"."customer" = "customers"."id"
                WHERE "orders"."total" > 9.5
                ORDER BY "customers"."name" DESC, "customers"."id";
            "#}
            .trim()
        );
        assert_eq!(
            select(SelectKind::Aggregate(Aggregate::Max("balance".into())), &state, true),
            indoc! {r#"
                SELECT MAX("customers"."balance")
                FROM "customers"
                LEFT JOIN "orders" ON "orders"."customer" = "customers"."id"
                WHERE "orders"."total" > 9.5;
            "#}
            .trim()
        );
        assert_eq!(
            select(SelectKind::Aggregate(Aggregate::Count), &PredicateState::new(), false),
            indoc! {r#"
                SELECT COUNT(*)
                FROM "customers";
            "#}
            .trim()
        );
    }

    #[test]
    fn delete() {
        let mut state = PredicateState::new();
        let mut out = String::new();
        WRITER
            .write_delete(&mut out, &state, Customer::table())
            .unwrap();
        assert_eq!(out, r#"DELETE FROM "customers";"#);
        state.filters.push(Box::new(col("balance").is_null()));
        state.orders.push(("name".into(), Order::ASC));
        let mut out = String::new();
        WRITER
            .write_delete(&mut out, &state, Customer::table())
            .unwrap();
        assert_eq!(
            out,
            indoc! {r#"
                DELETE FROM "customers"
                WHERE "balance" IS NULL;
            "#}
            .trim()
        );
    }

    #[test]
    fn rejected() {
        let error_of = |state: &PredicateState, join| {
            let mut out = String::new();
            let error = WRITER
                .write_select(&mut out, &SelectKind::All, state, Customer::table(), join)
                .expect_err("The select must be rejected");
            assert!(out.is_empty(), "Nothing is written on error");
            error
                .downcast_ref::<QueryError>()
                .cloned()
                .expect("Expected a query error")
        };
        let mut state = PredicateState::new();
        state.orders.push(("rank".into(), Order::ASC));
        assert_eq!(
            error_of(&state, None),
            QueryError::UnknownColumn {
                table: "customers".into(),
                column: "rank".into()
            }
        );
        let mut state = PredicateState::new();
        state.filters.push(Box::new(col_of("orders", "total").greater(1)));
        assert_eq!(
            error_of(&state, None),
            QueryError::UnknownColumn {
                table: "orders".into(),
                column: "total".into()
            }
        );
        let mut state = PredicateState::new();
        state.filters.push(Box::new(col_of("orders", "weight").greater(1)));
        assert_eq!(
            error_of(&state, Some(Purchase::table())),
            QueryError::UnknownColumn {
                table: "orders".into(),
                column: "weight".into()
            }
        );
        assert_eq!(
            error_of(&PredicateState::new(), Some(Warehouse::table())),
            QueryError::MissingJoinKey {
                parent: "customers".into(),
                child: "warehouse".into()
            }
        );
    }
}
