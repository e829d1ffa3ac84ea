#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use std::time::Duration;
    use time::macros::date;
    use uuid::Uuid;
    use vessel::{
        DeleteQuery, Entity, Field, FieldKind, Order, SchemaPath, SchemaStage, SelectQuery, Sort,
        StructuredItem, TranslationError, Value, ttl_seconds, write_document,
    };

    fn order() -> Entity {
        Entity::new("orders")
            .with_key("id")
            .with(Field::new("id", Uuid::from_u128(1)))
            .with(Field::new("total", Decimal::new(1999, 2)))
            .with(Field::new("placed", date!(2025 - 03 - 01)))
            .with(Field::structured(
                "shipping",
                "address",
                [Field::new("street", "Elm"), Field::new("number", 4)],
            ))
    }

    #[test]
    fn fields() {
        let mut entity = order();
        assert_eq!(entity.name(), "orders");
        assert_eq!(entity.key(), Some("id"));
        assert_eq!(entity.len(), 4);
        entity.add(Field::new("total", Decimal::new(2500, 2)));
        assert_eq!(entity.len(), 4);
        assert_eq!(
            entity.find("total").and_then(Field::value),
            Some(&Value::Decimal(Some(Decimal::new(2500, 2))))
        );
        assert!(entity.find("shipping").is_some_and(Field::is_structured));
        assert!(entity.find("missing").is_none());
        assert!(Entity::new("empty").is_empty());
    }

    #[test]
    fn without_copies() {
        let entity = order();
        let stripped = entity.without("id");
        assert_eq!(entity.len(), 4);
        assert_eq!(stripped.len(), 3);
        assert_eq!(stripped.key(), Some("id"));
        assert!(stripped.find("id").is_none());
        assert_eq!(stripped.without("nothing"), stripped);
    }

    #[test]
    fn structured_collections() {
        let field = Field::structured_collection(
            "stops",
            "address",
            [vec![Field::new("street", "A")], vec![Field::new("street", "B")]],
        );
        let FieldKind::Structured(structured) = &field.kind else {
            panic!("Expected a structured field");
        };
        assert_eq!(structured.user_type, "address");
        assert!(
            structured
                .items
                .iter()
                .all(|v| matches!(v, StructuredItem::Nested(..)))
        );
        assert_eq!(field.value(), None);
    }

    #[test]
    fn documents() {
        let document = write_document(order().fields());
        assert_eq!(
            document["id"].as_str(),
            Some("00000000-0000-0000-0000-000000000001")
        );
        assert_eq!(document["total"].as_str(), Some("19.99"));
        assert_eq!(document["placed"].as_str(), Some("2025-03-01"));
        assert_eq!(document["shipping"]["street"].as_str(), Some("Elm"));
        assert_eq!(document["shipping"]["number"].as_i64(), Some(4));
    }

    #[test]
    fn queries() {
        let query = SelectQuery::new("orders")
            .fields(["id", "total"])
            .sort(Sort::desc("placed"))
            .sort(Sort::asc("id"))
            .limit(3);
        assert_eq!(query.fields, ["id", "total"]);
        assert_eq!(query.sorts[0].order, Order::DESC);
        assert_eq!(query.sorts[1], Sort::new("id", Order::ASC));
        assert_eq!(query.skip, 0);
        assert_eq!(query.limit, 3);
        assert_eq!(query.condition, None);
        assert_eq!(DeleteQuery::new("orders").condition, None);
    }

    #[test]
    fn ttl_truncates() {
        assert_eq!(ttl_seconds(&Duration::from_millis(1500)), 1);
        assert_eq!(ttl_seconds(&Duration::from_millis(999)), 0);
        assert_eq!(ttl_seconds(&Duration::from_secs(3600)), 3600);
    }

    #[test]
    fn error_messages() {
        let error = TranslationError::SchemaNotFound {
            stage: SchemaStage::UserType,
            path: SchemaPath {
                keyspace: "shop".into(),
                table: Some("orders".into()),
                column: Some("shipping".into()),
                user_type: Some("address".into()),
            },
        };
        assert_eq!(
            error.to_string(),
            "Missing user type definition while resolving keyspace `shop` > table `orders` > column `shipping` > type `address`"
        );
        let error = TranslationError::MissingKey {
            collection: "orders".into(),
            key: "id".into(),
        };
        assert_eq!(
            error.to_string(),
            "The entity `orders` has no `id` field, it is required to match the record"
        );
    }
}
