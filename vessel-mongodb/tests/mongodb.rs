#[cfg(test)]
mod tests {
    use serde_json::json;
    use std::time::Duration;
    use vessel_core::{
        Address, Backend, Condition, DeleteQuery, Entity, Error, Field, Operator, SelectQuery,
        Sort, TranslationError,
    };
    use vessel_mongodb::{MongoBackend, MongoConfig};
    use vessel_tests::{address, execute_tests, init_logs, user, user_with_addresses};

    fn translation_error(error: &Error) -> &TranslationError {
        error
            .downcast_ref::<TranslationError>()
            .expect("Expected a translation error")
    }

    #[test]
    fn contract() {
        init_logs();
        execute_tests(&MongoBackend::new("shop"));
    }

    #[test]
    fn conditions() {
        init_logs();
        let backend = MongoBackend::new("shop");
        let filter = backend
            .translate_condition(Some(
                &(Condition::eq("name", "Alice")
                    & Condition::gt("age", 18)
                    & Condition::lte("score", 9.5)
                    & Condition::is_in("city", vec!["Rome", "Oslo"])),
            ))
            .expect("Condition must translate");
        assert_eq!(
            filter,
            json!({
                "$and": [
                    { "name": { "$eq": "Alice" } },
                    { "age": { "$gt": 18 } },
                    { "score": { "$lte": 9.5 } },
                    { "city": { "$in": ["Rome", "Oslo"] } },
                ]
            })
        );
        let filter = backend
            .translate_condition(Some(
                &(Condition::between("age", 18, 65) | !Condition::like("email", "%@example.com")),
            ))
            .expect("Condition must translate");
        assert_eq!(
            filter,
            json!({
                "$or": [
                    { "age": { "$gte": 18, "$lte": 65 } },
                    { "$nor": [{ "email": { "$regex": "^.*@example\\.com$" } }] },
                ]
            })
        );
        assert_eq!(
            backend.translate_condition(None).expect("Must translate"),
            json!({})
        );
    }

    #[test]
    fn invalid_conditions() {
        init_logs();
        let backend = MongoBackend::new("shop");
        for condition in [
            Condition::eq("$where", "1"),
            Condition::compare("name", Operator::Like, 1),
            Condition::is_in("name", "Alice"),
            Condition::or([]),
        ] {
            let error = backend
                .translate_condition(Some(&condition))
                .expect_err("Must be rejected");
            assert!(matches!(
                translation_error(&error),
                TranslationError::InvalidCondition { .. }
            ));
        }
    }

    #[test]
    fn insert() {
        init_logs();
        let backend = MongoBackend::new("shop");
        let insert = backend
            .build_insert_payload(&user(), None)
            .expect("Insert must translate");
        assert_eq!(
            insert.to_command(),
            json!({
                "insert": "users",
                "documents": [{
                    "id": "7e57ab1e-0000-4000-8000-000000000001",
                    "name": "Alice",
                    "age": 30,
                    "birthday": "1994-06-15",
                    "address": { "street": "Main", "number": 10 },
                }],
            })
        );
        let entity = user_with_addresses("addresses", vec![address("A", 1), address("B", 2)]);
        let insert = backend
            .build_insert_payload(&entity, None)
            .expect("Insert must translate");
        assert_eq!(
            insert.document["addresses"],
            json!([
                { "street": "A", "number": 1 },
                { "street": "B", "number": 2 },
            ])
        );
    }

    #[test]
    fn ttl_is_unsupported() {
        init_logs();
        let error = MongoBackend::new("shop")
            .build_insert_payload(&user(), Some(Duration::from_secs(10)))
            .expect_err("Must be rejected");
        assert!(matches!(
            translation_error(&error),
            TranslationError::UnsupportedOperation {
                backend: "mongodb",
                ..
            }
        ));
    }

    #[test]
    fn update() {
        init_logs();
        let entity = Entity::new("users")
            .with(Field::new("_id", 42))
            .with(Field::new("name", "Alice"));
        let update = MongoBackend::new("shop")
            .build_update_payload(&entity)
            .expect("Update must translate");
        assert!(entity.find("_id").is_some());
        assert_eq!(
            update.to_command(),
            json!({
                "findAndModify": "users",
                "query": { "_id": 42 },
                "update": { "name": "Alice" },
            })
        );
        let error = MongoBackend::new("shop")
            .build_update_payload(&entity.without("_id"))
            .expect_err("Must be rejected");
        assert!(matches!(
            translation_error(&error),
            TranslationError::MissingKey { key, .. } if key == "_id"
        ));
    }

    #[test]
    fn select_and_delete() {
        init_logs();
        let backend = MongoBackend::new("shop");
        let find = backend
            .build_select_query(
                &SelectQuery::new("users")
                    .filter(Condition::gte("age", 18))
                    .fields(["name", "age"])
                    .sort(Sort::desc("age"))
                    .skip(20)
                    .limit(10),
            )
            .expect("Select must translate");
        assert_eq!(
            find.to_command(),
            json!({
                "find": "users",
                "filter": { "age": { "$gte": 18 } },
                "projection": { "name": 1, "age": 1 },
                "sort": { "age": -1 },
                "skip": 20,
                "limit": 10,
            })
        );
        let find = backend
            .build_select_query(&SelectQuery::new("users"))
            .expect("Select must translate");
        assert_eq!(find.to_command(), json!({ "find": "users", "filter": {} }));
        let delete = backend
            .build_delete_query(&DeleteQuery::new("users"))
            .expect("Delete must translate");
        assert_eq!(
            delete.to_command(),
            json!({ "delete": "users", "deletes": [{ "q": {}, "limit": 0 }] })
        );
        assert_eq!(backend.count("users").to_string(), r#"{"count":"users"}"#);
    }

    #[test]
    fn reserved_names() {
        init_logs();
        let backend = MongoBackend::new("shop");
        for query in [
            SelectQuery::new("users").sort(Sort::asc("$where")),
            SelectQuery::new("users").fields(["name", "$x"]),
        ] {
            let error = backend
                .build_select_query(&query)
                .expect_err("Must be rejected");
            assert!(matches!(
                translation_error(&error),
                TranslationError::InvalidCondition { .. }
            ));
        }
        let entity = Entity::new("users")
            .with(Field::new("_id", 1))
            .with(Field::new("$set", 1));
        let error = backend
            .build_insert_payload(&entity, None)
            .expect_err("Must be rejected");
        assert!(matches!(
            translation_error(&error),
            TranslationError::InvalidCondition { .. }
        ));
        assert!(backend.build_update_payload(&entity).is_err());
        assert!(
            backend
                .build_update_payload(
                    &Entity::new("users")
                        .with_key("$id")
                        .with(Field::new("$id", 1))
                        .with(Field::new("name", "Alice"))
                )
                .is_err()
        );
    }

    #[test]
    fn aggregate() {
        init_logs();
        let command = MongoBackend::new("shop").aggregate(
            "users",
            vec![
                json!({ "$match": { "age": { "$gte": 18 } } }),
                json!({ "$group": { "_id": "$city", "total": { "$sum": 1 } } }),
            ],
        );
        assert_eq!(
            command.to_command(),
            json!({
                "aggregate": "users",
                "pipeline": [
                    { "$match": { "age": { "$gte": 18 } } },
                    { "$group": { "_id": "$city", "total": { "$sum": 1 } } },
                ],
                "cursor": {},
            })
        );
    }

    #[test]
    fn config() {
        init_logs();
        let config = MongoConfig::parse("mongodb://db1/shop?hosts=db2:27018&replicaSet=rs0")
            .expect("Valid url");
        assert_eq!(
            config.hosts,
            [Address::new("db1", 27017), Address::new("db2", 27018)]
        );
        assert_eq!(config.database, "shop");
        assert_eq!(config.replica_set.as_deref(), Some("rs0"));
        assert_eq!(MongoBackend::from_config(&config).database(), "shop");
        assert!(MongoConfig::parse("cassandra://db1/shop").is_err());
    }
}
