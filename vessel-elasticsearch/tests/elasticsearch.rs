#[cfg(test)]
mod tests {
    use indoc::indoc;
    use serde_json::json;
    use std::time::Duration;
    use vessel_core::{
        Address, Backend, Condition, DeleteQuery, Entity, Error, Field, SelectQuery, Sort,
        TranslationError,
    };
    use vessel_elasticsearch::{ElasticsearchBackend, ElasticsearchConfig};
    use vessel_tests::{execute_tests, init_logs, user};

    fn translation_error(error: &Error) -> &TranslationError {
        error
            .downcast_ref::<TranslationError>()
            .expect("Expected a translation error")
    }

    #[test]
    fn contract() {
        init_logs();
        execute_tests(&ElasticsearchBackend::new());
    }

    #[test]
    fn conditions() {
        init_logs();
        let backend = ElasticsearchBackend::new();
        let query = backend
            .translate_condition(Some(
                &(Condition::eq("name", "Alice")
                    & Condition::gt("age", 18)
                    & Condition::is_in("city", vec!["Rome", "Oslo"])),
            ))
            .expect("Condition must translate");
        assert_eq!(
            query,
            json!({
                "bool": {
                    "must": [
                        { "term": { "name": "Alice" } },
                        { "range": { "age": { "gt": 18 } } },
                        { "terms": { "city": ["Rome", "Oslo"] } },
                    ]
                }
            })
        );
        let query = backend
            .translate_condition(Some(
                &(Condition::between("age", 18, 65) | !Condition::like("email", "%@example.com")),
            ))
            .expect("Condition must translate");
        assert_eq!(
            query,
            json!({
                "bool": {
                    "should": [
                        { "range": { "age": { "gte": 18, "lte": 65 } } },
                        { "bool": { "must_not": [
                            { "wildcard": { "email": { "value": "*@example.com" } } }
                        ] } },
                    ],
                    "minimum_should_match": 1,
                }
            })
        );
        assert_eq!(
            backend.translate_condition(None).expect("Must translate"),
            json!({ "match_all": {} })
        );
    }

    #[test]
    fn insert() {
        init_logs();
        let request = ElasticsearchBackend::new()
            .build_insert_payload(&user(), None)
            .expect("Insert must translate");
        assert_eq!(request.method(), "PUT");
        assert_eq!(
            request.path(),
            "/users/_doc/7e57ab1e-0000-4000-8000-000000000001"
        );
        assert_eq!(request.document["age"], json!(30));
        assert_eq!(
            request.document["address"],
            json!({ "street": "Main", "number": 10 })
        );
        let anonymous = Entity::new("logs").with(Field::new("message", "started"));
        let request = ElasticsearchBackend::new()
            .build_insert_payload(&anonymous, None)
            .expect("Insert must translate");
        assert_eq!(request.id, None);
        assert_eq!(
            request.to_string(),
            indoc! {r#"
                POST /logs/_doc
                {"message":"started"}"#}
        );
    }

    #[test]
    fn insert_moves_the_key_to_the_path() {
        init_logs();
        let entity = Entity::new("users")
            .with(Field::new("_id", "42"))
            .with(Field::new("n", 1));
        let request = ElasticsearchBackend::new()
            .build_insert_payload(&entity, None)
            .expect("Insert must translate");
        assert_eq!(
            request.to_string(),
            indoc! {r#"
                PUT /users/_doc/42
                {"n":1}"#}
        );
        assert!(entity.find("_id").is_some());
    }

    #[test]
    fn escaped_paths() {
        init_logs();
        let entity = Entity::new("users")
            .with(Field::new("_id", "a b/c?x=1"))
            .with(Field::new("n", 1));
        let backend = ElasticsearchBackend::new();
        let request = backend
            .build_update_payload(&entity)
            .expect("Update must translate");
        assert_eq!(request.path(), "/users/_doc/a%20b%2Fc%3Fx%3D1");
        let request = backend
            .build_insert_payload(&entity, None)
            .expect("Insert must translate");
        assert_eq!(request.path(), "/users/_doc/a%20b%2Fc%3Fx%3D1");
        let search = backend
            .build_select_query(&SelectQuery::new("logs/2024"))
            .expect("Select must translate");
        assert_eq!(search.path(), "/logs%2F2024/_search");
    }

    #[test]
    fn ttl_is_unsupported() {
        init_logs();
        let error = ElasticsearchBackend::new()
            .build_insert_payload(&user(), Some(Duration::from_millis(1500)))
            .expect_err("Must be rejected");
        assert!(matches!(
            translation_error(&error),
            TranslationError::UnsupportedOperation {
                backend: "elasticsearch",
                ..
            }
        ));
    }

    #[test]
    fn update() {
        init_logs();
        let entity = Entity::new("products")
            .with(Field::new("_id", 42))
            .with(Field::new("title", "Lamp"));
        let request = ElasticsearchBackend::new()
            .build_update_payload(&entity)
            .expect("Update must translate");
        assert_eq!(request.path(), "/products/_doc/42");
        assert_eq!(request.body(), json!({ "title": "Lamp" }));
        assert_eq!(entity.len(), 2);
        let error = ElasticsearchBackend::new()
            .build_update_payload(&entity.without("_id"))
            .expect_err("Must be rejected");
        assert!(matches!(
            translation_error(&error),
            TranslationError::MissingKey { key, .. } if key == "_id"
        ));
    }

    #[test]
    fn search_and_delete() {
        init_logs();
        let backend = ElasticsearchBackend::new();
        let search = backend
            .build_select_query(
                &SelectQuery::new("users")
                    .filter(Condition::lte("age", 40))
                    .fields(["name"])
                    .sort(Sort::asc("name"))
                    .skip(10)
                    .limit(5),
            )
            .expect("Select must translate");
        assert_eq!(search.path(), "/users/_search");
        assert_eq!(
            search.body(),
            json!({
                "query": { "range": { "age": { "lte": 40 } } },
                "sort": [{ "name": { "order": "asc" } }],
                "_source": ["name"],
                "from": 10,
                "size": 5,
            })
        );
        let search = backend
            .build_select_query(&SelectQuery::new("users"))
            .expect("Select must translate");
        assert_eq!(search.body(), json!({ "query": { "match_all": {} } }));
        let delete = backend
            .build_delete_query(&DeleteQuery::new("users").filter(Condition::eq("name", "Bob")))
            .expect("Delete must translate");
        assert_eq!(
            delete.to_string(),
            indoc! {r#"
                POST /users/_delete_by_query
                {"query":{"term":{"name":"Bob"}}}"#}
        );
        assert_eq!(backend.count("users").path(), "/users/_count");
    }

    #[test]
    fn config() {
        init_logs();
        let config = ElasticsearchConfig::parse("elasticsearch://es1/catalog?hosts=es2:9201")
            .expect("Valid url");
        assert_eq!(
            config.hosts,
            [Address::new("es1", 9200), Address::new("es2", 9201)]
        );
        assert_eq!(config.index.as_deref(), Some("catalog"));
        assert!(ElasticsearchConfig::parse("mongodb://es1").is_err());
    }

    #[test]
    fn from_settings() {
        init_logs();
        let config = ElasticsearchConfig::from_settings([
            ("elasticsearch-host-2", "es2:9201"),
            ("cluster-name", "search"),
            ("elasticsearch-host-1", "es1"),
        ])
        .expect("Valid settings");
        assert_eq!(
            config.hosts,
            [Address::new("es1", 9200), Address::new("es2", 9201)]
        );
        assert_eq!(config.index, None);
        assert!(ElasticsearchConfig::from_settings([("cluster-name", "search")]).is_err());
    }
}
