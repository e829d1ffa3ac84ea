#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use serde_json::{Value as Json, json};
    use std::{collections::BTreeMap, str::FromStr};
    use time::macros::{date, datetime, time};
    use uuid::Uuid;
    use vessel_core::{
        CodecRegistry, Encoder, JsonRegistry, Value, coerce, normalize, truncate_long, truncated,
    };

    /// Knows only 32 bit integers, everything else takes the generic path.
    struct IntOnly;
    struct IntEncoder;

    impl Encoder for IntEncoder {
        type Literal = String;
        fn encode(&self, value: &Value) -> String {
            match value {
                Value::Int32(Some(v)) => format!("int:{}", v),
                _ => "int:?".into(),
            }
        }
    }

    impl CodecRegistry for IntOnly {
        type Encoder = IntEncoder;
        fn resolve(&self, value: &Value) -> Option<IntEncoder> {
            matches!(value, Value::Int32(Some(..))).then_some(IntEncoder)
        }
        fn generic(&self, value: &Value) -> String {
            format!("generic:{:?}", value)
        }
    }

    #[test]
    fn coerce_prefers_the_resolved_encoder() {
        assert_eq!(coerce(&IntOnly, &Value::from(7)), "int:7");
        assert_eq!(coerce(&IntOnly, &Value::from(7_i8)), "generic:Int64(Some(7))");
        assert_eq!(
            coerce(&IntOnly, &Value::from(true)),
            "generic:Boolean(Some(true))"
        );
        assert_eq!(coerce(&IntOnly, &Value::Int32(None)), "generic:Null");
    }

    #[test]
    fn normalize_scalars() {
        assert_eq!(normalize(&Value::Int32(None)), Value::Null);
        assert_eq!(normalize(&Value::from(12_u16)), Value::Int64(Some(12)));
        assert_eq!(
            normalize(&Value::from(u64::MAX)),
            Value::Varchar(Some("18446744073709551615".into()))
        );
        assert_eq!(
            normalize(&Value::from(i128::from(i64::MIN))),
            Value::Int64(Some(i64::MIN))
        );
        assert_eq!(normalize(&Value::from(0.5_f32)), Value::Float64(Some(0.5)));
        assert_eq!(
            normalize(&Value::from(f64::NAN)),
            Value::Varchar(Some("NaN".into()))
        );
        assert_eq!(
            normalize(&Value::from(Decimal::from_str("12.50").expect("Valid decimal"))),
            Value::Varchar(Some("12.50".into()))
        );
        assert_eq!(
            normalize(&Value::from(vec![0xca_u8, 0xfe].into_boxed_slice())),
            Value::Varchar(Some("cafe".into()))
        );
        assert_eq!(
            normalize(&Value::from(date!(2024 - 02 - 29))),
            Value::Varchar(Some("2024-02-29".into()))
        );
        assert_eq!(
            normalize(&Value::from(time!(08:30:00.25))),
            Value::Varchar(Some("08:30:00.25".into()))
        );
        assert_eq!(
            normalize(&Value::from(datetime!(2024-02-29 08:30:00))),
            Value::Varchar(Some("2024-02-29T08:30:00".into()))
        );
        assert_eq!(
            normalize(&Value::from(datetime!(2024-02-29 08:30:00 -5:30))),
            Value::Varchar(Some("2024-02-29T08:30:00-05:30".into()))
        );
        assert_eq!(
            normalize(&Value::from(Uuid::nil())),
            Value::Varchar(Some("00000000-0000-0000-0000-000000000000".into()))
        );
    }

    #[test]
    fn normalize_collections() {
        let normalized = normalize(&Value::from(vec![1_u8, 2]));
        let Value::List(Some(items), ..) = normalized else {
            panic!("Expected a list, found {:?}", normalized);
        };
        assert_eq!(items, [Value::Int64(Some(1)), Value::Int64(Some(2))]);

        let mut map = BTreeMap::new();
        map.insert(1_i32, Uuid::nil());
        let normalized = normalize(&Value::from(map));
        let Value::Map(Some(entries), ..) = normalized else {
            panic!("Expected a map, found {:?}", normalized);
        };
        assert_eq!(
            entries.into_iter().collect::<Vec<_>>(),
            [(
                Value::Varchar(Some("1".into())),
                Value::Varchar(Some("00000000-0000-0000-0000-000000000000".into()))
            )]
        );
    }

    #[test]
    fn json_literals() {
        assert_eq!(coerce(&JsonRegistry, &Value::from(42_u64)), json!(42));
        assert_eq!(coerce(&JsonRegistry, &Value::from("text")), json!("text"));
        assert_eq!(coerce(&JsonRegistry, &Value::Varchar(None)), Json::Null);
        assert_eq!(
            coerce(&JsonRegistry, &Value::from(f64::INFINITY)),
            json!("inf")
        );
        assert_eq!(
            coerce(&JsonRegistry, &Value::from(vec![1, 2, 3])),
            json!([1, 2, 3])
        );
        assert_eq!(
            coerce(&JsonRegistry, &Value::from(vec![date!(2020 - 01 - 01)])),
            json!(["2020-01-01"])
        );
        let mut map = BTreeMap::new();
        map.insert("k", 1.5_f64);
        assert_eq!(coerce(&JsonRegistry, &Value::from(map)), json!({ "k": 1.5 }));
    }

    #[test]
    fn truncation() {
        assert_eq!(truncated("hello", 10), "hello");
        assert_eq!(truncated("héllo", 2), "h");
        let long = "x".repeat(600);
        let text = format!("{}", truncate_long!(long));
        assert_eq!(text.len(), 500);
        assert!(text.ends_with("..."));
        let short = String::from("SELECT 1;");
        assert_eq!(format!("{}", truncate_long!(short)), "SELECT 1;");
    }
}
