/// Marshalling scenarios: nested fields, sequences, dynamic keys,
/// duplicate handling and error placement
use crate::*;
use formwork_common::Value;

#[cfg(test)]
mod marshalling_tests {
    use super::*;

    fn user_fields() -> Fields {
        Fields::new().field(
            "user",
            Fields::new()
                .field("name", Scalar::text())
                .field("nick", Scalar::text())
                .field("age", Scalar::integer())
                .field("extra", Scalar::text()),
        )
    }

    #[test]
    fn test_nested_fields() {
        let result = marshall(
            [
                ("user.name", "Fred Kaputnik"),
                ("user.nick", "fred"),
                ("user.age", "42"),
                ("user.extra", ""),
            ],
            &user_fields(),
        );

        assert!(result.is_valid());
        assert_eq!(result.data.lookup("user.name"), Some(&Value::from("Fred Kaputnik")));
        assert_eq!(result.data.lookup("user.nick"), Some(&Value::from("fred")));
        assert_eq!(result.data.lookup("user.age"), Some(&Value::Integer(42)));
        assert_eq!(result.data.lookup("user.extra"), Some(&Value::from("")));
    }

    #[test]
    fn test_invalid_value_recorded_at_field() {
        let result = marshall([("user.age", "ten")], &user_fields());

        assert!(!result.is_valid());
        assert_eq!(result.data.lookup("user.age"), Some(&Value::Null));
        let messages = result.errors["user"]["age"].messages();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("ten"));
        assert!(result.errors["user"]["name"].is_empty());
    }

    #[test]
    fn test_missing_parameters_materialize_as_null() {
        let result = marshall(std::iter::empty(), &user_fields());

        assert!(result.is_valid());
        let user = result.data.get("user").and_then(Value::as_map).unwrap();
        assert_eq!(user.len(), 4);
        assert!(user.values().all(Value::is_null));
    }

    #[test]
    fn test_sequence_preserves_submission_order() {
        let fields = Fields::new().field(
            "user",
            Fields::new().field("friends", Field::sequence(Scalar::text())),
        );
        let result = marshall(
            [("user.friends", "stefan"), ("other", "x"), ("user.friends", "malthe")],
            &fields,
        );

        assert_eq!(
            result.data.lookup("user.friends"),
            Some(&Value::from(vec![Value::from("stefan"), Value::from("malthe")]))
        );
    }

    #[test]
    fn test_sequence_errors_per_index() {
        let fields = Fields::new().field("points", Field::sequence(Scalar::integer()));
        let result = marshall(
            [("points", "42"), ("points", "ten"), ("points", ""), ("points", "10")],
            &fields,
        );

        assert_eq!(
            result.data.get("points"),
            Some(&Value::from(vec![
                Value::Integer(42),
                Value::Null,
                Value::Null,
                Value::Integer(10),
            ]))
        );
        assert!(result.errors["points"]["0"].is_empty());
        assert_eq!(result.errors["points"]["1"].messages().len(), 1);
        assert!(result.errors["points"]["2"].is_empty());
        assert_eq!(result.errors.len(), 1);
    }

    #[test]
    fn test_absent_sequence_is_empty_list() {
        let fields = Fields::new()
            .field("tags", Field::sequence(Scalar::text()))
            .field("codes", Field::sequence(Scalar::integer().required()));
        let result = marshall(std::iter::empty(), &fields);

        assert_eq!(result.data.get("tags"), Some(&Value::List(Vec::new())));
        assert!(result.errors["tags"].is_empty());
        assert_eq!(result.errors["codes"].messages(), [DEFAULT_REQUIRED_MESSAGE]);
    }

    #[test]
    fn test_dynamic_mapping_of_fixed_fields() {
        let fields = Fields::new().field(
            "user",
            Field::dynamic(Fields::new().field("name", Scalar::text())),
        );
        let result = marshall(
            [
                ("user.stefan.name", "Stefan Eletzhofer"),
                ("user.malthe.name", "Malthe Borch"),
            ],
            &fields,
        );

        assert_eq!(
            result.data.lookup("user.stefan.name"),
            Some(&Value::from("Stefan Eletzhofer"))
        );
        let keys: Vec<&String> = result.data.get("user").and_then(Value::as_map).unwrap().keys().collect();
        assert_eq!(keys, vec!["stefan", "malthe"]);
    }

    #[test]
    fn test_single_and_multi_key_mappings_do_not_conflate() {
        let fixed_single = Fields::new().field("items", Fields::new().field("bicycle", Scalar::integer()));
        let dynamic = Fields::new().field("items", Field::dynamic(Scalar::integer()));

        for params in [
            vec![("items.bicycle", "1")],
            vec![("items.bicycle", "1"), ("items.car", "2")],
        ] {
            let fixed = marshall(params.iter().copied(), &fixed_single);
            assert_eq!(fixed.data.lookup("items.bicycle"), Some(&Value::Integer(1)));
            assert_eq!(fixed.data.lookup("items.car"), None);
            assert!(fixed.is_valid());

            let open = marshall(params.iter().copied(), &dynamic);
            assert_eq!(open.data.lookup("items.bicycle"), Some(&Value::Integer(1)));
            assert_eq!(
                open.data.get("items").and_then(Value::as_map).map(|m| m.len()),
                Some(params.len())
            );
        }
    }

    #[test]
    fn test_dynamic_errors_keyed_by_submitted_key() {
        let fields = Fields::new().field("stock", Field::dynamic(Scalar::integer()));
        let result = marshall([("stock.apples", "3"), ("stock.pears", "many")], &fields);

        assert!(result.errors["stock"]["apples"].is_empty());
        assert_eq!(result.errors.lookup("stock.pears").len(), 1);
        assert_eq!(result.data.lookup("stock.pears"), Some(&Value::Null));
    }

    #[test]
    fn test_empty_dynamic_keys_are_ignored() {
        let fields = Fields::new().field("stock", Field::dynamic(Scalar::integer()));
        let result = marshall(
            [("stock.", "1"), ("stock..pears", "2"), ("stock.apples", "3")],
            &fields,
        );

        assert!(result.is_valid());
        let stock = result.data.get("stock").and_then(Value::as_map).unwrap();
        assert_eq!(stock.keys().collect::<Vec<_>>(), vec!["apples"]);
        assert_eq!(result.data.lookup("stock.apples"), Some(&Value::Integer(3)));
    }

    #[test]
    fn test_unknown_parameters_are_ignored() {
        let fields = Fields::new().field("title", Scalar::text());
        let result = marshall(
            [("csrf_token", "abc"), ("submit", ""), ("title", "Live"), ("title.deeper", "x")],
            &fields,
        );

        assert!(result.is_valid());
        assert_eq!(result.data, {
            let mut map = formwork_common::ValueMap::new();
            map.insert("title".to_string(), Value::from("Live"));
            Value::Map(map)
        });
    }

    #[test]
    fn test_trivial_and_required_integer() {
        let optional = Fields::new().field("user", Scalar::text()).field("age", Scalar::integer());
        let result = marshall([("user", ""), ("age", "")], &optional);
        assert_eq!(result.data.get("user"), Some(&Value::from("")));
        assert_eq!(result.data.get("age"), Some(&Value::Null));
        assert_eq!(result.errors["age"].to_string(), "");

        let required = Fields::new().field("age", Scalar::integer().required());
        let result = marshall([("age", "")], &required);
        assert_eq!(result.data.get("age"), Some(&Value::Null));
        assert!(!result.errors["age"].is_empty());

        let result = marshall(std::iter::empty(), &required);
        assert_eq!(result.errors["age"].messages(), [DEFAULT_REQUIRED_MESSAGE]);
    }

    #[test]
    fn test_ignored_value_is_left_out() {
        let not_chosen = Scalar::new(|raw: &str| -> CoerceResult {
            if raw == "-" {
                Err(CoerceError::Ignore)
            } else {
                Ok(Value::from(raw))
            }
        });
        let fields = Fields::new()
            .field("colour", not_chosen.clone())
            .field("sizes", Field::sequence(not_chosen));
        let result = marshall([("colour", "-"), ("sizes", "S"), ("sizes", "-"), ("sizes", "L")], &fields);

        assert!(result.is_valid());
        assert_eq!(result.data.get("colour"), None);
        assert_eq!(
            result.data.get("sizes"),
            Some(&Value::from(vec![Value::from("S"), Value::from("L")]))
        );
    }

    #[test]
    fn test_duplicate_policies() {
        let fields = Fields::new().field("year", Scalar::integer());
        let params = [("year", "1977"), ("year", "1978")];

        let last = marshall(params, &fields);
        assert_eq!(last.data.get("year"), Some(&Value::Integer(1978)));

        let first = Marshaller::new(MarshalOptions::default().with_duplicates(Duplicates::First))
            .marshall(params, &fields);
        assert_eq!(first.data.get("year"), Some(&Value::Integer(1977)));

        let reject = Marshaller::new(MarshalOptions::default().with_duplicates(Duplicates::Reject))
            .marshall(params, &fields);
        assert_eq!(reject.data.get("year"), Some(&Value::Null));
        assert_eq!(reject.errors["year"].messages(), [MULTIPLE_VALUES_MESSAGE]);
    }

    #[test]
    fn test_custom_separator() {
        let fields = user_fields();
        let marshaller = Marshaller::new(MarshalOptions::default().with_separator(':'));
        let result = marshaller.marshall([("user:age", "7"), ("user.nick", "dotted")], &fields);

        assert_eq!(result.data.lookup("user.age"), Some(&Value::Integer(7)));
        assert_eq!(result.data.lookup("user.nick"), Some(&Value::Null));
    }

    #[test]
    fn test_marshalling_is_deterministic() {
        let fields = Fields::new()
            .field("title", Scalar::text().required())
            .field("year", Scalar::integer())
            .field("stock", Field::dynamic(Scalar::integer()))
            .field("tags", Field::sequence(Scalar::text()));
        let params = [
            ("stock.b", "x"),
            ("tags", "rock"),
            ("year", "MCMLXXVIII"),
            ("stock.a", "1"),
            ("tags", "live"),
        ];

        let first = marshall(params, &fields);
        for _ in 0..10 {
            assert_eq!(marshall(params, &fields), first);
        }
        assert_eq!(
            first.errors.entries().iter().map(|(path, _)| path.as_str()).collect::<Vec<_>>(),
            vec!["title", "year", "stock.b"]
        );
    }

    #[test]
    fn test_options_from_json() {
        let options: MarshalOptions =
            serde_json::from_str(r#"{ "separator": "/", "duplicates": "reject" }"#).unwrap();
        assert_eq!(options.separator, '/');
        assert_eq!(options.duplicates, Duplicates::Reject);

        let defaults: MarshalOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(defaults, MarshalOptions::default());
    }
}
