mod support;

use mappers::{record, Config, Entity, LazyMapper, Mapper, Reader, Resolved};
use pretty_assertions::assert_eq;
use support::entities::{Delivery, Message, Thread, User};

fn lookups(mapper: &Mapper) -> Vec<String> {
    mapper.columns().iter().map(|column| column.join("__")).collect()
}

fn id_only() -> LazyMapper {
    LazyMapper::new(Config::new().field("primary_key", "id"))
}

fn delivery_config() -> Config {
    Config::new().field("primary_key", "id").nested(
        "message",
        LazyMapper::new(
            Config::new()
                .field("primary_key", "id")
                .nested("user", id_only()),
        ),
    )
}

#[test]
fn nested_columns_are_prefixed_with_the_field() {
    let (schema, models) = support::schema();

    let mapper = Mapper::of::<Message>(
        schema.source(models.message),
        Config::new()
            .field("primary_key", "id")
            .nested("user", id_only()),
    )
    .unwrap();

    assert_eq!(lookups(&mapper), ["id", "text", "user__id", "user__name"]);

    let Some(Resolved::Nested(user)) = mapper.mapping().get("user") else {
        panic!("`user` should resolve to a nested mapper");
    };
    assert_eq!(user.entity().name(), "User");
    assert_eq!(user.source().name(), "UserModel");
    assert_eq!(lookups(user), ["id", "name"]);
}

#[test]
fn deep_nesting_flattens_depth_first() {
    let (schema, models) = support::schema();

    let mapper = Mapper::of::<Delivery>(schema.source(models.delivery), delivery_config()).unwrap();

    assert_eq!(
        lookups(&mapper),
        [
            "id",
            "message__id",
            "message__text",
            "message__user__id",
            "message__user__name",
            "service",
        ]
    );
}

#[test]
fn decoding_a_planned_row_rebuilds_the_entity_graph() {
    let (schema, models) = support::schema();
    let mapper = Mapper::of::<Delivery>(schema.source(models.delivery), delivery_config()).unwrap();

    let delivery = Delivery {
        primary_key: 1,
        message: Message {
            primary_key: 10,
            text: "hello".to_string(),
            user: User {
                primary_key: 7,
                name: "Carol".to_string(),
            },
        },
        service: "sms".to_string(),
    };

    let row = record![1_i64, 10_i64, "hello", 7_i64, "Carol", "sms"];
    assert_eq!(mapper.decode_as::<Delivery>(row).unwrap(), delivery);
}

#[test]
fn rows_of_the_wrong_width_are_rejected() {
    let (schema, models) = support::schema();
    let mapper = Mapper::of::<Delivery>(schema.source(models.delivery), delivery_config()).unwrap();

    let err = mapper.decode(record![1_i64, 10_i64]).unwrap_err();
    assert!(err.is_invalid_result());
}

#[test]
fn reading_deeply_nested_entities() {
    let (db, models) = support::db();
    let mapper = Mapper::of::<Delivery>(db.schema().source(models.delivery), delivery_config()).unwrap();

    let load_deliveries: Reader<_, Vec<Delivery>> = mapper
        .reader()
        .wrap(|()| db.query(models.delivery).order_by_desc("id"))
        .unwrap();

    let deliveries = load_deliveries.call(()).unwrap();

    assert_eq!(deliveries.len(), 2);
    assert_eq!(deliveries[0].service, "email");
    assert_eq!(deliveries[0].message.text, "hi");
    assert_eq!(deliveries[0].message.user.name, "Bob");
    assert_eq!(deliveries[1].message.user.name, "Alice");
}

#[test]
fn building_twice_decodes_identically() {
    let (schema, models) = support::schema();

    let first = Mapper::of::<Delivery>(schema.source(models.delivery), delivery_config()).unwrap();
    let second = Mapper::of::<Delivery>(schema.source(models.delivery), delivery_config()).unwrap();

    assert_eq!(first.columns(), second.columns());

    let row = record![2_i64, 3_i64, "hey", 4_i64, "Dave", "push"];
    assert_eq!(
        first.decode_as::<Delivery>(row.clone()).unwrap(),
        second.decode_as::<Delivery>(row).unwrap()
    );
}

#[test]
fn nested_fields_default_to_an_empty_nested_mapper() {
    let (schema, models) = support::schema();

    // Without config the nested `User` is matched by name, and has no
    // `primary_key` on `UserModel`.
    let err = Mapper::of::<Message>(
        schema.source(models.message),
        Config::new().field("primary_key", "id"),
    )
    .unwrap_err();

    assert!(err.any(|err| err.is_missing_entity_field()));
    assert_eq!(
        err.to_string(),
        "resolving nested field `user`: can not find `primary_key` field in the `UserModel` model"
    );
}

#[test]
fn nested_failures_name_every_enclosing_field() {
    let (schema, models) = support::schema();

    let config = Config::new().field("primary_key", "id").nested(
        "message",
        LazyMapper::new(
            Config::new()
                .field("primary_key", "id")
                .nested("user", LazyMapper::new(Config::new().field("primary_key", "pk"))),
        ),
    );

    let err = Mapper::of::<Delivery>(schema.source(models.delivery), config).unwrap_err();

    assert!(err.root().is_unknown_source_field());
    assert_eq!(
        err.to_string(),
        "resolving nested field `message`: resolving nested field `user`: can not find `pk` field in the `UserModel` model"
    );
}

#[test]
fn self_nesting_entities_are_rejected() {
    let (schema, models) = support::schema();

    let err = Mapper::of::<Thread>(
        schema.source(models.thread),
        Config::new().field("primary_key", "id"),
    )
    .unwrap_err();

    assert!(err.is_invalid_nested_mapper_config());
    assert_eq!(
        err.to_string(),
        "invalid nested mapper config for `parent` field: `Thread` over `ThreadModel` is already being mapped by an enclosing mapper"
    );
}

#[test]
fn lazy_mapper_builds_into_a_mapper() {
    let (schema, models) = support::schema();

    let mapper = id_only()
        .build(User::definition(), schema.source(models.user))
        .unwrap();

    assert_eq!(lookups(&mapper), ["id", "name"]);
}

#[test]
fn mapper_is_shared_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Mapper>();
    assert_send_sync::<LazyMapper>();

    let (schema, models) = support::schema();
    let mapper = Mapper::of::<User>(schema.source(models.user), id_only().into_config()).unwrap();

    let names: Vec<String> = std::thread::scope(|scope| {
        let handles: Vec<_> = ["Alice", "Bob"]
            .into_iter()
            .enumerate()
            .map(|(i, name)| {
                let mapper = &mapper;
                scope.spawn(move || {
                    mapper
                        .decode_as::<User>(record![i as i64, name])
                        .unwrap()
                        .name
                })
            })
            .collect();

        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(names, ["Alice", "Bob"]);
}
