mod support;

use mappers::stmt::{ColumnRef, Value};
use mappers::{Config, Evaluated, Mapper, Reader};
use pretty_assertions::assert_eq;
use support::entities::*;

#[test]
fn path_reads_a_field_of_the_related_source() {
    let (db, models) = support::db();

    let mapper = Mapper::of::<NamedMessage>(
        db.schema().source(models.message),
        Config::new()
            .field("primary_key", "id")
            .path("username", ["user", "name"]),
    )
    .unwrap();

    let load_messages: Reader<_, Vec<NamedMessage>> =
        mapper.reader().wrap(|()| db.query(models.message)).unwrap();

    let usernames: Vec<_> = load_messages
        .call(())
        .unwrap()
        .into_iter()
        .map(|message| message.username)
        .collect();
    assert_eq!(usernames, ["Alice", "Bob"]);
}

#[test]
fn three_hop_path_resolves_on_the_last_related_source() {
    let (db, models) = support::db();

    let mapper = Mapper::of::<CommunityMessage>(
        db.schema().source(models.message),
        Config::new()
            .field("primary_key", "id")
            .path("community_name", ["channel", "community", "name"]),
    )
    .unwrap();

    assert_eq!(
        mapper.columns(),
        [ColumnRef::new("id"), ColumnRef::from(["channel", "community", "name"])]
    );

    let load_message: Reader<_, CommunityMessage> = mapper
        .reader()
        .wrap(|primary_key: i64| db.query(models.message).filter("id", primary_key))
        .unwrap();

    assert_eq!(
        load_message.call(2).unwrap(),
        CommunityMessage {
            primary_key: 2,
            community_name: "Rustaceans".to_string(),
        }
    );
}

#[test]
fn foreign_key_column_resolves_without_config() {
    let (db, models) = support::db();

    let mapper = Mapper::of::<FlatMessage>(
        db.schema().source(models.message),
        Config::new().field("primary_key", "id"),
    )
    .unwrap();

    assert_eq!(mapper.columns()[2], ColumnRef::new("user_id"));

    let load_messages: Reader<_, Vec<FlatMessage>> =
        mapper.reader().wrap(|()| db.query(models.message)).unwrap();

    let user_ids: Vec<_> = load_messages
        .call(())
        .unwrap()
        .into_iter()
        .map(|message| message.user_id)
        .collect();
    assert_eq!(user_ids, [1, 2]);
}

#[test]
fn evaluated_field_defaults_to_its_own_name() {
    let (db, models) = support::db();

    let mapper = Mapper::of::<TotalMessage>(
        db.schema().source(models.message),
        Config::new()
            .field("primary_key", "id")
            .evaluated("total", Evaluated::new()),
    )
    .unwrap();

    assert_eq!(
        mapper.mapping().get("total").and_then(|total| total.column()),
        Some(ColumnRef::new("total"))
    );

    let load_messages: Reader<_, Vec<TotalMessage>> = mapper
        .reader()
        .wrap(|()| {
            db.query(models.message)
                .annotate("total", |_| Ok(Value::from(1_i64)))
        })
        .unwrap();

    assert_eq!(
        load_messages.call(()).unwrap(),
        [
            TotalMessage {
                primary_key: 1,
                total: 1,
            },
            TotalMessage {
                primary_key: 2,
                total: 1,
            },
        ]
    );
}

#[test]
fn named_evaluated_field_reads_the_named_column() {
    let (db, models) = support::db();

    // `MessageModel` has neither `total` nor `total_number`
    let mapper = Mapper::of::<TotalMessage>(
        db.schema().source(models.message),
        Config::new()
            .field("primary_key", "id")
            .evaluated("total", Evaluated::named("total_number")),
    )
    .unwrap();

    assert_eq!(
        mapper.columns(),
        [ColumnRef::new("id"), ColumnRef::new("total_number")]
    );

    let load_messages: Reader<_, Vec<TotalMessage>> = mapper
        .reader()
        .wrap(|()| {
            db.query(models.message)
                .annotate("total_number", |row| row.get("user__id"))
        })
        .unwrap();

    let totals: Vec<_> = load_messages
        .call(())
        .unwrap()
        .into_iter()
        .map(|message| message.total)
        .collect();
    assert_eq!(totals, [1, 2]);
}

#[test]
fn evaluated_column_missing_from_the_query_fails_the_read() {
    let (db, models) = support::db();

    let mapper = Mapper::of::<TotalMessage>(
        db.schema().source(models.message),
        Config::new()
            .field("primary_key", "id")
            .evaluated("total", Evaluated::new()),
    )
    .unwrap();

    let load_messages: Reader<_, Vec<TotalMessage>> =
        mapper.reader().wrap(|()| db.query(models.message)).unwrap();

    assert!(load_messages.call(()).unwrap_err().is_unknown_source_field());
}

#[test]
fn nullable_columns_read_into_optional_fields() {
    let (db, models) = support::db();

    let mapper = Mapper::of::<OptionalGroup>(
        db.schema().source(models.group),
        Config::new().field("primary_key", "id"),
    )
    .unwrap();

    let load_groups: Reader<_, Vec<OptionalGroup>> =
        mapper.reader().wrap(|()| db.query(models.group)).unwrap();

    assert_eq!(
        load_groups.call(()).unwrap(),
        [
            OptionalGroup {
                primary_key: 1,
                name: None,
            },
            OptionalGroup {
                primary_key: 2,
                name: Some(String::new()),
            },
        ]
    );
}
