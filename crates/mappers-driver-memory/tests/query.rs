use mappers_core::schema::source::ModelId;
use mappers_core::stmt::{ColumnRef, Type, Value, ValueRecord};
use mappers_core::{record, Projection, QuerySet, Schema};
use mappers_driver_memory::{Memory, Query};
use pretty_assertions::assert_eq;

struct Models {
    user: ModelId,
    profile: ModelId,
    post: ModelId,
}

fn db() -> (Memory, Models) {
    let mut builder = Schema::builder();
    let models = Models {
        user: builder.model("UserModel"),
        profile: builder.model("ProfileModel"),
        post: builder.model("PostModel"),
    };

    builder
        .define(models.user)
        .primary_key("id", Type::I64)
        .column("name", Type::String)
        .has_one("profile", models.profile, "owner")
        .has_many("posts", models.post, "author");

    builder
        .define(models.profile)
        .primary_key("id", Type::I64)
        .column("bio", Type::String)
        .nullable()
        .belongs_to("owner", models.user)
        .pair("profile");

    builder
        .define(models.post)
        .primary_key("id", Type::I64)
        .column("title", Type::String)
        .belongs_to("author", models.user)
        .nullable()
        .pair("posts");

    let schema = builder.build().unwrap();
    let mut db = Memory::new(&schema);

    for (id, name) in [(1_i64, "Alice"), (2, "Bob"), (3, "Carol")] {
        db.insert(models.user, [("id", Value::from(id)), ("name", Value::from(name))])
            .unwrap();
    }

    db.insert(
        models.profile,
        [("id", Value::from(1_i64)), ("owner_id", Value::from(2_i64))],
    )
    .unwrap();

    db.insert(
        models.post,
        [
            ("id", Value::from(1_i64)),
            ("title", Value::from("b")),
            ("author_id", Value::from(1_i64)),
        ],
    )
    .unwrap();
    db.insert(
        models.post,
        [("id", Value::from(2_i64)), ("title", Value::from("a"))],
    )
    .unwrap();

    (db, models)
}

fn columns(lookups: &[&str]) -> Vec<ColumnRef> {
    lookups
        .iter()
        .map(|lookup| ColumnRef::path(lookup.split("__")))
        .collect()
}

fn rows<Q: QuerySet>(query: Q, lookups: &[&str]) -> Vec<ValueRecord> {
    query
        .values_list(&columns(lookups))
        .unwrap()
        .rows()
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap()
}

#[test]
fn lookups_follow_foreign_keys() {
    let (db, models) = db();

    assert_eq!(
        rows(db.query(models.post), &["id", "author__name", "author", "author_id"]),
        [
            record![1_i64, "Alice", 1_i64, 1_i64],
            record![2_i64, Value::Null, Value::Null, Value::Null],
        ]
    );
}

#[test]
fn lookups_follow_has_one_relations() {
    let (db, models) = db();

    assert_eq!(
        rows(db.query(models.user), &["name", "profile", "profile__id"]),
        [
            record!["Alice", Value::Null, Value::Null],
            record!["Bob", 1_i64, 1_i64],
            record!["Carol", Value::Null, Value::Null],
        ]
    );
}

#[test]
fn collections_and_unknown_fields_fail() {
    let (db, models) = db();

    let err = db
        .query(models.user)
        .values_list(&columns(&["posts__title"]))
        .unwrap()
        .rows()
        .unwrap_err();
    assert!(err.is_path_is_collection());

    let err = db
        .query(models.user)
        .values_list(&columns(&["nickname"]))
        .unwrap()
        .rows()
        .unwrap_err();
    assert!(err.is_unknown_source_field());

    let err = db
        .query(models.user)
        .values_list(&columns(&["name__length"]))
        .unwrap()
        .rows()
        .unwrap_err();
    assert!(err.is_path_not_a_relation());
}

#[test]
fn filters_compare_integers_of_any_width() {
    let (db, models) = db();

    assert_eq!(
        rows(db.query(models.user).filter("id", 2_i32), &["name"]),
        [record!["Bob"]]
    );
    assert_eq!(
        rows(db.query(models.post).filter("author__name", "Alice"), &["id"]),
        [record![1_i64]]
    );
    assert_eq!(
        rows(db.query(models.post).filter("author", Value::Null), &["id"]),
        [record![2_i64]]
    );
}

#[test]
fn ordering_puts_null_first() {
    let (db, models) = db();

    assert_eq!(
        rows(db.query(models.post).order_by("title"), &["title"]),
        [record!["a"], record!["b"]]
    );
    assert_eq!(
        rows(db.query(models.post).order_by("author__name"), &["id"]),
        [record![2_i64], record![1_i64]]
    );
    assert_eq!(
        rows(db.query(models.user).order_by_desc("id"), &["id"]),
        [record![3_i64], record![2_i64], record![1_i64]]
    );
}

#[test]
fn annotations_add_computed_columns() {
    let (db, models) = db();

    let query = db
        .query(models.user)
        .annotate("shout", |row| {
            let name = row.get("name")?;
            Ok(Value::from(name.as_str().unwrap_or_default().to_uppercase()))
        })
        .filter("shout", "BOB");

    assert_eq!(rows(query, &["id", "shout"]), [record![2_i64, "BOB"]]);
}

fn get(query: Query<'_>) -> mappers_core::Result<ValueRecord> {
    query.values_list(&columns(&["id"]))?.get()
}

#[test]
fn get_and_first_name_the_model() {
    let (db, models) = db();

    assert_eq!(get(db.query(models.user).filter("id", 3_i64)).unwrap(), record![3_i64]);
    assert_eq!(
        get(db.query(models.user).filter("id", 9_i64))
            .unwrap_err()
            .to_string(),
        "record not found: model=UserModel"
    );
    assert_eq!(
        get(db.query(models.user)).unwrap_err().to_string(),
        "too many records: model=UserModel; rows=3"
    );

    let first = db
        .query(models.user)
        .order_by_desc("name")
        .values_list(&columns(&["name"]))
        .unwrap()
        .first()
        .unwrap();
    assert_eq!(first, Some(record!["Carol"]));
}

#[test]
fn projections_report_their_lookups() {
    let (db, models) = db();

    let projection = db
        .query(models.post)
        .values_list(&columns(&["id", "author__name"]))
        .unwrap();
    assert_eq!(projection.lookups(), ["id", "author__name"]);
    assert_eq!(projection.columns().len(), 2);
}

#[test]
fn inserts_are_checked_against_the_model() {
    let (mut db, models) = db();

    let err = db
        .insert(models.user, [("nickname", Value::from("al"))])
        .unwrap_err();
    assert!(err.is_unknown_source_field());

    let err = db
        .insert(models.user, [("id", Value::from(4_i64))])
        .unwrap_err();
    assert_eq!(err.to_string(), "invalid result: `UserModel.name` is not nullable");
}
