#![allow(dead_code)]

pub mod entities;

use mappers::schema::source::ModelId;
use mappers::stmt::{Type, Value};
use mappers::{Schema, Source};
use mappers_driver_memory::Memory;

use std::sync::Arc;

/// Ids of the fixture models.
#[derive(Debug, Clone, Copy)]
pub struct Models {
    pub user: ModelId,
    pub group: ModelId,
    pub chat: ModelId,
    pub community: ModelId,
    pub channel: ModelId,
    pub message: ModelId,
    pub delivery: ModelId,
    pub order: ModelId,
    pub base: ModelId,
    pub thread: ModelId,
    pub note: ModelId,
    pub account: ModelId,
    pub profile: ModelId,
}

pub fn schema() -> (Arc<Schema>, Models) {
    let mut builder = Schema::builder();

    let models = Models {
        user: builder.model("UserModel"),
        group: builder.model("GroupModel"),
        chat: builder.model("ChatModel"),
        community: builder.model("CommunityModel"),
        channel: builder.model("ChannelModel"),
        message: builder.model("MessageModel"),
        delivery: builder.model("MessageDeliveryModel"),
        order: builder.model("OrderModel"),
        base: builder.model("BaseModel"),
        thread: builder.model("ThreadModel"),
        note: builder.model("NoteModel"),
        account: builder.model("AccountModel"),
        profile: builder.model("ProfileModel"),
    };

    builder
        .define(models.user)
        .primary_key("id", Type::I64)
        .column("name", Type::String)
        .column("about", Type::String)
        .has_many("messages", models.message, "user")
        .many_to_many("chats", models.chat)
        .pair("subscribers");

    builder
        .define(models.group)
        .primary_key("id", Type::I64)
        .column("name", Type::String)
        .nullable();

    builder
        .define(models.chat)
        .primary_key("id", Type::I64)
        .column("name", Type::String)
        .many_to_many("subscribers", models.user)
        .pair("chats");

    builder
        .define(models.community)
        .primary_key("id", Type::I64)
        .column("name", Type::String)
        .has_many("channels", models.channel, "community");

    builder
        .define(models.channel)
        .primary_key("id", Type::I64)
        .column("name", Type::String)
        .belongs_to("community", models.community)
        .pair("channels")
        .has_many("messages", models.message, "channel");

    builder
        .define(models.message)
        .primary_key("id", Type::I64)
        .belongs_to("user", models.user)
        .pair("messages")
        .belongs_to("channel", models.channel)
        .pair("messages")
        .column("text", Type::String)
        .has_many("deliveries", models.delivery, "message");

    builder
        .define(models.delivery)
        .primary_key("id", Type::I64)
        .belongs_to("message", models.message)
        .pair("deliveries")
        .column("service", Type::String);

    builder
        .define(models.order)
        .primary_key("id", Type::I64)
        .column("total", Type::I64)
        .nullable();

    builder
        .define(models.base)
        .abstract_model()
        .column("created", Type::String);

    builder
        .define(models.thread)
        .primary_key("id", Type::I64)
        .belongs_to("parent", models.thread);

    builder
        .define(models.note)
        .primary_key("id", Type::I64)
        .column("text", Type::String)
        .belongs_to("author", models.user)
        .nullable();

    builder
        .define(models.account)
        .primary_key("id", Type::I64)
        .has_one("profile", models.profile, "account");

    builder
        .define(models.profile)
        .primary_key("id", Type::I64)
        .column("bio", Type::String)
        .belongs_to("account", models.account)
        .pair("profile");

    let schema = builder.build().unwrap();
    (schema, models)
}

macro_rules! insert {
    ($db:expr, $model:expr, { $($column:literal: $value:expr),* $(,)? }) => {
        $db.insert($model, [$(($column, Value::from($value))),*]).unwrap()
    };
}

/// The fixture schema with two rows in most models.
pub fn db() -> (Memory, Models) {
    let (schema, models) = schema();
    let mut db = Memory::new(&schema);

    insert!(db, models.user, { "id": 1_i64, "name": "Alice", "about": "" });
    insert!(db, models.user, { "id": 2_i64, "name": "Bob", "about": "" });

    insert!(db, models.group, { "id": 1_i64, "name": Value::Null });
    insert!(db, models.group, { "id": 2_i64, "name": "" });

    insert!(db, models.community, { "id": 1_i64, "name": "Rustaceans" });
    insert!(db, models.channel, { "id": 1_i64, "name": "general", "community_id": 1_i64 });

    insert!(db, models.message, {
        "id": 1_i64,
        "user_id": 1_i64,
        "channel_id": 1_i64,
        "text": "hello",
    });
    insert!(db, models.message, {
        "id": 2_i64,
        "user_id": 2_i64,
        "channel_id": 1_i64,
        "text": "hi",
    });

    insert!(db, models.delivery, { "id": 1_i64, "message_id": 1_i64, "service": "sms" });
    insert!(db, models.delivery, { "id": 2_i64, "message_id": 2_i64, "service": "email" });

    insert!(db, models.order, { "id": 1_i64, "total": 10_i64 });
    insert!(db, models.order, { "id": 2_i64, "total": Value::Null });

    (db, models)
}

pub fn source(schema: &Arc<Schema>, model: ModelId) -> Source {
    schema.source(model)
}
