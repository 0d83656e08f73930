use mappers::stmt::{FromValue, Type};
use mappers::{bail, Entity, EntityDef};

/// Positional constructor.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub primary_key: i64,
    pub name: String,
}

impl Entity for User {
    fn definition() -> EntityDef {
        EntityDef::builder::<Self>("User")
            .field("primary_key", Type::I64)
            .field("name", Type::String)
            .from_record(|mut row| {
                Ok(User {
                    primary_key: row.take(0)?,
                    name: row.take(1)?,
                })
            })
            .build()
    }
}

/// Keyword constructor with a nested entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub primary_key: i64,
    pub text: String,
    pub user: User,
}

impl Entity for Message {
    fn definition() -> EntityDef {
        EntityDef::builder::<Self>("Message")
            .field("primary_key", Type::I64)
            .field("text", Type::String)
            .field("user", Type::entity::<User>())
            .from_fields(|mut fields| {
                Ok(Message {
                    primary_key: fields.take("primary_key")?,
                    text: fields.take("text")?,
                    user: fields.take_entity("user")?,
                })
            })
            .build()
    }
}

/// Two levels of nesting.
#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    pub primary_key: i64,
    pub message: Message,
    pub service: String,
}

impl Entity for Delivery {
    fn definition() -> EntityDef {
        EntityDef::builder::<Self>("Delivery")
            .field("primary_key", Type::I64)
            .field("message", Type::entity::<Message>())
            .field("service", Type::String)
            .from_record(|mut row| {
                Ok(Delivery {
                    primary_key: row.take(0)?,
                    message: row.take_entity(1)?,
                    service: row.take(2)?,
                })
            })
            .build()
    }
}

/// Reads the author name through the `user` relation.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedMessage {
    pub primary_key: i64,
    pub username: String,
}

impl Entity for NamedMessage {
    fn definition() -> EntityDef {
        EntityDef::builder::<Self>("NamedMessage")
            .field("primary_key", Type::I64)
            .field("username", Type::String)
            .from_record(|mut row| {
                Ok(NamedMessage {
                    primary_key: row.take(0)?,
                    username: row.take(1)?,
                })
            })
            .build()
    }
}

/// Reads the community name three hops away.
#[derive(Debug, Clone, PartialEq)]
pub struct CommunityMessage {
    pub primary_key: i64,
    pub community_name: String,
}

impl Entity for CommunityMessage {
    fn definition() -> EntityDef {
        EntityDef::builder::<Self>("CommunityMessage")
            .field("primary_key", Type::I64)
            .field("community_name", Type::String)
            .from_record(|mut row| {
                Ok(CommunityMessage {
                    primary_key: row.take(0)?,
                    community_name: row.take(1)?,
                })
            })
            .build()
    }
}

/// Reads the foreign key instead of the related row.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatMessage {
    pub primary_key: i64,
    pub text: String,
    pub user_id: i64,
}

impl Entity for FlatMessage {
    fn definition() -> EntityDef {
        EntityDef::builder::<Self>("FlatMessage")
            .field("primary_key", Type::I64)
            .field("text", Type::String)
            .field("user_id", Type::I64)
            .from_record(|mut row| {
                Ok(FlatMessage {
                    primary_key: row.take(0)?,
                    text: row.take(1)?,
                    user_id: row.take(2)?,
                })
            })
            .build()
    }
}

/// Carries a column computed by the query.
#[derive(Debug, Clone, PartialEq)]
pub struct TotalMessage {
    pub primary_key: i64,
    pub total: i64,
}

impl Entity for TotalMessage {
    fn definition() -> EntityDef {
        EntityDef::builder::<Self>("TotalMessage")
            .field("primary_key", Type::I64)
            .field("total", Type::I64)
            .from_record(|mut row| {
                Ok(TotalMessage {
                    primary_key: row.take(0)?,
                    total: row.take(1)?,
                })
            })
            .build()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OptionalGroup {
    pub primary_key: i64,
    pub name: Option<String>,
}

impl Entity for OptionalGroup {
    fn definition() -> EntityDef {
        EntityDef::builder::<Self>("OptionalGroup")
            .field("primary_key", Type::I64)
            .field("name", Type::option(Type::String))
            .from_record(|mut row| {
                Ok(OptionalGroup {
                    primary_key: row.take(0)?,
                    name: row.take(1)?,
                })
            })
            .build()
    }
}

/// `name` is required although `GroupModel.name` is nullable; one entity
/// per construction convention.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordGroup {
    pub primary_key: i64,
    pub name: String,
}

impl Entity for RecordGroup {
    fn definition() -> EntityDef {
        EntityDef::builder::<Self>("RecordGroup")
            .field("primary_key", Type::I64)
            .field("name", Type::String)
            .from_record(|mut row| {
                Ok(RecordGroup {
                    primary_key: row.take(0)?,
                    name: row.take(1)?,
                })
            })
            .build()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldsGroup {
    pub primary_key: i64,
    pub name: String,
}

impl Entity for FieldsGroup {
    fn definition() -> EntityDef {
        EntityDef::builder::<Self>("FieldsGroup")
            .field("primary_key", Type::I64)
            .field("name", Type::String)
            .from_fields(|mut fields| {
                Ok(FieldsGroup {
                    primary_key: fields.take("primary_key")?,
                    name: fields.take("name")?,
                })
            })
            .build()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssignGroup {
    pub primary_key: i64,
    pub name: String,
}

impl Entity for AssignGroup {
    fn definition() -> EntityDef {
        EntityDef::builder::<Self>("AssignGroup")
            .field("primary_key", Type::I64)
            .field("name", Type::String)
            .from_assign(|group, field, value| {
                match field {
                    "primary_key" => group.primary_key = i64::from_value(value)?,
                    "name" => group.name = String::from_value(value)?,
                    _ => bail!("`AssignGroup` has no `{field}` field"),
                }
                Ok(())
            })
            .build()
    }
}

/// Assign convention entity for reading users.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssignUser {
    pub primary_key: i64,
    pub name: String,
}

impl Entity for AssignUser {
    fn definition() -> EntityDef {
        EntityDef::builder::<Self>("AssignUser")
            .field("primary_key", Type::I64)
            .field("name", Type::String)
            .from_assign(|user, field, value| {
                match field {
                    "primary_key" => user.primary_key = i64::from_value(value)?,
                    "name" => user.name = String::from_value(value)?,
                    _ => bail!("`AssignUser` has no `{field}` field"),
                }
                Ok(())
            })
            .build()
    }
}

/// Nests a `User` under a plain column.
#[derive(Debug, Clone, PartialEq)]
pub struct UserAbout {
    pub primary_key: i64,
    pub about: User,
}

impl Entity for UserAbout {
    fn definition() -> EntityDef {
        EntityDef::builder::<Self>("UserAbout")
            .field("primary_key", Type::I64)
            .field("about", Type::entity::<User>())
            .from_record(|mut row| {
                Ok(UserAbout {
                    primary_key: row.take(0)?,
                    about: row.take_entity(1)?,
                })
            })
            .build()
    }
}

/// Nests a `Message` under a multi-valued relation.
#[derive(Debug, Clone, PartialEq)]
pub struct UserMessages {
    pub primary_key: i64,
    pub messages: Message,
}

impl Entity for UserMessages {
    fn definition() -> EntityDef {
        EntityDef::builder::<Self>("UserMessages")
            .field("primary_key", Type::I64)
            .field("messages", Type::entity::<Message>())
            .from_record(|mut row| {
                Ok(UserMessages {
                    primary_key: row.take(0)?,
                    messages: row.take_entity(1)?,
                })
            })
            .build()
    }
}

/// Declares fields but no constructor.
#[derive(Debug)]
pub struct Unconstructible;

impl Entity for Unconstructible {
    fn definition() -> EntityDef {
        EntityDef::builder::<Self>("Unconstructible")
            .field("primary_key", Type::I64)
            .build()
    }
}

/// Nests its own type, so a mapper over a self-relation never bottoms out.
#[derive(Debug)]
pub struct Thread {
    pub primary_key: i64,
    pub parent: Box<Thread>,
}

impl Entity for Thread {
    fn definition() -> EntityDef {
        EntityDef::builder::<Self>("Thread")
            .field("primary_key", Type::I64)
            .field("parent", Type::entity::<Thread>())
            .from_record(|mut row| {
                Ok(Thread {
                    primary_key: row.take(0)?,
                    parent: Box::new(row.take_entity(1)?),
                })
            })
            .build()
    }
}
