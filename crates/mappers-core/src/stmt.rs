mod column_ref;
pub use column_ref::ColumnRef;

mod from_value;
pub use from_value::FromValue;

mod instance;
pub use instance::Instance;

mod ty;
pub use ty::{EntityRef, Type};

mod value;
pub use value::Value;

mod value_fields;
pub use value_fields::ValueFields;

mod value_record;
pub use value_record::ValueRecord;
